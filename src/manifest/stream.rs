//! Multi-document YAML stream parsing and rendering

use super::quoting::QuotedStrings;
use crate::Result;
use serde::Deserialize;
use serde_yaml::Value;
use std::path::Path;

/// Parse every document of a YAML stream
///
/// Empty documents (a bare `---` or trailing separator) are dropped.
pub fn parse_documents(content: &str) -> Result<Vec<Value>> {
    let mut documents = Vec::new();

    for document in serde_yaml::Deserializer::from_str(content) {
        let value = Value::deserialize(document)?;
        if value.is_null() {
            tracing::debug!("Skipping empty YAML document");
            continue;
        }
        documents.push(value);
    }

    tracing::debug!(documents = documents.len(), "Parsed manifest stream");
    Ok(documents)
}

/// Read and parse a YAML stream from a file
pub fn read_documents(path: &Path) -> Result<Vec<Value>> {
    let content = std::fs::read_to_string(path)?;
    parse_documents(&content)
}

/// Render documents as one block-style YAML stream
///
/// Documents are separated by `---` lines; the first one has no leading
/// separator. Strings a YAML 1.1 reader would take for a bool or number are
/// single-quoted.
pub fn render_documents(documents: &[Value]) -> Result<String> {
    let mut quoted = QuotedStrings::for_documents(documents);
    let mut out = String::new();

    for (i, document) in documents.iter().enumerate() {
        if i > 0 {
            out.push_str("---\n");
        }
        let protected = quoted.protect(document.clone());
        out.push_str(&serde_yaml::to_string(&protected)?);
    }

    Ok(quoted.restore(&out))
}

/// Render documents and write them to `path`
pub fn write_documents(path: &Path, documents: &[Value]) -> Result<()> {
    let yaml = render_documents(documents)?;
    std::fs::write(path, yaml)?;

    tracing::info!(path = %path.display(), documents = documents.len(), "Wrote manifest");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const STREAM: &str = r#"
apiVersion: v1
kind: Namespace
metadata:
  name: cso-system
---
apiVersion: v1
kind: ConfigMap
metadata:
  name: settings
  namespace: cso-system
data:
  level: "3"
---
"#;

    #[test]
    fn test_parse_documents_skips_empty() {
        let docs = parse_documents(STREAM).unwrap();
        assert_eq!(docs.len(), 2);
        assert_eq!(docs[0]["kind"].as_str(), Some("Namespace"));
        assert_eq!(docs[1]["data"]["level"].as_str(), Some("3"));
    }

    #[test]
    fn test_parse_empty_input() {
        assert!(parse_documents("").unwrap().is_empty());
    }

    #[test]
    fn test_parse_malformed_input() {
        let err = parse_documents("kind: Secret\nmetadata: [unclosed\n").unwrap_err();
        assert_eq!(err.exit_code(), crate::error::EXIT_DOWNLOAD);
    }

    #[test]
    fn test_render_separates_documents() {
        let docs = parse_documents(STREAM).unwrap();
        let rendered = render_documents(&docs).unwrap();

        assert!(!rendered.starts_with("---"));
        assert_eq!(rendered.matches("\n---\n").count(), 1);
        assert_eq!(parse_documents(&rendered).unwrap(), docs);
    }

    #[test]
    fn test_render_keeps_block_style() {
        let docs = parse_documents(STREAM).unwrap();
        let rendered = render_documents(&docs).unwrap();
        assert!(rendered.contains("metadata:\n  name: cso-system\n"));
        assert!(!rendered.contains('{'));
    }

    #[test]
    fn test_render_quotes_yaml11_scalars() {
        let docs = parse_documents(
            "data:\n  a: \"on\"\n  b: \"yes\"\n  c: \"n\"\n  e: \"1_000\"\n  f: \"off\"\n  g: \"0755\"\n  h: plain\n",
        )
        .unwrap();
        let rendered = render_documents(&docs).unwrap();

        assert!(rendered.contains("a: 'on'"));
        assert!(rendered.contains("b: 'yes'"));
        assert!(rendered.contains("c: 'n'"));
        assert!(rendered.contains("e: '1_000'"));
        assert!(rendered.contains("f: 'off'"));
        assert!(rendered.contains("g: '0755'"));
        assert!(rendered.contains("h: plain"));
        assert_eq!(parse_documents(&rendered).unwrap(), docs);
    }

    #[test]
    fn test_render_leaves_real_booleans_plain() {
        let docs = parse_documents("enabled: true\nreplicas: 3\nname: 'true'\n").unwrap();
        let rendered = render_documents(&docs).unwrap();

        assert!(rendered.contains("enabled: true\n"));
        assert!(rendered.contains("replicas: 3\n"));
        assert!(rendered.contains("name: 'true'\n"));
    }

    #[test]
    fn test_write_and_read_documents() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("out.yaml");
        let docs = parse_documents(STREAM).unwrap();

        write_documents(&path, &docs).unwrap();
        assert_eq!(read_documents(&path).unwrap(), docs);
    }
}

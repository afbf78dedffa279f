//! Quoting of strings that a YAML 1.1 reader would resolve to another type
//!
//! serde_yaml only quotes strings that look like YAML 1.2 scalars. Kubernetes
//! reads manifests with a YAML 1.1 resolver, where `on`, `n`, `1_000` or
//! `190:20:30` are booleans and integers. Such strings are swapped for plain
//! placeholders before emitting and replaced by single-quoted text afterwards.

use lazy_static::lazy_static;
use regex::Regex;
use serde_yaml::{Mapping, Value};

lazy_static! {
    /// Plain scalars YAML 1.1 resolves to bool, null, int, float or merge
    static ref YAML11_IMPLICIT: Regex = Regex::new(
        r"(?x)^(?:
            (?i:y|n|yes|no|true|false|on|off)
          | ~ | null | Null | NULL | << | =
          | [-+]?0b[01_]+
          | [-+]?0[0-7_]+
          | [-+]?(?:0|[1-9][0-9_]*)
          | [-+]?0x[0-9a-fA-F_]+
          | [-+]?[1-9][0-9_]*(?::[0-5]?[0-9])+
          | [-+]?(?:[0-9][0-9_]*)?\.[0-9.]*(?:[eE][-+]?[0-9]+)?
          | [-+]?[0-9][0-9_]*(?::[0-5]?[0-9])+\.[0-9_]*
          | [-+]?\.(?:inf|Inf|INF)
          | \.(?:nan|NaN|NAN)
        )$"
    )
    .unwrap();
}

/// Whether a YAML 1.1 reader would not read `s` back as a string when plain
pub fn needs_quoting(s: &str) -> bool {
    YAML11_IMPLICIT.is_match(s)
}

/// Placeholder table for one rendered stream
#[derive(Debug, Default)]
pub(crate) struct QuotedStrings {
    prefix: String,
    originals: Vec<String>,
}

impl QuotedStrings {
    /// Pick a placeholder prefix that occurs nowhere in `documents`
    pub(crate) fn for_documents(documents: &[Value]) -> Self {
        let prefix = (0u32..)
            .map(|nonce| format!("yamlquoted{}n", nonce))
            .find(|prefix| !documents.iter().any(|doc| contains_text(doc, prefix)))
            .unwrap_or_default();

        Self {
            prefix,
            originals: Vec::new(),
        }
    }

    /// Replace every ambiguous string in `value` with a placeholder
    pub(crate) fn protect(&mut self, value: Value) -> Value {
        match value {
            Value::String(s) if needs_quoting(&s) => {
                let placeholder = self.placeholder(self.originals.len());
                self.originals.push(s);
                Value::String(placeholder)
            }
            Value::Sequence(seq) => {
                let mut out = Vec::with_capacity(seq.len());
                for item in seq {
                    out.push(self.protect(item));
                }
                Value::Sequence(out)
            }
            Value::Mapping(map) => {
                let mut out = Mapping::with_capacity(map.len());
                for (key, item) in map {
                    let key = self.protect(key);
                    let item = self.protect(item);
                    out.insert(key, item);
                }
                Value::Mapping(out)
            }
            Value::Tagged(mut tagged) => {
                tagged.value = self.protect(tagged.value);
                Value::Tagged(tagged)
            }
            other => other,
        }
    }

    /// Substitute single-quoted originals for the placeholders in `rendered`
    pub(crate) fn restore(&self, rendered: &str) -> String {
        let mut out = rendered.to_string();
        for (index, original) in self.originals.iter().enumerate() {
            out = out.replace(
                &self.placeholder(index),
                &format!("'{}'", original.replace('\'', "''")),
            );
        }
        out
    }

    // The trailing `z` keeps placeholder 1 from matching inside placeholder 10
    fn placeholder(&self, index: usize) -> String {
        format!("{}{}z", self.prefix, index)
    }
}

fn contains_text(value: &Value, needle: &str) -> bool {
    match value {
        Value::String(s) => s.contains(needle),
        Value::Sequence(seq) => seq.iter().any(|item| contains_text(item, needle)),
        Value::Mapping(map) => map
            .iter()
            .any(|(key, item)| contains_text(key, needle) || contains_text(item, needle)),
        Value::Tagged(tagged) => {
            tagged.tag.to_string().contains(needle) || contains_text(&tagged.value, needle)
        }
        _ => false,
    }
}

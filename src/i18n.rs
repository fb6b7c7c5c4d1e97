use std::collections::HashMap;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde_json::Value;

/// Translation provider. Returning the lookup key unchanged means "no translation".
pub trait Translate {
    fn translate(&self, key: &str) -> String;
}

impl<F> Translate for F
where
    F: Fn(&str) -> String,
{
    fn translate(&self, key: &str) -> String {
        self(key)
    }
}

/// Flat dotted-key string table, e.g. `metrics.goals` → `Goles`.
#[derive(Debug, Clone, Default)]
pub struct TranslationTable {
    entries: HashMap<String, String>,
}

impl TranslationTable {
    /// Accepts either nested objects (`{"metrics": {"goals": "Goles"}}`) or
    /// already-dotted keys. Non-string leaves are skipped.
    pub fn from_json_str(raw: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(raw).context("parse translation table")?;
        let mut entries = HashMap::new();
        flatten_into(&mut entries, String::new(), &value);
        Ok(Self { entries })
    }

    pub fn load(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("read translation table {}", path.display()))?;
        Self::from_json_str(&raw)
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.entries.insert(key.into(), value.into());
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Translate for TranslationTable {
    fn translate(&self, key: &str) -> String {
        self.entries
            .get(key)
            .cloned()
            .unwrap_or_else(|| key.to_string())
    }
}

fn flatten_into(out: &mut HashMap<String, String>, prefix: String, value: &Value) {
    match value {
        Value::Object(map) => {
            for (k, v) in map {
                let key = if prefix.is_empty() {
                    k.clone()
                } else {
                    format!("{prefix}.{k}")
                };
                flatten_into(out, key, v);
            }
        }
        Value::String(s) if !prefix.is_empty() => {
            out.insert(prefix, s.clone());
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nested_tables_flatten_to_dotted_keys() {
        let table = TranslationTable::from_json_str(
            r#"{"metrics": {"goals": "Goles", "assists": "Asistencias"}, "title": "Ojeador", "n": 3}"#,
        )
        .unwrap();
        assert_eq!(table.len(), 3);
        assert_eq!(table.translate("metrics.goals"), "Goles");
        assert_eq!(table.translate("title"), "Ojeador");
        assert_eq!(table.translate("metrics.missing"), "metrics.missing");
    }

    #[test]
    fn closures_are_translators() {
        let t = |key: &str| key.to_uppercase();
        assert_eq!(t.translate("metrics.goals"), "METRICS.GOALS");
    }
}

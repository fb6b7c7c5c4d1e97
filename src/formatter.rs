use crate::catalog::MetricCatalog;
use crate::i18n::Translate;

/// Human-readable label for a metric key.
///
/// Lookup order: translator (`metrics.<key>`), catalog label, then a title-cased
/// label derived from the key itself (`successfulPasses` → `Successful Passes`).
pub fn format_metric_name(
    catalog: &MetricCatalog,
    key: &str,
    translate: Option<&dyn Translate>,
) -> String {
    if key.trim().is_empty() {
        return String::new();
    }
    if let Some(t) = translate {
        let lookup = format!("metrics.{key}");
        let translated = t.translate(&lookup);
        if !translated.trim().is_empty() && translated != lookup {
            return translated;
        }
    }
    if let Some(label) = catalog.label_of(key) {
        return label.to_string();
    }
    title_case_key(key)
}

/// Splits on `_`, `-`, whitespace and lower→upper camelCase boundaries and
/// capitalizes each word. Applying it to its own output is a no-op.
pub fn title_case_key(key: &str) -> String {
    split_words(key)
        .iter()
        .map(|w| capitalize(w))
        .collect::<Vec<_>>()
        .join(" ")
}

fn split_words(key: &str) -> Vec<String> {
    let mut words = Vec::new();
    let mut current = String::new();
    let mut prev: Option<char> = None;
    for c in key.chars() {
        if c == '_' || c == '-' || c.is_whitespace() {
            if !current.is_empty() {
                words.push(std::mem::take(&mut current));
            }
            prev = None;
            continue;
        }
        let boundary = c.is_uppercase()
            && prev.is_some_and(|p| p.is_lowercase() || p.is_ascii_digit());
        if boundary && !current.is_empty() {
            words.push(std::mem::take(&mut current));
        }
        current.push(c);
        prev = Some(c);
    }
    if !current.is_empty() {
        words.push(current);
    }
    words
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::MetricCatalog;

    #[test]
    fn camel_and_snake_keys_are_title_cased() {
        assert_eq!(title_case_key("successfulPasses"), "Successful Passes");
        assert_eq!(title_case_key("defensive_duels_won"), "Defensive Duels Won");
        assert_eq!(title_case_key("xgShot"), "Xg Shot");
        assert_eq!(title_case_key("  "), "");
    }

    #[test]
    fn title_case_is_idempotent() {
        for key in ["successfulPasses", "goals_per_90", "progressiveRun", "a-b_cD"] {
            let once = title_case_key(key);
            assert_eq!(title_case_key(&once), once);
        }
    }

    #[test]
    fn translation_wins_then_catalog_then_fallback() {
        let cat = MetricCatalog::standard();
        let es = |key: &str| {
            if key == "metrics.goals" {
                "Goles".to_string()
            } else {
                key.to_string()
            }
        };
        assert_eq!(format_metric_name(&cat, "goals", Some(&es)), "Goles");
        // Identity translation falls through to the catalog label.
        assert_eq!(
            format_metric_name(&cat, "progressiveRun", Some(&es)),
            "Progressive Runs"
        );
        assert_eq!(format_metric_name(&cat, "keyPasses", None), "Key Passes");
        assert_eq!(format_metric_name(&cat, "", Some(&es)), "");
    }

    #[test]
    fn empty_translation_is_ignored() {
        let cat = MetricCatalog::standard();
        let blank = |_: &str| String::new();
        assert_eq!(format_metric_name(&cat, "keyPasses", Some(&blank)), "Key Passes");
    }
}

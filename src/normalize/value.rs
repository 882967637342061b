//! Absence-tolerant readers over `serde_json::Value`.
//!
//! Each helper takes the parent as an `Option` so a chain of lookups
//! degrades gracefully at whichever level first goes missing, and
//! records the substitution it made.

use serde_json::Value;

/// Descends one level. Absent parent or absent key both yield `None`.
pub(crate) fn member<'a>(value: Option<&'a Value>, key: &str) -> Option<&'a Value> {
    value.and_then(|v| v.get(key))
}

/// Reads a string field, substituting `default` when the field is
/// missing or not a string.
pub(crate) fn string_or(
    value: Option<&Value>,
    key: &str,
    default: &str,
    path: &str,
    warnings: &mut Vec<String>,
) -> String {
    match member(value, key) {
        Some(Value::String(text)) => text.clone(),
        _ => {
            warnings.push(format!("{path}.{key}: defaulted to {default:?}"));
            default.to_string()
        }
    }
}

/// Reads a non-negative count, substituting zero. Accepts integral
/// floats because loosely-typed producers emit those for counts.
pub(crate) fn count_or_zero(
    value: Option<&Value>,
    key: &str,
    path: &str,
    warnings: &mut Vec<String>,
) -> u32 {
    let number = member(value, key).and_then(|v| {
        v.as_u64()
            .or_else(|| v.as_f64().filter(|f| *f >= 0.0).map(|f| f as u64))
    });
    match number {
        Some(n) => n as u32,
        None => {
            warnings.push(format!("{path}.{key}: defaulted to 0"));
            0
        }
    }
}

/// Reads a list field. A present non-sequence value is treated exactly
/// like an absent one.
pub(crate) fn sequence<'a>(
    value: Option<&'a Value>,
    key: &str,
    path: &str,
    warnings: &mut Vec<String>,
) -> Option<&'a Vec<Value>> {
    match member(value, key) {
        Some(Value::Array(items)) => Some(items),
        Some(_) => {
            warnings.push(format!("{path}.{key}: not a sequence, treated as empty"));
            None
        }
        None => {
            warnings.push(format!("{path}.{key}: defaulted to empty sequence"));
            None
        }
    }
}

/// Reads a list of strings, dropping non-string elements.
pub(crate) fn string_sequence(
    value: Option<&Value>,
    key: &str,
    path: &str,
    warnings: &mut Vec<String>,
) -> Vec<String> {
    sequence(value, key, path, warnings)
        .map(|items| {
            items
                .iter()
                .filter_map(Value::as_str)
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn string_or_substitutes_on_wrong_type() {
        let raw = json!({"summary": 3});
        let mut warnings = Vec::new();
        let text = string_or(Some(&raw), "summary", "Analysis complete", "report", &mut warnings);
        assert_eq!(text, "Analysis complete");
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].starts_with("report.summary"));
    }

    #[test]
    fn count_accepts_integral_floats() {
        let raw = json!({"total_changes": 5.0});
        let mut warnings = Vec::new();
        assert_eq!(count_or_zero(Some(&raw), "total_changes", "report", &mut warnings), 5);
        assert!(warnings.is_empty());
    }

    #[test]
    fn sequence_treats_non_array_as_absent() {
        let raw = json!({"schemas": "not-a-list"});
        let mut warnings = Vec::new();
        assert!(sequence(Some(&raw), "schemas", "categories", &mut warnings).is_none());
        assert_eq!(warnings.len(), 1);
    }

    #[test]
    fn member_chain_degrades_to_none() {
        let raw = json!({"change_report": {}});
        let report = member(Some(&raw), "change_report");
        let categories = member(report, "categories");
        assert!(member(categories, "api_endpoints").is_none());
    }
}

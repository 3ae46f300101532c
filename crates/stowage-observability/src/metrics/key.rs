//! Series identity: metric name plus a canonical (sorted) label set.

use stowage_core::errors::MetricsError;

/// Identifies one series. Labels are kept sorted by name so that the same
/// set given in any order maps to the same key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MetricKey {
    name: String,
    labels: Vec<(String, String)>,
}

impl MetricKey {
    pub fn new(name: &str, labels: &[(&str, &str)]) -> Result<Self, MetricsError> {
        if !is_valid_metric_name(name) {
            return Err(MetricsError::InvalidName {
                name: name.to_string(),
            });
        }
        let mut owned: Vec<(String, String)> = Vec::with_capacity(labels.len());
        for (label, value) in labels {
            if !is_valid_label_name(label) || owned.iter().any(|(l, _)| l == label) {
                return Err(MetricsError::InvalidLabel {
                    name: name.to_string(),
                    label: label.to_string(),
                });
            }
            owned.push((label.to_string(), value.to_string()));
        }
        owned.sort();
        Ok(Self {
            name: name.to_string(),
            labels: owned,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn labels(&self) -> &[(String, String)] {
        &self.labels
    }
}

/// `[a-zA-Z_:][a-zA-Z0-9_:]*`
fn is_valid_metric_name(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' || c == ':' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == ':')
}

/// `[a-zA-Z_][a-zA-Z0-9_]*`, excluding the reserved `__` prefix.
fn is_valid_label_name(label: &str) -> bool {
    if label.starts_with("__") {
        return false;
    }
    let mut chars = label.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn label_order_does_not_matter() {
        let a = MetricKey::new("m", &[("b", "2"), ("a", "1")]).unwrap();
        let b = MetricKey::new("m", &[("a", "1"), ("b", "2")]).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn rejects_bad_names() {
        assert!(MetricKey::new("", &[]).is_err());
        assert!(MetricKey::new("9lives", &[]).is_err());
        assert!(MetricKey::new("has space", &[]).is_err());
        assert!(MetricKey::new("ns:metric_total", &[]).is_ok());
    }

    #[test]
    fn rejects_bad_or_duplicate_labels() {
        assert!(MetricKey::new("m", &[("__name__", "x")]).is_err());
        assert!(MetricKey::new("m", &[("a:b", "x")]).is_err());
        assert!(MetricKey::new("m", &[("a", "1"), ("a", "2")]).is_err());
    }
}

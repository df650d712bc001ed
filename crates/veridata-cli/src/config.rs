use std::path::PathBuf;

use serde::Deserialize;

/// TOML description of a named checkpoint with ordered bindings.
///
/// ```toml
/// name = "bank_transactions_checkpoint"
///
/// [[bindings]]
/// data = "fixtures/bank_transactions.csv"
/// suite = "fixtures/bank_transactions.suite.json"
/// ```
#[derive(Debug, Clone, Deserialize)]
pub struct CheckpointConfig {
    pub name: String,
    #[serde(default)]
    pub bindings: Vec<BindingConfig>,
}

/// One dataset/suite pair, in evaluation order.
#[derive(Debug, Clone, Deserialize)]
pub struct BindingConfig {
    /// CSV dataset path.
    pub data: PathBuf,
    /// Suite JSON document path.
    pub suite: PathBuf,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_a_multi_binding_checkpoint() {
        let raw = r#"
name = "nightly"

[[bindings]]
data = "a.csv"
suite = "a.suite.json"

[[bindings]]
data = "b.csv"
suite = "b.suite.json"
"#;
        let config: CheckpointConfig = toml::from_str(raw).expect("parse config");
        assert_eq!(config.name, "nightly");
        assert_eq!(config.bindings.len(), 2);
        assert_eq!(config.bindings[1].data, PathBuf::from("b.csv"));
    }

    #[test]
    fn bindings_default_to_empty() {
        let config: CheckpointConfig = toml::from_str("name = \"bare\"").expect("parse config");
        assert!(config.bindings.is_empty());
    }
}

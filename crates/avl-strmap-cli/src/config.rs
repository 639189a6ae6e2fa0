use std::path::Path;

use avl_strmap::TreeConfig;
use serde::{Deserialize, Serialize};

use crate::error::HarnessError;

pub const DEFAULT_SEED: u64 = 0xDEAD_BEEF;
pub const DEFAULT_KEY_SIZE: usize = 10;
pub const DEFAULT_POPULATION: usize = 1000;
pub const DEFAULT_OPERATIONS: usize = 1000;

/// Settings for one fuzz run.
///
/// Read from TOML; missing fields fall back to the defaults below.
///
/// ```toml
/// seed = 3735928559
/// key_size = 10
/// population = 1000
/// operations = 1000
/// delete_probability = 0.5
/// check_every_op = false
///
/// [tree]
/// duplicate_policy = "overwrite"
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HarnessConfig {
    pub seed: u64,
    pub key_size: usize,
    /// Keys inserted before the mixed phase starts.
    pub population: usize,
    /// Mixed rounds; each optionally deletes one tracked key, then inserts one.
    pub operations: usize,
    pub delete_probability: f64,
    /// Run every invariant check after each single insert or delete.
    pub check_every_op: bool,
    pub tree: TreeConfig,
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self {
            seed: DEFAULT_SEED,
            key_size: DEFAULT_KEY_SIZE,
            population: DEFAULT_POPULATION,
            operations: DEFAULT_OPERATIONS,
            delete_probability: 0.5,
            check_every_op: false,
            tree: TreeConfig::default(),
        }
    }
}

impl HarnessConfig {
    pub fn from_toml_str(s: &str) -> Result<Self, HarnessError> {
        let config: Self = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self, HarnessError> {
        let s = std::fs::read_to_string(path).map_err(|source| HarnessError::ReadConfig {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&s)
    }

    pub fn validate(&self) -> Result<(), HarnessError> {
        if self.key_size == 0 {
            return Err(HarnessError::InvalidConfig(
                "key_size must be at least 1".to_string(),
            ));
        }
        if !(0.0..=1.0).contains(&self.delete_probability) {
            return Err(HarnessError::InvalidConfig(format!(
                "delete_probability must be within [0, 1], got {}",
                self.delete_probability
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use avl_strmap::DuplicatePolicy;

    #[test]
    fn empty_document_yields_defaults() {
        assert_eq!(HarnessConfig::from_toml_str("").unwrap(), HarnessConfig::default());
    }

    #[test]
    fn partial_document_overrides_fields() {
        let config = HarnessConfig::from_toml_str(
            r#"
            population = 10
            check_every_op = true

            [tree]
            duplicate_policy = "ignore"
            "#,
        )
        .unwrap();
        assert_eq!(config.population, 10);
        assert!(config.check_every_op);
        assert_eq!(config.tree.duplicate_policy, DuplicatePolicy::Ignore);
        assert_eq!(config.key_size, DEFAULT_KEY_SIZE);
    }

    #[test]
    fn rejects_bad_probability() {
        let err = HarnessConfig::from_toml_str("delete_probability = 1.5").unwrap_err();
        assert!(matches!(err, HarnessError::InvalidConfig(_)));
    }

    #[test]
    fn rejects_zero_key_size() {
        let err = HarnessConfig::from_toml_str("key_size = 0").unwrap_err();
        assert!(matches!(err, HarnessError::InvalidConfig(_)));
    }

    #[test]
    fn rejects_unknown_policy() {
        let err = HarnessConfig::from_toml_str("[tree]\nduplicate_policy = \"merge\"").unwrap_err();
        assert!(matches!(err, HarnessError::ParseConfig(_)));
    }
}

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{ChangekitError, Result};

/// Value type of a configured custom option.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CustomType {
    #[default]
    String,
    Int,
    Enum,
}

/// A declared custom metadata option for change fragments.
///
/// Each option contributes one key in [Change::custom](crate::domain::Change)
/// and is validated when fragments are created from CLI values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomConfig {
    /// Key used in the custom map of the change fragment.
    pub key: String,

    #[serde(rename = "type", default)]
    pub value_type: CustomType,

    /// If true, an empty value does not fail validation. The optional
    /// check runs before minimum bounds, so an optional value that IS
    /// provided must still satisfy them.
    #[serde(default)]
    pub optional: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_length: Option<usize>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_length: Option<usize>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_int: Option<i64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_int: Option<i64>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub enum_options: Vec<String>,
}

impl CustomConfig {
    /// Validate a value against this option's type and bounds.
    pub fn validate(&self, value: &str) -> Result<()> {
        match self.value_type {
            CustomType::String => self.validate_string(value),
            CustomType::Int => self.validate_int(value),
            CustomType::Enum => self.validate_enum(value),
        }
    }

    fn validate_string(&self, value: &str) -> Result<()> {
        let length = value.len();

        if self.optional && length == 0 {
            return Ok(());
        }

        if let Some(min) = self.min_length {
            if length < min {
                return Err(ChangekitError::custom(format!(
                    "input length too short: length of {} < {} for '{}'",
                    length, min, self.key
                )));
            }
        }

        if let Some(max) = self.max_length {
            if length > max {
                return Err(ChangekitError::custom(format!(
                    "input length too long: length of {} > {} for '{}'",
                    length, max, self.key
                )));
            }
        }

        Ok(())
    }

    fn validate_int(&self, value: &str) -> Result<()> {
        if self.optional && value.is_empty() {
            return Ok(());
        }

        let parsed: i64 = value
            .parse()
            .map_err(|_| ChangekitError::custom(format!("invalid number for '{}'", self.key)))?;

        if let Some(min) = self.min_int {
            if parsed < min {
                return Err(ChangekitError::custom(format!(
                    "input below minimum: {} < {} for '{}'",
                    parsed, min, self.key
                )));
            }
        }

        if let Some(max) = self.max_int {
            if parsed > max {
                return Err(ChangekitError::custom(format!(
                    "input above maximum: {} > {} for '{}'",
                    parsed, max, self.key
                )));
            }
        }

        Ok(())
    }

    fn validate_enum(&self, value: &str) -> Result<()> {
        if self.enum_options.iter().any(|opt| opt == value) {
            return Ok(());
        }

        Err(ChangekitError::custom(format!(
            "invalid enum: '{}' for '{}'",
            value, self.key
        )))
    }
}

/// Parse CLI `Key=Value` arguments into a custom map.
pub fn custom_map_from_pairs(pairs: &[String]) -> Result<BTreeMap<String, String>> {
    let mut map = BTreeMap::new();

    for pair in pairs {
        let (key, value) = pair.split_once('=').ok_or_else(|| {
            ChangekitError::custom(format!(
                "invalid custom format, must be \"Key=Value\": '{}'",
                pair
            ))
        })?;
        map.insert(key.to_string(), value.to_string());
    }

    Ok(map)
}

/// Validate a full custom map against the configured options.
///
/// Every configured option validates its value (missing keys validate
/// as empty, so non-optional options reject absence); keys not backed
/// by any configured option are rejected.
pub fn validate_custom_map(
    configs: &[CustomConfig],
    values: &BTreeMap<String, String>,
) -> Result<()> {
    for key in values.keys() {
        if !configs.iter().any(|c| &c.key == key) {
            return Err(ChangekitError::custom(format!(
                "custom value provided but not configured: '{}'",
                key
            )));
        }
    }

    for config in configs {
        let value = values.get(&config.key).map(String::as_str).unwrap_or("");
        config.validate(value)?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn string_option(key: &str, min: Option<usize>, max: Option<usize>) -> CustomConfig {
        CustomConfig {
            key: key.to_string(),
            value_type: CustomType::String,
            optional: false,
            min_length: min,
            max_length: max,
            min_int: None,
            max_int: None,
            enum_options: Vec::new(),
        }
    }

    #[test]
    fn test_string_within_bounds() {
        let option = string_option("Author", Some(3), Some(10));
        assert!(option.validate("miniscruff").is_ok());
    }

    #[test]
    fn test_string_too_short() {
        let option = string_option("Author", Some(3), None);
        let err = option.validate("ab").unwrap_err();
        assert!(err.to_string().contains("too short"));
    }

    #[test]
    fn test_string_too_long() {
        let option = string_option("Author", None, Some(4));
        let err = option.validate("abcdef").unwrap_err();
        assert!(err.to_string().contains("too long"));
    }

    #[test]
    fn test_optional_empty_skips_bounds() {
        let mut option = string_option("Author", Some(3), None);
        option.optional = true;
        assert!(option.validate("").is_ok());
        assert!(option.validate("ab").is_err());
    }

    #[test]
    fn test_int_bounds() {
        let option = CustomConfig {
            key: "Issue".to_string(),
            value_type: CustomType::Int,
            optional: false,
            min_length: None,
            max_length: None,
            min_int: Some(1),
            max_int: Some(9999),
            enum_options: Vec::new(),
        };

        assert!(option.validate("42").is_ok());
        assert!(option.validate("0").is_err());
        assert!(option.validate("10000").is_err());
        assert!(option.validate("not-a-number").is_err());
    }

    #[test]
    fn test_enum_options() {
        let option = CustomConfig {
            key: "Team".to_string(),
            value_type: CustomType::Enum,
            optional: false,
            min_length: None,
            max_length: None,
            min_int: None,
            max_int: None,
            enum_options: vec!["core".to_string(), "infra".to_string()],
        };

        assert!(option.validate("core").is_ok());
        assert!(option.validate("unknown").is_err());
    }

    #[test]
    fn test_custom_map_from_pairs() {
        let pairs = vec!["Issue=15".to_string(), "Author=scruff".to_string()];
        let map = custom_map_from_pairs(&pairs).unwrap();
        assert_eq!(map.get("Issue"), Some(&"15".to_string()));
        assert_eq!(map.get("Author"), Some(&"scruff".to_string()));
    }

    #[test]
    fn test_custom_map_from_pairs_bad_format() {
        let pairs = vec!["NoEquals".to_string()];
        assert!(custom_map_from_pairs(&pairs).is_err());
    }

    #[test]
    fn test_validate_custom_map_unknown_key() {
        let configs = vec![string_option("Author", None, None)];
        let mut values = BTreeMap::new();
        values.insert("Unknown".to_string(), "x".to_string());

        let err = validate_custom_map(&configs, &values).unwrap_err();
        assert!(err.to_string().contains("not configured"));
    }

    #[test]
    fn test_validate_custom_map_missing_required() {
        let configs = vec![string_option("Author", Some(1), None)];
        let err = validate_custom_map(&configs, &BTreeMap::new()).unwrap_err();
        assert!(err.to_string().contains("too short"));
    }
}

//! Core runtime configuration.
//!
//! Configuration is resolved once at process startup and then passed into the registry. The
//! helpers here take the raw environment values as `Option<String>` so that callers decide
//! where values come from and tests never touch the process environment.

use crate::constants::DEFAULT_FACILITY_NAME;
use crate::{HmsError, HmsResult};
use hms_types::NonEmptyText;

/// Core configuration resolved at startup.
#[derive(Clone, Debug)]
pub struct CoreConfig {
    facility_name: String,
    history_timestamps: bool,
}

impl CoreConfig {
    /// Create a new `CoreConfig`.
    pub fn new(facility_name: impl AsRef<str>, history_timestamps: bool) -> HmsResult<Self> {
        let facility_name = NonEmptyText::new(facility_name)
            .map_err(|_| HmsError::InvalidInput("facility_name cannot be empty".into()))?;

        Ok(Self {
            facility_name: facility_name.as_str().to_string(),
            history_timestamps,
        })
    }

    /// Build a configuration from raw environment values.
    ///
    /// Missing or blank values fall back to the defaults.
    pub fn from_env_values(
        facility_name: Option<String>,
        history_timestamps: Option<String>,
    ) -> HmsResult<Self> {
        let facility_name = facility_name_from_env_value(facility_name);
        let history_timestamps = bool_from_env_value(history_timestamps)?.unwrap_or(false);
        Self::new(facility_name, history_timestamps)
    }

    pub fn facility_name(&self) -> &str {
        &self.facility_name
    }

    /// Whether rendered history lines carry the entry timestamp.
    pub fn history_timestamps(&self) -> bool {
        self.history_timestamps
    }
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            facility_name: DEFAULT_FACILITY_NAME.to_string(),
            history_timestamps: false,
        }
    }
}

/// Resolve the facility name, falling back to the default for missing or blank values.
pub fn facility_name_from_env_value(value: Option<String>) -> String {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| DEFAULT_FACILITY_NAME.to_string())
}

/// Parse a boolean flag from an optional string value.
///
/// Returns `Ok(None)` for missing or blank values.
pub fn bool_from_env_value(value: Option<String>) -> HmsResult<Option<bool>> {
    let value = value
        .map(|v| v.trim().to_ascii_lowercase())
        .filter(|v| !v.is_empty());

    match value.as_deref() {
        None => Ok(None),
        Some("1" | "true" | "yes" | "on") => Ok(Some(true)),
        Some("0" | "false" | "no" | "off") => Ok(Some(false)),
        Some(other) => Err(HmsError::InvalidInput(format!(
            "expected a boolean flag, got '{other}'"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_blank_facility_name() {
        let err = CoreConfig::new("   ", false).expect_err("blank name should fail");
        assert!(matches!(err, HmsError::InvalidInput(_)));
    }

    #[test]
    fn env_values_fall_back_to_defaults() {
        let cfg = CoreConfig::from_env_values(None, Some("  ".into())).expect("defaults");
        assert_eq!(cfg.facility_name(), DEFAULT_FACILITY_NAME);
        assert!(!cfg.history_timestamps());
    }

    #[test]
    fn env_values_override_defaults() {
        let cfg = CoreConfig::from_env_values(Some(" St Mary's ".into()), Some("YES".into()))
            .expect("valid config");
        assert_eq!(cfg.facility_name(), "St Mary's");
        assert!(cfg.history_timestamps());
    }

    #[test]
    fn bool_flag_rejects_garbage() {
        let err = bool_from_env_value(Some("maybe".into())).expect_err("not a flag");
        assert!(err.to_string().contains("maybe"));
        assert_eq!(bool_from_env_value(Some("0".into())).expect("flag"), Some(false));
    }
}

//! Requested refresh actions.
//!
//! The action arrives as an arbitrary JSON value in the request body. Two
//! string names select a special fetch plan; every other value (including
//! the default `refresh`, numbers and `null`) falls back to the
//! agencies-only plan. The raw value is kept by the caller and echoed back
//! verbatim in the response and the record.

use std::fmt;

use serde_json::Value;

/// Fetch plan selected by the request's `action` field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Action {
    /// Agencies, search counts, and the custom metric.
    FullRefresh,
    /// Search results only.
    Detailed,
    /// Agencies only. Selected for `refresh` and any unrecognised name.
    #[default]
    Refresh,
}

impl Action {
    /// Action name used when the request body does not carry one.
    pub const DEFAULT_NAME: &'static str = "refresh";

    /// Select the fetch plan for a raw action name.
    pub fn from_name(name: &str) -> Self {
        match name {
            "full_refresh" => Self::FullRefresh,
            "detailed" => Self::Detailed,
            _ => Self::Refresh,
        }
    }

    /// Select the fetch plan for a raw `action` value. Only strings name a
    /// plan; any other JSON value selects the default.
    pub fn from_value(value: &Value) -> Self {
        value.as_str().map(Self::from_name).unwrap_or_default()
    }

    /// Canonical name of the plan.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::FullRefresh => "full_refresh",
            Self::Detailed => "detailed",
            Self::Refresh => "refresh",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn known_names_select_their_plan() {
        assert_eq!(Action::from_name("full_refresh"), Action::FullRefresh);
        assert_eq!(Action::from_name("detailed"), Action::Detailed);
        assert_eq!(Action::from_name("refresh"), Action::Refresh);
    }

    #[test]
    fn unknown_names_fall_back_to_refresh() {
        assert_eq!(Action::from_name(""), Action::Refresh);
        assert_eq!(Action::from_name("FULL_REFRESH"), Action::Refresh);
        assert_eq!(Action::from_name("delete_everything"), Action::Refresh);
    }

    #[test]
    fn non_string_values_select_default_plan() {
        assert_eq!(Action::from_value(&json!("detailed")), Action::Detailed);
        assert_eq!(Action::from_value(&json!(5)), Action::Refresh);
        assert_eq!(Action::from_value(&Value::Null), Action::Refresh);
        assert_eq!(Action::from_value(&json!(["full_refresh"])), Action::Refresh);
    }

    #[test]
    fn default_name_maps_to_default_plan() {
        assert_eq!(Action::from_name(Action::DEFAULT_NAME), Action::default());
    }
}

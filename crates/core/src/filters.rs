//! Dashboard filter and variable normalization.
//!
//! Filters and variables are authored with snake_case configuration keys
//! and mapped onto the service's wire names (`NOT`, `applyIfExists`,
//! `preferredSuggestions`, ...). Key presence matters: optional wire keys are
//! omitted rather than sent as null.

use serde::{Deserialize, Serialize, Serializer};
use validator::Validate;

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// A dashboard-level source filter.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct FilterDefinition {
    #[validate(length(min = 1, message = "must not be empty"))]
    pub property: String,
    #[serde(default)]
    pub negated: bool,
    pub values: Vec<String>,
    #[serde(default)]
    pub apply_if_exist: bool,
}

/// A dashboard variable users can change from the dashboard header.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct VariableDefinition {
    #[validate(length(min = 1, message = "must not be empty"))]
    pub property: String,
    pub alias: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub values: Vec<String>,
    #[serde(default)]
    pub value_required: bool,
    #[serde(default)]
    pub values_suggested: Vec<String>,
    #[serde(default)]
    pub restricted_suggestions: bool,
    #[serde(default)]
    pub replace_only: bool,
    #[serde(default)]
    pub apply_if_exist: bool,
}

// ---------------------------------------------------------------------------
// Wire types
// ---------------------------------------------------------------------------

/// Normalized filter as sent to the service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SourceFilter {
    pub property: String,
    #[serde(rename = "NOT")]
    pub not: bool,
    pub value: Vec<String>,
    #[serde(rename = "applyIfExists")]
    pub apply_if_exists: bool,
}

/// Value of a variable on the wire.
///
/// A variable without values is sent as the empty string rather than an
/// empty list; the service distinguishes the two.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VariableValue {
    Unset,
    Values(Vec<String>),
}

impl Serialize for VariableValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            VariableValue::Unset => serializer.serialize_str(""),
            VariableValue::Values(values) => values.serialize(serializer),
        }
    }
}

/// Normalized variable as sent to the service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Variable {
    pub property: String,
    pub description: String,
    pub alias: String,
    pub value: VariableValue,
    pub required: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preferred_suggestions: Option<Vec<String>>,
    pub restricted: bool,
    pub apply_if_exists: bool,
    pub replace_only: bool,
}

// ---------------------------------------------------------------------------
// Normalizers
// ---------------------------------------------------------------------------

/// Map a filter definition onto its wire form. `values` is always a list,
/// even when empty.
pub fn normalize_filter(filter: &FilterDefinition) -> SourceFilter {
    SourceFilter {
        property: filter.property.clone(),
        not: filter.negated,
        value: filter.values.clone(),
        apply_if_exists: filter.apply_if_exist,
    }
}

pub fn normalize_filters(filters: &[FilterDefinition]) -> Vec<SourceFilter> {
    filters.iter().map(normalize_filter).collect()
}

/// Map a variable definition onto its wire form.
pub fn normalize_variable(variable: &VariableDefinition) -> Variable {
    let value = if variable.values.is_empty() {
        VariableValue::Unset
    } else {
        VariableValue::Values(variable.values.clone())
    };

    let preferred_suggestions =
        (!variable.values_suggested.is_empty()).then(|| variable.values_suggested.clone());

    Variable {
        property: variable.property.clone(),
        description: variable.description.clone(),
        alias: variable.alias.clone(),
        value,
        required: variable.value_required,
        preferred_suggestions,
        restricted: variable.restricted_suggestions,
        apply_if_exists: variable.apply_if_exist,
        replace_only: variable.replace_only,
    }
}

pub fn normalize_variables(variables: &[VariableDefinition]) -> Vec<Variable> {
    variables.iter().map(normalize_variable).collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn variable(values: &[&str], suggested: &[&str]) -> VariableDefinition {
        VariableDefinition {
            property: "region".into(),
            alias: "Region".into(),
            description: "Deployment region".into(),
            values: values.iter().map(|v| v.to_string()).collect(),
            value_required: true,
            values_suggested: suggested.iter().map(|v| v.to_string()).collect(),
            restricted_suggestions: false,
            replace_only: true,
            apply_if_exist: false,
        }
    }

    // -- Filters ------------------------------------------------------------

    #[test]
    fn filter_uses_wire_names() {
        let filter = FilterDefinition {
            property: "env".into(),
            negated: true,
            values: vec!["prod".into(), "stage".into()],
            apply_if_exist: true,
        };
        let value = serde_json::to_value(normalize_filter(&filter)).unwrap();
        assert_eq!(
            value,
            json!({
                "property": "env",
                "NOT": true,
                "value": ["prod", "stage"],
                "applyIfExists": true,
            })
        );
    }

    #[test]
    fn filter_with_no_values_emits_empty_list() {
        let filter = FilterDefinition {
            property: "env".into(),
            negated: false,
            values: vec![],
            apply_if_exist: false,
        };
        let value = serde_json::to_value(normalize_filter(&filter)).unwrap();
        assert_eq!(value["value"], json!([]));
    }

    #[test]
    fn filter_values_are_required_in_configuration() {
        let result: Result<FilterDefinition, _> =
            serde_json::from_str(r#"{"property":"env"}"#);
        assert!(result.is_err());
    }

    // -- Variables ----------------------------------------------------------

    #[test]
    fn variable_without_values_is_empty_string() {
        let value = serde_json::to_value(normalize_variable(&variable(&[], &[]))).unwrap();
        assert_eq!(value["value"], json!(""));
    }

    #[test]
    fn variable_with_values_is_list() {
        let value =
            serde_json::to_value(normalize_variable(&variable(&["us-east-1"], &[]))).unwrap();
        assert_eq!(value["value"], json!(["us-east-1"]));
    }

    #[test]
    fn variable_suggestions_omitted_when_empty() {
        let value = serde_json::to_value(normalize_variable(&variable(&[], &[]))).unwrap();
        assert!(value.get("preferredSuggestions").is_none());
    }

    #[test]
    fn variable_suggestions_present_when_given() {
        let value =
            serde_json::to_value(normalize_variable(&variable(&[], &["a", "b"]))).unwrap();
        assert_eq!(value["preferredSuggestions"], json!(["a", "b"]));
    }

    #[test]
    fn variable_key_order_is_stable() {
        let json =
            serde_json::to_string(&normalize_variable(&variable(&["x"], &["y"]))).unwrap();
        assert_eq!(
            json,
            concat!(
                r#"{"property":"region","description":"Deployment region","alias":"Region","#,
                r#""value":["x"],"required":true,"preferredSuggestions":["y"],"#,
                r#""restricted":false,"applyIfExists":false,"replaceOnly":true}"#
            )
        );
    }

    #[test]
    fn variable_defaults_from_configuration() {
        let parsed: VariableDefinition =
            serde_json::from_str(r#"{"property":"host","alias":"Host"}"#).unwrap();
        assert_eq!(parsed.description, "");
        assert!(parsed.values.is_empty());
        assert!(!parsed.value_required);
        assert!(!parsed.replace_only);
    }
}

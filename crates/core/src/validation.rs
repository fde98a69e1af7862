//! Configuration acceptance checks.
//!
//! The enumerated-field validators are pure functions returning a list of
//! human-readable messages; an empty list means the value is accepted.
//! [`validate_dashboard`] and [`validate_integration`] combine them with the
//! range and presence rules declared on the configuration types.
//!
//! Payload builders never call into this module. Documents are checked once
//! on acceptance and trusted afterwards.

use validator::{Validate, ValidationErrors, ValidationErrorsKind};

use crate::dashboard::{DashboardConfig, VALID_CHART_RESOLUTIONS};
use crate::error::{CoreError, CoreResult};
use crate::integration::{IntegrationConfig, VALID_INTEGRATION_TYPES};
use crate::overlay::VALID_OVERLAY_TYPES;
use crate::palette::PALETTE_COLORS;
use crate::time_window::is_valid_relative_time;

// ---------------------------------------------------------------------------
// Enumerated fields
// ---------------------------------------------------------------------------

fn validate_allowed(value: &str, allowed: &[&str]) -> Vec<String> {
    if allowed.contains(&value) {
        Vec::new()
    } else {
        vec![format!(
            "{value} not allowed; must be one of: {}",
            allowed.join(", ")
        )]
    }
}

/// Validate a chart resolution (`default`, `low`, `high`, `highest`).
pub fn validate_chart_resolution(value: &str) -> Vec<String> {
    validate_allowed(value, VALID_CHART_RESOLUTIONS)
}

/// Validate an event overlay type (`eventTimeSeries`, `detectorEvents`).
pub fn validate_overlay_type(value: &str) -> Vec<String> {
    validate_allowed(value, VALID_OVERLAY_TYPES)
}

/// Validate an integration type (`PagerDuty`, `Slack`).
pub fn validate_integration_type(value: &str) -> Vec<String> {
    validate_allowed(value, VALID_INTEGRATION_TYPES)
}

/// Validate an overlay colour against the palette names.
pub fn validate_overlay_color(value: &str) -> Vec<String> {
    let names: Vec<&str> = PALETTE_COLORS.iter().map(|(name, _)| *name).collect();
    validate_allowed(value, &names)
}

/// Validate relative time syntax such as `-15m`, `-1h`, `-7d` or `-2w`.
pub fn validate_time_range(value: &str) -> Vec<String> {
    if is_valid_relative_time(value) {
        Vec::new()
    } else {
        vec![format!(
            "{value} not allowed; time_range must look like -<count><m|h|d|w>"
        )]
    }
}

// ---------------------------------------------------------------------------
// Declared rules
// ---------------------------------------------------------------------------

/// Flatten nested `validator` errors into `path: message` strings, sorted so
/// the output does not depend on map iteration order.
fn flatten_errors(errors: &ValidationErrors) -> Vec<String> {
    let mut messages = Vec::new();
    collect_errors(errors, "", &mut messages);
    messages.sort();
    messages
}

fn collect_errors(errors: &ValidationErrors, prefix: &str, out: &mut Vec<String>) {
    for (field, kind) in errors.errors() {
        let path = if prefix.is_empty() {
            field.to_string()
        } else {
            format!("{prefix}.{field}")
        };
        match kind {
            ValidationErrorsKind::Field(field_errors) => {
                for error in field_errors {
                    let message = error
                        .message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| error.code.to_string());
                    out.push(format!("{path}: {message}"));
                }
            }
            ValidationErrorsKind::Struct(nested) => collect_errors(nested, &path, out),
            ValidationErrorsKind::List(items) => {
                for (index, nested) in items {
                    collect_errors(nested, &format!("{path}[{index}]"), out);
                }
            }
        }
    }
}

fn declared_rules<T: Validate>(config: &T) -> Vec<String> {
    match config.validate() {
        Ok(()) => Vec::new(),
        Err(errors) => flatten_errors(&errors),
    }
}

// ---------------------------------------------------------------------------
// Documents
// ---------------------------------------------------------------------------

/// Collect every acceptance error for a dashboard document.
pub fn validate_dashboard(config: &DashboardConfig) -> Vec<String> {
    let mut messages = declared_rules(config);

    if let Some(resolution) = &config.charts_resolution {
        messages.extend(validate_chart_resolution(resolution));
    }

    for overlay in config
        .event_overlay
        .iter()
        .chain(&config.selected_event_overlay)
    {
        messages.extend(validate_overlay_type(&overlay.overlay_type));
        if let Some(color) = &overlay.color {
            messages.extend(validate_overlay_color(color));
        }
    }

    if let Some(range) = &config.time_range {
        messages.extend(validate_time_range(range));
    }

    if config.time_spec().has_conflict() {
        messages.push(
            "time_range conflicts with start_time and end_time; set one or the other".to_string(),
        );
    }

    messages
}

/// Collect every acceptance error for an integration document.
pub fn validate_integration(config: &IntegrationConfig) -> Vec<String> {
    let mut messages = declared_rules(config);
    messages.extend(validate_integration_type(&config.integration_type));
    if config.api_key.is_some() && config.webhook_url.is_some() {
        messages.push("api_key conflicts with webhook_url; set one or the other".to_string());
    }
    messages
}

/// Turn a list of acceptance messages into a result.
pub fn ensure_accepted(messages: Vec<String>) -> CoreResult<()> {
    if messages.is_empty() {
        Ok(())
    } else {
        Err(CoreError::Validation(messages))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use serde_json::json;

    use super::*;

    fn dashboard(value: serde_json::Value) -> DashboardConfig {
        serde_json::from_value(value).unwrap()
    }

    // -- Enumerated fields --------------------------------------------------

    #[test]
    fn chart_resolution_accepts_members() {
        for value in ["default", "low", "high", "highest"] {
            assert!(validate_chart_resolution(value).is_empty(), "{value}");
        }
    }

    #[test]
    fn chart_resolution_rejects_with_allowed_set() {
        let errors = validate_chart_resolution("ultra");
        assert_eq!(
            errors,
            vec!["ultra not allowed; must be one of: default, low, high, highest".to_string()]
        );
    }

    #[test]
    fn overlay_type_validation() {
        assert!(validate_overlay_type("eventTimeSeries").is_empty());
        assert!(validate_overlay_type("detectorEvents").is_empty());
        assert_eq!(validate_overlay_type("alerts").len(), 1);
    }

    #[test]
    fn integration_type_is_case_sensitive() {
        assert!(validate_integration_type("PagerDuty").is_empty());
        assert!(validate_integration_type("Slack").is_empty());
        let errors = validate_integration_type("slack");
        assert_eq!(
            errors,
            vec!["slack not allowed; must be one of: PagerDuty, Slack".to_string()]
        );
    }

    // -- Documents ----------------------------------------------------------

    #[test]
    fn valid_dashboard_has_no_messages() {
        let config = dashboard(json!({
            "name": "Checkout",
            "dashboard_group": "GRP1",
            "charts_resolution": "high",
            "time_range": "-1h",
            "grid": [{ "chart_ids": ["a"], "start_column": 6, "width": 6 }],
        }));
        assert!(validate_dashboard(&config).is_empty());
    }

    #[test]
    fn nested_range_errors_carry_paths() {
        let config = dashboard(json!({
            "name": "Checkout",
            "dashboard_group": "GRP1",
            "chart": [{ "chart_id": "a", "row": 0, "column": 12 }],
            "grid": [{ "chart_ids": ["b"], "width": 13 }],
        }));
        let messages = validate_dashboard(&config);
        assert_eq!(
            messages,
            vec![
                "chart[0].column: must be between 0 and 11".to_string(),
                "grid[0].width: must be between 1 and 12".to_string(),
            ]
        );
    }

    #[test]
    fn time_range_conflict_is_reported() {
        let config = dashboard(json!({
            "name": "Checkout",
            "dashboard_group": "GRP1",
            "time_range": "-1h",
            "start_time": 100,
        }));
        let messages = validate_dashboard(&config);
        assert_eq!(messages.len(), 1);
        assert!(messages[0].starts_with("time_range conflicts"));
    }

    #[test]
    fn overlay_types_checked_in_both_collections() {
        let config = dashboard(json!({
            "name": "Checkout",
            "dashboard_group": "GRP1",
            "charts_resolution": "medium",
            "event_overlay": [{ "signal": "a", "type": "bogus" }],
            "selected_event_overlay": [{ "signal": "b", "type": "other" }],
        }));
        let messages = validate_dashboard(&config);
        assert_eq!(messages.len(), 3);
        assert!(messages[0].starts_with("medium not allowed"));
        assert!(messages[1].starts_with("bogus not allowed"));
        assert!(messages[2].starts_with("other not allowed"));
    }

    #[test]
    fn integration_rules_combine() {
        let config: IntegrationConfig =
            serde_json::from_value(json!({ "name": "", "enabled": true, "type": "Email" }))
                .unwrap();
        let messages = validate_integration(&config);
        assert_eq!(
            messages,
            vec![
                "name: must not be empty".to_string(),
                "Email not allowed; must be one of: PagerDuty, Slack".to_string(),
            ]
        );
    }

    #[test]
    fn both_secrets_are_rejected() {
        let config: IntegrationConfig = serde_json::from_value(json!({
            "name": "pager",
            "enabled": true,
            "type": "PagerDuty",
            "api_key": "k",
            "webhook_url": "https://hooks.example.com/x",
        }))
        .unwrap();
        assert_eq!(
            validate_integration(&config),
            vec!["api_key conflicts with webhook_url; set one or the other".to_string()]
        );
    }

    #[test]
    fn single_secret_is_accepted() {
        let config: IntegrationConfig = serde_json::from_value(json!({
            "name": "alerts",
            "enabled": false,
            "type": "Slack",
            "webhook_url": "https://hooks.example.com/x",
        }))
        .unwrap();
        assert!(validate_integration(&config).is_empty());
    }

    #[test]
    fn unknown_overlay_colour_is_rejected() {
        let config = dashboard(json!({
            "name": "Checkout",
            "dashboard_group": "GRP1",
            "event_overlay": [{ "signal": "a", "color": "ochre" }],
            "selected_event_overlay": [{ "signal": "b", "color": "Blue" }, { "signal": "c", "color": "lilac" }],
        }));
        let messages = validate_dashboard(&config);
        assert_eq!(messages.len(), 2);
        assert!(messages[0].starts_with("ochre not allowed; must be one of: gray, blue,"));
        assert!(messages[1].starts_with("Blue not allowed"));
    }

    #[test]
    fn malformed_time_range_is_rejected() {
        for range in ["-1h", "-15m", "-7d", "-2w"] {
            let config = dashboard(json!({
                "name": "Checkout",
                "dashboard_group": "GRP1",
                "time_range": range,
            }));
            assert!(validate_dashboard(&config).is_empty(), "{range}");
        }

        let config = dashboard(json!({
            "name": "Checkout",
            "dashboard_group": "GRP1",
            "time_range": "last hour",
        }));
        assert_eq!(
            validate_dashboard(&config),
            vec!["last hour not allowed; time_range must look like -<count><m|h|d|w>".to_string()]
        );
    }

    #[test]
    fn epoch_seconds_beyond_millisecond_range_are_rejected() {
        let config = dashboard(json!({
            "name": "Checkout",
            "dashboard_group": "GRP1",
            "start_time": 10_000_000_000_000_000_i64,
            "end_time": -10_000_000_000_000_000_i64,
        }));
        assert_eq!(
            validate_dashboard(&config),
            vec![
                "end_time: must fit in epoch milliseconds".to_string(),
                "start_time: must fit in epoch milliseconds".to_string(),
            ]
        );
    }

    #[test]
    fn oversized_layout_values_are_rejected() {
        let config = dashboard(json!({
            "name": "Checkout",
            "dashboard_group": "GRP1",
            "column": [{ "chart_ids": ["a", "b"], "height": 3_000_000_000_u32 }],
            "grid": [{ "chart_ids": ["c"], "start_row": 2_000_000 }],
        }));
        assert_eq!(
            validate_dashboard(&config),
            vec![
                "column[0].height: must be between 1 and 1000".to_string(),
                "grid[0].start_row: must be between 0 and 1000000".to_string(),
            ]
        );
    }

    #[test]
    fn ensure_accepted_wraps_messages() {
        assert!(ensure_accepted(Vec::new()).is_ok());
        let result = ensure_accepted(vec!["bad".to_string()]);
        assert_matches!(result, Err(CoreError::Validation(messages)) if messages == vec!["bad".to_string()]);
    }
}

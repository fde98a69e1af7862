//! Payload synthesis for declaratively managed monitoring dashboards and
//! alerting integrations.
//!
//! The crate is pure: it turns an already-parsed configuration into the
//! request body the monitoring service expects. Transport, retries and
//! state bookkeeping live with the caller.

pub mod dashboard;
pub mod encode;
pub mod error;
pub mod filters;
pub mod integration;
pub mod layout;
pub mod overlay;
pub mod palette;
pub mod time_window;
pub mod types;
pub mod validation;

pub use dashboard::{build_dashboard_payload, DashboardConfig, DashboardPayload};
pub use error::{CoreError, CoreResult, PayloadOperation};
pub use integration::{build_integration_payload, IntegrationConfig, IntegrationPayload};

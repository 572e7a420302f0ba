//! HTTP request handlers for the webhook receiver.
//!
//! Handlers follow a consistent pattern:
//! - Signature verification before any payload inspection
//! - Tracing for observability
//! - Standardized JSON error responses
//!
//! # Handler Organization
//!
//! - `webhook` - Webhook verification and event dispatch
//! - `health` - Health check and liveness probes

pub mod health;
pub mod webhook;

pub use health::{health_check, liveness_check};
pub use webhook::receive_webhook;

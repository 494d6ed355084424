//! Alert delivery
//!
//! One alert per classified change. Delivery is best-effort: a failed send is
//! reported to the caller and never aborts the cycle or holds back the baseline.

mod webhook;

use crate::config::NotifyConfig;
use crate::error::NotifyError;

pub use webhook::{WebhookNotifier, WebhookSettings};

/// Outcome of a send that did not fail
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delivery {
    Sent,
    /// No transport configured; nothing was attempted
    Skipped,
}

/// Notifier interface
pub trait Notifier: Send + Sync {
    fn send(&self, subject: &str, body: &str) -> Result<Delivery, NotifyError>;

    /// Short description for logs (never includes credentials)
    fn describe(&self) -> String;
}

/// Notifier used when no credentials are configured
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopNotifier;

impl Notifier for NoopNotifier {
    fn send(&self, subject: &str, _body: &str) -> Result<Delivery, NotifyError> {
        tracing::debug!(subject, "Alert credentials not set, skipping send");
        Ok(Delivery::Skipped)
    }

    fn describe(&self) -> String {
        "disabled (no credentials)".to_string()
    }
}

/// Build the notifier described by `config`.
///
/// Missing endpoint or credentials degrade to `NoopNotifier`; they never block
/// monitoring. Only a relay that is configured but cannot be constructed is an error.
pub fn build_notifier(config: &NotifyConfig) -> Result<Box<dyn Notifier>, NotifyError> {
    match WebhookSettings::from_config(config) {
        Some(settings) => {
            let notifier = WebhookNotifier::new(settings)?;
            tracing::info!(relay = %notifier.describe(), "Alert delivery enabled");
            Ok(Box::new(notifier))
        }
        None => {
            tracing::warn!("Alert credentials not set, alerts will be skipped");
            Ok(Box::new(NoopNotifier))
        }
    }
}

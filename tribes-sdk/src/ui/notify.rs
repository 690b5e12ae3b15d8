use std::fmt;
use std::sync::{Mutex, PoisonError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertLevel {
    Info,
    Warning,
    Error,
}

impl fmt::Display for AlertLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Info => "info",
            Self::Warning => "warning",
            Self::Error => "error",
        })
    }
}

/// Shows short messages to the user (a toast on the page, a line on a terminal).
pub trait Notifier {
    fn alert(&self, message: &str, level: AlertLevel);
}

/// Reports alerts through `tracing`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn alert(&self, message: &str, level: AlertLevel) {
        match level {
            AlertLevel::Info => tracing::info!(target: "tribes::alert", "{message}"),
            AlertLevel::Warning => tracing::warn!(target: "tribes::alert", "{message}"),
            AlertLevel::Error => tracing::error!(target: "tribes::alert", "{message}"),
        }
    }
}

/// Keeps every alert in memory.
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    alerts: Mutex<Vec<(String, AlertLevel)>>,
}

impl RecordingNotifier {
    pub fn alerts(&self) -> Vec<(String, AlertLevel)> {
        self.alerts.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }
}

impl Notifier for RecordingNotifier {
    fn alert(&self, message: &str, level: AlertLevel) {
        self.alerts.lock().unwrap_or_else(PoisonError::into_inner).push((message.into(), level));
    }
}

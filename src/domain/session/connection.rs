//! Result of the last connectivity probe.

use serde::{Deserialize, Serialize};

/// Outcome of a credential/connectivity check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ConnectionStatus {
    Connected,
    Failed { reason: String },
}

impl ConnectionStatus {
    pub fn is_connected(&self) -> bool {
        matches!(self, ConnectionStatus::Connected)
    }

    /// Operator-facing status line.
    pub fn label(&self) -> &str {
        match self {
            ConnectionStatus::Connected => "Подключено",
            ConnectionStatus::Failed { reason } => reason,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn failed_label_is_the_reason() {
        let status = ConnectionStatus::Failed {
            reason: "Неверный API ключ".to_string(),
        };
        assert!(!status.is_connected());
        assert_eq!(status.label(), "Неверный API ключ");
        assert_eq!(ConnectionStatus::Connected.label(), "Подключено");
    }

    #[test]
    fn serializes_with_status_tag() {
        let json = serde_json::to_string(&ConnectionStatus::Connected).unwrap();
        assert_eq!(json, r#"{"status":"connected"}"#);
    }
}

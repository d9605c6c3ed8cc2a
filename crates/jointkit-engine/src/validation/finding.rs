//! Validation findings

use serde::{Deserialize, Serialize};
use std::fmt;

/// Finding severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Blocks export at the consumer
    Error,
    /// Advisory
    Warn,
    Info,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warn => write!(f, "warn"),
            Severity::Info => write!(f, "info"),
        }
    }
}

/// One problem or note about a generated design
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationFinding {
    pub severity: Severity,
    /// Stable code such as `FIT_KERF_GE_THICKNESS`
    pub code: String,
    pub message: String,
    /// Suggested change, when there is an obvious one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fix: Option<String>,
}

impl ValidationFinding {
    pub fn new(severity: Severity, code: &str, message: impl Into<String>) -> Self {
        Self {
            severity,
            code: code.to_string(),
            message: message.into(),
            fix: None,
        }
    }

    pub fn error(code: &str, message: impl Into<String>) -> Self {
        Self::new(Severity::Error, code, message)
    }

    pub fn warn(code: &str, message: impl Into<String>) -> Self {
        Self::new(Severity::Warn, code, message)
    }

    pub fn info(code: &str, message: impl Into<String>) -> Self {
        Self::new(Severity::Info, code, message)
    }

    pub fn with_fix(mut self, fix: impl Into<String>) -> Self {
        self.fix = Some(fix.into());
        self
    }

    pub fn is_blocking(&self) -> bool {
        self.severity == Severity::Error
    }
}

impl fmt::Display for ValidationFinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [{}]: {}", self.severity, self.code, self.message)?;
        if let Some(fix) = &self.fix {
            write!(f, " ({})", fix)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_with_fix() {
        let finding = ValidationFinding::warn("FIT_PITCH_SMALL", "Finger pitch 4.2mm").with_fix("Raise finger_width");
        assert_eq!(
            finding.to_string(),
            "warn [FIT_PITCH_SMALL]: Finger pitch 4.2mm (Raise finger_width)"
        );
        assert!(!finding.is_blocking());
    }

    #[test]
    fn test_serializes_lowercase_severity() {
        let finding = ValidationFinding::error("STRUCT_MISSING_PART", "WHEEL missing");
        let json = serde_json::to_value(&finding).unwrap();
        assert_eq!(json["severity"], "error");
        assert!(json.get("fix").is_none());
    }
}

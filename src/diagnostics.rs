// ABOUTME: Diagnostics accumulator for non-fatal warnings during lifecycle commands.
// ABOUTME: Collects warnings that shouldn't fail a command but should be shown to users.

use crate::deploy::UnrecognizedStatus;

/// Collects non-fatal warnings during lifecycle commands.
#[derive(Default)]
pub struct Diagnostics {
    warnings: Vec<Warning>,
}

impl Diagnostics {
    /// Record a warning, auto-logging it via tracing.
    pub fn warn(&mut self, warning: Warning) {
        tracing::warn!("{}", warning.message);
        self.warnings.push(warning);
    }

    /// Get all collected warnings.
    pub fn warnings(&self) -> &[Warning] {
        &self.warnings
    }

    /// Check if any warnings were collected.
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }
}

/// A non-fatal warning collected during a command.
#[derive(Debug, Clone)]
pub struct Warning {
    pub kind: WarningKind,
    pub message: String,
}

impl Warning {
    /// A deployment skipped because its status could not be classified.
    pub fn unrecognized_status(err: &UnrecognizedStatus) -> Self {
        Self {
            kind: WarningKind::UnrecognizedStatus,
            message: format!("skipped: {err}"),
        }
    }

    /// A deployment whose metadata is malformed in a way that does not block the command.
    pub fn malformed_record(message: impl Into<String>) -> Self {
        Self {
            kind: WarningKind::MalformedRecord,
            message: message.into(),
        }
    }
}

/// Categories of warnings that can occur during a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WarningKind {
    /// Deployment carried a missing or unknown status token.
    UnrecognizedStatus,
    /// Deployment carried malformed metadata other than its status.
    MalformedRecord,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn diagnostics_starts_empty() {
        let diag = Diagnostics::default();
        assert!(!diag.has_warnings());
        assert!(diag.warnings().is_empty());
    }

    #[test]
    fn diagnostics_collects_warnings() {
        let mut diag = Diagnostics::default();

        diag.warn(Warning::unrecognized_status(&UnrecognizedStatus {
            deployment: "web-3".to_string(),
            value: Some("Paused".to_string()),
        }));
        diag.warn(Warning::malformed_record("web-2 has no version"));

        assert!(diag.has_warnings());
        assert_eq!(diag.warnings().len(), 2);
        assert!(diag.warnings()[0].message.contains("web-3"));
    }

    #[test]
    fn warning_constructors_set_correct_kind() {
        let status_warning = Warning::unrecognized_status(&UnrecognizedStatus {
            deployment: "web-1".to_string(),
            value: None,
        });
        assert_eq!(status_warning.kind, WarningKind::UnrecognizedStatus);

        let record_warning = Warning::malformed_record("test");
        assert_eq!(record_warning.kind, WarningKind::MalformedRecord);
    }
}

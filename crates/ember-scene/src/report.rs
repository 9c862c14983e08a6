//! Diagnostics collected while loading a scene

use crate::token::Position;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
}

/// A single problem found in scene text
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub severity: Severity,
    pub message: String,
    pub line: usize,
    pub column: usize,
}

impl Diagnostic {
    pub fn new(severity: Severity, message: impl Into<String>, position: Position) -> Self {
        Self {
            severity,
            message: message.into(),
            line: position.line,
            column: position.column,
        }
    }
}

/// Outcome of loading one scene
#[derive(Debug, Clone, Default, Serialize)]
pub struct LoadReport {
    pub scene: String,
    pub object_count: usize,
    pub diagnostics: Vec<Diagnostic>,
}

impl LoadReport {
    pub fn new(scene: impl Into<String>) -> Self {
        Self {
            scene: scene.into(),
            ..Self::default()
        }
    }

    /// Record and log a recoverable problem
    pub fn warn(&mut self, position: Position, message: impl Into<String>) {
        let message = message.into();
        log::warn!(
            "Warning while reading scene file \"{}.txt\": {} [{}]",
            self.scene,
            message,
            position
        );
        self.diagnostics
            .push(Diagnostic::new(Severity::Warning, message, position));
    }

    pub(crate) fn push(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }

    /// True if the scene loaded without a fatal error
    pub fn is_loaded(&self) -> bool {
        self.error_count() == 0
    }

    pub fn error_count(&self) -> usize {
        self.diagnostics
            .iter()
            .filter(|d| d.severity == Severity::Error)
            .count()
    }

    pub fn warning_count(&self) -> usize {
        self.diagnostics
            .iter()
            .filter(|d| d.severity == Severity::Warning)
            .count()
    }

    /// Get a human-readable summary
    pub fn summary(&self) -> String {
        if self.diagnostics.is_empty() {
            return format!(
                "Scene \"{}\": {} object(s), no problems found.",
                self.scene, self.object_count
            );
        }

        format!(
            "Scene \"{}\": {} object(s), {} error(s), {} warning(s)",
            self.scene,
            self.object_count,
            self.error_count(),
            self.warning_count(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counts_and_summary() {
        let mut report = LoadReport::new("Level");
        assert!(report.is_loaded());
        assert!(report.summary().contains("no problems"));

        report.warn(Position::START, "Unknown object label \"colour\"; skipping");
        report.push(Diagnostic::new(Severity::Error, "boom", Position::START));
        report.object_count = 2;

        assert_eq!(report.warning_count(), 1);
        assert_eq!(report.error_count(), 1);
        assert!(!report.is_loaded());
        assert_eq!(
            report.summary(),
            "Scene \"Level\": 2 object(s), 1 error(s), 1 warning(s)"
        );
    }
}

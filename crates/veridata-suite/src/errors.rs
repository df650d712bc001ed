use thiserror::Error;

/// Severity level for suite validation issues.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IssueSeverity {
    Error,
    Warning,
}

/// Structured validation issue with location and hint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationIssue {
    pub severity: IssueSeverity,
    pub code: String,
    pub path: String,
    pub message: String,
    pub hint: Option<String>,
}

impl ValidationIssue {
    /// Create an error-level issue.
    pub fn error(code: impl Into<String>, path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            severity: IssueSeverity::Error,
            code: code.into(),
            path: path.into(),
            message: message.into(),
            hint: None,
        }
    }

    /// Create a warning-level issue.
    pub fn warning(
        code: impl Into<String>,
        path: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            severity: IssueSeverity::Warning,
            code: code.into(),
            path: path.into(),
            message: message.into(),
            hint: None,
        }
    }

    /// Attach a remediation hint.
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}

/// Aggregated suite validation outcome with errors and warnings.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ValidationReport {
    pub errors: Vec<ValidationIssue>,
    pub warnings: Vec<ValidationIssue>,
}

impl ValidationReport {
    /// Returns true when there are no errors.
    pub fn is_ok(&self) -> bool {
        self.errors.is_empty()
    }

    /// Add an issue under its severity bucket.
    pub fn push(&mut self, issue: ValidationIssue) {
        match issue.severity {
            IssueSeverity::Error => self.errors.push(issue),
            IssueSeverity::Warning => self.warnings.push(issue),
        }
    }

    /// Fold another report's issues into this one, keeping severity
    /// buckets and relative order.
    pub fn merge(&mut self, other: ValidationReport) {
        self.errors.extend(other.errors);
        self.warnings.extend(other.warnings);
    }
}

/// Suite handling errors that are not per-expectation issues.
#[derive(Debug, Error)]
pub enum SuiteError {
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("schema error: {0}")]
    Schema(String),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for suite validation operations.
pub type Result<T> = std::result::Result<T, SuiteError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn merge_keeps_severity_buckets_and_order() {
        let mut first = ValidationReport::default();
        first.push(ValidationIssue::error("a", "/", "first error"));
        first.push(ValidationIssue::warning("b", "/", "first warning"));

        let mut second = ValidationReport::default();
        second.push(ValidationIssue::warning("c", "/", "second warning"));
        second.push(ValidationIssue::error("d", "/", "second error"));

        first.merge(second);
        let errors: Vec<&str> = first.errors.iter().map(|i| i.code.as_str()).collect();
        let warnings: Vec<&str> = first.warnings.iter().map(|i| i.code.as_str()).collect();
        assert_eq!(errors, vec!["a", "d"]);
        assert_eq!(warnings, vec!["b", "c"]);
        assert!(!first.is_ok());
    }
}

//! # Template Error Types

use thiserror::Error;

/// Errors from loading or rendering script templates.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TemplateError {
    /// The class name to render was empty.
    #[error("class name is empty")]
    EmptyClassName,

    /// A substituted name is not a valid identifier.
    #[error("`{name}` is not a valid {role} identifier")]
    InvalidIdentifier {
        /// The rejected name.
        name: String,
        /// Which placeholder it was meant for.
        role: &'static str,
    },

    /// A `// meta-` header line could not be understood.
    #[error("line {line}: {reason}")]
    MalformedHeader {
        /// One-based line number.
        line: usize,
        /// What was wrong with it.
        reason: String,
    },

    /// No built-in template has this key.
    #[error("no template named `{key}`")]
    UnknownTemplate {
        /// The `Base/name` key that was looked up.
        key: String,
    },

    /// Movement tunables could not be loaded.
    #[error("invalid movement settings: {0}")]
    InvalidMovement(String),
}

/// Result type for template operations.
pub type TemplateResult<T> = Result<T, TemplateError>;

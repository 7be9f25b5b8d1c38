//! Template error types

use thiserror::Error;

/// Errors raised while compiling a template
///
/// Every variant is raised by `Template::compile`, never deferred to expansion.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CompileError {
    /// Invalid metacharacters, format character, or header option
    #[error("CONFIGURATION_ERROR: {0}")]
    Configuration(String),

    /// Unbalanced or malformed section directives
    #[error("TEMPLATE_SYNTAX_ERROR: line {line}: {message}")]
    Syntax {
        /// Error message
        message: String,
        /// Line number where the error occurred
        line: usize,
    },

    /// Formatter name resolved to nothing
    #[error("BAD_FORMATTER: line {line}: '{name}' is not a valid formatter")]
    BadFormatter {
        /// The formatter name as written in the template
        name: String,
        /// Line number where the error occurred
        line: usize,
    },

    /// Substitution without formatter while the default formatter is disabled
    #[error(
        "MISSING_FORMATTER: line {line}: '{name}' has no formatter and the default formatter is disabled"
    )]
    MissingFormatter {
        /// The substituted name
        name: String,
        /// Line number where the error occurred
        line: usize,
    },
}

impl CompileError {
    pub(crate) fn syntax(message: impl Into<String>, line: usize) -> Self {
        CompileError::Syntax {
            message: message.into(),
            line,
        }
    }
}

/// Errors raised while expanding a compiled template against data
#[derive(Error, Debug)]
pub enum EvalError {
    /// Name not found (or null) anywhere in the scope chain
    #[error("UNDEFINED_VARIABLE: '{name}' is not defined")]
    UndefinedVariable {
        /// The name that failed to resolve
        name: String,
    },

    /// `{.repeated section @}` where the cursor is not a list
    #[error("UNDEFINED_VARIABLE: expected the cursor to be a list, got {found}")]
    CursorNotList {
        /// Type name of the cursor value
        found: &'static str,
    },

    /// Repeated section over a truthy value that is not a list
    #[error("EVALUATION_ERROR: repeated section '{name}' expected a list, got {found}")]
    NotAList {
        /// Section name
        name: String,
        /// Type name of the resolved value
        found: &'static str,
    },

    /// A formatter in the chain failed
    #[error("EVALUATION_ERROR: formatting value {value} with formatter '{formatter}' failed: {source}")]
    Formatter {
        /// Formatter name as written in the template
        formatter: String,
        /// Short rendering of the input value
        value: String,
        /// The underlying failure
        #[source]
        source: FormatterError,
    },

    /// The formatter chain produced null
    #[error("EVALUATION_ERROR: evaluating '{name}' gave a null value")]
    NullValue {
        /// The substituted name
        name: String,
    },

    /// Nested template expansion went too deep
    #[error("EVALUATION_ERROR: template recursion exceeded the limit of {limit}")]
    RecursionLimit {
        /// Configured maximum depth
        limit: usize,
    },
}

impl EvalError {
    /// True for lookup failures, including cursor misuse
    pub fn is_undefined_variable(&self) -> bool {
        matches!(
            self,
            EvalError::UndefinedVariable { .. } | EvalError::CursorNotList { .. }
        )
    }

    pub(crate) fn undefined(name: impl Into<String>) -> Self {
        EvalError::UndefinedVariable { name: name.into() }
    }
}

/// Failure raised by a single formatter
#[derive(Error, Debug)]
pub enum FormatterError {
    /// Value has the wrong shape for this formatter
    #[error("expected {expected}, got {found}")]
    TypeMismatch {
        /// Accepted value kind(s)
        expected: &'static str,
        /// Actual value kind
        found: &'static str,
    },

    /// printf conversion could not be applied to the value
    #[error("cannot apply '{format}': {reason}")]
    Printf {
        /// The format string
        format: String,
        /// Why the conversion failed
        reason: String,
    },

    /// Context formatter used where its context is missing
    #[error("{0}")]
    Context(String),

    /// Nested expansion or lookup failed
    #[error(transparent)]
    Eval(Box<EvalError>),

    /// JSON encoding failure
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    /// Failure raised by a caller-supplied formatter
    #[error("{0}")]
    Custom(String),
}

impl From<EvalError> for FormatterError {
    fn from(err: EvalError) -> Self {
        FormatterError::Eval(Box::new(err))
    }
}

use thiserror::Error;

/// Errors that can occur across the export pipeline.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SaftError {
    /// Malformed or missing request input (bad date, start after end, empty field).
    /// Nothing is persisted when this is returned.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Unknown record id or missing stored file.
    #[error("not found: {0}")]
    NotFound(String),

    /// Operation attempted on a record in the wrong status.
    #[error("precondition failed: {0}")]
    PreconditionFailed(String),

    /// Failure during build, serialization, file write, or persistence.
    #[error("generation error: {0}")]
    Generation(String),

    /// Stored artifact payload is not validly compressed/encoded.
    #[error("decode error: {0}")]
    Decode(String),

    /// XML serialization or parsing error.
    #[error("XML error: {0}")]
    Xml(String),

    /// Record store or file store collaborator failure.
    #[error("store error: {0}")]
    Store(String),
}

/// A single schema validation diagnostic with its source line.
///
/// Line numbers are 1-based; a synthetic diagnostic with no source location
/// (e.g. a decode failure) carries line 0.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaDiagnostic {
    /// Line in the decoded XML text where the problem was detected.
    pub line: u64,
    /// Human-readable error description.
    pub message: String,
}

impl std::fmt::Display for SchemaDiagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Line {}: {}", self.line, self.message)
    }
}

impl SchemaDiagnostic {
    pub fn new(line: u64, message: impl Into<String>) -> Self {
        Self {
            line,
            message: message.into(),
        }
    }

    /// Join diagnostics into the single semicolon-separated string persisted
    /// on the export record.
    pub fn join(diagnostics: &[SchemaDiagnostic]) -> String {
        diagnostics
            .iter()
            .map(|d| d.to_string())
            .collect::<Vec<_>>()
            .join("; ")
    }
}

use thiserror::Error;

/// Unified error type for the entire portfolio-core library.
/// Every public function returns `Result<T, CoreError>`.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Input validation ────────────────────────────────────────────
    #[error("Validation failed: {0}")]
    ValidationError(String),

    // ── Negative lookups ────────────────────────────────────────────
    #[error("Stock not found: {0}")]
    StockNotFound(String),

    #[error("{symbol} is not in the portfolio")]
    NotMember { symbol: String },

    // ── Conflicts ───────────────────────────────────────────────────
    #[error("{symbol} is already in the portfolio")]
    AlreadyMember { symbol: String },

    // ── External quote provider ─────────────────────────────────────
    #[error("Quote provider unavailable ({provider}): {message}")]
    ProviderUnavailable { provider: String, message: String },

    // ── Persistence ─────────────────────────────────────────────────
    #[error("Storage error: {0}")]
    Storage(String),

    // ── Data consistency ────────────────────────────────────────────
    #[error("Membership invariant violated: {0}")]
    InvariantViolation(String),
}

/// Coarse classification of a `CoreError`, used by calling layers
/// (HTTP handlers etc.) to map outcomes onto transport-level status
/// categories without matching on individual variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Malformed input — surfaced to the caller, not retried.
    Validation,
    /// The requested thing does not exist; a normal negative result.
    NotFound,
    /// The operation conflicts with current state (duplicate membership).
    Conflict,
    /// An external dependency failed or timed out; the caller may retry.
    DependencyUnavailable,
    /// The underlying store misbehaved.
    Storage,
    /// Stored data contradicts an invariant; indicates a prior bug elsewhere.
    Invariant,
}

impl CoreError {
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            CoreError::ValidationError(_) => ErrorKind::Validation,
            CoreError::StockNotFound(_) | CoreError::NotMember { .. } => ErrorKind::NotFound,
            CoreError::AlreadyMember { .. } => ErrorKind::Conflict,
            CoreError::ProviderUnavailable { .. } => ErrorKind::DependencyUnavailable,
            CoreError::Storage(_) => ErrorKind::Storage,
            CoreError::InvariantViolation(_) => ErrorKind::Invariant,
        }
    }
}

// ── Conversion helpers ──────────────────────────────────────────────

/// Strip query parameters from URLs embedded in an error message.
/// reqwest errors often contain full request URLs, and the quote
/// provider's API key travels in the query string.
pub(crate) fn redact_query(msg: &str) -> String {
    match msg.find('?') {
        Some(idx) => format!("{}?<query redacted>", &msg[..idx]),
        None => msg.to_string(),
    }
}

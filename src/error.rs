use thiserror::Error;

/// Failure reasons shared by every service.
///
/// `UpstreamUnavailable` and `NotFound` stay distinct here even though the
/// API surface renders both as 404.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ServiceError {
    /// Malformed date components or contradictory location parameters.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Transport or parse failure in a data source.
    #[error("upstream unavailable: {0}")]
    UpstreamUnavailable(String),

    /// Valid input, but no matching day, city or record.
    #[error("not found: {0}")]
    NotFound(String),

    /// A data source broke an ordering guarantee the core relies on.
    #[error("contract violation: {0}")]
    ContractViolation(String),
}

impl ServiceError {
    pub fn invalid(reason: impl Into<String>) -> Self {
        Self::InvalidInput(reason.into())
    }

    pub fn upstream(reason: impl Into<String>) -> Self {
        Self::UpstreamUnavailable(reason.into())
    }

    pub fn not_found(reason: impl Into<String>) -> Self {
        Self::NotFound(reason.into())
    }

    /// HTTP status used when this error reaches the API surface.
    pub fn status(&self) -> u16 {
        match self {
            ServiceError::InvalidInput(_) => 400,
            ServiceError::UpstreamUnavailable(_) | ServiceError::NotFound(_) => 404,
            ServiceError::ContractViolation(_) => 500,
        }
    }
}

pub type ServiceResult<T> = std::result::Result<T, ServiceError>;

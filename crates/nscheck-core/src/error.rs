use thiserror::Error;

/// Result type alias for nscheck operations
pub type Result<T> = std::result::Result<T, NsCheckError>;

/// Errors that can occur while talking to the hosting provider or running an audit
#[derive(Error, Debug)]
pub enum NsCheckError {
    /// Authentication failed or the caller lacks permission
    #[error("authentication failed: {0}")]
    Unauthorized(String),

    /// Credentials could not be obtained
    #[error("could not obtain credentials: {0}")]
    Credentials(String),

    /// No visible organization matches the requested name or id
    #[error("you do not have access to the organization {0}")]
    OrganizationNotFound(String),

    /// More than one organization matches the requested name or id
    #[error("organization {query} is ambiguous, candidates: {}", candidates.join(", "))]
    OrganizationAmbiguous {
        /// What the caller asked for
        query: String,
        /// Resource names of the matching organizations
        candidates: Vec<String>,
    },

    /// No organization was requested and the choice is not unique
    #[error("please specify an organization to check ({available} visible)")]
    NoOrganizationSelected {
        /// Number of organizations visible to the caller
        available: usize,
    },

    /// Resource not found
    #[error("resource not found: {resource}")]
    NotFound {
        /// Description of the resource that wasn't found
        resource: String,
    },

    /// Rate limit exceeded
    #[error("rate limit exceeded, retry after {retry_after:?} seconds")]
    RateLimited {
        /// Seconds to wait before retrying
        retry_after: Option<u64>,
    },

    /// API returned an error response
    #[error("API error ({code}): {message}")]
    Api {
        /// HTTP status code
        code: u16,
        /// Error message from the API
        message: String,
    },

    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Http(String),

    /// Request timed out
    #[error("request timed out after {0} seconds")]
    Timeout(u64),

    /// JSON parsing/serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// An asset name did not match the managed zone resource grammar
    #[error("{0} is not a managed zone resource name")]
    InvalidResourceName(String),

    /// Configuration error
    #[error("configuration error: {0}")]
    Config(String),

    /// The run was cancelled or hit its deadline
    #[error("audit cancelled before the pass completed")]
    Cancelled,

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic internal error
    #[error("internal error: {0}")]
    Internal(String),
}

impl NsCheckError {
    /// Returns true if the error is retryable
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        match self {
            Self::RateLimited { .. } | Self::Timeout(_) | Self::Http(_) => true,
            Self::Api { code, .. } => *code >= 500,
            _ => false,
        }
    }

    /// Returns true if the error is due to authentication
    #[must_use]
    pub const fn is_auth_error(&self) -> bool {
        matches!(self, Self::Unauthorized(_) | Self::Credentials(_))
    }

    /// Returns the HTTP status code if this is an API error
    #[must_use]
    pub const fn status_code(&self) -> Option<u16> {
        match self {
            Self::Unauthorized(_) => Some(401),
            Self::RateLimited { .. } => Some(429),
            Self::NotFound { .. } => Some(404),
            Self::Api { code, .. } => Some(*code),
            _ => None,
        }
    }
}

/// Why a live nameserver lookup produced no answer
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolutionFailure {
    /// The name does not exist
    NxDomain,
    /// The name exists but has no NS records
    NoRecords,
    /// The lookup did not complete in time
    Timeout,
    /// The upstream server failed to answer
    ServFail,
    /// Any other resolver failure
    Other(String),
}

impl std::fmt::Display for ResolutionFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NxDomain => write!(f, "NXDOMAIN"),
            Self::NoRecords => write!(f, "no NS records"),
            Self::Timeout => write!(f, "timeout"),
            Self::ServFail => write!(f, "SERVFAIL"),
            Self::Other(msg) => write!(f, "{msg}"),
        }
    }
}

/// A failed live NS lookup for one domain
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("lookup NS {domain}: {cause}")]
pub struct ResolutionError {
    /// The domain that was looked up
    pub domain: String,
    /// What went wrong
    pub cause: ResolutionFailure,
}

impl ResolutionError {
    /// Create a resolution error for a domain
    #[must_use]
    pub fn new(domain: impl Into<String>, cause: ResolutionFailure) -> Self {
        Self {
            domain: domain.into(),
            cause,
        }
    }
}

/// Reserved mapping key under which the validation token is stored.
///
/// The key lives in the same mapping as user data: it is visible in full
/// snapshots, and overwriting it counts as tampering on the next validation.
pub const VALIDATION_TOKEN_KEY: &str = "__sessio_validation_token";

/// The identity a client declares for itself, e.g. a user-agent or similar
/// request header value. Treated as the empty string when absent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClientIdentity(Option<String>);

impl ClientIdentity {
    pub fn new(value: impl Into<String>) -> Self {
        Self(Some(value.into()))
    }

    /// An identity for clients that declared nothing.
    pub fn absent() -> Self {
        Self(None)
    }

    /// Build from an optional request header value.
    pub fn from_header(value: Option<&str>) -> Self {
        Self(value.map(|v| v.to_string()))
    }

    pub fn as_str(&self) -> &str {
        self.0.as_deref().unwrap_or("")
    }

    pub fn is_absent(&self) -> bool {
        self.0.is_none()
    }
}

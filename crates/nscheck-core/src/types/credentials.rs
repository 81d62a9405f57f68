/// Bearer credentials for the hosting provider's APIs
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    access_token: String,
    source: &'static str,
}

impl Credentials {
    /// Wrap an access token obtained from `source`
    #[must_use]
    pub fn new(access_token: impl Into<String>, source: &'static str) -> Self {
        Self {
            access_token: access_token.into(),
            source,
        }
    }

    /// The raw bearer token
    #[must_use]
    pub fn access_token(&self) -> &str {
        &self.access_token
    }

    /// Where the token came from (gcloud, adc, metadata, static)
    #[must_use]
    pub const fn source(&self) -> &'static str {
        self.source
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("access_token", &"<redacted>")
            .field("source", &self.source)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debug_redacts_token() {
        let creds = Credentials::new("ya29.secret", "static");
        let debug = format!("{creds:?}");
        assert!(!debug.contains("ya29"));
        assert!(debug.contains("static"));
    }
}

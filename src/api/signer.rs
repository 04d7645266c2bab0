//! Request signing
//!
//! All outgoing requests pass through exactly one [`RequestSigner`]. Two
//! implementations exist: a bearer token, and the static `admin-id` /
//! `admin-password` header pair the current server still expects.

use reqwest::header::AUTHORIZATION;
use reqwest::RequestBuilder;
use std::fmt;

/// Attaches credentials to an outgoing request
pub trait RequestSigner: Send + Sync + fmt::Debug {
    fn sign(&self, request: RequestBuilder) -> RequestBuilder;
}

/// Static admin credentials sent as plain headers on every request
///
/// Only kept so the client can talk to servers that have not moved to
/// tokens yet. Prefer [`BearerToken`].
#[derive(Clone)]
pub struct AdminHeaders {
    admin_id: String,
    admin_password: String,
}

impl AdminHeaders {
    pub const ID_HEADER: &'static str = "admin-id";
    pub const PASSWORD_HEADER: &'static str = "admin-password";

    pub fn new(admin_id: impl Into<String>, admin_password: impl Into<String>) -> Self {
        AdminHeaders {
            admin_id: admin_id.into(),
            admin_password: admin_password.into(),
        }
    }
}

impl fmt::Debug for AdminHeaders {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AdminHeaders")
            .field("admin_id", &self.admin_id)
            .field("admin_password", &"<redacted>")
            .finish()
    }
}

impl RequestSigner for AdminHeaders {
    fn sign(&self, request: RequestBuilder) -> RequestBuilder {
        request
            .header(Self::ID_HEADER, &self.admin_id)
            .header(Self::PASSWORD_HEADER, &self.admin_password)
    }
}

/// Short-lived token issued at login, sent as `Authorization: Bearer`
#[derive(Clone)]
pub struct BearerToken(String);

impl BearerToken {
    pub fn new(token: impl Into<String>) -> Self {
        BearerToken(token.into())
    }
}

impl fmt::Debug for BearerToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("BearerToken(<redacted>)")
    }
}

impl RequestSigner for BearerToken {
    fn sign(&self, request: RequestBuilder) -> RequestBuilder {
        request.header(AUTHORIZATION, format!("Bearer {}", self.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn build(signer: &dyn RequestSigner) -> reqwest::Request {
        let client = reqwest::Client::new();
        signer
            .sign(client.get("http://localhost/api/students"))
            .build()
            .unwrap()
    }

    #[test]
    fn test_admin_headers_attach_both_headers() {
        let request = build(&AdminHeaders::new("admin", "secret"));

        assert_eq!(request.headers()["admin-id"], "admin");
        assert_eq!(request.headers()["admin-password"], "secret");
        assert!(request.headers().get(AUTHORIZATION).is_none());
    }

    #[test]
    fn test_bearer_token_sets_authorization() {
        let request = build(&BearerToken::new("abc123"));

        assert_eq!(request.headers()[AUTHORIZATION], "Bearer abc123");
        assert!(request.headers().get("admin-password").is_none());
    }

    #[test]
    fn test_debug_output_redacts_secrets() {
        let admin = format!("{:?}", AdminHeaders::new("admin", "secret"));
        let bearer = format!("{:?}", BearerToken::new("abc123"));

        assert!(!admin.contains("secret"));
        assert!(!bearer.contains("abc123"));
    }
}

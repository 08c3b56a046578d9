//! Client identity extractor
//!
//! Derives the caller's fingerprint from best-effort request metadata:
//! forwarded-for address (else the peer address), user agent, language
//! header, and an optional opaque client token. Extraction never fails;
//! missing fields degrade to empty strings.

use std::convert::Infallible;
use std::net::SocketAddr;

use axum::{
    async_trait,
    extract::{ConnectInfo, FromRequestParts},
    http::{header, request::Parts},
};
use bubble_core::Fingerprint;

/// Header carrying an optional client-chosen token that sharpens the
/// otherwise coarse header-based identity
const CLIENT_FINGERPRINT_HEADER: &str = "x-client-fingerprint";

const FORWARDED_FOR_HEADER: &str = "x-forwarded-for";

/// The requesting client's derived identity
#[derive(Debug, Clone)]
pub struct ClientIdentity(pub Fingerprint);

#[async_trait]
impl<S> FromRequestParts<S> for ClientIdentity
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let header_str = |name: &str| {
            parts
                .headers
                .get(name)
                .and_then(|v| v.to_str().ok())
                .unwrap_or("")
                .to_string()
        };

        let forwarded = header_str(FORWARDED_FOR_HEADER);
        let ip = if forwarded.is_empty() {
            parts
                .extensions
                .get::<ConnectInfo<SocketAddr>>()
                .map_or_else(|| "unknown".to_string(), |ci| ci.0.ip().to_string())
        } else {
            forwarded
        };

        let user_agent = header_str(header::USER_AGENT.as_str());
        let language = header_str(header::ACCEPT_LANGUAGE.as_str());
        let client_token = header_str(CLIENT_FINGERPRINT_HEADER);

        Ok(Self(Fingerprint::derive(
            &ip,
            &user_agent,
            &language,
            &client_token,
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Request;

    async fn identity_for(request: Request<()>) -> Fingerprint {
        let (mut parts, ()) = request.into_parts();
        let ClientIdentity(fp) = ClientIdentity::from_request_parts(&mut parts, &())
            .await
            .unwrap();
        fp
    }

    #[tokio::test]
    async fn test_same_headers_same_identity() {
        let build = || {
            Request::builder()
                .header("x-forwarded-for", "1.2.3.4")
                .header("user-agent", "Mozilla/5.0")
                .header("accept-language", "en-US")
                .body(())
                .unwrap()
        };
        assert_eq!(identity_for(build()).await, identity_for(build()).await);
    }

    #[tokio::test]
    async fn test_client_token_separates_identities() {
        let with_token = Request::builder()
            .header("x-forwarded-for", "1.2.3.4")
            .header("x-client-fingerprint", "abc")
            .body(())
            .unwrap();
        let without = Request::builder()
            .header("x-forwarded-for", "1.2.3.4")
            .body(())
            .unwrap();
        assert_ne!(identity_for(with_token).await, identity_for(without).await);
    }

    #[tokio::test]
    async fn test_bare_request_still_identifies() {
        let request = Request::builder().body(()).unwrap();
        let fp = identity_for(request).await;
        assert!(!fp.as_str().is_empty());
        assert!(!fp.is_bot());
    }
}

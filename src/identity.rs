//! Bearer-token header extractor.

use axum::extract::FromRequestParts;
use axum::http::StatusCode;
use axum::http::request::Parts;

/// Token presented as `Authorization: Token <value>` on profile endpoints.
///
/// Returns 401 if the header is absent, malformed, or uses another scheme.
/// Resolving the token to a user is the usecase's job, not the extractor's.
#[derive(Debug, Clone)]
pub struct TokenHeader(pub String);

fn parse_token_header(value: &str) -> Option<String> {
    let rest = value.strip_prefix("Token ")?;
    let token = rest.trim();
    if token.is_empty() || token.contains(' ') {
        return None;
    }
    Some(token.to_owned())
}

impl<S> FromRequestParts<S> for TokenHeader
where
    S: Send + Sync,
{
    type Rejection = StatusCode;

    // axum-core 0.5 defines this as `fn -> impl Future + Send` (not `async fn`).
    // In Rust 1.82+ precise capturing, `async fn` captures lifetimes differently,
    // causing E0195. Fix: extract values synchronously, return a 'static async move block.
    fn from_request_parts(
        parts: &mut Parts,
        _state: &S,
    ) -> impl std::future::Future<Output = Result<Self, Self::Rejection>> + Send {
        let token = parts
            .headers
            .get(axum::http::header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .and_then(parse_token_header);

        async move {
            let token = token.ok_or(StatusCode::UNAUTHORIZED)?;
            Ok(Self(token))
        }
    }
}

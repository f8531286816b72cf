//! Caller identity
//!
//! Melodia does not authenticate users itself. The fronting identity
//! provider forwards the user id in `x-user-id`; requests without one act as
//! the shared anonymous user.

use axum::{
    body::Body,
    http::{HeaderMap, Request},
    middleware::Next,
    response::Response,
};

pub const USER_ID_HEADER: &str = "x-user-id";
pub const ANONYMOUS: &str = "anonymous";

/// The user a request acts for
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Caller {
    pub user_id: String,
}

impl Caller {
    pub fn from_headers(headers: &HeaderMap) -> Self {
        let user_id = headers
            .get(USER_ID_HEADER)
            .and_then(|h| h.to_str().ok())
            .map(str::trim)
            .filter(|id| !id.is_empty())
            .unwrap_or(ANONYMOUS)
            .to_string();

        Self { user_id }
    }
}

/// Middleware that attaches a [`Caller`] extension to every request
pub async fn identify_caller(mut request: Request<Body>, next: Next) -> Response {
    let caller = Caller::from_headers(request.headers());
    request.extensions_mut().insert(caller);
    next.run(request).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_caller_from_header() {
        let mut headers = HeaderMap::new();
        headers.insert(USER_ID_HEADER, HeaderValue::from_static(" ana "));
        assert_eq!(Caller::from_headers(&headers).user_id, "ana");
    }

    #[test]
    fn test_missing_or_blank_header_is_anonymous() {
        assert_eq!(Caller::from_headers(&HeaderMap::new()).user_id, ANONYMOUS);

        let mut headers = HeaderMap::new();
        headers.insert(USER_ID_HEADER, HeaderValue::from_static("  "));
        assert_eq!(Caller::from_headers(&headers).user_id, ANONYMOUS);
    }
}

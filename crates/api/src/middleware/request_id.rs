use axum::{
    body::Body,
    http::{HeaderValue, Request},
    middleware::Next,
    response::Response,
};
use nanoid::nanoid;

use crate::state::RequestId;

pub const REQUEST_ID_HEADER: &str = "x-request-id";

const MAX_UPSTREAM_LEN: usize = 64;

/// Reuses a sane upstream id (e.g. from a proxy in front of the bot),
/// otherwise mints `req_<nanoid>`.
pub async fn request_id(mut req: Request<Body>, next: Next) -> Response {
    let request_id = req
        .headers()
        .get(REQUEST_ID_HEADER)
        .and_then(upstream_id)
        .unwrap_or_else(|| format!("req_{}", nanoid!(16)));

    req.extensions_mut().insert(RequestId(request_id.clone()));
    let mut resp = next.run(req).await;
    if let Ok(value) = HeaderValue::from_str(&request_id) {
        resp.headers_mut().insert(REQUEST_ID_HEADER, value);
    }
    resp
}

fn upstream_id(value: &HeaderValue) -> Option<String> {
    let value = value.to_str().ok()?.trim();
    let valid = !value.is_empty()
        && value.len() <= MAX_UPSTREAM_LEN
        && value
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
    valid.then(|| value.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routes::app;
    use crate::test_support::state;
    use tower::ServiceExt;

    #[test]
    fn test_upstream_id_accepts_simple_ids() {
        let value = HeaderValue::from_static("abc-123_DEF");
        assert_eq!(upstream_id(&value).as_deref(), Some("abc-123_DEF"));
    }

    #[test]
    fn test_upstream_id_rejects_odd_values() {
        assert!(upstream_id(&HeaderValue::from_static("")).is_none());
        assert!(upstream_id(&HeaderValue::from_static("has space")).is_none());
        let long = "a".repeat(MAX_UPSTREAM_LEN + 1);
        assert!(upstream_id(&HeaderValue::from_str(&long).unwrap()).is_none());
    }

    #[tokio::test]
    async fn test_upstream_id_is_echoed() {
        let request = Request::builder()
            .uri("/health")
            .header(REQUEST_ID_HEADER, "proxy-42")
            .body(Body::empty())
            .unwrap();
        let response = app(state()).oneshot(request).await.unwrap();
        assert_eq!(response.headers()[REQUEST_ID_HEADER], "proxy-42");
    }
}

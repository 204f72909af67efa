//! Request extractors.

use std::convert::Infallible;

use axum::{
    async_trait,
    extract::{FromRequest, FromRequestParts, Request},
    http::{header, request::Parts, HeaderMap},
    Json,
};
use serde::de::DeserializeOwned;

use crate::errors::ApiError;
use crate::state::{AppState, LinkBase};

const FORWARDED_PROTO: &str = "x-forwarded-proto";
const FORWARDED_HOST: &str = "x-forwarded-host";

/// Absolute `{scheme}://{host}` prefix for links in this response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BaseUrl(pub String);

#[async_trait]
impl FromRequestParts<AppState> for BaseUrl {
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        Ok(Self(resolve_base(&parts.headers, &state.links)))
    }
}

/// JSON request body whose rejections render as `400 Validation Error`.
#[derive(Debug)]
pub struct JsonBody<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for JsonBody<T>
where
    S: Send + Sync,
    T: DeserializeOwned,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state).await?;
        Ok(Self(value))
    }
}

/// Configured public URL, else forwarded/`Host` headers, else the bind address.
pub fn resolve_base(headers: &HeaderMap, links: &LinkBase) -> String {
    if let Some(url) = &links.public_url {
        return url.clone();
    }
    let host = first_value(headers, FORWARDED_HOST)
        .or_else(|| headers.get(header::HOST).and_then(|v| v.to_str().ok()).map(str::trim));
    match host {
        Some(host) if !host.is_empty() => {
            let scheme = first_value(headers, FORWARDED_PROTO).unwrap_or("http");
            format!("{scheme}://{host}")
        }
        _ => links.fallback.clone(),
    }
}

/// First entry of a possibly comma-separated proxy header.
fn first_value<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(',').next())
        .map(str::trim)
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn links(public_url: Option<&str>) -> LinkBase {
        LinkBase::new(public_url.map(str::to_string), "127.0.0.1:8080")
    }

    #[test]
    fn uses_host_header() {
        let mut h = HeaderMap::new();
        h.insert(header::HOST, HeaderValue::from_static("localhost:3000"));
        assert_eq!(resolve_base(&h, &links(None)), "http://localhost:3000");
    }

    #[test]
    fn forwarded_headers_win_over_host() {
        let mut h = HeaderMap::new();
        h.insert(header::HOST, HeaderValue::from_static("internal:8080"));
        h.insert(FORWARDED_HOST, HeaderValue::from_static("people.example.com, proxy"));
        h.insert(FORWARDED_PROTO, HeaderValue::from_static("https"));
        assert_eq!(resolve_base(&h, &links(None)), "https://people.example.com");
    }

    #[test]
    fn public_url_wins() {
        let mut h = HeaderMap::new();
        h.insert(header::HOST, HeaderValue::from_static("localhost:3000"));
        assert_eq!(resolve_base(&h, &links(Some("https://api.example.com"))), "https://api.example.com");
    }

    #[test]
    fn falls_back_to_bind_address() {
        assert_eq!(resolve_base(&HeaderMap::new(), &links(None)), "http://127.0.0.1:8080");
    }
}

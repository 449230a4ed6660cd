//! Request normalization.
//!
//! # Responsibilities
//! - Model the platform's inbound request (method, headers, URL, body)
//! - Copy platform headers into the engine's case-folded `HeaderMap`
//! - Extract the query-string portion of the request URL
//! - Decide the body kind from content-type and method
//!
//! # Design Decisions
//! - The platform body is consume-once; a second read is an error
//! - JSON-typed non-POST bodies are passed through as text, never parsed
//! - Non-JSON bodies are never read

use axum::http::HeaderMap as PlatformHeaders;
use bytes::Bytes;
use serde_json::Value;
use url::Url;

use crate::error::{HandlerError, HandlerResult};
use crate::http::headers::HeaderMap;

const JSON_CONTENT_TYPE: &str = "application/json";

/// Body of a platform request. Readable exactly once, as JSON or as text.
#[derive(Debug, Default)]
pub struct PlatformBody {
    bytes: Option<Bytes>,
}

impl PlatformBody {
    pub fn new(bytes: impl Into<Bytes>) -> Self {
        Self {
            bytes: Some(bytes.into()),
        }
    }

    pub fn empty() -> Self {
        Self::new(Bytes::new())
    }

    /// Whether the body has already been read.
    pub fn is_consumed(&self) -> bool {
        self.bytes.is_none()
    }

    /// Read the body as UTF-8 text. Invalid sequences are replaced.
    pub fn text(&mut self) -> HandlerResult<String> {
        let bytes = self.take()?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }

    /// Read and parse the body as JSON.
    pub fn json(&mut self) -> HandlerResult<Value> {
        let bytes = self.take()?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    fn take(&mut self) -> HandlerResult<Bytes> {
        self.bytes.take().ok_or(HandlerError::BodyAlreadyConsumed)
    }
}

/// An inbound request as the serverless platform delivers it.
#[derive(Debug)]
pub struct PlatformRequest {
    pub method: Option<String>,
    pub headers: PlatformHeaders,
    pub url: String,
    pub body: PlatformBody,
}

impl PlatformRequest {
    pub fn new(method: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            method: Some(method.into()),
            headers: PlatformHeaders::new(),
            url: url.into(),
            body: PlatformBody::empty(),
        }
    }

    /// Case-insensitive header lookup. Repeated headers are joined with `", "`.
    pub fn header(&self, name: &str) -> Option<String> {
        let mut values = self.headers.get_all(name).iter().peekable();
        values.peek()?;
        Some(
            values
                .map(|v| String::from_utf8_lossy(v.as_bytes()).into_owned())
                .collect::<Vec<_>>()
                .join(", "),
        )
    }
}

/// Body of a normalized GraphQL-over-HTTP request.
#[derive(Debug, Clone, PartialEq)]
pub enum GraphQLBody {
    /// Parsed JSON (POST with a JSON content-type).
    Json(Value),
    /// Raw text (JSON content-type on any other method).
    Text(String),
    /// No body was read.
    Absent,
}

/// Normalized GraphQL-over-HTTP request handed to the engine.
#[derive(Debug, Clone, PartialEq)]
pub struct GraphQLRequest {
    pub method: String,
    pub headers: HeaderMap,
    /// Query portion of the URL including the leading `?`, or empty.
    pub search: String,
    pub body: GraphQLBody,
}

/// Convert a platform request into the engine's request shape.
///
/// Consumes the platform body when the content-type is JSON.
pub fn normalize_request(req: &mut PlatformRequest) -> HandlerResult<GraphQLRequest> {
    let method = req.method.clone().ok_or(HandlerError::MissingMethod)?;

    Ok(GraphQLRequest {
        headers: normalize_headers(req),
        search: url_search(&req.url)?,
        body: parse_body(req, &method)?,
        method,
    })
}

fn normalize_headers(req: &PlatformRequest) -> HeaderMap {
    let mut headers = HeaderMap::new();
    for name in req.headers.keys() {
        let value = req.header(name.as_str()).unwrap_or_default();
        headers.set(name.as_str(), value);
    }
    headers
}

fn url_search(raw: &str) -> HandlerResult<String> {
    let url = Url::parse(raw)?;
    Ok(match url.query() {
        Some(query) if !query.is_empty() => format!("?{query}"),
        _ => String::new(),
    })
}

fn parse_body(req: &mut PlatformRequest, method: &str) -> HandlerResult<GraphQLBody> {
    let is_json = req
        .header("content-type")
        .is_some_and(|ct| ct.starts_with(JSON_CONTENT_TYPE));

    // Non-POST JSON requests are deliberately passed through unparsed.
    if is_json && method == "POST" {
        Ok(GraphQLBody::Json(req.body.json()?))
    } else if is_json {
        Ok(GraphQLBody::Text(req.body.text()?))
    } else {
        Ok(GraphQLBody::Absent)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;
    use serde_json::json;

    fn request(method: &str, content_type: Option<&str>, body: &str) -> PlatformRequest {
        let mut req = PlatformRequest::new(method, "https://h/graphql?x=1");
        if let Some(ct) = content_type {
            req.headers.insert("content-type", HeaderValue::from_str(ct).unwrap());
        }
        req.body = PlatformBody::new(body.to_string());
        req
    }

    #[test]
    fn test_missing_method() {
        let mut req = request("POST", None, "");
        req.method = None;

        let err = normalize_request(&mut req).unwrap_err();
        assert!(matches!(err, HandlerError::MissingMethod));
    }

    #[test]
    fn test_method_is_copied_verbatim() {
        for method in ["GET", "POST", "OPTIONS", "patch"] {
            let mut req = request(method, None, "");
            let normalized = normalize_request(&mut req).unwrap();
            assert_eq!(normalized.method, method);
        }
    }

    #[test]
    fn test_post_json_is_parsed() {
        let mut req = request("POST", Some("application/json"), r#"{"query":"{ping}"}"#);

        let normalized = normalize_request(&mut req).unwrap();

        assert_eq!(normalized.search, "?x=1");
        assert_eq!(normalized.body, GraphQLBody::Json(json!({ "query": "{ping}" })));
        assert!(req.body.is_consumed());
    }

    #[test]
    fn test_content_type_parameters_still_match() {
        let mut req = request(
            "POST",
            Some("application/json; charset=utf-8"),
            r#"{"query":"{ping}"}"#,
        );

        let normalized = normalize_request(&mut req).unwrap();
        assert!(matches!(normalized.body, GraphQLBody::Json(_)));
    }

    #[test]
    fn test_post_malformed_json_fails() {
        let mut req = request("POST", Some("application/json"), "{not json");

        let err = normalize_request(&mut req).unwrap_err();
        assert!(matches!(err, HandlerError::BodyParse(_)));
    }

    // Non-POST JSON bodies stay text even when they parse.
    #[test]
    fn test_get_json_is_passed_through_as_text() {
        let mut req = request("GET", Some("application/json"), r#"{"query":"{ping}"}"#);

        let normalized = normalize_request(&mut req).unwrap();

        assert_eq!(
            normalized.body,
            GraphQLBody::Text(r#"{"query":"{ping}"}"#.to_string())
        );
    }

    #[test]
    fn test_non_json_body_is_absent_and_unread() {
        let mut req = request("POST", Some("text/plain"), "query { ping }");

        let normalized = normalize_request(&mut req).unwrap();

        assert_eq!(normalized.body, GraphQLBody::Absent);
        assert!(!req.body.is_consumed());
    }

    #[test]
    fn test_missing_content_type_is_absent() {
        let mut req = request("POST", None, r#"{"query":"{ping}"}"#);
        assert_eq!(normalize_request(&mut req).unwrap().body, GraphQLBody::Absent);
    }

    #[test]
    fn test_headers_round_trip() {
        let mut req = request("GET", None, "");
        req.headers.insert("x-trace", HeaderValue::from_static("abc"));
        req.headers.insert("x-empty", HeaderValue::from_static(""));
        req.headers.append("accept", HeaderValue::from_static("text/html"));
        req.headers.append("accept", HeaderValue::from_static("application/json"));

        let normalized = normalize_request(&mut req).unwrap();

        assert_eq!(normalized.headers.get("x-trace"), Some("abc"));
        assert_eq!(normalized.headers.get("x-empty"), Some(""));
        assert_eq!(
            normalized.headers.get("accept"),
            Some("text/html, application/json")
        );
        assert_eq!(normalized.headers.len(), 3);
    }

    #[test]
    fn test_search_extraction() {
        assert_eq!(url_search("https://h/graphql?x=1&y=2").unwrap(), "?x=1&y=2");
        assert_eq!(url_search("https://h/graphql").unwrap(), "");
        assert_eq!(url_search("https://h/graphql?").unwrap(), "");
        assert!(matches!(
            url_search("/graphql?x=1"),
            Err(HandlerError::InvalidUrl(_))
        ));
    }

    #[test]
    fn test_body_is_consume_once() {
        let mut body = PlatformBody::new("hello");

        assert_eq!(body.text().unwrap(), "hello");
        assert!(matches!(body.text(), Err(HandlerError::BodyAlreadyConsumed)));
        assert!(matches!(body.json(), Err(HandlerError::BodyAlreadyConsumed)));
    }
}

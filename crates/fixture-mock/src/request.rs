//! Read-only request view used for fixture resolution.
//!
//! Only method, host, path and query take part in resolution. Bodies and
//! arbitrary headers are never consulted (the `Host` header is read only when
//! the URI has no authority).

use hyper::header::HOST;
use hyper::{HeaderMap, Method, Request, Uri};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixtureRequest {
    method: String,
    host: String,
    path_segments: Vec<String>,
    query: Vec<(String, String)>,
}

impl FixtureRequest {
    /// Build a request from a method, host and raw (percent-encoded) path.
    pub fn new(method: &str, host: impl Into<String>, path: &str) -> Self {
        Self {
            method: method.to_ascii_uppercase(),
            host: host.into(),
            path_segments: decode_segments(path),
            query: Vec::new(),
        }
    }

    /// Append one already-decoded query parameter.
    pub fn with_query_pair(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }

    /// Append the parameters of a raw query string, in wire order.
    pub fn with_query(mut self, query: &str) -> Self {
        self.query.extend(parse_query_pairs(query));
        self
    }

    /// Build from the parts of an HTTP request.
    ///
    /// The host comes from the URI authority, falling back to the `Host`
    /// header (without port) for origin-form URIs.
    pub fn from_parts(method: &Method, uri: &Uri, headers: &HeaderMap) -> Self {
        let host = uri
            .host()
            .map(str::to_string)
            .or_else(|| {
                headers
                    .get(HOST)
                    .and_then(|v| v.to_str().ok())
                    .map(strip_port)
            })
            .unwrap_or_default();

        let request = Self::new(method.as_str(), host, uri.path());
        match uri.query() {
            Some(query) => request.with_query(query),
            None => request,
        }
    }

    pub fn method(&self) -> &str {
        &self.method
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn path_segments(&self) -> &[String] {
        &self.path_segments
    }

    pub fn query(&self) -> &[(String, String)] {
        &self.query
    }
}

impl<B> From<&Request<B>> for FixtureRequest {
    fn from(request: &Request<B>) -> Self {
        Self::from_parts(request.method(), request.uri(), request.headers())
    }
}

impl fmt::Display for FixtureRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.method, self.host)?;
        for segment in &self.path_segments {
            write!(f, "/{segment}")?;
        }
        for (i, (key, value)) in self.query.iter().enumerate() {
            let sep = if i == 0 { '?' } else { '&' };
            write!(f, "{sep}{key}={value}")?;
        }
        Ok(())
    }
}

fn strip_port(host: &str) -> String {
    // Bracketed IPv6 literals keep their colons.
    if let Some(end) = host.find(']') {
        return host[..=end].to_string();
    }
    host.split(':').next().unwrap_or_default().to_string()
}

fn decode_segments(path: &str) -> Vec<String> {
    path.split('/')
        .filter(|s| !s.is_empty())
        .map(|segment| {
            urlencoding::decode(segment)
                .map(|s| s.into_owned())
                .unwrap_or_else(|_| segment.to_string())
        })
        .collect()
}

/// Parse a query string into ordered, URL-decoded pairs.
///
/// Unlike predicate matching, keys without `=` are kept (with an empty value)
/// and duplicates are preserved in wire order.
pub fn parse_query_pairs(query: &str) -> Vec<(String, String)> {
    query
        .split('&')
        .filter(|s| !s.is_empty())
        .map(|pair| {
            let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
            (decode_component(key), decode_component(value))
        })
        .collect()
}

fn decode_component(raw: &str) -> String {
    let raw = raw.replace('+', " ");
    match urlencoding::decode(&raw) {
        Ok(decoded) => decoded.into_owned(),
        Err(_) => raw,
    }
}

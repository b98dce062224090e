use crate::resolver::FixtureMatch;
use bytes::Bytes;
use http_body_util::Full;
use hyper::http::{HeaderName, HeaderValue};
use hyper::{HeaderMap, Response, StatusCode};
use std::str::FromStr;

/// Assembles a synthetic response around fixture bytes.
///
/// Defaults to `200 OK` with no headers. The body is never inspected.
#[derive(Debug, Clone)]
pub struct FixtureResponseBuilder {
    status: StatusCode,
    headers: HeaderMap,
}

impl Default for FixtureResponseBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl FixtureResponseBuilder {
    pub fn new() -> Self {
        FixtureResponseBuilder {
            status: StatusCode::OK,
            headers: HeaderMap::new(),
        }
    }

    pub fn status(mut self, status: StatusCode) -> Self {
        self.status = status;
        self
    }

    /// Set the status from a raw code; invalid codes leave it unchanged.
    pub fn status_code(self, code: u16) -> Self {
        match StatusCode::from_u16(code) {
            Ok(status) => self.status(status),
            Err(_) => self,
        }
    }

    pub fn header(mut self, name: &str, value: &str) -> Self {
        match (HeaderName::from_str(name), HeaderValue::from_str(value)) {
            (Ok(name), Ok(value)) => {
                self.headers.insert(name, value);
                self
            }
            _ => self,
        }
    }

    pub fn merge_headers<H, K, V>(mut self, headers: H) -> Self
    where
        H: IntoIterator<Item = (K, V)>,
        HeaderName: TryFrom<K>,
        HeaderValue: TryFrom<V>,
    {
        for (key, value) in headers {
            if let (Ok(name), Ok(value)) = (HeaderName::try_from(key), HeaderValue::try_from(value))
            {
                self.headers.insert(name, value);
            }
        }
        self
    }

    pub fn build(&self, fixture: &FixtureMatch) -> Response<Full<Bytes>> {
        self.build_from_bytes(fixture.body().clone())
    }

    pub fn build_from_bytes(&self, body: Bytes) -> Response<Full<Bytes>> {
        let mut response = Response::new(Full::new(body));
        *response.status_mut() = self.status;
        response.headers_mut().extend(self.headers.clone());
        response
    }
}

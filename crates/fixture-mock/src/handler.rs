//! Fixture-backed request handler.
//!
//! `FixtureHandler` answers `hyper::Request`s from the fixture tree. It also
//! implements `tower::Service`, so client code written against a tower
//! service can be exercised offline by swapping in the handler.

use crate::config::FixtureConfig;
use crate::error::FixtureError;
use crate::request::FixtureRequest;
use crate::resolver::FixtureResolver;
use crate::response::FixtureResponseBuilder;
use bytes::Bytes;
use http_body_util::Full;
use hyper::{Request, Response};
use std::future::{ready, Ready};
use std::sync::Arc;
use std::task::{Context, Poll};
use tower::Service;
use tracing::debug;

#[derive(Debug, Clone)]
pub struct FixtureHandler {
    resolver: Arc<FixtureResolver>,
    responses: FixtureResponseBuilder,
}

impl FixtureHandler {
    pub fn new(resolver: FixtureResolver) -> Self {
        Self {
            resolver: Arc::new(resolver),
            responses: FixtureResponseBuilder::new(),
        }
    }

    /// Build resolver and response defaults from configuration.
    ///
    /// The configuration is validated first, so an out-of-range `status` is
    /// reported instead of falling back to `200`.
    pub fn from_config(config: &FixtureConfig) -> Result<Self, FixtureError> {
        let resolver = FixtureResolver::from_config(config)?;
        let responses = FixtureResponseBuilder::new()
            .status_code(config.status)
            .merge_headers(
                config
                    .headers
                    .iter()
                    .map(|(name, value)| (name.as_str(), value.as_str())),
            );

        Ok(Self::new(resolver).with_responses(responses))
    }

    /// Replace the status and headers used for every response.
    pub fn with_responses(mut self, responses: FixtureResponseBuilder) -> Self {
        self.responses = responses;
        self
    }

    pub fn resolver(&self) -> &FixtureResolver {
        &self.resolver
    }

    pub fn handle<B>(&self, request: &Request<B>) -> Result<Response<Full<Bytes>>, FixtureError> {
        let fixture_request = FixtureRequest::from(request);
        let fixture = self.resolver.resolve(&fixture_request)?;
        debug!(
            "Serving {} from {:?} ({} bytes)",
            fixture_request,
            fixture.path(),
            fixture.body().len()
        );
        Ok(self.responses.build(&fixture))
    }
}

impl<B> Service<Request<B>> for FixtureHandler {
    type Response = Response<Full<Bytes>>;
    type Error = FixtureError;
    type Future = Ready<Result<Self::Response, Self::Error>>;

    fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, request: Request<B>) -> Self::Future {
        ready(self.handle(&request))
    }
}

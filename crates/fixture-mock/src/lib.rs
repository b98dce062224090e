//! Offline HTTP fixtures.
//!
//! Resolves an outgoing request (method, host, path, query) to a recorded
//! `.mock` file under a fixtures root and replays it as a synthetic response.
//!
//! ```text
//! <root>/<host>/<path segments>[.<sorted query>][.<method>].mock
//! ```
//!
//! More specific fixtures override generic ones; see [`resolver`] for the
//! fallback order. Paths that would leave the fixtures root are rejected with
//! [`FixtureError::OutOfBounds`], distinct from [`FixtureError::NotFound`].
//!
//! ```no_run
//! use fixture_mock::{FixtureRequest, FixtureResolver, FixtureResponseBuilder, HostAliases};
//!
//! # fn main() -> Result<(), fixture_mock::FixtureError> {
//! let resolver = FixtureResolver::new(
//!     "tests/fixtures",
//!     HostAliases::new().with("foo.bar", "example.com"),
//! )?;
//! let request = FixtureRequest::new("GET", "foo.bar", "/api/articles");
//! let fixture = resolver.resolve(&request)?;
//! let response = FixtureResponseBuilder::new().build(&fixture);
//! assert_eq!(response.status(), 200);
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod error;
pub mod handler;
pub mod request;
pub mod resolver;
pub mod response;

pub use config::{FixtureConfig, HostAliases};
pub use error::FixtureError;
pub use handler::FixtureHandler;
pub use request::FixtureRequest;
pub use resolver::{CandidatePath, FixtureMatch, FixtureResolver, Specificity};
pub use response::FixtureResponseBuilder;

//! Synthetic response assembly.
//!
//! - `builder` - `FixtureResponseBuilder`, status/headers around fixture bytes

mod builder;

pub use builder::FixtureResponseBuilder;

//! YAML fixtures for Mosaic.
//!
//! A fixture supplies the treemap items and the per-range usage curves
//! that feed the layout and chart engines, validated up front so the
//! engines only ever see well-formed input.

mod error;
mod fixture;

pub use error::ParseError;
pub use fixture::{Fixture, ViewportConfig};

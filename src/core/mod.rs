//! Core layout types: zone ids, zone specs, placement, configuration,
//! container size and the per-zone result.
//!
//! These are plain data. The solver consumes them without retaining them.

pub mod config;
pub mod dimensions;
pub mod error;

pub use config::{
    LayoutConfig, LayoutConfigBuilder, LayoutParams, Placement, Priority, Section, ZoneId, ZoneSpec,
};
pub use dimensions::{card_height, ContainerSize, Layout, ZoneDimensions};
pub use error::ConfigError;

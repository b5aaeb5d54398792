//! Configuration errors.
//!
//! Only building a `LayoutConfig` can fail. The solver itself has no error
//! channel and always degrades to some displayable size.

use thiserror::Error;

use super::config::ZoneId;

/// Reasons a layout configuration is rejected.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum ConfigError {
    #[error("zone `{0}` is declared more than once")]
    DuplicateZone(ZoneId),

    #[error("placement references undeclared zone `{0}`")]
    UnknownZone(ZoneId),

    #[error("zone `{0}` is placed in more than one section")]
    ZonePlacedTwice(ZoneId),

    #[error("zone `{0}` is not placed in any section")]
    UnplacedZone(ZoneId),

    #[error("right column holds {0} zones, at most one is supported")]
    MultipleRightColumnZones(usize),

    #[error("zone `{zone}` has invalid weight {weight}")]
    InvalidWeight { zone: ZoneId, weight: f64 },

    #[error("zone `{0}` limits rows to zero")]
    InvalidMaxRows(ZoneId),

    #[error("card width range {min}..={max} is empty")]
    InvalidCardWidthRange { min: u32, max: u32 },

    #[error("aspect ratio {0} must be positive and finite")]
    InvalidAspectRatio(f64),

    #[error("{name} must lie in (0, 1], got {value}")]
    InvalidFraction { name: &'static str, value: f64 },
}

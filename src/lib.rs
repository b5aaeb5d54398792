//! # card-layout
//!
//! Responsive card-zone layout for card game clients.
//!
//! Given a container size and a set of card zones (hand, battlefield,
//! sideboard, command zone...), computes a uniform card width and a
//! rows x columns grid for every zone so that everything fits the
//! container and the important zones get the largest cards.
//!
//! ## Design Principles
//!
//! 1. **Pure Solving**: `compute_layout` is a function of the container
//!    size and the config alone. No state survives between calls.
//!
//! 2. **Total Results**: Every configured zone gets dimensions, always.
//!    Degenerate input produces defaults, never an error or a panic.
//!
//! 3. **Configuration Over Convention**: Zones, their sections and their
//!    priorities are data, validated once when the config is built.
//!
//! ## Modules
//!
//! - `core`: Zone specs, placement, configuration, and result types
//! - `solver`: Single-zone fitter and the multi-zone layout search
//! - `observer`: Resize-reactive wrapper that re-solves on change

pub mod core;
pub mod observer;
pub mod solver;

// Re-export commonly used types
pub use crate::core::{
    ConfigError, ContainerSize, Layout, LayoutConfig, LayoutConfigBuilder, LayoutParams, Placement,
    Priority, Section, ZoneDimensions, ZoneId, ZoneSpec,
};

pub use crate::solver::{
    best_fit, compute_layout, compute_layout_with_stats, fit_or_shrink, FitRequest, SolveStats,
    Strategy,
};

pub use crate::observer::{
    observe, GridQuantizer, LayoutObserver, LayoutStream, NoQuantization, ObserverStats,
    SizeQuantizer,
};

//! Resize-reactive layout.
//!
//! `LayoutObserver` owns a config and the last published layout. Feed it
//! container measurements; it re-solves when the quantized size or the
//! config changes and publishes only when the result differs by value.

mod reactive;
mod quantize;

pub use reactive::{observe, LayoutObserver, LayoutStream, ObserverStats};
pub use quantize::{GridQuantizer, NoQuantization, SizeQuantizer};

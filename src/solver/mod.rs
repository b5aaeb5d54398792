//! Layout solver.
//!
//! `compute_layout` turns a container size and a `LayoutConfig` into card
//! dimensions for every zone. It is a pure function of its inputs: no
//! state is kept between calls.
//!
//! ## Pipeline
//!
//! 1. Degenerate input (no active zones, no usable space) gets default
//!    dimensions for every zone.
//! 2. A single active zone is sized directly by `fit_or_shrink`.
//! 3. Otherwise zones are classified into primaries, fill zones and the
//!    right column. For each right-column option, a binary search finds
//!    the highest shared level at which every zone fits, and leftover
//!    height moves zones up to the next level one at a time. The option
//!    with the highest level wins.

mod fit;
mod frame;
mod right_column;
mod search;
mod slack;
mod stats;

pub use fit::{best_fit, fit_or_shrink, FitRequest};
pub use stats::{SolveStats, Strategy};

use rustc_hash::FxHashMap;
use smallvec::{smallvec, SmallVec};
use tracing::debug;

use crate::core::{ContainerSize, Layout, LayoutConfig, ZoneDimensions, ZoneId};

use frame::{Frame, Slot};
use right_column::{right_options, RightColumn};
use search::{Roles, Stack, Tracker};

/// Compute card dimensions for every zone of `config` in a `width` x
/// `height` container.
///
/// Total: every configured zone appears in the result, empty zones as
/// `ZoneDimensions::hidden()`. Never panics on any finite or non-finite
/// size.
#[must_use]
pub fn compute_layout(width: f64, height: f64, config: &LayoutConfig) -> Layout {
    compute_layout_with_stats(width, height, config).0
}

/// `compute_layout`, also reporting how the result was found.
#[must_use]
pub fn compute_layout_with_stats(width: f64, height: f64, config: &LayoutConfig) -> (Layout, SolveStats) {
    let mut stats = SolveStats::new();

    let active = config.zones().iter().filter(|z| z.is_active()).count();
    if active == 0 {
        debug!("no active zones, using default dimensions");
        return (Layout::defaults(config), stats);
    }
    let Some(frame) = Frame::new(ContainerSize::new(width, height), config) else {
        debug!(width, height, "container leaves no usable space, using default dimensions");
        return (Layout::defaults(config), stats);
    };

    let layout = if active == 1 {
        stats.strategy = Strategy::SingleZone;
        solve_single(&frame)
    } else {
        solve_stacked(&frame, &mut stats)
    };
    (layout, stats)
}

fn solve_single(frame: &Frame<'_>) -> Layout {
    let Some((section, zone)) = frame.config.placed_zones().find(|(_, z)| z.is_active()) else {
        return Layout::defaults(frame.config);
    };
    let slot = Slot::new(frame, section, zone);
    let req = FitRequest::new(
        zone.count,
        frame.full_inner_width(),
        frame.avail_height - frame.section_chrome(),
        frame.aspect_ratio(),
    )
    .with_gap(slot.gap)
    .with_width_range(slot.min_width, slot.max_width)
    .with_max_rows(slot.max_rows);

    let dims = fit_or_shrink(&req);
    debug!(zone = %zone.id, width = dims.width, rows = dims.rows, "single zone");

    let mut placed = FxHashMap::default();
    placed.insert(&zone.id, dims);
    assemble(frame.config, &placed)
}

fn solve_stacked(frame: &Frame<'_>, stats: &mut SolveStats) -> Layout {
    let roles = Roles::classify(frame);
    let strategy = roles.strategy();
    stats.strategy = strategy;

    let columns: SmallVec<[Option<RightColumn<'_>>; 2]> = match roles.right {
        Some(right) => {
            let options = right_options(frame, right);
            stats.right_options = options.len() as u32;
            options.into_iter().map(Some).collect()
        }
        None => smallvec![None],
    };
    let stacks: SmallVec<[Stack<'_>; 2]> = columns
        .into_iter()
        .enumerate()
        .map(|(option, right)| Stack::new(*frame, &roles, option, right))
        .collect();

    let mut tracker = Tracker::new(stats);
    for stack in &stacks {
        stack.explore(&mut tracker);
    }
    let Some((choice, fallback)) = tracker.finish() else {
        debug!(?strategy, "no arrangement found, using default dimensions");
        return Layout::defaults(frame.config);
    };

    let stack = &stacks[choice.option];
    let arrangement = choice.arrangement;
    stats.slack_iterations = arrangement.steps;
    debug!(
        ?strategy,
        option = choice.option,
        level = arrangement.level,
        steps = arrangement.steps,
        right_columns = ?stack.right.map(|r| r.columns()),
        score = choice.score,
        fallback,
        candidates = stats.candidates,
        "layout solved"
    );

    assemble(frame.config, &stack.compose(&arrangement))
}

/// Full result from the dimensions of the active zones.
fn assemble(config: &LayoutConfig, placed: &FxHashMap<&ZoneId, ZoneDimensions>) -> Layout {
    config
        .zones()
        .iter()
        .map(|zone| {
            let dims = if zone.is_active() {
                placed.get(&zone.id).copied().unwrap_or(ZoneDimensions::DEFAULT)
            } else {
                ZoneDimensions::hidden()
            };
            (zone.id.clone(), dims)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ZoneSpec;

    #[test]
    fn test_empty_zones_are_hidden() {
        let config = LayoutConfig::builder()
            .top(ZoneSpec::new("hand", 5))
            .bottom_left(ZoneSpec::new("graveyard", 0))
            .build()
            .unwrap();
        let (layout, stats) = compute_layout_with_stats(800.0, 600.0, &config);

        assert_eq!(stats.strategy, Strategy::SingleZone);
        assert_eq!(layout["graveyard"], ZoneDimensions::hidden());
        assert!(layout["hand"].is_visible());
    }

    #[test]
    fn test_no_active_zones_uses_defaults() {
        let config = LayoutConfig::builder()
            .top(ZoneSpec::new("hand", 0))
            .build()
            .unwrap();
        let (layout, stats) = compute_layout_with_stats(800.0, 600.0, &config);

        assert_eq!(stats.strategy, Strategy::Degenerate);
        assert_eq!(layout["hand"], ZoneDimensions::DEFAULT);
    }

    #[test]
    fn test_single_zone_uses_whole_section() {
        let config = LayoutConfig::builder()
            .top(ZoneSpec::new("hand", 4))
            .build()
            .unwrap();
        let layout = compute_layout(1000.0, 200.0, &config);

        // 200 - 16 = 184px of height: 131px cards, 183px tall.
        assert_eq!(layout["hand"].rows, 1);
        assert_eq!(layout["hand"].width, 131);
        assert_eq!(layout["hand"].height, 183);
    }

    #[test]
    fn test_dual_primary_stats() {
        let config = LayoutConfig::builder()
            .top(ZoneSpec::new("hand", 7))
            .bottom_left(ZoneSpec::new("sideboard", 12))
            .build()
            .unwrap();
        let (layout, stats) = compute_layout_with_stats(1000.0, 700.0, &config);

        assert_eq!(stats.strategy, Strategy::DualPrimary);
        assert_eq!(stats.right_options, 0);
        assert!(stats.candidates > 0);
        assert!(stats.feasible > 0);
        assert!(!stats.used_fallback);
        assert!(layout.covers(&config));
    }

    #[test]
    fn test_overflow_falls_back() {
        let config = LayoutConfig::builder()
            .top(ZoneSpec::new("hand", 60))
            .bottom_left(ZoneSpec::new("sideboard", 60))
            .build()
            .unwrap();
        let (layout, stats) = compute_layout_with_stats(300.0, 120.0, &config);

        assert!(stats.used_fallback);
        assert!(layout["hand"].is_visible());
        assert!(layout["sideboard"].is_visible());
    }
}

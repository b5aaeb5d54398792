//! Solver inputs and outputs: container size, per-zone card dimensions,
//! and the total result map.

use std::ops::Index;

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use super::config::{LayoutConfig, ZoneId};

/// Measured size of the observed container, in pixels.
///
/// Values may be zero or negative; the solver treats those as degenerate.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ContainerSize {
    pub width: f64,
    pub height: f64,
}

impl ContainerSize {
    #[must_use]
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// Card size and grid for one zone.
///
/// For `width > 0`, `height == round(width * aspect_ratio)` and
/// `columns == ceil(count / rows)`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ZoneDimensions {
    pub width: u32,
    pub height: u32,
    pub rows: u32,
    pub columns: u32,
}

impl ZoneDimensions {
    /// Returned for every zone when there is nothing to lay out or no space.
    pub const DEFAULT: Self = Self {
        width: 100,
        height: 140,
        rows: 1,
        columns: 1,
    };

    /// Dimensions for `count` cards of `width` in `rows` rows.
    #[must_use]
    pub fn grid(width: u32, aspect_ratio: f64, count: u32, rows: u32) -> Self {
        let rows = rows.max(1);
        Self {
            width,
            height: card_height(width, aspect_ratio),
            rows,
            columns: count.div_ceil(rows),
        }
    }

    /// A zone with no cards.
    #[must_use]
    pub const fn hidden() -> Self {
        Self {
            width: 0,
            height: 0,
            rows: 1,
            columns: 0,
        }
    }

    /// The fitter's "cannot display" answer for `count` cards.
    #[must_use]
    pub const fn zero(count: u32) -> Self {
        Self {
            width: 0,
            height: 0,
            rows: 1,
            columns: count,
        }
    }

    /// Can cards be drawn at this size?
    #[must_use]
    pub const fn is_visible(&self) -> bool {
        self.width > 0
    }

    /// Height of the card grid, gaps included.
    #[must_use]
    pub fn content_height(&self, gap: f64) -> f64 {
        if self.rows == 0 || self.width == 0 {
            return 0.0;
        }
        self.rows as f64 * self.height as f64 + (self.rows - 1) as f64 * gap
    }

    /// Width of the card grid, gaps included.
    #[must_use]
    pub fn content_width(&self, gap: f64) -> f64 {
        if self.columns == 0 || self.width == 0 {
            return 0.0;
        }
        self.columns as f64 * self.width as f64 + (self.columns - 1) as f64 * gap
    }
}

/// Card height for a card width.
#[must_use]
pub fn card_height(width: u32, aspect_ratio: f64) -> u32 {
    (width as f64 * aspect_ratio).round() as u32
}

/// Solver result: dimensions for every configured zone.
///
/// Total over the config's zones, so consumers never need to handle a
/// missing entry. Compared by value.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Layout {
    zones: FxHashMap<ZoneId, ZoneDimensions>,
}

impl Layout {
    /// `ZoneDimensions::DEFAULT` for every zone in the config.
    #[must_use]
    pub fn defaults(config: &LayoutConfig) -> Self {
        config
            .zones()
            .iter()
            .map(|z| (z.id.clone(), ZoneDimensions::DEFAULT))
            .collect()
    }

    /// Get the dimensions of a zone.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&ZoneDimensions> {
        self.zones.get(id)
    }

    /// Number of zones in the result.
    #[must_use]
    pub fn len(&self) -> usize {
        self.zones.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.zones.is_empty()
    }

    /// Iterate zones in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = (&ZoneId, &ZoneDimensions)> {
        self.zones.iter()
    }

    /// Does the result hold exactly the ids of `config`?
    #[must_use]
    pub fn covers(&self, config: &LayoutConfig) -> bool {
        self.len() == config.zones().len()
            && config.zones().iter().all(|z| self.zones.contains_key(&z.id))
    }
}

impl FromIterator<(ZoneId, ZoneDimensions)> for Layout {
    fn from_iter<T: IntoIterator<Item = (ZoneId, ZoneDimensions)>>(iter: T) -> Self {
        Self {
            zones: iter.into_iter().collect(),
        }
    }
}

impl Index<&str> for Layout {
    type Output = ZoneDimensions;

    fn index(&self, id: &str) -> &Self::Output {
        match self.zones.get(id) {
            Some(dims) => dims,
            None => panic!("zone `{id}` is not part of this layout"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_derives_height_and_columns() {
        let dims = ZoneDimensions::grid(101, 1.4, 7, 2);
        assert_eq!(dims.height, 141);
        assert_eq!(dims.columns, 4);
        assert_eq!(dims.rows, 2);
    }

    #[test]
    fn test_content_extent() {
        let dims = ZoneDimensions::grid(100, 1.4, 5, 2);
        assert_eq!(dims.content_height(6.0), 286.0);
        assert_eq!(dims.content_width(6.0), 312.0);
        assert_eq!(ZoneDimensions::hidden().content_height(6.0), 0.0);
    }

    #[test]
    fn test_card_height_rounds() {
        assert_eq!(card_height(51, 1.4), 71);
        assert_eq!(card_height(0, 1.4), 0);
    }

    #[test]
    fn test_default_dimensions() {
        assert_eq!(ZoneDimensions::DEFAULT.height, card_height(100, 1.4));
        assert!(ZoneDimensions::DEFAULT.is_visible());
        assert!(!ZoneDimensions::zero(3).is_visible());
        assert_eq!(ZoneDimensions::zero(3).columns, 3);
    }

    #[test]
    fn test_layout_lookup_by_str() {
        let layout: Layout = [(ZoneId::new("hand"), ZoneDimensions::DEFAULT)]
            .into_iter()
            .collect();
        assert_eq!(layout["hand"], ZoneDimensions::DEFAULT);
        assert!(layout.get("deck").is_none());
    }

    #[test]
    #[should_panic(expected = "zone `deck`")]
    fn test_layout_index_missing_panics() {
        let layout = Layout::default();
        let _ = layout["deck"];
    }
}

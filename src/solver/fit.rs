//! Single-zone fitter.
//!
//! Finds the row count that maximizes card width for `count` cards inside
//! one rectangle. Used directly when only one zone is active, along with
//! the integer grid geometry the level search is built on.

use crate::core::{card_height, ZoneDimensions};

/// Inputs to `best_fit`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FitRequest {
    pub count: u32,
    pub avail_width: f64,
    pub avail_height: f64,
    pub gap: f64,
    pub min_width: u32,
    pub max_width: u32,
    /// Upper bound on rows; clamped to `count`.
    pub max_rows: u32,
    pub aspect_ratio: f64,
}

impl FitRequest {
    /// Request with no row limit and a 1px minimum width.
    #[must_use]
    pub fn new(count: u32, avail_width: f64, avail_height: f64, aspect_ratio: f64) -> Self {
        Self {
            count,
            avail_width,
            avail_height,
            gap: 0.0,
            min_width: 1,
            max_width: u32::MAX,
            max_rows: u32::MAX,
            aspect_ratio,
        }
    }

    #[must_use]
    pub fn with_gap(mut self, gap: f64) -> Self {
        self.gap = gap;
        self
    }

    #[must_use]
    pub fn with_width_range(mut self, min: u32, max: u32) -> Self {
        self.min_width = min;
        self.max_width = max;
        self
    }

    #[must_use]
    pub fn with_max_rows(mut self, rows: u32) -> Self {
        self.max_rows = rows;
        self
    }

    fn row_limit(&self) -> u32 {
        self.max_rows.min(self.count).max(1)
    }
}

/// Find the widest cards that fit.
///
/// Tries every canonical row count from 1 up and keeps the first one that
/// reaches the largest width, so equal sizes resolve to fewer rows.
/// Returns `ZoneDimensions::zero(count)` when no arrangement reaches
/// `min_width`; callers must treat width 0 as "cannot display".
#[must_use]
pub fn best_fit(req: &FitRequest) -> ZoneDimensions {
    if req.count == 0 {
        return ZoneDimensions::hidden();
    }

    let mut best: Option<(u32, u32)> = None;
    for rows in 1..=req.row_limit() {
        if !is_canonical(req.count, rows) {
            continue;
        }
        let width = width_for_rows(
            req.count,
            rows,
            req.avail_width,
            req.avail_height,
            req.gap,
            req.aspect_ratio,
        )
        .min(req.max_width);
        if width < req.min_width || width == 0 {
            continue;
        }
        if best.map_or(true, |(w, _)| width > w) {
            best = Some((width, rows));
        }
    }

    match best {
        Some((width, rows)) => ZoneDimensions::grid(width, req.aspect_ratio, req.count, rows),
        None => ZoneDimensions::zero(req.count),
    }
}

/// `best_fit`, degrading instead of giving up.
///
/// Retries with the minimum width relaxed to 1px, and if even that fails
/// returns 1px cards in the fewest rows that fit horizontally: the
/// arrangement that overflows the height least. Never returns width 0 for
/// a non-empty zone.
#[must_use]
pub fn fit_or_shrink(req: &FitRequest) -> ZoneDimensions {
    let fit = best_fit(req);
    if fit.is_visible() || req.count == 0 {
        return fit;
    }

    let relaxed = best_fit(&FitRequest {
        min_width: 1,
        max_width: req.max_width.max(1),
        ..*req
    });
    if relaxed.is_visible() {
        return relaxed;
    }

    squeeze(req.count, 1, req.avail_width, req.gap, req.row_limit(), req.aspect_ratio)
}

/// Cards no wider than `ceiling` packed into at most `max_rows` rows,
/// ignoring height entirely.
pub(crate) fn squeeze(
    count: u32,
    ceiling: u32,
    avail_width: f64,
    gap: f64,
    max_rows: u32,
    aspect_ratio: f64,
) -> ZoneDimensions {
    let ceiling = ceiling.max(1);
    let rows = rows_at_width(count, ceiling, avail_width, gap)
        .unwrap_or(count)
        .min(max_rows.max(1));
    let width = horizontal_cap(count, rows, avail_width, gap)
        .min(ceiling)
        .max(1);
    ZoneDimensions::grid(width, aspect_ratio, count, rows)
}

/// Is `rows` the fewest rows that hold `count` cards at its column count?
///
/// Non-canonical row counts repeat the grid of a smaller row count with an
/// empty row appended.
#[must_use]
pub(crate) fn is_canonical(count: u32, rows: u32) -> bool {
    if rows == 0 || count == 0 {
        return false;
    }
    let columns = count.div_ceil(rows);
    count.div_ceil(columns) == rows
}

/// Widest card allowed by the horizontal extent alone.
#[must_use]
pub(crate) fn horizontal_cap(count: u32, rows: u32, avail_width: f64, gap: f64) -> u32 {
    let columns = count.div_ceil(rows.max(1)).max(1);
    let width = (avail_width - (columns - 1) as f64 * gap) / columns as f64;
    if width.is_finite() && width > 0.0 {
        width.floor() as u32
    } else {
        0
    }
}

/// Height of `rows` rows of cards of `width`.
#[must_use]
pub(crate) fn grid_height(rows: u32, width: u32, gap: f64, aspect_ratio: f64) -> f64 {
    if rows == 0 {
        return 0.0;
    }
    rows as f64 * card_height(width, aspect_ratio) as f64 + (rows - 1) as f64 * gap
}

/// Largest integer card width placing `count` cards in `rows` rows inside
/// the box. Zero when nothing fits.
#[must_use]
pub(crate) fn width_for_rows(
    count: u32,
    rows: u32,
    avail_width: f64,
    avail_height: f64,
    gap: f64,
    aspect_ratio: f64,
) -> u32 {
    let by_width = horizontal_cap(count, rows, avail_width, gap);
    let by_height = (avail_height - (rows - 1) as f64 * gap) / (rows as f64 * aspect_ratio);
    if !(by_height.is_finite() && by_height > 0.0) {
        return 0;
    }

    let mut width = by_width.min(by_height.floor() as u32);
    while width > 0 && grid_height(rows, width, gap, aspect_ratio) > avail_height {
        width -= 1;
    }
    // Rounding the card height down can admit one more pixel.
    while width < by_width && grid_height(rows, width + 1, gap, aspect_ratio) <= avail_height {
        width += 1;
    }
    width
}

/// Fewest rows holding `count` cards of `width` within `avail_width`.
///
/// `None` when not even one card fits.
#[must_use]
pub(crate) fn rows_at_width(count: u32, width: u32, avail_width: f64, gap: f64) -> Option<u32> {
    let per_row = ((avail_width + gap) / (width as f64 + gap)).floor();
    if !(per_row.is_finite() && per_row >= 1.0) {
        return None;
    }
    let columns = (per_row as u32).min(count).max(1);
    Some(count.div_ceil(columns))
}

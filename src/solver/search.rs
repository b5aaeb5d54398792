//! Level search.
//!
//! Active stacked zones are split into primaries and fill zones. Every
//! zone's card width is a fixed function of one shared integer level:
//! primaries (and the right column) take `level × weight / heaviest
//! weight`, clamped to their own range, and fill zones take the floor
//! ratio of that, between their floor and the narrowest primary. A larger
//! container can only admit a higher level, so the binary search for the
//! highest level that fits never hands any zone a narrower card.
//!
//! A primary that would need more rows than its limit is held at its
//! horizontal cap but still reserves the height of uncapped cards, so its
//! neighbours see the same pressure as the level rises.

use rustc_hash::FxHashMap;
use smallvec::SmallVec;
use tracing::trace;

use crate::core::{Priority, Section, ZoneDimensions, ZoneId, ZoneSpec};

use super::fit::{grid_height, horizontal_cap, rows_at_width, squeeze};
use super::frame::{Frame, Slot};
use super::right_column::RightColumn;
use super::slack::redistribute;
use super::stats::{SolveStats, Strategy};

/// Active zones split by role.
pub(crate) struct Roles<'a> {
    pub primaries: SmallVec<[Slot<'a>; 2]>,
    pub fills: SmallVec<[Slot<'a>; 4]>,
    pub right: Option<Slot<'a>>,
}

impl<'a> Roles<'a> {
    /// Classify active zones in placement order.
    ///
    /// Only the first two primaries compete; later ones are sized like
    /// fill zones. With no primary at all and several fill zones, the first
    /// fill zone stands in as the primary.
    pub fn classify(frame: &Frame<'a>) -> Self {
        let mut primaries = SmallVec::new();
        let mut fills = SmallVec::new();
        let mut right = None;

        for (section, zone) in frame.config.placed_zones().filter(|(_, z)| z.is_active()) {
            let slot = Slot::new(frame, section, zone);
            match (section, zone.priority) {
                (Section::BottomRight, _) => right = Some(slot),
                (_, Priority::Primary) if primaries.len() < 2 => primaries.push(slot),
                _ => fills.push(slot),
            }
        }
        if primaries.is_empty() && fills.len() > 1 {
            primaries.push(fills.remove(0));
        }

        Self {
            primaries,
            fills,
            right,
        }
    }

    pub fn strategy(&self) -> Strategy {
        match self.primaries.len() {
            0 => Strategy::PureFill,
            1 => Strategy::SinglePrimary,
            _ => Strategy::DualPrimary,
        }
    }
}

/// A zone's cards and the content height it holds in the stack.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct Placed {
    pub dims: ZoneDimensions,
    /// Content height reserved at the level width, which a capped zone
    /// reserves even though its cards are narrower.
    pub reserved: f64,
}

impl Placed {
    fn exact(dims: ZoneDimensions, gap: f64) -> Self {
        Self {
            dims,
            reserved: dims.content_height(gap),
        }
    }
}

/// Every active zone placed at one level.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct Arrangement {
    pub level: u32,
    /// Zones moved up to the next level by slack redistribution.
    pub steps: u32,
    pub primaries: SmallVec<[Placed; 2]>,
    pub fills: SmallVec<[Placed; 4]>,
    pub right: Option<Placed>,
    /// Height of the stack as displayed.
    pub total_height: f64,
    /// Height of the stack with every zone at its reservation.
    pub reserved_height: f64,
}

pub(crate) enum Outcome {
    Feasible(Arrangement),
    Overflow(Arrangement),
    /// A fill zone cannot hold its cards at its floor, or this option
    /// would have to cap a zone the one-column option does not.
    Rejected,
}

/// An arrangement kept by the tracker.
#[derive(Clone, Debug)]
pub(crate) struct Choice {
    /// Index of the right-column option the arrangement belongs to.
    pub option: usize,
    pub arrangement: Arrangement,
    pub score: f64,
}

impl Choice {
    /// Higher level first, then more slack steps, then score.
    fn outranks(&self, other: &Choice) -> bool {
        let (a, b) = (&self.arrangement, &other.arrangement);
        match (a.level, a.steps).cmp(&(b.level, b.steps)) {
            std::cmp::Ordering::Equal => self.score > other.score,
            ordering => ordering.is_gt(),
        }
    }
}

/// Keeps the best feasible arrangement and the least-overflow fallback.
pub(crate) struct Tracker<'s> {
    best: Option<Choice>,
    fallback: Option<(Choice, f64)>,
    stats: &'s mut SolveStats,
}

impl<'s> Tracker<'s> {
    pub fn new(stats: &'s mut SolveStats) -> Self {
        Self {
            best: None,
            fallback: None,
            stats,
        }
    }

    fn offer_feasible(&mut self, option: usize, arrangement: Arrangement, score: f64) {
        trace!(option, level = arrangement.level, steps = arrangement.steps, score, "feasible option");
        let choice = Choice {
            option,
            arrangement,
            score,
        };
        if self.best.as_ref().map_or(true, |best| choice.outranks(best)) {
            self.best = Some(choice);
        }
    }

    fn offer_fallback(&mut self, option: usize, arrangement: Arrangement, overflow: f64) {
        trace!(option, overflow, "infeasible option");
        if self.fallback.as_ref().map_or(true, |(_, least)| overflow < *least) {
            let choice = Choice {
                option,
                arrangement,
                score: 0.0,
            };
            self.fallback = Some((choice, overflow));
        }
    }

    /// The winner, and whether it is the overflow fallback.
    pub fn finish(self) -> Option<(Choice, bool)> {
        let Self { best, fallback, stats } = self;
        match (best, fallback) {
            (Some(best), _) => Some((best, false)),
            (None, Some((fallback, _))) => {
                stats.used_fallback = true;
                Some((fallback, true))
            }
            (None, None) => None,
        }
    }
}

/// The stacked zones under one right-column option.
pub(crate) struct Stack<'a> {
    pub frame: Frame<'a>,
    /// Index of the right-column option; 0 is the one-column option.
    pub option: usize,
    pub primaries: SmallVec<[Slot<'a>; 2]>,
    pub fills: SmallVec<[Slot<'a>; 4]>,
    pub right: Option<RightColumn<'a>>,
    /// Weight of the zones the level is measured against.
    heaviest: f64,
    /// Weight of the lightest primary.
    lightest: f64,
}

impl<'a> Stack<'a> {
    pub fn new(frame: Frame<'a>, roles: &Roles<'a>, option: usize, right: Option<RightColumn<'a>>) -> Self {
        let left_width = frame.left_inner_width(right.map_or(0.0, |r| r.strip));
        let place = |slot: &Slot<'a>| {
            let mut slot = *slot;
            if slot.section == Section::BottomLeft {
                slot.inner_width = left_width;
            }
            slot
        };
        let leaders = if roles.primaries.is_empty() {
            &roles.fills[..roles.fills.len().min(1)]
        } else {
            &roles.primaries[..]
        };
        let heaviest = leaders.iter().map(Slot::weight).fold(f64::MIN_POSITIVE, f64::max);
        let lightest = leaders.iter().map(Slot::weight).fold(heaviest, f64::min);

        Self {
            frame,
            option,
            primaries: roles.primaries.iter().map(place).collect(),
            fills: roles.fills.iter().map(place).collect(),
            right,
            heaviest,
            lightest,
        }
    }

    /// Find the highest level that fits, grow it into the leftover height
    /// and offer it to the tracker. When even the lowest level overflows,
    /// offer a squeezed fallback instead.
    pub fn explore(&self, tracker: &mut Tracker<'_>) {
        let mut best = match self.evaluate(1, false, tracker.stats) {
            Outcome::Feasible(arrangement) => arrangement,
            _ => {
                match self.evaluate(1, true, tracker.stats) {
                    Outcome::Feasible(arrangement) | Outcome::Overflow(arrangement) => {
                        let overflow = arrangement.reserved_height - self.frame.avail_height;
                        tracker.offer_fallback(self.option, arrangement, overflow);
                    }
                    Outcome::Rejected => {}
                }
                return;
            }
        };

        let (mut low, mut high) = (1, self.top_level());
        while low < high {
            let mid = low + (high - low).div_ceil(2);
            match self.evaluate(mid, false, tracker.stats) {
                Outcome::Feasible(arrangement) => {
                    low = mid;
                    best = arrangement;
                }
                _ => high = mid - 1,
            }
        }

        redistribute(self, &mut best);
        let score = self.score(&best);
        tracker.offer_feasible(self.option, best, score);
    }

    fn evaluate(&self, level: u32, lenient: bool, stats: &mut SolveStats) -> Outcome {
        stats.candidates += 1;
        let outcome = self.arrange(level, lenient);
        match &outcome {
            Outcome::Feasible(_) => stats.feasible += 1,
            Outcome::Overflow(_) => stats.overflowing += 1,
            Outcome::Rejected => stats.rejected += 1,
        }
        outcome
    }

    /// A level past which every zone sits at its maximum width.
    fn top_level(&self) -> u32 {
        let right = self.right.as_ref().map(|r| &r.slot);
        let mut top = self
            .primaries
            .iter()
            .chain(&self.fills)
            .chain(right)
            .map(|slot| (slot.max_width as f64 * self.heaviest / slot.weight()).ceil())
            .fold(1.0, f64::max);
        if !self.primaries.is_empty() {
            let rate = self.frame.params.fill_floor_ratio * self.lightest / self.heaviest;
            top = self
                .fills
                .iter()
                .map(|slot| (slot.max_width as f64 / rate).ceil())
                .fold(top, f64::max);
        }
        (top as u32).saturating_add(1)
    }

    /// Card width of a level-sized zone.
    pub fn level_width(&self, slot: &Slot<'_>, level: u32) -> u32 {
        let width = (slot.weight() / self.heaviest * level as f64).round();
        (width as u32).min(slot.max_width).max(slot.min_width)
    }

    /// Widest card a zone may use at `rows` rows.
    pub fn cap(&self, slot: &Slot<'_>, rows: u32) -> u32 {
        horizontal_cap(slot.count(), rows, slot.inner_width, slot.gap)
            .min(slot.max_width)
            .max(1)
    }

    /// Floor and ceiling of a fill zone's width given the narrowest primary.
    pub fn fill_bounds(&self, slot: &Slot<'_>, narrowest: Option<u32>) -> (u32, u32) {
        let ceiling = narrowest.map_or(slot.max_width, |n| n.min(slot.max_width)).max(1);
        let floor = narrowest
            .map_or(slot.min_width, |n| (n as f64 * self.frame.params.fill_floor_ratio).round() as u32)
            .max(slot.min_width)
            .min(ceiling);
        (floor, ceiling)
    }

    /// Card width of a fill zone below primaries at `level`: the floor
    /// ratio of the lightest primary's unclamped level width, so fill zones
    /// keep growing once the primaries reach their maximum.
    fn fill_width(&self, slot: &Slot<'_>, level: u32, narrowest: Option<u32>) -> u32 {
        let (floor, ceiling) = self.fill_bounds(slot, narrowest);
        let target = (self.frame.params.fill_floor_ratio * self.lightest / self.heaviest * level as f64).round();
        (target as u32).min(ceiling).max(floor)
    }

    /// Place every zone at `level`.
    ///
    /// With `lenient`, fill zones that cannot meet their floor are packed
    /// under their ceiling instead of rejecting the level. Only the
    /// one-column option may do that.
    pub fn arrange(&self, level: u32, lenient: bool) -> Outcome {
        let ratio = self.frame.aspect_ratio();
        let constrained = self.option > 0;

        let right = match &self.right {
            Some(column) => {
                let width = self.level_width(&column.slot, level);
                if constrained && column.is_capped(width) {
                    return Outcome::Rejected;
                }
                Some(column.place(width, ratio))
            }
            None => None,
        };

        let mut primaries: SmallVec<[Placed; 2]> = SmallVec::new();
        let mut narrowest: Option<u32> = None;
        for slot in &self.primaries {
            let width = self.level_width(slot, level);
            narrowest = Some(narrowest.map_or(width, |n| n.min(width)));
            match rows_at_width(slot.count(), width, slot.inner_width, slot.gap) {
                Some(rows) if rows <= slot.max_rows => {
                    let dims = ZoneDimensions::grid(width, ratio, slot.count(), rows);
                    primaries.push(Placed::exact(dims, slot.gap));
                }
                _ => {
                    if constrained && slot.section == Section::BottomLeft {
                        return Outcome::Rejected;
                    }
                    let rows = slot.max_rows;
                    let capped = self.cap(slot, rows).min(width);
                    primaries.push(Placed {
                        dims: ZoneDimensions::grid(capped, ratio, slot.count(), rows),
                        reserved: grid_height(rows, width, slot.gap, ratio),
                    });
                }
            }
        }

        let actual = primaries.iter().map(|p| p.dims.width).min();
        let mut fills: SmallVec<[Placed; 4]> = SmallVec::new();
        for slot in &self.fills {
            let width = if self.primaries.is_empty() {
                self.level_width(slot, level)
            } else {
                self.fill_width(slot, level, narrowest)
            };
            match rows_at_width(slot.count(), width, slot.inner_width, slot.gap) {
                Some(rows) if rows <= slot.max_rows => {
                    let floor = ZoneDimensions::grid(width, ratio, slot.count(), rows);
                    let dims = match actual {
                        Some(actual) if actual < width => ZoneDimensions::grid(actual, ratio, slot.count(), rows),
                        _ => floor,
                    };
                    fills.push(Placed {
                        dims,
                        reserved: floor.content_height(slot.gap),
                    });
                }
                _ if lenient && !constrained => {
                    let ceiling = actual.map_or(width, |a| a.min(slot.max_width)).max(1);
                    let dims = squeeze(slot.count(), ceiling, slot.inner_width, slot.gap, slot.max_rows, ratio);
                    fills.push(Placed::exact(dims, slot.gap));
                }
                _ => return Outcome::Rejected,
            }
        }

        let mut arrangement = Arrangement {
            level,
            steps: 0,
            primaries,
            fills,
            right,
            total_height: 0.0,
            reserved_height: 0.0,
        };
        arrangement.total_height = self.measure(&arrangement);
        arrangement.reserved_height = self.reserved_height(&arrangement);

        if arrangement.reserved_height <= self.frame.avail_height {
            Outcome::Feasible(arrangement)
        } else {
            Outcome::Overflow(arrangement)
        }
    }

    /// Stack height of the cards as displayed.
    pub fn measure(&self, arrangement: &Arrangement) -> f64 {
        let contents = self
            .primaries
            .iter()
            .zip(&arrangement.primaries)
            .chain(self.fills.iter().zip(&arrangement.fills))
            .map(|(slot, placed)| (slot.section, placed.dims.content_height(slot.gap)));
        let reserve = match (&self.right, &arrangement.right) {
            (Some(column), Some(placed)) => self.frame.section_chrome() + placed.dims.content_height(column.slot.gap),
            _ => 0.0,
        };
        self.frame.stacked_height(contents, reserve)
    }

    /// Stack height with every zone at its reservation.
    pub fn reserved_height(&self, arrangement: &Arrangement) -> f64 {
        let contents = self
            .primaries
            .iter()
            .zip(&arrangement.primaries)
            .chain(self.fills.iter().zip(&arrangement.fills))
            .map(|(slot, placed)| (slot.section, placed.reserved));
        let reserve = arrangement
            .right
            .map_or(0.0, |placed| self.frame.section_chrome() + placed.reserved);
        self.frame.stacked_height(contents, reserve)
    }

    /// Weighted geometric mean of the primary widths (the fill zone's when
    /// there is no primary), times the square root of the used height
    /// fraction, times the row penalty.
    pub fn score(&self, arrangement: &Arrangement) -> f64 {
        let competing: SmallVec<[(&Slot<'_>, &Placed); 2]> = if self.primaries.is_empty() {
            self.fills.iter().zip(&arrangement.fills).collect()
        } else {
            self.primaries.iter().zip(&arrangement.primaries).collect()
        };
        let mut log_width = 0.0;
        let mut weight = 0.0;
        for (slot, placed) in &competing {
            log_width += slot.weight() * (placed.dims.width.max(1) as f64).ln();
            weight += slot.weight();
        }
        let mean = if weight > 0.0 { (log_width / weight).exp() } else { 0.0 };

        let avail = self.frame.avail_height;
        let fraction = if avail > 0.0 {
            (arrangement.total_height / avail).clamp(0.0, 1.0)
        } else {
            0.0
        };

        let extra_rows: u32 = arrangement.primaries.iter().map(|p| p.dims.rows - 1).sum();
        mean * fraction.sqrt() * self.frame.params.row_penalty.powi(extra_rows as i32)
    }

    /// Final dimensions of every active zone.
    pub fn compose(&self, arrangement: &Arrangement) -> FxHashMap<&'a ZoneId, ZoneDimensions> {
        let mut dims = FxHashMap::default();
        let stacked = self
            .primaries
            .iter()
            .zip(&arrangement.primaries)
            .chain(self.fills.iter().zip(&arrangement.fills));
        for (slot, placed) in stacked {
            let zone: &'a ZoneSpec = slot.zone;
            dims.insert(&zone.id, placed.dims);
        }
        if let (Some(column), Some(placed)) = (&self.right, &arrangement.right) {
            let zone: &'a ZoneSpec = column.slot.zone;
            dims.insert(&zone.id, placed.dims);
        }
        dims
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{ContainerSize, LayoutConfig, ZoneSpec};
    use smallvec::smallvec;

    fn table() -> LayoutConfig {
        LayoutConfig::builder()
            .top(ZoneSpec::new("hand", 7))
            .bottom_left(ZoneSpec::new("battlefield", 5).fill().with_max_rows(1))
            .bottom_left(ZoneSpec::new("sideboard", 12))
            .section_padding(12.0, 20.0, 12.0)
            .section_gap(1.0)
            .build()
            .unwrap()
    }

    fn widths(placed: &[Placed]) -> Vec<(u32, u32)> {
        placed.iter().map(|p| (p.dims.width, p.dims.rows)).collect()
    }

    #[test]
    fn test_classify_roles() {
        let config = table();
        let frame = Frame::new(ContainerSize::new(1000.0, 600.0), &config).unwrap();
        let roles = Roles::classify(&frame);

        assert_eq!(roles.strategy(), Strategy::DualPrimary);
        assert_eq!(roles.primaries[0].zone.id.as_str(), "hand");
        assert_eq!(roles.primaries[1].zone.id.as_str(), "sideboard");
        assert_eq!(roles.fills[0].zone.id.as_str(), "battlefield");
        assert!(roles.right.is_none());
    }

    #[test]
    fn test_first_fill_promoted_without_primaries() {
        let config = LayoutConfig::builder()
            .top(ZoneSpec::new("graveyard", 3).fill())
            .bottom_left(ZoneSpec::new("exile", 2).fill())
            .build()
            .unwrap();
        let frame = Frame::new(ContainerSize::new(800.0, 600.0), &config).unwrap();
        let roles = Roles::classify(&frame);

        assert_eq!(roles.strategy(), Strategy::SinglePrimary);
        assert_eq!(roles.primaries[0].zone.id.as_str(), "graveyard");
        assert_eq!(roles.fills.len(), 1);
    }

    #[test]
    fn test_third_primary_sized_as_fill() {
        let config = LayoutConfig::builder()
            .top(ZoneSpec::new("hand", 7))
            .bottom_left(ZoneSpec::new("sideboard", 12))
            .bottom_left(ZoneSpec::new("maybeboard", 4))
            .build()
            .unwrap();
        let frame = Frame::new(ContainerSize::new(800.0, 600.0), &config).unwrap();
        let roles = Roles::classify(&frame);

        assert_eq!(roles.primaries.len(), 2);
        assert_eq!(roles.fills[0].zone.id.as_str(), "maybeboard");
    }

    #[test]
    fn test_level_width_follows_weight() {
        let config = LayoutConfig::builder()
            .top(ZoneSpec::new("hand", 7).with_weight(2.0))
            .bottom_left(ZoneSpec::new("sideboard", 12))
            .build()
            .unwrap();
        let frame = Frame::new(ContainerSize::new(1000.0, 600.0), &config).unwrap();
        let roles = Roles::classify(&frame);
        let stack = Stack::new(frame, &roles, 0, None);
        let (hand, sideboard) = (&stack.primaries[0], &stack.primaries[1]);

        assert_eq!(stack.level_width(hand, 100), 100);
        assert_eq!(stack.level_width(sideboard, 100), 50);
        // Both ends clamp to the zone's own range.
        assert_eq!(stack.level_width(sideboard, 10), 40);
        assert_eq!(stack.level_width(hand, 1000), 240);
    }

    #[test]
    fn test_fill_bounds() {
        let config = table();
        let frame = Frame::new(ContainerSize::new(1000.0, 600.0), &config).unwrap();
        let roles = Roles::classify(&frame);
        let stack = Stack::new(frame, &roles, 0, None);
        let fill = &stack.fills[0];

        assert_eq!(stack.fill_bounds(fill, Some(101)), (51, 101));
        // The global minimum wins over half the primary...
        assert_eq!(stack.fill_bounds(fill, Some(60)), (40, 60));
        // ...but never exceeds the primary itself.
        assert_eq!(stack.fill_bounds(fill, Some(30)), (30, 30));
        assert_eq!(stack.fill_bounds(fill, None), (40, 240));
    }

    #[test]
    fn test_highest_fitting_level() {
        let config = table();
        let frame = Frame::new(ContainerSize::new(1000.0, 600.0), &config).unwrap();
        let roles = Roles::classify(&frame);
        let stack = Stack::new(frame, &roles, 0, None);

        // One hand row, two sideboard rows, battlefield at its 51px floor.
        match stack.arrange(101, false) {
            Outcome::Feasible(arrangement) => {
                assert_eq!(widths(&arrangement.primaries), vec![(101, 1), (101, 2)]);
                assert_eq!(widths(&arrangement.fills), vec![(51, 1)]);
                assert_eq!(arrangement.reserved_height, 598.0);
            }
            _ => panic!("expected level 101 to fit"),
        }
        assert!(matches!(stack.arrange(102, false), Outcome::Overflow(_)));

        let mut stats = SolveStats::new();
        let mut tracker = Tracker::new(&mut stats);
        stack.explore(&mut tracker);
        let (choice, fallback) = tracker.finish().unwrap();
        assert!(!fallback);
        assert_eq!(choice.arrangement.level, 101);
        assert!(stats.feasible > 0);
        assert!(stats.overflowing > 0);
    }

    #[test]
    fn test_capped_primary_reserves_level_height() {
        let config = LayoutConfig::builder()
            .top(ZoneSpec::new("hand", 12).with_max_rows(1))
            .bottom_left(ZoneSpec::new("sideboard", 4))
            .build()
            .unwrap();
        let frame = Frame::new(ContainerSize::new(600.0, 900.0), &config).unwrap();
        let roles = Roles::classify(&frame);
        let stack = Stack::new(frame, &roles, 0, None);

        // Twelve cards in one 584px row are at most 43px wide.
        let Outcome::Feasible(arrangement) = stack.arrange(100, false) else {
            panic!("expected level 100 to fit");
        };
        let hand = arrangement.primaries[0];
        assert_eq!((hand.dims.width, hand.dims.rows), (43, 1));
        assert_eq!(hand.reserved, 140.0);
        assert_eq!(arrangement.reserved_height, 316.0);
        assert!(arrangement.total_height < arrangement.reserved_height);
    }

    #[test]
    fn test_fill_that_cannot_fit_rejects_level() {
        let config = LayoutConfig::builder()
            .top(ZoneSpec::new("hand", 3))
            .bottom_left(ZoneSpec::new("tokens", 30).fill().with_max_rows(1))
            .build()
            .unwrap();
        let frame = Frame::new(ContainerSize::new(600.0, 800.0), &config).unwrap();
        let roles = Roles::classify(&frame);
        let stack = Stack::new(frame, &roles, 0, None);

        // 30 cards at the 40px minimum never fit one 584px row.
        assert!(matches!(stack.arrange(1, false), Outcome::Rejected));
        let squeezed = match stack.arrange(1, true) {
            Outcome::Feasible(arrangement) | Outcome::Overflow(arrangement) => arrangement,
            Outcome::Rejected => panic!("lenient arrangement rejected"),
        };
        assert_eq!(squeezed.fills[0].dims.rows, 1);
        assert!(squeezed.fills[0].dims.width < 40);
    }

    #[test]
    fn test_fill_floor_tracks_level() {
        let config = LayoutConfig::builder()
            .top(ZoneSpec::new("hand", 2))
            .bottom_left(ZoneSpec::new("battlefield", 20).fill().with_max_rows(1))
            .build()
            .unwrap();
        let frame = Frame::new(ContainerSize::new(1000.0, 900.0), &config).unwrap();
        let roles = Roles::classify(&frame);
        let stack = Stack::new(frame, &roles, 0, None);

        // Twenty 43px cards fit the 984px row; 44px cards do not.
        let Outcome::Feasible(arrangement) = stack.arrange(86, false) else {
            panic!("expected level 86 to fit");
        };
        assert_eq!(widths(&arrangement.primaries), vec![(86, 1)]);
        assert_eq!(widths(&arrangement.fills), vec![(43, 1)]);
        assert!(matches!(stack.arrange(87, false), Outcome::Rejected));
    }

    #[test]
    fn test_tracker_ranks_level_then_steps() {
        let mut stats = SolveStats::new();
        let mut tracker = Tracker::new(&mut stats);
        let arrangement = |level, steps| Arrangement {
            level,
            steps,
            primaries: SmallVec::new(),
            fills: SmallVec::new(),
            right: None,
            total_height: 0.0,
            reserved_height: 0.0,
        };

        tracker.offer_feasible(0, arrangement(80, 2), 50.0);
        tracker.offer_feasible(1, arrangement(81, 0), 10.0);
        tracker.offer_feasible(2, arrangement(81, 0), 10.0);
        tracker.offer_fallback(3, arrangement(1, 0), 5.0);

        let (choice, fallback) = tracker.finish().unwrap();
        assert!(!fallback);
        // The first option wins a tie.
        assert_eq!(choice.option, 1);
        assert!(!stats.used_fallback);
    }

    #[test]
    fn test_row_penalty_favours_fewer_rows() {
        let config = LayoutConfig::builder()
            .top(ZoneSpec::new("hand", 8))
            .bottom_left(ZoneSpec::new("battlefield", 1).fill())
            .build()
            .unwrap();
        let frame = Frame::new(ContainerSize::new(1000.0, 600.0), &config).unwrap();
        let roles = Roles::classify(&frame);
        let stack = Stack::new(frame, &roles, 0, None);

        let arrangement = |rows: u32, width: u32| Arrangement {
            level: width,
            steps: 0,
            primaries: smallvec![Placed::exact(ZoneDimensions::grid(width, 1.4, 8, rows), 6.0)],
            fills: smallvec![Placed::exact(ZoneDimensions::grid(40, 1.4, 1, 1), 6.0)],
            right: None,
            total_height: 500.0,
            reserved_height: 500.0,
        };

        // Same height used: a 5% wider card does not pay for a second row.
        let one_row = stack.score(&arrangement(1, 100));
        let two_rows = stack.score(&arrangement(2, 105));
        assert!(one_row > two_rows);

        // A substantially larger card does.
        let two_rows = stack.score(&arrangement(2, 120));
        assert!(two_rows > one_row);
    }
}

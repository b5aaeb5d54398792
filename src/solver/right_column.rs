//! Right-column sizing.
//!
//! The right column (a command zone, for instance) uses one column, or two
//! when it holds at least two cards. Each option claims a fixed horizontal
//! strip from the bottom-left stack: the width its cards would take at the
//! widest size the column's share allows. The cards themselves follow the
//! search level like every other zone.

use smallvec::SmallVec;

use crate::core::ZoneDimensions;

use super::fit::{grid_height, horizontal_cap};
use super::frame::{Frame, Slot};
use super::search::Placed;

/// One column-count option for the right column.
#[derive(Clone, Copy, Debug)]
pub(crate) struct RightColumn<'a> {
    pub slot: Slot<'a>,
    pub rows: u32,
    /// Widest card that fits the column's share of the width.
    pub cap: u32,
    /// Outer width claimed from the bottom-left stack, padding included.
    pub strip: f64,
}

impl<'a> RightColumn<'a> {
    fn new(frame: &Frame<'a>, slot: Slot<'a>, columns: u32) -> Self {
        let rows = slot.count().div_ceil(columns);
        let cap = horizontal_cap(slot.count(), rows, frame.right_share_width(), slot.gap)
            .min(slot.max_width)
            .max(1);
        let widest = ZoneDimensions::grid(cap, frame.aspect_ratio(), slot.count(), rows);
        Self {
            slot,
            rows,
            cap,
            strip: widest.content_width(slot.gap) + 2.0 * frame.params.section_pad_h,
        }
    }

    pub fn columns(&self) -> u32 {
        self.slot.count().div_ceil(self.rows)
    }

    /// Would cards of `width` overflow the column's share?
    pub fn is_capped(&self, width: u32) -> bool {
        width > self.cap
    }

    /// Cards of `width`, held under the cap, reserving the height of
    /// uncapped cards.
    pub fn place(&self, width: u32, aspect_ratio: f64) -> Placed {
        let slot = &self.slot;
        Placed {
            dims: ZoneDimensions::grid(width.min(self.cap), aspect_ratio, slot.count(), self.rows),
            reserved: grid_height(self.rows, width, slot.gap, aspect_ratio),
        }
    }
}

/// The column counts the right column may use, one column first.
pub(crate) fn right_options<'a>(frame: &Frame<'a>, slot: Slot<'a>) -> SmallVec<[RightColumn<'a>; 2]> {
    let mut options: SmallVec<[RightColumn<'a>; 2]> = [1, 2]
        .into_iter()
        .filter(|&columns| columns == 1 || slot.count() >= 2)
        .filter(|&columns| slot.count().div_ceil(columns) <= slot.max_rows)
        .map(|columns| RightColumn::new(frame, slot, columns))
        .collect();

    if options.is_empty() {
        // The row limit rules out one and two columns.
        let columns = slot.count().div_ceil(slot.max_rows);
        options.push(RightColumn::new(frame, slot, columns));
    }
    options
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{ContainerSize, LayoutConfig, Section, ZoneSpec};

    fn config(command: ZoneSpec) -> LayoutConfig {
        LayoutConfig::builder()
            .top(ZoneSpec::new("hand", 5))
            .bottom_right(command)
            .build()
            .unwrap()
    }

    fn command<'a>(frame: &Frame<'a>, config: &'a LayoutConfig) -> Slot<'a> {
        Slot::new(frame, Section::BottomRight, config.zone("command").unwrap())
    }

    #[test]
    fn test_single_card_keeps_one_column() {
        let config = config(ZoneSpec::new("command", 1));
        let frame = Frame::new(ContainerSize::new(1200.0, 500.0), &config).unwrap();

        let options = right_options(&frame, command(&frame, &config));
        assert_eq!(options.len(), 1);
        assert_eq!(options[0].columns(), 1);
        assert_eq!(options[0].rows, 1);
    }

    #[test]
    fn test_one_and_two_columns() {
        let config = config(ZoneSpec::new("command", 4));
        let frame = Frame::new(ContainerSize::new(1200.0, 500.0), &config).unwrap();

        // 300px share less 16px padding.
        let options = right_options(&frame, command(&frame, &config));
        assert_eq!(options.len(), 2);
        let (one, two) = (options[0], options[1]);
        assert_eq!((one.columns(), one.rows), (1, 4));
        assert_eq!((two.columns(), two.rows), (2, 2));

        // One column is held by the 240px maximum, two by the share.
        assert_eq!(one.cap, 240);
        assert_eq!(one.strip, 256.0);
        assert_eq!(two.cap, 139);
        assert_eq!(two.strip, 300.0);
    }

    #[test]
    fn test_row_limit_forces_more_columns() {
        let config = config(ZoneSpec::new("command", 5).with_max_rows(2));
        let frame = Frame::new(ContainerSize::new(1200.0, 500.0), &config).unwrap();

        let options = right_options(&frame, command(&frame, &config));
        assert_eq!(options.len(), 1);
        assert_eq!(options[0].rows, 2);
        assert_eq!(options[0].columns(), 3);
    }

    #[test]
    fn test_capped_cards_reserve_their_level_height() {
        let config = config(ZoneSpec::new("command", 4));
        let frame = Frame::new(ContainerSize::new(1200.0, 500.0), &config).unwrap();
        let two = right_options(&frame, command(&frame, &config))[1];

        assert!(!two.is_capped(120));
        let placed = two.place(120, 1.4);
        assert_eq!(placed.dims.width, 120);
        assert_eq!(placed.reserved, placed.dims.content_height(6.0));

        assert!(two.is_capped(200));
        let placed = two.place(200, 1.4);
        assert_eq!(placed.dims.width, 139);
        assert_eq!(placed.reserved, 2.0 * 280.0 + 6.0);
    }
}

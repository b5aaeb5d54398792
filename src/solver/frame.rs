//! Container geometry shared by every solving strategy.
//!
//! `top` sections span the available width. Below them, `bottomLeft`
//! sections stack in the left column and the right-column section sits
//! beside them. Every active zone is one section with horizontal padding
//! on both sides, top and bottom padding, and `section_gap` between
//! neighbouring sections.

use crate::core::{ContainerSize, LayoutConfig, LayoutParams, Section, ZoneSpec};

/// Space left for sections once padding and the fixed header are removed.
#[derive(Clone, Copy, Debug)]
pub(crate) struct Frame<'a> {
    pub config: &'a LayoutConfig,
    pub params: &'a LayoutParams,
    pub avail_width: f64,
    pub avail_height: f64,
}

impl<'a> Frame<'a> {
    /// `None` when the container leaves no room for even one section.
    pub fn new(container: ContainerSize, config: &'a LayoutConfig) -> Option<Self> {
        let params = config.params();
        let avail_width = container.width - 2.0 * params.outer_padding;
        let avail_height = container.height - params.fixed_height - 2.0 * params.outer_padding;
        let frame = Self {
            config,
            params,
            avail_width,
            avail_height,
        };

        let usable = avail_width.is_finite()
            && avail_height.is_finite()
            && frame.full_inner_width() > 0.0
            && avail_height - frame.section_chrome() > 0.0;
        usable.then_some(frame)
    }

    /// Vertical padding of one section.
    pub fn section_chrome(&self) -> f64 {
        self.params.section_pad_top + self.params.section_pad_bottom
    }

    pub fn aspect_ratio(&self) -> f64 {
        self.params.aspect_ratio
    }

    /// Card area width of a full-width section.
    pub fn full_inner_width(&self) -> f64 {
        self.avail_width - 2.0 * self.params.section_pad_h
    }

    /// Card area width of a bottom-left section when the right column
    /// claims `strip` pixels (its padding included).
    pub fn left_inner_width(&self, strip: f64) -> f64 {
        if strip > 0.0 {
            self.full_inner_width() - strip - self.params.section_gap
        } else {
            self.full_inner_width()
        }
    }

    /// Card area width the right column may use at most.
    pub fn right_share_width(&self) -> f64 {
        self.avail_width * self.params.right_column_fraction - 2.0 * self.params.section_pad_h
    }

    /// Height of a top block made of sections with the given content heights.
    pub fn block_height(&self, contents: impl IntoIterator<Item = f64>) -> f64 {
        let mut height = 0.0;
        let mut sections = 0;
        for content in contents {
            height += self.section_chrome() + content;
            sections += 1;
        }
        if sections > 1 {
            height += (sections - 1) as f64 * self.params.section_gap;
        }
        height
    }

    /// Total height of the stacked sections.
    ///
    /// `reserve` is the right-column section height, which the bottom
    /// block must accommodate next to the bottom-left stack.
    pub fn stacked_height(&self, contents: impl IntoIterator<Item = (Section, f64)>, reserve: f64) -> f64 {
        let mut top = Vec::new();
        let mut left = Vec::new();
        for (section, content) in contents {
            match section {
                Section::Top => top.push(content),
                Section::BottomLeft => left.push(content),
                Section::BottomRight => {}
            }
        }
        let top = self.block_height(top);
        let bottom = self.block_height(left).max(reserve);
        let between = if top > 0.0 && bottom > 0.0 {
            self.params.section_gap
        } else {
            0.0
        };
        top + between + bottom
    }
}

/// An active zone as the solver sees it.
#[derive(Clone, Copy, Debug)]
pub(crate) struct Slot<'a> {
    pub zone: &'a ZoneSpec,
    pub section: Section,
    pub gap: f64,
    pub min_width: u32,
    pub max_width: u32,
    pub max_rows: u32,
    /// Card area width of the zone's section.
    pub inner_width: f64,
}

impl<'a> Slot<'a> {
    pub fn new(frame: &Frame<'a>, section: Section, zone: &'a ZoneSpec) -> Self {
        let max_width = frame.config.max_width_of(zone);
        Self {
            zone,
            section,
            gap: frame.config.gap_of(zone),
            min_width: frame.params.min_card_width.min(max_width),
            max_width,
            max_rows: zone.max_rows.unwrap_or(u32::MAX).min(zone.count).max(1),
            inner_width: frame.full_inner_width(),
        }
    }

    pub fn count(&self) -> u32 {
        self.zone.count
    }

    pub fn weight(&self) -> f64 {
        self.zone.weight
    }
}

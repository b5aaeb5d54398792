//! Layout configuration types.
//!
//! A render pass describes its screen by providing:
//! - `ZoneSpec`: One named region holding `count` identical cards
//! - `Placement`: Which section (top, bottom-left, right column) each zone occupies
//! - `LayoutConfig`: Zones, placement and the global sizing parameters
//!
//! A `LayoutConfig` can only be obtained through `LayoutConfigBuilder::build`
//! or deserialization, both of which validate it. The solver can therefore
//! assume every zone is placed exactly once.

use std::borrow::Borrow;
use std::collections::BTreeMap;

use rustc_hash::{FxHashMap, FxHashSet};
use serde::{Deserialize, Serialize};

use super::error::ConfigError;

/// Zone identifier, e.g. `"hand"` or `"battlefield"`.
///
/// Borrows as `str` so result maps can be queried with plain string slices.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ZoneId(String);

impl ZoneId {
    /// Create a new zone ID.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the raw name.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for ZoneId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ZoneId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl std::fmt::Display for ZoneId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// How a zone competes for vertical space.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    /// Row count and card width are first-class search variables.
    #[default]
    Primary,
    /// Sized from leftover space after primaries are fixed, never wider
    /// than the narrowest primary.
    Fill,
}

/// Spatial role of a zone on screen.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Section {
    /// Full-width sections stacked at the top.
    Top,
    /// Sections stacked below the top, left of the right column.
    BottomLeft,
    /// The independent right column (command zone and similar).
    BottomRight,
}

/// Configuration for a single zone.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ZoneSpec {
    /// Unique identifier for this zone.
    pub id: ZoneId,

    /// Number of cards shown in the zone.
    #[serde(default)]
    pub count: u32,

    /// Gap between cards in pixels. `None` uses `LayoutConfig::default_gap`.
    #[serde(default)]
    pub gap: Option<f64>,

    /// Per-zone card width cap. `None` uses the global maximum.
    #[serde(default)]
    pub max_card_width: Option<u32>,

    /// Maximum number of card rows. `None` for unlimited.
    #[serde(default)]
    pub max_rows: Option<u32>,

    #[serde(default)]
    pub priority: Priority,

    /// Relative importance among primary zones when scoring.
    #[serde(default = "default_weight")]
    pub weight: f64,
}

fn default_weight() -> f64 {
    1.0
}

impl ZoneSpec {
    /// Create a primary zone holding `count` cards.
    pub fn new(id: impl Into<String>, count: u32) -> Self {
        Self {
            id: ZoneId::new(id),
            count,
            gap: None,
            max_card_width: None,
            max_rows: None,
            priority: Priority::Primary,
            weight: default_weight(),
        }
    }

    /// Mark the zone as a fill zone.
    #[must_use]
    pub fn fill(mut self) -> Self {
        self.priority = Priority::Fill;
        self
    }

    /// Set the gap between cards.
    #[must_use]
    pub fn with_gap(mut self, gap: f64) -> Self {
        self.gap = Some(gap);
        self
    }

    /// Set the per-zone card width cap.
    #[must_use]
    pub fn with_max_card_width(mut self, width: u32) -> Self {
        self.max_card_width = Some(width);
        self
    }

    /// Limit the number of card rows.
    #[must_use]
    pub fn with_max_rows(mut self, rows: u32) -> Self {
        self.max_rows = Some(rows);
        self
    }

    /// Set the scoring weight.
    #[must_use]
    pub fn with_weight(mut self, weight: f64) -> Self {
        self.weight = weight;
        self
    }

    /// Does this zone have any cards to show?
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.count > 0
    }
}

/// Ordered zone ids per section.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Placement {
    #[serde(default)]
    pub top: Vec<ZoneId>,
    #[serde(default)]
    pub bottom_left: Vec<ZoneId>,
    #[serde(default)]
    pub bottom_right: Vec<ZoneId>,
}

impl Placement {
    /// Iterate `(section, id)` pairs in placement order.
    pub fn iter(&self) -> impl Iterator<Item = (Section, &ZoneId)> + '_ {
        let top = self.top.iter().map(|id| (Section::Top, id));
        let left = self.bottom_left.iter().map(|id| (Section::BottomLeft, id));
        let right = self.bottom_right.iter().map(|id| (Section::BottomRight, id));
        top.chain(left).chain(right)
    }
}

/// Global sizing parameters. All lengths are pixels.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LayoutParams {
    /// Height reserved above all sections (toolbars and similar).
    pub fixed_height: f64,
    /// Padding around the whole container.
    pub outer_padding: f64,
    /// Horizontal padding on each side of a section.
    pub section_pad_h: f64,
    pub section_pad_top: f64,
    pub section_pad_bottom: f64,
    /// Gap between adjacent sections, vertically and between columns.
    pub section_gap: f64,
    /// Card gap for zones that don't set their own.
    pub default_gap: f64,
    pub min_card_width: u32,
    pub max_card_width: u32,
    /// Card height divided by card width.
    pub aspect_ratio: f64,
    /// Share of the available width the right column may claim.
    pub right_column_fraction: f64,
    /// Fill zones never shrink below this fraction of the narrowest primary.
    pub fill_floor_ratio: f64,
    /// Score multiplier applied once per extra primary row.
    pub row_penalty: f64,
}

impl Default for LayoutParams {
    fn default() -> Self {
        Self {
            fixed_height: 0.0,
            outer_padding: 0.0,
            section_pad_h: 8.0,
            section_pad_top: 8.0,
            section_pad_bottom: 8.0,
            section_gap: 4.0,
            default_gap: 6.0,
            min_card_width: 40,
            max_card_width: 240,
            aspect_ratio: 1.4,
            right_column_fraction: 0.25,
            fill_floor_ratio: 0.5,
            row_penalty: 0.90,
        }
    }
}

/// Complete, validated layout configuration.
///
/// Built once per render pass from the current card counts and handed to
/// `compute_layout`; the solver never retains it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawLayoutConfig", into = "RawLayoutConfig")]
pub struct LayoutConfig {
    zones: Vec<ZoneSpec>,
    placement: Placement,
    params: LayoutParams,
    /// Section of each zone, indexed like `zones`.
    sections: Vec<Section>,
    index: FxHashMap<ZoneId, usize>,
}

impl LayoutConfig {
    /// Start building a configuration.
    pub fn builder() -> LayoutConfigBuilder {
        LayoutConfigBuilder::default()
    }

    /// All zones in declaration order.
    #[must_use]
    pub fn zones(&self) -> &[ZoneSpec] {
        &self.zones
    }

    #[must_use]
    pub fn placement(&self) -> &Placement {
        &self.placement
    }

    #[must_use]
    pub fn params(&self) -> &LayoutParams {
        &self.params
    }

    /// Get a zone by ID.
    #[must_use]
    pub fn zone(&self, id: &str) -> Option<&ZoneSpec> {
        self.index.get(id).map(|&i| &self.zones[i])
    }

    /// Section a zone was placed in.
    #[must_use]
    pub fn section_of(&self, id: &str) -> Option<Section> {
        self.index.get(id).map(|&i| self.sections[i])
    }

    /// Zones in placement order (top, bottom-left, right column) with their section.
    pub fn placed_zones(&self) -> impl Iterator<Item = (Section, &ZoneSpec)> + '_ {
        self.placement
            .iter()
            .filter_map(move |(section, id)| self.index.get(id).map(|&i| (section, &self.zones[i])))
    }

    /// Effective card gap of a zone.
    #[must_use]
    pub fn gap_of(&self, zone: &ZoneSpec) -> f64 {
        zone.gap.unwrap_or(self.params.default_gap)
    }

    /// Effective card width cap of a zone.
    #[must_use]
    pub fn max_width_of(&self, zone: &ZoneSpec) -> u32 {
        zone.max_card_width
            .map_or(self.params.max_card_width, |w| w.min(self.params.max_card_width))
    }

    /// Return a copy with new card counts, keeping placement and parameters.
    ///
    /// Counts for unknown ids are ignored.
    #[must_use]
    pub fn with_counts<'a>(&self, counts: impl IntoIterator<Item = (&'a str, u32)>) -> Self {
        let mut config = self.clone();
        for (id, count) in counts {
            if let Some(&i) = config.index.get(id) {
                config.zones[i].count = count;
            }
        }
        config
    }
}

/// Builder for `LayoutConfig`.
#[derive(Clone, Debug, Default)]
pub struct LayoutConfigBuilder {
    zones: Vec<ZoneSpec>,
    placement: Placement,
    params: LayoutParams,
}

impl LayoutConfigBuilder {
    /// Add a zone to the top section.
    #[must_use]
    pub fn top(self, zone: ZoneSpec) -> Self {
        self.place(Section::Top, zone)
    }

    /// Add a zone to the bottom-left stack.
    #[must_use]
    pub fn bottom_left(self, zone: ZoneSpec) -> Self {
        self.place(Section::BottomLeft, zone)
    }

    /// Put a zone in the right column.
    #[must_use]
    pub fn bottom_right(self, zone: ZoneSpec) -> Self {
        self.place(Section::BottomRight, zone)
    }

    /// Add a zone to a section.
    #[must_use]
    pub fn place(mut self, section: Section, zone: ZoneSpec) -> Self {
        let list = match section {
            Section::Top => &mut self.placement.top,
            Section::BottomLeft => &mut self.placement.bottom_left,
            Section::BottomRight => &mut self.placement.bottom_right,
        };
        list.push(zone.id.clone());
        self.zones.push(zone);
        self
    }

    /// Replace all global parameters.
    #[must_use]
    pub fn params(mut self, params: LayoutParams) -> Self {
        self.params = params;
        self
    }

    /// Set the fixed reserved height above all sections.
    #[must_use]
    pub fn fixed_height(mut self, height: f64) -> Self {
        self.params.fixed_height = height;
        self
    }

    #[must_use]
    pub fn outer_padding(mut self, padding: f64) -> Self {
        self.params.outer_padding = padding;
        self
    }

    /// Set section padding: horizontal, top, bottom.
    #[must_use]
    pub fn section_padding(mut self, horizontal: f64, top: f64, bottom: f64) -> Self {
        self.params.section_pad_h = horizontal;
        self.params.section_pad_top = top;
        self.params.section_pad_bottom = bottom;
        self
    }

    #[must_use]
    pub fn section_gap(mut self, gap: f64) -> Self {
        self.params.section_gap = gap;
        self
    }

    #[must_use]
    pub fn default_gap(mut self, gap: f64) -> Self {
        self.params.default_gap = gap;
        self
    }

    /// Set the global card width range.
    #[must_use]
    pub fn card_width_range(mut self, min: u32, max: u32) -> Self {
        self.params.min_card_width = min;
        self.params.max_card_width = max;
        self
    }

    #[must_use]
    pub fn aspect_ratio(mut self, ratio: f64) -> Self {
        self.params.aspect_ratio = ratio;
        self
    }

    #[must_use]
    pub fn right_column_fraction(mut self, fraction: f64) -> Self {
        self.params.right_column_fraction = fraction;
        self
    }

    /// Validate and build the configuration.
    pub fn build(self) -> Result<LayoutConfig, ConfigError> {
        LayoutConfig::validate(self.zones, self.placement, self.params)
    }
}

impl LayoutConfig {
    fn validate(
        zones: Vec<ZoneSpec>,
        placement: Placement,
        params: LayoutParams,
    ) -> Result<Self, ConfigError> {
        let mut index = FxHashMap::default();
        for (i, zone) in zones.iter().enumerate() {
            if index.insert(zone.id.clone(), i).is_some() {
                return Err(ConfigError::DuplicateZone(zone.id.clone()));
            }
            if !(zone.weight.is_finite() && zone.weight > 0.0) {
                return Err(ConfigError::InvalidWeight {
                    zone: zone.id.clone(),
                    weight: zone.weight,
                });
            }
            if zone.max_rows == Some(0) {
                return Err(ConfigError::InvalidMaxRows(zone.id.clone()));
            }
        }

        if placement.bottom_right.len() > 1 {
            return Err(ConfigError::MultipleRightColumnZones(placement.bottom_right.len()));
        }

        let mut sections: Vec<Option<Section>> = vec![None; zones.len()];
        let mut seen = FxHashSet::default();
        for (section, id) in placement.iter() {
            let &i = index
                .get(id)
                .ok_or_else(|| ConfigError::UnknownZone(id.clone()))?;
            if !seen.insert(id) {
                return Err(ConfigError::ZonePlacedTwice(id.clone()));
            }
            sections[i] = Some(section);
        }
        let sections = sections
            .into_iter()
            .zip(&zones)
            .map(|(section, zone)| section.ok_or_else(|| ConfigError::UnplacedZone(zone.id.clone())))
            .collect::<Result<Vec<_>, _>>()?;

        if params.min_card_width == 0 || params.min_card_width > params.max_card_width {
            return Err(ConfigError::InvalidCardWidthRange {
                min: params.min_card_width,
                max: params.max_card_width,
            });
        }
        if !(params.aspect_ratio.is_finite() && params.aspect_ratio > 0.0) {
            return Err(ConfigError::InvalidAspectRatio(params.aspect_ratio));
        }
        for (name, value) in [
            ("rightColumnFraction", params.right_column_fraction),
            ("fillFloorRatio", params.fill_floor_ratio),
            ("rowPenalty", params.row_penalty),
        ] {
            if !(value > 0.0 && value <= 1.0) {
                return Err(ConfigError::InvalidFraction { name, value });
            }
        }

        Ok(Self {
            zones,
            placement,
            params,
            sections,
            index,
        })
    }
}

/// Wire shape of a layout configuration: zones keyed by id, and the
/// placement under `layout`, next to the flattened global parameters.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawLayoutConfig {
    zones: BTreeMap<ZoneId, RawZone>,
    layout: Placement,
    #[serde(flatten)]
    params: LayoutParams,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawZone {
    #[serde(default)]
    count: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    gap: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    max_card_width: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    max_rows: Option<u32>,
    #[serde(default)]
    priority: Priority,
    #[serde(default = "default_weight")]
    weight: f64,
}

impl TryFrom<RawLayoutConfig> for LayoutConfig {
    type Error = ConfigError;

    fn try_from(raw: RawLayoutConfig) -> Result<Self, Self::Error> {
        let zones = raw
            .zones
            .into_iter()
            .map(|(id, z)| ZoneSpec {
                id,
                count: z.count,
                gap: z.gap,
                max_card_width: z.max_card_width,
                max_rows: z.max_rows,
                priority: z.priority,
                weight: z.weight,
            })
            .collect();
        Self::validate(zones, raw.layout, raw.params)
    }
}

impl From<LayoutConfig> for RawLayoutConfig {
    fn from(config: LayoutConfig) -> Self {
        let zones = config
            .zones
            .into_iter()
            .map(|z| {
                let raw = RawZone {
                    count: z.count,
                    gap: z.gap,
                    max_card_width: z.max_card_width,
                    max_rows: z.max_rows,
                    priority: z.priority,
                    weight: z.weight,
                };
                (z.id, raw)
            })
            .collect();
        Self {
            zones,
            layout: config.placement,
            params: config.params,
        }
    }
}

//! Observer state machine and the iterator adapter built on it.

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::core::{ContainerSize, Layout, LayoutConfig};
use crate::solver::compute_layout;

use super::quantize::{GridQuantizer, SizeQuantizer};

/// Counters kept by a `LayoutObserver`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObserverStats {
    /// Measurements received.
    pub measurements: u64,

    /// Measurements dropped because the quantized size did not change.
    pub skipped: u64,

    /// Solver runs.
    pub solves: u64,

    /// Layouts published.
    pub publishes: u64,
}

/// Recomputes the layout as the container is resized.
///
/// Every measurement is solved from scratch, so the published layout
/// always reflects the latest size once a burst of resizes settles.
pub struct LayoutObserver {
    config: LayoutConfig,
    quantizer: Box<dyn SizeQuantizer>,
    size: Option<ContainerSize>,
    published: Option<Layout>,
    stats: ObserverStats,
}

impl LayoutObserver {
    /// Observer with the default 4px grid quantizer.
    #[must_use]
    pub fn new(config: LayoutConfig) -> Self {
        Self {
            config,
            quantizer: Box::new(GridQuantizer::default()),
            size: None,
            published: None,
            stats: ObserverStats::default(),
        }
    }

    #[must_use]
    pub fn with_quantizer<Q: SizeQuantizer + 'static>(mut self, quantizer: Q) -> Self {
        self.quantizer = Box::new(quantizer);
        self
    }

    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    /// Last published layout, `None` before the first measurement.
    pub fn current(&self) -> Option<&Layout> {
        self.published.as_ref()
    }

    /// Last quantized size seen.
    pub fn size(&self) -> Option<ContainerSize> {
        self.size
    }

    pub fn stats(&self) -> &ObserverStats {
        &self.stats
    }

    /// Record a container measurement.
    ///
    /// Returns the new layout when it differs from the published one.
    pub fn observe(&mut self, size: ContainerSize) -> Option<&Layout> {
        self.stats.measurements += 1;
        let size = self.quantizer.quantize(size);
        if self.size == Some(size) {
            self.stats.skipped += 1;
            return None;
        }
        self.size = Some(size);
        self.recompute()
    }

    /// Swap in a new config, re-solving at the last size if one is known.
    pub fn replace_config(&mut self, config: LayoutConfig) -> Option<&Layout> {
        if config == self.config {
            return None;
        }
        self.config = config;
        self.recompute()
    }

    fn recompute(&mut self) -> Option<&Layout> {
        let size = self.size?;
        self.stats.solves += 1;
        let layout = compute_layout(size.width, size.height, &self.config);

        if self.published.as_ref() == Some(&layout) {
            trace!(width = size.width, height = size.height, "layout unchanged");
            return None;
        }
        debug!(width = size.width, height = size.height, zones = layout.len(), "publishing layout");
        self.stats.publishes += 1;
        self.published = Some(layout);
        self.published.as_ref()
    }
}

/// Iterator over the distinct layouts produced by a sequence of sizes.
pub struct LayoutStream<I> {
    observer: LayoutObserver,
    sizes: I,
}

impl<I> LayoutStream<I> {
    pub fn observer(&self) -> &LayoutObserver {
        &self.observer
    }

    pub fn into_observer(self) -> LayoutObserver {
        self.observer
    }
}

impl<I: Iterator<Item = ContainerSize>> Iterator for LayoutStream<I> {
    type Item = Layout;

    fn next(&mut self) -> Option<Layout> {
        for size in self.sizes.by_ref() {
            if let Some(layout) = self.observer.observe(size) {
                return Some(layout.clone());
            }
        }
        None
    }
}

/// Layouts for `config` as the container goes through `sizes`, yielding
/// only when the result changes.
pub fn observe<I>(config: LayoutConfig, sizes: I) -> LayoutStream<I::IntoIter>
where
    I: IntoIterator<Item = ContainerSize>,
{
    LayoutStream {
        observer: LayoutObserver::new(config),
        sizes: sizes.into_iter(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ZoneSpec;
    use crate::observer::NoQuantization;

    fn config(hand: u32) -> LayoutConfig {
        LayoutConfig::builder()
            .top(ZoneSpec::new("hand", hand))
            .bottom_left(ZoneSpec::new("battlefield", 4).fill())
            .build()
            .unwrap()
    }

    #[test]
    fn test_first_measurement_publishes() {
        let mut observer = LayoutObserver::new(config(5));
        assert!(observer.current().is_none());

        let layout = observer.observe(ContainerSize::new(800.0, 600.0)).cloned();
        assert!(layout.is_some());
        assert_eq!(observer.current(), layout.as_ref());
        assert_eq!(observer.stats().publishes, 1);
    }

    #[test]
    fn test_same_quantized_size_skips_solve() {
        let mut observer = LayoutObserver::new(config(5));
        observer.observe(ContainerSize::new(800.0, 600.0));
        assert!(observer.observe(ContainerSize::new(801.5, 602.0)).is_none());

        let stats = observer.stats();
        assert_eq!(stats.measurements, 2);
        assert_eq!(stats.skipped, 1);
        assert_eq!(stats.solves, 1);
    }

    #[test]
    fn test_equal_result_not_republished() {
        let mut observer = LayoutObserver::new(config(5)).with_quantizer(NoQuantization);
        observer.observe(ContainerSize::new(0.0, 0.0));
        // Still degenerate: solved again, same defaults, nothing published.
        assert!(observer.observe(ContainerSize::new(1.0, 1.0)).is_none());
        assert_eq!(observer.stats().solves, 2);
        assert_eq!(observer.stats().publishes, 1);
    }

    #[test]
    fn test_replace_config() {
        let mut observer = LayoutObserver::new(config(5));
        // Nothing measured yet: no size to solve at.
        assert!(observer.replace_config(config(6)).is_none());
        assert_eq!(observer.stats().solves, 0);

        observer.observe(ContainerSize::new(800.0, 600.0));
        assert!(observer.replace_config(config(6)).is_none());
        assert!(observer.replace_config(config(0)).is_some());
        assert_eq!(observer.current().unwrap()["hand"].width, 0);
    }

    #[test]
    fn test_stream_yields_on_change_only() {
        let sizes = [
            ContainerSize::new(800.0, 600.0),
            ContainerSize::new(800.0, 600.0),
            ContainerSize::new(802.0, 601.0),
            ContainerSize::new(0.0, 0.0),
        ];
        let mut stream = observe(config(5), sizes);

        assert!(stream.next().is_some());
        let degenerate = stream.next().unwrap();
        assert_eq!(degenerate, Layout::defaults(&config(5)));
        assert!(stream.next().is_none());
        assert_eq!(stream.observer().stats().measurements, 4);
    }
}

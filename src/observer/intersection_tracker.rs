use crate::core::{ScrollDirection, SectionRegistry, StepEvent};
use crate::host::DocumentHost;

use super::{ObserverStrategy, StepSignals, StepTracker};

/// Visibility-ratio fallback used when no step library is loaded.
///
/// Geometry is read live on every pass, so there is nothing to recompute on
/// resize. Intersection callbacks carry no scroll direction; every signal
/// reports `ScrollDirection::Down`.
#[derive(Debug, Clone)]
pub struct IntersectionStepTracker {
    threshold: f64,
    root_margin_px: f64,
    visible: Vec<bool>,
}

impl IntersectionStepTracker {
    #[must_use]
    pub fn new(threshold: f64, root_margin_px: f64) -> Self {
        Self {
            threshold,
            root_margin_px,
            visible: Vec::new(),
        }
    }

    #[must_use]
    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    fn crosses_threshold(&self, ratio: f64) -> bool {
        ratio > 0.0 && ratio >= self.threshold
    }
}

impl StepTracker for IntersectionStepTracker {
    fn strategy(&self) -> ObserverStrategy {
        ObserverStrategy::Intersection
    }

    fn observe(&mut self, sections: &SectionRegistry, host: &dyn DocumentHost) -> StepSignals {
        self.visible.resize(sections.len(), false);
        let viewport = host.viewport();
        let band_top = -self.root_margin_px;
        let band_bottom = viewport.height + self.root_margin_px;

        let mut enters = StepSignals::new();
        let mut exits = StepSignals::new();
        for section in sections.iter() {
            let ratio = host
                .bounding_rect(section.element)
                .map_or(0.0, |rect| rect.visible_ratio(band_top, band_bottom));
            let now = self.crosses_threshold(ratio);
            if now == self.visible[section.index] {
                continue;
            }
            self.visible[section.index] = now;
            if now {
                enters.push(StepEvent::enter(
                    section.index,
                    section.element,
                    ScrollDirection::Down,
                ));
            } else {
                exits.push(StepEvent::exit(
                    section.index,
                    section.element,
                    ScrollDirection::Down,
                ));
            }
        }

        enters.extend(exits);
        enters
    }
}

//! Viewport step observer.
//!
//! Scans the document for section markers, assigns dense step indices in
//! document order and turns scroll geometry into raw enter/exit signals.
//! Two strategies produce the same `StepEvent` shape:
//!
//! - `OffsetStepTracker`: a section is entered when it crosses a horizontal
//!   trigger line placed at `offset_fraction` of the viewport height. Section
//!   boundaries are cached and recomputed on `resize`.
//! - `IntersectionStepTracker`: a section is entered when at least
//!   `intersection_threshold` of it is visible. Direction is always `Down`.

mod intersection_tracker;
mod offset_tracker;

pub use intersection_tracker::IntersectionStepTracker;
pub use offset_tracker::OffsetStepTracker;

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use tracing::{debug, info, warn};

use crate::core::{SectionRegistry, StepEvent};
use crate::error::{ScrollyError, ScrollyResult};
use crate::host::DocumentHost;

/// Signals produced by a single observation pass.
pub type StepSignals = SmallVec<[StepEvent; 4]>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ObserverStrategy {
    StepLibrary,
    Intersection,
    /// No tracking capability; scrollytelling is off.
    Disabled,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ObserverConfig {
    pub section_selector: String,
    /// Trigger line position as a fraction of viewport height.
    pub offset_fraction: f64,
    /// Minimum visible fraction for the intersection fallback.
    pub intersection_threshold: f64,
    /// Grows (or shrinks, when negative) the fallback's viewport band.
    pub root_margin_px: f64,
}

impl Default for ObserverConfig {
    fn default() -> Self {
        Self {
            section_selector: ".scroll-section".to_owned(),
            offset_fraction: 0.5,
            intersection_threshold: 0.5,
            root_margin_px: 0.0,
        }
    }
}

/// Strategy seam between the observer and a concrete tracking mechanism.
pub trait StepTracker {
    fn strategy(&self) -> ObserverStrategy;

    /// Compares current geometry with the previous pass and reports transitions.
    fn observe(&mut self, sections: &SectionRegistry, host: &dyn DocumentHost) -> StepSignals;

    fn supports_resize(&self) -> bool {
        false
    }

    /// Recomputes cached geometry after a layout change.
    fn resize(&mut self, _sections: &SectionRegistry, _host: &dyn DocumentHost) {}
}

pub struct StepObserver {
    config: ObserverConfig,
    sections: SectionRegistry,
    tracker: Box<dyn StepTracker>,
}

impl StepObserver {
    /// Scans for sections and selects a strategy by host capability.
    ///
    /// Fails when the host offers neither a step library nor intersection
    /// callbacks.
    pub fn setup(host: &dyn DocumentHost, config: &ObserverConfig) -> ScrollyResult<Self> {
        let capabilities = host.capabilities();
        let tracker: Box<dyn StepTracker> = if capabilities.step_library {
            Box::new(OffsetStepTracker::new(config.offset_fraction))
        } else if capabilities.intersection {
            warn!("step library not loaded, using intersection fallback");
            Box::new(IntersectionStepTracker::new(
                config.intersection_threshold,
                config.root_margin_px,
            ))
        } else {
            return Err(ScrollyError::ObserverUnavailable(
                "neither a step library nor intersection callbacks are available".to_owned(),
            ));
        };

        Ok(Self::with_tracker(host, config, tracker))
    }

    /// Builds an observer around an explicit tracker, bypassing capability checks.
    pub fn with_tracker(
        host: &dyn DocumentHost,
        config: &ObserverConfig,
        tracker: Box<dyn StepTracker>,
    ) -> Self {
        let sections = SectionRegistry::from_elements(host.query_all(&config.section_selector));
        info!(
            sections = sections.len(),
            selector = %config.section_selector,
            strategy = ?tracker.strategy(),
            "step observer ready"
        );
        Self {
            config: config.clone(),
            sections,
            tracker,
        }
    }

    #[must_use]
    pub fn strategy(&self) -> ObserverStrategy {
        self.tracker.strategy()
    }

    #[must_use]
    pub fn config(&self) -> &ObserverConfig {
        &self.config
    }

    #[must_use]
    pub fn sections(&self) -> &SectionRegistry {
        &self.sections
    }

    pub fn sections_mut(&mut self) -> &mut SectionRegistry {
        &mut self.sections
    }

    pub fn poll(&mut self, host: &dyn DocumentHost) -> StepSignals {
        if self.sections.is_empty() {
            return StepSignals::new();
        }
        self.tracker.observe(&self.sections, host)
    }

    /// Forwards a geometry change to the tracker.
    ///
    /// Returns `None` when the strategy has no resize hook; otherwise the
    /// transitions caused by the recomputed boundaries.
    pub fn resize(&mut self, host: &dyn DocumentHost) -> Option<StepSignals> {
        if !self.tracker.supports_resize() {
            return None;
        }
        self.tracker.resize(&self.sections, host);
        debug!(sections = self.sections.len(), "step boundaries recomputed");
        Some(self.poll(host))
    }

    pub fn teardown(&mut self) {
        self.sections.clear();
    }
}

impl std::fmt::Debug for StepObserver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StepObserver")
            .field("config", &self.config)
            .field("sections", &self.sections.len())
            .field("strategy", &self.tracker.strategy())
            .finish()
    }
}

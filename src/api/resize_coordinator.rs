use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::host::DocumentHost;
use crate::observer::{StepObserver, StepSignals};
use crate::visualization::{ResizeOutcome, VisualizationSlot};

/// Result of one window-resize fan-out.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResizeFanout {
    pub resized: usize,
    /// Null slots plus charts whose `init` has not completed.
    pub not_initialized: usize,
    pub busy: usize,
    pub observer_resized: bool,
}

/// Window-resize listener: every live chart, then the observer.
///
/// Calls run one after another in slot order, so a chart never sees two
/// overlapping resizes from this path; the per-chart busy guard absorbs
/// overlap with settle resizes and hover redraws. No debouncing here.
#[derive(Debug, Clone, Default)]
pub struct ResizeCoordinator {
    window_resizes: u64,
}

impl ResizeCoordinator {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn window_resizes(&self) -> u64 {
        self.window_resizes
    }

    pub fn on_window_resize(
        &mut self,
        slots: &[VisualizationSlot],
        observer: Option<&mut StepObserver>,
        host: &dyn DocumentHost,
    ) -> (ResizeFanout, StepSignals) {
        self.window_resizes += 1;
        let mut fanout = ResizeFanout::default();

        for slot in slots {
            let Some(chart) = slot.chart() else {
                fanout.not_initialized += 1;
                continue;
            };
            match chart.resize() {
                ResizeOutcome::Resized => fanout.resized += 1,
                ResizeOutcome::NotInitialized => fanout.not_initialized += 1,
                ResizeOutcome::Busy => fanout.busy += 1,
            }
        }

        let signals = match observer.and_then(|observer| observer.resize(host)) {
            Some(signals) => {
                fanout.observer_resized = true;
                signals
            }
            None => StepSignals::new(),
        };

        debug!(
            resized = fanout.resized,
            not_initialized = fanout.not_initialized,
            busy = fanout.busy,
            observer_resized = fanout.observer_resized,
            "window resize fanned out"
        );
        (fanout, signals)
    }
}

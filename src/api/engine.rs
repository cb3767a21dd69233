use std::time::Duration;

use tracing::{debug, info};

use crate::core::{StepDirection, StepEvent};
use crate::host::DocumentHost;
use crate::observer::{StepObserver, StepSignals};

use super::{
    LifecycleAdapter, ResizeCoordinator, ResizeFanout, ScrollytellingConfig, SettleReport,
    StepController, StepDispatch,
};

/// Main orchestration facade consumed by host pages.
///
/// `ScrollytellingEngine` wires the step observer, step controller,
/// visualization lifecycle adapter and resize coordinator. Hosts forward
/// three inputs: scroll (`handle_scroll`), window resize
/// (`handle_window_resize`) and elapsed time (`advance_time`).
pub struct ScrollytellingEngine<H: DocumentHost> {
    pub(super) host: H,
    pub(super) config: ScrollytellingConfig,
    pub(super) observer: Option<StepObserver>,
    pub(super) controller: StepController,
    pub(super) adapter: LifecycleAdapter,
    pub(super) resize: ResizeCoordinator,
}

impl<H: DocumentHost> ScrollytellingEngine<H> {
    /// Polls the observer and dispatches the resulting signals in order.
    ///
    /// Returns the number of signals that reached callbacks.
    pub fn handle_scroll(&mut self) -> usize {
        let Some(observer) = self.observer.as_mut() else {
            return 0;
        };
        let signals = observer.poll(&self.host);
        self.dispatch_signals(signals)
    }

    /// Feeds one raw signal, e.g. from a host-side step library callback.
    pub fn dispatch_step_event(&mut self, event: StepEvent) -> StepDispatch {
        let Some(observer) = self.observer.as_mut() else {
            debug!(step_index = event.step_index, "no observer, dropping signal");
            return StepDispatch::Dropped;
        };
        let outcome = self
            .controller
            .dispatch(event, observer.sections_mut(), &mut self.host);
        if let StepDispatch::Entered(step_index) = outcome {
            self.adapter
                .on_step_change(step_index, StepDirection::Enter);
        }
        outcome
    }

    pub(super) fn dispatch_signals(&mut self, signals: StepSignals) -> usize {
        signals
            .into_iter()
            .map(|event| self.dispatch_step_event(event))
            .filter(|outcome| *outcome != StepDispatch::Dropped)
            .count()
    }

    /// Resizes every live chart, then lets the observer recompute boundaries.
    pub fn handle_window_resize(&mut self) -> ResizeFanout {
        let (fanout, signals) = self.resize.on_window_resize(
            self.adapter.slots(),
            self.observer.as_mut(),
            &self.host,
        );
        self.dispatch_signals(signals);
        fanout
    }

    /// Advances the settle clock and runs due resizes.
    pub fn advance_time(&mut self, elapsed: Duration) -> Vec<SettleReport> {
        self.adapter.advance(elapsed, &self.host)
    }

    /// Stops observing: sections are released and unstyled, pending settles dropped.
    pub fn teardown(&mut self) {
        if let Some(mut observer) = self.observer.take() {
            let active: Vec<_> = observer
                .sections()
                .iter()
                .filter(|section| section.is_active)
                .map(|section| section.element)
                .collect();
            for element in active {
                self.host.set_section_active(element, false);
            }
            observer.teardown();
            info!("scrollytelling torn down");
        }
        self.adapter.clear_pending();
    }
}

use std::time::Duration;

use crate::core::{ElementRef, SectionRegistry, StepDirection};
use crate::error::{ScrollyError, ScrollyResult};
use crate::host::DocumentHost;
use crate::observer::ObserverStrategy;
use crate::visualization::{ChartHandle, VisualizationKind, VisualizationSlot};

use super::{ScrollytellingConfig, ScrollytellingEngine, StepDispatchStats};

impl<H: DocumentHost> ScrollytellingEngine<H> {
    #[must_use]
    pub fn config(&self) -> &ScrollytellingConfig {
        &self.config
    }

    #[must_use]
    pub fn host(&self) -> &H {
        &self.host
    }

    /// Mutable host access, e.g. to scroll or relayout a headless document.
    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    #[must_use]
    pub fn into_host(self) -> H {
        self.host
    }

    #[must_use]
    pub fn observer_strategy(&self) -> ObserverStrategy {
        self.observer
            .as_ref()
            .map_or(ObserverStrategy::Disabled, |observer| observer.strategy())
    }

    #[must_use]
    pub fn sections(&self) -> Option<&SectionRegistry> {
        self.observer.as_ref().map(|observer| observer.sections())
    }

    /// Element observed for `step_index` by the running observer.
    pub fn section_element(&self, step_index: usize) -> ScrollyResult<ElementRef> {
        self.sections()
            .and_then(|sections| sections.get(step_index))
            .map(|section| section.element)
            .ok_or(ScrollyError::UnknownStep(step_index))
    }

    pub fn on_step(
        &mut self,
        step_index: usize,
        callback: impl FnMut(StepDirection, ElementRef) + 'static,
    ) {
        self.controller.on_step(step_index, callback);
    }

    pub fn on_step_change(
        &mut self,
        callback: impl FnMut(usize, StepDirection, ElementRef) + 'static,
    ) {
        self.controller.on_step_change(callback);
    }

    /// Most recently entered step; persists across exits.
    #[must_use]
    pub fn current_step(&self) -> usize {
        self.controller.current_step()
    }

    #[must_use]
    pub fn dispatch_stats(&self) -> StepDispatchStats {
        self.controller.stats()
    }

    #[must_use]
    pub fn slots(&self) -> &[VisualizationSlot] {
        self.adapter.slots()
    }

    #[must_use]
    pub fn slot(&self, kind: VisualizationKind) -> Option<&VisualizationSlot> {
        self.adapter.slot(kind)
    }

    #[must_use]
    pub fn chart(&self, kind: VisualizationKind) -> Option<ChartHandle> {
        self.adapter.slot(kind).and_then(|slot| slot.chart().cloned())
    }

    #[must_use]
    pub fn pending_settles(&self) -> usize {
        self.adapter.pending_len()
    }

    #[must_use]
    pub fn settle_clock(&self) -> Duration {
        self.adapter.clock()
    }

    #[must_use]
    pub fn window_resizes(&self) -> u64 {
        self.resize.window_resizes()
    }
}

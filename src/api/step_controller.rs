use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace, warn};

use crate::core::{ElementRef, SectionRegistry, StepDirection, StepEvent};
use crate::host::DocumentHost;

/// Per-step hook: receives the transition and the section element.
pub type StepCallback = Box<dyn FnMut(StepDirection, ElementRef)>;

/// Global hook: receives step index, transition and section element.
pub type StepChangeCallback = Box<dyn FnMut(usize, StepDirection, ElementRef)>;

/// What the controller did with a raw signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StepDispatch {
    Entered(usize),
    Exited(usize),
    /// Duplicate or unknown signal; no callback ran.
    Dropped,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepDispatchStats {
    pub enters: u64,
    pub exits: u64,
    pub dropped: u64,
}

/// Owns current-step state and turns raw signals into step callbacks.
///
/// Enter: records the step as current, marks the section active, runs the
/// step hook and then the global hook. Exit: marks the section inactive and
/// runs the step hook only. The global hook never sees exits.
#[derive(Default)]
pub struct StepController {
    current_step: usize,
    step_callbacks: IndexMap<usize, StepCallback>,
    step_change: Option<StepChangeCallback>,
    stats: StepDispatchStats,
}

impl StepController {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers the hook for `step_index`, replacing any previous one.
    pub fn on_step(
        &mut self,
        step_index: usize,
        callback: impl FnMut(StepDirection, ElementRef) + 'static,
    ) {
        if self
            .step_callbacks
            .insert(step_index, Box::new(callback))
            .is_some()
        {
            debug!(step_index, "replaced step callback");
        }
    }

    /// Registers the global hook, replacing any previous one.
    pub fn on_step_change(
        &mut self,
        callback: impl FnMut(usize, StepDirection, ElementRef) + 'static,
    ) {
        if self.step_change.replace(Box::new(callback)).is_some() {
            debug!("replaced step change callback");
        }
    }

    pub fn clear_callbacks(&mut self) {
        self.step_callbacks.clear();
        self.step_change = None;
    }

    /// Most recently entered step; unchanged by exits. `0` before any enter.
    #[must_use]
    pub fn current_step(&self) -> usize {
        self.current_step
    }

    #[must_use]
    pub fn stats(&self) -> StepDispatchStats {
        self.stats
    }

    pub fn dispatch(
        &mut self,
        event: StepEvent,
        sections: &mut SectionRegistry,
        host: &mut dyn DocumentHost,
    ) -> StepDispatch {
        let index = event.step_index;
        if sections.get(index).is_none() {
            warn!(step_index = index, "dropping signal for unregistered step");
            self.stats.dropped += 1;
            return StepDispatch::Dropped;
        }

        match event.direction {
            StepDirection::Enter => {
                if !sections.set_active(index, true) {
                    trace!(step_index = index, "dropping duplicate enter");
                    self.stats.dropped += 1;
                    return StepDispatch::Dropped;
                }
                self.current_step = index;
                host.set_section_active(event.section, true);
                self.stats.enters += 1;
                debug!(
                    step_index = index,
                    scroll_direction = %event.scroll_direction,
                    section = event.section.id(),
                    "step entered"
                );

                if let Some(callback) = self.step_callbacks.get_mut(&index) {
                    callback(StepDirection::Enter, event.section);
                }
                if let Some(callback) = self.step_change.as_mut() {
                    callback(index, StepDirection::Enter, event.section);
                }
                StepDispatch::Entered(index)
            }
            StepDirection::Exit => {
                if !sections.set_active(index, false) {
                    trace!(step_index = index, "dropping exit for inactive step");
                    self.stats.dropped += 1;
                    return StepDispatch::Dropped;
                }
                host.set_section_active(event.section, false);
                self.stats.exits += 1;
                debug!(
                    step_index = index,
                    scroll_direction = %event.scroll_direction,
                    section = event.section.id(),
                    "step exited"
                );

                if let Some(callback) = self.step_callbacks.get_mut(&index) {
                    callback(StepDirection::Exit, event.section);
                }
                StepDispatch::Exited(index)
            }
        }
    }
}

impl std::fmt::Debug for StepController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StepController")
            .field("current_step", &self.current_step)
            .field(
                "step_callbacks",
                &self.step_callbacks.keys().collect::<Vec<_>>(),
            )
            .field("has_step_change", &self.step_change.is_some())
            .field("stats", &self.stats)
            .finish()
    }
}

use std::collections::VecDeque;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{debug, trace, warn};

use crate::core::StepDirection;
use crate::error::{ScrollyError, ScrollyResult};
use crate::host::DocumentHost;
use crate::visualization::{ChartHandle, ResizeOutcome, VisualizationKind, VisualizationSlot};

use super::SlotBinding;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SettleOutcome {
    Resized,
    /// Container had zero width after the settle delay.
    SkippedHidden,
    NotInitialized,
    Busy,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettleReport {
    pub step_index: usize,
    pub kind: VisualizationKind,
    pub outcome: SettleOutcome,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct PendingSettle {
    step_index: usize,
    due: Duration,
}

/// Maps step enters to width-gated chart resizes.
///
/// Each enter of a bound step schedules one resize `settle_delay` later so
/// CSS transitions can finish. Enters for a step that is already pending are
/// coalesced into the latest deadline.
#[derive(Debug, Clone)]
pub struct LifecycleAdapter {
    slots: Vec<VisualizationSlot>,
    settle_delay: Duration,
    clock: Duration,
    pending: VecDeque<PendingSettle>,
}

impl LifecycleAdapter {
    #[must_use]
    pub fn new(bindings: &[SlotBinding], settle_delay: Duration) -> Self {
        Self {
            slots: bindings
                .iter()
                .map(|binding| {
                    VisualizationSlot::new(
                        binding.step_index,
                        binding.kind,
                        binding.container_id.clone(),
                    )
                })
                .collect(),
            settle_delay,
            clock: Duration::ZERO,
            pending: VecDeque::new(),
        }
    }

    #[must_use]
    pub fn slots(&self) -> &[VisualizationSlot] {
        &self.slots
    }

    #[must_use]
    pub fn slot(&self, kind: VisualizationKind) -> Option<&VisualizationSlot> {
        self.slots.iter().find(|slot| slot.kind == kind)
    }

    #[must_use]
    pub fn slot_for_step(&self, step_index: usize) -> Option<&VisualizationSlot> {
        self.slots.iter().find(|slot| slot.step_index == step_index)
    }

    pub fn attach(
        &mut self,
        kind: VisualizationKind,
        chart: ChartHandle,
    ) -> ScrollyResult<Option<ChartHandle>> {
        let slot = self
            .slots
            .iter_mut()
            .find(|slot| slot.kind == kind)
            .ok_or(ScrollyError::UnboundSlot(kind))?;
        Ok(slot.attach(chart))
    }

    pub fn detach(&mut self, kind: VisualizationKind) -> ScrollyResult<Option<ChartHandle>> {
        let slot = self
            .slots
            .iter_mut()
            .find(|slot| slot.kind == kind)
            .ok_or(ScrollyError::UnboundSlot(kind))?;
        Ok(slot.detach())
    }

    /// Drops scheduled settle resizes without running them.
    pub fn clear_pending(&mut self) {
        self.pending.clear();
    }

    #[must_use]
    pub fn settle_delay(&self) -> Duration {
        self.settle_delay
    }

    /// Time elapsed according to `advance`.
    #[must_use]
    pub fn clock(&self) -> Duration {
        self.clock
    }

    #[must_use]
    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    /// Schedules a settle resize for an entered step. Returns `true` when scheduled.
    pub fn on_step_change(&mut self, step_index: usize, direction: StepDirection) -> bool {
        if direction != StepDirection::Enter {
            return false;
        }
        if self.slot_for_step(step_index).is_none() {
            trace!(step_index, "no visualization bound to step");
            return false;
        }

        let due = self.clock.saturating_add(self.settle_delay);
        if let Some(position) = self
            .pending
            .iter()
            .position(|pending| pending.step_index == step_index)
        {
            self.pending.remove(position);
            trace!(step_index, "coalesced pending settle resize");
        }
        self.pending.push_back(PendingSettle { step_index, due });
        true
    }

    /// Moves the clock forward and runs every settle resize that fell due.
    pub fn advance(&mut self, elapsed: Duration, host: &dyn DocumentHost) -> Vec<SettleReport> {
        self.clock = self.clock.saturating_add(elapsed);
        let mut reports = Vec::new();
        while let Some(next) = self.pending.front().copied() {
            if next.due > self.clock {
                break;
            }
            self.pending.pop_front();
            if let Some(report) = self.settle(next.step_index, host) {
                reports.push(report);
            }
        }
        reports
    }

    fn settle(&self, step_index: usize, host: &dyn DocumentHost) -> Option<SettleReport> {
        let slot = self.slot_for_step(step_index)?;
        let report = |outcome: SettleOutcome| SettleReport {
            step_index,
            kind: slot.kind,
            outcome,
        };

        let Some(chart) = slot.chart() else {
            trace!(step_index, kind = %slot.kind, "settle skipped: chart not created yet");
            return Some(report(SettleOutcome::NotInitialized));
        };

        let laid_out = host
            .container_rect(&slot.container_id)
            .is_some_and(|rect| rect.is_laid_out());
        if !laid_out {
            warn!(
                step_index,
                kind = %slot.kind,
                container_id = %slot.container_id,
                "container not visible, skipping resize"
            );
            return Some(report(SettleOutcome::SkippedHidden));
        }

        debug!(step_index, kind = %slot.kind, "resizing visualization for step");
        let outcome = match chart.resize() {
            ResizeOutcome::Resized => SettleOutcome::Resized,
            ResizeOutcome::NotInitialized => SettleOutcome::NotInitialized,
            ResizeOutcome::Busy => SettleOutcome::Busy,
        };
        Some(report(outcome))
    }
}

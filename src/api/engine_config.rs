use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::ScrollyResult;
use crate::observer::ObserverConfig;
use crate::visualization::VisualizationKind;

use super::validation::validate_config;

/// Binds a visualization kind to the step that reveals it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotBinding {
    pub kind: VisualizationKind,
    pub step_index: usize,
    pub container_id: String,
}

impl SlotBinding {
    #[must_use]
    pub fn new(kind: VisualizationKind, step_index: usize) -> Self {
        Self {
            kind,
            step_index,
            container_id: kind.default_container_id().to_owned(),
        }
    }

    #[must_use]
    pub fn with_container_id(mut self, container_id: impl Into<String>) -> Self {
        self.container_id = container_id.into();
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScrollytellingConfig {
    pub observer: ObserverConfig,
    /// Wait after a step enter before measuring the chart container.
    pub settle_delay_ms: u64,
    pub tooltip_id: String,
    pub slots: Vec<SlotBinding>,
}

impl Default for ScrollytellingConfig {
    fn default() -> Self {
        Self {
            observer: ObserverConfig::default(),
            settle_delay_ms: 100,
            tooltip_id: "tooltip".to_owned(),
            // step 0 is the intro section and has no chart
            slots: VisualizationKind::ALL
                .iter()
                .enumerate()
                .map(|(position, kind)| SlotBinding::new(*kind, position + 1))
                .collect(),
        }
    }
}

impl ScrollytellingConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_observer(mut self, observer: ObserverConfig) -> Self {
        self.observer = observer;
        self
    }

    #[must_use]
    pub fn with_section_selector(mut self, selector: impl Into<String>) -> Self {
        self.observer.section_selector = selector.into();
        self
    }

    #[must_use]
    pub fn with_settle_delay(mut self, delay: Duration) -> Self {
        self.settle_delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX);
        self
    }

    #[must_use]
    pub fn with_tooltip_id(mut self, tooltip_id: impl Into<String>) -> Self {
        self.tooltip_id = tooltip_id.into();
        self
    }

    #[must_use]
    pub fn with_slots(mut self, slots: Vec<SlotBinding>) -> Self {
        self.slots = slots;
        self
    }

    /// Adds a binding, replacing any existing binding for the same kind.
    #[must_use]
    pub fn with_slot(mut self, binding: SlotBinding) -> Self {
        self.slots.retain(|slot| slot.kind != binding.kind);
        self.slots.push(binding);
        self
    }

    #[must_use]
    pub fn settle_delay(&self) -> Duration {
        Duration::from_millis(self.settle_delay_ms)
    }

    pub fn validate(&self) -> ScrollyResult<()> {
        validate_config(self)
    }
}

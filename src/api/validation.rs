use std::collections::HashSet;

use crate::error::{ScrollyError, ScrollyResult};
use crate::observer::ObserverConfig;

use super::ScrollytellingConfig;

pub(super) fn validate_observer_config(config: &ObserverConfig) -> ScrollyResult<()> {
    if config.section_selector.trim().is_empty() {
        return Err(ScrollyError::InvalidConfig(
            "section selector must not be empty".to_owned(),
        ));
    }
    if !config.offset_fraction.is_finite() || !(0.0..=1.0).contains(&config.offset_fraction) {
        return Err(ScrollyError::InvalidConfig(
            "offset_fraction must be finite and in [0, 1]".to_owned(),
        ));
    }
    if !config.intersection_threshold.is_finite()
        || !(0.0..=1.0).contains(&config.intersection_threshold)
    {
        return Err(ScrollyError::InvalidConfig(
            "intersection_threshold must be finite and in [0, 1]".to_owned(),
        ));
    }
    if !config.root_margin_px.is_finite() {
        return Err(ScrollyError::InvalidConfig(
            "root_margin_px must be finite".to_owned(),
        ));
    }
    Ok(())
}

pub(super) fn validate_config(config: &ScrollytellingConfig) -> ScrollyResult<()> {
    validate_observer_config(&config.observer)?;

    let mut kinds = HashSet::new();
    let mut steps = HashSet::new();
    for slot in &config.slots {
        if slot.container_id.trim().is_empty() {
            return Err(ScrollyError::InvalidConfig(format!(
                "container id for `{}` must not be empty",
                slot.kind
            )));
        }
        if !kinds.insert(slot.kind) {
            return Err(ScrollyError::InvalidConfig(format!(
                "visualization `{}` is bound more than once",
                slot.kind
            )));
        }
        if !steps.insert(slot.step_index) {
            return Err(ScrollyError::InvalidConfig(format!(
                "step {} is bound to more than one visualization",
                slot.step_index
            )));
        }
    }
    Ok(())
}

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::core::ElementRef;

/// Step-level transition delivered to callbacks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StepDirection {
    Enter,
    Exit,
}

impl StepDirection {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Enter => "enter",
            Self::Exit => "exit",
        }
    }
}

impl fmt::Display for StepDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Scroll direction observed when a transition happened.
///
/// The intersection fallback cannot tell the direction and always reports
/// `Down`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScrollDirection {
    #[default]
    Down,
    Up,
}

impl ScrollDirection {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Down => "down",
            Self::Up => "up",
        }
    }
}

impl fmt::Display for ScrollDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Raw enter/exit signal produced by an observer strategy.
///
/// Transient: built per observation pass and consumed by the step
/// controller in the same turn of the event loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepEvent {
    pub step_index: usize,
    pub direction: StepDirection,
    pub scroll_direction: ScrollDirection,
    pub section: ElementRef,
}

impl StepEvent {
    #[must_use]
    pub fn enter(step_index: usize, section: ElementRef, scroll_direction: ScrollDirection) -> Self {
        Self {
            step_index,
            direction: StepDirection::Enter,
            scroll_direction,
            section,
        }
    }

    #[must_use]
    pub fn exit(step_index: usize, section: ElementRef, scroll_direction: ScrollDirection) -> Self {
        Self {
            step_index,
            direction: StepDirection::Exit,
            scroll_direction,
            section,
        }
    }

    #[must_use]
    pub fn is_enter(self) -> bool {
        self.direction == StepDirection::Enter
    }
}

//! Visualization collaborator contract.
//!
//! The core never inspects how a chart draws itself. It only knows that a
//! chart can be initialized with records and asked to re-render for new
//! container dimensions, and it enforces ordering around those two calls.

mod handle;
mod slot;

pub use handle::{ChartHandle, ResizeGuard, ResizeOutcome, ResizeTicket, WeakChartHandle};
pub use slot::VisualizationSlot;

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::core::Record;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VisualizationKind {
    Line,
    StackedBar,
    Scatter,
    Bubble,
    Radial,
}

impl VisualizationKind {
    /// Story order, matching the default step bindings `1..=5`.
    pub const ALL: [Self; 5] = [
        Self::Line,
        Self::StackedBar,
        Self::Scatter,
        Self::Bubble,
        Self::Radial,
    ];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Line => "line",
            Self::StackedBar => "stacked_bar",
            Self::Scatter => "scatter",
            Self::Bubble => "bubble",
            Self::Radial => "radial",
        }
    }

    #[must_use]
    pub fn default_container_id(self) -> &'static str {
        match self {
            Self::Line => "line-chart-container",
            Self::StackedBar => "stacked-bar-container",
            Self::Scatter => "scatterplot-container",
            Self::Bubble => "bubble-chart-container",
            Self::Radial => "radial-spectrum-container",
        }
    }
}

impl fmt::Display for VisualizationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where a chart is mounted: its own container plus the shared tooltip.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChartMount {
    pub kind: VisualizationKind,
    pub container_id: String,
    pub tooltip_id: String,
}

/// Chart implementation driven by the synchronization core.
///
/// Implementations own their drawing subtree exclusively. UI state such as
/// a selected decade or filter lives inside the chart and must survive
/// `resize`.
pub trait Visualization {
    /// Renders `data`. Safe to call again; an empty slice renders nothing.
    fn init(&mut self, data: &[Record]);

    /// Re-renders for the current container dimensions.
    fn resize(&mut self);
}

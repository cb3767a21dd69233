use super::{ChartHandle, VisualizationKind};

/// Binds a step index to a chart container and, once data loaded, a chart.
#[derive(Debug, Clone)]
pub struct VisualizationSlot {
    pub step_index: usize,
    pub kind: VisualizationKind,
    pub container_id: String,
    chart: Option<ChartHandle>,
}

impl VisualizationSlot {
    #[must_use]
    pub fn new(step_index: usize, kind: VisualizationKind, container_id: impl Into<String>) -> Self {
        Self {
            step_index,
            kind,
            container_id: container_id.into(),
            chart: None,
        }
    }

    #[must_use]
    pub fn chart(&self) -> Option<&ChartHandle> {
        self.chart.as_ref()
    }

    /// Returns the previously attached chart, if any.
    pub fn attach(&mut self, chart: ChartHandle) -> Option<ChartHandle> {
        self.chart.replace(chart)
    }

    pub fn detach(&mut self) -> Option<ChartHandle> {
        self.chart.take()
    }

    #[must_use]
    pub fn is_live(&self) -> bool {
        self.chart.is_some()
    }
}

use tracing::{debug, info};

use crate::core::{Record, StoryData};
use crate::error::{ScrollyError, ScrollyResult};
use crate::host::DocumentHost;
use crate::visualization::{ChartHandle, ChartMount, Visualization, VisualizationKind};

use super::ScrollytellingEngine;

impl<H: DocumentHost> ScrollytellingEngine<H> {
    #[must_use]
    pub fn chart_mount(&self, kind: VisualizationKind) -> Option<ChartMount> {
        self.adapter.slot(kind).map(|slot| ChartMount {
            kind,
            container_id: slot.container_id.clone(),
            tooltip_id: self.config.tooltip_id.clone(),
        })
    }

    /// Wraps `chart`, runs `init(data)` and attaches it to the slot for `kind`.
    pub fn attach_chart(
        &mut self,
        kind: VisualizationKind,
        chart: Box<dyn Visualization>,
        data: &[Record],
    ) -> ScrollyResult<ChartHandle> {
        let handle = ChartHandle::new(kind, chart);
        handle.init(data)?;
        self.attach_handle(handle.clone())?;
        Ok(handle)
    }

    /// Attaches a prepared handle; initialization stays with the caller.
    pub fn attach_handle(&mut self, handle: ChartHandle) -> ScrollyResult<()> {
        let kind = handle.kind();
        if self.adapter.attach(kind, handle)?.is_some() {
            debug!(kind = %kind, "replaced attached visualization");
        }
        Ok(())
    }

    pub fn detach_chart(&mut self, kind: VisualizationKind) -> ScrollyResult<Option<ChartHandle>> {
        self.adapter.detach(kind)
    }

    /// Builds, initializes and attaches a chart for every bound slot.
    ///
    /// `factory` receives the mount point for each kind; each chart is
    /// initialized with its series from `data` (possibly empty).
    pub fn init_visualizations(
        &mut self,
        data: &StoryData,
        mut factory: impl FnMut(&ChartMount) -> Box<dyn Visualization>,
    ) -> ScrollyResult<Vec<ChartHandle>> {
        let mounts: Vec<ChartMount> = self
            .adapter
            .slots()
            .iter()
            .filter_map(|slot| self.chart_mount(slot.kind))
            .collect();
        if mounts.is_empty() {
            return Err(ScrollyError::InvalidConfig(
                "no visualization slots are bound".to_owned(),
            ));
        }

        let mut handles = Vec::with_capacity(mounts.len());
        for mount in &mounts {
            let chart = factory(mount);
            handles.push(self.attach_chart(mount.kind, chart, data.series(mount.kind))?);
        }
        info!(charts = handles.len(), "visualizations initialized");
        Ok(handles)
    }
}

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::{Rc, Weak};

use tracing::{debug, trace};

use crate::core::Record;
use crate::error::{ScrollyError, ScrollyResult};

use super::{Visualization, VisualizationKind};

/// Busy flag shared between a chart and whoever triggers its redraws.
///
/// At most one ticket exists at a time; a second `try_begin` while a ticket
/// is alive returns `None`. Clones observe the same flag.
#[derive(Debug, Clone, Default)]
pub struct ResizeGuard {
    busy: Rc<Cell<bool>>,
}

impl ResizeGuard {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn is_busy(&self) -> bool {
        self.busy.get()
    }

    #[must_use]
    pub fn try_begin(&self) -> Option<ResizeTicket> {
        if self.busy.replace(true) {
            return None;
        }
        Some(ResizeTicket {
            busy: Rc::clone(&self.busy),
        })
    }
}

/// Marks a redraw as in progress until dropped.
#[derive(Debug)]
#[must_use = "the guard is released as soon as the ticket is dropped"]
pub struct ResizeTicket {
    busy: Rc<Cell<bool>>,
}

impl Drop for ResizeTicket {
    fn drop(&mut self) {
        self.busy.set(false);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResizeOutcome {
    Resized,
    /// `init` has not completed yet; nothing was drawn.
    NotInitialized,
    /// A prior redraw is still running; the request was dropped.
    Busy,
}

struct ChartCell {
    kind: VisualizationKind,
    chart: RefCell<Box<dyn Visualization>>,
    initialized: Cell<bool>,
    guard: ResizeGuard,
    resize_count: Cell<u64>,
}

/// Shared reference to a live chart.
///
/// Enforces the lifecycle ordering: `resize` before a completed `init` is
/// ignored, and at most one redraw runs per chart at any time. Requests
/// that arrive while the chart is busy are dropped, not queued.
#[derive(Clone)]
pub struct ChartHandle {
    inner: Rc<ChartCell>,
}

impl ChartHandle {
    #[must_use]
    pub fn new(kind: VisualizationKind, chart: Box<dyn Visualization>) -> Self {
        Self::with_guard(kind, chart, ResizeGuard::new())
    }

    /// Builds a handle whose busy flag is shared with `guard`.
    ///
    /// Charts that run their own redraws (hover animations, filter changes)
    /// keep a clone of the guard and hold a ticket while drawing.
    #[must_use]
    pub fn with_guard(
        kind: VisualizationKind,
        chart: Box<dyn Visualization>,
        guard: ResizeGuard,
    ) -> Self {
        Self {
            inner: Rc::new(ChartCell {
                kind,
                chart: RefCell::new(chart),
                initialized: Cell::new(false),
                guard,
                resize_count: Cell::new(0),
            }),
        }
    }

    #[must_use]
    pub fn kind(&self) -> VisualizationKind {
        self.inner.kind
    }

    #[must_use]
    pub fn is_initialized(&self) -> bool {
        self.inner.initialized.get()
    }

    #[must_use]
    pub fn is_busy(&self) -> bool {
        self.inner.guard.is_busy()
    }

    #[must_use]
    pub fn guard(&self) -> ResizeGuard {
        self.inner.guard.clone()
    }

    /// Number of `resize` calls that reached the chart.
    #[must_use]
    pub fn resize_count(&self) -> u64 {
        self.inner.resize_count.get()
    }

    pub fn init(&self, data: &[Record]) -> ScrollyResult<()> {
        let kind = self.inner.kind;
        let Some(_ticket) = self.inner.guard.try_begin() else {
            return Err(ScrollyError::ChartBusy(kind));
        };
        let Ok(mut chart) = self.inner.chart.try_borrow_mut() else {
            return Err(ScrollyError::ChartBusy(kind));
        };
        chart.init(data);
        self.inner.initialized.set(true);
        debug!(kind = %kind, records = data.len(), "visualization initialized");
        Ok(())
    }

    pub fn resize(&self) -> ResizeOutcome {
        let kind = self.inner.kind;
        if !self.is_initialized() {
            trace!(kind = %kind, "resize ignored: visualization not initialized");
            return ResizeOutcome::NotInitialized;
        }
        // ticket outlives the chart borrow so the flag clears last
        let Some(_ticket) = self.inner.guard.try_begin() else {
            trace!(kind = %kind, "resize dropped: visualization busy");
            return ResizeOutcome::Busy;
        };
        let Ok(mut chart) = self.inner.chart.try_borrow_mut() else {
            trace!(kind = %kind, "resize dropped: visualization borrowed");
            return ResizeOutcome::Busy;
        };
        chart.resize();
        self.inner
            .resize_count
            .set(self.inner.resize_count.get() + 1);
        ResizeOutcome::Resized
    }

    /// Marks the chart busy for a redraw the core did not start.
    #[must_use]
    pub fn hold_busy(&self) -> Option<ResizeTicket> {
        self.inner.guard.try_begin()
    }

    #[must_use]
    pub fn downgrade(&self) -> WeakChartHandle {
        WeakChartHandle {
            inner: Rc::downgrade(&self.inner),
        }
    }

    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }
}

impl fmt::Debug for ChartHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChartHandle")
            .field("kind", &self.inner.kind)
            .field("initialized", &self.inner.initialized.get())
            .field("busy", &self.inner.guard.is_busy())
            .field("resize_count", &self.inner.resize_count.get())
            .finish()
    }
}

/// Non-owning handle, e.g. for a chart that needs to call back into itself.
#[derive(Clone)]
pub struct WeakChartHandle {
    inner: Weak<ChartCell>,
}

impl WeakChartHandle {
    #[must_use]
    pub fn upgrade(&self) -> Option<ChartHandle> {
        self.inner.upgrade().map(|inner| ChartHandle { inner })
    }
}

impl fmt::Debug for WeakChartHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WeakChartHandle")
            .field("alive", &(self.inner.strong_count() > 0))
            .finish()
    }
}

mod headless;

pub use headless::HeadlessDocument;

use serde::{Deserialize, Serialize};

use crate::core::{ElementRef, Rect, ViewportMetrics};

/// Step-tracking capabilities the host page provides.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HostCapabilities {
    /// A scroll-step library is loaded (offset-crossing tracking).
    pub step_library: bool,
    /// Viewport intersection callbacks are available.
    pub intersection: bool,
}

impl Default for HostCapabilities {
    fn default() -> Self {
        Self {
            step_library: true,
            intersection: true,
        }
    }
}

impl HostCapabilities {
    #[must_use]
    pub fn intersection_only() -> Self {
        Self {
            step_library: false,
            intersection: true,
        }
    }

    #[must_use]
    pub fn none() -> Self {
        Self {
            step_library: false,
            intersection: false,
        }
    }
}

/// DOM contract consumed by the synchronization core.
///
/// Backends answer layout queries and apply section styling so the core
/// stays independent of any particular document model. A browser binding
/// and the in-memory `HeadlessDocument` both implement it.
pub trait DocumentHost {
    fn capabilities(&self) -> HostCapabilities;

    /// All elements matching `selector`, in document order.
    fn query_all(&self, selector: &str) -> Vec<ElementRef>;

    /// Viewport-relative box of `element`, or `None` if it is detached.
    fn bounding_rect(&self, element: ElementRef) -> Option<Rect>;

    /// Viewport-relative box of the container with the given id.
    fn container_rect(&self, container_id: &str) -> Option<Rect>;

    fn viewport(&self) -> ViewportMetrics;

    /// Toggles the `active` styling marker of a section.
    fn set_section_active(&mut self, element: ElementRef, active: bool);
}

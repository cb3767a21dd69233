use std::collections::BTreeSet;

use indexmap::IndexMap;

use crate::core::{ElementRef, Rect, ViewportMetrics};

use super::{DocumentHost, HostCapabilities};

#[derive(Debug, Clone)]
struct HeadlessElement {
    element: ElementRef,
    class: String,
    document_rect: Rect,
}

/// In-memory document used by tests, benches and headless tooling.
///
/// Element boxes are stored in document coordinates; `bounding_rect` shifts
/// them by the current scroll offset like a browser would.
#[derive(Debug, Clone)]
pub struct HeadlessDocument {
    capabilities: HostCapabilities,
    viewport: ViewportMetrics,
    elements: Vec<HeadlessElement>,
    containers: IndexMap<String, Rect>,
    active: BTreeSet<ElementRef>,
    next_id: u64,
}

impl HeadlessDocument {
    #[must_use]
    pub fn new(viewport_width: f64, viewport_height: f64) -> Self {
        Self {
            capabilities: HostCapabilities::default(),
            viewport: ViewportMetrics::new(viewport_width, viewport_height, 0.0),
            elements: Vec::new(),
            containers: IndexMap::new(),
            active: BTreeSet::new(),
            next_id: 1,
        }
    }

    #[must_use]
    pub fn with_capabilities(mut self, capabilities: HostCapabilities) -> Self {
        self.capabilities = capabilities;
        self
    }

    pub fn set_capabilities(&mut self, capabilities: HostCapabilities) {
        self.capabilities = capabilities;
    }

    /// Appends an element with `class` below every existing element.
    pub fn push_element(&mut self, class: impl Into<String>, height: f64) -> ElementRef {
        let top = self
            .elements
            .iter()
            .map(|entry| entry.document_rect.bottom())
            .fold(0.0, f64::max);
        let width = self.viewport.width;
        self.insert_element(class, Rect::new(top, 0.0, width, height))
    }

    /// Appends `count` stacked `.scroll-section` elements of equal height.
    pub fn push_sections(&mut self, count: usize, height: f64) -> Vec<ElementRef> {
        (0..count)
            .map(|_| self.push_element("scroll-section", height))
            .collect()
    }

    pub fn insert_element(&mut self, class: impl Into<String>, document_rect: Rect) -> ElementRef {
        let element = ElementRef(self.next_id);
        self.next_id += 1;
        self.elements.push(HeadlessElement {
            element,
            class: class.into(),
            document_rect,
        });
        element
    }

    /// Replaces the height of `element` and reflows everything below it.
    pub fn set_element_height(&mut self, element: ElementRef, height: f64) {
        let Some(position) = self.elements.iter().position(|entry| entry.element == element)
        else {
            return;
        };
        let delta = height - self.elements[position].document_rect.height;
        let old_bottom = self.elements[position].document_rect.bottom();
        self.elements[position].document_rect.height = height;
        for entry in &mut self.elements {
            if entry.element != element && entry.document_rect.top >= old_bottom {
                entry.document_rect.top += delta;
            }
        }
    }

    pub fn remove_element(&mut self, element: ElementRef) {
        self.elements.retain(|entry| entry.element != element);
        self.active.remove(&element);
    }

    #[must_use]
    pub fn document_rect(&self, element: ElementRef) -> Option<Rect> {
        self.elements
            .iter()
            .find(|entry| entry.element == element)
            .map(|entry| entry.document_rect)
    }

    pub fn set_container_width(&mut self, container_id: impl Into<String>, width: f64) {
        let container_id = container_id.into();
        let height = self
            .containers
            .get(&container_id)
            .map_or(500.0, |rect| rect.height);
        self.containers
            .insert(container_id, Rect::new(0.0, 0.0, width, height));
    }

    pub fn remove_container(&mut self, container_id: &str) {
        self.containers.shift_remove(container_id);
    }

    pub fn scroll_to(&mut self, scroll_y: f64) {
        self.viewport.scroll_y = scroll_y.max(0.0);
    }

    pub fn scroll_by(&mut self, delta: f64) {
        self.scroll_to(self.viewport.scroll_y + delta);
    }

    /// Scrolls so the top of `element` sits at `fraction` of the viewport height.
    pub fn scroll_element_to(&mut self, element: ElementRef, fraction: f64) {
        if let Some(rect) = self.document_rect(element) {
            self.scroll_to(rect.top - self.viewport.height * fraction);
        }
    }

    pub fn resize_viewport(&mut self, width: f64, height: f64) {
        self.viewport.width = width;
        self.viewport.height = height;
        for entry in &mut self.elements {
            entry.document_rect.width = width;
        }
    }

    #[must_use]
    pub fn is_section_active(&self, element: ElementRef) -> bool {
        self.active.contains(&element)
    }

    #[must_use]
    pub fn active_elements(&self) -> Vec<ElementRef> {
        self.active.iter().copied().collect()
    }
}

impl DocumentHost for HeadlessDocument {
    fn capabilities(&self) -> HostCapabilities {
        self.capabilities
    }

    fn query_all(&self, selector: &str) -> Vec<ElementRef> {
        let class = selector.strip_prefix('.').unwrap_or(selector);
        let mut matches: Vec<&HeadlessElement> = self
            .elements
            .iter()
            .filter(|entry| entry.class.split_whitespace().any(|name| name == class))
            .collect();
        matches.sort_by(|a, b| a.document_rect.top.total_cmp(&b.document_rect.top));
        matches.into_iter().map(|entry| entry.element).collect()
    }

    fn bounding_rect(&self, element: ElementRef) -> Option<Rect> {
        self.document_rect(element)
            .map(|rect| rect.translated_y(-self.viewport.scroll_y))
    }

    fn container_rect(&self, container_id: &str) -> Option<Rect> {
        self.containers.get(container_id).copied()
    }

    fn viewport(&self) -> ViewportMetrics {
        self.viewport
    }

    fn set_section_active(&mut self, element: ElementRef, active: bool) {
        if active {
            self.active.insert(element);
        } else {
            self.active.remove(&element);
        }
    }
}

use crate::core::{Rect, ScrollDirection, SectionRegistry, StepEvent};
use crate::host::DocumentHost;

use super::{ObserverStrategy, StepSignals, StepTracker};

/// Trigger-line strategy backed by the host's step library.
///
/// Section boxes are measured once in document coordinates and reused on
/// every scroll; `resize` re-measures them. A section is active while the
/// trigger line lies inside its `[top, bottom)` range.
#[derive(Debug, Clone)]
pub struct OffsetStepTracker {
    offset_fraction: f64,
    boundaries: Vec<Option<Rect>>,
    containing: Vec<bool>,
    last_scroll_y: Option<f64>,
    last_direction: ScrollDirection,
}

impl OffsetStepTracker {
    #[must_use]
    pub fn new(offset_fraction: f64) -> Self {
        Self {
            offset_fraction,
            boundaries: Vec::new(),
            containing: Vec::new(),
            last_scroll_y: None,
            last_direction: ScrollDirection::Down,
        }
    }

    #[must_use]
    pub fn offset_fraction(&self) -> f64 {
        self.offset_fraction
    }

    fn measure(&mut self, sections: &SectionRegistry, host: &dyn DocumentHost) {
        let scroll_y = host.viewport().scroll_y;
        self.boundaries = sections
            .iter()
            .map(|section| {
                host.bounding_rect(section.element)
                    .map(|rect| rect.translated_y(scroll_y))
            })
            .collect();
        self.containing.resize(sections.len(), false);
    }

    fn direction_for(&mut self, scroll_y: f64) -> ScrollDirection {
        let direction = match self.last_scroll_y {
            Some(previous) if scroll_y < previous => ScrollDirection::Up,
            Some(previous) if scroll_y > previous => ScrollDirection::Down,
            _ => self.last_direction,
        };
        self.last_scroll_y = Some(scroll_y);
        self.last_direction = direction;
        direction
    }
}

impl StepTracker for OffsetStepTracker {
    fn strategy(&self) -> ObserverStrategy {
        ObserverStrategy::StepLibrary
    }

    fn observe(&mut self, sections: &SectionRegistry, host: &dyn DocumentHost) -> StepSignals {
        if self.boundaries.len() != sections.len() {
            self.measure(sections, host);
        }

        let viewport = host.viewport();
        let direction = self.direction_for(viewport.scroll_y);
        let trigger_y = viewport.scroll_y + viewport.height * self.offset_fraction;

        let mut enters = StepSignals::new();
        let mut exits = StepSignals::new();
        for section in sections.iter() {
            let index = section.index;
            let now = self.boundaries[index].is_some_and(|rect| rect.contains_y(trigger_y));
            if now == self.containing[index] {
                continue;
            }
            self.containing[index] = now;
            if now {
                enters.push(StepEvent::enter(index, section.element, direction));
            } else {
                exits.push(StepEvent::exit(index, section.element, direction));
            }
        }

        // scrolling up, sections cross the trigger line bottom-first
        if direction == ScrollDirection::Up {
            enters.reverse();
            exits.reverse();
        }
        enters.extend(exits);
        enters
    }

    fn supports_resize(&self) -> bool {
        true
    }

    fn resize(&mut self, sections: &SectionRegistry, host: &dyn DocumentHost) {
        self.measure(sections, host);
    }
}

use serde::{Deserialize, Serialize};

use crate::core::ElementRef;

/// Narrative section tracked by the observer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    pub index: usize,
    pub element: ElementRef,
    pub is_active: bool,
}

/// Sections in document order with dense `0..N-1` indices.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SectionRegistry {
    sections: Vec<Section>,
}

impl SectionRegistry {
    /// Assigns indices in the order the host returned the elements.
    #[must_use]
    pub fn from_elements(elements: impl IntoIterator<Item = ElementRef>) -> Self {
        let sections = elements
            .into_iter()
            .enumerate()
            .map(|(index, element)| Section {
                index,
                element,
                is_active: false,
            })
            .collect();
        Self { sections }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.sections.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Section> {
        self.sections.get(index)
    }

    #[must_use]
    pub fn index_of(&self, element: ElementRef) -> Option<usize> {
        self.sections
            .iter()
            .position(|section| section.element == element)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Section> {
        self.sections.iter()
    }

    #[must_use]
    pub fn is_active(&self, index: usize) -> bool {
        self.sections
            .get(index)
            .is_some_and(|section| section.is_active)
    }

    /// Updates the flag and returns `true` when it actually changed.
    pub fn set_active(&mut self, index: usize, active: bool) -> bool {
        match self.sections.get_mut(index) {
            Some(section) if section.is_active != active => {
                section.is_active = active;
                true
            }
            _ => false,
        }
    }

    #[must_use]
    pub fn active_indices(&self) -> Vec<usize> {
        self.sections
            .iter()
            .filter(|section| section.is_active)
            .map(|section| section.index)
            .collect()
    }

    pub fn clear(&mut self) {
        self.sections.clear();
    }
}

use serde::{Deserialize, Serialize};

/// Opaque handle to a host element (a section marker or a chart container).
///
/// The core never dereferences it; it is only compared and handed back to
/// the `DocumentHost` and to callbacks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ElementRef(pub u64);

impl ElementRef {
    #[must_use]
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    #[must_use]
    pub fn id(self) -> u64 {
        self.0
    }
}

/// Axis-aligned box in CSS pixels.
///
/// Whether `top` is document-relative or viewport-relative depends on the
/// producer; `DocumentHost::bounding_rect` always returns viewport-relative
/// boxes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub top: f64,
    pub left: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    #[must_use]
    pub fn new(top: f64, left: f64, width: f64, height: f64) -> Self {
        Self {
            top,
            left,
            width,
            height,
        }
    }

    #[must_use]
    pub fn bottom(self) -> f64 {
        self.top + self.height
    }

    #[must_use]
    pub fn is_laid_out(self) -> bool {
        self.width.is_finite() && self.width > 0.0
    }

    /// Shifts the box vertically, e.g. from viewport to document coordinates.
    #[must_use]
    pub fn translated_y(self, dy: f64) -> Self {
        Self {
            top: self.top + dy,
            ..self
        }
    }

    /// Returns `true` when the horizontal line `y` lies in `[top, bottom)`.
    #[must_use]
    pub fn contains_y(self, y: f64) -> bool {
        y >= self.top && y < self.bottom()
    }

    /// Fraction of this box's height that overlaps the band `[band_top, band_bottom)`.
    ///
    /// Zero-height boxes are treated as fully visible when their top edge is
    /// inside the band, matching how intersection observers report them.
    #[must_use]
    pub fn visible_ratio(self, band_top: f64, band_bottom: f64) -> f64 {
        if self.height <= 0.0 {
            return if self.top >= band_top && self.top < band_bottom {
                1.0
            } else {
                0.0
            };
        }
        let overlap = self.bottom().min(band_bottom) - self.top.max(band_top);
        (overlap.max(0.0) / self.height).clamp(0.0, 1.0)
    }
}

/// Visible window of the scrolling document.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViewportMetrics {
    pub width: f64,
    pub height: f64,
    pub scroll_y: f64,
}

impl ViewportMetrics {
    #[must_use]
    pub fn new(width: f64, height: f64, scroll_y: f64) -> Self {
        Self {
            width,
            height,
            scroll_y,
        }
    }

    #[must_use]
    pub fn is_valid(self) -> bool {
        self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0
    }
}

pub mod record;
pub mod section;
pub mod step;
pub mod types;

pub use record::{Record, RecordField, StoryData};
pub use section::{Section, SectionRegistry};
pub use step::{ScrollDirection, StepDirection, StepEvent};
pub use types::{ElementRef, Rect, ViewportMetrics};

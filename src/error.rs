use thiserror::Error;

use crate::visualization::VisualizationKind;

pub type ScrollyResult<T> = Result<T, ScrollyError>;

#[derive(Debug, Error)]
pub enum ScrollyError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("invalid data: {0}")]
    InvalidData(String),

    #[error("step observer unavailable: {0}")]
    ObserverUnavailable(String),

    #[error("no section registered for step {0}")]
    UnknownStep(usize),

    #[error("no visualization slot bound for `{0}`")]
    UnboundSlot(VisualizationKind),

    #[error("visualization `{0}` is busy")]
    ChartBusy(VisualizationKind),
}

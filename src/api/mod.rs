mod chart_controller;
mod engine;
mod engine_accessors;
mod engine_config;
mod engine_init;
mod json_contract;
mod lifecycle_adapter;
mod resize_coordinator;
mod step_controller;
mod validation;

pub use engine::ScrollytellingEngine;
pub use engine_config::{ScrollytellingConfig, SlotBinding};
pub use json_contract::{
    SCROLLYTELLING_CONFIG_JSON_SCHEMA_V1, ScrollytellingConfigJsonContractV1,
};
pub use lifecycle_adapter::{LifecycleAdapter, SettleOutcome, SettleReport};
pub use resize_coordinator::{ResizeCoordinator, ResizeFanout};
pub use step_controller::{
    StepCallback, StepChangeCallback, StepController, StepDispatch, StepDispatchStats,
};

pub use crate::observer::{ObserverConfig, ObserverStrategy};

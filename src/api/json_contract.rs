use serde::{Deserialize, Serialize};

use crate::error::{ScrollyError, ScrollyResult};

use super::ScrollytellingConfig;

pub const SCROLLYTELLING_CONFIG_JSON_SCHEMA_V1: u32 = 1;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScrollytellingConfigJsonContractV1 {
    pub schema_version: u32,
    pub config: ScrollytellingConfig,
}

impl ScrollytellingConfig {
    pub fn to_json_pretty(&self) -> ScrollyResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| {
            ScrollyError::InvalidConfig(format!("failed to serialize config json: {e}"))
        })
    }

    pub fn to_json_contract_v1_pretty(&self) -> ScrollyResult<String> {
        let payload = ScrollytellingConfigJsonContractV1 {
            schema_version: SCROLLYTELLING_CONFIG_JSON_SCHEMA_V1,
            config: self.clone(),
        };
        serde_json::to_string_pretty(&payload).map_err(|e| {
            ScrollyError::InvalidConfig(format!("failed to serialize config contract v1: {e}"))
        })
    }

    /// Parses either a versioned envelope or a bare config object, then validates.
    pub fn from_json_str(input: &str) -> ScrollyResult<Self> {
        let value: serde_json::Value = serde_json::from_str(input).map_err(|e| {
            ScrollyError::InvalidConfig(format!("failed to parse config json payload: {e}"))
        })?;

        let config = if value.get("schema_version").is_some() {
            let payload: ScrollytellingConfigJsonContractV1 = serde_json::from_value(value)
                .map_err(|e| {
                    ScrollyError::InvalidConfig(format!("invalid config contract payload: {e}"))
                })?;
            if payload.schema_version != SCROLLYTELLING_CONFIG_JSON_SCHEMA_V1 {
                return Err(ScrollyError::InvalidConfig(format!(
                    "unsupported config schema version: {}",
                    payload.schema_version
                )));
            }
            payload.config
        } else {
            serde_json::from_value(value)
                .map_err(|e| ScrollyError::InvalidConfig(format!("invalid config payload: {e}")))?
        };

        config.validate()?;
        Ok(config)
    }
}

// Copyright (c) 2025 Pratik Barhate
// Licensed under the MIT License. See the LICENSE file in the project root for more information.

//! Service configuration module to read the configurations from JSON string.

use serde::Deserialize;

use crate::config::ProducerConfig;
use crate::error::ConfigError;

fn default_port_number() -> u16 {
    8279
}

fn default_connection_concurrency() -> u16 {
    10
}

fn default_job_queue_capacity() -> usize {
    200
}

#[derive(Debug, Deserialize, PartialEq)]
pub struct XTagServiceConfig {
    #[serde(default = "default_connection_concurrency")]
    pub connection_concurrency: u16,
    /// Events waiting for a free producer worker before callers are held back.
    #[serde(default = "default_job_queue_capacity")]
    pub job_queue_capacity: usize,
    pub model_id: String,
    #[serde(default = "default_port_number")]
    pub port_number: u16,
    pub producer: ProducerConfig,
}

impl XTagServiceConfig {
    pub fn from_json(json_str: &str) -> Result<Self, ConfigError> {
        let config: XTagServiceConfig = serde_json::from_str(json_str)?;
        config.producer.validate()?;
        Ok(config)
    }
}

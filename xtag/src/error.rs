// Copyright (c) 2025 Pratik Barhate
// Licensed under the MIT License. See the LICENSE file in the project root for more information.

//! Error types of the tagger.
//!
//! [`ConfigError`] is fatal at startup: no events are processed with a bad configuration
//! or an unusable graph. [`InferenceError`] is fatal for the event being processed: there
//! is no retry and no partial output.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("ctau_values has {values} entries but ctau_descriptors has {labels}")]
    HypothesisLengthMismatch { values: usize, labels: usize },

    #[error("at least one ctau hypothesis must be configured")]
    NoHypotheses,

    #[error("ctau descriptor at position {0} is empty")]
    EmptyLabel(usize),

    #[error("ctau descriptor {0} is configured more than once")]
    DuplicateLabel(String),

    #[error("ctau value {value} for descriptor {label} is not finite")]
    NonFiniteValue { label: String, value: f64 },

    #[error("output_name must not be empty")]
    EmptyOutputName,

    #[error("failed to parse configuration: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("failed to load graph: {0}")]
    Graph(String),

    #[error("graph has no input named {0}")]
    MissingGraphInput(String),

    #[error("graph has no output named {0}")]
    MissingGraphOutput(String),
}

#[derive(Debug, Error)]
pub enum InferenceError {
    #[error("input tensor {0} was not supplied")]
    MissingInput(String),

    #[error("graph has no input named {0}")]
    UnknownInput(String),

    #[error("graph has no output named {0}")]
    UnknownOutput(String),

    #[error("output {name} has shape {shape:?}, expected [{rows}, > {column}]")]
    OutputShape {
        name: String,
        shape: Vec<usize>,
        rows: usize,
        column: usize,
    },

    #[error("inference runtime failed: {0}")]
    Runtime(String),
}

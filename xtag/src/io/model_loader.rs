// Copyright (c) 2025 Pratik Barhate
// Licensed under the MIT License. See the LICENSE file in the project root for more information.

use std::io::Cursor;
use tract_onnx::prelude::*;
use tracing::info;

use crate::error::ConfigError;
use crate::inference::TractSession;

/// Parses an ONNX graph, optimizes it once and opens a session on it.
///
/// # Arguments
/// * `graph_bytes` - Serialized ONNX graph of the trained network.
///
/// # Returns
/// * `Result<TractSession, ConfigError>` - The session, or a fatal configuration error.
pub fn load_graph(graph_bytes: &[u8]) -> Result<TractSession, ConfigError> {
    let mut reader = Cursor::new(graph_bytes);
    let model = tract_onnx::onnx()
        .model_for_read(&mut reader)
        .and_then(|model| model.into_optimized())
        .and_then(|model| model.into_runnable())
        .map_err(|e| ConfigError::Graph(e.to_string()))?;

    let session = TractSession::new(model)?;
    info!(
        bytes = graph_bytes.len(),
        inputs = ?crate::inference::InferenceSession::input_names(&session),
        outputs = ?crate::inference::InferenceSession::output_names(&session),
        "graph loaded"
    );
    Ok(session)
}

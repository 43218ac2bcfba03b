// Copyright (c) 2025 Pratik Barhate
// Licensed under the MIT License. See the LICENSE file in the project root for more information.

//! Inference session: a loaded graph executed against named input tensors.

use tract_onnx::prelude::*;
use tracing::debug;

use crate::error::{ConfigError, InferenceError};
use crate::inference::TractRunnableModel;

/// A dense `f32` tensor tagged with the graph node name it feeds or comes from.
#[derive(Clone, Debug, PartialEq)]
pub struct NamedTensor {
    pub name: String,
    pub value: tract_ndarray::ArrayD<f32>,
}

impl NamedTensor {
    pub fn new(name: &str, value: tract_ndarray::ArrayD<f32>) -> Self {
        NamedTensor {
            name: name.to_string(),
            value,
        }
    }
}

/// Executes forward passes of one loaded, immutable graph.
///
/// A session is owned by exactly one producer. `run` takes `&mut self` because callers
/// must not share a session between concurrent events.
pub trait InferenceSession: Send {
    /// Names of the graph inputs.
    fn input_names(&self) -> Vec<String>;

    /// Names of the graph outputs.
    fn output_names(&self) -> Vec<String>;

    /// Runs the graph once and returns the requested outputs in request order.
    ///
    /// # Arguments
    /// * `inputs` - One tensor per graph input, in any order.
    /// * `outputs` - Names of the outputs to return.
    fn run(
        &mut self,
        inputs: &[NamedTensor],
        outputs: &[String],
    ) -> Result<Vec<NamedTensor>, InferenceError>;
}

/// [`InferenceSession`] backed by a tract runnable model.
#[derive(Debug)]
pub struct TractSession {
    model: TractRunnableModel,
    input_names: Vec<String>,
    output_names: Vec<String>,
}

impl TractSession {
    /// Wraps a runnable model, resolving the names of its inputs and outputs.
    ///
    /// Inputs are named after their source nodes. Outputs use the outlet label when the
    /// graph defines one (ONNX output names), else the producing node name.
    pub fn new(model: TractRunnableModel) -> Result<Self, ConfigError> {
        let graph = model.model();
        let input_names = graph
            .input_outlets()
            .map_err(|e| ConfigError::Graph(e.to_string()))?
            .iter()
            .map(|outlet| graph.node(outlet.node).name.clone())
            .collect();
        let output_names = graph
            .output_outlets()
            .map_err(|e| ConfigError::Graph(e.to_string()))?
            .iter()
            .map(|outlet| match graph.outlet_label(*outlet) {
                Some(label) => label.to_string(),
                None => graph.node(outlet.node).name.clone(),
            })
            .collect();

        Ok(TractSession {
            model,
            input_names,
            output_names,
        })
    }
}

impl InferenceSession for TractSession {
    fn input_names(&self) -> Vec<String> {
        self.input_names.clone()
    }

    fn output_names(&self) -> Vec<String> {
        self.output_names.clone()
    }

    fn run(
        &mut self,
        inputs: &[NamedTensor],
        outputs: &[String],
    ) -> Result<Vec<NamedTensor>, InferenceError> {
        if let Some(unknown) = inputs.iter().find(|t| !self.input_names.contains(&t.name)) {
            return Err(InferenceError::UnknownInput(unknown.name.clone()));
        }
        let output_slots = outputs
            .iter()
            .map(|name| {
                self.output_names
                    .iter()
                    .position(|candidate| candidate == name)
                    .ok_or_else(|| InferenceError::UnknownOutput(name.clone()))
            })
            .collect::<Result<Vec<usize>, InferenceError>>()?;

        // tract takes inputs positionally, in graph input order
        let mut ordered = TVec::with_capacity(self.input_names.len());
        for name in &self.input_names {
            let tensor = inputs
                .iter()
                .find(|t| &t.name == name)
                .ok_or_else(|| InferenceError::MissingInput(name.clone()))?;
            ordered.push(TValue::Const(tensor.value.clone().into_arc_tensor()));
        }

        let results = self
            .model
            .run(ordered)
            .map_err(|e| InferenceError::Runtime(e.to_string()))?;
        debug!(outputs = results.len(), "tract run finished");

        output_slots
            .into_iter()
            .zip(outputs)
            .map(|(slot, name)| {
                let view = results[slot]
                    .to_array_view::<f32>()
                    .map_err(|e| InferenceError::Runtime(e.to_string()))?;
                Ok(NamedTensor::new(name, view.to_owned()))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::load_graph;
    use tract_onnx::tract_core::internal::*;
    use tract_onnx::tract_core::ops::math;

    /// Two-input graph computing `diff = a - b` on `[1, 2]` tensors.
    fn difference_session() -> TractResult<TractSession> {
        let mut model = TypedModel::default();
        let a = model.add_source("a", f32::fact([1usize, 2]))?;
        let b = model.add_source("b", f32::fact([1usize, 2]))?;
        let diff = model.wire_node("diff", math::sub(), &[a, b])?[0];
        model.set_output_outlets(&[diff])?;
        Ok(TractSession::new(model.into_runnable()?).unwrap())
    }

    fn row(name: &str, values: [f32; 2]) -> NamedTensor {
        NamedTensor::new(name, tract_ndarray::arr2(&[values]).into_dyn())
    }

    #[test]
    fn test_session_resolves_graph_names() -> TractResult<()> {
        let session = difference_session()?;

        assert_eq!(session.input_names(), vec!["a", "b"]);
        assert_eq!(session.output_names(), vec!["diff"]);
        Ok(())
    }

    #[test]
    fn test_run_matches_inputs_by_name() -> TractResult<()> {
        let mut session = difference_session()?;

        // supplied in reverse graph order
        let inputs = vec![row("b", [1.0, 5.0]), row("a", [5.0, 2.0])];
        let outputs = session.run(&inputs, &["diff".to_string()]).unwrap();

        assert_eq!(outputs.len(), 1);
        assert_eq!(outputs[0].name, "diff");
        assert_eq!(outputs[0].value.shape(), &[1, 2]);
        assert_eq!(outputs[0].value[[0, 0]], 4.0);
        assert_eq!(outputs[0].value[[0, 1]], -3.0);
        Ok(())
    }

    #[test]
    fn test_run_rejects_missing_input() -> TractResult<()> {
        let mut session = difference_session()?;

        let result = session.run(&[row("a", [1.0, 2.0])], &["diff".to_string()]);
        assert!(matches!(result, Err(InferenceError::MissingInput(name)) if name == "b"));
        Ok(())
    }

    #[test]
    fn test_run_rejects_unknown_input() -> TractResult<()> {
        let mut session = difference_session()?;

        let inputs = vec![row("a", [1.0, 2.0]), row("b", [1.0, 2.0]), row("c", [0.0, 0.0])];
        let result = session.run(&inputs, &["diff".to_string()]);
        assert!(matches!(result, Err(InferenceError::UnknownInput(name)) if name == "c"));
        Ok(())
    }

    #[test]
    fn test_run_rejects_unknown_output() -> TractResult<()> {
        let mut session = difference_session()?;

        let inputs = vec![row("a", [1.0, 2.0]), row("b", [1.0, 2.0])];
        let result = session.run(&inputs, &["nope".to_string()]);
        assert!(matches!(result, Err(InferenceError::UnknownOutput(name)) if name == "nope"));
        Ok(())
    }

    #[test]
    fn test_named_tensor_new() {
        let tensor = NamedTensor::new("gen", tract_ndarray::ArrayD::zeros(vec![2, 1]));

        assert_eq!(tensor.name, "gen");
        assert_eq!(tensor.value.shape(), &[2, 1]);
    }

    #[test]
    fn test_load_graph_rejects_garbage() {
        let result = load_graph(b"definitely not an onnx graph");
        assert!(matches!(result, Err(ConfigError::Graph(_))));
    }
}

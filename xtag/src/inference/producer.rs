// Copyright (c) 2025 Pratik Barhate
// Licensed under the MIT License. See the LICENSE file in the project root for more information.

//! Multi-hypothesis producer: one tensor assembly per event, one inference run per
//! decay-length hypothesis, one labelled score collection per hypothesis.

use std::collections::HashMap;
use std::time::Instant;
use tract_onnx::prelude::tract_ndarray::Axis;
use tracing::{debug, info};

use crate::config::{CtauHypothesis, ProducerConfig};
use crate::error::{ConfigError, InferenceError};
use crate::features::{JetRef, TagInfo};
use crate::inference::assembly::{self, GEN_INPUT, INPUT_NAMES};
use crate::inference::{InferenceSession, NamedTensor};

/// Scores of one event for one hypothesis, keyed by jet.
///
/// `product` is the jet collection the scores refer to, taken from the first jet of the
/// event; an empty event has none.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct JetTagCollection {
    product: Option<u32>,
    tags: Vec<(JetRef, f32)>,
    /// Position of each jet in `tags`.
    index: HashMap<JetRef, usize>,
}

impl JetTagCollection {
    pub fn new(product: Option<u32>) -> Self {
        JetTagCollection {
            product,
            tags: Vec::new(),
            index: HashMap::new(),
        }
    }

    pub fn with_capacity(product: Option<u32>, capacity: usize) -> Self {
        JetTagCollection {
            product,
            tags: Vec::with_capacity(capacity),
            index: HashMap::with_capacity(capacity),
        }
    }

    /// Sets the score of `jet`, replacing any earlier score for the same jet.
    pub fn insert(&mut self, jet: JetRef, score: f32) {
        match self.index.get(&jet) {
            Some(&position) => self.tags[position].1 = score,
            None => {
                self.index.insert(jet, self.tags.len());
                self.tags.push((jet, score));
            }
        }
    }

    pub fn get(&self, jet: &JetRef) -> Option<f32> {
        self.index.get(jet).map(|&position| self.tags[position].1)
    }

    pub fn product(&self) -> Option<u32> {
        self.product
    }

    pub fn len(&self) -> usize {
        self.tags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }

    /// Entries in jet insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &(JetRef, f32)> {
        self.tags.iter()
    }
}

/// A score collection published under a hypothesis label.
#[derive(Clone, Debug, PartialEq)]
pub struct LabeledTags {
    pub label: String,
    pub tags: JetTagCollection,
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct EventTimings {
    pub assembly_micros: u128,
    pub inference_micros: u128,
    pub jet_count: usize,
}

/// Everything produced for one event.
#[derive(Clone, Debug, PartialEq)]
pub struct EventOutput {
    /// One entry per configured hypothesis, in configured order.
    pub collections: Vec<LabeledTags>,
    pub timings: EventTimings,
}

/// Capability a hosting harness drives: process events one at a time.
pub trait EventProducer: Send {
    /// Labels of the collections every event produces, in output order.
    fn output_labels(&self) -> Vec<String>;

    /// Processes one event. Either every hypothesis succeeds or the event fails.
    fn process_event(&mut self, tag_infos: &[TagInfo]) -> Result<EventOutput, InferenceError>;
}

/// Jet tagger over an exclusively owned inference session.
#[derive(Debug)]
pub struct XTagProducer<S> {
    session: S,
    hypotheses: Vec<CtauHypothesis>,
    output_name: String,
    score_index: usize,
    dump_tensors: bool,
}

impl<S: InferenceSession> XTagProducer<S> {
    /// Validates the configuration against the session's graph and takes ownership of it.
    ///
    /// # Arguments
    /// * `config` - Producer configuration; rejected if the hypothesis table is malformed.
    /// * `session` - Loaded graph; rejected if it lacks an input or the configured output.
    pub fn initialize(config: &ProducerConfig, session: S) -> Result<Self, ConfigError> {
        config.validate()?;

        let graph_inputs = session.input_names();
        for name in INPUT_NAMES {
            if !graph_inputs.iter().any(|input| input == name) {
                return Err(ConfigError::MissingGraphInput(name.to_string()));
            }
        }
        if !session.output_names().contains(&config.output_name) {
            return Err(ConfigError::MissingGraphOutput(config.output_name.clone()));
        }

        let hypotheses = config.hypotheses();
        info!(
            graph = %config.graph_path,
            hypotheses = ?hypotheses.iter().map(|h| h.label.as_str()).collect::<Vec<_>>(),
            output = %config.output_name,
            score_index = config.score_index,
            "XTag producer initialized"
        );

        Ok(XTagProducer {
            session,
            hypotheses,
            output_name: config.output_name.clone(),
            score_index: config.score_index,
            dump_tensors: config.dump_tensors,
        })
    }

    pub fn hypotheses(&self) -> &[CtauHypothesis] {
        &self.hypotheses
    }

    /// Runs every hypothesis against the same assembled tensors.
    ///
    /// 1. Assemble the five input tensors once.
    /// 2. Per hypothesis, broadcast its value into `gen`, run the graph and take the
    ///    configured score column for each jet.
    /// 3. Return one collection per hypothesis, in configured order.
    ///
    /// Empty events skip inference and yield empty collections for every label.
    pub fn produce(&mut self, tag_infos: &[TagInfo]) -> Result<EventOutput, InferenceError> {
        let assembly_start = Instant::now();
        let batch = assembly::assemble(tag_infos);
        if self.dump_tensors {
            batch.dump_rows();
        }
        for tag_info in tag_infos {
            let kept = assembly::filled_slots(&tag_info.features);
            let supplied = (
                tag_info.features.cpf.len(),
                tag_info.features.npf.len(),
                tag_info.features.sv.len(),
            );
            if kept != supplied {
                debug!(jet = ?tag_info.jet, ?supplied, ?kept, "candidates truncated");
            }
        }
        let batch_size = batch.batch_size();
        let mut inputs = batch.into_named();

        let inference_start = Instant::now();
        let product = tag_infos.first().map(|tag_info| tag_info.jet.product);
        let requested = [self.output_name.clone()];
        let mut collections = Vec::with_capacity(self.hypotheses.len());

        for hypothesis in &self.hypotheses {
            let mut tags = JetTagCollection::with_capacity(product, batch_size);
            if batch_size > 0 {
                broadcast_hypothesis(&mut inputs, hypothesis.value as f32);
                let outputs = self.session.run(&inputs, &requested)?;
                let scores =
                    extract_scores(outputs, &self.output_name, batch_size, self.score_index)?;
                for (tag_info, score) in tag_infos.iter().zip(scores) {
                    tags.insert(tag_info.jet, score);
                }
            }
            debug!(label = %hypothesis.label, jets = tags.len(), "hypothesis scored");
            collections.push(LabeledTags {
                label: hypothesis.label.clone(),
                tags,
            });
        }
        let inference_end = Instant::now();

        Ok(EventOutput {
            collections,
            timings: EventTimings {
                assembly_micros: (inference_start - assembly_start).as_micros(),
                inference_micros: (inference_end - inference_start).as_micros(),
                jet_count: batch_size,
            },
        })
    }
}

impl<S: InferenceSession> EventProducer for XTagProducer<S> {
    fn output_labels(&self) -> Vec<String> {
        self.hypotheses.iter().map(|h| h.label.clone()).collect()
    }

    fn process_event(&mut self, tag_infos: &[TagInfo]) -> Result<EventOutput, InferenceError> {
        self.produce(tag_infos)
    }
}

/// Writes `value` into every row of the `gen` input; all other inputs stay untouched.
fn broadcast_hypothesis(inputs: &mut [NamedTensor], value: f32) {
    if let Some(gen) = inputs.iter_mut().find(|t| t.name == GEN_INPUT) {
        gen.value.fill(value);
    }
}

/// Pulls column `score_index` of the named 2-D output, one value per jet.
fn extract_scores(
    outputs: Vec<NamedTensor>,
    output_name: &str,
    batch_size: usize,
    score_index: usize,
) -> Result<Vec<f32>, InferenceError> {
    let prediction = outputs
        .into_iter()
        .find(|t| t.name == output_name)
        .ok_or_else(|| InferenceError::UnknownOutput(output_name.to_string()))?;

    let shape = prediction.value.shape().to_vec();
    if shape.len() != 2 || shape[0] != batch_size || shape[1] <= score_index {
        return Err(InferenceError::OutputShape {
            name: output_name.to_string(),
            shape,
            rows: batch_size,
            column: score_index,
        });
    }

    Ok(prediction
        .value
        .index_axis(Axis(1), score_index)
        .iter()
        .copied()
        .collect())
}

// Copyright (c) 2025 Pratik Barhate
// Licensed under the MIT License. See the LICENSE file in the project root for more information.

//! Producer configuration: graph location, decay-length hypotheses and output selection.

use serde::Deserialize;
use std::collections::HashSet;

use crate::error::ConfigError;

fn default_ctau_values() -> Vec<f64> {
    vec![-2.0, 0.0, 3.0]
}

fn default_ctau_descriptors() -> Vec<String> {
    vec!["0p01".to_string(), "1".to_string(), "1000".to_string()]
}

fn default_output_name() -> String {
    "prediction".to_string()
}

fn default_score_index() -> usize {
    4
}

/// One decay-length hypothesis: the label its output is published under and the value
/// broadcast into the `gen` input.
///
/// The value is fed to the network as configured; any calibration to a physical length
/// happened when the network was trained.
#[derive(Clone, Debug, PartialEq)]
pub struct CtauHypothesis {
    pub label: String,
    pub value: f64,
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct ProducerConfig {
    /// Location of the ONNX graph, local path or `s3://bucket/key`.
    pub graph_path: String,
    #[serde(default = "default_ctau_values")]
    pub ctau_values: Vec<f64>,
    #[serde(default = "default_ctau_descriptors")]
    pub ctau_descriptors: Vec<String>,
    #[serde(default = "default_output_name")]
    pub output_name: String,
    /// Column of the prediction output taken as the jet score (the long-lived class).
    #[serde(default = "default_score_index")]
    pub score_index: usize,
    /// Log every assembled input row at DEBUG level.
    #[serde(default)]
    pub dump_tensors: bool,
}

impl ProducerConfig {
    pub fn new(graph_path: &str) -> Self {
        ProducerConfig {
            graph_path: graph_path.to_string(),
            ctau_values: default_ctau_values(),
            ctau_descriptors: default_ctau_descriptors(),
            output_name: default_output_name(),
            score_index: default_score_index(),
            dump_tensors: false,
        }
    }

    pub fn from_json(json_str: &str) -> Result<Self, ConfigError> {
        let config: ProducerConfig = serde_json::from_str(json_str)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks the hypothesis table and output selection.
    ///
    /// Values and descriptors pair up by position, so their lengths must agree. Labels name
    /// output collections and must be non-empty and unique.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.ctau_values.len() != self.ctau_descriptors.len() {
            return Err(ConfigError::HypothesisLengthMismatch {
                values: self.ctau_values.len(),
                labels: self.ctau_descriptors.len(),
            });
        }
        if self.ctau_values.is_empty() {
            return Err(ConfigError::NoHypotheses);
        }

        let mut seen = HashSet::with_capacity(self.ctau_descriptors.len());
        for (position, (label, value)) in self
            .ctau_descriptors
            .iter()
            .zip(&self.ctau_values)
            .enumerate()
        {
            if label.is_empty() {
                return Err(ConfigError::EmptyLabel(position));
            }
            if !seen.insert(label.as_str()) {
                return Err(ConfigError::DuplicateLabel(label.clone()));
            }
            if !value.is_finite() {
                return Err(ConfigError::NonFiniteValue {
                    label: label.clone(),
                    value: *value,
                });
            }
        }

        if self.output_name.is_empty() {
            return Err(ConfigError::EmptyOutputName);
        }
        Ok(())
    }

    /// The hypothesis table in configured order.
    pub fn hypotheses(&self) -> Vec<CtauHypothesis> {
        self.ctau_descriptors
            .iter()
            .zip(&self.ctau_values)
            .map(|(label, value)| CtauHypothesis {
                label: label.clone(),
                value: *value,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid_json() {
        let json = r#"{
            "graph_path": "s3://xtag-models/da.onnx",
            "ctau_values": [-1.0, 1.0],
            "ctau_descriptors": ["0p1", "10"],
            "output_name": "scores",
            "score_index": 2,
            "dump_tensors": true
        }"#;

        let config = ProducerConfig::from_json(json).unwrap();

        assert_eq!(config.graph_path, "s3://xtag-models/da.onnx");
        assert_eq!(config.output_name, "scores");
        assert_eq!(config.score_index, 2);
        assert!(config.dump_tensors);
        assert_eq!(
            config.hypotheses(),
            vec![
                CtauHypothesis {
                    label: "0p1".to_string(),
                    value: -1.0
                },
                CtauHypothesis {
                    label: "10".to_string(),
                    value: 1.0
                },
            ]
        );
    }

    #[test]
    fn test_default_values() {
        let config = ProducerConfig::from_json(r#"{"graph_path": "data/da.onnx"}"#).unwrap();

        assert_eq!(config, ProducerConfig::new("data/da.onnx"));
        assert_eq!(config.ctau_values, vec![-2.0, 0.0, 3.0]);
        assert_eq!(config.ctau_descriptors, vec!["0p01", "1", "1000"]);
        assert_eq!(config.output_name, "prediction");
        assert_eq!(config.score_index, 4);
        assert!(!config.dump_tensors);
    }

    #[test]
    fn test_length_mismatch_rejected() {
        let json = r#"{
            "graph_path": "data/da.onnx",
            "ctau_values": [-2.0, 0.0, 3.0],
            "ctau_descriptors": ["0p01", "1"]
        }"#;

        match ProducerConfig::from_json(json) {
            Err(ConfigError::HypothesisLengthMismatch { values, labels }) => {
                assert_eq!(values, 3);
                assert_eq!(labels, 2);
            }
            other => panic!("expected length mismatch, got {:?}", other),
        }
    }

    #[test]
    fn test_empty_hypotheses_rejected() {
        let json = r#"{"graph_path": "x", "ctau_values": [], "ctau_descriptors": []}"#;
        assert!(matches!(
            ProducerConfig::from_json(json),
            Err(ConfigError::NoHypotheses)
        ));
    }

    #[test]
    fn test_duplicate_label_rejected() {
        let mut config = ProducerConfig::new("x");
        config.ctau_descriptors = vec!["1".to_string(), "1".to_string(), "1000".to_string()];

        assert!(matches!(
            config.validate(),
            Err(ConfigError::DuplicateLabel(label)) if label == "1"
        ));
    }

    #[test]
    fn test_empty_label_rejected() {
        let mut config = ProducerConfig::new("x");
        config.ctau_descriptors[2] = String::new();

        assert!(matches!(config.validate(), Err(ConfigError::EmptyLabel(2))));
    }

    #[test]
    fn test_non_finite_value_rejected() {
        let mut config = ProducerConfig::new("x");
        config.ctau_values[1] = f64::NAN;

        assert!(matches!(
            config.validate(),
            Err(ConfigError::NonFiniteValue { .. })
        ));
    }

    #[test]
    fn test_empty_output_name_rejected() {
        let mut config = ProducerConfig::new("x");
        config.output_name = String::new();

        assert!(matches!(config.validate(), Err(ConfigError::EmptyOutputName)));
    }

    #[test]
    fn test_missing_graph_path() {
        assert!(matches!(
            ProducerConfig::from_json(r#"{"ctau_values": [1.0], "ctau_descriptors": ["1"]}"#),
            Err(ConfigError::Parse(_))
        ));
    }
}

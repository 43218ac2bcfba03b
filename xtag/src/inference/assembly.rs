// Copyright (c) 2025 Pratik Barhate
// Licensed under the MIT License. See the LICENSE file in the project root for more information.

//! Assembles the per-jet feature records of one event into the network input tensors.
//!
//! Every tensor has the batch (jet count) as first dimension. Candidate groups have a fixed
//! number of slots per jet: candidates are copied in supplied order, extra candidates are
//! dropped, and unused slots stay zero.

use tract_onnx::prelude::tract_ndarray::{Array2, Array3, ArrayViewMut1, Axis};
use tracing::debug;

use crate::features::{FeatureRow, TagInfo, TagInfoFeatures};
use crate::inference::NamedTensor;

pub const GLOBAL_VARS: usize = 14;
pub const CPF_SLOTS: usize = 25;
pub const CPF_FEATURES: usize = 18;
pub const NPF_SLOTS: usize = 25;
pub const NPF_FEATURES: usize = 6;
pub const SV_SLOTS: usize = 4;
pub const SV_FEATURES: usize = 12;

pub const GLOBALVARS_INPUT: &str = "globalvars";
pub const CPF_INPUT: &str = "cpf";
pub const NPF_INPUT: &str = "npf";
pub const SV_INPUT: &str = "sv";
pub const GEN_INPUT: &str = "gen";

/// Graph input names in wire order.
pub const INPUT_NAMES: [&str; 5] = [GLOBALVARS_INPUT, CPF_INPUT, NPF_INPUT, SV_INPUT, GEN_INPUT];

/// The five input tensors of one event.
#[derive(Clone, Debug, PartialEq)]
pub struct TensorBatch {
    pub globalvars: Array2<f32>,
    pub cpf: Array3<f32>,
    pub npf: Array3<f32>,
    pub sv: Array3<f32>,
    /// Hypothesis scalar, left zero by the assembler.
    pub gen: Array2<f32>,
}

impl TensorBatch {
    /// Zero-filled tensors for `batch_size` jets.
    pub fn zeros(batch_size: usize) -> Self {
        TensorBatch {
            globalvars: Array2::zeros((batch_size, GLOBAL_VARS)),
            cpf: Array3::zeros((batch_size, CPF_SLOTS, CPF_FEATURES)),
            npf: Array3::zeros((batch_size, NPF_SLOTS, NPF_FEATURES)),
            sv: Array3::zeros((batch_size, SV_SLOTS, SV_FEATURES)),
            gen: Array2::zeros((batch_size, 1)),
        }
    }

    pub fn batch_size(&self) -> usize {
        self.globalvars.nrows()
    }

    /// Converts into named tensors, in the order of [`INPUT_NAMES`].
    pub fn into_named(self) -> Vec<NamedTensor> {
        vec![
            NamedTensor::new(GLOBALVARS_INPUT, self.globalvars.into_dyn()),
            NamedTensor::new(CPF_INPUT, self.cpf.into_dyn()),
            NamedTensor::new(NPF_INPUT, self.npf.into_dyn()),
            NamedTensor::new(SV_INPUT, self.sv.into_dyn()),
            NamedTensor::new(GEN_INPUT, self.gen.into_dyn()),
        ]
    }

    /// Logs every jet row and every filled candidate slot at DEBUG level.
    pub fn dump_rows(&self) {
        for jet in 0..self.batch_size() {
            debug!(jet, row = ?self.globalvars.row(jet).to_vec(), "globalvars");
            dump_group(CPF_INPUT, &self.cpf, jet);
            dump_group(NPF_INPUT, &self.npf, jet);
            dump_group(SV_INPUT, &self.sv, jet);
        }
    }
}

fn dump_group(group: &str, tensor: &Array3<f32>, jet: usize) {
    let rows = tensor.index_axis(Axis(0), jet);
    for (slot, row) in rows.outer_iter().enumerate() {
        if row.iter().any(|v| *v != 0.0) {
            debug!(group, jet, slot, row = ?row.to_vec(), "candidate slot");
        }
    }
}

/// Builds the input tensors for one event.
///
/// Never fails: an empty event gives tensors with a zero-length batch dimension, and jets
/// without candidates keep all-zero slots.
pub fn assemble(tag_infos: &[TagInfo]) -> TensorBatch {
    let mut batch = TensorBatch::zeros(tag_infos.len());

    for (jet, tag_info) in tag_infos.iter().enumerate() {
        let features = &tag_info.features;
        write_row(
            batch.globalvars.row_mut(jet),
            &FeatureRow::<GLOBAL_VARS>::values(features),
        );
        fill_slots::<CPF_FEATURES, _>(&mut batch.cpf, jet, &features.cpf);
        fill_slots::<NPF_FEATURES, _>(&mut batch.npf, jet, &features.npf);
        fill_slots::<SV_FEATURES, _>(&mut batch.sv, jet, &features.sv);
    }

    batch
}

/// Number of rows each candidate group of `features` contributes after truncation.
pub fn filled_slots(features: &TagInfoFeatures) -> (usize, usize, usize) {
    (
        features.cpf.len().min(CPF_SLOTS),
        features.npf.len().min(NPF_SLOTS),
        features.sv.len().min(SV_SLOTS),
    )
}

fn fill_slots<const N: usize, R: FeatureRow<N>>(
    tensor: &mut Array3<f32>,
    jet: usize,
    candidates: &[R],
) {
    let slots = tensor.len_of(Axis(1));
    let mut jet_rows = tensor.index_axis_mut(Axis(0), jet);
    for (slot, candidate) in candidates.iter().take(slots).enumerate() {
        write_row(jet_rows.row_mut(slot), &candidate.values());
    }
}

fn write_row(mut row: ArrayViewMut1<f32>, values: &[f32]) {
    debug_assert_eq!(row.len(), values.len());
    for (dst, src) in row.iter_mut().zip(values) {
        *dst = *src;
    }
}

// Copyright (c) 2025 Pratik Barhate
// Licensed under the MIT License. See the LICENSE file in the project root for more information.

//! Builders shared by the unit tests.

use crate::features::{
    ChargedCandidateFeatures, JetFeatures, JetRef, NeutralCandidateFeatures,
    SecondaryVertexFeatures, ShallowTagInfoFeatures, TagInfo, TagInfoFeatures,
};

pub(crate) fn shallow_features(value: f32) -> ShallowTagInfoFeatures {
    ShallowTagInfoFeatures {
        track_sum_jet_et_ratio: value,
        track_sum_jet_delta_r: value,
        vertex_category: value,
        track_sip2d_val_above_charm: value,
        track_sip2d_sig_above_charm: value,
        track_sip3d_val_above_charm: value,
        track_sip3d_sig_above_charm: value,
        jet_n_tracks_eta_rel: value,
        jet_n_selected_tracks: value,
    }
}

pub(crate) fn charged(ptrel: f32) -> ChargedCandidateFeatures {
    ChargedCandidateFeatures {
        ptrel,
        track_sip3d_sig: ptrel * 10.0,
        ..ChargedCandidateFeatures::default()
    }
}

pub(crate) fn neutral(ptrel: f32) -> NeutralCandidateFeatures {
    NeutralCandidateFeatures {
        ptrel,
        puppi_weight: 1.0,
        ..NeutralCandidateFeatures::default()
    }
}

pub(crate) fn vertex(pt: f32) -> SecondaryVertexFeatures {
    SecondaryVertexFeatures {
        pt,
        energy_ratio: 0.5,
        ..SecondaryVertexFeatures::default()
    }
}

/// Tag info for jet `key` of product 1 with the requested candidate counts.
pub(crate) fn tag_info(key: u32, pt: f32, n_cpf: usize, n_npf: usize, n_sv: usize) -> TagInfo {
    TagInfo {
        jet: JetRef { product: 1, key },
        features: TagInfoFeatures {
            jet: JetFeatures {
                jet_idx: key as i32,
                pt,
                eta: 0.5,
                mass: 10.0,
                n60: 2,
                n90: 5,
                ..JetFeatures::default()
            },
            shallow: shallow_features(0.25),
            cpf: (0..n_cpf).map(|i| charged(i as f32 + 1.0)).collect(),
            npf: (0..n_npf).map(|i| neutral(i as f32 + 1.0)).collect(),
            sv: (0..n_sv).map(|i| vertex(i as f32 + 1.0)).collect(),
        },
    }
}

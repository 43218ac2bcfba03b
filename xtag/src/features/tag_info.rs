// Copyright (c) 2025 Pratik Barhate
// Licensed under the MIT License. See the LICENSE file in the project root for more information.

use serde::{Deserialize, Serialize};

use crate::features::{
    ChargedCandidateFeatures, FeatureRow, JetFeatures, NeutralCandidateFeatures,
    SecondaryVertexFeatures, ShallowTagInfoFeatures,
};

/// Stable identity of a jet within the event that produced it.
///
/// `product` identifies the jet collection, `key` the jet's position inside it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct JetRef {
    pub product: u32,
    pub key: u32,
}

/// All features extracted for one jet.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TagInfoFeatures {
    #[serde(default)]
    pub jet: JetFeatures,
    pub shallow: ShallowTagInfoFeatures,
    #[serde(default)]
    pub cpf: Vec<ChargedCandidateFeatures>,
    #[serde(default)]
    pub npf: Vec<NeutralCandidateFeatures>,
    #[serde(default)]
    pub sv: Vec<SecondaryVertexFeatures>,
}

/// Per-jet tag-info record: the jet it belongs to and its features.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TagInfo {
    pub jet: JetRef,
    pub features: TagInfoFeatures,
}

/// Jet-level row of the `globalvars` input.
impl FeatureRow<14> for TagInfoFeatures {
    const FIELDS: [&'static str; 14] = [
        "jet_pt",
        "jet_eta",
        "jet_n60",
        "jet_n90",
        "track_sum_jet_et_ratio",
        "track_sum_jet_delta_r",
        "vertex_category",
        "track_sip2d_val_above_charm",
        "track_sip2d_sig_above_charm",
        "track_sip3d_val_above_charm",
        "track_sip3d_sig_above_charm",
        "jet_n_tracks_eta_rel",
        "jet_n_selected_tracks",
        "jet_mass",
    ];

    fn values(&self) -> [f32; 14] {
        let jet = &self.jet;
        let shallow = &self.shallow;
        [
            jet.pt,
            jet.eta,
            jet.n60 as f32,
            jet.n90 as f32,
            shallow.track_sum_jet_et_ratio,
            shallow.track_sum_jet_delta_r,
            shallow.vertex_category,
            shallow.track_sip2d_val_above_charm,
            shallow.track_sip2d_sig_above_charm,
            shallow.track_sip3d_val_above_charm,
            shallow.track_sip3d_sig_above_charm,
            shallow.jet_n_tracks_eta_rel,
            shallow.jet_n_selected_tracks,
            jet.mass,
        ]
    }
}

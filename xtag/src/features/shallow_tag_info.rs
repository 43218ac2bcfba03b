// Copyright (c) 2025 Pratik Barhate
// Licensed under the MIT License. See the LICENSE file in the project root for more information.

use serde::{Deserialize, Serialize};

/// Secondary-vertex and impact-parameter summary of a jet.
///
/// The producer always fills every field, so there are no defaults.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ShallowTagInfoFeatures {
    /// Track-sum transverse energy over jet energy.
    pub track_sum_jet_et_ratio: f32,
    /// Angular distance between the jet axis and the track four-vector sum.
    pub track_sum_jet_delta_r: f32,
    /// Secondary vertex category (reco, pseudo, none).
    pub vertex_category: f32,
    // signed impact parameter of the first track lifting the vertex mass above charm
    pub track_sip2d_val_above_charm: f32,
    pub track_sip2d_sig_above_charm: f32,
    pub track_sip3d_val_above_charm: f32,
    pub track_sip3d_sig_above_charm: f32,
    /// Tracks for which the relative pseudorapidity is computed.
    pub jet_n_tracks_eta_rel: f32,
    pub jet_n_selected_tracks: f32,
}

// Copyright (c) 2025 Pratik Barhate
// Licensed under the MIT License. See the LICENSE file in the project root for more information.

//! Charged candidate, neutral candidate and secondary vertex records.

use serde::{Deserialize, Serialize};

use crate::features::FeatureRow;

/// Charged particle-flow candidate associated with a jet.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChargedCandidateFeatures {
    pub ptrel: f32,
    pub deta: f32,
    pub dphi: f32,
    pub delta_r: f32,
    /// Smallest distance to any secondary vertex axis.
    pub drminsv: f32,
    pub from_pv: f32,
    pub vertex_association: f32,
    pub puppi_weight: f32,
    pub track_chi2: f32,
    pub track_quality: f32,
    pub track_eta_rel: f32,
    pub track_pt_rel: f32,
    pub track_delta_r: f32,
    pub track_pt_ratio: f32,
    pub track_sip2d_val: f32,
    pub track_sip2d_sig: f32,
    pub track_sip3d_val: f32,
    pub track_sip3d_sig: f32,
}

impl FeatureRow<18> for ChargedCandidateFeatures {
    const FIELDS: [&'static str; 18] = [
        "ptrel",
        "deta",
        "dphi",
        "delta_r",
        "drminsv",
        "from_pv",
        "vertex_association",
        "puppi_weight",
        "track_chi2",
        "track_quality",
        "track_eta_rel",
        "track_pt_rel",
        "track_delta_r",
        "track_pt_ratio",
        "track_sip2d_val",
        "track_sip2d_sig",
        "track_sip3d_val",
        "track_sip3d_sig",
    ];

    fn values(&self) -> [f32; 18] {
        [
            self.ptrel,
            self.deta,
            self.dphi,
            self.delta_r,
            self.drminsv,
            self.from_pv,
            self.vertex_association,
            self.puppi_weight,
            self.track_chi2,
            self.track_quality,
            self.track_eta_rel,
            self.track_pt_rel,
            self.track_delta_r,
            self.track_pt_ratio,
            self.track_sip2d_val,
            self.track_sip2d_sig,
            self.track_sip3d_val,
            self.track_sip3d_sig,
        ]
    }
}

/// Neutral particle-flow candidate associated with a jet.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NeutralCandidateFeatures {
    pub ptrel: f32,
    pub delta_r: f32,
    pub is_gamma: f32,
    pub hcal_fraction: f32,
    pub drminsv: f32,
    pub puppi_weight: f32,
}

impl FeatureRow<6> for NeutralCandidateFeatures {
    const FIELDS: [&'static str; 6] = [
        "ptrel",
        "delta_r",
        "is_gamma",
        "hcal_fraction",
        "drminsv",
        "puppi_weight",
    ];

    fn values(&self) -> [f32; 6] {
        [
            self.ptrel,
            self.delta_r,
            self.is_gamma,
            self.hcal_fraction,
            self.drminsv,
            self.puppi_weight,
        ]
    }
}

/// Reconstructed secondary vertex matched to a jet.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SecondaryVertexFeatures {
    pub pt: f32,
    pub delta_r: f32,
    pub mass: f32,
    pub ntracks: f32,
    pub chi2: f32,
    pub normchi2: f32,
    pub dxy: f32,
    pub dxysig: f32,
    pub d3d: f32,
    pub d3dsig: f32,
    pub cos_theta_sv_pv: f32,
    /// Vertex energy over jet energy.
    pub energy_ratio: f32,
}

impl FeatureRow<12> for SecondaryVertexFeatures {
    const FIELDS: [&'static str; 12] = [
        "pt",
        "delta_r",
        "mass",
        "ntracks",
        "chi2",
        "normchi2",
        "dxy",
        "dxysig",
        "d3d",
        "d3dsig",
        "cos_theta_sv_pv",
        "energy_ratio",
    ];

    fn values(&self) -> [f32; 12] {
        [
            self.pt,
            self.delta_r,
            self.mass,
            self.ntracks,
            self.chi2,
            self.normchi2,
            self.dxy,
            self.dxysig,
            self.d3d,
            self.d3dsig,
            self.cos_theta_sv_pv,
            self.energy_ratio,
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{Map, Value};
    use std::collections::HashSet;

    /// Builds a record whose field `FIELDS[i]` holds the value `i + 1` via its JSON form,
    /// so the check below ties the field-order table to the actual struct fields.
    fn indexed_record<const N: usize, R>() -> R
    where
        R: FeatureRow<N> + serde::de::DeserializeOwned,
    {
        let mut map = Map::new();
        for (i, field) in R::FIELDS.iter().enumerate() {
            map.insert(field.to_string(), Value::from(i as f32 + 1.0));
        }
        serde_json::from_value(Value::Object(map)).unwrap()
    }

    fn assert_table_matches<const N: usize, R>()
    where
        R: FeatureRow<N> + Serialize + serde::de::DeserializeOwned,
    {
        let record: R = indexed_record::<N, R>();
        let expected: Vec<f32> = (1..=N).map(|i| i as f32).collect();
        assert_eq!(record.values().to_vec(), expected);

        // every struct field appears exactly once in the table
        let serialized = serde_json::to_value(&record).unwrap();
        let struct_fields: HashSet<String> =
            serialized.as_object().unwrap().keys().cloned().collect();
        let table_fields: HashSet<String> = R::FIELDS.iter().map(|f| f.to_string()).collect();
        assert_eq!(table_fields.len(), N, "duplicate entry in field table");
        assert_eq!(struct_fields, table_fields);
    }

    #[test]
    fn test_charged_candidate_field_order() {
        assert_table_matches::<18, ChargedCandidateFeatures>();
        assert_eq!(ChargedCandidateFeatures::FIELDS[0], "ptrel");
        assert_eq!(ChargedCandidateFeatures::FIELDS[17], "track_sip3d_sig");
    }

    #[test]
    fn test_neutral_candidate_field_order() {
        assert_table_matches::<6, NeutralCandidateFeatures>();
        assert_eq!(NeutralCandidateFeatures::FIELDS[2], "is_gamma");
    }

    #[test]
    fn test_secondary_vertex_field_order() {
        assert_table_matches::<12, SecondaryVertexFeatures>();
        assert_eq!(SecondaryVertexFeatures::FIELDS[11], "energy_ratio");
    }
}

// Copyright (c) 2025 Pratik Barhate
// Licensed under the MIT License. See the LICENSE file in the project root for more information.

//! Conversions between the wire messages and the tagger's records.

use thiserror::Error;
use xtag_proto::xtag as proto;

use crate::features::{
    ChargedCandidateFeatures, JetFeatures, JetRef, NeutralCandidateFeatures,
    SecondaryVertexFeatures, ShallowTagInfoFeatures, TagInfo, TagInfoFeatures, UNSET,
};
use crate::inference::LabeledTags;

#[derive(Debug, Error, PartialEq)]
pub enum RequestError {
    #[error("tag info {index} is missing field {field}")]
    MissingField { index: usize, field: &'static str },
}

impl From<proto::JetRef> for JetRef {
    fn from(jet: proto::JetRef) -> Self {
        JetRef {
            product: jet.product,
            key: jet.key,
        }
    }
}

impl From<JetRef> for proto::JetRef {
    fn from(jet: JetRef) -> Self {
        proto::JetRef {
            product: jet.product,
            key: jet.key,
        }
    }
}

/// Optional wire fields that were not sent keep the unset sentinel.
impl From<proto::JetFeatures> for JetFeatures {
    fn from(jet: proto::JetFeatures) -> Self {
        JetFeatures {
            jet_idx: jet.jet_idx.unwrap_or(-1),
            pt: jet.pt,
            eta: jet.eta,
            phi: jet.phi,
            mass: jet.mass,
            energy: jet.energy,
            area: jet.area,
            n60: jet.n60.unwrap_or(-1),
            n90: jet.n90.unwrap_or(-1),
            charged_em_energy_fraction: jet.charged_em_energy_fraction.unwrap_or(UNSET),
            charged_hadron_energy_fraction: jet.charged_hadron_energy_fraction.unwrap_or(UNSET),
            charged_mu_energy_fraction: jet.charged_mu_energy_fraction.unwrap_or(UNSET),
            electron_energy_fraction: jet.electron_energy_fraction.unwrap_or(UNSET),
            tau1: jet.tau1.unwrap_or(UNSET),
            tau2: jet.tau2.unwrap_or(UNSET),
            tau3: jet.tau3.unwrap_or(UNSET),
            rel_mass_drop_mass_ak: jet.rel_mass_drop_mass_ak.unwrap_or(UNSET),
            rel_mass_drop_mass_ca: jet.rel_mass_drop_mass_ca.unwrap_or(UNSET),
            rel_soft_drop_mass_ak: jet.rel_soft_drop_mass_ak.unwrap_or(UNSET),
            rel_soft_drop_mass_ca: jet.rel_soft_drop_mass_ca.unwrap_or(UNSET),
            thrust: jet.thrust.unwrap_or(UNSET),
            sphericity: jet.sphericity.unwrap_or(UNSET),
            circularity: jet.circularity.unwrap_or(UNSET),
            isotropy: jet.isotropy.unwrap_or(UNSET),
            event_shape_c: jet.event_shape_c.unwrap_or(UNSET),
            event_shape_d: jet.event_shape_d.unwrap_or(UNSET),
        }
    }
}

impl From<proto::ShallowTagInfoFeatures> for ShallowTagInfoFeatures {
    fn from(shallow: proto::ShallowTagInfoFeatures) -> Self {
        ShallowTagInfoFeatures {
            track_sum_jet_et_ratio: shallow.track_sum_jet_et_ratio,
            track_sum_jet_delta_r: shallow.track_sum_jet_delta_r,
            vertex_category: shallow.vertex_category,
            track_sip2d_val_above_charm: shallow.track_sip2d_val_above_charm,
            track_sip2d_sig_above_charm: shallow.track_sip2d_sig_above_charm,
            track_sip3d_val_above_charm: shallow.track_sip3d_val_above_charm,
            track_sip3d_sig_above_charm: shallow.track_sip3d_sig_above_charm,
            jet_n_tracks_eta_rel: shallow.jet_n_tracks_eta_rel,
            jet_n_selected_tracks: shallow.jet_n_selected_tracks,
        }
    }
}

impl From<proto::ChargedCandidate> for ChargedCandidateFeatures {
    fn from(cpf: proto::ChargedCandidate) -> Self {
        ChargedCandidateFeatures {
            ptrel: cpf.ptrel,
            deta: cpf.deta,
            dphi: cpf.dphi,
            delta_r: cpf.delta_r,
            drminsv: cpf.drminsv,
            from_pv: cpf.from_pv,
            vertex_association: cpf.vertex_association,
            puppi_weight: cpf.puppi_weight,
            track_chi2: cpf.track_chi2,
            track_quality: cpf.track_quality,
            track_eta_rel: cpf.track_eta_rel,
            track_pt_rel: cpf.track_pt_rel,
            track_delta_r: cpf.track_delta_r,
            track_pt_ratio: cpf.track_pt_ratio,
            track_sip2d_val: cpf.track_sip2d_val,
            track_sip2d_sig: cpf.track_sip2d_sig,
            track_sip3d_val: cpf.track_sip3d_val,
            track_sip3d_sig: cpf.track_sip3d_sig,
        }
    }
}

impl From<proto::NeutralCandidate> for NeutralCandidateFeatures {
    fn from(npf: proto::NeutralCandidate) -> Self {
        NeutralCandidateFeatures {
            ptrel: npf.ptrel,
            delta_r: npf.delta_r,
            is_gamma: npf.is_gamma,
            hcal_fraction: npf.hcal_fraction,
            drminsv: npf.drminsv,
            puppi_weight: npf.puppi_weight,
        }
    }
}

impl From<proto::SecondaryVertex> for SecondaryVertexFeatures {
    fn from(sv: proto::SecondaryVertex) -> Self {
        SecondaryVertexFeatures {
            pt: sv.pt,
            delta_r: sv.delta_r,
            mass: sv.mass,
            ntracks: sv.ntracks,
            chi2: sv.chi2,
            normchi2: sv.normchi2,
            dxy: sv.dxy,
            dxysig: sv.dxysig,
            d3d: sv.d3d,
            d3dsig: sv.d3dsig,
            cos_theta_sv_pv: sv.cos_theta_sv_pv,
            energy_ratio: sv.energy_ratio,
        }
    }
}

/// Converts the `index`-th tag info of a request.
///
/// The jet reference and the shallow features are required. A missing jet feature message
/// maps to the unset sentinels.
pub fn tag_info_from_proto(
    index: usize,
    tag_info: proto::TagInfo,
) -> Result<TagInfo, RequestError> {
    let jet = tag_info
        .jet
        .ok_or(RequestError::MissingField { index, field: "jet" })?;
    let shallow = tag_info.shallow.ok_or(RequestError::MissingField {
        index,
        field: "shallow",
    })?;

    Ok(TagInfo {
        jet: jet.into(),
        features: TagInfoFeatures {
            jet: tag_info.jet_features.map(Into::into).unwrap_or_default(),
            shallow: shallow.into(),
            cpf: tag_info.cpf.into_iter().map(Into::into).collect(),
            npf: tag_info.npf.into_iter().map(Into::into).collect(),
            sv: tag_info.sv.into_iter().map(Into::into).collect(),
        },
    })
}

impl From<LabeledTags> for proto::LabeledJetTags {
    fn from(labeled: LabeledTags) -> Self {
        proto::LabeledJetTags {
            label: labeled.label,
            product: labeled.tags.product(),
            tags: labeled
                .tags
                .iter()
                .map(|(jet, score)| proto::JetTag {
                    jet: Some((*jet).into()),
                    score: *score,
                })
                .collect(),
        }
    }
}

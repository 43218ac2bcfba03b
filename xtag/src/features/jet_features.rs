// Copyright (c) 2025 Pratik Barhate
// Licensed under the MIT License. See the LICENSE file in the project root for more information.

use serde::{Deserialize, Serialize};

/// Sentinel written to bounded or multiplicity quantities that were never computed.
pub const UNSET: f32 = -1.0;

/// Jet-level kinematics, energy fractions and substructure.
///
/// Every field starts at a sentinel before extraction fills it: `-1` for bounded quantities
/// (fractions, N-subjettiness, mass drops, event shapes) and multiplicities, `0` for
/// always-defined additive kinematics. Missing JSON fields fall back to the same sentinels.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct JetFeatures {
    pub jet_idx: i32,
    pub pt: f32,
    pub eta: f32,
    pub phi: f32,
    pub mass: f32,
    pub energy: f32,
    pub area: f32,

    /// Number of constituents carrying 60% of the jet energy.
    pub n60: i32,
    /// Number of constituents carrying 90% of the jet energy.
    pub n90: i32,

    pub charged_em_energy_fraction: f32,
    pub charged_hadron_energy_fraction: f32,
    pub charged_mu_energy_fraction: f32,
    pub electron_energy_fraction: f32,

    pub tau1: f32,
    pub tau2: f32,
    pub tau3: f32,

    pub rel_mass_drop_mass_ak: f32,
    pub rel_mass_drop_mass_ca: f32,
    pub rel_soft_drop_mass_ak: f32,
    pub rel_soft_drop_mass_ca: f32,

    pub thrust: f32,
    pub sphericity: f32,
    pub circularity: f32,
    pub isotropy: f32,
    pub event_shape_c: f32,
    pub event_shape_d: f32,
}

impl Default for JetFeatures {
    fn default() -> Self {
        JetFeatures {
            jet_idx: -1,
            pt: 0.0,
            eta: 0.0,
            phi: 0.0,
            mass: 0.0,
            energy: 0.0,
            area: 0.0,
            n60: -1,
            n90: -1,
            charged_em_energy_fraction: UNSET,
            charged_hadron_energy_fraction: UNSET,
            charged_mu_energy_fraction: UNSET,
            electron_energy_fraction: UNSET,
            tau1: UNSET,
            tau2: UNSET,
            tau3: UNSET,
            rel_mass_drop_mass_ak: UNSET,
            rel_mass_drop_mass_ca: UNSET,
            rel_soft_drop_mass_ak: UNSET,
            rel_soft_drop_mass_ca: UNSET,
            thrust: UNSET,
            sphericity: UNSET,
            circularity: UNSET,
            isotropy: UNSET,
            event_shape_c: UNSET,
            event_shape_d: UNSET,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_uses_sentinels() {
        let features = JetFeatures::default();

        assert_eq!(features.jet_idx, -1);
        assert_eq!(features.n60, -1);
        assert_eq!(features.n90, -1);
        assert_eq!(features.charged_em_energy_fraction, UNSET);
        assert_eq!(features.electron_energy_fraction, UNSET);
        assert_eq!(features.tau3, UNSET);
        assert_eq!(features.rel_soft_drop_mass_ca, UNSET);
        assert_eq!(features.event_shape_d, UNSET);

        // additive kinematics are always defined
        assert_eq!(features.pt, 0.0);
        assert_eq!(features.energy, 0.0);
        assert_eq!(features.area, 0.0);
    }

    #[test]
    fn test_partial_json_keeps_sentinels() {
        let json = r#"{"pt": 45.5, "eta": -1.2, "n60": 3, "tau1": 0.4}"#;

        let features: JetFeatures = serde_json::from_str(json).unwrap();

        assert_eq!(features.pt, 45.5);
        assert_eq!(features.eta, -1.2);
        assert_eq!(features.n60, 3);
        assert_eq!(features.tau1, 0.4);
        assert_eq!(features.n90, -1);
        assert_eq!(features.tau2, UNSET);
        assert_eq!(features.mass, 0.0);
    }
}

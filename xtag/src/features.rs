// Copyright (c) 2025 Pratik Barhate
// Licensed under the MIT License. See the LICENSE file in the project root for more information.

//! Per-jet and per-candidate feature records consumed by the tensor assembler.
//!
//! Records are plain values produced by upstream feature extraction. Each kind that ends up
//! in a network input row implements [`FeatureRow`], which pins the exact field order the
//! network was trained against.

pub mod candidates;
pub mod jet_features;
pub mod shallow_tag_info;
pub mod tag_info;

pub use candidates::*;
pub use jet_features::*;
pub use shallow_tag_info::*;
pub use tag_info::*;

/// A record that flattens into one fixed-width row of a network input tensor.
///
/// `FIELDS[i]` names the quantity written to column `i`, and `values()[i]` is its value.
/// Reordering either side silently corrupts inference, so both are covered by tests.
pub trait FeatureRow<const N: usize> {
    /// Column names in tensor order.
    const FIELDS: [&'static str; N];

    /// Column values in the order of [`FeatureRow::FIELDS`].
    fn values(&self) -> [f32; N];
}

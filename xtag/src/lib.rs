// Copyright (c) 2025 Pratik Barhate
// Licensed under the MIT License. See the LICENSE file in the project root for more information.

//! Long-lived particle jet tagger.
//!
//! Per event, the per-jet tag-info records are assembled once into the network input
//! tensors, the graph is run once per configured decay-length hypothesis, and one score
//! collection is produced per hypothesis.

pub mod config;
pub mod error;
pub mod features;
pub mod inference;
pub mod io;
pub mod service;

#[cfg(test)]
pub(crate) mod test_support;

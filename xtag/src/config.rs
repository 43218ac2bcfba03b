// Copyright (c) 2025 Pratik Barhate
// Licensed under the MIT License. See the LICENSE file in the project root for more information.

pub mod producer_config;
pub mod service_config;

pub use producer_config::*;
pub use service_config::*;

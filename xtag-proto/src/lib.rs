// Copyright (c) 2025 Pratik Barhate
// Licensed under the MIT License. See the LICENSE file in the project root for more information.

//! Generated gRPC types for the XTag jet tagging service.

pub mod xtag {
    tonic::include_proto!("xtag");
}

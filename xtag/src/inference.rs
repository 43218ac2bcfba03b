// Copyright (c) 2025 Pratik Barhate
// Licensed under the MIT License. See the LICENSE file in the project root for more information.

use tract_onnx::prelude::*;

pub mod assembly;
pub mod producer;
pub mod session;

pub use assembly::{assemble, TensorBatch};
pub use producer::*;
pub use session::{InferenceSession, NamedTensor, TractSession};

pub type TractRunnableModel =
    RunnableModel<TypedFact, Box<dyn TypedOp>, Graph<TypedFact, Box<dyn TypedOp>>>;

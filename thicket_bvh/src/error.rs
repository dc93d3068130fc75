// Copyright 2025 the Thicket Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Error types for configuration parsing.

use thiserror::Error;

/// A split-method name that is not one of `sah`, `hlbvh`, `middle` or `equal`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown BVH split method \"{name}\"")]
pub struct UnknownSplitMethod {
    /// The name as given.
    pub name: String,
}

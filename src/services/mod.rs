// SPDX-License-Identifier: MIT

//! Services module - business logic layer.

pub mod archive;
pub mod classifier;
pub mod export;

pub use archive::{ArchiveService, RollupOutcome};
pub use classifier::{Classification, Classifier, EmissionFactors};

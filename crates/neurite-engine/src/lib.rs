//! The lowered finite-volume multi-cell engine.
//!
//! Lowering takes a population of [`neurite_cell::Cell`] descriptions and
//! flattens them into dense per-CV arrays plus a set of bound mechanisms,
//! then advances the joint system with an implicit (backward-Euler) step:
//! assemble a tree-sparse linear system, solve it in O(N) with one sweep in
//! each direction, and integrate mechanism state against the fresh voltages.
//!
//! Construction is all-or-nothing: [`FvmEngine::new`] either returns a fully
//! wired engine plus its handle set, or a [`neurite_core::ModelError`] with
//! no partially-built state observable.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod binder;
pub mod engine;
pub mod geometry;
pub mod graph;
pub mod matrix;

pub use binder::Handles;
pub use engine::{EngineConfig, FvmEngine};
pub use graph::CompartmentGraph;
pub use matrix::TreeMatrix;

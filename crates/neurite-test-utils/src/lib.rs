//! Shared fixtures for the neurite test suites.
//!
//! Reference cells the validation scenarios run against, plus spike-train
//! extraction and comparison helpers for convergence testing.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod cells;
pub mod spikes;

pub use cells::{hh_soma, passive_cable_cell, passive_soma, soma_with_synapse};
pub use spikes::{compare_spikes, find_spikes, SpikeComparison};

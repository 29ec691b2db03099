//! Benchmark profiles for the neurite engine.
//!
//! Pre-built cell populations at a few sizes so benches and examples agree
//! on what "small" and "large" mean:
//!
//! - [`reference_population`]: 100 ball-and-stick cells (~2.1K CVs)
//! - [`stress_population`]: 1000 ball-and-stick cells (~21K CVs)

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use neurite_cell::{Cell, IClamp, Location};
use neurite_test_utils::passive_cable_cell;

/// One excitable ball-and-stick cell: `hh` soma, passive 20-CV dendrite,
/// and a suprathreshold clamp at the soma.
pub fn ball_and_stick() -> Cell {
    let mut cell = passive_cable_cell(20);
    cell.add_mechanism(0, "hh")
        .expect("hh is in the standard catalogue");
    cell.add_stimulus(Location::new(0, 0.5), IClamp::new(5.0, 200.0, 0.15))
        .expect("profile location is valid");
    cell
}

/// Reference profile: 100 ball-and-stick cells (~2.1K CVs).
pub fn reference_population() -> Vec<Cell> {
    (0..100).map(|_| ball_and_stick()).collect()
}

/// Stress profile: 1000 ball-and-stick cells (~21K CVs).
pub fn stress_population() -> Vec<Cell> {
    (0..1000).map(|_| ball_and_stick()).collect()
}

//! Reference cells used across the validation suites.

use neurite_cell::{Cell, IClamp, Location};

/// Soma-only cell, 18.8 µm diameter, `hh` kinetics, 0.1 nA clamp from 10 ms
/// to 110 ms: the classic repetitive-firing baseline.
pub fn hh_soma() -> Cell {
    let mut cell = Cell::new();
    let soma = cell
        .add_soma(18.8 / 2.0)
        .expect("fixture soma radius is valid");
    cell.add_mechanism(soma, "hh")
        .expect("hh is in the standard catalogue");
    cell.add_stimulus(Location::new(0, 0.5), IClamp::new(10.0, 100.0, 0.1))
        .expect("fixture location is valid");
    cell
}

/// Soma-only cell with just the linear leak; rests exactly at −65 mV.
pub fn passive_soma() -> Cell {
    let mut cell = Cell::new();
    let soma = cell.add_soma(9.4).expect("fixture soma radius is valid");
    cell.add_mechanism(soma, "pas")
        .expect("pas is in the standard catalogue");
    cell
}

/// Passive soma with one uniform passive dendrite of `num_compartments`
/// CVs.
pub fn passive_cable_cell(num_compartments: u32) -> Cell {
    let mut cell = passive_soma();
    let dend = cell
        .add_cable(0, 1.0, 1.0, 200.0, num_compartments)
        .expect("fixture cable dimensions are valid");
    cell.add_mechanism(dend, "pas")
        .expect("pas is in the standard catalogue");
    cell
}

/// Passive soma with one `expsyn` synapse at the soma.
pub fn soma_with_synapse() -> Cell {
    let mut cell = passive_soma();
    cell.add_synapse(Location::new(0, 0.5), "expsyn")
        .expect("fixture location is valid");
    cell
}

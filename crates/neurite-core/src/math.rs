//! Surface-area primitives for the finite-volume geometry pass.
//!
//! All lengths are in µm and all areas in µm². The cable discretization only
//! ever needs spheres (somata), circles (CV faces), and frustum side walls
//! (membrane patches between a compartment end and its midpoint).

use std::f64::consts::PI;

/// Surface area of a sphere of radius `r`.
pub fn area_sphere(r: f64) -> f64 {
    4.0 * PI * r * r
}

/// Area of a circle of radius `r`.
pub fn area_circle(r: f64) -> f64 {
    PI * r * r
}

/// Lateral surface area of a conical frustum.
///
/// `length` is the axial extent; `r1` and `r2` are the radii of the two
/// faces. The slant height accounts for the taper, so a cylinder
/// (`r1 == r2`) reduces to `2π·r·length`.
pub fn area_frustum(length: f64, r1: f64, r2: f64) -> f64 {
    let slant = ((r1 - r2) * (r1 - r2) + length * length).sqrt();
    PI * (r1 + r2) * slant
}

/// Arithmetic mean of two values.
pub fn mean(a: f64, b: f64) -> f64 {
    0.5 * (a + b)
}

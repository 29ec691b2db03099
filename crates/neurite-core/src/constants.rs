//! Physiological defaults and the unit-conversion factors used by the
//! implicit step.
//!
//! # Unit system
//!
//! The engine works in the conventional mixed units of compartmental
//! modelling: voltage mV, current density mA/cm², membrane area µm², time
//! ms, specific capacitance F/m², axial resistivity Ω·cm. The two scale
//! factors below are where those units meet; each is derived from first
//! principles in its doc comment.

/// Default resting membrane potential [mV]. Also the initial condition
/// applied by `reset`.
pub const RESTING_POTENTIAL: f64 = -65.0;

/// Sodium reversal potential default [mV] (+115 mV above rest).
pub const NA_REVERSAL_POTENTIAL: f64 = 115.0 + RESTING_POTENTIAL;
/// Sodium internal concentration default [mM].
pub const NA_INTERNAL_CONCENTRATION: f64 = 10.0;
/// Sodium external concentration default [mM].
pub const NA_EXTERNAL_CONCENTRATION: f64 = 140.0;

/// Potassium reversal potential default [mV] (−12 mV relative to rest).
pub const K_REVERSAL_POTENTIAL: f64 = -12.0 + RESTING_POTENTIAL;
/// Potassium internal concentration default [mM].
pub const K_INTERNAL_CONCENTRATION: f64 = 54.4;
/// Potassium external concentration default [mM].
pub const K_EXTERNAL_CONCENTRATION: f64 = 2.5;

/// Calcium internal concentration default [mM].
pub const CA_INTERNAL_CONCENTRATION: f64 = 5e-5;
/// Calcium external concentration default [mM].
pub const CA_EXTERNAL_CONCENTRATION: f64 = 2.0;

/// Calcium reversal potential default [mV].
///
/// Nernst potential for a divalent ion at mammalian body temperature:
/// `RT/zF ≈ 12.5 mV` with `z = 2`, applied to the default concentration
/// ratio.
pub fn ca_reversal_potential() -> f64 {
    12.5 * (CA_EXTERNAL_CONCENTRATION / CA_INTERNAL_CONCENTRATION).ln()
}

/// Converts `dt · face_alpha` into µm², the unit of the matrix diagonal.
///
/// `face_alpha = A_face / (c_m · r_L · Δx)` carries
/// µm² / ((F/m²)·(Ω·cm)·µm) = µm·m²/(cm·s), since F/Ω = s. Expanding:
/// 1 µm·m²/(cm·s) = (10⁻⁶ m · m²)/(10⁻² m · s) = 10⁻⁴ m²/s
/// = 10⁸ µm²/s = 10⁵ µm²/ms. Multiplying by dt in ms therefore needs a
/// factor of 10⁵ to land in µm².
pub const FACE_ALPHA_TO_UM2_PER_MS: f64 = 1e5;

/// Converts `dt · current / cv_capacitance` into mV for the RHS.
///
/// (mA/cm²)/(F/m²) = (10⁻³ A · 10⁴ m⁻²)/(C/(V·m²)) = 10 A·V/C = 10 V/s
/// = 10 mV/ms, so a time step in ms picks up a factor of 10 to produce a
/// voltage increment in mV.
pub const CURRENT_TO_MV_PER_MS: f64 = 10.0;

/// Converts a point current over a CV surface into a current density.
///
/// nA/µm² = (10⁻⁹ A)/(10⁻⁸ cm²) = 10⁻¹ A/cm² = 100 mA/cm². Used for
/// current-clamp injection and point-process synaptic currents.
pub const POINT_CURRENT_TO_DENSITY: f64 = 100.0;

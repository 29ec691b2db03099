//! Segment kinds and the cable-to-compartment subdivision.
//!
//! A segment is either the spherical soma or a cable: a chain of conical
//! frustums between two branch points. Cables are subdivided into equal-
//! length compartments with linearly interpolated radii; the engine turns
//! each compartment into one control volume.

use crate::error::CellError;
use smallvec::SmallVec;

/// Passive membrane parameters attached to every segment.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Membrane {
    /// Specific membrane capacitance [F/m²].
    pub c_m: f64,
    /// Axial resistivity [Ω·cm].
    pub r_l: f64,
}

impl Default for Membrane {
    /// 0.01 F/m² (1 µF/cm²) and 100 Ω·cm, the conventional defaults.
    fn default() -> Self {
        Self {
            c_m: 0.01,
            r_l: 100.0,
        }
    }
}

/// The spherical cell body. Always exactly one compartment.
#[derive(Clone, Debug)]
pub struct SomaSegment {
    pub(crate) radius: f64,
    pub(crate) membrane: Membrane,
    pub(crate) mechanisms: SmallVec<[String; 2]>,
}

impl SomaSegment {
    pub(crate) fn new(radius: f64) -> Result<Self, CellError> {
        check_positive("radius", radius)?;
        Ok(Self {
            radius,
            membrane: Membrane::default(),
            mechanisms: SmallVec::new(),
        })
    }

    /// Soma radius [µm].
    pub fn radius(&self) -> f64 {
        self.radius
    }
}

/// A cable between branch points, subdivided into `num_compartments`
/// equal-length pieces.
///
/// Radii vary linearly from the proximal end (toward the soma) to the
/// distal end.
#[derive(Clone, Debug)]
pub struct CableSegment {
    pub(crate) parent: usize,
    pub(crate) radius_proximal: f64,
    pub(crate) radius_distal: f64,
    pub(crate) length: f64,
    pub(crate) num_compartments: u32,
    pub(crate) membrane: Membrane,
    pub(crate) mechanisms: SmallVec<[String; 2]>,
}

impl CableSegment {
    pub(crate) fn new(
        parent: usize,
        radius_proximal: f64,
        radius_distal: f64,
        length: f64,
        num_compartments: u32,
    ) -> Result<Self, CellError> {
        check_positive("radius", radius_proximal)?;
        check_positive("radius", radius_distal)?;
        check_positive("length", length)?;
        if num_compartments == 0 {
            return Err(CellError::ZeroCompartments);
        }
        Ok(Self {
            parent,
            radius_proximal,
            radius_distal,
            length,
            num_compartments,
            membrane: Membrane::default(),
            mechanisms: SmallVec::new(),
        })
    }

    /// Index of the parent segment this cable attaches to.
    pub fn parent(&self) -> usize {
        self.parent
    }

    /// Total cable length [µm].
    pub fn length(&self) -> f64 {
        self.length
    }

    /// Radius at the proximal (soma-facing) end [µm].
    pub fn radius_proximal(&self) -> f64 {
        self.radius_proximal
    }

    /// Radius at the distal end [µm].
    pub fn radius_distal(&self) -> f64 {
        self.radius_distal
    }

    /// Iterate over the equal-length compartments, proximal to distal.
    pub fn compartments(&self) -> impl Iterator<Item = Compartment> + '_ {
        let n = self.num_compartments;
        let dx = self.length / n as f64;
        (0..n).map(move |k| {
            let f0 = k as f64 / n as f64;
            let f1 = (k + 1) as f64 / n as f64;
            Compartment {
                radius_proximal: lerp(self.radius_proximal, self.radius_distal, f0),
                radius_distal: lerp(self.radius_proximal, self.radius_distal, f1),
                length: dx,
            }
        })
    }
}

/// One equal-length piece of a cable, proximal end toward the soma.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Compartment {
    /// Radius at the proximal end [µm].
    pub radius_proximal: f64,
    /// Radius at the distal end [µm].
    pub radius_distal: f64,
    /// Axial length [µm].
    pub length: f64,
}

/// A morphological segment: the soma or one cable.
///
/// The set is closed; the lowering matches exhaustively on it, so an
/// unsupported segment kind is unrepresentable rather than a runtime error.
#[derive(Clone, Debug)]
pub enum Segment {
    /// The spherical cell body.
    Soma(SomaSegment),
    /// A cable between branch points.
    Cable(CableSegment),
}

impl Segment {
    /// Number of compartments this segment contributes.
    pub fn num_compartments(&self) -> u32 {
        match self {
            Segment::Soma(_) => 1,
            Segment::Cable(c) => c.num_compartments,
        }
    }

    /// The segment's membrane parameters.
    pub fn membrane(&self) -> &Membrane {
        match self {
            Segment::Soma(s) => &s.membrane,
            Segment::Cable(c) => &c.membrane,
        }
    }

    /// Names of the density mechanisms painted on this segment.
    pub fn mechanisms(&self) -> &[String] {
        match self {
            Segment::Soma(s) => &s.mechanisms,
            Segment::Cable(c) => &c.mechanisms,
        }
    }

    pub(crate) fn membrane_mut(&mut self) -> &mut Membrane {
        match self {
            Segment::Soma(s) => &mut s.membrane,
            Segment::Cable(c) => &mut c.membrane,
        }
    }

    pub(crate) fn mechanisms_mut(&mut self) -> &mut SmallVec<[String; 2]> {
        match self {
            Segment::Soma(s) => &mut s.mechanisms,
            Segment::Cable(c) => &mut c.mechanisms,
        }
    }
}

fn lerp(a: f64, b: f64, f: f64) -> f64 {
    a + (b - a) * f
}

fn check_positive(what: &'static str, value: f64) -> Result<(), CellError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(CellError::NonPositiveDimension { what, value })
    }
}

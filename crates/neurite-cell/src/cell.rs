//! The [`Cell`] description: a segment tree plus its annotations.

use crate::error::CellError;
use crate::segment::{CableSegment, Membrane, Segment, SomaSegment};
use crate::stimulus::IClamp;
use neurite_core::Partition;

/// A point on a cell: a segment index plus a relative position along it.
///
/// `position` runs from 0 (proximal end) to 1 (distal end); for the soma it
/// is ignored beyond validation since the soma is a single point-like CV.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Location {
    /// Segment index within the owning cell.
    pub segment: usize,
    /// Relative position along the segment, in `[0, 1]`.
    pub position: f64,
}

impl Location {
    /// Create a location; the position range is validated by the cell when
    /// the location is attached.
    pub fn new(segment: usize, position: f64) -> Self {
        Self { segment, position }
    }
}

/// A synapse: a point-process mechanism instantiated at a location.
#[derive(Clone, Debug)]
pub struct Synapse {
    /// Where the synapse sits.
    pub location: Location,
    /// Point-process mechanism name, resolved through the catalogue.
    pub mechanism: String,
}

/// A current clamp attached at a location.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Stimulus {
    /// Where current is injected.
    pub location: Location,
    /// The clamp waveform.
    pub clamp: IClamp,
}

/// A spike detector: watches the voltage at a location.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Detector {
    /// Where the detector watches.
    pub location: Location,
    /// Crossing threshold [mV], applied by the outer driver.
    pub threshold: f64,
}

/// What a probe samples.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ProbeKind {
    /// Membrane potential [mV].
    MembraneVoltage,
    /// Membrane current density [mA/cm²].
    MembraneCurrent,
}

/// A state probe at a location.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Probe {
    /// Where the probe samples.
    pub location: Location,
    /// Which field it samples.
    pub kind: ProbeKind,
}

/// A multi-compartment cell description.
///
/// Segments form a tree: the soma is segment 0 and every cable names an
/// earlier segment as its parent, attaching at the parent's distal end.
/// All annotations (mechanisms, synapses, stimuli, detectors, probes) are
/// kept in declaration order; that order is observable through the engine's
/// handle emission and mechanism iteration contracts.
///
/// # Examples
///
/// ```
/// use neurite_cell::{Cell, IClamp, Location};
///
/// let mut cell = Cell::new();
/// let soma = cell.add_soma(9.4).unwrap();
/// cell.add_mechanism(soma, "hh").unwrap();
/// cell.add_stimulus(Location::new(0, 0.5), IClamp::new(10.0, 100.0, 0.1)).unwrap();
/// assert_eq!(cell.num_compartments(), 1);
/// ```
#[derive(Clone, Debug, Default)]
pub struct Cell {
    segments: Vec<Segment>,
    synapses: Vec<Synapse>,
    stimuli: Vec<Stimulus>,
    detectors: Vec<Detector>,
    probes: Vec<Probe>,
}

impl Cell {
    /// Create an empty cell. Add the soma before any cable.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add the spherical soma with the given radius [µm].
    ///
    /// Must be the first segment; returns its index (always 0).
    pub fn add_soma(&mut self, radius: f64) -> Result<usize, CellError> {
        if !self.segments.is_empty() {
            return Err(CellError::SomaNotRoot);
        }
        self.segments.push(Segment::Soma(SomaSegment::new(radius)?));
        Ok(0)
    }

    /// Add a cable attached to the distal end of `parent`.
    ///
    /// Radii [µm] vary linearly from proximal to distal; `length` is in µm
    /// and the cable is subdivided into `num_compartments` control volumes.
    /// Returns the new segment's index.
    pub fn add_cable(
        &mut self,
        parent: usize,
        radius_proximal: f64,
        radius_distal: f64,
        length: f64,
        num_compartments: u32,
    ) -> Result<usize, CellError> {
        if parent >= self.segments.len() {
            return Err(CellError::InvalidParent {
                parent,
                num_segments: self.segments.len(),
            });
        }
        self.segments.push(Segment::Cable(CableSegment::new(
            parent,
            radius_proximal,
            radius_distal,
            length,
            num_compartments,
        )?));
        Ok(self.segments.len() - 1)
    }

    /// Paint a density mechanism onto a segment by catalogue name.
    ///
    /// The name `"membrane"` is reserved for the passive parameters carried
    /// by [`Membrane`] and is rejected here.
    pub fn add_mechanism(
        &mut self,
        segment: usize,
        name: impl Into<String>,
    ) -> Result<(), CellError> {
        let name = name.into();
        if name == "membrane" {
            return Err(CellError::ReservedMechanism);
        }
        self.segment_mut(segment)?.mechanisms_mut().push(name);
        Ok(())
    }

    /// Overwrite a segment's membrane parameters.
    pub fn set_membrane(&mut self, segment: usize, membrane: Membrane) -> Result<(), CellError> {
        *self.segment_mut(segment)?.membrane_mut() = membrane;
        Ok(())
    }

    /// Attach a synapse (point-process mechanism) at `location`.
    pub fn add_synapse(
        &mut self,
        location: Location,
        mechanism: impl Into<String>,
    ) -> Result<(), CellError> {
        self.check_location(location)?;
        self.synapses.push(Synapse {
            location,
            mechanism: mechanism.into(),
        });
        Ok(())
    }

    /// Attach a current clamp at `location`.
    pub fn add_stimulus(&mut self, location: Location, clamp: IClamp) -> Result<(), CellError> {
        self.check_location(location)?;
        self.stimuli.push(Stimulus { location, clamp });
        Ok(())
    }

    /// Attach a spike detector at `location` with the given threshold [mV].
    pub fn add_detector(&mut self, location: Location, threshold: f64) -> Result<(), CellError> {
        self.check_location(location)?;
        self.detectors.push(Detector {
            location,
            threshold,
        });
        Ok(())
    }

    /// Attach a state probe at `location`.
    pub fn add_probe(&mut self, location: Location, kind: ProbeKind) -> Result<(), CellError> {
        self.check_location(location)?;
        self.probes.push(Probe { location, kind });
        Ok(())
    }

    /// The segments, soma first.
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// The synapses, in declaration order.
    pub fn synapses(&self) -> &[Synapse] {
        &self.synapses
    }

    /// The current clamps, in declaration order.
    pub fn stimuli(&self) -> &[Stimulus] {
        &self.stimuli
    }

    /// The spike detectors, in declaration order.
    pub fn detectors(&self) -> &[Detector] {
        &self.detectors
    }

    /// The state probes, in declaration order.
    pub fn probes(&self) -> &[Probe] {
        &self.probes
    }

    /// Total number of compartments over all segments.
    pub fn num_compartments(&self) -> u32 {
        self.segments.iter().map(Segment::num_compartments).sum()
    }

    /// Per-segment compartment partition, in segment order.
    pub fn segment_compartments(&self) -> Partition {
        Partition::from_sizes(self.segments.iter().map(Segment::num_compartments))
    }

    /// The local parent-index array over this cell's compartments.
    ///
    /// Compartment 0 (the soma) is its own parent. Within a cable,
    /// compartment `k` points at `k − 1`; the first compartment of a cable
    /// points at the distal compartment of the parent segment. Since every
    /// cable's parent precedes it, the array satisfies `parent[k] <= k`
    /// with equality only at the root, which is the minimum-degree ordering
    /// the solver relies on.
    pub fn parent_index(&self) -> Vec<u32> {
        let part = self.segment_compartments();
        let mut parents = vec![0u32; self.num_compartments() as usize];
        for (s, segment) in self.segments.iter().enumerate() {
            let range = part.range(s);
            match segment {
                Segment::Soma(_) => {
                    parents[range.start as usize] = range.start;
                }
                Segment::Cable(cable) => {
                    let attach = part.range(cable.parent).end - 1;
                    parents[range.start as usize] = attach;
                    for k in range.start + 1..range.end {
                        parents[k as usize] = k - 1;
                    }
                }
            }
        }
        parents
    }

    fn segment_mut(&mut self, segment: usize) -> Result<&mut Segment, CellError> {
        let num_segments = self.segments.len();
        self.segments
            .get_mut(segment)
            .ok_or(CellError::NoSuchSegment {
                segment,
                num_segments,
            })
    }

    fn check_location(&self, location: Location) -> Result<(), CellError> {
        if location.segment >= self.segments.len() {
            return Err(CellError::NoSuchSegment {
                segment: location.segment,
                num_segments: self.segments.len(),
            });
        }
        if !(0.0..=1.0).contains(&location.position) || location.position.is_nan() {
            return Err(CellError::PositionOutOfRange {
                position: location.position,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn ball_and_stick() -> Cell {
        let mut cell = Cell::new();
        let soma = cell.add_soma(6.0).unwrap();
        cell.add_cable(soma, 1.0, 1.0, 200.0, 4).unwrap();
        cell
    }

    #[test]
    fn soma_must_come_first() {
        let mut cell = Cell::new();
        assert!(matches!(
            cell.add_cable(0, 1.0, 1.0, 100.0, 4),
            Err(CellError::InvalidParent { .. })
        ));
        cell.add_soma(6.0).unwrap();
        assert!(matches!(cell.add_soma(6.0), Err(CellError::SomaNotRoot)));
    }

    #[test]
    fn compartment_counts_accumulate() {
        let cell = ball_and_stick();
        assert_eq!(cell.num_compartments(), 5);
        let part = cell.segment_compartments();
        assert_eq!(part.range(0), 0..1);
        assert_eq!(part.range(1), 1..5);
    }

    #[test]
    fn parent_index_chains_from_the_soma() {
        let cell = ball_and_stick();
        assert_eq!(cell.parent_index(), vec![0, 0, 1, 2, 3]);
    }

    #[test]
    fn branch_attaches_at_parent_distal_compartment() {
        let mut cell = Cell::new();
        let soma = cell.add_soma(6.0).unwrap();
        let trunk = cell.add_cable(soma, 1.0, 1.0, 100.0, 2).unwrap();
        cell.add_cable(trunk, 0.5, 0.5, 50.0, 2).unwrap();
        cell.add_cable(trunk, 0.5, 0.5, 50.0, 2).unwrap();
        // soma=0, trunk=1..3, branches 3..5 and 5..7; both branches hang
        // off compartment 2, the trunk's distal end.
        assert_eq!(cell.parent_index(), vec![0, 0, 1, 2, 3, 2, 5]);
    }

    #[test]
    fn parent_precedes_child_everywhere() {
        let cell = ball_and_stick();
        for (i, &p) in cell.parent_index().iter().enumerate() {
            assert!(p as usize <= i);
        }
    }

    #[test]
    fn membrane_name_is_reserved() {
        let mut cell = Cell::new();
        cell.add_soma(6.0).unwrap();
        assert!(matches!(
            cell.add_mechanism(0, "membrane"),
            Err(CellError::ReservedMechanism)
        ));
    }

    #[test]
    fn locations_are_validated() {
        let mut cell = ball_and_stick();
        assert!(matches!(
            cell.add_detector(Location::new(9, 0.5), 0.0),
            Err(CellError::NoSuchSegment { .. })
        ));
        assert!(matches!(
            cell.add_probe(Location::new(1, 1.5), ProbeKind::MembraneVoltage),
            Err(CellError::PositionOutOfRange { .. })
        ));
        assert!(cell
            .add_probe(Location::new(1, 1.0), ProbeKind::MembraneCurrent)
            .is_ok());
    }

    proptest! {
        #[test]
        fn parent_index_is_minimum_degree(
            cables in prop::collection::vec((0usize..16, 1u32..5), 0..8),
        ) {
            let mut cell = Cell::new();
            cell.add_soma(6.0).unwrap();
            for (parent_hint, ncomp) in cables {
                let parent = parent_hint % cell.segments().len();
                cell.add_cable(parent, 1.0, 1.0, 50.0, ncomp).unwrap();
            }

            let parents = cell.parent_index();
            prop_assert_eq!(parents.len(), cell.num_compartments() as usize);
            prop_assert_eq!(parents[0], 0);
            for (k, &p) in parents.iter().enumerate().skip(1) {
                prop_assert!((p as usize) < k, "parent {} of compartment {}", p, k);
            }
        }
    }

    #[test]
    fn annotations_keep_declaration_order() {
        let mut cell = ball_and_stick();
        cell.add_synapse(Location::new(1, 0.25), "expsyn").unwrap();
        cell.add_synapse(Location::new(1, 0.75), "expsyn").unwrap();
        assert_eq!(cell.synapses()[0].location.position, 0.25);
        assert_eq!(cell.synapses()[1].location.position, 0.75);
    }
}

//! Instantiating mechanisms, ions, and handles over the lowered graph.
//!
//! Binding runs once at initialization, in three passes: density mechanisms
//! over segment unions, point processes in synapse declaration order, then
//! ion state over the union of each species' users. All cross-indexing
//! between CVs, mechanisms, ions, and synapses is constructed here and
//! frozen; the per-step loop only walks dense index slices.

use crate::geometry::Geometry;
use crate::graph::CompartmentGraph;
use indexmap::IndexMap;
use neurite_cell::{Cell, IClamp, ProbeKind};
use neurite_core::{
    DetectorHandle, IonKind, ModelError, ProbeHandle, StateField, TargetHandle,
};
use neurite_mech::{Catalogue, IonState, Mechanism};
use smallvec::SmallVec;
use std::ops::Range;

/// The handle arrays emitted during initialization, in cell-declaration
/// order within each family.
#[derive(Clone, Debug, Default)]
pub struct Handles {
    /// One handle per declared spike detector.
    pub detectors: Vec<DetectorHandle>,
    /// One handle per declared synapse.
    pub targets: Vec<TargetHandle>,
    /// One handle per declared probe.
    pub probes: Vec<ProbeHandle>,
}

/// Everything the binder wires up for the engine.
pub(crate) struct Bound {
    pub mechanisms: Vec<Box<dyn Mechanism>>,
    pub synapse_base: usize,
    pub ions: IndexMap<IonKind, IonState>,
    pub stimuli: Vec<(u32, IClamp)>,
    pub handles: Handles,
}

impl std::fmt::Debug for Bound {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Bound")
            .field("mechanisms", &self.mechanisms.len())
            .field("synapse_base", &self.synapse_base)
            .field("ions", &self.ions)
            .field("stimuli", &self.stimuli)
            .field("handles", &self.handles)
            .finish()
    }
}

pub(crate) fn bind(
    cells: &[Cell],
    graph: &CompartmentGraph,
    geometry: &Geometry,
    catalogue: &Catalogue,
) -> Result<Bound, ModelError> {
    let mut mechanisms: Vec<Box<dyn Mechanism>> = Vec::new();

    // ── Pass 1: density mechanisms over segment unions ─────────────
    // Ranges ascend with (cell, segment) iteration, so each mechanism's
    // list is already sorted; duplicates only arise from a name painted
    // twice on one segment.
    let mut mech_map: IndexMap<String, SmallVec<[Range<u32>; 8]>> = IndexMap::new();
    for (c, cell) in cells.iter().enumerate() {
        for (s, segment) in cell.segments().iter().enumerate() {
            let range = graph.segment_range(c, s);
            for name in segment.mechanisms() {
                mech_map
                    .entry(name.clone())
                    .or_default()
                    .push(range.clone());
            }
        }
    }

    for (name, ranges) in &mech_map {
        let mut sorted = ranges.clone();
        sorted.dedup_by_key(|r| r.start);
        let mut nodes: Vec<u32> = Vec::new();
        for range in &sorted {
            nodes.extend(range.clone());
        }
        let mech = catalogue
            .make(name, nodes)
            .map_err(|e| ModelError::UnknownMechanism { name: e.name })?;
        mechanisms.push(mech);
    }

    // ── Pass 2: point processes in synapse declaration order ───────
    let synapse_base = mechanisms.len();
    let mut synapse_indices: IndexMap<String, usize> = IndexMap::new();
    let mut synapse_nodes: Vec<Vec<u32>> = Vec::new();
    let mut targets: Vec<TargetHandle> = Vec::new();

    for (c, cell) in cells.iter().enumerate() {
        for synapse in cell.synapses() {
            let cv = graph.locate(c, synapse.location)?;
            let relative = *synapse_indices
                .entry(synapse.mechanism.clone())
                .or_insert_with(|| {
                    synapse_nodes.push(Vec::new());
                    synapse_nodes.len() - 1
                });
            let lid = synapse_nodes[relative].len() as u32;
            targets.push(TargetHandle {
                mechanism: relative as u32,
                lid,
            });
            synapse_nodes[relative].push(cv);
        }
    }

    for (name, &relative) in &synapse_indices {
        let mut mech = catalogue
            .make(name, synapse_nodes[relative].clone())
            .map_err(|e| ModelError::UnknownMechanism { name: e.name })?;
        mech.set_areas(&geometry.area);
        mechanisms.push(mech);
    }

    // ── Pass 3: ion state over the union of each species' users ────
    let mut ions: IndexMap<IonKind, IonState> = IndexMap::new();
    for kind in IonKind::all() {
        let mut union: Vec<u32> = Vec::new();
        for mech in &mechanisms {
            if mech.uses_ion(kind) {
                union.extend_from_slice(mech.node_index());
            }
        }
        union.sort_unstable();
        union.dedup();
        if union.is_empty() {
            continue;
        }

        // Precomputed CV → slot routing table; every user's node is in the
        // union by construction.
        let mut slot_of_cv = vec![0u32; graph.len()];
        for (slot, &cv) in union.iter().enumerate() {
            slot_of_cv[cv as usize] = slot as u32;
        }

        let state = IonState::new(kind, union);
        for mech in &mut mechanisms {
            if mech.uses_ion(kind) {
                let slots = mech
                    .node_index()
                    .iter()
                    .map(|&cv| slot_of_cv[cv as usize])
                    .collect();
                mech.bind_ion(kind, slots);
            }
        }
        ions.insert(kind, state);
    }

    // ── Stimuli, detectors, probes, in cell order ──────────────────
    let mut stimuli = Vec::new();
    let mut detectors = Vec::new();
    let mut probes = Vec::new();

    for (c, cell) in cells.iter().enumerate() {
        for stimulus in cell.stimuli() {
            let cv = graph.locate(c, stimulus.location)?;
            stimuli.push((cv, stimulus.clamp));
        }
        for detector in cell.detectors() {
            let cv = graph.locate(c, detector.location)?;
            detectors.push(DetectorHandle(cv));
        }
        for probe in cell.probes() {
            let cv = graph.locate(c, probe.location)?;
            let field = match probe.kind {
                ProbeKind::MembraneVoltage => StateField::Voltage,
                ProbeKind::MembraneCurrent => StateField::Current,
            };
            probes.push(ProbeHandle { field, cv });
        }
    }

    check_totals("detector", cells.iter().map(|c| c.detectors().len()), detectors.len())?;
    check_totals("target", cells.iter().map(|c| c.synapses().len()), targets.len())?;
    check_totals("probe", cells.iter().map(|c| c.probes().len()), probes.len())?;

    Ok(Bound {
        mechanisms,
        synapse_base,
        ions,
        stimuli,
        handles: Handles {
            detectors,
            targets,
            probes,
        },
    })
}

fn check_totals(
    kind: &'static str,
    declared: impl Iterator<Item = usize>,
    emitted: usize,
) -> Result<(), ModelError> {
    let expected: usize = declared.sum();
    if expected != emitted {
        return Err(ModelError::HandleCountMismatch {
            kind,
            expected,
            actual: emitted,
        });
    }
    Ok(())
}

//! Per-CV surface areas, face coupling coefficients, and capacitance.
//!
//! Each cable compartment has its CV face at its center: the two half-
//! frustums on either side of the face belong to the CVs at the
//! compartment's end points, so a compartment splits its membrane between
//! its own CV (distal half) and its parent CV (proximal half). The soma is
//! a single spherical CV.
//!
//! Capacitance is accumulated as total farads-per-CV and normalized to
//! specific capacitance (F/m²) per cell once that cell's segments are done;
//! contributions never cross cells because every compartment's parent lies
//! in the same cell.

use crate::graph::CompartmentGraph;
use neurite_cell::{Cell, Segment};
use neurite_core::math::{area_circle, area_frustum, area_sphere, mean};
use neurite_core::ModelError;

/// The geometric lowering of a cell population.
#[derive(Clone, Debug)]
pub struct Geometry {
    /// CV surface areas [µm²], strictly positive.
    pub area: Vec<f64>,
    /// Coupling coefficient at the face between a CV and its parent
    /// [µm·m²/(cm·s)]; unused (zero) at cell roots.
    pub face_alpha: Vec<f64>,
    /// Specific membrane capacitance per CV [F/m²], strictly positive.
    pub cv_capacitance: Vec<f64>,
}

impl Geometry {
    /// Compute areas, face coefficients, and capacitance for a population.
    ///
    /// Fails if any soma maps to more than one CV; the closed segment enum
    /// makes other malformed kinds unrepresentable.
    pub fn compute(cells: &[Cell], graph: &CompartmentGraph) -> Result<Self, ModelError> {
        let n = graph.len();
        let mut area = vec![0.0; n];
        let mut face_alpha = vec![0.0; n];
        let mut cv_capacitance = vec![0.0; n];
        let parent = graph.parent();

        for (c, cell) in cells.iter().enumerate() {
            for (s, segment) in cell.segments().iter().enumerate() {
                let range = graph.segment_range(c, s);
                match segment {
                    Segment::Soma(soma) => {
                        if range.end - range.start != 1 {
                            return Err(ModelError::SomaCompartments {
                                cell: c,
                                count: (range.end - range.start) as usize,
                            });
                        }
                        let i = range.start as usize;
                        let a = area_sphere(soma.radius());
                        area[i] += a;
                        cv_capacitance[i] += a * segment.membrane().c_m;
                    }
                    Segment::Cable(cable) => {
                        let membrane = segment.membrane();
                        for (i, comp) in range.clone().zip(cable.compartments()) {
                            let i = i as usize;
                            let j = parent[i] as usize;

                            let radius_center =
                                mean(comp.radius_proximal, comp.radius_distal);
                            let area_face = area_circle(radius_center);
                            face_alpha[i] =
                                area_face / (membrane.c_m * membrane.r_l * comp.length);

                            let half = comp.length / 2.0;
                            let a_proximal =
                                area_frustum(half, comp.radius_proximal, radius_center);
                            let a_distal =
                                area_frustum(half, radius_center, comp.radius_distal);

                            area[j] += a_proximal;
                            area[i] += a_distal;
                            cv_capacitance[j] += a_proximal * membrane.c_m;
                            cv_capacitance[i] += a_distal * membrane.c_m;
                        }
                    }
                }
            }

            // Normalize this cell's capacitance to F/m² before moving on.
            for k in graph.cell_compartments().range(c) {
                cv_capacitance[k as usize] /= area[k as usize];
            }
        }

        debug_assert!(area.iter().all(|&a| a > 0.0));
        debug_assert!(cv_capacitance.iter().all(|&cm| cm > 0.0));
        debug_assert!(face_alpha.iter().all(|&fa| fa >= 0.0));

        Ok(Self {
            area,
            face_alpha,
            cv_capacitance,
        })
    }
}

//! Flattening many cells' compartments into one indexed CV array.
//!
//! Every cell contributes a contiguous block of global CV indices; within a
//! block the cell's minimum-degree compartment ordering is preserved, so the
//! flat parent vector satisfies `parent[i] <= i` everywhere with equality
//! exactly at each cell's root. The tree solver relies on that shape.

use neurite_cell::{Cell, Location, Segment};
use neurite_core::{ModelError, Partition};
use std::ops::Range;

/// The flattened compartment topology of a cell population.
#[derive(Clone, Debug)]
pub struct CompartmentGraph {
    parent: Vec<u32>,
    cell_compartments: Partition,
    segment_compartments: Partition,
    cell_segments: Partition,
}

impl CompartmentGraph {
    /// Flatten a population of cells.
    ///
    /// Rejects an empty population and any cell with zero compartments;
    /// otherwise the graph covers every cell in input order.
    pub fn build(cells: &[Cell]) -> Result<Self, ModelError> {
        if cells.is_empty() {
            return Err(ModelError::NoCells);
        }
        for (c, cell) in cells.iter().enumerate() {
            if cell.num_compartments() == 0 {
                return Err(ModelError::EmptyCell { cell: c });
            }
        }

        let cell_compartments =
            Partition::from_sizes(cells.iter().map(|c| c.num_compartments()));
        let segment_compartments = Partition::from_sizes(
            cells
                .iter()
                .flat_map(|c| c.segments().iter().map(Segment::num_compartments)),
        );
        let cell_segments =
            Partition::from_sizes(cells.iter().map(|c| c.segments().len() as u32));

        let mut parent = vec![0u32; cell_compartments.total() as usize];
        for (c, cell) in cells.iter().enumerate() {
            let lo = cell_compartments.range(c).start;
            for (k, p) in cell.parent_index().into_iter().enumerate() {
                parent[lo as usize + k] = p + lo;
            }
        }

        let graph = Self {
            parent,
            cell_compartments,
            segment_compartments,
            cell_segments,
        };
        graph.debug_check();
        Ok(graph)
    }

    /// Total number of CVs.
    pub fn len(&self) -> usize {
        self.parent.len()
    }

    /// Always false: construction rejects empty populations.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Number of cells.
    pub fn num_cells(&self) -> usize {
        self.cell_compartments.len()
    }

    /// The flat parent vector over all CVs.
    pub fn parent(&self) -> &[u32] {
        &self.parent
    }

    /// Per-cell CV ranges, in input order.
    pub fn cell_compartments(&self) -> &Partition {
        &self.cell_compartments
    }

    /// Flat per-segment CV ranges across all cells.
    pub fn segment_compartments(&self) -> &Partition {
        &self.segment_compartments
    }

    /// The global CV range of one segment of one cell.
    ///
    /// # Panics
    ///
    /// Panics if `cell` or `segment` is out of range; callers resolve
    /// user-provided indices through [`CompartmentGraph::locate`] instead.
    pub fn segment_range(&self, cell: usize, segment: usize) -> Range<u32> {
        let seg_base = self.cell_segments.range(cell).start as usize;
        self.segment_compartments.range(seg_base + segment)
    }

    /// Resolve a `(segment, position)` location on `cell` to a CV index.
    ///
    /// Positions partition the segment evenly over its compartments, with
    /// `position = 1.0` mapping onto the distal compartment.
    pub fn locate(&self, cell: usize, location: Location) -> Result<u32, ModelError> {
        let segments = self.cell_segments.range(cell);
        if location.segment >= (segments.end - segments.start) as usize {
            return Err(ModelError::InvalidLocation {
                cell,
                segment: location.segment,
            });
        }
        let range = self
            .segment_compartments
            .range(segments.start as usize + location.segment);
        let n = (range.end - range.start) as f64;
        let k = (location.position.clamp(0.0, 1.0) * n) as u32;
        Ok(range.start + k.min(range.end - range.start - 1))
    }

    fn debug_check(&self) {
        debug_assert!(self
            .parent
            .iter()
            .enumerate()
            .all(|(i, &p)| p as usize <= i));
        for c in 0..self.num_cells() {
            let root = self.cell_compartments.range(c).start;
            debug_assert_eq!(self.parent[root as usize], root);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use neurite_cell::Cell;

    fn two_cells() -> Vec<Cell> {
        let mut a = Cell::new();
        a.add_soma(6.0).unwrap();
        a.add_cable(0, 1.0, 1.0, 200.0, 3).unwrap();

        let mut b = Cell::new();
        b.add_soma(9.4).unwrap();

        vec![a, b]
    }

    #[test]
    fn empty_population_rejected() {
        assert!(matches!(
            CompartmentGraph::build(&[]),
            Err(ModelError::NoCells)
        ));
    }

    #[test]
    fn zero_compartment_cell_rejected() {
        let cells = vec![Cell::new()];
        assert!(matches!(
            CompartmentGraph::build(&cells),
            Err(ModelError::EmptyCell { cell: 0 })
        ));
    }

    #[test]
    fn cells_occupy_contiguous_blocks() {
        let graph = CompartmentGraph::build(&two_cells()).unwrap();
        assert_eq!(graph.len(), 5);
        assert_eq!(graph.cell_compartments().range(0), 0..4);
        assert_eq!(graph.cell_compartments().range(1), 4..5);
    }

    #[test]
    fn parents_are_relocated_per_cell() {
        let graph = CompartmentGraph::build(&two_cells()).unwrap();
        // Cell a: soma 0, cable 1..4 chained; cell b: root 4 self-parented.
        assert_eq!(graph.parent(), &[0, 0, 1, 2, 4]);
    }

    #[test]
    fn roots_are_self_parented() {
        let graph = CompartmentGraph::build(&two_cells()).unwrap();
        for c in 0..graph.num_cells() {
            let root = graph.cell_compartments().range(c).start;
            assert_eq!(graph.parent()[root as usize], root);
        }
    }

    #[test]
    fn locate_maps_positions_onto_compartments() {
        let graph = CompartmentGraph::build(&two_cells()).unwrap();
        // Soma of cell 0.
        assert_eq!(graph.locate(0, Location::new(0, 0.5)).unwrap(), 0);
        // Cable of cell 0 has CVs 1..4.
        assert_eq!(graph.locate(0, Location::new(1, 0.0)).unwrap(), 1);
        assert_eq!(graph.locate(0, Location::new(1, 0.5)).unwrap(), 2);
        assert_eq!(graph.locate(0, Location::new(1, 1.0)).unwrap(), 3);
        // Soma of cell 1 is the global CV 4.
        assert_eq!(graph.locate(1, Location::new(0, 0.5)).unwrap(), 4);
    }

    #[test]
    fn locate_rejects_unknown_segment() {
        let graph = CompartmentGraph::build(&two_cells()).unwrap();
        assert!(matches!(
            graph.locate(1, Location::new(1, 0.5)),
            Err(ModelError::InvalidLocation { cell: 1, segment: 1 })
        ));
    }

    #[test]
    fn segment_ranges_are_per_cell() {
        let graph = CompartmentGraph::build(&two_cells()).unwrap();
        assert_eq!(graph.segment_range(0, 0), 0..1);
        assert_eq!(graph.segment_range(0, 1), 1..4);
        assert_eq!(graph.segment_range(1, 0), 4..5);
    }
}

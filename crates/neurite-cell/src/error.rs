//! Validation errors for cell construction.

use std::error::Error;
use std::fmt;

/// Errors from building a cell description.
///
/// Cells validate eagerly: every `add_*` method rejects malformed input so
/// the lowering can assume a structurally sound tree.
#[derive(Clone, Debug, PartialEq)]
pub enum CellError {
    /// A radius or length was zero, negative, or non-finite.
    NonPositiveDimension {
        /// Which dimension (`"radius"`, `"length"`).
        what: &'static str,
        /// The offending value.
        value: f64,
    },

    /// A cable was requested with zero compartments.
    ZeroCompartments,

    /// A cable's parent segment index does not precede it.
    InvalidParent {
        /// The requested parent segment index.
        parent: usize,
        /// Number of segments currently in the cell.
        num_segments: usize,
    },

    /// A location's segment index is out of range.
    NoSuchSegment {
        /// The requested segment index.
        segment: usize,
        /// Number of segments currently in the cell.
        num_segments: usize,
    },

    /// A location's position lies outside `[0, 1]`.
    PositionOutOfRange {
        /// The offending position.
        position: f64,
    },

    /// The reserved membrane parameter name was used as a mechanism name.
    ReservedMechanism,

    /// A soma was added to a cell that already has segments.
    SomaNotRoot,
}

impl fmt::Display for CellError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NonPositiveDimension { what, value } => {
                write!(f, "{what} must be positive and finite, got {value}")
            }
            Self::ZeroCompartments => {
                write!(f, "cable segments need at least one compartment")
            }
            Self::InvalidParent {
                parent,
                num_segments,
            } => {
                write!(
                    f,
                    "parent segment {parent} must precede the new segment \
                     (cell has {num_segments} segments)"
                )
            }
            Self::NoSuchSegment {
                segment,
                num_segments,
            } => {
                write!(
                    f,
                    "segment {segment} out of range (cell has {num_segments} segments)"
                )
            }
            Self::PositionOutOfRange { position } => {
                write!(f, "position {position} outside [0, 1]")
            }
            Self::ReservedMechanism => {
                write!(
                    f,
                    "'membrane' is reserved; set c_m and r_L through the segment's \
                     membrane parameters"
                )
            }
            Self::SomaNotRoot => {
                write!(f, "the soma must be the first segment of the cell")
            }
        }
    }
}

impl Error for CellError {}

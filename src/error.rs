//! Error types for geometry operations and editor commands.

use crate::editor::{FeatureId, GroupId};
use thiserror::Error;

/// A ring that cannot bound a polygon.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RingError {
    /// Fewer than four positions once closed.
    #[error("degenerate ring: {len} positions, need at least 4 including the closing position")]
    TooFewPoints {
        /// Number of positions in the ring.
        len: usize,
    },

    /// Fewer than three distinct positions.
    #[error("degenerate ring: only {distinct} distinct positions")]
    TooFewDistinct {
        /// Number of distinct positions.
        distinct: usize,
    },

    /// First and last positions differ.
    #[error("ring is not closed")]
    NotClosed,

    /// A coordinate is NaN or infinite.
    #[error("ring contains a non-finite coordinate")]
    NonFinite,
}

/// Why a cutting line failed to split a polygon.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SplitError {
    /// The cutting line has fewer than two positions.
    #[error("cutting line must have at least 2 points")]
    CuttingLineTooShort,

    /// An end segment of the cutting line has zero length, so it has no direction.
    #[error("cutting line has a zero-length end segment")]
    DegenerateCuttingLine,

    /// The line does not enter and leave the polygon.
    #[error("line must cross the polygon at least twice")]
    LineDoesNotCross,

    /// The line touched the polygon without separating it.
    #[error("line did not split the polygon into multiple parts")]
    NoSplit,
}

/// Why a set of polygons could not be merged.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MergeError {
    /// Fewer than two polygons were supplied.
    #[error("need at least 2 polygons to merge")]
    InsufficientInputs,

    /// The union is not a single connected polygon.
    #[error("polygons must overlap or touch to merge; non-adjacent polygons cannot be combined")]
    NotAdjacent,

    /// The union itself failed.
    #[error("union failed: {0}")]
    UnionFailed(String),
}

/// Errors returned by [`Editor`](crate::editor::Editor) commands.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EditorError {
    #[error("no feature with id {0}")]
    FeatureNotFound(FeatureId),

    #[error("no group with id {0}")]
    GroupNotFound(GroupId),

    /// A verb was issued while the editor was in an incompatible mode.
    #[error("expected {expected} mode, editor is {actual}")]
    InvalidMode {
        expected: &'static str,
        actual: &'static str,
    },

    #[error("invalid geometry: {0}")]
    InvalidGeometry(#[from] RingError),

    #[error(transparent)]
    Split(#[from] SplitError),

    #[error(transparent)]
    Merge(#[from] MergeError),
}

/// Errors loading an [`EditorConfig`](crate::config::EditorConfig).
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
}

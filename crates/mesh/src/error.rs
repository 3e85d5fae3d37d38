use thiserror::Error;

/// Errors reported by face construction and geometric queries.
///
/// All of these are values for the caller to inspect and recover from;
/// none should be escalated to a panic.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum FaceError {
    /// An operation was issued in the wrong construction phase.
    #[error("invalid state: {0}")]
    InvalidState(&'static str),

    /// A vertex index does not address the shared vertex list.
    #[error("vertex index {index} out of range for {len} vertices")]
    IndexOutOfRange { index: u32, len: usize },

    /// An edge reported as crossing a slicing plane has zero span on the
    /// slicing axis.
    #[error("degenerate geometry: crossing edge has zero span on the slicing axis")]
    DegenerateGeometry,

    /// A slicing plane crossed an unexpected number of edges.
    #[error("anomalous intersection: {0} edge crossings where 0 or 2 were expected")]
    AnomalousIntersection(usize),
}

pub type Result<T> = std::result::Result<T, FaceError>;

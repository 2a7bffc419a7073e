//! Failure signals for the multi-step solvers.
//!
//! Primitive queries with a single failure mode (centroid, line intersection)
//! return `Option`; solvers that can fail for more than one reason return
//! `Result<_, SolveError>` so callers can phrase a domain message.

use std::fmt;

/// Why a solver produced no result.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SolveError {
    /// Too few legs, points, or control pairs to compute anything.
    InsufficientInput { needed: usize, got: usize },
    /// Geometry is degenerate below the tolerance threshold.
    Degenerate { reason: &'static str },
}

impl SolveError {
    pub(crate) fn insufficient(needed: usize, got: usize) -> Self {
        tracing::debug!(needed, got, "insufficient input");
        Self::InsufficientInput { needed, got }
    }

    pub(crate) fn degenerate(reason: &'static str) -> Self {
        tracing::debug!(reason, "degenerate geometry");
        Self::Degenerate { reason }
    }
}

impl fmt::Display for SolveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InsufficientInput { needed, got } => {
                write!(f, "insufficient input: need at least {needed}, got {got}")
            }
            Self::Degenerate { reason } => write!(f, "cannot solve: {reason}"),
        }
    }
}

impl std::error::Error for SolveError {}

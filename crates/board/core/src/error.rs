//! Common error infrastructure for board-core.
//!
//! Geometry itself never fails; errors only describe requests that cannot be
//! satisfied (nothing reachable) or addresses that do not belong to the grid
//! they were handed to.

use crate::types::{CellAddress, GridTopology, PieceId};

/// Severity level of an error, used for categorization and recovery strategies.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    /// The user can re-initiate the interaction under different conditions.
    ///
    /// Examples: no reachable destination
    Recoverable,

    /// Invalid input, should not retry without changes.
    ///
    /// Examples: cube address handed to a square grid
    Validation,

    /// Unexpected state inconsistency.
    Internal,
}

impl ErrorSeverity {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Recoverable => "recoverable",
            Self::Validation => "validation",
            Self::Internal => "internal",
        }
    }

    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::Recoverable)
    }
}

/// Common trait for all board-core errors.
pub trait BoardError: core::fmt::Display + core::fmt::Debug {
    fn severity(&self) -> ErrorSeverity;

    /// Static identifier for this error variant, used in logs and tests.
    fn error_code(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MovementError {
    #[error("no valid destination for piece {target}")]
    NoValidDestination { target: PieceId },

    #[error("{topology} grid cannot address cell {address}")]
    UnsupportedAddress {
        topology: GridTopology,
        address: CellAddress,
    },

    #[error("{topology} grid has no discrete cells")]
    NoDiscreteCells { topology: GridTopology },
}

impl BoardError for MovementError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::NoValidDestination { .. } => ErrorSeverity::Recoverable,
            Self::UnsupportedAddress { .. } => ErrorSeverity::Validation,
            Self::NoDiscreteCells { .. } => ErrorSeverity::Internal,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::NoValidDestination { .. } => "MOVEMENT_NO_VALID_DESTINATION",
            Self::UnsupportedAddress { .. } => "MOVEMENT_UNSUPPORTED_ADDRESS",
            Self::NoDiscreteCells { .. } => "MOVEMENT_NO_DISCRETE_CELLS",
        }
    }
}

use crate::config::BoardConfig;
use crate::error::MovementError;
use crate::grid::GridAdapter;
use crate::obstruction::ObstructionTester;

use super::{ContinuousRegion, MovementRequest, ValidPositionSet};

/// Everything a click may resolve to for one forced movement.
#[derive(Clone, Debug, PartialEq)]
pub enum ValidDestinations {
    Discrete(ValidPositionSet),
    Continuous(ContinuousRegion),
}

impl ValidDestinations {
    /// Computes the destination set or region for `request`.
    ///
    /// An empty discrete set fails with [`MovementError::NoValidDestination`].
    /// Continuous regions are never rejected up front; an empty region simply
    /// refuses every click.
    pub fn compute(
        grid: &dyn GridAdapter,
        obstruction: &dyn ObstructionTester,
        request: &MovementRequest,
        config: &BoardConfig,
    ) -> Result<Self, MovementError> {
        if grid.is_continuous() {
            return Ok(Self::Continuous(ContinuousRegion::build(
                grid,
                obstruction,
                request,
                config,
            )));
        }

        let set = ValidPositionSet::collect(grid, obstruction, request)?;
        if set.is_empty() {
            return Err(MovementError::NoValidDestination {
                target: request.target,
            });
        }
        Ok(Self::Discrete(set))
    }

    pub fn is_discrete(&self) -> bool {
        matches!(self, Self::Discrete(_))
    }
}

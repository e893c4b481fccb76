use std::collections::HashMap;

use crate::error::MovementError;
use crate::grid::GridAdapter;
use crate::obstruction::ObstructionTester;
use crate::types::{CellAddress, Point};

use super::{MovementRequest, candidate_cells};

/// One accepted discrete destination.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ValidPosition {
    pub address: CellAddress,
    pub top_left: Point,
    pub center: Point,
}

/// Accepted destinations on a discrete board, indexed by cell.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ValidPositionSet {
    positions: Vec<ValidPosition>,
    index: HashMap<CellAddress, usize>,
}

impl ValidPositionSet {
    /// Filters the candidate cells around the target down to accepted destinations.
    ///
    /// A candidate survives when its measured distance from the target lies in
    /// range, the direction predicate holds, and the straight path from the
    /// target is unobstructed. The result may be empty.
    pub fn collect(
        grid: &dyn GridAdapter,
        obstruction: &dyn ObstructionTester,
        request: &MovementRequest,
    ) -> Result<Self, MovementError> {
        let origin_cell = grid
            .to_cell_address(request.origin)
            .ok_or(MovementError::NoDiscreteCells {
                topology: grid.topology(),
            })?;

        let mut set = Self::default();
        for address in candidate_cells(grid, origin_cell, request) {
            let center = grid.cell_center(address)?;
            if !request.in_range(grid.measure(request.origin, center)) {
                continue;
            }
            if !request
                .direction
                .accepts(grid, request.source, request.origin, center)
            {
                continue;
            }
            if obstruction.blocked(request.origin, center) {
                continue;
            }
            set.insert(ValidPosition {
                address,
                top_left: grid.cell_top_left(address)?,
                center,
            });
        }
        Ok(set)
    }

    fn insert(&mut self, position: ValidPosition) {
        self.index.insert(position.address, self.positions.len());
        self.positions.push(position);
    }

    pub fn get(&self, address: CellAddress) -> Option<&ValidPosition> {
        self.index.get(&address).map(|&slot| &self.positions[slot])
    }

    pub fn contains(&self, address: CellAddress) -> bool {
        self.index.contains_key(&address)
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ValidPosition> {
        self.positions.iter()
    }
}

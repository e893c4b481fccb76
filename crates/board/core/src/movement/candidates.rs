use crate::grid::GridAdapter;
use crate::types::CellAddress;

use super::MovementRequest;

/// Over-complete list of cells that might be valid destinations.
///
/// Empty on continuous boards. Membership is decided later by measured
/// distance, direction and obstruction.
pub fn candidate_cells(
    grid: &dyn GridAdapter,
    origin_cell: CellAddress,
    request: &MovementRequest,
) -> Vec<CellAddress> {
    if grid.is_continuous() {
        return Vec::new();
    }
    grid.neighbors_within_steps(origin_cell, request.steps(grid))
}

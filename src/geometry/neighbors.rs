//! Von Neumann neighborhoods on the square terrain grid.
//!
//! Out-of-grid neighbors are reported as `None`; each caller decides what an
//! absent neighbor means (the erosion passes treat it as non-land, the bottom
//! solver as an empty column).

/// Cardinal offsets in `(dx, dy)` form: up, down, left, right.
pub const CARDINAL: [(isize, isize); 4] = [(0, -1), (0, 1), (-1, 0), (1, 0)];

/// Returns the cell at `(x + dx, y + dy)` if it lies on a `size`-wide grid.
#[inline]
pub fn offset(size: usize, x: usize, y: usize, dx: isize, dy: isize) -> Option<(usize, usize)> {
    let nx = x.checked_add_signed(dx)?;
    let ny = y.checked_add_signed(dy)?;
    (nx < size && ny < size).then_some((nx, ny))
}

/// Returns the 4-neighborhood of `(x, y)` in [`CARDINAL`] order.
#[inline]
pub fn neighbor_4(size: usize, x: usize, y: usize) -> [Option<(usize, usize)>; 4] {
    debug_assert!(x < size && y < size);
    CARDINAL.map(|(dx, dy)| offset(size, x, y, dx, dy))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interior_cell_has_four_neighbors() {
        let n = neighbor_4(8, 3, 4);
        assert_eq!(n, [Some((3, 3)), Some((3, 5)), Some((2, 4)), Some((4, 4))]);
    }

    #[test]
    fn test_corner_cells_lose_out_of_grid_neighbors() {
        assert_eq!(neighbor_4(8, 0, 0), [None, Some((0, 1)), None, Some((1, 0))]);
        assert_eq!(neighbor_4(8, 7, 7), [Some((7, 6)), None, Some((6, 7)), None]);
    }

    #[test]
    fn test_neighbors_are_adjacent() {
        let size = 16;
        for y in 0..size {
            for x in 0..size {
                for (nx, ny) in neighbor_4(size, x, y).into_iter().flatten() {
                    assert_eq!(nx.abs_diff(x) + ny.abs_diff(y), 1);
                }
            }
        }
    }
}

use crate::cells::{offset_coordinate, Cell, CellCoordinate, CoordinateSmallVec, DIRS,
                   GridDirection};
use crate::units::{ColumnsCount, RowsCount};

use std::fmt;

/// A rows × columns grid of maze cells, row-major. Starts fully walled and unvisited,
/// is mutated only by the carving algorithm and the entrance/exit forcing step, and is
/// discarded wholesale on regeneration.
pub struct Grid {
    rows: RowsCount,
    columns: ColumnsCount,
    cells: Vec<Cell>,
}

impl fmt::Debug for Grid {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f,
               "Grid :: rows: {:?}, columns: {:?}, visited: {}/{}",
               self.rows,
               self.columns,
               self.cells.iter().filter(|cell| cell.visited).count(),
               self.size())
    }
}

impl Grid {
    /// A fully walled, unvisited grid. Dimensions below 2×2 are a caller contract
    /// violation (the builder clamps user input before constructing a grid).
    pub fn new(rows: RowsCount, columns: ColumnsCount) -> Grid {
        let (RowsCount(rows_count), ColumnsCount(columns_count)) = (rows, columns);
        assert!(rows_count >= 2 && columns_count >= 2,
                "grid dimensions must be at least 2x2");

        Grid {
            rows,
            columns,
            cells: vec![Cell::new(); rows_count * columns_count],
        }
    }

    #[inline]
    pub fn rows(&self) -> RowsCount {
        self.rows
    }

    #[inline]
    pub fn columns(&self) -> ColumnsCount {
        self.columns
    }

    #[inline]
    pub fn size(&self) -> usize {
        self.rows.0 * self.columns.0
    }

    #[inline]
    pub fn is_valid_coordinate(&self, coord: CellCoordinate) -> bool {
        (coord.row as usize) < self.rows.0 && (coord.column as usize) < self.columns.0
    }

    /// Panics on an out of bounds coordinate, which callers prevent via
    /// `is_valid_coordinate` / `neighbour_at_direction`.
    #[inline]
    pub fn cell(&self, coord: CellCoordinate) -> &Cell {
        &self.cells[self.coordinate_to_index(coord)]
    }

    #[inline]
    fn cell_mut(&mut self, coord: CellCoordinate) -> &mut Cell {
        let index = self.coordinate_to_index(coord);
        &mut self.cells[index]
    }

    pub fn neighbour_at_direction(&self,
                                  coord: CellCoordinate,
                                  direction: GridDirection)
                                  -> Option<CellCoordinate> {
        offset_coordinate(coord, direction)
            .filter(|&neighbour_coord| self.is_valid_coordinate(neighbour_coord))
    }

    /// Cells to the Up, Down, Left or Right of a particular cell, whether or not a
    /// passage connects them.
    pub fn neighbours(&self, coord: CellCoordinate) -> CoordinateSmallVec {
        DIRS.iter()
            .filter_map(|&dir| self.neighbour_at_direction(coord, dir))
            .collect()
    }

    #[inline]
    pub fn is_visited(&self, coord: CellCoordinate) -> bool {
        self.cell(coord).visited
    }

    /// Bounds check and visited check folded together, for probing raw offset
    /// coordinates that may have walked off the grid.
    #[inline]
    pub fn is_unvisited_in_bounds(&self, coord: CellCoordinate) -> bool {
        self.is_valid_coordinate(coord) && !self.cell(coord).visited
    }

    pub fn has_unvisited_neighbour(&self, coord: CellCoordinate) -> bool {
        self.neighbours(coord)
            .iter()
            .any(|&neighbour_coord| !self.is_visited(neighbour_coord))
    }

    pub fn has_visited_neighbour(&self, coord: CellCoordinate) -> bool {
        self.neighbours(coord)
            .iter()
            .any(|&neighbour_coord| self.is_visited(neighbour_coord))
    }

    #[inline]
    pub fn mark_visited(&mut self, coord: CellCoordinate) {
        self.cell_mut(coord).visited = true;
    }

    /// Carve a passage: remove the wall on `coord` facing `direction` and the mirrored
    /// wall on the neighbour, as one logical operation. The two flags are never allowed
    /// to disagree. The neighbour must exist; carving a boundary wall this way is a
    /// caller contract violation.
    pub fn remove_wall_pair(&mut self, coord: CellCoordinate, direction: GridDirection) {
        let neighbour_coord = self.neighbour_at_direction(coord, direction)
            .expect("remove_wall_pair requires an in-bounds neighbour");
        self.cell_mut(coord).remove_wall(direction);
        self.cell_mut(neighbour_coord).remove_wall(direction.opposite());
    }

    /// Open a wall on the grid perimeter, used to force the entrance and exit doors.
    /// There is no mirrored flag to keep in sync; the wall must be a boundary wall.
    pub fn remove_boundary_wall(&mut self, coord: CellCoordinate, direction: GridDirection) {
        assert!(self.neighbour_at_direction(coord, direction).is_none(),
                "remove_boundary_wall applies only to perimeter walls");
        self.cell_mut(coord).remove_wall(direction);
    }

    /// Row-major iteration: row ascending, then column ascending. The Hunt phase's scan
    /// order depends on this.
    pub fn iter(&self) -> CellIter {
        CellIter {
            current_cell_number: 0,
            columns_count: self.columns.0,
            cells_count: self.size(),
        }
    }

    #[inline]
    pub fn coordinate_to_index(&self, coord: CellCoordinate) -> usize {
        coord.row as usize * self.columns.0 + coord.column as usize
    }
}

#[derive(Debug, Copy, Clone)]
pub struct CellIter {
    current_cell_number: usize,
    columns_count: usize,
    cells_count: usize,
}
impl Iterator for CellIter {
    type Item = CellCoordinate;
    fn next(&mut self) -> Option<Self::Item> {
        if self.current_cell_number < self.cells_count {
            let row = self.current_cell_number / self.columns_count;
            let column = self.current_cell_number % self.columns_count;
            self.current_cell_number += 1;
            Some(CellCoordinate::new(row as u32, column as u32))
        } else {
            None
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let lower_bound = self.cells_count - self.current_cell_number;
        (lower_bound, Some(lower_bound))
    }
}

impl<'a> IntoIterator for &'a Grid {
    type Item = CellCoordinate;
    type IntoIter = CellIter;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

use rand::Rng;
use smallvec::SmallVec;
use std::convert::From;

/// A cell position on the maze grid. Row 0 is the top row, column 0 the leftmost column.
#[derive(Hash, Eq, PartialEq, Debug, Copy, Clone, Ord, PartialOrd)]
pub struct CellCoordinate {
    pub row: u32,
    pub column: u32,
}
impl CellCoordinate {
    pub fn new(row: u32, column: u32) -> CellCoordinate {
        CellCoordinate { row, column }
    }
}
impl From<(u32, u32)> for CellCoordinate {
    fn from(row_column_pair: (u32, u32)) -> CellCoordinate {
        CellCoordinate::new(row_column_pair.0, row_column_pair.1)
    }
}

pub type CoordinateSmallVec = SmallVec<[CellCoordinate; 4]>;

#[derive(Eq, PartialEq, Copy, Clone, Debug, Hash, Ord, PartialOrd)]
pub enum GridDirection {
    Up,
    Down,
    Left,
    Right,
}

pub const DIRS_COUNT: usize = 4;
pub const DIRS: [GridDirection; DIRS_COUNT] = [GridDirection::Up,
                                               GridDirection::Down,
                                               GridDirection::Left,
                                               GridDirection::Right];

impl GridDirection {
    /// Index into a 4-element wall flag array. Stable: Up 0, Down 1, Left 2, Right 3.
    #[inline]
    pub fn index(self) -> usize {
        match self {
            GridDirection::Up => 0,
            GridDirection::Down => 1,
            GridDirection::Left => 2,
            GridDirection::Right => 3,
        }
    }

    /// The direction a neighbour faces back along a shared wall.
    #[inline]
    pub fn opposite(self) -> GridDirection {
        match self {
            GridDirection::Up => GridDirection::Down,
            GridDirection::Down => GridDirection::Up,
            GridDirection::Left => GridDirection::Right,
            GridDirection::Right => GridDirection::Left,
        }
    }
}

/// Creates a new `CellCoordinate` offset 1 cell away in the given direction.
/// Returns None if the coordinate is not representable (off the top or left edge).
/// The caller bounds-checks against the grid for the other two edges.
pub fn offset_coordinate(coord: CellCoordinate, dir: GridDirection) -> Option<CellCoordinate> {
    let (row, column) = (coord.row, coord.column);
    match dir {
        GridDirection::Up => {
            if row > 0 {
                Some(CellCoordinate { row: row - 1, column })
            } else {
                None
            }
        }
        GridDirection::Down => Some(CellCoordinate { row: row + 1, column }),
        GridDirection::Left => {
            if column > 0 {
                Some(CellCoordinate { row, column: column - 1 })
            } else {
                None
            }
        }
        GridDirection::Right => Some(CellCoordinate { row, column: column + 1 }),
    }
}

/// A uniform draw over all four directions. Carving uses rejection sampling on top of
/// this: a draw whose neighbour is invalid is discarded and drawn again, rather than
/// restricting the draw to the valid directions up front.
pub fn rand_direction<R: Rng>(rng: &mut R) -> GridDirection {
    DIRS[rng.gen_range(0..DIRS_COUNT)]
}

/// One cell's state: a visited marker for the carving algorithm and four independent
/// wall-presence flags. Neighbours are never stored, adjacency is computed from position.
#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub struct Cell {
    pub visited: bool,
    walls: [bool; DIRS_COUNT],
}

impl Cell {
    /// A fresh cell: unvisited with all four walls present.
    pub fn new() -> Cell {
        Cell {
            visited: false,
            walls: [true; DIRS_COUNT],
        }
    }

    #[inline]
    pub fn has_wall(&self, dir: GridDirection) -> bool {
        self.walls[dir.index()]
    }

    #[inline]
    pub(crate) fn remove_wall(&mut self, dir: GridDirection) {
        self.walls[dir.index()] = false;
    }
}

impl Default for Cell {
    fn default() -> Cell {
        Cell::new()
    }
}

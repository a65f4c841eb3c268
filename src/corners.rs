use crate::cells::{CellCoordinate, GridDirection};
use crate::grid::Grid;

/// Physical cell measurements used to place corner pieces. The defaults match the
/// renderer's prefab sizes: 5.0 unit floor tiles, 3.0 unit tall walls, 0.5 unit thick
/// walls and floors.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct CellGeometry {
    pub cell_size: f32,
    pub wall_height: f32,
    pub wall_thickness: f32,
}

impl Default for CellGeometry {
    fn default() -> CellGeometry {
        CellGeometry {
            cell_size: 5.0,
            wall_height: 3.0,
            wall_thickness: 0.5,
        }
    }
}

/// Which of a cell's four corners a placement refers to.
#[derive(Eq, PartialEq, Copy, Clone, Debug, Hash, Ord, PartialOrd)]
pub enum CornerQuadrant {
    UpperLeft,
    UpperRight,
    LowerLeft,
    LowerRight,
}

pub const QUADRANTS: [CornerQuadrant; 4] = [CornerQuadrant::UpperLeft,
                                            CornerQuadrant::UpperRight,
                                            CornerQuadrant::LowerLeft,
                                            CornerQuadrant::LowerRight];

impl CornerQuadrant {
    /// The (vertical, horizontal) wall directions meeting at this corner.
    pub fn meeting_walls(self) -> (GridDirection, GridDirection) {
        match self {
            CornerQuadrant::UpperLeft => (GridDirection::Up, GridDirection::Left),
            CornerQuadrant::UpperRight => (GridDirection::Up, GridDirection::Right),
            CornerQuadrant::LowerLeft => (GridDirection::Down, GridDirection::Left),
            CornerQuadrant::LowerRight => (GridDirection::Down, GridDirection::Right),
        }
    }

    /// Offset signs along the world x and z axes. The world places column growth on +x
    /// and row growth on -z, so "Upper" corners sit at +z and "Left" corners at -x.
    fn offset_signs(self) -> (f32, f32) {
        match self {
            CornerQuadrant::UpperLeft => (-1.0, 1.0),
            CornerQuadrant::UpperRight => (1.0, 1.0),
            CornerQuadrant::LowerLeft => (-1.0, -1.0),
            CornerQuadrant::LowerRight => (1.0, -1.0),
        }
    }
}

/// World-space delta from a cell's floor tile centre to a corner piece centre.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct WorldOffset {
    pub dx: f32,
    pub dy: f32,
    pub dz: f32,
}

/// One corner piece the renderer must instantiate.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct CornerPlacement {
    pub cell: CellCoordinate,
    pub quadrant: CornerQuadrant,
    pub offset: WorldOffset,
}

/// Deterministic post-pass over a fully carved grid: find the corners the carving left
/// uncovered and emit a placement for each. Never mutates the grid, never draws
/// randomness; re-running it on the same grid yields the same placements.
///
/// A corner piece is required at a cell corner when the two walls meeting there on the
/// cell are both gone, the diagonal neighbour sharing the corner is in-bounds, and the
/// two orthogonal neighbours sharing the corner each still hold the wall segment that
/// would otherwise cover it.
pub fn infer_corners(grid: &Grid, geometry: &CellGeometry) -> Vec<CornerPlacement> {
    let mut placements = Vec::new();

    for coord in grid.iter() {
        let cell = grid.cell(coord);
        for &quadrant in &QUADRANTS {
            let (vertical, horizontal) = quadrant.meeting_walls();
            if cell.has_wall(vertical) || cell.has_wall(horizontal) {
                continue;
            }

            let vertical_neighbour = grid.neighbour_at_direction(coord, vertical);
            let horizontal_neighbour = grid.neighbour_at_direction(coord, horizontal);
            if let (Some(v_coord), Some(h_coord)) = (vertical_neighbour, horizontal_neighbour) {
                // The neighbour above/below must keep its left/right wall and the
                // neighbour beside must keep its up/down wall, otherwise the open
                // corner is already part of a wider opening and needs no filler.
                if grid.cell(v_coord).has_wall(horizontal)
                    && grid.cell(h_coord).has_wall(vertical)
                {
                    placements.push(CornerPlacement {
                        cell: coord,
                        quadrant,
                        offset: corner_offset(quadrant, geometry),
                    });
                }
            }
        }
    }

    placements
}

fn corner_offset(quadrant: CornerQuadrant, geometry: &CellGeometry) -> WorldOffset {
    let (sign_x, sign_z) = quadrant.offset_signs();
    let reach = (geometry.cell_size - geometry.wall_thickness) / 2.0;
    WorldOffset {
        dx: sign_x * reach,
        dy: (geometry.wall_height + geometry.wall_thickness) / 2.0,
        dz: sign_z * reach,
    }
}

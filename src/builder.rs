use crate::cells::{CellCoordinate, GridDirection};
use crate::corners::{infer_corners, CellGeometry};
use crate::generators::hunt_and_kill;
use crate::grid::Grid;
use crate::layout::{MazeLayout, Renderer};
use crate::units::{ColumnsCount, RowsCount};

use rand::Rng;
use std::cmp;

/// Requested dimensions below this are clamped up, never rejected.
pub const MINIMUM_DIMENSION: usize = 2;

/// Orchestrates a full generation run: clamp the requested dimensions, carve a fresh
/// grid with Hunt-and-Kill, force the entrance and exit doors open, infer the corner
/// pieces and package everything as a `MazeLayout`.
///
/// The builder itself only holds the cell geometry; each `generate` call starts from a
/// new fully walled grid and is atomic from the caller's perspective, with the injected
/// RNG as the only source of variation between runs.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct MazeBuilder {
    geometry: CellGeometry,
}

impl MazeBuilder {
    pub fn new() -> MazeBuilder {
        MazeBuilder { geometry: CellGeometry::default() }
    }

    pub fn with_geometry(geometry: CellGeometry) -> MazeBuilder {
        MazeBuilder { geometry }
    }

    pub fn generate<R: Rng>(&self,
                            rows_requested: usize,
                            columns_requested: usize,
                            rng: &mut R)
                            -> MazeLayout {
        let rows = cmp::max(rows_requested, MINIMUM_DIMENSION);
        let columns = cmp::max(columns_requested, MINIMUM_DIMENSION);

        let mut grid = Grid::new(RowsCount(rows), ColumnsCount(columns));
        hunt_and_kill(&mut grid, rng);

        // The entrance and exit doors are boundary walls, untouched by interior
        // carving, so opening them can neither disconnect nor cycle the tree.
        grid.remove_boundary_wall(CellCoordinate::new(0, 0), GridDirection::Left);
        grid.remove_boundary_wall(CellCoordinate::new(rows as u32 - 1, columns as u32 - 1),
                                  GridDirection::Right);

        let corners = infer_corners(&grid, &self.geometry);
        MazeLayout::from_grid(&grid, corners)
    }

    /// Generate and hand the layout straight to a renderer collaborator.
    pub fn generate_into<R: Rng, Rend: Renderer>(&self,
                                                 rows_requested: usize,
                                                 columns_requested: usize,
                                                 rng: &mut R,
                                                 renderer: &mut Rend)
                                                 -> MazeLayout {
        let layout = self.generate(rows_requested, columns_requested, rng);
        renderer.render_maze(&layout);
        layout
    }
}

impl Default for MazeBuilder {
    fn default() -> MazeBuilder {
        MazeBuilder::new()
    }
}

#[cfg(test)]
mod tests {

    use super::*;
    use quickcheck::quickcheck;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn generate(rows: usize, columns: usize, seed: u64) -> MazeLayout {
        let mut rng = StdRng::seed_from_u64(seed);
        MazeBuilder::new().generate(rows, columns, &mut rng)
    }

    #[test]
    fn undersized_dimensions_are_clamped_to_the_minimum() {
        let layout = generate(1, 7, 0);
        assert_eq!(layout.rows(), RowsCount(2));
        assert_eq!(layout.columns(), ColumnsCount(7));

        let layout = generate(0, 0, 0);
        assert_eq!(layout.rows(), RowsCount(2));
        assert_eq!(layout.columns(), ColumnsCount(2));
    }

    #[test]
    fn identical_seed_reproduces_the_layout_exactly() {
        let first = generate(6, 9, 1234);
        let second = generate(6, 9, 1234);
        assert_eq!(first, second);
        assert_eq!(format!("{}", first), format!("{}", second));
    }

    #[test]
    fn different_seeds_give_different_valid_mazes() {
        let first = generate(5, 5, 1);
        let second = generate(5, 5, 2);
        assert!(first.is_perfect_maze());
        assert!(second.is_perfect_maze());
        assert_ne!(first, second);
    }

    #[test]
    fn doors_are_forced_open_regardless_of_carving() {
        for seed in 0..16 {
            let layout = generate(3, 3, seed);
            assert!(!layout.walls(layout.entrance()).left);
            assert!(!layout.walls(layout.exit()).right);
        }
    }

    #[test]
    fn renderer_collaborator_receives_the_layout() {
        struct CountingRenderer {
            rendered: usize,
            last_size: usize,
        }
        impl Renderer for CountingRenderer {
            fn render_maze(&mut self, layout: &MazeLayout) {
                self.rendered += 1;
                self.last_size = layout.size();
            }
        }

        let mut renderer = CountingRenderer { rendered: 0, last_size: 0 };
        let mut rng = StdRng::seed_from_u64(8);
        let layout = MazeBuilder::new().generate_into(3, 4, &mut rng, &mut renderer);
        assert_eq!(renderer.rendered, 1);
        assert_eq!(renderer.last_size, 12);
        assert_eq!(layout.size(), 12);
    }

    #[test]
    fn generated_mazes_are_perfect_for_arbitrary_dimensions_and_seeds() {
        fn prop(rows: u8, columns: u8, seed: u64) -> bool {
            // Cap the dimensions to keep the property runs quick; the builder clamps
            // the low end itself.
            let layout = generate((rows % 12) as usize, (columns % 12) as usize, seed);
            layout.is_perfect_maze()
        }
        quickcheck(prop as fn(u8, u8, u64) -> bool);
    }

    #[test]
    fn walls_are_mirror_consistent_for_arbitrary_seeds() {
        fn prop(seed: u64) -> bool {
            let layout = generate(6, 6, seed);
            let (RowsCount(rows), ColumnsCount(columns)) = (layout.rows(), layout.columns());
            (0..rows).all(|row| {
                (0..columns).all(|column| {
                    let coord = crate::cells::CellCoordinate::new(row as u32, column as u32);
                    let walls = layout.walls(coord);
                    let right_agrees = column + 1 >= columns || {
                        let east = layout.walls(crate::cells::CellCoordinate::new(row as u32,
                                                                                  column as u32 + 1));
                        walls.right == east.left
                    };
                    let down_agrees = row + 1 >= rows || {
                        let south = layout.walls(crate::cells::CellCoordinate::new(row as u32 + 1,
                                                                                   column as u32));
                        walls.down == south.up
                    };
                    right_agrees && down_agrees
                })
            })
        }
        quickcheck(prop as fn(u64) -> bool);
    }
}

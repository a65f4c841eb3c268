use crate::cells::CellCoordinate;
use crate::corners::CornerPlacement;
use crate::grid::Grid;
use crate::units::{ColumnsCount, RowsCount};

use petgraph::algo::connected_components;
use petgraph::graph::{NodeIndex, UnGraph};
use std::fmt;

/// Both dimensions below this and the maze is small enough for the presentation layer
/// to offer first-person exploration. A policy for consumers, not a generation limit.
pub const EXPLORABLE_DIMENSION_LIMIT: usize = 21;

/// Wall presence on the four sides of one cell in a finished maze.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct CellWalls {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
}

/// The finished maze description handed to a `Renderer`: per-cell wall presence, the
/// entrance and exit cells (each with one boundary side forced open) and the ordered
/// corner placements. Immutable once built; regeneration produces a whole new layout.
#[derive(Debug, Clone, PartialEq)]
pub struct MazeLayout {
    rows: RowsCount,
    columns: ColumnsCount,
    walls: Vec<CellWalls>,
    entrance: CellCoordinate,
    exit: CellCoordinate,
    corners: Vec<CornerPlacement>,
}

/// The external collaborator that turns a layout into walls, floors, corner pieces,
/// cameras, audio... none of which this crate knows anything about.
pub trait Renderer {
    fn render_maze(&mut self, layout: &MazeLayout);
}

impl MazeLayout {
    /// Snapshot a carved grid into a layout. The grid is read, not kept.
    pub(crate) fn from_grid(grid: &Grid, corners: Vec<CornerPlacement>) -> MazeLayout {
        use crate::cells::GridDirection::{Down, Left, Right, Up};

        let walls = grid.iter()
            .map(|coord| {
                let cell = grid.cell(coord);
                CellWalls {
                    up: cell.has_wall(Up),
                    down: cell.has_wall(Down),
                    left: cell.has_wall(Left),
                    right: cell.has_wall(Right),
                }
            })
            .collect();

        let (RowsCount(rows), ColumnsCount(columns)) = (grid.rows(), grid.columns());
        MazeLayout {
            rows: grid.rows(),
            columns: grid.columns(),
            walls,
            entrance: CellCoordinate::new(0, 0),
            exit: CellCoordinate::new(rows as u32 - 1, columns as u32 - 1),
            corners,
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
    pub fn entrance(&self) -> CellCoordinate {
        self.entrance
    }

    #[inline]
    pub fn exit(&self) -> CellCoordinate {
        self.exit
    }

    #[inline]
    pub fn corners(&self) -> &[CornerPlacement] {
        &self.corners
    }

    /// Panics on an out of bounds coordinate.
    #[inline]
    pub fn walls(&self, coord: CellCoordinate) -> CellWalls {
        self.walls[self.coordinate_to_index(coord)
                       .expect("coordinate out of bounds")]
    }

    #[inline]
    pub fn coordinate_to_index(&self, coord: CellCoordinate) -> Option<usize> {
        if (coord.row as usize) < self.rows.0 && (coord.column as usize) < self.columns.0 {
            Some(coord.row as usize * self.columns.0 + coord.column as usize)
        } else {
            None
        }
    }

    pub fn is_explorable(&self) -> bool {
        self.rows.0 < EXPLORABLE_DIMENSION_LIMIT && self.columns.0 < EXPLORABLE_DIMENSION_LIMIT
    }

    /// Interior wall pairs that are open, each shared wall reported once as
    /// (cell, neighbour) with the neighbour to the right or below. The forced boundary
    /// openings at the entrance and exit have no neighbour and are not passages.
    pub fn passages(&self) -> Vec<(CellCoordinate, CellCoordinate)> {
        let mut passages = Vec::with_capacity(self.size().saturating_sub(1));
        for row in 0..self.rows.0 {
            for column in 0..self.columns.0 {
                let coord = CellCoordinate::new(row as u32, column as u32);
                let walls = self.walls(coord);
                if !walls.right && column + 1 < self.columns.0 {
                    passages.push((coord, CellCoordinate::new(row as u32, column as u32 + 1)));
                }
                if !walls.down && row + 1 < self.rows.0 {
                    passages.push((coord, CellCoordinate::new(row as u32 + 1, column as u32)));
                }
            }
        }
        passages
    }

    #[inline]
    pub fn passages_count(&self) -> usize {
        self.passages().len()
    }

    /// The maze as an undirected graph: one node per cell, one edge per open interior
    /// wall pair.
    pub fn passage_graph(&self) -> UnGraph<(), ()> {
        let mut graph = UnGraph::with_capacity(self.size(), self.size().saturating_sub(1));
        for _ in 0..self.size() {
            let _ = graph.add_node(());
        }
        for (a, b) in self.passages() {
            let a_index = self.coordinate_to_index(a).expect("passage endpoint in bounds");
            let b_index = self.coordinate_to_index(b).expect("passage endpoint in bounds");
            let _ = graph.update_edge(NodeIndex::new(a_index), NodeIndex::new(b_index), ());
        }
        graph
    }

    /// Spanning tree check: exactly size−1 passages and every cell reachable from
    /// every other. Connected with size−1 edges implies acyclic.
    pub fn is_perfect_maze(&self) -> bool {
        let graph = self.passage_graph();
        graph.edge_count() == self.size() - 1 && connected_components(&graph) == 1
    }
}

impl fmt::Display for MazeLayout {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {

        const WALL_L: &str = "╴";
        const WALL_R: &str = "╶";
        const WALL_U: &str = "╵";
        const WALL_D: &str = "╷";
        const WALL_LR_3: &str = "───";
        const WALL_LR: &str = "─";
        const WALL_UD: &str = "│";
        const WALL_LD: &str = "┐";
        const WALL_RU: &str = "└";
        const WALL_LU: &str = "┘";
        const WALL_RD: &str = "┌";
        const WALL_LRU: &str = "┴";
        const WALL_LRD: &str = "┬";
        const WALL_LRUD: &str = "┼";
        const WALL_RUD: &str = "├";
        const WALL_LUD: &str = "┤";

        let (RowsCount(rows), ColumnsCount(columns)) = (self.rows, self.columns);
        let gc = |row: usize, column: usize| CellCoordinate::new(row as u32, column as u32);

        // North boundary first: its tee pieces depend on the walls between the cells of
        // the top row.
        let mut output = String::from(WALL_RD);
        for column in 0..columns {
            output.push_str(WALL_LR_3);
            let is_last_column = column == columns - 1;
            if is_last_column {
                output.push_str(WALL_LD);
            } else if !self.walls(gc(0, column)).right {
                output.push_str(WALL_LR);
            } else {
                output.push_str(WALL_LRD);
            }
        }
        output.push('\n');

        for row in 0..rows {
            let is_last_row = row == rows - 1;
            let row_start_walls = self.walls(gc(row, 0));

            // Each cell uses the southern wall of the cell above as its own northern
            // wall, so a row renders as its middle section (room body and east side)
            // and its bottom section (south side and south-east corner).
            let mut row_middle_section_render =
                String::from(if row_start_walls.left { WALL_UD } else { " " });
            let mut row_bottom_section_render = String::from(if is_last_row {
                WALL_RU
            } else if !row_start_walls.down {
                WALL_UD
            } else {
                WALL_RUD
            });

            for column in 0..columns {
                let walls = self.walls(gc(row, column));
                let is_last_column = column == columns - 1;

                row_middle_section_render.push_str("   ");
                row_middle_section_render.push_str(if walls.right { WALL_UD } else { " " });
                row_bottom_section_render.push_str(if walls.down { WALL_LR_3 } else { "   " });

                let corner = match (is_last_row, is_last_column) {
                    (true, true) => WALL_LU,
                    (true, false) => {
                        if !walls.right {
                            WALL_LR
                        } else {
                            WALL_LRU
                        }
                    }
                    (false, true) => {
                        if !walls.down {
                            WALL_UD
                        } else {
                            WALL_LUD
                        }
                    }
                    (false, false) => {
                        let east_walls = self.walls(gc(row, column + 1));
                        let south_walls = self.walls(gc(row + 1, column));
                        let show_left_section = walls.down;
                        let show_right_section = east_walls.down;
                        let show_up_section = walls.right;
                        let show_down_section = south_walls.right;

                        match (show_left_section,
                               show_right_section,
                               show_up_section,
                               show_down_section) {
                            (true, true, true, true) => WALL_LRUD,
                            (true, true, true, false) => WALL_LRU,
                            (true, true, false, true) => WALL_LRD,
                            (true, false, true, true) => WALL_LUD,
                            (false, true, true, true) => WALL_RUD,
                            (true, true, false, false) => WALL_LR,
                            (false, false, true, true) => WALL_UD,
                            (false, true, true, false) => WALL_RU,
                            (true, false, false, true) => WALL_LD,
                            (true, false, true, false) => WALL_LU,
                            (false, true, false, true) => WALL_RD,
                            (true, false, false, false) => WALL_L,
                            (false, true, false, false) => WALL_R,
                            (false, false, true, false) => WALL_U,
                            (false, false, false, true) => WALL_D,
                            _ => " ",
                        }
                    }
                };
                row_bottom_section_render.push_str(corner);
            }

            output.push_str(&row_middle_section_render);
            output.push('\n');
            output.push_str(&row_bottom_section_render);
            output.push('\n');
        }

        write!(f, "{}", output)
    }
}

#[cfg(test)]
mod tests {

    use super::*;
    use crate::builder::MazeBuilder;
    use petgraph::algo::is_cyclic_undirected;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn layout(rows: usize, columns: usize, seed: u64) -> MazeLayout {
        let mut rng = StdRng::seed_from_u64(seed);
        MazeBuilder::new().generate(rows, columns, &mut rng)
    }

    #[test]
    fn two_by_two_has_three_passages() {
        let layout = layout(2, 2, 42);
        assert_eq!(layout.passages_count(), 3);
        assert!(layout.is_perfect_maze());
    }

    #[test]
    fn passage_graph_is_a_spanning_tree() {
        for &(rows, columns, seed) in &[(2usize, 5usize, 0u64), (5, 5, 1), (8, 3, 2), (10, 10, 3)] {
            let layout = layout(rows, columns, seed);
            let graph = layout.passage_graph();
            assert_eq!(graph.node_count(), rows * columns);
            assert_eq!(graph.edge_count(), rows * columns - 1);
            assert_eq!(connected_components(&graph), 1);
            assert!(!is_cyclic_undirected(&graph));
        }
    }

    #[test]
    fn entrance_and_exit_sides_are_open() {
        let layout = layout(4, 6, 17);
        assert_eq!(layout.entrance(), CellCoordinate::new(0, 0));
        assert_eq!(layout.exit(), CellCoordinate::new(3, 5));
        assert!(!layout.walls(layout.entrance()).left);
        assert!(!layout.walls(layout.exit()).right);
    }

    #[test]
    fn explorability_threshold() {
        assert!(layout(2, 2, 0).is_explorable());
        assert!(layout(20, 20, 0).is_explorable());
        assert!(!layout(21, 2, 0).is_explorable());
        assert!(!layout(2, 21, 0).is_explorable());
    }

    #[test]
    fn display_shape_and_doors() {
        let layout = layout(3, 3, 99);
        let rendered = format!("{}", layout);
        let lines: Vec<&str> = rendered.lines().collect();

        // One north boundary line plus a middle and bottom line per row.
        assert_eq!(lines.len(), 1 + 2 * 3);

        // The entrance opening is the missing west wall on the first row's middle line.
        assert!(lines[1].starts_with(' '));
        // The exit opening is the missing east wall on the last row's middle line.
        assert!(lines[2 * 3 - 1].ends_with(' '));
        // Rows above the exit still show their east boundary wall.
        assert!(lines[1].ends_with('│'));
    }

    #[test]
    fn coordinate_index_round_trip() {
        let layout = layout(3, 4, 5);
        assert_eq!(layout.coordinate_to_index(CellCoordinate::new(0, 0)), Some(0));
        assert_eq!(layout.coordinate_to_index(CellCoordinate::new(1, 0)), Some(4));
        assert_eq!(layout.coordinate_to_index(CellCoordinate::new(2, 3)), Some(11));
        assert_eq!(layout.coordinate_to_index(CellCoordinate::new(3, 0)), None);
    }
}

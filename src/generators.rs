use crate::cells::{offset_coordinate, rand_direction, CellCoordinate};
use crate::grid::Grid;

use rand::Rng;

/// The Hunt-and-Kill phases. The carver is only ever in one of these and every
/// transition is explicit: Walking exhausts a random walk, Hunting rescans the grid,
/// Done means the spanning tree is complete.
#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub enum CarverState {
    Walking,
    Hunting,
    Done,
}

/// Hunt-and-Kill wall carver over a `Grid`.
///
/// The walk phase repeatedly draws a uniformly random direction and carves into the
/// neighbour there when it is in-bounds and unvisited, moving the current cell along.
/// Draws that land on a visited or out-of-bounds neighbour are simply discarded and
/// drawn again (rejection sampling over all four directions, not a draw restricted to
/// the valid ones). The hunt phase scans the grid row-major for the first unvisited
/// cell adjacent to the visited region, attaches it with a single carved wall pair and
/// resumes walking from there. An empty scan completes the maze: the carved passages
/// then form a spanning tree of the cell adjacency graph.
pub struct HuntAndKill<'g> {
    grid: &'g mut Grid,
    current: CellCoordinate,
    state: CarverState,
}

impl<'g> HuntAndKill<'g> {
    /// Starts walking at (0,0), which is marked visited before the first step.
    pub fn new(grid: &'g mut Grid) -> HuntAndKill<'g> {
        let start = CellCoordinate::new(0, 0);
        grid.mark_visited(start);
        HuntAndKill {
            grid,
            current: start,
            state: CarverState::Walking,
        }
    }

    #[inline]
    pub fn state(&self) -> CarverState {
        self.state
    }

    #[inline]
    pub fn is_done(&self) -> bool {
        self.state == CarverState::Done
    }

    #[inline]
    pub fn current_cell(&self) -> CellCoordinate {
        self.current
    }

    /// Advance one phase: a full walk or a full hunt scan. No-op once Done.
    pub fn step<R: Rng>(&mut self, rng: &mut R) {
        match self.state {
            CarverState::Walking => self.walk(rng),
            CarverState::Hunting => self.hunt(rng),
            CarverState::Done => {}
        }
    }

    /// Drive the state machine to completion.
    pub fn run<R: Rng>(&mut self, rng: &mut R) {
        while !self.is_done() {
            self.step(rng);
        }
    }

    /// Random walk from the current cell until it has no unvisited in-bounds
    /// neighbour left, then hand over to the hunt.
    ///
    /// The unvisited-neighbour guard is re-checked on every loop entry, so a rejected
    /// draw just loops around; termination relies on at least one valid direction
    /// existing whenever the guard passes.
    fn walk<R: Rng>(&mut self, rng: &mut R) {
        while self.grid.has_unvisited_neighbour(self.current) {
            let direction = rand_direction(rng);
            if let Some(next) = offset_coordinate(self.current, direction) {
                if self.grid.is_unvisited_in_bounds(next) {
                    self.grid.remove_wall_pair(self.current, direction);
                    self.current = next;
                    self.grid.mark_visited(next);
                }
            }
        }
        self.state = CarverState::Hunting;
    }

    /// Scan the grid row-major for the first unvisited cell with a visited neighbour.
    /// Found: mark it visited, attach it to the visited region by one carved wall pair
    /// and resume walking there. Not found: every cell is visited, so we are done.
    fn hunt<R: Rng>(&mut self, rng: &mut R) {
        let found = self.grid
            .iter()
            .find(|&coord| !self.grid.is_visited(coord) && self.grid.has_visited_neighbour(coord));

        match found {
            Some(coord) => {
                self.grid.mark_visited(coord);
                self.current = coord;
                self.carve_from_visited_neighbour(rng);
                self.state = CarverState::Walking;
            }
            None => {
                self.state = CarverState::Done;
            }
        }
    }

    /// Carve exactly one wall pair from the current cell to a visited neighbour,
    /// chosen by the same rejection sampling as the walk. The hunt's scan condition
    /// guarantees such a neighbour exists; anything else is a broken visited invariant.
    fn carve_from_visited_neighbour<R: Rng>(&mut self, rng: &mut R) {
        assert!(self.grid.has_visited_neighbour(self.current),
                "hunt selected a cell with no visited neighbour");

        loop {
            let direction = rand_direction(rng);
            if let Some(neighbour) = self.grid.neighbour_at_direction(self.current, direction) {
                if self.grid.is_visited(neighbour) {
                    self.grid.remove_wall_pair(self.current, direction);
                    break;
                }
            }
        }
    }
}

/// Apply the Hunt-and-Kill maze generation algorithm to a grid.
pub fn hunt_and_kill<R: Rng>(grid: &mut Grid, rng: &mut R) {
    let mut carver = HuntAndKill::new(grid);
    carver.run(rng);
}

#[cfg(test)]
mod tests {

    use super::*;
    use crate::cells::{GridDirection, DIRS};
    use crate::units::{ColumnsCount, RowsCount};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    /// Open interior wall pairs, counting each shared wall once.
    fn passages_count(grid: &Grid) -> usize {
        grid.iter()
            .map(|coord| {
                [GridDirection::Right, GridDirection::Down]
                    .iter()
                    .filter(|&&dir| {
                        grid.neighbour_at_direction(coord, dir).is_some()
                            && !grid.cell(coord).has_wall(dir)
                    })
                    .count()
            })
            .sum()
    }

    /// Both sides of every interior wall agree.
    fn walls_are_mirror_consistent(grid: &Grid) -> bool {
        grid.iter().all(|coord| {
            DIRS.iter().all(|&dir| match grid.neighbour_at_direction(coord, dir) {
                Some(neighbour) => {
                    grid.cell(coord).has_wall(dir)
                        == grid.cell(neighbour).has_wall(dir.opposite())
                }
                None => true,
            })
        })
    }

    #[test]
    fn starts_walking_at_origin_already_visited() {
        let mut g = Grid::new(RowsCount(3), ColumnsCount(3));
        let carver = HuntAndKill::new(&mut g);
        assert_eq!(carver.state(), CarverState::Walking);
        assert_eq!(carver.current_cell(), CellCoordinate::new(0, 0));
        assert!(carver.grid.is_visited(CellCoordinate::new(0, 0)));
    }

    #[test]
    fn first_walk_ends_in_hunting_state() {
        let mut g = Grid::new(RowsCount(4), ColumnsCount(4));
        let mut rng = StdRng::seed_from_u64(11);
        let mut carver = HuntAndKill::new(&mut g);
        carver.step(&mut rng);
        assert_eq!(carver.state(), CarverState::Hunting);
        // The walk carved at least one passage away from the origin.
        assert_ne!(carver.current_cell(), CellCoordinate::new(0, 0));
    }

    #[test]
    fn run_visits_every_cell() {
        let mut g = Grid::new(RowsCount(5), ColumnsCount(4));
        let mut rng = StdRng::seed_from_u64(3);
        hunt_and_kill(&mut g, &mut rng);
        for coord in g.iter() {
            assert!(g.is_visited(coord));
        }
    }

    #[test]
    fn run_carves_a_spanning_tree_worth_of_passages() {
        for seed in 0..8 {
            let mut g = Grid::new(RowsCount(5), ColumnsCount(5));
            let mut rng = StdRng::seed_from_u64(seed);
            hunt_and_kill(&mut g, &mut rng);
            assert_eq!(passages_count(&g), 5 * 5 - 1);
            assert!(walls_are_mirror_consistent(&g));
        }
    }

    #[test]
    fn two_by_two_carves_exactly_three_passages() {
        let mut g = Grid::new(RowsCount(2), ColumnsCount(2));
        let mut rng = StdRng::seed_from_u64(1);
        hunt_and_kill(&mut g, &mut rng);
        assert_eq!(passages_count(&g), 3);
    }

    #[test]
    fn boundary_walls_survive_carving() {
        let mut g = Grid::new(RowsCount(4), ColumnsCount(4));
        let mut rng = StdRng::seed_from_u64(9);
        hunt_and_kill(&mut g, &mut rng);
        for coord in g.iter() {
            for &dir in &DIRS {
                if g.neighbour_at_direction(coord, dir).is_none() {
                    assert!(g.cell(coord).has_wall(dir));
                }
            }
        }
    }

    #[test]
    fn stepping_when_done_is_a_no_op() {
        let mut g = Grid::new(RowsCount(2), ColumnsCount(2));
        let mut rng = StdRng::seed_from_u64(5);
        let mut carver = HuntAndKill::new(&mut g);
        carver.run(&mut rng);
        assert!(carver.is_done());
        carver.step(&mut rng);
        assert_eq!(carver.state(), CarverState::Done);
    }
}

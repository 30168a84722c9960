mod listener;
mod rule;
mod step;
mod window;

use self::step::NextGen;
pub use self::listener::{ChangeListener, NoopListener};
pub use self::window::GameEngineWindow;
use crate::{Pos2, Torus, pattern};
use std::collections::BTreeSet;

/// Conway's Game of Life on a fixed-size torus
///
/// Cells are stored twice: a dense presence bitmap for O(1) point queries
/// and an ordered set of live cell indices, so that stepping only visits
/// live cells and their neighbours. Both are only ever changed together, by
/// [`GameOfLife::set`].
#[derive(Debug, Clone)]
pub struct GameOfLife {
    torus: Torus,
    cells: Vec<bool>,
    live: BTreeSet<usize>,
}

impl GameOfLife {
    /// Creates a grid of dead cells
    ///
    /// # Panics
    /// If either dimension is zero (see [`Torus::new`]).
    pub fn new(width: usize, height: usize) -> Self {
        let torus = Torus::new(width, height);
        log::debug!("created {width}x{height} grid");
        Self {
            torus,
            cells: vec![false; torus.len()],
            live: BTreeSet::new(),
        }
    }

    #[inline]
    pub fn torus(&self) -> Torus {
        self.torus
    }
    #[inline]
    pub fn width(&self) -> usize {
        self.torus.width()
    }
    #[inline]
    pub fn height(&self) -> usize {
        self.torus.height()
    }

    #[inline]
    pub fn alive_count(&self) -> usize {
        self.live.len()
    }

    /// Whether the cell at `index` is alive
    ///
    /// # Panics
    /// If `index` is not below `width * height`. Indices from
    /// [`Torus::index_from_xy`] are always in range.
    #[inline]
    pub fn get(&self, index: usize) -> bool {
        self.check_index(index);
        self.cells[index]
    }

    #[inline]
    pub fn get_xy(&self, x: i32, y: i32) -> bool {
        self.cells[self.torus.index_from_xy(x, y)]
    }

    /// Sets the cell at `index` alive or dead
    ///
    /// Setting a cell to the state it already has changes nothing.
    ///
    /// # Panics
    /// If `index` is not below `width * height`.
    pub fn set(&mut self, index: usize, alive: bool) {
        self.check_index(index);
        self.cells[index] = alive;
        if alive {
            self.live.insert(index);
        } else {
            self.live.remove(&index);
        }
    }

    #[inline]
    pub fn set_xy(&mut self, x: i32, y: i32, alive: bool) {
        self.set(self.torus.index_from_xy(x, y), alive)
    }

    /// Kills every cell
    pub fn clear(&mut self) {
        for index in std::mem::take(&mut self.live) {
            self.cells[index] = false;
        }
    }

    /// A snapshot of every live cell, in row-major order
    pub fn live_cells(&self) -> Vec<Pos2> {
        self.live
            .iter()
            .map(|&index| self.torus.index_to_xy(index))
            .collect()
    }

    /// Advances one generation, discarding the change notifications
    ///
    /// Returns `false` once the grid has reached a fixed point.
    #[inline]
    pub fn next_generation(&mut self) -> bool {
        self.next_generation_with(&mut NoopListener)
    }

    /// Advances one generation, reporting every cell that changes state
    ///
    /// All cells are evaluated against the current generation before any of
    /// them is updated. `listener` sees each birth and death exactly once, in
    /// row-major order, before the new generation is committed.
    ///
    /// Returns whether any cell changed.
    pub fn next_generation_with<L>(&mut self, listener: &mut L) -> bool
    where
        L: ChangeListener + ?Sized,
    {
        let changes = NextGen::new(self).evaluate(listener);
        log::trace!(
            "generation step: {} born, {} died",
            changes.born.len(),
            changes.died.len()
        );

        // births and deaths are disjoint, so the order of the two passes is free
        for &index in &changes.born {
            self.set(index, true);
        }
        for &index in &changes.died {
            self.set(index, false);
        }
        !changes.is_empty()
    }

    /// Marks cells alive from an ASCII pattern anchored at `(x, y)`
    ///
    /// Every `O` at row `r`, column `c` of `pattern` sets the cell at
    /// `(x + c, y + r)` alive. Any other character leaves its cell as it is,
    /// so overlaying a pattern never kills cells. Lines may differ in length.
    pub fn parse_pattern(&mut self, x: i32, y: i32, pattern: &str) {
        let origin = Pos2::new(x, y);
        self.place(origin, pattern::plaintext_cells(pattern));
    }

    /// Marks `origin + offset` alive for every offset in `cells`
    pub fn place<I>(&mut self, origin: Pos2, cells: I)
    where
        I: IntoIterator<Item = Pos2>,
    {
        let before = self.alive_count();
        for offset in cells {
            let pos = self.torus.translate(origin, offset);
            self.set_xy(pos.x, pos.y, true);
        }
        log::debug!(
            "placed pattern at ({}, {}), {} new live cells",
            origin.x,
            origin.y,
            self.alive_count() - before
        );
    }

    #[inline]
    fn check_index(&self, index: usize) {
        assert!(
            self.torus.contains(index),
            "cell index {index} out of bounds for {}x{} grid",
            self.width(),
            self.height()
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{Rng, SeedableRng, rngs::StdRng};

    fn pos(x: i32, y: i32) -> Pos2 {
        Pos2 { x, y }
    }

    /// Steps once and returns the reported changes in notification order
    fn step(game: &mut GameOfLife) -> (bool, Vec<(Pos2, bool)>) {
        let mut changes = Vec::new();
        let changed = game.next_generation_with(&mut |x: i32, y: i32, alive: bool| {
            changes.push((pos(x, y), alive))
        });
        (changed, changes)
    }

    fn assert_consistent(game: &GameOfLife) {
        let torus = game.torus();
        let from_bitmap: Vec<Pos2> = (0..torus.len())
            .filter(|&index| game.get(index))
            .map(|index| torus.index_to_xy(index))
            .collect();
        assert_eq!(game.live_cells(), from_bitmap);
        assert_eq!(game.alive_count(), from_bitmap.len());
    }

    #[test]
    fn new_grid_is_dead() {
        let game = GameOfLife::new(7, 3);

        assert_eq!(game.alive_count(), 0);
        assert!(game.live_cells().is_empty());
        assert!((0..21).all(|index| !game.get(index)));
    }

    #[test]
    fn coordinates_wrap_onto_the_same_cell() {
        let mut game = GameOfLife::new(10, 10);
        game.set_xy(-1, -1, true);

        assert!(game.get_xy(9, 9));
        assert!(game.get_xy(19, -11));
        assert!(game.get(99));
        assert_eq!(game.live_cells(), vec![pos(9, 9)]);
    }

    #[test]
    fn set_keeps_bitmap_and_live_set_in_sync() {
        let mut rng = StdRng::seed_from_u64(0x6c69_6665);
        let mut game = GameOfLife::new(13, 9);

        for _ in 0..500 {
            let index = rng.random_range(0..13 * 9);
            game.set(index, rng.random_bool(0.6));
            assert_consistent(&game);
        }
    }

    #[test]
    fn set_is_idempotent() {
        let mut once = GameOfLife::new(5, 5);
        once.set(7, true);
        once.set(3, false);

        let mut twice = GameOfLife::new(5, 5);
        for _ in 0..2 {
            twice.set(7, true);
            twice.set(3, false);
        }

        assert_eq!(once.live_cells(), twice.live_cells());
        assert_eq!(once.to_string(), twice.to_string());
        assert_consistent(&twice);
    }

    #[test]
    fn clear_kills_everything() {
        let mut game = GameOfLife::new(6, 6);
        game.parse_pattern(0, 0, "OOO\nO.O");
        game.clear();

        assert_eq!(game.alive_count(), 0);
        assert_consistent(&game);
    }

    #[test]
    #[should_panic(expected = "out of bounds")]
    fn get_rejects_raw_index_past_the_grid() {
        let game = GameOfLife::new(4, 4);
        game.get(16);
    }

    #[test]
    #[should_panic(expected = "out of bounds")]
    fn set_rejects_raw_index_past_the_grid() {
        let mut game = GameOfLife::new(4, 4);
        game.set(usize::MAX, true);
    }

    #[test]
    fn lone_cell_dies_then_fixed_point() {
        let mut game = GameOfLife::new(6, 6);
        game.set_xy(2, 2, true);

        let (changed, changes) = step(&mut game);
        assert!(changed);
        assert_eq!(changes, vec![(pos(2, 2), false)]);
        assert_eq!(game.alive_count(), 0);

        for _ in 0..3 {
            assert!(!game.next_generation());
        }
    }

    #[test]
    fn block_is_a_still_life() {
        let mut game = GameOfLife::new(8, 8);
        game.parse_pattern(3, 3, "OO\nOO");
        let before = game.live_cells();

        let (changed, changes) = step(&mut game);
        assert!(!changed);
        assert!(changes.is_empty());
        assert_eq!(game.live_cells(), before);
    }

    #[test]
    fn blinker_oscillates() {
        let mut game = GameOfLife::new(5, 5);
        for x in 1..=3 {
            game.set_xy(x, 0, true);
        }

        let (changed, changes) = step(&mut game);
        assert!(changed);
        // the middle cell survives; the column wraps over the top edge
        assert_eq!(
            changes,
            vec![
                (pos(1, 0), false),
                (pos(3, 0), false),
                (pos(2, 1), true),
                (pos(2, 4), true),
            ]
        );
        assert_eq!(game.live_cells(), vec![pos(2, 0), pos(2, 1), pos(2, 4)]);

        let (changed, changes) = step(&mut game);
        assert!(changed);
        assert_eq!(
            changes,
            vec![
                (pos(1, 0), true),
                (pos(3, 0), true),
                (pos(2, 1), false),
                (pos(2, 4), false),
            ]
        );
        assert_eq!(game.live_cells(), vec![pos(1, 0), pos(2, 0), pos(3, 0)]);
        assert_consistent(&game);
    }

    #[test]
    fn dead_cell_with_three_neighbours_is_born() {
        let mut game = GameOfLife::new(8, 8);
        game.parse_pattern(2, 2, "OO\nO");

        let (changed, changes) = step(&mut game);
        assert!(changed);
        assert_eq!(changes, vec![(pos(3, 3), true)]);
        assert!(game.get_xy(3, 3));
        assert_eq!(game.alive_count(), 4);
    }

    #[test]
    fn overcrowded_cell_dies() {
        let mut game = GameOfLife::new(12, 12);
        game.parse_pattern(4, 4, ".O.\nOOO\n.O.");

        let (_, changes) = step(&mut game);
        assert!(changes.contains(&(pos(5, 5), false)));
        assert!(!game.get_xy(5, 5));
    }

    #[test]
    fn isolated_cells_die() {
        let mut game = GameOfLife::new(12, 12);
        // a lone cell and a pair, zero and one neighbour each
        game.parse_pattern(1, 1, "O....OO");

        let (_, changes) = step(&mut game);
        assert_eq!(
            changes,
            vec![(pos(1, 1), false), (pos(6, 1), false), (pos(7, 1), false)]
        );
        assert_eq!(game.alive_count(), 0);
    }

    #[test]
    fn cells_with_two_or_three_neighbours_are_not_reported() {
        let mut game = GameOfLife::new(12, 12);
        // the middle of the diagonal has two neighbours, the ends one
        game.parse_pattern(1, 1, "O\n.O\n..O");

        let (_, changes) = step(&mut game);
        assert_eq!(changes, vec![(pos(1, 1), false), (pos(3, 3), false)]);
        assert!(game.get_xy(2, 2));
    }

    #[test]
    fn neighbours_are_counted_across_the_diagonal_wrap() {
        let (w, h) = (7, 5);
        let mut game = GameOfLife::new(w, h);
        game.set_xy(0, 0, true);
        game.set_xy(w as i32 - 1, h as i32 - 1, true);

        assert_eq!(NextGen::new(&game).live_neighbours(0, 0), 1);

        // with two more wrapped neighbours the origin's corner gets a birth
        game.set_xy(0, h as i32 - 1, true);
        game.set_xy(0, 0, false);
        game.set_xy(w as i32 - 1, 0, true);
        assert_eq!(NextGen::new(&game).live_neighbours(0, 0), 3);

        let (_, changes) = step(&mut game);
        assert!(changes.contains(&(pos(0, 0), true)));
    }

    #[test]
    fn glider_travels_around_the_torus() {
        let mut game = GameOfLife::new(8, 8);
        game.parse_pattern(0, 0, ".O\n..O\nOOO");
        let start = game.live_cells();

        // a glider moves one cell diagonally every 4 generations
        for _ in 0..4 {
            assert!(game.next_generation());
        }
        let shifted: Vec<Pos2> = start
            .iter()
            .map(|&p| game.torus().translate(p, pos(1, 1)))
            .collect();
        assert_eq!(game.live_cells(), shifted);

        for _ in 4..32 {
            assert!(game.next_generation());
        }
        assert_eq!(game.live_cells(), start);
        assert_consistent(&game);
    }

    #[test]
    fn every_change_is_reported_once() {
        let mut game = GameOfLife::new(16, 16);
        game.parse_pattern(3, 3, ".O\n..O\nOOO\n\n.....OO\n.....O.O");

        for _ in 0..20 {
            let before = game.clone();
            let (changed, changes) = step(&mut game);

            let mut seen: Vec<Pos2> = changes.iter().map(|&(p, _)| p).collect();
            seen.dedup();
            assert_eq!(seen.len(), changes.len());
            assert_eq!(changed, !changes.is_empty());
            for (p, alive) in changes {
                assert_eq!(before.get_xy(p.x, p.y), !alive);
                assert_eq!(game.get_xy(p.x, p.y), alive);
            }
            assert_consistent(&game);
        }
    }

    #[test]
    fn parse_pattern_sets_only_markers() {
        let mut game = GameOfLife::new(4, 4);
        game.parse_pattern(0, 0, "O.\n.O");

        assert_eq!(game.live_cells(), vec![pos(0, 0), pos(1, 1)]);
    }

    #[test]
    fn parse_pattern_overlays_without_killing() {
        let mut game = GameOfLife::new(6, 6);
        game.set_xy(1, 0, true);
        game.set_xy(5, 5, true);
        game.parse_pattern(0, 0, "O.x\n\n..O");

        assert_eq!(game.live_cells(), vec![pos(0, 0), pos(1, 0), pos(2, 2), pos(5, 5)]);
    }

    #[test]
    fn parse_pattern_wraps_and_accepts_ragged_lines() {
        let mut game = GameOfLife::new(5, 5);
        game.parse_pattern(4, 4, "OO\nO\n·O");

        assert_eq!(game.live_cells(), vec![pos(4, 0), pos(0, 1), pos(0, 4), pos(4, 4)]);
    }

    #[test]
    fn parse_pattern_at_the_coordinate_limits() {
        let mut game = GameOfLife::new(10, 10);
        // i32::MAX is 7 modulo 10, the second column lands on 8 rather than
        // jumping to i32::MIN
        game.parse_pattern(i32::MAX, 0, "OO");

        assert_eq!(game.live_cells(), vec![pos(7, 0), pos(8, 0)]);

        game.clear();
        game.parse_pattern(0, i32::MAX, "O\nO");
        assert_eq!(game.live_cells(), vec![pos(0, 7), pos(0, 8)]);
    }
}

use super::{
    GameOfLife,
    listener::ChangeListener,
    rule::{self, Fate},
};
use std::collections::BTreeSet;

/// The cell indices that change state in one generation
#[derive(Debug, Default)]
pub(super) struct Changes {
    pub born: Vec<usize>,
    pub died: Vec<usize>,
}
impl Changes {
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.born.is_empty() && self.died.is_empty()
    }
}

/// Read-only evaluation of the next generation
///
/// Holds a shared borrow of the game, so every neighbour count is taken
/// against the same pre-step state. The caller applies the returned
/// [`Changes`] afterwards.
pub(super) struct NextGen<'a> {
    game: &'a GameOfLife,
}
impl<'a> NextGen<'a> {
    pub fn new(game: &'a GameOfLife) -> Self {
        Self { game }
    }

    /// Every live cell together with its neighbourhood, each index once
    ///
    /// Any other cell is dead with no live neighbours and stays dead.
    fn candidates(&self) -> BTreeSet<usize> {
        let torus = self.game.torus();
        let mut candidates = BTreeSet::new();
        for &index in &self.game.live {
            let pos = torus.index_to_xy(index);
            candidates.insert(index);
            candidates.extend(torus.neighbours(pos.x, pos.y));
        }
        candidates
    }

    pub fn live_neighbours(&self, x: i32, y: i32) -> usize {
        self.game
            .torus()
            .neighbours(x, y)
            .into_iter()
            .filter(|&index| self.game.cells[index])
            .count()
    }

    /// Classifies every candidate, notifying `listener` of each change in
    /// ascending index order
    pub fn evaluate<L>(self, listener: &mut L) -> Changes
    where
        L: ChangeListener + ?Sized,
    {
        let torus = self.game.torus();
        let mut changes = Changes::default();
        for index in self.candidates() {
            let pos = torus.index_to_xy(index);
            let alive = self.game.cells[index];
            match rule::fate(alive, self.live_neighbours(pos.x, pos.y)) {
                Fate::Born => {
                    listener.on_change(pos.x, pos.y, true);
                    changes.born.push(index);
                }
                Fate::Died => {
                    listener.on_change(pos.x, pos.y, false);
                    changes.died.push(index);
                }
                Fate::Unchanged => {}
            }
        }
        changes
    }
}

use super::GameOfLife;
use crate::{Pos2, Torus};

/// A rectangular view onto the torus, anchored at a top-left cell
///
/// Projects grid coordinates onto view-relative offsets in `0..cols`,
/// `0..rows`. The anchor may be any coordinate; the view wraps with the
/// grid. A view larger than the grid shows each cell once, it does not tile.
#[derive(Debug, Clone, Copy)]
pub struct GameEngineWindow {
    torus: Torus,
    tl: Pos2,
    cols: usize,
    rows: usize,
}
impl GameEngineWindow {
    pub fn new(torus: Torus, top_left: Pos2, cols: usize, rows: usize) -> Self {
        Self {
            torus,
            tl: torus.wrap(top_left.x, top_left.y),
            cols,
            rows,
        }
    }

    #[inline]
    pub fn top_left(&self) -> Pos2 {
        self.tl
    }

    /// Moves the anchor by `delta`, wrapping around the grid
    pub fn scroll(&mut self, delta: Pos2) {
        self.tl = self.torus.translate(self.tl, delta);
    }

    /// The view-relative offset of the cell at `(x, y)`, if it is visible
    pub fn project(&self, x: i32, y: i32) -> Option<Pos2> {
        // the anchor is wrapped, so negating it cannot overflow
        let offset = self.torus.translate(Pos2::new(x, y), Pos2::new(-self.tl.x, -self.tl.y));
        let visible = (offset.x as usize) < self.cols && (offset.y as usize) < self.rows;
        visible.then_some(offset)
    }

    /// The view-relative offsets of every visible live cell
    pub fn iter<'a>(&'a self, game: &'a GameOfLife) -> impl Iterator<Item = Pos2> + 'a {
        game.live_cells()
            .into_iter()
            .filter_map(move |pos| self.project(pos.x, pos.y))
    }
}

/// Renders the whole grid as plaintext rows, `O` alive and `.` dead
///
/// The output is accepted back by [`GameOfLife::parse_pattern`].
impl std::fmt::Display for GameOfLife {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for y in 0..self.height() as i32 {
            if y > 0 {
                writeln!(f)?;
            }
            for x in 0..self.width() as i32 {
                let c = if self.get_xy(x, y) { 'O' } else { '.' };
                write!(f, "{c}")?;
            }
        }
        Ok(())
    }
}

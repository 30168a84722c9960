use crate::Pos2;

/// Relative positions of the Moore neighbourhood, in the order returned by
/// [`Torus::neighbours`]: NW, N, NE, W, E, SW, S, SE
const NEIGHBOUR_OFFSETS: [Pos2; 8] = [
    Pos2::new(-1, -1),
    Pos2::new(0, -1),
    Pos2::new(1, -1),
    Pos2::new(-1, 0),
    Pos2::new(1, 0),
    Pos2::new(-1, 1),
    Pos2::new(0, 1),
    Pos2::new(1, 1),
];

/// Addressing for a fixed-size grid whose edges wrap around
///
/// Converts between `(x, y)` coordinates and a row-major cell index in
/// `0..width * height`. Every coordinate is valid: `x` is wrapped into
/// `0..width` and `y` into `0..height` with a floored modulo, so `-1` lands
/// on the last column/row rather than being truncated towards zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Torus {
    width: usize,
    height: usize,
}

impl Torus {
    /// # Panics
    /// If either dimension is zero, does not fit in an `i32` coordinate, or
    /// the cell count overflows `usize`.
    pub fn new(width: usize, height: usize) -> Self {
        assert!(width > 0 && height > 0, "grid must not be empty, got {width}x{height}");
        assert!(
            i32::try_from(width).is_ok() && i32::try_from(height).is_ok(),
            "grid {width}x{height} does not fit in i32 coordinates"
        );
        assert!(
            width.checked_mul(height).is_some(),
            "grid {width}x{height} has too many cells"
        );
        Self { width, height }
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }
    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// The number of cells on the grid
    #[inline]
    pub fn len(&self) -> usize {
        self.width * self.height
    }
    /// Always `false`, a torus has at least one cell
    #[inline]
    pub fn is_empty(&self) -> bool {
        false
    }

    #[inline]
    pub fn contains(&self, index: usize) -> bool {
        index < self.len()
    }

    /// Wraps a coordinate onto the canonical `0..width`, `0..height` range
    #[inline]
    pub fn wrap(&self, x: i32, y: i32) -> Pos2 {
        self.wrap_wide(i64::from(x), i64::from(y))
    }

    /// The wrapped cell `offset` away from `origin`
    ///
    /// The sum is taken in `i64`, so origins near the `i32` limits still land
    /// on the cell a floored modulo of the true sum names.
    #[inline]
    pub fn translate(&self, origin: Pos2, offset: Pos2) -> Pos2 {
        self.wrap_wide(
            i64::from(origin.x) + i64::from(offset.x),
            i64::from(origin.y) + i64::from(offset.y),
        )
    }

    #[inline]
    fn wrap_wide(&self, x: i64, y: i64) -> Pos2 {
        let x = x.rem_euclid(self.width as i64);
        let y = y.rem_euclid(self.height as i64);
        Pos2::new(x as i32, y as i32)
    }

    #[inline]
    pub fn index_from_xy(&self, x: i32, y: i32) -> usize {
        let pos = self.wrap(x, y);
        pos.x as usize + self.width * pos.y as usize
    }

    #[inline]
    pub fn index_to_xy(&self, index: usize) -> Pos2 {
        debug_assert!(self.contains(index), "cell index {index} out of bounds");
        Pos2::new((index % self.width) as i32, (index / self.width) as i32)
    }

    /// The Moore neighbourhood of `(x, y)` as cell indices
    ///
    /// The order is stable (NW, N, NE, W, E, SW, S, SE). On grids narrower or
    /// shorter than 3 cells several entries can name the same cell, or the
    /// cell itself; callers count every entry, duplicates included.
    pub fn neighbours(&self, x: i32, y: i32) -> [usize; 8] {
        let center = Pos2::new(x, y);
        NEIGHBOUR_OFFSETS.map(|offset| {
            let pos = self.translate(center, offset);
            pos.x as usize + self.width * pos.y as usize
        })
    }
}

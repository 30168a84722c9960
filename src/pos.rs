use std::cmp::Ordering;

/// A cell coordinate on the torus
///
/// Coordinates handed to the engine may be any `i32`; they are wrapped by
/// [`Torus`](crate::Torus) before they address a cell. Coordinates handed
/// back by the engine are always wrapped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Pos2 {
    pub x: i32,
    pub y: i32,
}
impl Pos2 {
    #[inline]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
    #[inline]
    pub const fn zero() -> Self {
        Self::new(0, 0)
    }
}
impl Default for Pos2 {
    #[inline]
    fn default() -> Self {
        Self::zero()
    }
}
impl From<(i32, i32)> for Pos2 {
    #[inline]
    fn from((x, y): (i32, i32)) -> Self {
        Self { x, y }
    }
}
impl From<Pos2> for (i32, i32) {
    #[inline]
    fn from(pos: Pos2) -> Self {
        (pos.x, pos.y)
    }
}
impl PartialOrd for Pos2 {
    #[inline]
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
impl Ord for Pos2 {
    /// Row-major: `y` first, then `x`
    ///
    /// For wrapped coordinates this is the same order as their cell index.
    #[inline]
    fn cmp(&self, other: &Self) -> Ordering {
        Ord::cmp(&self.y, &other.y).then(Ord::cmp(&self.x, &other.x))
    }
}

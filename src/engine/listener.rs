/// Receives the cells that change state during a generation step
///
/// [`on_change`](ChangeListener::on_change) is called once per changed cell,
/// on the caller's thread, before the step commits. `x` and `y` are always
/// wrapped onto the grid. The listener is only borrowed for the duration of
/// a single step.
///
/// Any `FnMut(i32, i32, bool)` closure is a listener:
/// ```rust
/// use toruslife::GameOfLife;
///
/// let mut game = GameOfLife::new(8, 8);
/// game.parse_pattern(1, 1, "OOO");
///
/// let mut births = 0;
/// game.next_generation_with(&mut |_x: i32, _y: i32, alive: bool| births += usize::from(alive));
/// assert_eq!(births, 2);
/// ```
pub trait ChangeListener {
    fn on_change(&mut self, x: i32, y: i32, alive: bool);
}

/// A listener that ignores every change
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopListener;

impl ChangeListener for NoopListener {
    #[inline]
    fn on_change(&mut self, _x: i32, _y: i32, _alive: bool) {}
}

impl<F> ChangeListener for F
where
    F: FnMut(i32, i32, bool),
{
    #[inline]
    fn on_change(&mut self, x: i32, y: i32, alive: bool) {
        self(x, y, alive)
    }
}

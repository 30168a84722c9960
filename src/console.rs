use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent, KeyModifiers},
    execute, queue, style, terminal,
};
use std::io::{self, Write};
use toruslife::{ChangeListener, GameEngineWindow, GameOfLife, Pos2};

const ALIVE_GLYPH: &str = "\u{2588}";
const DEAD_GLYPH: &str = " ";

pub enum ConsoleCommand {
    Exit,
    Handled,
}

/// Queues one draw command per changed cell that falls inside the window
///
/// Draws go to an in-memory buffer, the first error is kept for the caller.
struct DeltaPainter<'a> {
    window: &'a GameEngineWindow,
    buffer: Vec<u8>,
    error: Option<io::Error>,
}
impl<'a> DeltaPainter<'a> {
    fn new(window: &'a GameEngineWindow) -> Self {
        Self {
            window,
            buffer: Vec::new(),
            error: None,
        }
    }

    fn finish(self) -> io::Result<Vec<u8>> {
        match self.error {
            Some(err) => Err(err),
            None => Ok(self.buffer),
        }
    }
}
impl ChangeListener for DeltaPainter<'_> {
    fn on_change(&mut self, x: i32, y: i32, alive: bool) {
        if self.error.is_some() {
            return;
        }
        let Some(cell) = self.window.project(x, y) else {
            return;
        };
        let glyph = if alive { ALIVE_GLYPH } else { DEAD_GLYPH };
        if let Err(err) = queue!(
            self.buffer,
            cursor::MoveTo(cell.x as u16, cell.y as u16),
            style::Print(glyph)
        ) {
            self.error = Some(err);
        }
    }
}

pub struct ConsoleRender {
    window: GameEngineWindow,
    report: String,
    needs_redraw: bool,
}
impl ConsoleRender {
    pub fn new(game: &GameOfLife) -> io::Result<Self> {
        let (cols, rows) = terminal::size()?;
        terminal::enable_raw_mode()?;
        execute!(io::stdout(), cursor::Hide)?;
        Ok(Self {
            window: Self::window_for(game, Pos2::zero(), cols, rows),
            report: String::new(),
            needs_redraw: true,
        })
    }

    fn window_for(game: &GameOfLife, top_left: Pos2, cols: u16, rows: u16) -> GameEngineWindow {
        // the last row holds the report footer
        let rows = rows.saturating_sub(1);
        GameEngineWindow::new(game.torus(), top_left, usize::from(cols), usize::from(rows))
    }

    /// Draws the current generation from scratch
    fn redraw(&mut self, game: &GameOfLife) -> io::Result<()> {
        let mut stdout = io::stdout();
        queue!(stdout, terminal::Clear(terminal::ClearType::All))?;
        for cell in self.window.iter(game) {
            queue!(
                stdout,
                cursor::MoveTo(cell.x as u16, cell.y as u16),
                style::Print(ALIVE_GLYPH)
            )?;
        }
        self.needs_redraw = false;
        self.write_footer(&mut stdout)?;
        stdout.flush()
    }

    fn write_footer<W: Write>(&self, out: &mut W) -> io::Result<()> {
        let (_, rows) = terminal::size()?;
        queue!(
            out,
            cursor::MoveTo(0, rows.saturating_sub(1)),
            terminal::Clear(terminal::ClearType::CurrentLine),
            style::Print(&self.report)
        )
    }

    /// Brings the screen up to date with `game` without stepping it
    pub fn render(&mut self, game: &GameOfLife) -> io::Result<()> {
        if self.needs_redraw {
            return self.redraw(game);
        }
        let mut stdout = io::stdout();
        self.write_footer(&mut stdout)?;
        stdout.flush()
    }

    /// Advances `game` one generation, drawing only the cells that changed
    ///
    /// Returns whether any cell changed.
    pub fn step(&mut self, game: &mut GameOfLife) -> io::Result<bool> {
        if self.needs_redraw {
            self.redraw(game)?;
        }

        let mut painter = DeltaPainter::new(&self.window);
        let changed = game.next_generation_with(&mut painter);
        let buffer = painter.finish()?;

        let mut stdout = io::stdout();
        stdout.write_all(&buffer)?;
        self.write_footer(&mut stdout)?;
        stdout.flush()?;
        Ok(changed)
    }

    pub fn poll_events(&mut self, game: &GameOfLife) -> io::Result<Option<ConsoleCommand>> {
        // make sure an event is present for us to take
        if !event::poll(std::time::Duration::from_secs(0))? {
            return Ok(None);
        }

        let scroll = match event::read()? {
            Event::Key(KeyEvent {
                code: KeyCode::Char('c'),
                modifiers: KeyModifiers::CONTROL,
                ..
            })
            | Event::Key(KeyEvent {
                code: KeyCode::Char('q'),
                ..
            }) => return Ok(Some(ConsoleCommand::Exit)),
            Event::Key(KeyEvent { code, .. }) => match code {
                KeyCode::Up => Pos2::new(0, -1),
                KeyCode::Down => Pos2::new(0, 1),
                KeyCode::Left => Pos2::new(-1, 0),
                KeyCode::Right => Pos2::new(1, 0),
                _ => return Ok(Some(ConsoleCommand::Handled)),
            },
            Event::Resize(cols, rows) => {
                self.window = Self::window_for(game, self.window.top_left(), cols, rows);
                self.needs_redraw = true;
                return Ok(Some(ConsoleCommand::Handled));
            }
            _ => return Ok(Some(ConsoleCommand::Handled)),
        };

        self.window.scroll(scroll);
        self.needs_redraw = true;
        Ok(Some(ConsoleCommand::Handled))
    }

    pub fn set_report(&mut self, report: String) {
        self.report = report;
    }
}
impl Drop for ConsoleRender {
    fn drop(&mut self) {
        // best effort, the process is exiting either way
        let _ = terminal::disable_raw_mode();
        let _ = execute!(
            io::stdout(),
            terminal::Clear(terminal::ClearType::All),
            cursor::MoveTo(0, 0),
            cursor::Show
        );
    }
}

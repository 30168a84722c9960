use anyhow::{Context, Result, bail};
use std::{path::PathBuf, time::Duration};
use toruslife::{GameOfLife, Pos2};

const HEADLESS_SIZE: (usize, usize) = (200, 200);
const CONSOLE_SLEEP: Duration = Duration::from_millis(100);

pub struct Args {
    matches: getopts::Matches,
}

impl Args {
    fn new<T: AsRef<str>>(args: &[T]) -> Result<Option<Self>> {
        let mut opts = getopts::Options::new();
        opts.optflag("", "help", "print this help menu");
        opts.optflag("c", "console", "run in console mode");
        opts.optopt("i", "input", "seed from a .cells or .rle pattern file", "FILE");
        opts.optopt("", "at", "where to place the input pattern", "X,Y");
        opts.optopt("w", "width", "set grid width", "WIDTH");
        opts.optopt("h", "height", "set grid height", "HEIGHT");
        opts.optopt("f", "fill", "random, alternating, all or empty", "TYPE");
        opts.optopt(
            "s",
            "sleep",
            "the amount of time to sleep between generations",
            "MILLIS",
        );
        opts.optopt("g", "gens", "max number of generations", "COUNT");
        opts.optopt("", "stats", "write stats csv to file", "FILE");

        let matches = opts.parse(args.iter().map(T::as_ref))?;
        if matches.opt_present("help") {
            println!("{}", opts.usage("usage: toruslife [options]"));
            return Ok(None);
        }

        let args = Self { matches };
        // surface malformed values before anything touches the terminal
        args.dimension("width")?;
        args.dimension("height")?;
        args.fill_mode()?;
        args.origin()?;
        args.sleep()?;
        args.generations()?;
        Ok(Some(args))
    }
    pub fn from_env() -> Result<Option<Self>> {
        let env = std::env::args().collect::<Vec<_>>();
        Self::new(&env[1..])
    }

    fn dimension(&self, name: &str) -> Result<Option<usize>> {
        let value: Option<usize> = self
            .matches
            .opt_get(name)
            .with_context(|| format!("invalid --{name}"))?;
        if value == Some(0) {
            bail!("--{name} must be positive");
        }
        Ok(value)
    }

    pub fn console(&self) -> bool {
        self.matches.opt_present("console")
    }

    /// `None` runs until the grid reaches a fixed point
    pub fn generations(&self) -> Result<Option<u64>> {
        self.matches.opt_get("gens").context("invalid --gens")
    }
    pub fn sleep(&self) -> Result<Option<Duration>> {
        let millis: Option<u64> = self.matches.opt_get("sleep").context("invalid --sleep")?;
        Ok(match millis {
            Some(millis) => Some(Duration::from_millis(millis)),
            None if self.console() => Some(CONSOLE_SLEEP),
            None => None,
        })
    }

    pub fn grid_size(&self) -> Result<(usize, usize)> {
        let default = if self.console() {
            let (cols, rows) = crossterm::terminal::size().context("query terminal size")?;
            // the last row holds the report footer
            (usize::from(cols).max(1), usize::from(rows.saturating_sub(1)).max(1))
        } else {
            HEADLESS_SIZE
        };

        Ok((
            self.dimension("width")?.unwrap_or(default.0),
            self.dimension("height")?.unwrap_or(default.1),
        ))
    }
    pub fn fill_mode(&self) -> Result<FillMode> {
        let mode_str = self.matches.opt_str("fill");
        let mode_str = mode_str.as_deref().unwrap_or("random");
        FillMode::new(mode_str).with_context(|| format!("unknown fill mode {mode_str:?}"))
    }

    pub fn input_file(&self) -> Option<PathBuf> {
        self.matches.opt_str("input").map(PathBuf::from)
    }
    pub fn origin(&self) -> Result<Pos2> {
        let Some(at) = self.matches.opt_str("at") else {
            return Ok(Pos2::zero());
        };
        let parsed = at
            .split_once(',')
            .and_then(|(x, y)| Some(Pos2::new(x.trim().parse().ok()?, y.trim().parse().ok()?)));
        parsed.with_context(|| format!("invalid --at {at:?}, expected X,Y"))
    }

    pub fn stats_file(&self) -> Option<PathBuf> {
        self.matches.opt_str("stats").map(PathBuf::from)
    }
}

#[derive(Debug)]
pub enum FillMode {
    Random,
    Alternating,
    All,
    Empty,
}
impl FillMode {
    fn new<S: AsRef<str>>(s: S) -> Option<Self> {
        match s.as_ref() {
            "random" => Some(Self::Random),
            "alternating" => Some(Self::Alternating),
            "all" => Some(Self::All),
            "empty" => Some(Self::Empty),
            _ => None,
        }
    }

    fn fill_cell<R: rand::Rng>(&self, cell: Pos2, rng: &mut R) -> bool {
        match self {
            Self::Random => rng.random_bool(0.5),
            Self::Alternating => (cell.x + cell.y) % 2 == 0,
            Self::All => true,
            Self::Empty => false,
        }
    }
    pub fn fill(&self, game: &mut GameOfLife) {
        if matches!(self, Self::Empty) {
            return;
        }

        let mut rng = rand::rng();
        for y in 0..game.height() as i32 {
            for x in 0..game.width() as i32 {
                if self.fill_cell(Pos2::new(x, y), &mut rng) {
                    game.set_xy(x, y, true);
                }
            }
        }
    }
}

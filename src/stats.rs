use anyhow::Context;
use std::{
    io::{self, Write},
    path::Path,
    time::{Duration, Instant},
};

const REPORT_INTERVAL: Duration = Duration::from_millis(500);

/// One CSV row: microseconds spent on the generation and the population after it
#[derive(Debug, Clone, Copy)]
struct Sample {
    micros: u128,
    alive: usize,
}

/// Tracks how fast generations are computed
///
/// A report summarises the throughput since the previous one. When created
/// with [`Throughput::with_samples`] every generation is also kept for
/// [`Throughput::save`].
pub struct Throughput {
    gens: u64,
    alive: usize,
    since_report: u64,
    last_report: Instant,
    last_gen: Instant,
    samples: Option<Vec<Sample>>,
}

impl Throughput {
    pub fn new(alive: usize) -> Self {
        let now = Instant::now();
        Self {
            gens: 0,
            alive,
            since_report: 0,
            last_report: now,
            last_gen: now,
            samples: None,
        }
    }

    pub fn with_samples(alive: usize) -> Self {
        Self {
            samples: Some(Vec::new()),
            ..Self::new(alive)
        }
    }

    #[inline]
    pub fn gens(&self) -> u64 {
        self.gens
    }

    pub fn record(&mut self, alive: usize) {
        self.gens += 1;
        self.since_report += 1;
        self.alive = alive;

        if let Some(samples) = &mut self.samples {
            samples.push(Sample {
                micros: self.last_gen.elapsed().as_micros(),
                alive,
            });
        }
        self.last_gen = Instant::now();
    }

    pub fn report_due(&self) -> bool {
        self.last_report.elapsed() >= REPORT_INTERVAL
    }

    /// Formats the throughput since the last report and starts a new interval
    pub fn report(&mut self) -> String {
        let secs = self.last_report.elapsed().as_secs_f64();
        let rate = self.since_report as f64 / secs;
        self.last_report = Instant::now();
        self.since_report = 0;

        format!("{rate:.02}gen/s gens:{}, alive:{}", self.gens, self.alive)
    }

    fn write_csv<W: Write>(samples: &[Sample], mut out: W) -> io::Result<()> {
        writeln!(out, "gen,delta_t,alive")?;
        for (gen_no, sample) in (1..).zip(samples) {
            writeln!(out, "{gen_no},{},{}", sample.micros, sample.alive)?;
        }
        out.flush()
    }

    /// Writes the per-generation samples as CSV
    pub fn save<P: AsRef<Path>>(&self, path: P) -> anyhow::Result<()> {
        let path = path.as_ref();
        let samples = self
            .samples
            .as_deref()
            .context("statistics were not recorded per generation")?;
        let file = std::fs::File::create(path)
            .with_context(|| format!("create stats file {}", path.display()))?;
        Self::write_csv(samples, io::BufWriter::new(file))
            .with_context(|| format!("write stats to {}", path.display()))
    }
}

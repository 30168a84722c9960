use anyhow::{Context, Result};
use std::thread;
use toruslife::{GameOfLife, pattern};

mod console;
mod options;
mod stats;

use stats::Throughput;

fn seed(args: &options::Args) -> Result<GameOfLife> {
    let (width, height) = args.grid_size()?;
    let mut game = GameOfLife::new(width, height);

    if let Some(path) = args.input_file() {
        let text = std::fs::read_to_string(&path)
            .with_context(|| format!("read pattern {}", path.display()))?;
        let cells = pattern::decoder_for_path(&path)
            .decode(&text)
            .with_context(|| format!("decode pattern {}", path.display()))?;
        game.place(args.origin()?, cells);
    } else {
        args.fill_mode()?.fill(&mut game);
    }
    Ok(game)
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let Some(args) = options::Args::from_env()? else {
        return Ok(());
    };

    let mut game = seed(&args)?;
    log::info!(
        "{}x{} grid, alive: {}",
        game.width(),
        game.height(),
        game.alive_count()
    );

    let mut console = if args.console() {
        Some(console::ConsoleRender::new(&game).context("set up terminal")?)
    } else {
        None
    };
    let sleep = args.sleep()?;
    let generations = args.generations()?;

    let mut stats = if args.stats_file().is_some() {
        Throughput::with_samples(game.alive_count())
    } else {
        Throughput::new(game.alive_count())
    };
    let mut fixed_point = false;
    'generations: while generations.is_none_or(|max| stats.gens() < max) {
        // report every 500ms, in the footer when in console mode
        if stats.report_due() {
            let report = stats.report();
            match console {
                Some(ref mut console) => console.set_report(report),
                None => log::info!("{report}"),
            }
        }

        let changed = match console {
            Some(ref mut console) => {
                while let Some(cmd) = console.poll_events(&game)? {
                    if let console::ConsoleCommand::Exit = cmd {
                        break 'generations;
                    }
                }
                console.render(&game)?;
                console.step(&mut game)?
            }
            None => game.next_generation(),
        };
        stats.record(game.alive_count());
        if !changed {
            fixed_point = true;
            break;
        }

        if let Some(time) = sleep {
            thread::sleep(time);
        }
    }
    drop(console);

    log::info!(
        "stopped after {} generations{}, alive: {}",
        stats.gens(),
        if fixed_point { " at a fixed point" } else { "" },
        game.alive_count()
    );
    if let Some(path) = args.stats_file() {
        stats.save(path)?;
    }

    Ok(())
}

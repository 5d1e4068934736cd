use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use tracing::{debug, info, warn};

use dazzler::config::PlayConfig;
use dazzler::model::{Chart, ChartError, Song};
use dazzler::play::{Autoplay, OutcomeKind, ScoreSnapshot, Session, Tier};
use dazzler::traits::{FrameTimer, SystemTimeProvider};
use dazzler::util::{UserError, init_logging};

#[derive(Parser, Debug)]
#[command(name = "dazzler", about = "Rhythm game judgment and scoring core")]
struct Args {
    /// Show debug logs.
    #[arg(long, short, global = true)]
    verbose: bool,

    /// Also write logs to a daily file in this directory.
    #[arg(long, global = true)]
    log_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Play a song with autoplay input and print the final score.
    Simulate {
        /// Song JSON file.
        song: PathBuf,

        /// Simulated frame rate.
        #[arg(long, default_value_t = 60)]
        fps: u32,

        /// Shift every autoplay edge by this many beats (negative is early).
        #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
        bias: f64,

        /// Play config JSON file. Defaults to dazzler.json if present.
        #[arg(long)]
        config: Option<PathBuf>,

        /// Pace frames with the wall clock instead of running flat out.
        #[arg(long)]
        realtime: bool,

        /// Print the score as JSON.
        #[arg(long)]
        json: bool,
    },
    /// Validate a song file and print a summary of its chart.
    Check {
        /// Song JSON file.
        song: PathBuf,
    },
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.log_dir.as_deref(), args.verbose)?;

    match args.command {
        Command::Simulate {
            song,
            fps,
            bias,
            config,
            realtime,
            json,
        } => simulate(&song, fps, bias, config.as_deref(), realtime, json),
        Command::Check { song } => check(&song),
    }
}

fn load_song(path: &Path) -> Result<(Song, Chart)> {
    let song = Song::load(path).map_err(|e| match e {
        ChartError::FileRead { .. } => {
            anyhow::Error::new(e).context(UserError::song_not_found(path))
        }
        other => anyhow::Error::new(other),
    })?;
    let chart = song.chart().with_context(|| UserError::invalid_chart(path))?;
    info!(
        title = %song.title,
        artist = %song.artist,
        bpm = song.bpm,
        notes = chart.len(),
        "loaded song"
    );
    Ok((song, chart))
}

fn check(path: &Path) -> Result<()> {
    let (song, chart) = load_song(path)?;
    if !(song.bpm.is_finite() && song.bpm > 0.0) {
        bail!(UserError::invalid_tempo(song.bpm));
    }

    println!("{} - {}", song.title, song.artist);
    println!("  bpm:      {}", song.bpm);
    println!("  offset:   {}s", song.offset);
    println!(
        "  notes:    {} ({} holds)",
        chart.len(),
        chart.hold_count()
    );
    println!("  last beat: {}", chart.last_end_beat());
    Ok(())
}

fn simulate(
    path: &Path,
    fps: u32,
    bias: f64,
    config_path: Option<&Path>,
    realtime: bool,
    json: bool,
) -> Result<()> {
    if fps == 0 {
        bail!("--fps must be at least 1");
    }

    let (song, chart) = load_song(path)?;
    let config = match config_path {
        Some(p) => PlayConfig::load_from(p).with_context(|| UserError::config_error(p))?,
        None => PlayConfig::load()?,
    };

    let mut autoplay = Autoplay::new(&chart, bias);
    // Nothing stays pending or held past this beat with autoplay input
    let last_beat = chart.last_end_beat() + config.hit_window + bias.abs() + 1.0;

    let mut session = Session::new(chart, config)?;
    session
        .start(song.bpm, song.offset)
        .with_context(|| UserError::invalid_tempo(song.bpm))?;

    let step = 1.0 / f64::from(fps);
    let mut timer = FrameTimer::new(SystemTimeProvider::new());
    let mut frames = 0u64;

    while !session.is_finished() && session.current_beat() <= last_beat {
        let delta = if realtime {
            std::thread::sleep(Duration::from_secs_f64(step));
            timer.tick()
        } else {
            step
        };

        let next_beat = session.current_beat() + delta / session.clock().crotchet();
        let edges = autoplay.poll(next_beat);
        let report = session.frame(delta, &edges);
        frames += 1;

        for outcome in &report.outcomes {
            match outcome.kind {
                OutcomeKind::EmptyPress => {
                    debug!(key = %outcome.key, beat = report.beat, "empty press");
                }
                kind => debug!(
                    ?kind,
                    key = %outcome.key,
                    note = outcome.note,
                    tier = outcome.tier.map(Tier::label),
                    beat = report.beat,
                    "judged"
                ),
            }
        }
    }

    if !session.is_finished() {
        warn!(beat = session.current_beat(), "stopped before every note was resolved");
    }
    session.stop();
    info!(frames, "simulation finished");

    let snapshot = session.snapshot();
    if json {
        println!("{}", serde_json::to_string_pretty(&snapshot)?);
    } else {
        print_summary(&song, &snapshot);
    }
    Ok(())
}

fn print_summary(song: &Song, s: &ScoreSnapshot) {
    println!("{} - {}", song.title, song.artist);
    println!("  score:     {} / {}", s.total_score, s.max_possible_score);
    println!("  stars:     {}", s.star_rating);
    println!(
        "  excellent: {}  great: {}  good: {}  bad: {}",
        s.excellent, s.great, s.good, s.bad
    );
    println!("  max combo: {}", s.max_combo);
    println!("  early: {}  late: {}", s.early, s.late);
}

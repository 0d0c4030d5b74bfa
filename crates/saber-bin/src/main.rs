// sabercut: plays a note chart against recorded hand tracking or autoplay
// and reports the run result.

mod session;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Result, bail};
use clap::Parser;
use saber_config::Config;
use saber_model::{BeatmapDecoder, Chart, ChartDecoder};
use saber_replay::TrackingLog;
use saber_rule::{AutoPlayer, Engine, PlayResult};

use session::HandInput;

#[derive(Parser, Debug)]
#[command(name = "sabercut", about = "Motion-controlled rhythm game judge")]
struct Args {
    /// Path to the chart file.
    #[arg(long)]
    chart: PathBuf,

    /// Read the chart as a legacy beat map at this BPM.
    #[arg(long)]
    bpm: Option<f32>,

    /// Hand tracking log to play (JSON, `.gz` for gzip).
    #[arg(long, conflicts_with = "autoplay", required_unless_present = "autoplay")]
    tracking: Option<PathBuf>,

    /// Let the autoplayer cut every note.
    #[arg(long)]
    autoplay: bool,

    /// Autoplay swing speed in units per second.
    #[arg(long, default_value_t = 4.0)]
    cut_speed: f32,

    /// Path to config JSON file.
    #[arg(long, default_value = "config.json", env = "SABERCUT_CONFIG")]
    config: PathBuf,

    /// Override the configured tick rate (Hz).
    #[arg(long)]
    tick_rate: Option<u32>,

    /// Write the run record to this path.
    #[arg(long)]
    output: Option<PathBuf>,

    /// Write the hand snapshots fed to the engine to this path.
    #[arg(long)]
    record_tracking: Option<PathBuf>,

    /// Print the result as JSON instead of a summary.
    #[arg(long)]
    json: bool,
}

fn load_chart(path: &Path, bpm: Option<f32>) -> Result<Chart> {
    match bpm {
        Some(bpm) => BeatmapDecoder::decode(path, bpm),
        None => ChartDecoder::decode(path),
    }
}

fn print_summary(title: &str, result: &PlayResult) {
    println!("{title}");
    println!("  outcome   : {:?}", result.outcome);
    println!("  score     : {}", result.score);
    println!("  max combo : {}", result.max_combo);
    println!(
        "  good/bad/miss : {}/{}/{} of {}",
        result.good, result.bad, result.miss, result.total_notes
    );
    println!("  accuracy  : {:.2}%", result.accuracy() * 100.0);
    println!("  health    : {}", result.health);
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();

    let mut config = Config::read_or_default(&args.config)?;
    if let Some(tick_rate) = args.tick_rate {
        config.tick_rate = tick_rate;
        config.validate();
    }

    let chart = load_chart(&args.chart, args.bpm)?;
    log::info!(
        "loaded chart {:?}: {} notes, {:.2}s",
        chart.title(),
        chart.len(),
        chart.duration()
    );

    let input = match (&args.tracking, args.autoplay) {
        (Some(path), _) => {
            let tracking = TrackingLog::read(path)?;
            log::info!("loaded {} tracking frames", tracking.frames.len());
            HandInput::Tracking(tracking)
        }
        (None, true) => HandInput::Autoplay(AutoPlayer::new(args.cut_speed)),
        (None, false) => bail!("either --tracking or --autoplay is required"),
    };

    let mut engine = Engine::new(Arc::new(chart), config.rule_set());
    let out = session::run(&mut engine, &input, config.tick_rate);

    if let Some(path) = &args.output {
        out.record.write(path)?;
        log::info!("run record written to {}", path.display());
    }
    if let Some(path) = &args.record_tracking {
        out.tracking.write(path)?;
        log::info!("tracking log written to {}", path.display());
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&out.record.result)?);
    } else {
        print_summary(&out.record.chart_title, &out.record.result);
    }
    Ok(())
}

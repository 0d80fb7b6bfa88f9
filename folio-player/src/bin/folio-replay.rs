//! Replays a scripted sequence of host events against one carousel on a
//! virtual clock and prints every frame and ambient highlight as JSON lines.
//!
//! Script format, one JSON object per line (blank lines and `#` comments are
//! skipped):
//!
//! ```text
//! {"at_ms": 0,   "event": {"target": "ambient", "message": {"type": "visibility_changed", "visible": true}}}
//! {"at_ms": 120, "event": {"target": "carousel", "message": {"type": "next"}}}
//! ```

use std::fs;
use std::io::{self, BufRead, BufReader, Write};
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::Parser;
use env_logger::{Builder, Target};
use folio_config::FolioConfig;
use folio_core::{AmbientScheduler, AmbientStep, Carousel, RenderFrame};
use folio_player::{
    CarouselHost, Clock, HostEvent, ManualClock, RecordingSink, SinkEvent,
};
use log::LevelFilter;
use serde::{Deserialize, Serialize};

#[derive(Parser, Debug)]
#[command(name = "folio-replay")]
#[command(about = "Replay carousel input scripts on a virtual clock")]
struct Cli {
    /// Script of timed host events; `-` reads stdin
    script: PathBuf,

    /// Config file (defaults to FOLIO_CONFIG_PATH / FOLIO_CONFIG_JSON / ./folio.toml)
    #[arg(long, env = "FOLIO_CONFIG_PATH")]
    config: Option<PathBuf>,

    /// Seed for the ambient shuffle
    #[arg(long, default_value_t = 0)]
    seed: u64,

    /// Number of items in the carousel
    #[arg(long, default_value_t = 12)]
    items: usize,

    /// Comma-separated sub-item counts, one per item, for ambient rotation
    #[arg(long, value_delimiter = ',')]
    sub_counts: Vec<usize>,

    /// Keep the clock running this long after the last scripted event (ms)
    #[arg(long, default_value_t = 0)]
    run_for: u64,
}

#[derive(Debug, Deserialize)]
struct ScriptLine {
    at_ms: u64,
    event: HostEvent,
}

#[derive(Debug, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
enum Output<'a> {
    Frame { at_ms: u64, frame: &'a RenderFrame },
    Highlight { at_ms: u64, step: &'a AmbientStep },
}

fn init_logger() {
    Builder::new()
        .target(Target::Stderr)
        .filter_level(LevelFilter::Warn)
        .filter_module("folio_player", LevelFilter::Info)
        .init();
}

fn main() -> anyhow::Result<()> {
    if std::env::var("RUST_LOG").is_err() {
        init_logger();
    } else {
        env_logger::init();
    }

    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => {
            let config = FolioConfig::load_from_file(path)?;
            config.validate()?;
            config
        }
        None => FolioConfig::load_from_env()?.0,
    };

    let script = read_script(&cli.script)?;
    log::info!("Replaying {} scripted events", script.len());

    let carousel = Carousel::new(cli.items, &config.carousel)?;
    let sub_counts = if cli.sub_counts.is_empty() {
        vec![1; cli.items]
    } else {
        cli.sub_counts.clone()
    };
    let ambient =
        AmbientScheduler::with_seed(sub_counts, &config.ambient, cli.seed);

    let clock = ManualClock::new();
    let sink = RecordingSink::new();
    let mut host = CarouselHost::new(carousel, ambient, sink.clone(), clock.clone());

    let stdout = io::stdout();
    let mut out = stdout.lock();

    host.mount();
    flush(&sink, clock.now_ms(), &mut out)?;

    let mut end_ms = 0;
    for line in script {
        run_until(&mut host, &clock, &sink, line.at_ms, &mut out)?;
        host.dispatch(line.event);
        flush(&sink, clock.now_ms(), &mut out)?;
        end_ms = end_ms.max(line.at_ms);
    }

    run_until(&mut host, &clock, &sink, end_ms + cli.run_for, &mut out)?;
    host.unmount();
    flush(&sink, clock.now_ms(), &mut out)?;
    Ok(())
}

/// Step the clock deadline by deadline so each timer sees its own time.
fn run_until(
    host: &mut CarouselHost<RecordingSink, ManualClock>,
    clock: &ManualClock,
    sink: &RecordingSink,
    target_ms: u64,
    out: &mut impl Write,
) -> anyhow::Result<()> {
    while let Some(deadline) = host.next_deadline() {
        if deadline > target_ms {
            break;
        }
        clock.set(deadline);
        host.advance();
        flush(sink, deadline, out)?;
    }
    clock.set(target_ms);
    Ok(())
}

fn flush(
    sink: &RecordingSink,
    at_ms: u64,
    out: &mut impl Write,
) -> anyhow::Result<()> {
    for event in sink.take() {
        let line = match &event {
            SinkEvent::Frame(frame) => {
                serde_json::to_string(&Output::Frame { at_ms, frame })?
            }
            SinkEvent::Highlight(step) => {
                serde_json::to_string(&Output::Highlight { at_ms, step })?
            }
        };
        writeln!(out, "{line}")?;
    }
    Ok(())
}

fn read_script(path: &Path) -> anyhow::Result<Vec<ScriptLine>> {
    let reader: Box<dyn BufRead> = if path.as_os_str() == "-" {
        Box::new(BufReader::new(io::stdin()))
    } else {
        let file = fs::File::open(path)
            .with_context(|| format!("failed to open script {}", path.display()))?;
        Box::new(BufReader::new(file))
    };

    let mut lines = Vec::new();
    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        let parsed: ScriptLine = serde_json::from_str(trimmed)
            .with_context(|| format!("script line {}", index + 1))?;
        lines.push(parsed);
    }
    // Events at the same instant keep their script order.
    lines.sort_by_key(|line| line.at_ms);
    Ok(lines)
}

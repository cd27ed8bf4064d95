use std::{env, fs, fs::File, io::Write};

use anyhow::{Context, Result, bail};
use log::{error, info};
use simplelog::{LevelFilter, WriteLogger};

use toc_sidebar::TocConfig;
use toc_sidebar::panic_handler;
use toc_sidebar::prerender::prerender;
use toc_sidebar::storage::FileStore;

const USAGE: &str = "Usage: toc-sidebar <input.html> [--output <file>] [--state <state.json>] \
                     [--config <config.json>] [--width <px>] [--toggle]";

struct Args {
    input: String,
    output: Option<String>,
    state: Option<String>,
    config: Option<String>,
    width: f64,
    toggle: bool,
}

fn parse_args(raw: &[String]) -> Result<Args> {
    let mut input = None;
    let mut output = None;
    let mut state = None;
    let mut config = None;
    let mut width = 1280.0;
    let mut toggle = false;

    let mut iter = raw.iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--output" | "-o" => output = Some(iter.next().context(USAGE)?.clone()),
            "--state" => state = Some(iter.next().context(USAGE)?.clone()),
            "--config" => config = Some(iter.next().context(USAGE)?.clone()),
            "--width" => {
                let value = iter.next().context(USAGE)?;
                width = value
                    .parse()
                    .with_context(|| format!("Invalid --width value: {value}"))?;
            }
            "--toggle" => toggle = true,
            "--help" | "-h" => bail!(USAGE),
            other if other.starts_with('-') => bail!("Unknown option {other}\n{USAGE}"),
            other => {
                if input.replace(other.to_string()).is_some() {
                    bail!("Only one input file is supported\n{USAGE}");
                }
            }
        }
    }

    Ok(Args {
        input: input.context(USAGE)?,
        output,
        state,
        config,
        width,
        toggle,
    })
}

fn main() -> Result<()> {
    // Initialize logging with html5ever DEBUG logs filtered out
    WriteLogger::init(
        LevelFilter::Debug,
        simplelog::ConfigBuilder::new()
            .set_max_level(LevelFilter::Debug)
            .add_filter_ignore_str("html5ever")
            .build(),
        File::create("toc-sidebar.log")?,
    )?;

    panic_handler::initialize_panic_handler();

    let raw: Vec<String> = env::args().skip(1).collect();
    let args = parse_args(&raw)?;

    info!("Prerendering TOC for {}", args.input);
    let result = run(&args);
    if let Err(err) = &result {
        error!("Prerender failed: {err:?}");
    }
    result
}

fn run(args: &Args) -> Result<()> {
    let html = fs::read_to_string(&args.input)
        .with_context(|| format!("Failed to read {}", args.input))?;
    let config = TocConfig::load_or_default(args.config.as_deref());
    let store = FileStore::load_or_ephemeral(args.state.as_deref());

    let report = prerender(&html, &config, store, args.width, args.toggle)?;

    match &args.output {
        Some(path) => fs::write(path, &report.html)
            .with_context(|| format!("Failed to write {path}"))?,
        None => std::io::stdout().write_all(report.html.as_bytes())?,
    }

    if !report.attached {
        eprintln!("No .{} element found; page left unchanged", config.container_class);
        return Ok(());
    }

    eprintln!(
        "TOC {}: {} link(s) repaired, {} unmatched",
        if report.collapsed { "collapsed" } else { "expanded" },
        report.repair.repaired.len(),
        report.repair.unmatched.len()
    );
    for label in &report.repair.unmatched {
        eprintln!("  unmatched: {label}");
    }

    info!("Prerender finished for {}", args.input);
    Ok(())
}

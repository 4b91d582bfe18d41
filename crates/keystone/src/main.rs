use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, ValueEnum};
use keystone::Simulator;
use keystone_core::model::{BankKind, MemoryModel, Model, ValueChanger};
use keystone_core::{ConfigManager, DisplayKind};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum DisplayArg {
    /// Push 1 character display
    Text,
    /// Push 2 graphic display
    Graphic,
}

impl From<DisplayArg> for DisplayKind {
    fn from(arg: DisplayArg) -> Self {
        match arg {
            DisplayArg::Text => DisplayKind::Text,
            DisplayArg::Graphic => DisplayKind::Graphic,
        }
    }
}

/// Simulate an Ableton Push against an in-memory host model.
#[derive(Parser, Debug)]
#[command(name = "keystone")]
#[command(about = "Keystone Push simulator")]
struct Args {
    /// Configuration file (defaults to the user config directory)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Script to run (reads standard input if not provided)
    #[arg(long)]
    script: Option<PathBuf>,

    /// Display to render, overrides the configuration
    #[arg(long, value_enum)]
    display: Option<DisplayArg>,

    /// Number of tracks in the model
    #[arg(long, default_value = "8")]
    tracks: usize,

    /// Number of device layers in the model
    #[arg(long, default_value = "4")]
    layers: usize,

    /// Treat the device layers as drum pads
    #[arg(long, default_value = "false")]
    drum_pads: bool,
}

fn main() -> Result<(), anyhow::Error> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let mut config = ConfigManager::new(args.config.clone());
    let mut settings = config
        .load()
        .with_context(|| format!("Failed to load {}", config.config_path().display()))?;
    if let Some(display) = args.display {
        settings.display = display.into();
    }
    log::info!("Using configuration {}", config.config_path().display());

    let value_changer = ValueChanger::new(settings.value_upper_bound, settings.knob_sensitivity);
    let mut model = MemoryModel::new(args.tracks, args.layers, value_changer);
    if args.drum_pads {
        model.layers_mut().set_kind(BankKind::DrumPads);
    }

    let mut simulator = Simulator::new(model, settings)?;

    let reader: Box<dyn BufRead> = match &args.script {
        Some(path) => Box::new(BufReader::new(
            File::open(path).with_context(|| format!("Failed to open {}", path.display()))?,
        )),
        None => Box::new(io::stdin().lock()),
    };

    for (number, line) in reader.lines().enumerate() {
        for output in simulator.run_line(number + 1, &line?) {
            println!("{}", output);
        }
    }

    Ok(())
}

use std::path::PathBuf;

use clap::Parser;
use eframe::{run_native, NativeOptions};
use explorer_app::{ExplorerApp, APP_NAME};
use kg_explorer::layouts::force_directed::{DEFAULT_ITERATIONS, DEFAULT_SEED};
use kg_explorer::{clamp_cap, ExplorerSettings, SettingsExtraction, CAP_DEFAULT, DEFAULT_DATA_PATH};

/// Explore relationships between clinical trials, drugs, conditions and
/// outcomes through an interactive knowledge graph.
#[derive(Parser, Debug)]
#[command(name = "kg-explorer", version, about)]
struct Args {
    /// Triplet table with source, relation and target columns
    #[arg(default_value = DEFAULT_DATA_PATH)]
    data: PathBuf,

    /// Initial maximum number of rows for a specific entity (20-500)
    #[arg(long, default_value_t = CAP_DEFAULT)]
    cap: usize,

    /// Seed of the force-directed layout
    #[arg(long, default_value_t = DEFAULT_SEED)]
    seed: u64,

    /// Force-directed layout iterations
    #[arg(long, default_value_t = DEFAULT_ITERATIONS)]
    iterations: usize,

    /// Seed for neighborhood sampling, random when omitted
    #[arg(long)]
    sample_seed: Option<u64>,
}

impl Args {
    fn into_settings(self) -> ExplorerSettings {
        let mut settings = ExplorerSettings::default();
        settings.data.path = self.data;
        settings.extraction = SettingsExtraction {
            sample_seed: self.sample_seed,
            ..Default::default()
        }
        .with_cap(self.cap);
        settings.layout.seed = self.seed;
        settings.layout.iterations = self.iterations;
        settings
    }
}

fn main() -> eframe::Result {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    if args.cap != clamp_cap(args.cap) {
        log::warn!("cap {} out of range, using {}", args.cap, clamp_cap(args.cap));
    }
    let settings = args.into_settings();
    log::info!("starting with data file {}", settings.data.path.display());

    let options = NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(APP_NAME)
            .with_inner_size([1280.0, 800.0]),
        ..Default::default()
    };
    run_native(
        APP_NAME,
        options,
        Box::new(|cc| Ok(Box::new(ExplorerApp::new(cc, settings)))),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_settings() {
        let settings = Args::parse_from(["kg-explorer"]).into_settings();
        assert_eq!(settings, ExplorerSettings::default());
    }

    #[test]
    fn overrides_are_applied() {
        let settings = Args::parse_from([
            "kg-explorer",
            "data.csv",
            "--cap",
            "1000",
            "--seed",
            "7",
            "--sample-seed",
            "3",
        ])
        .into_settings();
        assert_eq!(settings.data.path, PathBuf::from("data.csv"));
        assert_eq!(settings.extraction.cap, 500);
        assert_eq!(settings.extraction.sample_seed, Some(3));
        assert_eq!(settings.layout.seed, 7);
    }
}

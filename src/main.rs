use clap::Parser;
use navstack::core::config;
use simplelog::{ConfigBuilder, WriteLogger};
use std::fs::File;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "navstack", about = "Stack-based screen navigator")]
struct Args {
    /// Header title for screens without their own
    #[arg(short, long)]
    title: Option<String>,

    /// Config file to use instead of ~/.navstack/config.toml
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long)]
    log_level: Option<String>,
}

fn main() -> std::io::Result<()> {
    let args = Args::parse();
    dotenv::dotenv().ok();

    // The logger isn't up yet, so a bad config file is also reported on stderr
    let (file_config, load_result) = match config::load_config(args.config.as_deref()) {
        Ok((c, source)) => (c, Ok(source)),
        Err(e) => {
            eprintln!("navstack: {e}, using defaults");
            (config::NavstackConfig::default(), Err(e))
        }
    };
    let resolved = config::resolve(
        &file_config,
        args.title.as_deref(),
        args.log_level.as_deref(),
    );

    // Initialize file logger; the terminal belongs to the UI
    let log_config = ConfigBuilder::new()
        .set_time_format_rfc3339()
        .build();

    if let Ok(log_file) = File::create(&resolved.log_file) {
        let _ = WriteLogger::init(resolved.log_level, log_config, log_file);
    }

    match &load_result {
        Ok(source) => source.log(),
        Err(e) => log::warn!("{e}, using defaults"),
    }
    log::debug!("Config: {:?}", file_config);
    log::info!(
        "navstack starting with {} screen(s), title {:?}",
        resolved.screens.len(),
        resolved.title
    );

    navstack::tui::run(resolved)
}

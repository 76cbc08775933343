use clap::Parser;
use medchat::core::config::{CliOverrides, load_config, resolve};
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};
use std::fs::File;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "medchat", about = "Terminal chat client for a medical assistant backend")]
struct Args {
    /// Backend URL that receives the form POST
    #[arg(short, long)]
    endpoint: Option<String>,

    /// Start in dark mode
    #[arg(long)]
    dark: bool,

    /// Where to write the log
    #[arg(long, default_value = "medchat.log")]
    log_file: PathBuf,

    /// Log at debug level
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> std::io::Result<()> {
    let args = Args::parse();
    dotenv::dotenv().ok();

    let log_config = ConfigBuilder::new().set_time_format_rfc3339().build();
    let level = if args.verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    if let Ok(log_file) = File::create(&args.log_file) {
        let _ = WriteLogger::init(level, log_config, log_file);
    }

    let file_config = load_config().map_err(|e| {
        log::error!("Config error: {}", e);
        std::io::Error::other(e)
    })?;
    let config = resolve(
        &file_config,
        &CliOverrides {
            endpoint: args.endpoint,
            dark: args.dark,
        },
    );

    log::info!(
        "medchat starting up (endpoint: {}, theme: {})",
        config.endpoint,
        config.theme.label()
    );

    medchat::tui::run(config)
}

use clap::Parser;
use log::LevelFilter;

use flower_capture::cli::{self, Args};
use flower_capture::config::Config;

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level));
    if verbose {
        builder.filter_module("flower_capture", LevelFilter::Debug);
    }
    builder.format_timestamp_millis().init();
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    // A missing .env is fine
    let _ = dotenv::dotenv();

    let args = Args::parse();
    init_logging(args.verbose);

    let config = match Config::load(args.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = cli::run(args, config).await {
        log::debug!("command failed: {:?}", e);
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

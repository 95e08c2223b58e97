use clap::Parser;
use mission_control::cli::Config;
use std::process;

#[tokio::main]
async fn main() {
    let config = Config::parse();
    env_logger::Builder::new()
        .filter_level(config.verbosity().log_level_filter())
        .init();
    let code = mission_control::cli::run(config).await;
    process::exit(code)
}

use clap::Parser;
use env_logger::Env;
use log::error;

use aucload::config::Config;
use aucload::runner;

fn main() {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let config = Config::parse();
    if let Err(error) = runner::run(&config) {
        error!("{error:#}");
        std::process::exit(1);
    }
}

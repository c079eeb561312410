use std::process::ExitCode;

use backend::cli::{self, Args};
use env_logger::Env;

fn main() -> ExitCode {
    env_logger::init_from_env(Env::default().default_filter_or("warn"));

    match Args::parse(std::env::args().skip(1)).and_then(|args| cli::run(&args)) {
        Ok(()) => {
            println!("{}", cli::DONE);
            ExitCode::SUCCESS
        }
        Err(e) => {
            println!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

use clap::Parser;

use cxscan::adapter::inbound::cli::{self, command::Cli, output};

fn main() {
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    if let Err(e) = cli::execute(&cli) {
        output::error(&e.to_string());
        std::process::exit(1);
    }
}

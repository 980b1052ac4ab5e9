use clap::Parser;

mod cli;
mod cmd;
mod error;
mod io;

use cli::{Cli, Command};

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Command::Generate { out, seed } => cmd::generate::run(&out, seed),
        Command::Bench { dir } => cmd::bench::run(&dir),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(e.exit_code());
    }
}

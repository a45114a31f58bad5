use clap::Parser;
use std::process;

mod cli;
mod config;
mod error;
mod listen;
mod port;
mod ready;
mod runner;
mod shell;
mod tokens;

use crate::config::DaemonConfig;
use crate::error::DaemonError;
use crate::shell::ShellStrategy;
use crate::tokens::CommandTable;

fn main() {
    let args = cli::Cli::parse();
    let code = match run(args.cmd) {
        Ok(()) => 0,
        Err(e) => {
            eprintln!("{e}");
            e.exit_code()
        }
    };
    process::exit(code);
}

fn run(cmd: cli::Cmd) -> Result<(), DaemonError> {
    match cmd {
        cli::Cmd::Listen(opts) => {
            let cfg = DaemonConfig::from_opts(opts);
            let table = CommandTable::flutter();
            let shell = ShellStrategy::detect();
            ready::verify(&cfg, &table, shell)?;
            listen::run(&cfg, &table, shell)
        }
        cli::Cmd::Ports => list_ports(),
    }
}

fn list_ports() -> Result<(), DaemonError> {
    let candidates = port::detect_candidates();
    if candidates.is_empty() {
        return Err(DaemonError::NoPorts);
    }
    let picked = port::select_port(None, &candidates);
    for c in &candidates {
        let mark = if picked.as_deref() == Some(c.device.as_str()) {
            "*"
        } else {
            " "
        };
        println!("{mark} {}  score={}  {}", c.device, port::score(c), c.description);
    }
    Ok(())
}

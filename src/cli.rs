use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug, Clone)]
#[command(
    name = "flutter-keys",
    about = "MCU button daemon: serial tokens -> flutter commands"
)]
pub struct Cli {
    #[command(subcommand)]
    pub cmd: Cmd,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Cmd {
    /// Listen for tokens and run the mapped flutter command
    Listen(ListenOpts),
    /// List attached serial ports with their auto-selection scores
    Ports,
}

#[derive(Args, Debug, Clone)]
pub struct ListenOpts {
    /// Flutter project directory (default: ~/dev/my_flutter_app)
    #[arg(long, env = "FLUTTER_KEYS_PROJECT")]
    pub project: Option<PathBuf>,
    /// Baud rate
    #[arg(long, env = "FLUTTER_KEYS_BAUD", default_value_t = 115_200)]
    pub baud: u32,
    /// Serial device path (empty = auto-select)
    #[arg(long, env = "FLUTTER_KEYS_PORT")]
    pub port: Option<String>,
}

use crate::commands::Commands;

use clap::Parser;

#[derive(Parser, Debug)]
#[clap(name = "profile-vault")]
#[clap(
    about = "Look up social profiles and keep a local vault of them",
    long_about = None
)]
pub struct Cli {
    #[clap(subcommand)]
    pub command: Commands,
}

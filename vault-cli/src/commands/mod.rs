use clap::Subcommand;

use crate::{AppError, Context};

mod delete;
mod export;
mod list;
mod platforms;
pub mod recent;
mod search;
mod show;

#[derive(Debug, Subcommand)]
pub enum Commands {
    Search(search::Search),
    List(list::List),
    Show(show::Show),
    Delete(delete::Delete),
    Clear(delete::Clear),
    Export(export::Export),
    Platforms(platforms::Platforms),
    #[command(about = "Manage recent searches")]
    Recent {
        #[clap(subcommand)]
        subcommand: Option<recent::Recent>,
    },
}

impl Commands {
    pub async fn run(&self, ctx: &Context) -> Result<(), AppError> {
        match self {
            Commands::Search(search) => search.run(ctx).await,
            Commands::List(list) => list.run(ctx),
            Commands::Show(show) => show.run(ctx),
            Commands::Delete(delete) => delete.run(ctx),
            Commands::Clear(clear) => clear.run(ctx),
            Commands::Export(export) => export.run(ctx),
            Commands::Platforms(platforms) => platforms.run(),
            Commands::Recent { subcommand } => match subcommand {
                Some(recent) => recent.run(ctx),
                None => recent::List {}.run(ctx),
            },
        }
    }
}

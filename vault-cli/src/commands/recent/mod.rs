use clap::Subcommand;

use crate::{AppError, Context};

/// Available commands for the `recent` subcommand
#[derive(Subcommand, Debug)]
pub enum Recent {
    List(List),
    Remove(Remove),
    Clear(Clear),
}

impl Recent {
    pub fn run(&self, ctx: &Context) -> Result<(), AppError> {
        match self {
            Recent::List(list) => list.run(ctx),
            Recent::Remove(remove) => remove.run(ctx),
            Recent::Clear(clear) => clear.run(ctx),
        }
    }
}

#[derive(Clone, Debug, clap::Args)]
#[clap(name = "list", about = "Show recent searches")]
pub struct List {}

impl List {
    pub fn run(&self, ctx: &Context) -> Result<(), AppError> {
        for query in ctx.recent.list()? {
            println!("{}", query);
        }
        Ok(())
    }
}

#[derive(Clone, Debug, clap::Args)]
#[clap(name = "remove", about = "Forget one recent search")]
pub struct Remove {
    query: String,
}

impl Remove {
    pub fn run(&self, ctx: &Context) -> Result<(), AppError> {
        ctx.recent.remove(&self.query)?;
        Ok(())
    }
}

#[derive(Clone, Debug, clap::Args)]
#[clap(name = "clear", about = "Forget all recent searches")]
pub struct Clear {}

impl Clear {
    pub fn run(&self, ctx: &Context) -> Result<(), AppError> {
        ctx.recent.clear()?;
        Ok(())
    }
}

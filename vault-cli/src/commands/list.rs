use crate::{AppError, Context};

#[derive(Clone, Debug, clap::Args)]
#[clap(name = "list", about = "List saved profiles, newest first")]
pub struct List {}

impl List {
    pub fn run(&self, ctx: &Context) -> Result<(), AppError> {
        let profiles = ctx.vault.list()?;
        if profiles.is_empty() {
            println!("No saved profiles yet");
            return Ok(());
        }
        for record in profiles {
            println!(
                "{}\t{}\t{}",
                record.id, record.platform, record.username
            );
        }
        Ok(())
    }
}

use profile_vault::{Platform, RecordKey};

use crate::{AppError, Context};

#[derive(Clone, Debug, clap::Args)]
#[clap(name = "delete", about = "Delete a saved profile")]
pub struct Delete {
    #[clap(
        long,
        conflicts_with_all = ["username", "platform"],
        help = "Id of the saved profile"
    )]
    id: Option<String>,
    #[clap(requires = "platform", help = "Saved username")]
    username: Option<String>,
    #[clap(help = "Platform the username was saved for")]
    platform: Option<Platform>,
}

impl Delete {
    fn key(&self) -> Result<RecordKey, AppError> {
        match (&self.id, &self.username, self.platform) {
            (Some(id), _, _) => Ok(RecordKey::Id(id.clone())),
            (None, Some(username), Some(platform)) => {
                Ok(RecordKey::profile(username.clone(), platform))
            }
            _ => Err(AppError::MissingRecordKey),
        }
    }

    pub fn run(&self, ctx: &Context) -> Result<(), AppError> {
        let key = self.key()?;
        if ctx.vault.delete(&key)? {
            println!("Deleted {}", key);
        } else {
            println!("Nothing saved for {}", key);
        }
        Ok(())
    }
}

#[derive(Clone, Debug, clap::Args)]
#[clap(name = "clear", about = "Delete every saved profile")]
pub struct Clear {}

impl Clear {
    pub fn run(&self, ctx: &Context) -> Result<(), AppError> {
        ctx.vault.clear()?;
        println!("Vault cleared");
        Ok(())
    }
}

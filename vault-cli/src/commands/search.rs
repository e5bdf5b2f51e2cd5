use profile_vault::{
    InputType, Platform, ProfileRecord, SaveOutcome, SearchQuery,
};

use crate::commands::show::print_record;
use crate::{AppError, Context};

#[derive(Clone, Debug, clap::Args)]
#[clap(name = "search", about = "Look up a profile on a platform")]
pub struct Search {
    #[clap(help = "Platform name, e.g. GitHub, Instagram, Twitter/X")]
    platform: Platform,
    #[clap(help = "Username, email, phone number or link")]
    input: String,
    #[clap(
        short = 't',
        long = "type",
        default_value = "username",
        help = "How to read the input: username, email, phone or link"
    )]
    input_type: InputType,
    #[clap(short, long, help = "Save the result to the vault")]
    save: bool,
    #[clap(long, help = "Skip the remote lookup")]
    offline: bool,
}

impl Search {
    pub async fn run(&self, ctx: &Context) -> Result<(), AppError> {
        let query =
            SearchQuery::new(&self.input, self.platform, self.input_type)?;
        ctx.recent.add(query.username())?;

        let record = if self.offline || !query.wants_lookup() {
            ProfileRecord::placeholder(&query)
        } else {
            println!(
                "Looking up {} on {}...",
                query.username(),
                query.platform()
            );
            ctx.factory()?.create(&query).await
        };

        print_record(&record);

        if self.save {
            match ctx.vault.save(record)? {
                SaveOutcome::Saved => println!("Profile saved!"),
                SaveOutcome::AlreadyExists => println!("Already saved!"),
            }
        }

        Ok(())
    }
}

use profile_vault::{ProfileRecord, RecordKey};

use crate::{AppError, Context};

#[derive(Clone, Debug, clap::Args)]
#[clap(name = "show", about = "Show a saved profile")]
pub struct Show {
    #[clap(help = "Id of the saved profile")]
    id: String,
}

impl Show {
    pub fn run(&self, ctx: &Context) -> Result<(), AppError> {
        let key = RecordKey::Id(self.id.clone());
        let record = ctx
            .vault
            .find(&key)?
            .ok_or_else(|| AppError::ProfileNotFound(key.to_string()))?;
        print_record(&record);
        Ok(())
    }
}

pub fn print_record(record: &ProfileRecord) {
    println!("@{} ({})", record.username, record.platform);
    println!("\tid:      {}", record.id);
    if let Some(name) = &record.display_name {
        println!("\tname:    {}", name);
    }
    println!("\tbio:     {}", record.bio);
    println!("\tstatus:  {}", record.followers_label());
    println!("\tdata:    {}", record.stats_label());
    if let Some(avatar) = &record.avatar {
        println!("\tavatar:  {}", avatar);
    }
    match record.outbound_link() {
        Ok(link) => println!("\tlink:    {}", link),
        Err(e) => log::warn!("no link for {}: {}", record.username, e),
    }
    println!("\tscanned: {}", record.scan_date);
}

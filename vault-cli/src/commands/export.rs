use std::path::PathBuf;

use profile_vault::{report, RecordKey};

use crate::{AppError, Context};

#[derive(Clone, Debug, clap::Args)]
#[clap(name = "export", about = "Export a saved profile as an HTML report")]
pub struct Export {
    #[clap(help = "Id of the saved profile")]
    id: String,
    #[clap(short, long, value_parser, help = "Where to write the report")]
    output: PathBuf,
}

impl Export {
    pub fn run(&self, ctx: &Context) -> Result<(), AppError> {
        let key = RecordKey::Id(self.id.clone());
        let record = ctx
            .vault
            .find(&key)?
            .ok_or_else(|| AppError::ProfileNotFound(key.to_string()))?;
        let html = report::render_html(&record)?;
        std::fs::write(&self.output, html)?;
        println!("Report written to {}", self.output.display());
        Ok(())
    }
}

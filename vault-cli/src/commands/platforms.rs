use profile_vault::Platform;

use crate::AppError;

#[derive(Clone, Debug, clap::Args)]
#[clap(name = "platforms", about = "List searchable platforms")]
pub struct Platforms {}

impl Platforms {
    pub fn run(&self) -> Result<(), AppError> {
        for platform in Platform::ALL.iter().filter(|p| !p.is_none()) {
            let lookup = if platform.supports_lookup() {
                " (lookup)"
            } else {
                ""
            };
            println!("{}{}", platform, lookup);
        }
        Ok(())
    }
}

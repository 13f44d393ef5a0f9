//! Team Quest · console front-end
//!
//! Runs one quest session in the terminal.
//!
//! Important env variables:
//!   QUEST_CONFIG_PATH : path to TOML settings (catalog, answer parsing)
//!   LOG_LEVEL         : tracing filter, e.g. "debug" or full directives
//!   LOG_FORMAT        : "pretty" (default) or "json"

mod console;
mod telemetry;

use team_quest::{SessionController, config::Settings};
use tracing::info;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    telemetry::init_tracing();

    let settings = Settings::from_env()?;
    let catalog = settings.catalog()?;
    info!(teams = catalog.list_teams().len(), parsing = ?settings.answer_parsing, "Quest ready");

    let mut session = SessionController::new(&catalog).with_parsing(settings.answer_parsing);
    console::run(&mut session, std::io::stdin().lock(), std::io::stdout().lock())?;
    Ok(())
}

use crate::cli::commands::open_controller;
use crate::config::Config;
use crate::errors::AppResult;
use crate::ui::messages::{info, success, warning};

use std::io::{self, Write};

/// Ask a yes/no confirmation from the user
fn ask_confirmation(prompt: &str) -> bool {
    warning(prompt);
    print!("Confirm [y/N]: ");
    let _ = io::stdout().flush();

    let mut s = String::new();
    if io::stdin().read_line(&mut s).is_ok() {
        matches!(s.trim().to_lowercase().as_str(), "y" | "yes")
    } else {
        false
    }
}

pub async fn handle(cfg: &Config, yes: bool) -> AppResult<()> {
    if cfg.confirm_clear
        && !yes
        && !ask_confirmation("Delete ALL recorded nights? This action is irreversible.")
    {
        info("Operation cancelled.");
        return Ok(());
    }

    let mut ctl = open_controller(cfg).await?;
    ctl.clear_all().await?;

    success("All nights have been deleted.");
    Ok(())
}

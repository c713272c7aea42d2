use crate::cli::commands::open_controller;
use crate::config::Config;
use crate::core::history::HistoryLogic;
use crate::errors::AppResult;
use crate::ui::messages::info;

pub async fn handle(cfg: &Config, limit: Option<usize>) -> AppResult<()> {
    let ctl = open_controller(cfg).await?;
    let nights = ctl.nights();

    if nights.is_empty() {
        info("No nights recorded yet.");
        return Ok(());
    }

    println!("🌙 Recorded nights:\n");
    print!(
        "{}",
        HistoryLogic::render(&nights, &cfg.date_format, limit.unwrap_or(cfg.list_limit))
    );

    Ok(())
}

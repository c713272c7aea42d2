use crate::cli::commands::open_controller;
use crate::config::Config;
use crate::core::history::HistoryLogic;
use crate::errors::AppResult;
use crate::ui::messages::{info, warning};

pub async fn handle(cfg: &Config) -> AppResult<()> {
    let ctl = open_controller(cfg).await?;
    let tonight = ctl.tonight();

    info(HistoryLogic::describe_tonight(
        tonight.as_ref(),
        &cfg.date_format,
    ));

    if tonight.is_none()
        && let Some(pending) = ctl.latest_unrated().await?
    {
        warning(format!(
            "Night #{} has not been rated yet (`sleeplog rate <0-5>`).",
            pending.id
        ));
    }

    Ok(())
}

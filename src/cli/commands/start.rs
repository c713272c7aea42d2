use crate::cli::commands::open_controller;
use crate::config::Config;
use crate::core::controller::SessionState;
use crate::errors::AppResult;
use crate::ui::messages::{info, success};
use crate::utils::time::format_millis;

pub async fn handle(cfg: &Config) -> AppResult<()> {
    let mut ctl = open_controller(cfg).await?;
    let was_open = matches!(ctl.state(), SessionState::Open(_));

    let tonight = ctl.start_tracking().await?;
    let since = format_millis(tonight.start_time_millis, &cfg.date_format);

    if was_open {
        info(format!(
            "Already tracking night #{} since {}.",
            tonight.id, since
        ));
    } else {
        success(format!("Started tracking night #{} at {}.", tonight.id, since));
    }

    Ok(())
}

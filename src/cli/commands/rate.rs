use crate::cli::commands::open_controller;
use crate::config::Config;
use crate::errors::{AppError, AppResult};
use crate::models::quality::describe_quality;
use crate::ui::messages::success;

pub async fn handle(cfg: &Config, quality: i32, night: Option<i64>) -> AppResult<()> {
    let mut ctl = open_controller(cfg).await?;

    let id = match night {
        Some(id) => id,
        None => ctl
            .latest_unrated()
            .await?
            .map(|n| n.id)
            .ok_or_else(|| {
                AppError::Validation("no stopped night is waiting for a rating".to_string())
            })?,
    };

    let rated = ctl.rate_night(id, quality).await?;
    ctl.done_navigating();

    success(format!(
        "Night #{} rated: {} ({}).",
        rated.id,
        describe_quality(rated.sleep_quality),
        rated.sleep_quality
    ));

    Ok(())
}

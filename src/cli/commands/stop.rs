use crate::cli::commands::open_controller;
use crate::config::Config;
use crate::core::controller::Navigation;
use crate::errors::AppResult;
use crate::ui::messages::{info, success};
use crate::utils::mins2readable;
use crate::utils::time::millis_to_minutes;

pub async fn handle(cfg: &Config) -> AppResult<()> {
    let mut ctl = open_controller(cfg).await?;

    let Some(closed) = ctl.stop_tracking().await? else {
        info("No night is being tracked.");
        return Ok(());
    };

    success(format!(
        "Stopped night #{} after {}.",
        closed.id,
        mins2readable(millis_to_minutes(closed.duration_millis()))
    ));

    if let Some(Navigation::ToQuality(id)) = ctl.navigation() {
        info(format!(
            "How did you sleep? Rate it with `sleeplog rate <0-5>` (night #{}).",
            id
        ));
        ctl.done_navigating();
    }

    Ok(())
}

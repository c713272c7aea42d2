use crate::cli::commands::open_controller;
use crate::config::Config;
use crate::errors::AppResult;
use crate::export::{ExportFormat, ExportLogic};

pub async fn handle(cfg: &Config, format: ExportFormat, file: &str, force: bool) -> AppResult<()> {
    let ctl = open_controller(cfg).await?;
    ExportLogic::export(&ctl.nights(), format, file, &cfg.date_format, force)?;
    Ok(())
}

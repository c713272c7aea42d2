use crate::config::Config;
use crate::core::backup::BackupLogic;
use crate::errors::AppResult;

pub fn handle(cfg: &Config, file: &str, compress: bool, force: bool) -> AppResult<()> {
    BackupLogic::backup(cfg, file, compress, force)?;
    Ok(())
}

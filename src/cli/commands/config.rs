use crate::config::Config;
use crate::errors::{AppError, AppResult};
use crate::ui::messages::{success, warning};

use std::process::Command;

/// Handle the `config` subcommand
pub fn handle(
    cfg: &Config,
    print_config: bool,
    edit_config: bool,
    editor: &Option<String>,
) -> AppResult<()> {
    let path = Config::config_file();

    // ---- PRINT CONFIG ----
    if print_config {
        let yaml = serde_yaml::to_string(cfg).map_err(|e| AppError::Config(e.to_string()))?;
        println!("📄 Current configuration:\n");
        println!("{}", yaml);
    }

    // ---- EDIT CONFIG ----
    if edit_config {
        let default_editor = std::env::var("EDITOR")
            .or_else(|_| std::env::var("VISUAL"))
            .unwrap_or_else(|_| {
                if cfg!(target_os = "windows") {
                    "notepad".to_string()
                } else {
                    "nano".to_string()
                }
            });

        let editor_to_use = editor.clone().unwrap_or_else(|| default_editor.clone());

        match Command::new(&editor_to_use).arg(&path).status() {
            Ok(s) if s.success() => {
                success(format!(
                    "Configuration file edited successfully using '{}'",
                    editor_to_use
                ));
            }
            _ => {
                warning(format!(
                    "Editor '{}' not available, falling back to '{}'",
                    editor_to_use, default_editor
                ));

                let fallback = Command::new(&default_editor).arg(&path).status();
                match fallback {
                    Ok(s) if s.success() => success(format!(
                        "Configuration file edited successfully using fallback '{}'",
                        default_editor
                    )),
                    _ => {
                        return Err(AppError::Config(format!(
                            "failed to edit configuration file using '{}'",
                            default_editor
                        )));
                    }
                }
            }
        }
    }

    Ok(())
}

//! Formatting utilities used for CLI and export outputs.

/// Minutes as `HHh MMm`.
pub fn mins2readable(mins: i64) -> String {
    let abs_m = mins.abs();
    format!("{:02}h {:02}m", abs_m / 60, abs_m % 60)
}

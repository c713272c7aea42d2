#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use std::env;
use std::fs;
use std::path::PathBuf;

pub fn slp() -> Command {
    let mut cmd = cargo_bin_cmd!("sleeplog");
    cmd.env("NO_COLOR", "1");
    cmd
}

/// Create a unique test DB path inside the system temp dir and remove any existing file
pub fn setup_test_db(name: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_sleeplog.sqlite", name));
    let db_path = path.to_string_lossy().to_string();
    fs::remove_file(&db_path).ok();
    db_path
}

/// Create a temporary output file path inside tempdir and ensure it's removed
pub fn temp_out(name: &str, ext: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_sleeplog_out.{}", name, ext));
    let p = path.to_string_lossy().to_string();
    fs::remove_file(&p).ok();
    p
}

/// Initialize a DB in test mode (no config file written)
pub fn init_db(db_path: &str) {
    slp()
        .args(["--db", db_path, "--test", "init"])
        .assert()
        .success();
}

/// One full night: start, stop, rate
pub fn log_rated_night(db_path: &str, quality: &str) {
    slp().args(["--db", db_path, "start"]).assert().success();
    slp().args(["--db", db_path, "stop"]).assert().success();
    slp()
        .args(["--db", db_path, "rate", quality])
        .assert()
        .success();
}

/// Read every night straight from SQLite, most recent first: (id, start, end, quality)
pub fn read_nights(db_path: &str) -> Vec<(i64, i64, i64, i32)> {
    let conn = rusqlite::Connection::open(db_path).expect("open db");
    let mut stmt = conn
        .prepare(
            "SELECT id, startTimeMillis, endTimeMillis, sleepQuality
             FROM sleep_nights ORDER BY id DESC",
        )
        .expect("prepare");
    let nights: Vec<(i64, i64, i64, i32)> = stmt
        .query_map([], |row| {
            Ok((row.get(0)?, row.get(1)?, row.get(2)?, row.get(3)?))
        })
        .expect("query")
        .map(|r| r.expect("row"))
        .collect();
    nights
}

pub mod backup;
pub mod controller;
pub mod history;
pub mod log;

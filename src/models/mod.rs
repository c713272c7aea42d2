pub mod quality;
pub mod sleep_night;

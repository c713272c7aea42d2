//! sleeplog main entrypoint.

use sleeplog::run;
use sleeplog::ui::messages::error;

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        error(format!("Error: {}", e));
        std::process::exit(1);
    }
}

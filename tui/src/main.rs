use anyhow::Result;
use chute_tui::run_tui;

#[tokio::main]
async fn main() -> Result<()> {
    run_tui().await
}

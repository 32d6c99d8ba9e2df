use anyhow::Result;
use vestibule::cli;

// Main function
#[tokio::main]
async fn main() -> Result<()> {
    // Parse arguments, initialize telemetry, and build the action
    let action = cli::start()?;

    action.execute().await?;

    Ok(())
}

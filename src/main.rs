use anyhow::{Context, Result};
use bubbletea_rs::Program;
use bubbletea_todo::{logging, App, Config};

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env();
    logging::init(&config).context("setting up logging")?;

    let program = Program::<App>::builder()
        .alt_screen(config.alt_screen)
        .signal_handler(true)
        .build()
        .context("starting terminal program")?;

    program
        .run()
        .await
        .context("running terminal program")?;

    tracing::info!("bye");
    Ok(())
}

//! Book catalog server

use std::process::ExitCode;

use book_catalog::prelude::*;

#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{e}");
            eprintln!("book-catalog: {e}");
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<()> {
    let config = match std::env::args_os().nth(1) {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    config.validate()?;
    init_tracing(&config)?;

    let repository = match &config.catalog.seed_file {
        Some(path) => InMemoryBookRepository::from_seed_file(path).await?,
        None => InMemoryBookRepository::new(),
    };
    let placeholder = load_placeholder(config.catalog.placeholder_cover.as_deref()).await?;

    let state = AppState::new(repository)
        .with_placeholder(placeholder)
        .with_default_page_size(config.catalog.default_page_size)
        .with_service_name(config.service.name.clone());

    Server::new(config).serve(router(state)).await
}

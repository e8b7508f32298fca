//! Binary entry point: resolve configuration, start file logging, open the
//! catalog database, and hand control to the terminal UI.
use anyhow::Context;
use book_catalog::{fetch_books, fetch_publishers, logging, open, run_app, App, Config};
use tracing::info;

fn main() -> anyhow::Result<()> {
    let config = Config::from_env().context("failed to load configuration")?;
    logging::init(&config)?;
    info!(?config, "starting book catalog");

    let conn = open(&config).context("failed to open catalog database")?;
    let books = fetch_books(&conn).context("failed to load books")?;
    let publishers = fetch_publishers(&conn).context("failed to load publishers")?;

    let mut app = App::new(conn, books, publishers);
    run_app(&mut app)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // `.env` first so a `RUST_LOG` set there reaches the subscriber.
    let dotenv = blog_search::config::load_dotenv();
    blog_search::init_tracing();
    match dotenv {
        Ok(Some(path)) => tracing::debug!(path = %path.display(), "loaded .env"),
        Ok(None) => {}
        Err(e) => tracing::warn!(error = %e, "ignoring unreadable .env"),
    }
    blog_search::run().await
}

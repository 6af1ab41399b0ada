//! Instrumented Cache demo
//!
//! Stores a few values, prints the replayed `store` history and, when
//! `DEMO_URL` is set, fetches that page twice through the TTL cache.

use std::env;
use std::sync::Arc;

use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use instrumented_cache::{
    spawn_sweeper, Config, HttpFetcher, InstrumentedCache, MemoryStore, Operation,
    OperationExt, StoredValue,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Defaults to "info" level, can be overridden with RUST_LOG env var
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "instrumented_cache=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env();
    info!(
        "Configuration loaded: url_cache_ttl={}s, flush_on_init={}, record_failed_calls={}, sweep_interval={}s",
        config.url_cache_ttl, config.flush_on_init, config.record_failed_calls, config.sweep_interval
    );

    let store = Arc::new(MemoryStore::new());
    let sweeper = spawn_sweeper(store.clone(), config.sweep_interval);

    let cache = InstrumentedCache::new(store.clone(), &config).await?;

    let values: Vec<StoredValue> = vec!["foo".into(), "bar".into(), 42.into()];
    for value in values {
        let key = cache.store(value).await?;
        info!(%key, "stored");
    }

    if let Some(replay) = cache.replay_store().await? {
        println!("{}", replay);
    }

    if let Ok(url) = env::var("DEMO_URL") {
        let get_page = HttpFetcher::new().with_ttl_cache(store.clone(), config.url_cache_ttl);

        for _ in 0..2 {
            let page = get_page.call(url.clone()).await?;
            info!(url = %url, bytes = page.len(), "page served");
        }
        println!("{} requested {} times", url, get_page.request_count(&url).await?);
    }

    let stats = store.stats().await;
    info!(
        hits = stats.hits,
        misses = stats.misses,
        expirations = stats.expirations,
        hit_rate = stats.hit_rate(),
        "store stats"
    );

    sweeper.abort();
    info!("Demo complete");
    Ok(())
}

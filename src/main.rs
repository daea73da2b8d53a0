use keyword_service::analysis::definitions::DictionaryApiProvider;
use keyword_service::analysis::extractor::StatisticalExtractor;
use keyword_service::analysis::filter::WordListFilter;
use keyword_service::api;
use keyword_service::config::{Settings, StoreBackend};
use keyword_service::executor::executor::TaskExecutor;
use keyword_service::executor::queue::JobQueue;
use keyword_service::executor::registry::TaskHandlerRegistry;
use keyword_service::orchestrator::service::{Analyzer, AnalyzerOptions};
use keyword_service::storage::memory::MemoryResultStore;
use keyword_service::storage::redis_store::RedisResultStore;
use keyword_service::storage::store::ResultStore;

use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

const DICTIONARY_TIMEOUT: Duration = Duration::from_secs(10);

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let settings = Settings::from_env()?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_new(&settings.log_level).unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    tracing::info!(
        "Starting keyword service (model: {}, max keywords: {}, diversity: {})",
        settings.model_name,
        settings.max_keywords,
        settings.keyword_diversity
    );

    // 1. Result store (connects lazily):
    let store: Arc<dyn ResultStore> = match settings.store_backend {
        StoreBackend::Redis => {
            tracing::info!("Using Redis result store at {}", settings.redis_url);
            Arc::new(RedisResultStore::new(
                &settings.redis_url,
                settings.redis_timeout,
            )?)
        }
        StoreBackend::Memory => {
            tracing::warn!("Using in-memory result store; results are lost on restart");
            Arc::new(MemoryResultStore::new())
        }
    };

    // 2. Analysis capabilities:
    let extractor = Arc::new(StatisticalExtractor::new(settings.model_name.clone()));
    let definitions = Arc::new(DictionaryApiProvider::new(
        &settings.dictionary_api_url,
        DICTIONARY_TIMEOUT,
    )?);
    let classifier = Arc::new(WordListFilter::new(&settings.offensive_words));

    // 3. Orchestrator and background workers:
    let (queue, receiver) = JobQueue::bounded(settings.queue_capacity);
    let analyzer = Arc::new(Analyzer::new(
        extractor,
        definitions,
        classifier,
        store.clone(),
        queue,
        AnalyzerOptions::from(&settings),
    ));

    let registry = TaskHandlerRegistry::new();
    analyzer.register_handlers(&registry);
    let workers = TaskExecutor::new(receiver.clone(), registry, settings.worker_count).start();

    // 4. HTTP server:
    let app = api::router(analyzer);
    let listener = tokio::net::TcpListener::bind(settings.bind_addr()).await?;

    tracing::info!("HTTP server listening on {}", listener.local_addr()?);
    tracing::info!("Press Ctrl+C to shutdown");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    // 5. Teardown:
    receiver.close().await;
    for worker in workers {
        if let Err(e) = worker.await {
            tracing::error!("Worker terminated abnormally: {}", e);
        }
    }
    store.close().await;
    tracing::info!("Shutdown complete");

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}

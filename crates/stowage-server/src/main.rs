use std::sync::Arc;

use anyhow::Context;

use stowage_core::StowageConfig;
use stowage_observability::tracing_setup::{init_tracing, spans::tasks};
use stowage_observability::{LogBuffer, MetricsRegistry};
use stowage_server::{router, AppState, BusyLoopWorker, KeyRule, StressSpawner, UploadService};
use stowage_storage::S3ObjectStore;
use stowage_telemetry::{BackgroundTasks, InventorySampler, LogShipper, SysinfoSource, SystemSampler};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = StowageConfig::load().context("loading configuration")?;

    let buffer = LogBuffer::open(&config.telemetry.log_buffer_path).with_context(|| {
        format!(
            "opening log buffer {}",
            config.telemetry.log_buffer_path.display()
        )
    })?;
    init_tracing(&config.observability, Some(buffer.clone()))
        .context("installing tracing subscriber")?;

    let registry = Arc::new(MetricsRegistry::new());
    let store = Arc::new(S3ObjectStore::from_config(&config.store).await);
    let bucket = config.store.bucket().map(str::to_string);
    if bucket.is_none() {
        tracing::warn!("no bucket configured (S3_BUCKET_NAME); uploads and log shipments will fail");
    }

    let mut background = BackgroundTasks::new();
    let system = SystemSampler::new(SysinfoSource::new(), &registry)?;
    background.spawn(
        tasks::SYSTEM_SAMPLER,
        system.run(config.telemetry.system_interval()),
    );
    let inventory = InventorySampler::new(store.clone(), bucket.clone(), &registry)?;
    background.spawn(
        tasks::INVENTORY_SAMPLER,
        inventory.run(config.telemetry.inventory_interval()),
    );
    let shipper = Arc::new(LogShipper::new(
        store.clone(),
        bucket.clone(),
        buffer,
        config.telemetry.log_key_prefix.clone(),
        &registry,
    )?);
    background.spawn(
        tasks::LOG_SHIPPER,
        shipper.clone().run(config.telemetry.ship_interval()),
    );

    let uploads = UploadService::new(
        store,
        bucket,
        KeyRule::new(config.upload.key_prefix.clone()),
        &registry,
    )?;
    let stress = StressSpawner::new(BusyLoopWorker, &config.stress, &registry)?;
    let app = router(
        AppState::new(uploads, stress, registry),
        config.server.max_upload_bytes,
    );

    let listener = tokio::net::TcpListener::bind(&config.server.bind_addr)
        .await
        .with_context(|| format!("binding {}", config.server.bind_addr))?;
    tracing::info!(addr = %config.server.bind_addr, "stowage listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("serving HTTP")?;

    tracing::info!("shutting down background tasks");
    background.shutdown().await;
    // Errors are already logged by the cycle itself.
    let _ = shipper.ship_once().await;
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "cannot listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};
        match signal(SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "cannot listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };
    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}

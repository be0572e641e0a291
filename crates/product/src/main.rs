use anyhow::{Context, Result};
use genproto::product::{
    product_command_service_server::ProductCommandServiceServer,
    product_query_service_server::ProductQueryServiceServer,
};
use product::{
    config::{myconfig::Config, server_config::ServerConfig},
    handler::{
        command::ProductCommandServiceImpl, http::router, query::ProductQueryServiceImpl,
    },
    state::AppState,
};
use shared::{
    config::{ConnectionManager, ConnectionPool},
    utils::{Telemetry, WorkerGuard, init_logger, shutdown_signal},
};
use std::{net::SocketAddr, sync::Arc};
use tokio::{net::TcpListener, sync::broadcast, task::JoinHandle};
use tonic::transport::Server;
use tracing::{error, info, warn};

const SERVICE_NAME: &str = "product-service";

struct Application {
    server_config: ServerConfig,
    state: Arc<AppState>,
    pool: ConnectionPool,
    telemetry: Telemetry,
    _log_guard: Option<WorkerGuard>,
}

struct ServerHandles {
    grpc_handle: JoinHandle<()>,
    http_handle: JoinHandle<()>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let app = setup().await.context("Failed to setup application")?;

    let (shutdown_tx, _) = broadcast::channel::<()>(1);

    let server_handles = run_servers(&app.server_config, app.state.clone(), &shutdown_tx)
        .await
        .context("Failed to start servers")?;

    shutdown_signal().await;
    info!("🛑 Shutdown signal received, broadcasting shutdown...");
    if let Err(e) = shutdown_tx.send(()) {
        warn!("Failed to send shutdown signal: {e}");
    }

    shutdown(app, server_handles).await;

    Ok(())
}

async fn setup() -> Result<Application> {
    dotenv::dotenv().ok();

    let config = Config::init().context("Failed to load configuration")?;
    let server_config = ServerConfig::from_config(&config)?;

    let telemetry = Telemetry::init(SERVICE_NAME, &config.otel_endpoint)
        .context("Failed to initialize telemetry")?;

    let log_guard = init_logger(
        telemetry.logger_provider(),
        SERVICE_NAME,
        config.is_dev,
        config.is_enable_file,
    );

    info!("🚀 Starting Product Service initialization...");

    let pool = ConnectionManager::new_pool(
        &server_config.database_url,
        config.db_min_conn,
        config.db_max_conn,
    )
    .await
    .context("Failed to initialize database pool")?;

    if config.run_migrations {
        run_migrations(&pool)
            .await
            .context("Failed to run database migrations")?;
        info!("✅ Database migrations applied");
    }

    let state = Arc::new(AppState::new(pool.clone()));

    info!("✅ Application setup completed successfully.");

    Ok(Application {
        server_config,
        state,
        pool,
        telemetry,
        _log_guard: log_guard,
    })
}

async fn run_servers(
    server_config: &ServerConfig,
    state: Arc<AppState>,
    shutdown_tx: &broadcast::Sender<()>,
) -> Result<ServerHandles> {
    let command_service =
        ProductCommandServiceImpl::new(state.di_container.product_command.clone());
    let query_service = ProductQueryServiceImpl::new(state.di_container.product_query.clone());

    let grpc_handle = run_grpc_server(
        command_service,
        query_service,
        server_config.grpc_addr,
        shutdown_tx.subscribe(),
    );

    let listener = TcpListener::bind(server_config.http_addr)
        .await
        .with_context(|| format!("Failed to bind HTTP listener on {}", server_config.http_addr))?;

    let http_handle = run_http_server(listener, state, shutdown_tx.subscribe());

    Ok(ServerHandles {
        grpc_handle,
        http_handle,
    })
}

fn run_grpc_server(
    command_service: ProductCommandServiceImpl,
    query_service: ProductQueryServiceImpl,
    addr: SocketAddr,
    mut shutdown_rx: broadcast::Receiver<()>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        info!("📡 Starting gRPC server on {addr}");

        let shutdown_future = async move {
            let _ = shutdown_rx.recv().await;
            info!("gRPC server received shutdown signal");
        };

        let result = Server::builder()
            .add_service(ProductCommandServiceServer::new(command_service))
            .add_service(ProductQueryServiceServer::new(query_service))
            .serve_with_shutdown(addr, shutdown_future)
            .await;

        match result {
            Ok(()) => info!("✅ gRPC server stopped gracefully"),
            Err(e) => error!("❌ gRPC server failed on {addr}: {e}"),
        }
    })
}

fn run_http_server(
    listener: TcpListener,
    state: Arc<AppState>,
    mut shutdown_rx: broadcast::Receiver<()>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let app = router(state.http_state());

        match listener.local_addr() {
            Ok(addr) => info!("🌐 Starting HTTP server on {addr}"),
            Err(e) => warn!("HTTP listener has no local address: {e}"),
        }

        let result = axum::serve(listener, app)
            .with_graceful_shutdown(async move {
                let _ = shutdown_rx.recv().await;
                info!("HTTP server received shutdown signal");
            })
            .await;

        match result {
            Ok(()) => info!("✅ HTTP server stopped gracefully"),
            Err(e) => error!("❌ HTTP server failed: {e}"),
        }
    })
}

async fn shutdown(app: Application, server_handles: ServerHandles) {
    info!("🛑 Shutting down all servers...");

    let shutdown_timeout = tokio::time::Duration::from_secs(30);
    let shutdown_result = tokio::time::timeout(shutdown_timeout, async {
        let _ = tokio::join!(server_handles.grpc_handle, server_handles.http_handle);
    })
    .await;

    match shutdown_result {
        Ok(()) => info!("✅ All components shutdown gracefully"),
        Err(_) => warn!("⚠️  Shutdown timeout reached, forcing exit"),
    }

    ConnectionManager::close(&app.pool).await;

    if let Err(e) = app.telemetry.shutdown() {
        error!("Failed to shutdown telemetry: {e}");
    }

    info!("✅ Product Service shutdown complete.");
}

async fn run_migrations(pool: &ConnectionPool) -> Result<()> {
    sqlx::migrate!("./migrations").run(pool).await?;
    Ok(())
}

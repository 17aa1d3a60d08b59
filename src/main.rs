use axum::{routing::{get, post}, Router};
use std::sync::Arc;
use tower::ServiceBuilder;
use tracing::info;
use tracing_subscriber::fmt::time::ChronoLocal;
use tracing_subscriber::EnvFilter;
use verification_linker::{api, AppConfig, LinkError, VerificationLinker};

#[tokio::main]
async fn main() -> Result<(), LinkError> {
    // 初始化日志 - 使用本地时间格式, RUST_LOG 可调整级别
    tracing_subscriber::fmt()
        .with_timer(ChronoLocal::new("%Y-%m-%d %H:%M:%S".to_string()))
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(true)
        .with_level(true)
        .init();

    // 加载配置
    let config = AppConfig::load()?;
    info!("Starting server with config: {:?}", config);

    let linker = Arc::new(VerificationLinker::new(config.linker.clone()));

    // 构建路由
    let link_routes = Router::new()
        .route("/api/link", post(api::link_document))
        .route("/api/link/batch", post(api::link_batch))
        .with_state(linker);

    let app = Router::new()
        .route("/health", get(api::health_check))
        .merge(link_routes)
        .layer(ServiceBuilder::new());

    // 启动服务器
    let addr = format!("{}:{}", config.server.host, config.server.port);
    info!("Server listening on {}", addr);
    info!("API Endpoints:");
    info!("  POST /api/link        - link one document");
    info!("  POST /api/link/batch  - link many documents in parallel");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

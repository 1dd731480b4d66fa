//! Server Implementation
//!
//! HTTP 服务器启动和管理

use std::time::{Duration, Instant};

use axum::{Router, middleware};
use socketioxide::SocketIo;
use tower_http::cors::CorsLayer;
use tower_http::timeout::TimeoutLayer;

use crate::core::{Config, Result, ServerError, ServerState};

/// HTTP 请求日志中间件
async fn log_request(
    request: http::Request<axum::body::Body>,
    next: middleware::Next,
) -> http::Response<axum::body::Body> {
    let method = request.method().clone();
    let uri = request.uri().clone();
    let started = Instant::now();

    let response = next.run(request).await;

    let status = response.status();
    let latency_ms = started.elapsed().as_millis();
    tracing::info!(target: "http_access", "{} {} {} {}ms", method, uri, status, latency_ms);

    response
}

/// Build the Axum router (without state)
pub fn build_app() -> Router<ServerState> {
    Router::<ServerState>::new()
        .merge(crate::api::health::router())
        .merge(crate::api::auth::router())
        .merge(crate::api::archived::router())
        .merge(crate::api::jobs::router())
        .merge(crate::api::id_verification::router())
        .merge(crate::api::client_management::router())
}

/// Assemble the full service: routes, auth gate, CORS, request log
pub fn build_router(state: ServerState) -> Router {
    let cors = cors_layer(state.config.as_ref());
    let timeout = TimeoutLayer::new(Duration::from_millis(state.config.request_timeout_ms));

    build_app()
        // 管理员认证门卫 - require_admin 内部跳过公共路由
        .layer(middleware::from_fn_with_state(
            state.clone(),
            crate::auth::require_admin,
        ))
        .with_state(state)
        .layer(cors)
        .layer(timeout)
        .layer(middleware::from_fn(log_request))
}

/// 带凭证的 CORS 需要显式来源，不能使用通配
fn cors_layer(config: &Config) -> CorsLayer {
    use http::header::{AUTHORIZATION, CONTENT_TYPE};
    use http::Method;

    let origin = config
        .frontend_origin
        .parse::<http::HeaderValue>()
        .unwrap_or_else(|_| http::HeaderValue::from_static("http://localhost:3000"));

    CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([CONTENT_TYPE, AUTHORIZATION])
        .allow_credentials(true)
}

/// HTTP Server
pub struct Server {
    config: Config,
    state: ServerState,
}

impl Server {
    pub fn with_state(config: Config, state: ServerState) -> Self {
        Self { config, state }
    }

    pub async fn run(&self) -> Result<()> {
        let state = self.state.clone();

        // Socket.IO 消息网关，挂在 HTTP 服务的 /socket.io 路径上
        let (io_layer, io) = SocketIo::new_layer();
        crate::message::register(&io);

        let app = build_router(state).layer(io_layer);

        let addr = std::net::SocketAddr::from(([0, 0, 0, 0], self.config.port));
        tracing::info!("🔧 FixIt server starting on {}", addr);

        let listener = tokio::net::TcpListener::bind(addr).await?;
        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await
            .map_err(|e| ServerError::Internal(e.into()))?;

        // Keep the Socket.IO handle alive until the HTTP server stops
        drop(io);
        Ok(())
    }
}

async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
    tracing::info!("Shutting down...");
}

//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with the dispatch handler
//! - Wire up middleware (tracing, body limit, request ID)
//! - Bind server to listener
//! - Dispatch requests through the route table
//! - Forward delegated namespaces, serve files for file bindings
//! - Observability (metrics, correlation IDs)

use axum::{
    body::Body,
    extract::{ConnectInfo, State},
    http::Request,
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::net::TcpListener;
use tower_http::{
    limit::RequestBodyLimitLayer,
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};

use crate::config::SiteConfig;
use crate::http::files;
use crate::http::forward::{self, build_client, Forward, UpstreamClient};
use crate::http::request::{request_id, MakeRequestUuid};
use crate::http::response::SiteError;
use crate::lifecycle::shutdown::ShutdownSignal;
use crate::observability::metrics;
use crate::routing::{BuildError, RouteTable, Target};

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub table: Arc<RouteTable>,
    pub client: UpstreamClient,
    pub request_timeout: Duration,
}

/// HTTP server for the site.
pub struct SiteServer {
    router: Router,
    table: Arc<RouteTable>,
}

impl SiteServer {
    /// Build the route table and the server around it.
    pub fn new(config: SiteConfig) -> Result<Self, BuildError> {
        let table = Arc::new(RouteTable::build(&config)?);

        let state = AppState {
            table: table.clone(),
            client: build_client(Duration::from_secs(config.timeouts.connect_secs)),
            request_timeout: Duration::from_secs(config.timeouts.request_secs),
        };

        let router = Self::build_router(&config, state);
        Ok(Self { router, table })
    }

    /// Build the Axum router with all middleware layers.
    fn build_router(config: &SiteConfig, state: AppState) -> Router {
        let mut router = Router::new();
        if let Some(path) = &config.listener.health_path {
            router = router.route(path, get(healthz));
        }

        router
            .fallback(dispatch_handler)
            .with_state(state)
            .layer(RequestBodyLimitLayer::new(config.security.max_body_size))
            .layer(PropagateRequestIdLayer::x_request_id())
            .layer(TraceLayer::new_for_http())
            .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
    }

    /// The route table this server dispatches with.
    pub fn table(&self) -> &RouteTable {
        &self.table
    }

    /// A handle to the router, for in-process requests.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Run the server until `shutdown` fires.
    pub async fn run(
        self,
        listener: TcpListener,
        shutdown: ShutdownSignal,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            bindings = self.table.len(),
            "HTTP server starting"
        );

        let app = self.router.into_make_service_with_connect_info::<SocketAddr>();

        axum::serve(listener, app)
            .with_graceful_shutdown(async move {
                shutdown.wait().await;
                tracing::info!("Shutdown signal received");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

async fn healthz() -> &'static str {
    "OK"
}

/// Resolves the request path and hands the request to the bound target.
async fn dispatch_handler(State(state): State<AppState>, request: Request<Body>) -> Response {
    let start_time = Instant::now();
    let request_id = request_id(request.headers()).to_string();
    let client = request
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| *addr);
    let path = request.uri().path().to_string();
    let method = request.method().to_string();

    let Some(resolved) = state.table.resolve(&path) else {
        tracing::warn!(request_id = %request_id, path = %path, "No route matched");
        let response = SiteError::NotFound(path.clone()).into_response();
        metrics::record_request(&method, response.status().as_u16(), "none", start_time);
        return response;
    };
    let binding = resolved.binding;

    tracing::debug!(
        request_id = %request_id,
        method = %method,
        path = %path,
        binding = %binding.name,
        "Dispatching request"
    );

    let result = match &binding.target {
        Target::Upstream { address } => {
            let ctx = Forward {
                upstream: address,
                request_id: &request_id,
                client,
                timeout: state.request_timeout,
            };
            forward::forward(&state.client, ctx, request).await
        }
        Target::Files { root } => files::serve(root, resolved.remainder, request).await,
    };

    let response = match result {
        Ok(response) => response,
        Err(e) => {
            tracing::debug!(
                request_id = %request_id,
                binding = %binding.name,
                error = %e,
                "Request failed"
            );
            e.into_response()
        }
    };

    metrics::record_request(&method, response.status().as_u16(), &binding.name, start_time);
    response
}

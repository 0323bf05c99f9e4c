//! Web server implementation

use axum::{
    body::Body,
    extract::State,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::{error, info};

use translit_common::{Config, FontConfig, ReportRecordSet, StaticStore};
use translit_report::{ExcelRenderer, PdfRenderer, Renderer};

/// File stem of every preview download; the renderer supplies the extension
pub const DOWNLOAD_STEM: &str = "test_data_report";

/// Web server configuration
#[derive(Debug, Clone)]
pub struct WebServerConfig {
    /// JSON table of static test cases, read once at startup
    pub static_data: PathBuf,
    pub fonts: FontConfig,
}

impl WebServerConfig {
    pub fn from_config(config: &Config) -> Self {
        Self {
            static_data: config.paths.static_data.clone(),
            fonts: config.fonts.clone(),
        }
    }
}

struct WebServerState {
    store: StaticStore,
    pdf: Arc<dyn Renderer>,
    excel: Arc<dyn Renderer>,
}

/// Serves static-case previews as downloadable reports
pub struct WebServer {
    state: Arc<WebServerState>,
}

pub async fn serve(addr: SocketAddr, cfg: WebServerConfig) -> anyhow::Result<()> {
    let server = WebServer::new(cfg)?;
    server.serve(addr).await
}

impl WebServer {
    /// Create a new web server, loading the static cases
    pub fn new(cfg: WebServerConfig) -> anyhow::Result<Self> {
        let store = StaticStore::load(&cfg.static_data)?;
        info!(
            "Loaded {} static case(s) from {}",
            store.len(),
            cfg.static_data.display()
        );
        Ok(Self::with_store(store, cfg.fonts))
    }

    /// Create a web server over an already loaded store
    pub fn with_store(store: StaticStore, fonts: FontConfig) -> Self {
        Self {
            state: Arc::new(WebServerState {
                store,
                pdf: Arc::new(PdfRenderer::new(fonts)),
                excel: Arc::new(ExcelRenderer::new()),
            }),
        }
    }

    /// Build the router
    pub fn router(&self) -> Router {
        Router::new()
            .route("/", get(root_handler))
            .route("/health", get(health_handler))
            .route("/generate-pdf", get(generate_pdf_handler))
            .route("/generate-excel", get(generate_excel_handler))
            .fallback(not_found_handler)
            .layer(TraceLayer::new_for_http())
            .with_state(self.state.clone())
    }

    /// Start the web server
    pub async fn serve(self, addr: SocketAddr) -> anyhow::Result<()> {
        info!("Report server starting on http://{}", addr);

        let listener = tokio::net::TcpListener::bind(addr).await?;
        axum::serve(listener, self.router()).await?;

        Ok(())
    }
}

// ============================================================================
// Handlers
// ============================================================================

async fn root_handler() -> impl IntoResponse {
    "Server is running"
}

async fn health_handler(State(state): State<Arc<WebServerState>>) -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "service": "translit-web",
        "static_cases": state.store.len(),
    }))
}

async fn generate_pdf_handler(State(state): State<Arc<WebServerState>>) -> Response {
    let renderer = state.pdf.clone();
    download(&state, renderer).await
}

async fn generate_excel_handler(State(state): State<Arc<WebServerState>>) -> Response {
    let renderer = state.excel.clone();
    download(&state, renderer).await
}

/// Render the static preview off the async runtime and return it as an attachment
async fn download(state: &WebServerState, renderer: Arc<dyn Renderer>) -> Response {
    let records = ReportRecordSet::preview(state.store.cases());
    let filename = format!("{}.{}", DOWNLOAD_STEM, renderer.extension());
    let name = renderer.name();
    let content_type = renderer.content_type();

    let rendered = tokio::task::spawn_blocking(move || renderer.render(&records)).await;
    let bytes = match rendered {
        Ok(Ok(bytes)) => bytes,
        Ok(Err(e)) => return render_failed(name, e.to_string()),
        Err(e) => return render_failed(name, e.to_string()),
    };

    (
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, content_type.to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", filename),
            ),
        ],
        Body::from(bytes),
    )
        .into_response()
}

fn render_failed(name: &str, reason: String) -> Response {
    error!("Error generating {} report: {}", name, reason);
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(serde_json::json!({
            "error": format!("Failed to generate {} report: {}", name, reason)
        })),
    )
        .into_response()
}

async fn not_found_handler() -> impl IntoResponse {
    (StatusCode::NOT_FOUND, "Not found")
}

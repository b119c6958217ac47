//! Console pages and form handlers.
//!
//! Each form posts back to the console, which calls the catalog API and
//! re-renders the page with a flash message and any fetched records.

use axum::extract::{DefaultBodyLimit, Form, Multipart, Query, State};
use axum::http::{HeaderName, StatusCode};
use axum::response::{Html, IntoResponse, Response};
use axum::routing::{get, post};
use axum::Router;
use bytes::Bytes;
use serde::{Deserialize, Serialize};
use tera::Context;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

use catalog_core::catalog::{display_label, Document};

use crate::client::CatalogApiClient;
use crate::templates;

/// Extensions accepted by the upload panel.
pub const ALLOWED_EXTENSIONS: [&str; 3] = ["csv", "json", "txt"];

/// Shared state for console handlers.
#[derive(Clone)]
pub struct ConsoleState {
    pub api: CatalogApiClient,
}

/// Build the console router with the same middleware layers as the API.
pub fn build_console_router(state: ConsoleState) -> Router {
    let request_id_header = HeaderName::from_static("x-request-id");

    Router::new()
        .route("/", get(index))
        // Matches the unlimited upload route of the API behind it.
        .route("/upload", post(upload).layer(DefaultBodyLimit::disable()))
        .route("/save", post(save))
        .route("/list", get(list))
        .route("/search", get(search))
        .layer(CatchPanicLayer::new())
        .layer(PropagateRequestIdLayer::new(request_id_header.clone()))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(SetRequestIdLayer::new(request_id_header, MakeRequestUuid))
        .with_state(state)
}

// ---------------------------------------------------------------------------
// Page model
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Tab {
    #[default]
    Upload,
    Save,
    List,
    Search,
}

#[derive(Debug, Serialize)]
struct Flash {
    level: &'static str,
    message: String,
}

impl Flash {
    fn success(message: impl Into<String>) -> Self {
        Self {
            level: "success",
            message: message.into(),
        }
    }

    fn error(message: impl Into<String>) -> Self {
        Self {
            level: "error",
            message: message.into(),
        }
    }

    fn info(message: impl Into<String>) -> Self {
        Self {
            level: "info",
            message: message.into(),
        }
    }
}

/// A record prepared for display.
#[derive(Debug, Serialize)]
struct RecordView {
    label: String,
    json: String,
}

impl RecordView {
    fn new(doc: &Document) -> Self {
        Self {
            label: display_label(doc).to_string(),
            json: serde_json::to_string_pretty(doc).unwrap_or_else(|_| format!("{doc:?}")),
        }
    }
}

#[derive(Debug)]
struct Page {
    tab: Tab,
    flash: Option<Flash>,
    catalogs: Option<Vec<RecordView>>,
    found: Option<RecordView>,
    search_id: String,
}

impl Page {
    fn new(tab: Tab) -> Self {
        Self {
            tab,
            flash: None,
            catalogs: None,
            found: None,
            search_id: String::new(),
        }
    }

    fn with_flash(mut self, flash: Flash) -> Self {
        self.flash = Some(flash);
        self
    }

    fn render(self, state: &ConsoleState) -> Response {
        let mut context = Context::new();
        context.insert("tab", &self.tab);
        context.insert("flash", &self.flash);
        context.insert("catalogs", &self.catalogs);
        context.insert("found", &self.found);
        context.insert("search_id", &self.search_id);
        context.insert("allowed_extensions", &ALLOWED_EXTENSIONS);
        context.insert("api_base_url", state.api.base_url());

        match templates::render("index.html", &context) {
            Ok(html) => Html(html).into_response(),
            Err(e) => {
                tracing::error!("Template error: {:?}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, format!("Template error: {e}")).into_response()
            }
        }
    }
}

fn blank(value: &Option<String>) -> bool {
    value.as_deref().map_or(true, |v| v.trim().is_empty())
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub struct IndexQuery {
    #[serde(default)]
    pub tab: Tab,
}

/// GET /
async fn index(State(state): State<ConsoleState>, Query(query): Query<IndexQuery>) -> Response {
    Page::new(query.tab).render(&state)
}

/// Whether `file_name` ends in one of [`ALLOWED_EXTENSIONS`].
pub fn has_allowed_extension(file_name: &str) -> bool {
    std::path::Path::new(file_name)
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| {
            ALLOWED_EXTENSIONS
                .iter()
                .any(|allowed| ext.eq_ignore_ascii_case(allowed))
        })
}

/// POST /upload (multipart: `file`, `filename`)
async fn upload(State(state): State<ConsoleState>, mut multipart: Multipart) -> Response {
    let page = Page::new(Tab::Upload);

    let mut file: Option<(String, Bytes)> = None;
    let mut filename: Option<String> = None;
    loop {
        let field = match multipart.next_field().await {
            Ok(Some(field)) => field,
            Ok(None) => break,
            Err(e) => {
                return page
                    .with_flash(Flash::error(format!("Invalid upload form: {e}")))
                    .render(&state)
            }
        };
        let name = field.name().unwrap_or_default().to_string();
        let original = field.file_name().unwrap_or_default().to_string();
        let data = match field.bytes().await {
            Ok(data) => data,
            Err(e) => {
                return page
                    .with_flash(Flash::error(format!("Invalid upload form: {e}")))
                    .render(&state)
            }
        };
        match name.as_str() {
            "file" if !original.is_empty() => file = Some((original, data)),
            "filename" => filename = Some(String::from_utf8_lossy(&data).trim().to_string()),
            _ => {}
        }
    }

    let (Some((original, data)), false) = (file, blank(&filename)) else {
        return page
            .with_flash(Flash::error("Choose a file and enter a file name"))
            .render(&state);
    };
    if !has_allowed_extension(&original) {
        return page
            .with_flash(Flash::error(format!(
                "Only {} files can be uploaded",
                ALLOWED_EXTENSIONS.join(", ")
            )))
            .render(&state);
    }

    let filename = filename.unwrap_or_default();
    let page = match state.api.upload_file(&filename, data).await {
        Ok(receipt) => {
            tracing::info!(%filename, url = %receipt.url, "File uploaded through console");
            page.with_flash(Flash::success(receipt.message))
        }
        Err(e) => {
            tracing::warn!(%filename, error = %e, "Upload failed");
            page.with_flash(Flash::error(e.user_message()))
        }
    };
    page.render(&state)
}

#[derive(Debug, Deserialize)]
pub struct SaveForm {
    pub id: Option<String>,
    pub name: Option<String>,
    pub description: Option<String>,
}

/// POST /save (form: `id`, `name`, `description`)
async fn save(State(state): State<ConsoleState>, Form(form): Form<SaveForm>) -> Response {
    let page = Page::new(Tab::Save);
    if blank(&form.id) || blank(&form.name) {
        return page
            .with_flash(Flash::error("Catalog ID and name are required"))
            .render(&state);
    }

    let record = serde_json::json!({
        "id": form.id.as_deref().unwrap_or_default().trim(),
        "name": form.name.as_deref().unwrap_or_default().trim(),
        "description": form.description.unwrap_or_default(),
    });

    let page = match state.api.save_catalog(&record).await {
        Ok(receipt) => {
            tracing::info!(id = %receipt.id, "Catalog saved through console");
            page.with_flash(Flash::success(receipt.message))
        }
        Err(e) => {
            tracing::warn!(error = %e, "Save failed");
            page.with_flash(Flash::error(e.user_message()))
        }
    };
    page.render(&state)
}

/// GET /list
async fn list(State(state): State<ConsoleState>) -> Response {
    let mut page = Page::new(Tab::List);
    match state.api.list_catalogs().await {
        Ok(catalogs) if catalogs.is_empty() => {
            page = page.with_flash(Flash::info("No catalogs found"));
            page.catalogs = Some(Vec::new());
        }
        Ok(catalogs) => {
            page.catalogs = Some(catalogs.iter().map(RecordView::new).collect());
        }
        Err(e) => {
            tracing::warn!(error = %e, "List failed");
            page = page.with_flash(Flash::error(e.user_message()));
        }
    }
    page.render(&state)
}

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    pub id: Option<String>,
}

/// GET /search?id=
async fn search(State(state): State<ConsoleState>, Query(query): Query<SearchQuery>) -> Response {
    let mut page = Page::new(Tab::Search);
    if blank(&query.id) {
        return page
            .with_flash(Flash::error("Enter a catalog ID to search"))
            .render(&state);
    }

    let id = query.id.unwrap_or_default().trim().to_string();
    page.search_id = id.clone();
    match state.api.get_catalog(&id).await {
        Ok(catalog) => {
            page.found = Some(RecordView::new(&catalog));
            page = page.with_flash(Flash::success("Catalog found"));
        }
        Err(e) => {
            tracing::warn!(%id, error = %e, "Search failed");
            page = page.with_flash(Flash::error(e.user_message()));
        }
    }
    page.render(&state)
}

//! Report server with live reload
//!
//! Provides a local server with:
//! - the HTML report at `/` and the raw hierarchy at `/data.json`
//! - snapshot watching and re-analysis on change
//! - WebSocket-based page reload after each re-analysis

mod reload;

use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use axum::{
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::get,
    Json, Router,
};
use colored::Colorize;
use notify::RecursiveMode;
use notify_debouncer_mini::new_debouncer;
use parking_lot::RwLock;
use tokio::sync::broadcast;
use tower_http::cors::CorsLayer;
use tracing::{debug, error, info};

use crate::analyzer::{analyze, AnalyzeOptions, ChunkSizeInfo};
use crate::cli::ServeOptions;
use crate::report::{render_html, RELOAD_ENDPOINT};
use crate::stats::{Snapshot, SnapshotPaths};

pub use reload::ReloadMessage;

/// Shared server state
struct ServerState {
    /// Latest analysis result
    report: RwLock<Arc<Vec<ChunkSizeInfo>>>,

    /// Reload broadcast channel
    reload_tx: broadcast::Sender<ReloadMessage>,

    /// Whether pages get the reload client
    live_reload: bool,
}

impl ServerState {
    fn current(&self) -> Arc<Vec<ChunkSizeInfo>> {
        self.report.read().clone()
    }
}

/// Report server
pub struct ReportServer {
    /// Snapshot files backing the report
    paths: SnapshotPaths,

    /// Options used for every re-analysis
    analyze_options: AnalyzeOptions,

    /// Result of the initial analysis
    initial: Vec<ChunkSizeInfo>,

    /// Server options
    options: ServeOptions,
}

impl ReportServer {
    /// Create a new report server
    pub fn new(
        paths: SnapshotPaths,
        analyze_options: AnalyzeOptions,
        initial: Vec<ChunkSizeInfo>,
        options: ServeOptions,
    ) -> Result<Self> {
        Ok(Self {
            paths,
            analyze_options,
            initial,
            options,
        })
    }

    /// Start serving until the process is stopped
    pub async fn start(self) -> Result<()> {
        let addr: SocketAddr = tokio::net::lookup_host((self.options.host.as_str(), self.options.port))
            .await?
            .next()
            .with_context(|| format!("Cannot resolve host {}", self.options.host))?;

        let (reload_tx, _) = broadcast::channel::<ReloadMessage>(16);

        let state = Arc::new(ServerState {
            report: RwLock::new(Arc::new(self.initial)),
            reload_tx,
            live_reload: self.options.watch,
        });

        if self.options.watch {
            setup_snapshot_watcher(self.paths, self.analyze_options, state.clone())?;
        }

        let app = router(state);

        if self.options.open {
            let url = format!("http://{}:{}", self.options.host, self.options.port);
            if let Err(e) = webbrowser_open(&url) {
                debug!("Failed to open browser: {}", e);
            }
        }

        info!("Server listening on http://{}", addr);

        let listener = tokio::net::TcpListener::bind(addr).await?;
        axum::serve(listener, app).await?;

        Ok(())
    }
}

fn router(state: Arc<ServerState>) -> Router {
    Router::new()
        .route("/", get(serve_index))
        .route("/data.json", get(serve_data))
        .route(RELOAD_ENDPOINT, get(reload::reload_websocket))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Watch both snapshot files and re-analyze when either changes
fn setup_snapshot_watcher(
    paths: SnapshotPaths,
    options: AnalyzeOptions,
    state: Arc<ServerState>,
) -> Result<()> {
    let watched = [canonical(&paths.stats), canonical(&paths.report)];

    let (tx, rx) = std::sync::mpsc::channel();
    let mut debouncer = new_debouncer(Duration::from_millis(200), tx)?;

    // Editors and bundlers often replace files, so watch the directories
    let mut dirs: Vec<PathBuf> = watched
        .iter()
        .filter_map(|path| path.parent().map(Path::to_path_buf))
        .collect();
    dirs.dedup();
    for dir in &dirs {
        debouncer.watcher().watch(dir, RecursiveMode::NonRecursive)?;
    }

    // The debouncer is moved into the thread to keep it alive
    std::thread::spawn(move || {
        let _debouncer = debouncer;

        loop {
            match rx.recv() {
                Ok(Ok(events)) => {
                    let changed = events
                        .iter()
                        .any(|event| watched.contains(&canonical(&event.path)));
                    if changed {
                        reanalyze(&paths, &options, &state);
                    }
                }
                Ok(Err(e)) => {
                    error!("Watch error: {:?}", e);
                }
                Err(_) => break,
            }
        }
    });

    Ok(())
}

/// Re-run the analysis and notify connected pages
///
/// A failed run keeps the previous report.
fn reanalyze(paths: &SnapshotPaths, options: &AnalyzeOptions, state: &ServerState) {
    let result = Snapshot::load_blocking(paths)
        .and_then(|snapshot| analyze(&snapshot, options).map_err(anyhow::Error::from));

    let message = match result {
        Ok(chunks) => {
            eprintln!(
                "  {} Snapshot changed, report updated ({} chunk(s))",
                "↻".yellow(),
                chunks.len()
            );
            *state.report.write() = Arc::new(chunks);
            ReloadMessage::Reload {
                reason: "snapshot changed".to_string(),
            }
        }
        Err(e) => {
            error!("Re-analysis failed: {:#}", e);
            ReloadMessage::Error {
                message: format!("{:#}", e),
            }
        }
    };

    let _ = state.reload_tx.send(message);
}

fn canonical(path: &Path) -> PathBuf {
    path.canonicalize().unwrap_or_else(|_| path.to_path_buf())
}

/// Serve the HTML report
async fn serve_index(State(state): State<Arc<ServerState>>) -> Response {
    match render_html(&state.current(), state.live_reload) {
        Ok(html) => Html(html).into_response(),
        Err(e) => {
            error!("Failed to render report: {:#}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Failed to render report").into_response()
        }
    }
}

/// Serve the hierarchy as JSON
async fn serve_data(State(state): State<Arc<ServerState>>) -> Json<Vec<ChunkSizeInfo>> {
    Json(state.current().as_ref().clone())
}

/// Open URL in browser (simple implementation)
fn webbrowser_open(url: &str) -> Result<()> {
    #[cfg(target_os = "macos")]
    {
        std::process::Command::new("open").arg(url).spawn()?;
    }

    #[cfg(target_os = "linux")]
    {
        std::process::Command::new("xdg-open").arg(url).spawn()?;
    }

    #[cfg(target_os = "windows")]
    {
        std::process::Command::new("cmd")
            .args(["/C", "start", url])
            .spawn()?;
    }

    Ok(())
}

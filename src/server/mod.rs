//! Development server with live reload

use anyhow::Result;
use axum::{
    body::Body,
    extract::{
        ws::{Message, WebSocket},
        State, WebSocketUpgrade,
    },
    http::{Request, StatusCode},
    response::{Html, IntoResponse, Response},
    routing::get,
    Router,
};
use notify_debouncer_mini::{new_debouncer, notify::RecursiveMode};
use std::net::SocketAddr;
use std::path::{Component, Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::broadcast;
use tower_http::services::ServeDir;

use crate::build::BuildOptions;
use crate::helpers::insert_before_body_close;
use crate::Velcro;

const LIVE_RELOAD_PATH: &str = "/__livereload";

/// Live reload client injected into served HTML pages
const LIVE_RELOAD_SCRIPT: &str = r#"<script>
(function() {
    var ws = new WebSocket('ws://' + location.host + '/__livereload');
    ws.onmessage = function(msg) {
        if (msg.data === 'reload') {
            location.reload();
        }
    };
    ws.onclose = function() {
        setTimeout(function() { location.reload(); }, 1000);
    };
})();
</script>"#;

/// Server settings from the command line
#[derive(Debug, Clone)]
pub struct ServeOptions {
    pub ip: String,
    pub port: u16,
    /// Rebuild and reload on source changes
    pub watch: bool,
    pub build: BuildOptions,
}

struct ServerState {
    output_dir: PathBuf,
    reload_tx: broadcast::Sender<()>,
    live_reload: bool,
}

/// Serve the output directory until interrupted
pub async fn start(velcro: &Velcro, options: ServeOptions) -> Result<()> {
    let (reload_tx, _) = broadcast::channel::<()>(16);

    let state = Arc::new(ServerState {
        output_dir: velcro.output_dir.clone(),
        reload_tx: reload_tx.clone(),
        live_reload: options.watch,
    });

    let app = Router::new()
        .route(LIVE_RELOAD_PATH, get(livereload_handler))
        .fallback(fallback_handler)
        .with_state(state);

    let bind_ip = if options.ip == "localhost" {
        "127.0.0.1"
    } else {
        options.ip.as_str()
    };
    let addr: SocketAddr = format!("{}:{}", bind_ip, options.port).parse()?;

    tracing::info!("Server running at http://{}:{}", options.ip, options.port);

    if options.watch {
        let velcro = velcro.clone();
        let build = options.build;
        tokio::task::spawn_blocking(move || {
            if let Err(e) = watch_and_reload(velcro, build, reload_tx) {
                tracing::error!("File watcher error: {:#}", e);
            }
        });
    }

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Rebuild on source changes and tell connected pages to reload. Blocks.
fn watch_and_reload(
    velcro: Velcro,
    options: BuildOptions,
    reload_tx: broadcast::Sender<()>,
) -> Result<()> {
    let (tx, rx) = std::sync::mpsc::channel();
    let mut debouncer = new_debouncer(Duration::from_millis(500), tx)?;

    debouncer
        .watcher()
        .watch(&velcro.source_dir, RecursiveMode::Recursive)?;
    tracing::debug!("Watching: {:?}", velcro.source_dir);

    let config_path = velcro.config_path();
    if config_path.exists() {
        debouncer
            .watcher()
            .watch(&config_path, RecursiveMode::NonRecursive)?;
        tracing::debug!("Watching: {:?}", config_path);
    }

    loop {
        match rx.recv() {
            Ok(Ok(events)) => {
                let changed: Vec<_> = events
                    .iter()
                    .filter(|e| is_relevant_change(&e.path))
                    .collect();
                if changed.is_empty() {
                    continue;
                }

                for event in &changed {
                    tracing::info!("File changed: {}", event.path.display());
                }

                let result = Velcro::new(&velcro.base_dir).and_then(|v| v.build(options));
                match result {
                    Ok(_) => {
                        let _ = reload_tx.send(());
                    }
                    Err(e) => tracing::error!("Rebuild failed: {:#}", e),
                }
            }
            Ok(Err(e)) => {
                tracing::error!("Watch error: {:?}", e);
            }
            Err(e) => {
                tracing::error!("Channel error: {:?}", e);
                break;
            }
        }
    }

    Ok(())
}

/// Skip editor and VCS noise
fn is_relevant_change(path: &Path) -> bool {
    let path = path.to_string_lossy();
    !path.contains(".git") && !path.contains(".DS_Store") && !path.ends_with('~')
}

async fn livereload_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<ServerState>>,
) -> impl IntoResponse {
    let reload_rx = state.reload_tx.subscribe();
    ws.on_upgrade(move |socket| handle_livereload_socket(socket, reload_rx))
}

async fn handle_livereload_socket(mut socket: WebSocket, mut reload_rx: broadcast::Receiver<()>) {
    tracing::debug!("Live reload client connected");

    loop {
        tokio::select! {
            result = reload_rx.recv() => {
                match result {
                    Ok(_) => {
                        if socket.send(Message::Text("reload".to_string())).await.is_err() {
                            break;
                        }
                    }
                    Err(broadcast::error::RecvError::Closed) => break,
                    Err(broadcast::error::RecvError::Lagged(_)) => continue,
                }
            }
            msg = socket.recv() => {
                match msg {
                    Some(Ok(Message::Ping(data))) => {
                        if socket.send(Message::Pong(data)).await.is_err() {
                            break;
                        }
                    }
                    Some(Ok(Message::Close(_))) | None => break,
                    _ => {}
                }
            }
        }
    }

    tracing::debug!("Live reload client disconnected");
}

/// Serve files from the output directory, injecting the reload client into HTML
async fn fallback_handler(
    State(state): State<Arc<ServerState>>,
    request: Request<Body>,
) -> Response {
    let Some(file_path) = resolve_request_path(&state.output_dir, request.uri().path()) else {
        return (StatusCode::NOT_FOUND, "Not found").into_response();
    };

    if state.live_reload && is_html(&file_path) {
        return match tokio::fs::read_to_string(&file_path).await {
            Ok(content) => Html(insert_before_body_close(&content, LIVE_RELOAD_SCRIPT)).into_response(),
            Err(_) => (StatusCode::NOT_FOUND, "Not found").into_response(),
        };
    }

    let mut service = ServeDir::new(&state.output_dir).append_index_html_on_directories(true);
    match service.try_call(request).await {
        Ok(response) => response.into_response(),
        Err(_) => (StatusCode::INTERNAL_SERVER_ERROR, "Server error").into_response(),
    }
}

/// Map a request path to a file, trying `index.html` and `.html` fallbacks.
///
/// Paths that could leave the output directory (`..`, absolute or prefixed
/// components) resolve to nothing.
fn resolve_request_path(output_dir: &Path, path: &str) -> Option<PathBuf> {
    let clean = path.trim_start_matches('/');
    if clean.is_empty() {
        return Some(output_dir.join("index.html"));
    }

    let inside = Path::new(clean)
        .components()
        .all(|c| matches!(c, Component::Normal(_) | Component::CurDir));
    if !inside {
        tracing::debug!("Rejected request path {:?}", path);
        return None;
    }

    let candidate = output_dir.join(clean);
    if candidate.is_dir() {
        return Some(candidate.join("index.html"));
    }
    if candidate.exists() {
        return Some(candidate);
    }

    let with_html = output_dir.join(format!("{}.html", clean));
    if with_html.exists() {
        Some(with_html)
    } else {
        Some(candidate)
    }
}

fn is_html(path: &Path) -> bool {
    path.extension()
        .map(|ext| ext == "html" || ext == "htm")
        .unwrap_or(false)
}

//! Shared utilities for integration tests.
#![allow(dead_code)]

use std::net::SocketAddr;
use std::path::Path;
use std::time::Duration;

use layout_service::config::ServiceConfig;
use layout_service::http::HttpServer;
use layout_service::lifecycle::Shutdown;
use serde_json::{json, Value};
use tempfile::TempDir;
use tokio::net::TcpListener;
use tokio::sync::mpsc;

/// A layout document whose route carries `name`.
pub fn route_document(name: &str, language: &str) -> Value {
    json!({
        "sitecore": {
            "context": {
                "pageEditing": false,
                "site": { "name": "website" },
                "language": language
            },
            "route": {
                "name": name,
                "placeholders": { "jss-main": [] }
            }
        }
    })
}

/// Write `document` to `<dir>/<stem>.json`.
pub fn write_route(dir: &Path, stem: &str, document: &Value) {
    std::fs::write(
        dir.join(format!("{stem}.json")),
        serde_json::to_vec_pretty(document).unwrap(),
    )
    .unwrap();
}

/// A data directory with an `en` home page, an `about-en` page and a `da` home page.
pub fn sample_routes() -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    write_route(dir.path(), "en", &route_document("home", "en"));
    write_route(dir.path(), "da", &route_document("forside", "da"));
    write_route(dir.path(), "about-en", &route_document("about", "en"));
    dir
}

/// Default config pointing at `data_dir`, bound to an ephemeral port.
pub fn config_for(data_dir: &Path) -> ServiceConfig {
    let mut config = ServiceConfig::default();
    config.listener.bind_address = "127.0.0.1:0".into();
    config.layout.data_dir = data_dir.to_string_lossy().into_owned();
    config
}

/// A server running in the background.
pub struct RunningServer {
    pub addr: SocketAddr,
    pub shutdown: Shutdown,
    pub config_tx: mpsc::UnboundedSender<ServiceConfig>,
}

impl RunningServer {
    pub fn url(&self, path_and_query: &str) -> String {
        format!("http://{}{}", self.addr, path_and_query)
    }
}

/// Start a layout server on an ephemeral loopback port.
pub async fn start_server(config: ServiceConfig) -> RunningServer {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let shutdown = Shutdown::new();
    let (config_tx, config_updates) = mpsc::unbounded_channel();
    let server = HttpServer::new(config);
    let server_shutdown = shutdown.subscribe();

    tokio::spawn(async move {
        let _ = server.run(listener, config_updates, server_shutdown).await;
    });

    tokio::time::sleep(Duration::from_millis(100)).await;

    RunningServer {
        addr,
        shutdown,
        config_tx,
    }
}

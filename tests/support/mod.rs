#![allow(dead_code)]

use std::{sync::Arc, time::Duration};

use axum::Router;
use recipe_client::{telemetry, HttpApi, RecipeApi};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

/// Serves `app` on an ephemeral local port and returns its base url.
pub async fn serve(app: Router) -> String {
    telemetry::init_test_tracing();
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let app = app.layer(TraceLayer::new_for_http());
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}")
}

pub fn api(base: &str) -> Arc<dyn RecipeApi> {
    Arc::new(HttpApi::new(base, Duration::from_secs(5)).unwrap())
}

/// Base url of a port nothing is listening on.
pub async fn dead_base() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{addr}")
}

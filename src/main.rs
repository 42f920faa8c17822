use clap::Parser;
use std::sync::Arc;
use tower_http::services::ServeDir;

use detection_viewer::adapters::{
    http::{router, state::HttpState},
    inference::client::HttpInferenceClient,
    preview::memory_store::InMemoryPreviewStore,
    raster::{canvas::RasterCanvas, font::load_label_font},
};
use detection_viewer::application::{interpreter::ResultInterpreter, services::ViewerService};
use detection_viewer::config::ViewerConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. Inicializar logs (RUST_LOG=info por defecto)
    if std::env::var("RUST_LOG").is_err() {
        std::env::set_var("RUST_LOG", "info");
    }
    tracing_subscriber::fmt::init();

    let config = ViewerConfig::parse();
    tracing::info!("🔧 Inicializando adaptadores de infraestructura...");

    // 2. Adaptadores (Capa de Infraestructura)
    let inference = Arc::new(HttpInferenceClient::new(config.inference_url.clone()));
    let previews = Arc::new(InMemoryPreviewStore::new());
    let canvas = Arc::new(RasterCanvas::new(load_label_font(config.font.as_deref())));

    // 3. Servicio (Capa de Aplicación)
    let viewer = Arc::new(ViewerService::new(
        inference,
        previews,
        canvas,
        ResultInterpreter::new(config.media_base.clone()),
    ));

    // 4. Router de Axum y archivos estáticos
    let state = HttpState { viewer: viewer.clone() };
    let app = router(state, config.max_upload_bytes())
        .fallback_service(ServeDir::new(&config.static_dir));

    // 5. Lanzar el servidor
    tracing::info!("🚀 Visor de detecciones iniciado en http://{}", config.bind);
    tracing::info!("🤖 Servicio de inferencia: {}", config.inference_url);
    tracing::info!("📂 Archivos estáticos servidos desde '{}'", config.static_dir.display());

    let listener = tokio::net::TcpListener::bind(config.bind).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
        })
        .await?;

    viewer.shutdown().await;
    Ok(())
}

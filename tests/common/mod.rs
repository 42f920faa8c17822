#![allow(dead_code)]

use async_trait::async_trait;
use image::{ImageFormat, Rgba, RgbaImage};
use std::io::Cursor;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Notify;

use detection_viewer::adapters::preview::memory_store::InMemoryPreviewStore;
use detection_viewer::adapters::raster::canvas::RasterCanvas;
use detection_viewer::application::dto::{PredictResponse, SessionView};
use detection_viewer::application::interpreter::ResultInterpreter;
use detection_viewer::application::ports::InferencePort;
use detection_viewer::application::services::ViewerService;
use detection_viewer::domain::errors::DomainResult;
use detection_viewer::domain::media::SelectedFile;

pub const BACKGROUND: Rgba<u8> = Rgba([40, 40, 40, 255]);

type Script = Box<dyn Fn() -> DomainResult<PredictResponse> + Send + Sync>;

/// Puerto de inferencia que responde desde un closure, opcionalmente tras una barrera.
pub struct ScriptedInference {
    script: Script,
    gate: Option<Arc<Notify>>,
    calls: AtomicUsize,
}

impl ScriptedInference {
    pub fn new(script: impl Fn() -> DomainResult<PredictResponse> + Send + Sync + 'static) -> Self {
        Self { script: Box::new(script), gate: None, calls: AtomicUsize::new(0) }
    }

    pub fn json(body: &'static str) -> Self {
        Self::new(move || Ok(serde_json::from_str(body).unwrap()))
    }

    pub fn gated(mut self, gate: Arc<Notify>) -> Self {
        self.gate = Some(gate);
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl InferencePort for ScriptedInference {
    async fn predict(&self, _file: &SelectedFile) -> DomainResult<PredictResponse> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(gate) = &self.gate {
            gate.notified().await;
        }
        (self.script)()
    }
}

pub struct Harness {
    pub viewer: Arc<ViewerService>,
    pub inference: Arc<ScriptedInference>,
    pub previews: Arc<InMemoryPreviewStore>,
}

pub fn harness(inference: ScriptedInference) -> Harness {
    let inference = Arc::new(inference);
    let previews = Arc::new(InMemoryPreviewStore::new());
    let viewer = Arc::new(ViewerService::new(
        inference.clone(),
        previews.clone(),
        Arc::new(RasterCanvas::new(None)),
        ResultInterpreter::new("http://localhost:3000"),
    ));
    Harness { viewer, inference, previews }
}

pub fn png_bytes(width: u32, height: u32) -> Vec<u8> {
    let mut buf = Vec::new();
    RgbaImage::from_pixel(width, height, BACKGROUND)
        .write_to(&mut Cursor::new(&mut buf), ImageFormat::Png)
        .unwrap();
    buf
}

pub fn png_file(name: &str, width: u32, height: u32) -> SelectedFile {
    SelectedFile::new(name, "image/png", png_bytes(width, height))
}

pub fn video_file(name: &str) -> SelectedFile {
    SelectedFile::new(name, "video/mp4", vec![0u8, 0, 0, 0x18, b'f', b't', b'y', b'p'])
}

/// Consulta la sesión hasta que se cumple `done` o pasan dos segundos.
pub async fn wait_for(viewer: &ViewerService, done: impl Fn(&SessionView) -> bool) -> SessionView {
    for _ in 0..200 {
        let view = viewer.session_view().await;
        if done(&view) {
            return view;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    panic!("session never reached the expected state");
}

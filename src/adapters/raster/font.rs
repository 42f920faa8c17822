use ab_glyph::FontArc;
use std::path::Path;
use tracing::{info, warn};

/// Fuentes sans-serif habituales, por orden de preferencia.
const SYSTEM_FONTS: &[&str] = &[
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/TTF/DejaVuSans.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
    "/usr/share/fonts/liberation/LiberationSans-Regular.ttf",
    "/Library/Fonts/Arial.ttf",
    "/System/Library/Fonts/Supplemental/Arial.ttf",
    "C:/Windows/Fonts/arial.ttf",
];

fn load_from(path: &Path) -> Option<FontArc> {
    let data = std::fs::read(path).ok()?;
    match FontArc::try_from_vec(data) {
        Ok(font) => Some(font),
        Err(e) => {
            warn!("Fuente inválida {}: {}", path.display(), e);
            None
        }
    }
}

/// Carga la fuente de las etiquetas: primero la indicada, luego las del sistema.
/// Sin fuente las cajas se dibujan igualmente, pero sin texto.
pub fn load_label_font(explicit: Option<&Path>) -> Option<FontArc> {
    if let Some(path) = explicit {
        if let Some(font) = load_from(path) {
            info!("🔤 Fuente de etiquetas: {}", path.display());
            return Some(font);
        }
        warn!("No se pudo cargar la fuente {}, probando las del sistema", path.display());
    }

    for candidate in SYSTEM_FONTS {
        if let Some(font) = load_from(Path::new(candidate)) {
            info!("🔤 Fuente de etiquetas: {}", candidate);
            return Some(font);
        }
    }

    warn!("⚠️ No se encontró ninguna fuente TTF: las etiquetas no se dibujarán");
    None
}

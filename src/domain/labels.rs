use serde::Serialize;
use std::borrow::Cow;

/// Tabla fija `class_id -> nombre` del modelo desplegado en el servicio.
pub const LABELS: &[(i64, &str)] = &[
    (0, "Person"),
    (1, "Bicycle"),
    (2, "Car"),
    (3, "Motorcycle"),
    (4, "Bus"),
    (5, "Truck"),
];

/// Color de trazo para cada etiqueta (comparación sin distinguir mayúsculas).
pub const LABEL_COLORS: &[(&str, OverlayColor)] = &[
    ("car", OverlayColor::Red),
    ("bus", OverlayColor::Green),
    ("person", OverlayColor::Orange),
    ("motorcycle", OverlayColor::Blue),
    ("bicycle", OverlayColor::Pink),
];

pub const DEFAULT_COLOR: OverlayColor = OverlayColor::Red;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OverlayColor {
    Red,
    Green,
    Orange,
    Blue,
    Pink,
}

impl OverlayColor {
    /// Mismos valores que los colores con nombre de CSS.
    pub fn rgb(self) -> [u8; 3] {
        match self {
            OverlayColor::Red => [255, 0, 0],
            OverlayColor::Green => [0, 128, 0],
            OverlayColor::Orange => [255, 165, 0],
            OverlayColor::Blue => [0, 0, 255],
            OverlayColor::Pink => [255, 192, 203],
        }
    }

    pub fn css_name(self) -> &'static str {
        match self {
            OverlayColor::Red => "red",
            OverlayColor::Green => "green",
            OverlayColor::Orange => "orange",
            OverlayColor::Blue => "blue",
            OverlayColor::Pink => "pink",
        }
    }
}

/// Resuelve el nombre legible de una clase. Nunca devuelve una cadena vacía:
/// los ids desconocidos se convierten en `"Class {id}"`.
pub fn resolve_label(class_id: i64) -> Cow<'static, str> {
    LABELS
        .iter()
        .find(|(id, _)| *id == class_id)
        .map(|(_, name)| Cow::Borrowed(*name))
        .unwrap_or_else(|| Cow::Owned(format!("Class {}", class_id)))
}

pub fn color_for_label(label: &str) -> OverlayColor {
    LABEL_COLORS
        .iter()
        .find(|(name, _)| name.eq_ignore_ascii_case(label))
        .map(|(_, color)| *color)
        .unwrap_or(DEFAULT_COLOR)
}

use serde::{Deserialize, Deserializer, Serialize};
use std::borrow::Cow;

use super::labels::resolve_label;

/// Una detección tal y como la devuelve el servicio de inferencia.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Detection {
    /// `[x1, y1, x2, y2]` en píxeles de la imagen original.
    pub bbox: [f32; 4],
    pub confidence: f32,
    #[serde(deserialize_with = "class_id_from_number")]
    pub class_id: i64,
}

impl Detection {
    pub fn bounding_box(&self) -> BoundingBox {
        let [x1, y1, x2, y2] = self.bbox;
        BoundingBox { x1, y1, x2, y2 }
    }

    pub fn label(&self) -> Cow<'static, str> {
        resolve_label(self.class_id)
    }
}

/// Rectángulo en coordenadas de píxel. Las esquinas no vienen ordenadas
/// necesariamente, así que ancho y alto pueden ser negativos.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub x1: f32,
    pub y1: f32,
    pub x2: f32,
    pub y2: f32,
}

impl BoundingBox {
    pub fn width(&self) -> f32 {
        self.x2 - self.x1
    }

    pub fn height(&self) -> f32 {
        self.y2 - self.y1
    }
}

// El servicio de inferencia serializa los ids de clase como flotantes ("2.0").
#[derive(Deserialize)]
#[serde(untagged)]
enum RawClassId {
    Int(i64),
    Float(f64),
}

fn class_id_from_number<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match RawClassId::deserialize(deserializer)? {
        RawClassId::Int(id) => id,
        RawClassId::Float(id) => id.trunc() as i64,
    })
}

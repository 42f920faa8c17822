use serde::{Deserialize, Serialize};

use super::detection::Detection;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryEntry {
    pub label: String,
    pub count: usize,
}

/// Conteo de detecciones por etiqueta, en el orden en que aparece cada etiqueta.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DetectionSummary {
    entries: Vec<SummaryEntry>,
}

impl DetectionSummary {
    pub fn from_detections(detections: &[Detection]) -> Self {
        let mut entries: Vec<SummaryEntry> = Vec::new();
        for det in detections {
            let label = det.label();
            match entries.iter_mut().find(|e| e.label == label) {
                Some(entry) => entry.count += 1,
                None => entries.push(SummaryEntry { label: label.into_owned(), count: 1 }),
            }
        }
        Self { entries }
    }

    pub fn entries(&self) -> &[SummaryEntry] {
        &self.entries
    }

    pub fn count(&self, label: &str) -> Option<usize> {
        self.entries.iter().find(|e| e.label == label).map(|e| e.count)
    }

    pub fn total(&self) -> usize {
        self.entries.iter().map(|e| e.count).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Línea compacta para los logs, p.ej. `"Car: 2, Person: 1"`.
pub fn summarize_detections(detections: &[Detection]) -> String {
    DetectionSummary::from_detections(detections)
        .entries
        .iter()
        .map(|e| format!("{}: {}", e.label, e.count))
        .collect::<Vec<_>>()
        .join(", ")
}

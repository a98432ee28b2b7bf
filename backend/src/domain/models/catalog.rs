//! Immutable reference-data catalogs, loaded once per session.
//!
//! The entry lists are ordered array snapshots of the source files. Position
//! matters: the subsequent-exposure rule relies on a variant being listed
//! immediately after its principal study, so the catalogs are never mutated
//! after load.

use crate::domain::text;

/// A flattened practice entry (chapter data denormalized onto each row).
#[derive(Debug, Clone, PartialEq)]
pub struct PracticeEntry {
    pub codigo: String,
    pub descripcion: String,
    pub capitulo: String,
    pub capitulo_nombre: String,
    /// Delegated per-practice honorarium rate, when the catalog carries one
    pub galeno: Option<f64>,
    /// Delegated per-practice facility-cost rate
    pub gasto: Option<f64>,
}

impl PracticeEntry {
    /// X-ray studies are priced from the agreement's Rx concepts rather
    /// than per-practice rates. Subsequent-exposure variants are repeat
    /// X-ray exposures, so they count even when the description omits "rx".
    pub fn is_xray(&self) -> bool {
        text::contains_normalized(&self.descripcion, "radiograf")
            || text::contains_normalized(&self.descripcion, "rx")
            || self.is_subsequent_exposure()
    }

    /// Repeat-exposure billing variant, conventionally listed immediately
    /// after its principal study.
    pub fn is_subsequent_exposure(&self) -> bool {
        text::contains_normalized(&self.descripcion, "subsiguiente")
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SurgeryEntry {
    pub codigo: String,
    pub descripcion: String,
    pub region: String,
    pub region_nombre: String,
    pub complejidad: u8,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LabEntry {
    pub codigo: String,
    pub descripcion: String,
    /// Bioquímica unit-value multiplier for this study
    pub unidad_bioquimica: f64,
}

/// Ordered, immutable practice catalog.
#[derive(Debug, Clone, Default)]
pub struct PracticeCatalog {
    entries: Vec<PracticeEntry>,
}

impl PracticeCatalog {
    pub fn new(entries: Vec<PracticeEntry>) -> Self {
        Self { entries }
    }

    pub fn entries(&self) -> &[PracticeEntry] {
        &self.entries
    }

    pub fn get(&self, index: usize) -> Option<&PracticeEntry> {
        self.entries.get(index)
    }

    pub fn position_of(&self, codigo: &str) -> Option<usize> {
        self.entries.iter().position(|e| e.codigo == codigo)
    }

    pub fn find(&self, codigo: &str) -> Option<&PracticeEntry> {
        self.entries.iter().find(|e| e.codigo == codigo)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Ordered, immutable surgery catalog.
#[derive(Debug, Clone, Default)]
pub struct SurgeryCatalog {
    entries: Vec<SurgeryEntry>,
}

impl SurgeryCatalog {
    pub fn new(entries: Vec<SurgeryEntry>) -> Self {
        Self { entries }
    }

    pub fn entries(&self) -> &[SurgeryEntry] {
        &self.entries
    }

    pub fn find(&self, codigo: &str) -> Option<&SurgeryEntry> {
        self.entries.iter().find(|e| e.codigo == codigo)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Ordered, immutable lab-study catalog.
#[derive(Debug, Clone, Default)]
pub struct LabCatalog {
    entries: Vec<LabEntry>,
}

impl LabCatalog {
    pub fn new(entries: Vec<LabEntry>) -> Self {
        Self { entries }
    }

    pub fn entries(&self) -> &[LabEntry] {
        &self.entries
    }

    pub fn find(&self, codigo: &str) -> Option<&LabEntry> {
        self.entries.iter().find(|e| e.codigo == codigo)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn practice(codigo: &str, descripcion: &str) -> PracticeEntry {
        PracticeEntry {
            codigo: codigo.to_string(),
            descripcion: descripcion.to_string(),
            capitulo: "34".to_string(),
            capitulo_nombre: "Radiología".to_string(),
            galeno: None,
            gasto: None,
        }
    }

    #[test]
    fn test_xray_detection() {
        assert!(practice("34.01.01", "RADIOGRAFÍA DE TÓRAX").is_xray());
        assert!(practice("34.02.01", "Rx de columna lumbar").is_xray());
        assert!(practice("34.01.02", "POR EXPOSICIÓN SUBSIGUIENTE").is_xray());
        assert!(!practice("18.01.01", "CONSULTA EN CONSULTORIO").is_xray());
    }

    #[test]
    fn test_subsequent_exposure_detection() {
        assert!(practice("34.01.02", "POR EXPOSICIÓN SUBSIGUIENTE").is_subsequent_exposure());
        assert!(!practice("34.01.01", "RADIOGRAFÍA DE TÓRAX").is_subsequent_exposure());
    }

    #[test]
    fn test_position_lookup() {
        let catalog = PracticeCatalog::new(vec![
            practice("34.01.01", "RADIOGRAFIA DE TORAX"),
            practice("34.01.02", "POR EXPOSICION SUBSIGUIENTE"),
        ]);

        assert_eq!(catalog.position_of("34.01.02"), Some(1));
        assert_eq!(catalog.position_of("99.99.99"), None);
        assert_eq!(catalog.get(0).unwrap().codigo, "34.01.01");
    }
}

//! Reference catalog loading and positional code linking.
//!
//! Catalogs are parsed once at session start from the JSON files the
//! application ships with, flattened into ordered immutable snapshots, and
//! shared read-only with every calculator. The subsequent-exposure rule in
//! [`CatalogService::with_subsequent_exposure`] depends on that ordering
//! staying stable for the session's lifetime.

use crate::domain::models::catalog::{
    LabCatalog, LabEntry, PracticeCatalog, PracticeEntry, SurgeryCatalog, SurgeryEntry,
};
use crate::domain::numeric;
use anyhow::{Context, Result};
use log::{debug, info};
use serde_json::Value;
use std::sync::Arc;

/// The three catalogs a session works against, shared read-only.
#[derive(Clone, Default)]
pub struct CatalogSet {
    pub practices: Arc<PracticeCatalog>,
    pub surgeries: Arc<SurgeryCatalog>,
    pub labs: Arc<LabCatalog>,
}

/// Stateless loader and linker for reference catalogs.
#[derive(Clone, Default)]
pub struct CatalogService;

impl CatalogService {
    pub fn new() -> Self {
        Self
    }

    /// Parse the practice nomenclature file (an array of chapters) into a
    /// flattened catalog, coercing delegated rate fields at load time.
    pub fn load_practices(&self, json: &str) -> Result<PracticeCatalog> {
        let chapters: Vec<shared::PracticeChapter> =
            serde_json::from_str(json).context("Failed to parse practice catalog")?;

        let mut entries = Vec::new();
        for chapter in &chapters {
            let capitulo = value_to_label(&chapter.capitulo);
            for practice in &chapter.practicas {
                entries.push(PracticeEntry {
                    codigo: practice.codigo.clone(),
                    descripcion: practice.descripcion.clone(),
                    capitulo: capitulo.clone(),
                    capitulo_nombre: chapter.descripcion.clone(),
                    galeno: numeric::coerce_value(&practice.q_gal),
                    gasto: numeric::coerce_value(&practice.gto),
                });
            }
        }

        info!(
            "Loaded {} practice entries from {} chapters",
            entries.len(),
            chapters.len()
        );
        Ok(PracticeCatalog::new(entries))
    }

    /// Parse the surgery catalog, denormalizing region and complexity onto
    /// each entry.
    pub fn load_surgeries(&self, json: &str) -> Result<SurgeryCatalog> {
        let file: shared::SurgeryCatalogFile =
            serde_json::from_str(json).context("Failed to parse surgery catalog")?;

        let mut entries = Vec::new();
        for region in &file.practicas {
            for surgery in &region.practicas {
                entries.push(SurgeryEntry {
                    codigo: surgery.codigo.clone(),
                    descripcion: surgery.descripcion.clone(),
                    region: region.region.clone(),
                    region_nombre: region.region_nombre.clone(),
                    complejidad: region.complejidad,
                });
            }
        }

        info!("Loaded {} surgery entries", entries.len());
        Ok(SurgeryCatalog::new(entries))
    }

    /// Parse the lab-study catalog. Studies whose unit value cannot be
    /// coerced load with multiplier zero rather than being dropped, so they
    /// remain searchable and surface a zero-fee warning when billed.
    pub fn load_labs(&self, json: &str) -> Result<LabCatalog> {
        let file: shared::LabCatalogFile =
            serde_json::from_str(json).context("Failed to parse lab catalog")?;

        let entries: Vec<LabEntry> = file
            .practicas
            .iter()
            .map(|lab| LabEntry {
                codigo: lab.codigo.clone(),
                descripcion: lab.practica_bioquimica.clone(),
                unidad_bioquimica: numeric::coerce_value(&lab.unidad_bioquimica).unwrap_or(0.0),
            })
            .collect();

        info!("Loaded {} lab entries", entries.len());
        Ok(LabCatalog::new(entries))
    }

    /// Expand a matched practice to include its subsequent-exposure partner.
    ///
    /// Adjacency is positional in the source catalog: a variant is listed
    /// immediately after its principal study. If the matched entry is itself
    /// a variant, its immediate predecessor is prepended; if the immediate
    /// successor is a variant, it is appended. When the positional
    /// assumption does not hold, the matched entry is returned alone.
    pub fn with_subsequent_exposure<'a>(
        &self,
        catalog: &'a PracticeCatalog,
        index: usize,
    ) -> Vec<&'a PracticeEntry> {
        let Some(entry) = catalog.get(index) else {
            return Vec::new();
        };

        let mut linked: Vec<&PracticeEntry> = Vec::with_capacity(2);
        if entry.is_subsequent_exposure() {
            match index.checked_sub(1).and_then(|i| catalog.get(i)) {
                Some(principal) => linked.push(principal),
                None => debug!(
                    "Subsequent-exposure entry {} has no predecessor; returning it alone",
                    entry.codigo
                ),
            }
            linked.push(entry);
        } else {
            linked.push(entry);
            if let Some(next) = catalog.get(index + 1) {
                if next.is_subsequent_exposure() {
                    linked.push(next);
                }
            }
        }

        // De-duplicate by code, preserving catalog order.
        let mut seen: Vec<&str> = Vec::with_capacity(linked.len());
        linked.retain(|e| {
            if seen.contains(&e.codigo.as_str()) {
                false
            } else {
                seen.push(e.codigo.as_str());
                true
            }
        });
        linked
    }
}

fn value_to_label(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        _ => String::new(),
    }
}

//! Shared DTO types for the clinic billing application.
//!
//! These structs mirror the external data shapes the computation core
//! exchanges with its collaborators: the reference catalogs (JSON files
//! shipped with the application), the agreement (convenio) records coming
//! from the realtime store, and the persisted invoice shape the persistence
//! layer writes back. They carry no business logic; all coercion and
//! computation happens in the backend domain layer.

use serde::{Deserialize, Serialize};
use serde_json::Value;

// ---------------------------------------------------------------------------
// Reference catalogs
// ---------------------------------------------------------------------------

/// One chapter of the practice nomenclature catalog.
///
/// The catalog file is an array of these chapters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PracticeChapter {
    /// Chapter number; a number in some catalog revisions, a string in others
    #[serde(default)]
    pub capitulo: Value,
    /// Chapter display name
    #[serde(default)]
    pub descripcion: String,
    #[serde(default)]
    pub practicas: Vec<PracticeRecord>,
}

/// One billable practice within a chapter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PracticeRecord {
    pub codigo: String,
    pub descripcion: String,
    /// Optional per-practice honorarium rate (delegated pricing); may be a
    /// number or a localized string with separators
    #[serde(default)]
    pub q_gal: Value,
    /// Optional per-practice facility-cost rate, same caveats as `q_gal`
    #[serde(default)]
    pub gto: Value,
}

/// Surgery catalog file: regions grouped by anatomical area and complexity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SurgeryCatalogFile {
    #[serde(default)]
    pub practicas: Vec<SurgeryRegion>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SurgeryRegion {
    #[serde(default)]
    pub region: String,
    #[serde(default)]
    pub region_nombre: String,
    /// Complexity tier for every surgery listed under this region
    pub complejidad: u8,
    #[serde(default)]
    pub practicas: Vec<SurgeryRecord>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SurgeryRecord {
    pub codigo: String,
    pub descripcion: String,
}

/// Lab study catalog file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabCatalogFile {
    #[serde(default)]
    pub practicas: Vec<LabRecord>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabRecord {
    pub codigo: String,
    /// Study display name
    #[serde(default)]
    pub practica_bioquimica: String,
    /// Unit-value multiplier; may be a number or a localized string
    #[serde(default)]
    pub unidad_bioquimica: Value,
}

// ---------------------------------------------------------------------------
// Agreement (convenio) records
// ---------------------------------------------------------------------------

/// Raw agreement record as stored in the realtime store, keyed by agreement
/// name. Field names inside `valores_generales` vary across historical
/// revisions; the backend resolves them through an alias table.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AgreementRecord {
    /// Fee-concept name -> numeric-or-string value
    #[serde(default)]
    pub valores_generales: serde_json::Map<String, Value>,
    /// Surgical fee table, ordered by complexity tier starting at tier 1
    #[serde(default)]
    pub honorarios_medicos: Vec<SurgicalTierRecord>,
}

/// One row of the surgical fee table. Values are loosely typed like the
/// rest of the agreement record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SurgicalTierRecord {
    #[serde(default, alias = "Cirujano")]
    pub cirujano: Value,
    #[serde(default, alias = "Ayudante_1")]
    pub ayudante_1: Value,
    #[serde(default, alias = "Ayudante_2")]
    pub ayudante_2: Value,
}

// ---------------------------------------------------------------------------
// Persisted invoice
// ---------------------------------------------------------------------------

/// Invoice shape written by the persistence collaborator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersistedInvoice {
    pub paciente: PersistedPatient,
    pub practicas: Vec<PersistedLineItem>,
    pub cirugias: Vec<PersistedLineItem>,
    pub laboratorios: Vec<PersistedLineItem>,
    pub medicamentos: Vec<PersistedLineItem>,
    pub descartables: Vec<PersistedLineItem>,
    pub totales: PersistedTotals,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PersistedPatient {
    pub nombre: String,
    pub documento: String,
    /// Name of the agreement the invoice was priced under
    pub convenio: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersistedLineItem {
    pub id: String,
    /// Items generated together (e.g. surgeon + assistants) share a group
    pub grupo: String,
    pub codigo: String,
    pub descripcion: String,
    /// Free-text provider name ("Cirujano", a doctor's name, ...)
    pub prestador: String,
    pub cantidad: f64,
    pub honorario: f64,
    pub gasto: f64,
    pub total: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PersistedTotals {
    pub honorarios: f64,
    pub gastos: f64,
    pub total: f64,
}

//! Domain model for an invoice under construction.

use crate::domain::models::line_item::{LineItem, LineItemCategory};
use chrono::Local;

/// Patient metadata carried on the invoice header.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Patient {
    pub nombre: String,
    pub documento: String,
    /// Name of the agreement the invoice is being priced under
    pub convenio: String,
}

/// Invoice-level totals. `total` is always `honorarios + gastos`.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Totals {
    pub honorarios: f64,
    pub gastos: f64,
    pub total: f64,
}

/// The five line-item collections plus patient metadata. Mutated only
/// through the invoice service.
#[derive(Debug, Clone, PartialEq)]
pub struct Invoice {
    pub paciente: Patient,
    /// RFC 3339 creation timestamp
    pub created_at: String,
    pub practicas: Vec<LineItem>,
    pub cirugias: Vec<LineItem>,
    pub laboratorios: Vec<LineItem>,
    pub medicamentos: Vec<LineItem>,
    pub descartables: Vec<LineItem>,
}

impl Invoice {
    pub fn new(paciente: Patient) -> Self {
        Self {
            paciente,
            created_at: Local::now().to_rfc3339(),
            practicas: Vec::new(),
            cirugias: Vec::new(),
            laboratorios: Vec::new(),
            medicamentos: Vec::new(),
            descartables: Vec::new(),
        }
    }

    pub fn collection(&self, category: LineItemCategory) -> &Vec<LineItem> {
        match category {
            LineItemCategory::Practice => &self.practicas,
            LineItemCategory::Surgery => &self.cirugias,
            LineItemCategory::Lab => &self.laboratorios,
            LineItemCategory::Medication => &self.medicamentos,
            LineItemCategory::Disposable => &self.descartables,
        }
    }

    pub fn collection_mut(&mut self, category: LineItemCategory) -> &mut Vec<LineItem> {
        match category {
            LineItemCategory::Practice => &mut self.practicas,
            LineItemCategory::Surgery => &mut self.cirugias,
            LineItemCategory::Lab => &mut self.laboratorios,
            LineItemCategory::Medication => &mut self.medicamentos,
            LineItemCategory::Disposable => &mut self.descartables,
        }
    }

    /// All line items across the five collections.
    pub fn items(&self) -> impl Iterator<Item = &LineItem> {
        self.practicas
            .iter()
            .chain(self.cirugias.iter())
            .chain(self.laboratorios.iter())
            .chain(self.medicamentos.iter())
            .chain(self.descartables.iter())
    }

    pub fn find(&self, item_id: &str) -> Option<&LineItem> {
        self.items().find(|item| item.id == item_id)
    }

    pub fn find_mut(&mut self, item_id: &str) -> Option<&mut LineItem> {
        self.practicas
            .iter_mut()
            .chain(self.cirugias.iter_mut())
            .chain(self.laboratorios.iter_mut())
            .chain(self.medicamentos.iter_mut())
            .chain(self.descartables.iter_mut())
            .find(|item| item.id == item_id)
    }

    pub fn item_count(&self) -> usize {
        self.items().count()
    }
}

//! Invoice aggregation service.
//!
//! Owns the invoice under construction and is the only component that
//! mutates it after creation. Every operation leaves the invoice in a state
//! where the grand total equals the sum of every line item's total, and
//! `total == honorario + gasto` holds for each item.

use crate::domain::errors::FeeWarning;
use crate::domain::models::invoice::{Invoice, Patient, Totals};
use crate::domain::models::line_item::{LineItem, LineItemCategory};
use anyhow::{anyhow, Result};
use log::{info, warn};

/// Outcome of a quantity edit: the updated item plus a clamping warning
/// when the requested value was invalid.
#[derive(Debug, Clone, PartialEq)]
pub struct QuantityUpdate {
    pub item: LineItem,
    pub warning: Option<FeeWarning>,
}

pub struct InvoiceService {
    invoice: Invoice,
}

impl InvoiceService {
    pub fn new(paciente: Patient) -> Self {
        Self {
            invoice: Invoice::new(paciente),
        }
    }

    pub fn invoice(&self) -> &Invoice {
        &self.invoice
    }

    /// Append a line item to the collection for its category. The only
    /// validation is a positive quantity; pricing concerns were settled by
    /// the fee services.
    pub fn add_item(&mut self, item: LineItem) -> Result<()> {
        if !(item.cantidad > 0.0) {
            return Err(anyhow!(
                "Line item {} has non-positive quantity {}",
                item.id,
                item.cantidad
            ));
        }
        info!(
            "Adding {} item {} ({}) for {}",
            category_label(item.category),
            item.codigo,
            item.descripcion,
            item.total
        );
        self.invoice.collection_mut(item.category).push(item);
        Ok(())
    }

    pub fn add_items(&mut self, items: Vec<LineItem>) -> Result<()> {
        for item in items {
            self.add_item(item)?;
        }
        Ok(())
    }

    /// Change an item's quantity, clamping to its category minimum.
    ///
    /// Practices, surgeries and labs round to whole units; medications and
    /// disposables keep decimals. Amounts are recomputed from the per-unit
    /// basis captured at creation, so the edit is idempotent and the unit
    /// price never drifts.
    pub fn set_quantity(&mut self, item_id: &str, cantidad: f64) -> Result<QuantityUpdate> {
        let item = self
            .invoice
            .find_mut(item_id)
            .ok_or_else(|| anyhow!("Line item {} not found", item_id))?;

        let minimum = item.category.minimum_quantity();
        let (target, warning) = if !cantidad.is_finite() {
            (minimum, Some(FeeWarning::InvalidQuantity { requested: cantidad, minimum }))
        } else if item.category.integer_quantity() {
            let rounded = cantidad.round();
            if rounded < minimum {
                (minimum, Some(FeeWarning::InvalidQuantity { requested: cantidad, minimum }))
            } else {
                (rounded, None)
            }
        } else if cantidad < minimum {
            (minimum, Some(FeeWarning::InvalidQuantity { requested: cantidad, minimum }))
        } else {
            (cantidad, None)
        };

        if let Some(w) = &warning {
            warn!("Quantity for item {} clamped: {}", item_id, w);
        }
        item.set_quantity(target);

        Ok(QuantityUpdate {
            item: item.clone(),
            warning,
        })
    }

    /// Free-text metadata update; no recomputation.
    pub fn update_provider_name(&mut self, item_id: &str, prestador: &str) -> Result<()> {
        let item = self
            .invoice
            .find_mut(item_id)
            .ok_or_else(|| anyhow!("Line item {} not found", item_id))?;
        item.prestador = prestador.to_string();
        Ok(())
    }

    /// Remove an item from its collection, returning it.
    pub fn remove_item(&mut self, item_id: &str) -> Result<LineItem> {
        for category in [
            LineItemCategory::Practice,
            LineItemCategory::Surgery,
            LineItemCategory::Lab,
            LineItemCategory::Medication,
            LineItemCategory::Disposable,
        ] {
            let collection = self.invoice.collection_mut(category);
            if let Some(position) = collection.iter().position(|i| i.id == item_id) {
                return Ok(collection.remove(position));
            }
        }
        Err(anyhow!("Line item {} not found", item_id))
    }

    /// Discard all line items, keeping the patient header.
    pub fn reset(&mut self) {
        info!("Resetting invoice for {}", self.invoice.paciente.nombre);
        self.invoice = Invoice::new(self.invoice.paciente.clone());
    }

    pub fn section_subtotal(&self, category: LineItemCategory) -> f64 {
        self.invoice
            .collection(category)
            .iter()
            .map(|item| item.total)
            .sum()
    }

    /// Invoice-level totals, recomputed from the line items.
    pub fn grand_totals(&self) -> Totals {
        let honorarios: f64 = self.invoice.items().map(|item| item.honorario).sum();
        let gastos: f64 = self.invoice.items().map(|item| item.gasto).sum();
        Totals {
            honorarios,
            gastos,
            total: honorarios + gastos,
        }
    }

    /// Map the invoice into the shape the persistence collaborator writes.
    pub fn to_persisted(&self) -> shared::PersistedInvoice {
        let totals = self.grand_totals();
        shared::PersistedInvoice {
            paciente: shared::PersistedPatient {
                nombre: self.invoice.paciente.nombre.clone(),
                documento: self.invoice.paciente.documento.clone(),
                convenio: self.invoice.paciente.convenio.clone(),
            },
            practicas: to_persisted_items(&self.invoice.practicas),
            cirugias: to_persisted_items(&self.invoice.cirugias),
            laboratorios: to_persisted_items(&self.invoice.laboratorios),
            medicamentos: to_persisted_items(&self.invoice.medicamentos),
            descartables: to_persisted_items(&self.invoice.descartables),
            totales: shared::PersistedTotals {
                honorarios: totals.honorarios,
                gastos: totals.gastos,
                total: totals.total,
            },
        }
    }
}

fn to_persisted_items(items: &[LineItem]) -> Vec<shared::PersistedLineItem> {
    items
        .iter()
        .map(|item| shared::PersistedLineItem {
            id: item.id.clone(),
            grupo: item.group_id.clone(),
            codigo: item.codigo.clone(),
            descripcion: item.descripcion.clone(),
            prestador: item.prestador.clone(),
            cantidad: item.cantidad,
            honorario: item.honorario,
            gasto: item.gasto,
            total: item.total,
        })
        .collect()
}

fn category_label(category: LineItemCategory) -> &'static str {
    match category {
        LineItemCategory::Practice => "practice",
        LineItemCategory::Surgery => "surgery",
        LineItemCategory::Lab => "lab",
        LineItemCategory::Medication => "medication",
        LineItemCategory::Disposable => "disposable",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_service() -> InvoiceService {
        InvoiceService::new(Patient {
            nombre: "Juan Pérez".to_string(),
            documento: "28.456.789".to_string(),
            convenio: "OSDE".to_string(),
        })
    }

    fn practice_item(honorario: f64, gasto: f64) -> LineItem {
        LineItem::split(
            LineItemCategory::Practice,
            "34.01.01",
            "RADIOGRAFIA DE TORAX",
            "",
            honorario,
            gasto,
            "g1",
        )
    }

    fn medication_item(unit_price: f64, cantidad: f64) -> LineItem {
        LineItem::undifferentiated(
            LineItemCategory::Medication,
            "M-001",
            "IBUPROFENO 600",
            unit_price,
            cantidad,
        )
    }

    /// Independent recomputation of the grand total for reconciliation checks.
    fn sum_of_item_totals(service: &InvoiceService) -> f64 {
        service.invoice().items().map(|i| i.total).sum()
    }

    #[test]
    fn test_add_routes_by_category() {
        let mut service = create_test_service();
        service.add_item(practice_item(500.0, 1000.0)).unwrap();
        service.add_item(medication_item(120.5, 2.0)).unwrap();

        assert_eq!(service.invoice().practicas.len(), 1);
        assert_eq!(service.invoice().medicamentos.len(), 1);
        assert_eq!(service.invoice().cirugias.len(), 0);
    }

    #[test]
    fn test_add_rejects_non_positive_quantity() {
        let mut service = create_test_service();
        let mut item = practice_item(500.0, 1000.0);
        item.set_quantity(0.0);

        assert!(service.add_item(item).is_err());
    }

    #[test]
    fn test_set_quantity_rescales_all_fields() {
        let mut service = create_test_service();
        service.add_item(practice_item(500.0, 1000.0)).unwrap();
        let id = service.invoice().practicas[0].id.clone();

        let update = service.set_quantity(&id, 3.0).unwrap();
        assert!(update.warning.is_none());
        assert_eq!(update.item.honorario, 1500.0);
        assert_eq!(update.item.gasto, 3000.0);
        assert_eq!(update.item.total, 4500.0);
        assert_eq!(update.item.total, update.item.honorario + update.item.gasto);
    }

    #[test]
    fn test_set_quantity_idempotent_and_unit_price_stable() {
        let mut service = create_test_service();
        service.add_item(practice_item(500.0, 1000.0)).unwrap();
        let id = service.invoice().practicas[0].id.clone();

        let first = service.set_quantity(&id, 4.0).unwrap();
        let second = service.set_quantity(&id, 4.0).unwrap();
        assert_eq!(first.item, second.item);

        // Any edit sequence keeps the implied unit price at 1500.
        for cantidad in [2.0, 9.0, 1.0, 6.0] {
            let update = service.set_quantity(&id, cantidad).unwrap();
            assert_eq!(update.item.total / update.item.cantidad, 1500.0);
        }
    }

    #[test]
    fn test_set_quantity_rounds_whole_unit_categories() {
        let mut service = create_test_service();
        service.add_item(practice_item(500.0, 1000.0)).unwrap();
        let id = service.invoice().practicas[0].id.clone();

        let update = service.set_quantity(&id, 2.4).unwrap();
        assert_eq!(update.item.cantidad, 2.0);
        assert!(update.warning.is_none());
    }

    #[test]
    fn test_set_quantity_clamps_below_minimum_with_warning() {
        let mut service = create_test_service();
        service.add_item(practice_item(500.0, 1000.0)).unwrap();
        let id = service.invoice().practicas[0].id.clone();

        let update = service.set_quantity(&id, 0.2).unwrap();
        assert_eq!(update.item.cantidad, 1.0);
        assert!(matches!(update.warning, Some(FeeWarning::InvalidQuantity { .. })));

        let update = service.set_quantity(&id, f64::NAN).unwrap();
        assert_eq!(update.item.cantidad, 1.0);
        assert!(update.warning.is_some());
    }

    #[test]
    fn test_set_quantity_preserves_decimals_for_supplies() {
        let mut service = create_test_service();
        service.add_item(medication_item(120.5, 1.0)).unwrap();
        let id = service.invoice().medicamentos[0].id.clone();

        let update = service.set_quantity(&id, 2.5).unwrap();
        assert_eq!(update.item.cantidad, 2.5);
        assert_eq!(update.item.total, 301.25);
        assert!(update.warning.is_none());
    }

    #[test]
    fn test_update_provider_name_only_touches_metadata() {
        let mut service = create_test_service();
        service.add_item(practice_item(500.0, 1000.0)).unwrap();
        let id = service.invoice().practicas[0].id.clone();
        let total_before = service.grand_totals().total;

        service.update_provider_name(&id, "Dra. Gómez").unwrap();
        assert_eq!(service.invoice().practicas[0].prestador, "Dra. Gómez");
        assert_eq!(service.grand_totals().total, total_before);
    }

    #[test]
    fn test_remove_item() {
        let mut service = create_test_service();
        service.add_item(practice_item(500.0, 1000.0)).unwrap();
        let id = service.invoice().practicas[0].id.clone();

        let removed = service.remove_item(&id).unwrap();
        assert_eq!(removed.id, id);
        assert_eq!(service.invoice().item_count(), 0);
        assert!(service.remove_item(&id).is_err());
    }

    #[test]
    fn test_totals_reconcile_after_any_operation_sequence() {
        let mut service = create_test_service();
        service.add_item(practice_item(500.0, 1000.0)).unwrap();
        service.add_item(practice_item(200.0, 100.0)).unwrap();
        service.add_item(medication_item(120.5, 2.0)).unwrap();
        let practice_id = service.invoice().practicas[0].id.clone();
        let med_id = service.invoice().medicamentos[0].id.clone();

        service.set_quantity(&practice_id, 3.0).unwrap();
        service.set_quantity(&med_id, 0.5).unwrap();
        let second_practice = service.invoice().practicas[1].id.clone();
        service.remove_item(&second_practice).unwrap();
        service.set_quantity(&practice_id, 2.0).unwrap();

        let totals = service.grand_totals();
        assert!((totals.total - sum_of_item_totals(&service)).abs() < 1e-9);
        assert!((totals.total - (totals.honorarios + totals.gastos)).abs() < 1e-9);
    }

    #[test]
    fn test_section_subtotals() {
        let mut service = create_test_service();
        service.add_item(practice_item(500.0, 1000.0)).unwrap();
        service.add_item(medication_item(100.0, 2.0)).unwrap();

        assert_eq!(service.section_subtotal(LineItemCategory::Practice), 1500.0);
        assert_eq!(service.section_subtotal(LineItemCategory::Medication), 200.0);
        assert_eq!(service.section_subtotal(LineItemCategory::Surgery), 0.0);
    }

    #[test]
    fn test_reset_keeps_patient() {
        let mut service = create_test_service();
        service.add_item(practice_item(500.0, 1000.0)).unwrap();

        service.reset();
        assert_eq!(service.invoice().item_count(), 0);
        assert_eq!(service.invoice().paciente.nombre, "Juan Pérez");
    }

    #[test]
    fn test_to_persisted_shape() {
        let mut service = create_test_service();
        service.add_item(practice_item(500.0, 1000.0)).unwrap();
        service.add_item(medication_item(120.5, 2.0)).unwrap();

        let persisted = service.to_persisted();
        assert_eq!(persisted.paciente.convenio, "OSDE");
        assert_eq!(persisted.practicas.len(), 1);
        assert_eq!(persisted.medicamentos.len(), 1);
        assert_eq!(persisted.practicas[0].total, 1500.0);
        assert_eq!(persisted.totales.total, 1741.0);
        assert_eq!(
            persisted.totales.total,
            persisted.totales.honorarios + persisted.totales.gastos
        );
    }
}

//! Domain model for an invoice line item.

use std::time::{SystemTime, UNIX_EPOCH};

/// Billing category, fixed at item creation. Carried explicitly instead of
/// being re-derived from provider-name strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineItemCategory {
    Practice,
    Surgery,
    Lab,
    Medication,
    Disposable,
}

impl LineItemCategory {
    /// Practices, surgeries and labs are billed in whole units; medications
    /// and disposables may be fractional (half an ampoule, 0.5 m of gauze).
    pub fn integer_quantity(&self) -> bool {
        matches!(
            self,
            LineItemCategory::Practice | LineItemCategory::Surgery | LineItemCategory::Lab
        )
    }

    /// Smallest quantity an item of this category may hold.
    pub fn minimum_quantity(&self) -> f64 {
        if self.integer_quantity() {
            1.0
        } else {
            0.01
        }
    }

    fn id_prefix(&self) -> &'static str {
        match self {
            LineItemCategory::Practice => "pra",
            LineItemCategory::Surgery => "cir",
            LineItemCategory::Lab => "lab",
            LineItemCategory::Medication => "med",
            LineItemCategory::Disposable => "des",
        }
    }
}

/// One billable entry within an invoice.
///
/// `honorario`, `gasto` and `total` always describe the current quantity;
/// the per-unit basis is captured once at creation so quantity edits can
/// never drift the implied unit price. The invariant
/// `total == honorario + gasto` holds for every item (undifferentiated
/// items carry their full amount on the `gasto` side).
#[derive(Debug, Clone, PartialEq)]
pub struct LineItem {
    pub id: String,
    /// Items generated together (surgeon + assistants, principal study +
    /// subsequent exposure) share a group id
    pub group_id: String,
    pub codigo: String,
    pub descripcion: String,
    pub category: LineItemCategory,
    /// Free-text provider name, editable after creation
    pub prestador: String,
    pub cantidad: f64,
    pub honorario: f64,
    pub gasto: f64,
    pub total: f64,
    unit_honorario: f64,
    unit_gasto: f64,
}

impl LineItem {
    /// Item with a doctor/facility fee split, quantity 1.
    pub fn split(
        category: LineItemCategory,
        codigo: &str,
        descripcion: &str,
        prestador: &str,
        honorario: f64,
        gasto: f64,
        group_id: &str,
    ) -> Self {
        Self {
            id: Self::generate_id(category),
            group_id: group_id.to_string(),
            codigo: codigo.to_string(),
            descripcion: descripcion.to_string(),
            category,
            prestador: prestador.to_string(),
            cantidad: 1.0,
            honorario,
            gasto,
            total: honorario + gasto,
            unit_honorario: honorario,
            unit_gasto: gasto,
        }
    }

    /// Item with a single undifferentiated amount (labs, supplies). The
    /// amount lives on the facility-cost side so grand totals reconcile
    /// without a special case.
    pub fn undifferentiated(
        category: LineItemCategory,
        codigo: &str,
        descripcion: &str,
        unit_price: f64,
        cantidad: f64,
    ) -> Self {
        let mut item = Self::split(category, codigo, descripcion, "", 0.0, unit_price, "");
        item.group_id = item.id.clone();
        if cantidad != 1.0 {
            item.set_quantity(cantidad);
        }
        item
    }

    /// Rescale the item to a new quantity from the per-unit basis captured
    /// at creation. Idempotent; the implied unit price never changes.
    pub fn set_quantity(&mut self, cantidad: f64) {
        self.cantidad = cantidad;
        self.honorario = self.unit_honorario * cantidad;
        self.gasto = self.unit_gasto * cantidad;
        self.total = self.honorario + self.gasto;
    }

    /// Per-unit price implied by this item.
    pub fn unit_total(&self) -> f64 {
        self.unit_honorario + self.unit_gasto
    }

    /// Generate a line-item ID: `<category>-<epoch_millis>-<hex suffix>`.
    pub fn generate_id(category: LineItemCategory) -> String {
        let now_millis = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis())
            .unwrap_or(0);
        format!(
            "{}-{}-{}",
            category.id_prefix(),
            now_millis,
            Self::generate_random_suffix(4)
        )
    }

    fn generate_random_suffix(len: usize) -> String {
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos())
            .unwrap_or(0);
        format!("{:x}", now % (16_u128.pow(len as u32)))
            .chars()
            .take(len)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_item_holds_invariant() {
        let item = LineItem::split(
            LineItemCategory::Practice,
            "34.01.01",
            "RADIOGRAFIA DE TORAX",
            "",
            500.0,
            1000.0,
            "grupo-1",
        );

        assert_eq!(item.cantidad, 1.0);
        assert_eq!(item.total, 1500.0);
        assert_eq!(item.total, item.honorario + item.gasto);
        assert!(item.id.starts_with("pra-"));
    }

    #[test]
    fn test_undifferentiated_amount_on_facility_side() {
        let item = LineItem::undifferentiated(
            LineItemCategory::Lab,
            "660252",
            "GLUCEMIA",
            3060.275,
            1.0,
        );

        assert_eq!(item.honorario, 0.0);
        assert_eq!(item.gasto, 3060.275);
        assert_eq!(item.total, 3060.275);
        assert_eq!(item.group_id, item.id);
    }

    #[test]
    fn test_set_quantity_scales_from_unit_basis() {
        let mut item = LineItem::split(
            LineItemCategory::Practice,
            "34.01.01",
            "RADIOGRAFIA DE TORAX",
            "",
            500.0,
            1000.0,
            "grupo-1",
        );

        item.set_quantity(3.0);
        assert_eq!(item.honorario, 1500.0);
        assert_eq!(item.gasto, 3000.0);
        assert_eq!(item.total, 4500.0);

        // Back and forth: the unit price never drifts.
        item.set_quantity(7.0);
        item.set_quantity(1.0);
        assert_eq!(item.total, 1500.0);
        assert_eq!(item.unit_total(), 1500.0);
    }

    #[test]
    fn test_set_quantity_is_idempotent() {
        let mut item = LineItem::undifferentiated(
            LineItemCategory::Medication,
            "M-001",
            "IBUPROFENO 600",
            120.5,
            1.0,
        );

        item.set_quantity(2.5);
        let first = item.clone();
        item.set_quantity(2.5);
        assert_eq!(item, first);
    }

    #[test]
    fn test_minimum_quantities_per_category() {
        assert_eq!(LineItemCategory::Practice.minimum_quantity(), 1.0);
        assert_eq!(LineItemCategory::Surgery.minimum_quantity(), 1.0);
        assert_eq!(LineItemCategory::Lab.minimum_quantity(), 1.0);
        assert_eq!(LineItemCategory::Medication.minimum_quantity(), 0.01);
        assert_eq!(LineItemCategory::Disposable.minimum_quantity(), 0.01);
    }
}

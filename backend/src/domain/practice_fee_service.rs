//! Fee computation for standard clinical practices.
//!
//! X-ray studies are priced from the agreement's Rx concepts; everything
//! else uses the per-practice delegated rates when the catalog carries them.
//! Absent pricing yields zero fees plus a warning, never an error.

use crate::domain::errors::FeeWarning;
use crate::domain::models::agreement::FeeSchedule;
use crate::domain::models::catalog::PracticeEntry;
use crate::domain::models::line_item::{LineItem, LineItemCategory};
use log::debug;
use uuid::Uuid;

/// Honorarium/facility-cost breakdown for one practice at quantity 1.
#[derive(Debug, Clone, PartialEq)]
pub struct PracticeFee {
    pub honorario: f64,
    pub gasto: f64,
    pub total: f64,
    /// Set when the fee resolved to zero where a value was expected
    pub warning: Option<FeeWarning>,
}

#[derive(Clone, Default)]
pub struct PracticeFeeService;

impl PracticeFeeService {
    pub fn new() -> Self {
        Self
    }

    /// Compute the fee split for one practice under the given schedule.
    pub fn compute(&self, entry: &PracticeEntry, schedule: &FeeSchedule) -> PracticeFee {
        let (honorario, gasto) = if entry.is_xray() {
            (schedule.xray_honorarium, schedule.xray_facility_cost)
        } else {
            (entry.galeno.unwrap_or(0.0), entry.gasto.unwrap_or(0.0))
        };

        let total = honorario + gasto;
        let warning = if total == 0.0 {
            debug!("Practice {} resolved to a zero fee", entry.codigo);
            Some(FeeWarning::ZeroFeeTier {
                codigo: entry.codigo.clone(),
                complejidad: None,
            })
        } else {
            None
        };

        PracticeFee {
            honorario,
            gasto,
            total,
            warning,
        }
    }

    /// Build one line item per linked entry (principal study plus its
    /// subsequent-exposure variant), all sharing a group id.
    pub fn build_line_items(
        &self,
        entries: &[&PracticeEntry],
        schedule: &FeeSchedule,
    ) -> (Vec<LineItem>, Vec<FeeWarning>) {
        let group_id = Uuid::new_v4().to_string();
        let mut items = Vec::with_capacity(entries.len());
        let mut warnings = Vec::new();

        for entry in entries {
            let fee = self.compute(entry, schedule);
            if let Some(warning) = fee.warning {
                warnings.push(warning);
            }
            items.push(LineItem::split(
                LineItemCategory::Practice,
                &entry.codigo,
                &entry.descripcion,
                "",
                fee.honorario,
                fee.gasto,
                &group_id,
            ));
        }

        (items, warnings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn xray_entry() -> PracticeEntry {
        PracticeEntry {
            codigo: "34.01.01".to_string(),
            descripcion: "RADIOGRAFIA DE TORAX".to_string(),
            capitulo: "34".to_string(),
            capitulo_nombre: "RADIOLOGIA".to_string(),
            galeno: None,
            gasto: None,
        }
    }

    fn delegated_entry() -> PracticeEntry {
        PracticeEntry {
            codigo: "18.01.01".to_string(),
            descripcion: "CONSULTA EN CONSULTORIO".to_string(),
            capitulo: "18".to_string(),
            capitulo_nombre: "CONSULTAS".to_string(),
            galeno: Some(1500.0),
            gasto: Some(300.0),
        }
    }

    fn xray_schedule() -> FeeSchedule {
        FeeSchedule {
            xray_facility_cost: 1000.0,
            xray_honorarium: 500.0,
            ..FeeSchedule::default()
        }
    }

    #[test]
    fn test_xray_split_from_agreement() {
        // Agreement {Gasto_Rx: 1000, Galeno_Rx_Practica: 500} on a chest X-ray.
        let fee = PracticeFeeService::new().compute(&xray_entry(), &xray_schedule());

        assert_eq!(fee.gasto, 1000.0);
        assert_eq!(fee.honorario, 500.0);
        assert_eq!(fee.total, 1500.0);
        assert!(fee.warning.is_none());
    }

    #[test]
    fn test_non_xray_uses_delegated_rates() {
        let fee = PracticeFeeService::new().compute(&delegated_entry(), &xray_schedule());

        assert_eq!(fee.honorario, 1500.0);
        assert_eq!(fee.gasto, 300.0);
        assert_eq!(fee.total, 1800.0);
    }

    #[test]
    fn test_missing_pricing_is_zero_with_warning_not_error() {
        let mut entry = delegated_entry();
        entry.galeno = None;
        entry.gasto = None;

        let fee = PracticeFeeService::new().compute(&entry, &FeeSchedule::default());
        assert_eq!(fee.total, 0.0);
        assert!(matches!(fee.warning, Some(FeeWarning::ZeroFeeTier { .. })));
    }

    #[test]
    fn test_build_line_items_shares_group() {
        let principal = xray_entry();
        let variant = PracticeEntry {
            codigo: "34.01.02".to_string(),
            descripcion: "POR EXPOSICION SUBSIGUIENTE".to_string(),
            ..xray_entry()
        };

        let (items, warnings) = PracticeFeeService::new()
            .build_line_items(&[&principal, &variant], &xray_schedule());

        assert_eq!(items.len(), 2);
        assert!(warnings.is_empty());
        assert_eq!(items[0].group_id, items[1].group_id);
        assert_eq!(items[0].total, 1500.0);
        assert_eq!(items[0].category, LineItemCategory::Practice);
    }
}

//! Fee computation for lab studies.
//!
//! A study's fee is its bioquímica unit-value multiplier times the
//! agreement's unit price. Lab fees carry no honorarium/facility split.

use crate::domain::errors::FeeWarning;
use crate::domain::models::agreement::FeeSchedule;
use crate::domain::models::catalog::LabEntry;
use crate::domain::models::line_item::{LineItem, LineItemCategory};
use log::debug;

#[derive(Clone, Default)]
pub struct LabFeeService;

impl LabFeeService {
    pub fn new() -> Self {
        Self
    }

    /// Fee for one unit of the study under the given schedule.
    pub fn compute(&self, entry: &LabEntry, schedule: &FeeSchedule) -> f64 {
        entry.unidad_bioquimica * schedule.lab_unit_value
    }

    /// Build the undifferentiated line item for one study.
    pub fn build_line_item(
        &self,
        entry: &LabEntry,
        schedule: &FeeSchedule,
    ) -> (LineItem, Option<FeeWarning>) {
        let total = self.compute(entry, schedule);
        let warning = if total == 0.0 {
            debug!("Lab study {} resolved to a zero fee", entry.codigo);
            Some(FeeWarning::ZeroFeeTier {
                codigo: entry.codigo.clone(),
                complejidad: None,
            })
        } else {
            None
        };

        let item = LineItem::undifferentiated(
            LineItemCategory::Lab,
            &entry.codigo,
            &entry.descripcion,
            total,
            1.0,
        );
        (item, warning)
    }
}

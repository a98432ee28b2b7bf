//! Canonical fee configuration resolved from a raw agreement (convenio) record.

use serde::{Deserialize, Serialize};

/// The canonical pricing view of one agreement, with every concept resolved
/// to a finite number. Produced by the agreement service; read-only for the
/// rest of the session and threaded explicitly into every calculator call.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FeeSchedule {
    pub xray_facility_cost: f64,
    pub xray_honorarium: f64,
    pub surgical_facility_cost: f64,
    pub surgical_honorarium: f64,
    pub daily_bed_rate: f64,
    pub misc_costs: f64,
    pub consultation_fee: f64,
    /// Price of one bioquímica unit; lab fees are multiples of this
    pub lab_unit_value: f64,
    /// Surgical fee table, ordered by complexity tier starting at tier 1
    pub surgical_tiers: Vec<SurgicalTier>,
}

/// One row of the surgical fee table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SurgicalTier {
    pub cirujano: f64,
    pub ayudante_1: f64,
    pub ayudante_2: f64,
}

impl FeeSchedule {
    /// Look up the fee row for a complexity tier. Tiers outside the table
    /// behave as an all-zero row, which downstream surfaces as a
    /// `ZeroFeeTier` warning.
    pub fn tier(&self, complejidad: u8) -> SurgicalTier {
        if complejidad == 0 {
            return SurgicalTier::default();
        }
        self.surgical_tiers
            .get(usize::from(complejidad) - 1)
            .copied()
            .unwrap_or_default()
    }
}

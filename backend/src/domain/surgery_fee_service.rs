//! Surgeon and assistant fee allocation for surgical codes.
//!
//! Fees come from the agreement's complexity-tiered table. The caller's UI
//! disables the two-assistant option below complexity 5; this service does
//! not re-validate that choice, it simply produces no second-assistant items
//! when the gate is not met.

use crate::domain::errors::FeeWarning;
use crate::domain::models::agreement::FeeSchedule;
use crate::domain::models::catalog::SurgeryEntry;
use crate::domain::models::line_item::{LineItem, LineItemCategory};
use log::warn;
use uuid::Uuid;

/// Assistant selection made by the user for one surgery add.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssistantCount {
    None,
    One,
    Two,
}

/// Two assistants may only be requested for complexity 5 and above.
pub const TWO_ASSISTANT_MIN_COMPLEXITY: u8 = 5;

#[derive(Clone, Default)]
pub struct SurgeryFeeService;

impl SurgeryFeeService {
    pub fn new() -> Self {
        Self
    }

    /// Allocate one to three honorarium line items sharing a group id.
    ///
    /// A zero surgeon fee means the agreement has no values loaded for this
    /// tier; the add must be rejected rather than billing a zero-value item.
    pub fn allocate(
        &self,
        entry: &SurgeryEntry,
        schedule: &FeeSchedule,
        assistants: AssistantCount,
    ) -> Result<Vec<LineItem>, FeeWarning> {
        let tier = schedule.tier(entry.complejidad);
        if tier.cirujano <= 0.0 {
            warn!(
                "Surgery {} (tier {}) has no surgeon fee in the selected agreement",
                entry.codigo, entry.complejidad
            );
            return Err(FeeWarning::ZeroFeeTier {
                codigo: entry.codigo.clone(),
                complejidad: Some(entry.complejidad),
            });
        }

        let group_id = Uuid::new_v4().to_string();
        let mut items = vec![LineItem::split(
            LineItemCategory::Surgery,
            &entry.codigo,
            &entry.descripcion,
            "Cirujano",
            tier.cirujano,
            0.0,
            &group_id,
        )];

        match assistants {
            AssistantCount::None => {}
            AssistantCount::One => {
                if tier.ayudante_1 > 0.0 {
                    items.push(LineItem::split(
                        LineItemCategory::Surgery,
                        &entry.codigo,
                        &entry.descripcion,
                        "Ayudante 1",
                        tier.ayudante_1,
                        0.0,
                        &group_id,
                    ));
                }
            }
            AssistantCount::Two => {
                if tier.ayudante_2 > 0.0 && entry.complejidad >= TWO_ASSISTANT_MIN_COMPLEXITY {
                    for _ in 0..2 {
                        items.push(LineItem::split(
                            LineItemCategory::Surgery,
                            &entry.codigo,
                            &entry.descripcion,
                            "Ayudante 2",
                            tier.ayudante_2,
                            0.0,
                            &group_id,
                        ));
                    }
                }
            }
        }

        Ok(items)
    }
}

//! Agreement (convenio) resolution.
//!
//! Agreement records accumulated years of hand-entered keys: the same fee
//! concept appears under several historical spellings, sometimes as a
//! localized string with mixed separators. This service flattens a raw
//! record into the canonical [`FeeSchedule`] through a declarative alias
//! table; resolution is deterministic and total — it never fails, it only
//! ever produces finite numbers.

use crate::domain::models::agreement::{FeeSchedule, SurgicalTier};
use crate::domain::{numeric, text};
use log::debug;
use once_cell::sync::Lazy;
use serde_json::Value;
use shared::AgreementRecord;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Concept {
    XrayFacilityCost,
    XrayHonorarium,
    SurgicalFacilityCost,
    SurgicalHonorarium,
    DailyBedRate,
    MiscCosts,
    ConsultationFee,
    LabUnitValue,
}

struct AliasSpec {
    concept: Concept,
    /// Accepted keys, most recent spelling first
    aliases: &'static [&'static str],
    /// Documented fallback when no alias resolves. Zero everywhere: absent
    /// pricing must yield zero fees plus a surfaced warning, never invented
    /// money.
    default: f64,
}

const ALIAS_TABLE: &[AliasSpec] = &[
    AliasSpec {
        concept: Concept::XrayFacilityCost,
        aliases: &["Gasto_Rx", "Gastos_Rx", "Gasto Radiografia"],
        default: 0.0,
    },
    AliasSpec {
        concept: Concept::XrayHonorarium,
        aliases: &["Galeno_Rx_Practica", "Galeno_Rx", "Honorario_Rx"],
        default: 0.0,
    },
    AliasSpec {
        concept: Concept::SurgicalFacilityCost,
        aliases: &["Gasto_Quirurgico", "Gastos_Quirurgicos", "Gasto Cirugia"],
        default: 0.0,
    },
    AliasSpec {
        concept: Concept::SurgicalHonorarium,
        aliases: &["Galeno_Quirurgico", "Honorario_Quirurgico", "Galeno Cirugia"],
        default: 0.0,
    },
    AliasSpec {
        concept: Concept::DailyBedRate,
        aliases: &["Dia_Cama", "Pension", "Dia Internacion"],
        default: 0.0,
    },
    AliasSpec {
        concept: Concept::MiscCosts,
        aliases: &["Gastos_Varios", "Varios", "Otros_Gastos"],
        default: 0.0,
    },
    AliasSpec {
        concept: Concept::ConsultationFee,
        aliases: &["Consulta", "Valor_Consulta", "Honorario_Consulta"],
        default: 0.0,
    },
    AliasSpec {
        concept: Concept::LabUnitValue,
        aliases: &["Unidad_Bioquimica", "Valor_UB", "UB"],
        default: 0.0,
    },
];

/// Alias table with keys pre-normalized for case/accent/separator-insensitive
/// matching, built once.
static NORMALIZED_ALIASES: Lazy<Vec<(Concept, Vec<String>, f64)>> = Lazy::new(|| {
    ALIAS_TABLE
        .iter()
        .map(|spec| {
            (
                spec.concept,
                spec.aliases.iter().map(|a| text::normalize_key(a)).collect(),
                spec.default,
            )
        })
        .collect()
});

/// Stateless resolver from raw agreement records to canonical schedules.
/// Callers memoize the result per agreement selection.
#[derive(Clone, Default)]
pub struct AgreementService;

impl AgreementService {
    pub fn new() -> Self {
        Self
    }

    /// Resolve a raw record (or its absence) into a canonical schedule.
    /// Pure function of its input; never produces a non-finite value.
    pub fn resolve(&self, record: Option<&AgreementRecord>) -> FeeSchedule {
        let Some(record) = record else {
            debug!("No agreement record; resolving to the zero schedule");
            return FeeSchedule::default();
        };

        let values: Vec<(String, &Value)> = record
            .valores_generales
            .iter()
            .map(|(key, value)| (text::normalize_key(key), value))
            .collect();

        let mut schedule = FeeSchedule::default();
        for (concept, aliases, default) in NORMALIZED_ALIASES.iter() {
            let resolved = Self::resolve_concept(&values, aliases, *default);
            match concept {
                Concept::XrayFacilityCost => schedule.xray_facility_cost = resolved,
                Concept::XrayHonorarium => schedule.xray_honorarium = resolved,
                Concept::SurgicalFacilityCost => schedule.surgical_facility_cost = resolved,
                Concept::SurgicalHonorarium => schedule.surgical_honorarium = resolved,
                Concept::DailyBedRate => schedule.daily_bed_rate = resolved,
                Concept::MiscCosts => schedule.misc_costs = resolved,
                Concept::ConsultationFee => schedule.consultation_fee = resolved,
                Concept::LabUnitValue => schedule.lab_unit_value = resolved,
            }
        }

        schedule.surgical_tiers = record
            .honorarios_medicos
            .iter()
            .map(|row| SurgicalTier {
                cirujano: numeric::coerce_value(&row.cirujano).unwrap_or(0.0),
                ayudante_1: numeric::coerce_value(&row.ayudante_1).unwrap_or(0.0),
                ayudante_2: numeric::coerce_value(&row.ayudante_2).unwrap_or(0.0),
            })
            .collect();

        schedule
    }

    /// First alias present with a coercible value wins; unparsable values
    /// fall through to the next alias, then to the default.
    fn resolve_concept(values: &[(String, &Value)], aliases: &[String], default: f64) -> f64 {
        for alias in aliases {
            if let Some((_, value)) = values.iter().find(|(key, _)| key == alias) {
                if let Some(parsed) = numeric::coerce_value(value) {
                    return parsed;
                }
            }
        }
        default
    }
}

//! Warning kinds surfaced to the UI collaborators.
//!
//! Missing or incomplete pricing data is an expected operating condition, so
//! these are values attached to operation results, not errors that abort a
//! computation. Every numeric path in the domain has a deterministic
//! fallback; nothing here is fatal.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum FeeWarning {
    /// No agreement is selected; all fees defaulted to zero.
    #[error("no hay convenio seleccionado; los valores se calculan en cero")]
    NoAgreementSelected,

    /// A fee that is structurally expected to be non-zero resolved to
    /// exactly zero. Signals incomplete agreement configuration; surgical
    /// allocation rejects the add, other calculators proceed with the
    /// zero-value item.
    #[error("el convenio no tiene valores cargados para {codigo}")]
    ZeroFeeTier {
        codigo: String,
        complejidad: Option<u8>,
    },

    /// A requested quantity was non-finite or below the category minimum.
    /// The quantity was clamped, not rejected.
    #[error("cantidad {requested} invalida; se ajusto al minimo {minimum}")]
    InvalidQuantity { requested: f64, minimum: f64 },
}

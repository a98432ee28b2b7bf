//! # Domain Module
//!
//! Business logic for the clinic billing core.
//!
//! This module encapsulates fee computation and invoice aggregation. It
//! operates independently of any UI framework or storage mechanism: the
//! catalogs and the selected agreement arrive fully materialized, and the
//! persisted invoice leaves as a plain DTO.
//!
//! ## Module Organization
//!
//! - **numeric / text**: coercion of loosely-typed pricing data and
//!   case/accent-insensitive matching
//! - **agreement_service**: raw convenio record -> canonical fee schedule
//! - **catalog_service**: catalog loading and subsequent-exposure linking
//! - **practice_fee_service / surgery_fee_service / lab_fee_service**: the
//!   three fee calculators, pure functions of entry + schedule
//! - **invoice_service**: the single owner of invoice state and totals
//! - **commands**: internal command/result types for backend operations
//!
//! ## Business Rules
//!
//! - Missing pricing data yields zero fees plus a warning, never an error
//! - X-ray practices are priced from the agreement's Rx concepts
//! - Surgical fees come from a complexity-tiered table; two assistants only
//!   at complexity 5 and above
//! - Quantity edits rescale from the per-unit price captured at creation
//! - The invoice grand total always equals the sum of every item's total

pub mod agreement_service;
pub mod catalog_service;
pub mod commands;
pub mod errors;
pub mod invoice_service;
pub mod lab_fee_service;
pub mod models;
pub mod numeric;
pub mod practice_fee_service;
pub mod surgery_fee_service;
pub mod text;

pub use agreement_service::AgreementService;
pub use catalog_service::{CatalogService, CatalogSet};
pub use errors::FeeWarning;
pub use invoice_service::{InvoiceService, QuantityUpdate};
pub use lab_fee_service::LabFeeService;
pub use models::{
    FeeSchedule, Invoice, LabCatalog, LabEntry, LineItem, LineItemCategory, Patient,
    PracticeCatalog, PracticeEntry, SurgeryCatalog, SurgeryEntry, SurgicalTier, Totals,
};
pub use practice_fee_service::{PracticeFee, PracticeFeeService};
pub use surgery_fee_service::{AssistantCount, SurgeryFeeService, TWO_ASSISTANT_MIN_COMPLEXITY};

//! Domain models for the billing core.

pub mod agreement;
pub mod catalog;
pub mod invoice;
pub mod line_item;

pub use agreement::{FeeSchedule, SurgicalTier};
pub use catalog::{LabCatalog, LabEntry, PracticeCatalog, PracticeEntry, SurgeryCatalog, SurgeryEntry};
pub use invoice::{Invoice, Patient, Totals};
pub use line_item::{LineItem, LineItemCategory};

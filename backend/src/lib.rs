//! # Clinic Billing Backend
//!
//! Fee computation and invoice aggregation core for the clinic
//! administrative application. The UI selects a code and options, the
//! backend derives the fee breakdown under the currently selected agreement
//! (convenio) and aggregates line items into an invoice whose totals always
//! reconcile.
//!
//! The backend is synchronous and deterministic: catalogs and agreement
//! records are handed in fully materialized by the excluded collaborators
//! (reference-data fetch, realtime store), and the finished invoice leaves
//! as a serializable DTO for the persistence collaborator.

use anyhow::{anyhow, Result};
use log::info;

pub mod domain;

use domain::commands::billing::{
    AddItemsResult, AddLabCommand, AddPracticeCommand, AddSupplyCommand, AddSurgeryCommand,
    QuantityUpdateResult, RemoveItemCommand, RemoveItemResult, SetQuantityCommand,
    UpdateProviderCommand,
};
use domain::{
    AgreementService, CatalogService, CatalogSet, FeeSchedule, FeeWarning, InvoiceService,
    LabFeeService, LineItem, Patient, PracticeFeeService, SurgeryFeeService, Totals,
};

/// Main backend struct that wires the catalogs and all services for one
/// user session.
///
/// The selected agreement is threaded into every pricing call as an
/// explicit `Option<&FeeSchedule>` parameter rather than held as shared
/// state: swapping agreements mid-session changes future computations but
/// never retroactively mutates items already on the invoice.
pub struct Backend {
    pub catalogs: CatalogSet,
    pub agreement_service: AgreementService,
    pub catalog_service: CatalogService,
    pub practice_fee_service: PracticeFeeService,
    pub surgery_fee_service: SurgeryFeeService,
    pub lab_fee_service: LabFeeService,
    pub invoice_service: InvoiceService,
}

impl Backend {
    /// Create a backend for one session over already-loaded catalogs.
    pub fn new(catalogs: CatalogSet, paciente: Patient) -> Self {
        info!(
            "Starting billing session for {} ({} practices, {} surgeries, {} labs)",
            paciente.nombre,
            catalogs.practices.len(),
            catalogs.surgeries.len(),
            catalogs.labs.len()
        );
        Self {
            catalogs,
            agreement_service: AgreementService::new(),
            catalog_service: CatalogService::new(),
            practice_fee_service: PracticeFeeService::new(),
            surgery_fee_service: SurgeryFeeService::new(),
            lab_fee_service: LabFeeService::new(),
            invoice_service: InvoiceService::new(paciente),
        }
    }

    /// Add a practice and any linked subsequent-exposure variant.
    pub fn add_practice(
        &mut self,
        command: AddPracticeCommand,
        schedule: Option<&FeeSchedule>,
    ) -> Result<AddItemsResult> {
        let fallback = FeeSchedule::default();
        let mut warnings = Self::schedule_warnings(schedule);
        let schedule = schedule.unwrap_or(&fallback);

        let index = self
            .catalogs
            .practices
            .position_of(&command.codigo)
            .ok_or_else(|| anyhow!("Unknown practice code {}", command.codigo))?;
        let linked = self
            .catalog_service
            .with_subsequent_exposure(&self.catalogs.practices, index);

        let (mut items, fee_warnings) = self.practice_fee_service.build_line_items(&linked, schedule);
        warnings.extend(fee_warnings);

        let cantidad = command.cantidad.max(1) as f64;
        if cantidad > 1.0 {
            for item in &mut items {
                item.set_quantity(cantidad);
            }
        }

        self.invoice_service.add_items(items.clone())?;
        Ok(AddItemsResult {
            items,
            totales: self.invoice_service.grand_totals(),
            warnings,
        })
    }

    /// Add a surgery. A zero-fee tier rejects the add: no items are
    /// appended and the warning is returned for the UI to display.
    pub fn add_surgery(
        &mut self,
        command: AddSurgeryCommand,
        schedule: Option<&FeeSchedule>,
    ) -> Result<AddItemsResult> {
        let fallback = FeeSchedule::default();
        let mut warnings = Self::schedule_warnings(schedule);
        let schedule = schedule.unwrap_or(&fallback);

        let entry = self
            .catalogs
            .surgeries
            .find(&command.codigo)
            .ok_or_else(|| anyhow!("Unknown surgery code {}", command.codigo))?;

        match self
            .surgery_fee_service
            .allocate(entry, schedule, command.assistants)
        {
            Ok(items) => {
                self.invoice_service.add_items(items.clone())?;
                Ok(AddItemsResult {
                    items,
                    totales: self.invoice_service.grand_totals(),
                    warnings,
                })
            }
            Err(warning) => {
                warnings.push(warning);
                Ok(AddItemsResult {
                    items: Vec::new(),
                    totales: self.invoice_service.grand_totals(),
                    warnings,
                })
            }
        }
    }

    /// Add a lab study.
    pub fn add_lab(
        &mut self,
        command: AddLabCommand,
        schedule: Option<&FeeSchedule>,
    ) -> Result<AddItemsResult> {
        let fallback = FeeSchedule::default();
        let mut warnings = Self::schedule_warnings(schedule);
        let schedule = schedule.unwrap_or(&fallback);

        let entry = self
            .catalogs
            .labs
            .find(&command.codigo)
            .ok_or_else(|| anyhow!("Unknown lab code {}", command.codigo))?;

        let (mut item, warning) = self.lab_fee_service.build_line_item(entry, schedule);
        warnings.extend(warning);

        let cantidad = command.cantidad.max(1) as f64;
        if cantidad > 1.0 {
            item.set_quantity(cantidad);
        }

        self.invoice_service.add_item(item.clone())?;
        Ok(AddItemsResult {
            items: vec![item],
            totales: self.invoice_service.grand_totals(),
            warnings,
        })
    }

    /// Add a medication or disposable priced by the inventory collaborator.
    pub fn add_supply(&mut self, command: AddSupplyCommand) -> Result<AddItemsResult> {
        let mut warnings = Vec::new();
        let minimum = command.category.minimum_quantity();
        let cantidad = if command.cantidad.is_finite() && command.cantidad >= minimum {
            command.cantidad
        } else {
            warnings.push(FeeWarning::InvalidQuantity {
                requested: command.cantidad,
                minimum,
            });
            minimum
        };

        let item = LineItem::undifferentiated(
            command.category,
            &command.codigo,
            &command.descripcion,
            command.precio_unitario,
            cantidad,
        );
        self.invoice_service.add_item(item.clone())?;
        Ok(AddItemsResult {
            items: vec![item],
            totales: self.invoice_service.grand_totals(),
            warnings,
        })
    }

    /// Edit an item's quantity.
    pub fn set_quantity(&mut self, command: SetQuantityCommand) -> Result<QuantityUpdateResult> {
        let update = self
            .invoice_service
            .set_quantity(&command.item_id, command.cantidad)?;
        Ok(QuantityUpdateResult {
            item: update.item,
            totales: self.invoice_service.grand_totals(),
            warning: update.warning,
        })
    }

    /// Edit an item's provider name.
    pub fn update_provider(&mut self, command: UpdateProviderCommand) -> Result<()> {
        self.invoice_service
            .update_provider_name(&command.item_id, &command.prestador)
    }

    /// Remove an item, returning it with the recomputed totals.
    pub fn remove_item(&mut self, command: RemoveItemCommand) -> Result<RemoveItemResult> {
        let removed = self.invoice_service.remove_item(&command.item_id)?;
        Ok(RemoveItemResult {
            removed,
            totales: self.invoice_service.grand_totals(),
        })
    }

    /// Discard all line items, keeping the patient header.
    pub fn reset_invoice(&mut self) {
        self.invoice_service.reset();
    }

    /// Resolve a raw agreement record into a schedule for this session.
    /// Callers keep the result for as long as that agreement stays selected.
    pub fn resolve_agreement(&self, record: Option<&shared::AgreementRecord>) -> FeeSchedule {
        self.agreement_service.resolve(record)
    }

    pub fn grand_totals(&self) -> Totals {
        self.invoice_service.grand_totals()
    }

    pub fn persisted_invoice(&self) -> shared::PersistedInvoice {
        self.invoice_service.to_persisted()
    }

    fn schedule_warnings(schedule: Option<&FeeSchedule>) -> Vec<FeeWarning> {
        if schedule.is_none() {
            vec![FeeWarning::NoAgreementSelected]
        } else {
            Vec::new()
        }
    }
}

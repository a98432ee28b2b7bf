//! Domain-level command and result types.
//!
//! These structs are used by the [`crate::Backend`] operations and are not
//! exposed over any public API. The UI layer maps its form state onto these
//! internal types.

pub mod billing {
    use crate::domain::errors::FeeWarning;
    use crate::domain::models::invoice::Totals;
    use crate::domain::models::line_item::{LineItem, LineItemCategory};
    use crate::domain::surgery_fee_service::AssistantCount;

    /// Add a practice (plus any linked subsequent-exposure variant).
    #[derive(Debug, Clone)]
    pub struct AddPracticeCommand {
        pub codigo: String,
        pub cantidad: u32,
    }

    /// Add a surgery with the selected assistant count.
    #[derive(Debug, Clone)]
    pub struct AddSurgeryCommand {
        pub codigo: String,
        pub assistants: AssistantCount,
    }

    /// Add a lab study.
    #[derive(Debug, Clone)]
    pub struct AddLabCommand {
        pub codigo: String,
        pub cantidad: u32,
    }

    /// Add a medication or disposable priced by the inventory collaborator.
    #[derive(Debug, Clone)]
    pub struct AddSupplyCommand {
        pub category: LineItemCategory,
        pub codigo: String,
        pub descripcion: String,
        pub precio_unitario: f64,
        pub cantidad: f64,
    }

    /// Edit an existing item's quantity.
    #[derive(Debug, Clone)]
    pub struct SetQuantityCommand {
        pub item_id: String,
        pub cantidad: f64,
    }

    /// Edit an existing item's provider name.
    #[derive(Debug, Clone)]
    pub struct UpdateProviderCommand {
        pub item_id: String,
        pub prestador: String,
    }

    /// Remove an item from the invoice.
    #[derive(Debug, Clone)]
    pub struct RemoveItemCommand {
        pub item_id: String,
    }

    /// Result of an add operation. An empty `items` with a warning means
    /// the add was rejected (e.g. a zero-fee surgical tier).
    #[derive(Debug, Clone)]
    pub struct AddItemsResult {
        pub items: Vec<LineItem>,
        pub totales: Totals,
        pub warnings: Vec<FeeWarning>,
    }

    /// Result of a quantity edit.
    #[derive(Debug, Clone)]
    pub struct QuantityUpdateResult {
        pub item: LineItem,
        pub totales: Totals,
        pub warning: Option<FeeWarning>,
    }

    /// Result of a removal.
    #[derive(Debug, Clone)]
    pub struct RemoveItemResult {
        pub removed: LineItem,
        pub totales: Totals,
    }
}

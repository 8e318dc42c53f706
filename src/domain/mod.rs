//! Business rules for shipments, invoices and complaints live here.

pub mod audit;
pub mod billing;
pub mod complaints;
pub mod entities;
pub mod lifecycle;
pub mod permissions;
pub mod pricing;

pub use audit::{AuditEntry, AuditLevel, AuditLog};
pub use billing::{
    apply_payment, apply_payment_with, calculate_vat, cascade_delete_invoice, client_exists,
    derive_status, invoice_totals, outstanding_balance, CascadeOutcome, InvoiceTotals, PaymentOutcome, VatBreakdown,
    VAT_RATE,
};
pub use complaints::{validate_complaint_items, ComplaintValidation};
pub use entities::{
    Client, ComplaintItem, Currency, DestinationRate, Invoice, InvoiceStatus, PaymentMethod,
    PaymentRecord, Shipment, ShipmentHistoryEvent, ShipmentStatus,
};
pub use lifecycle::{advance, can_delete, can_modify, lock_for_route, next_status};
pub use permissions::{Capability, Permissions, Role};
pub use pricing::{calculate_price, quote, PriceQuote, RateSource, RateTable};

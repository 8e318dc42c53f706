//! Invoice amounts, payment application and invoice deletion.

use super::entities::{Client, Currency, Invoice, InvoiceStatus, PaymentMethod, PaymentRecord};
use crate::util::{generate_id, today_iso};

/// Standard VAT rate applied to every invoice.
pub const VAT_RATE: f64 = 0.19;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct VatBreakdown {
    pub tva: f64,
    pub amount_ttc: f64,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct InvoiceTotals {
    pub amount_ht: f64,
    pub tva: f64,
    pub amount_ttc: f64,
}

pub fn calculate_vat(amount_ht: f64) -> VatBreakdown {
    let tva = amount_ht * VAT_RATE;
    VatBreakdown {
        tva,
        amount_ttc: amount_ht + tva,
    }
}

/// Totals for an invoice covering the given shipment prices.
pub fn invoice_totals(shipment_prices: &[f64]) -> InvoiceTotals {
    let amount_ht = shipment_prices.iter().sum::<f64>();
    let VatBreakdown { tva, amount_ttc } = calculate_vat(amount_ht);
    InvoiceTotals {
        amount_ht,
        tva,
        amount_ttc,
    }
}

/// Status follows from the amounts; it is never set on its own.
pub fn derive_status(amount_ttc: f64, paid_amount: f64) -> InvoiceStatus {
    if amount_ttc - paid_amount <= 0.0 {
        InvoiceStatus::Paid
    } else if paid_amount > 0.0 {
        InvoiceStatus::Partial
    } else {
        InvoiceStatus::Unpaid
    }
}

pub fn outstanding_balance(amount_ttc: f64, paid_amount: f64) -> f64 {
    (amount_ttc - paid_amount).max(0.0)
}

#[derive(Clone, Debug, PartialEq)]
pub struct PaymentOutcome {
    pub invoice: Invoice,
    pub payment: PaymentRecord,
}

/// Applies a transfer dated today. Overpayment is accepted and the excess is
/// dropped: the outstanding balance floors at zero and no credit is kept.
pub fn apply_payment(invoice: &Invoice, amount: f64) -> PaymentOutcome {
    apply_payment_with(
        invoice,
        amount,
        PaymentMethod::Transfer,
        today_iso(),
        Currency::default(),
    )
}

/// `default_currency` is recorded on the payment when the invoice has none.
pub fn apply_payment_with(
    invoice: &Invoice,
    amount: f64,
    method: PaymentMethod,
    date: String,
    default_currency: Currency,
) -> PaymentOutcome {
    let paid_amount = invoice.paid_amount + amount;
    let updated = Invoice {
        paid_amount,
        outstanding_balance: outstanding_balance(invoice.amount_ttc, paid_amount),
        status: derive_status(invoice.amount_ttc, paid_amount),
        ..invoice.clone()
    };

    if paid_amount > invoice.amount_ttc {
        tracing::debug!(
            invoice = %invoice.id,
            excess = paid_amount - invoice.amount_ttc,
            "overpayment absorbed"
        );
    }

    let payment = PaymentRecord {
        id: generate_id("PAY"),
        invoice_id: invoice.id.clone(),
        amount,
        date,
        currency: invoice.currency.unwrap_or(default_currency),
        method,
        notes: None,
    };

    PaymentOutcome {
        invoice: updated,
        payment,
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct CascadeOutcome {
    pub invoices: Vec<Invoice>,
    pub payments: Vec<PaymentRecord>,
    pub clients: Vec<Client>,
}

/// Removes the invoice and its payments, and credits its outstanding balance
/// back onto the owning client. All three collections are rebuilt together.
pub fn cascade_delete_invoice(
    invoice: &Invoice,
    invoices: &[Invoice],
    payments: &[PaymentRecord],
    clients: &[Client],
) -> CascadeOutcome {
    let invoices = invoices
        .iter()
        .filter(|inv| inv.id != invoice.id)
        .cloned()
        .collect();

    let payments = payments
        .iter()
        .filter(|p| p.invoice_id != invoice.id)
        .cloned()
        .collect();

    let clients = clients
        .iter()
        .map(|client| {
            if client.id == invoice.client_id {
                Client {
                    balance: client.balance + invoice.outstanding_balance,
                    ..client.clone()
                }
            } else {
                client.clone()
            }
        })
        .collect();

    CascadeOutcome {
        invoices,
        payments,
        clients,
    }
}

pub fn client_exists(client_id: &str, clients: &[Client]) -> bool {
    clients.iter().any(|c| c.id == client_id)
}

use routemind::domain::{
    advance, apply_payment, calculate_price, calculate_vat, can_modify, cascade_delete_invoice,
    lock_for_route, next_status, quote, validate_complaint_items, Client, ComplaintItem,
    DestinationRate, Invoice, InvoiceStatus, PaymentMethod, PaymentRecord, RateTable, Shipment,
    ShipmentStatus,
};

fn rates() -> RateTable {
    RateTable::new(vec![
        DestinationRate {
            id: "1".into(),
            destination: "Algiers".into(),
            base_rate: 500.0,
            weight_rate: 15.0,
            volume_rate: 120.0,
        },
        DestinationRate {
            id: "2".into(),
            destination: "Constantine".into(),
            base_rate: 700.0,
            weight_rate: 20.0,
            volume_rate: 150.0,
        },
    ])
}

#[test]
fn every_table_destination_uses_its_own_formula() {
    let table = rates();
    for rate in table.rates() {
        for (weight, volume) in [(0.0, 0.0), (3.0, 0.25), (120.0, 4.0)] {
            assert_eq!(
                calculate_price(&rate.destination, weight, volume, &table),
                rate.base_rate + weight * rate.weight_rate + volume * rate.volume_rate
            );
        }
    }
}

#[test]
fn absent_destination_uses_default_formula() {
    let table = rates();
    assert_eq!(calculate_price("Ghardaia", 8.0, 1.5, &table), 20.0 + 8.0 * 0.5 + 1.5 * 10.0);
    assert!(quote("Ghardaia", 8.0, 1.5, &table).is_fallback());
}

#[test]
fn shipment_is_frozen_once_routed() {
    let shipment = Shipment {
        id: "SHP-1".into(),
        client_id: "C-1".into(),
        status: ShipmentStatus::Pending,
        ..Shipment::default()
    };
    assert!(can_modify(&shipment));

    let routed = lock_for_route(shipment, "R-1");
    assert!(!can_modify(&routed));
    assert_eq!(routed.status, ShipmentStatus::Pending);

    let in_transit = advance(routed, "Algiers hub").expect("pending advances");
    let delivered = advance(in_transit, "Oran").expect("in transit advances");
    assert_eq!(delivered.status, ShipmentStatus::Delivered);
    assert_eq!(delivered.history.len(), 2);
    assert!(advance(delivered, "Oran").is_none());
    assert_eq!(next_status(ShipmentStatus::Cancelled), None);
}

#[test]
fn invoice_payment_and_deletion_flow() {
    let vat = calculate_vat(100.0);
    let invoice = Invoice {
        id: "INV-1".into(),
        client_id: "C-1".into(),
        amount_ht: 100.0,
        tva: vat.tva,
        amount_ttc: vat.amount_ttc,
        outstanding_balance: vat.amount_ttc,
        ..Invoice::default()
    };

    let partial = apply_payment(&invoice, 50.0);
    assert_eq!(partial.invoice.status, InvoiceStatus::Partial);
    assert_eq!(partial.invoice.outstanding_balance, 69.0);

    let existing = PaymentRecord {
        method: PaymentMethod::Cash,
        ..partial.payment.clone()
    };
    let clients = vec![Client {
        id: "C-1".into(),
        balance: 0.0,
        ..Client::default()
    }];

    let outcome = cascade_delete_invoice(
        &partial.invoice,
        &[partial.invoice.clone()],
        &[existing],
        &clients,
    );
    assert!(outcome.invoices.is_empty());
    assert!(outcome.payments.is_empty());
    assert_eq!(outcome.clients[0].balance, 69.0);

    let settled = apply_payment(&partial.invoice, 69.0);
    assert_eq!(settled.invoice.status, InvoiceStatus::Paid);
    assert_eq!(settled.invoice.outstanding_balance, 0.0);
}

#[test]
fn complaint_items_decode_and_validate() {
    let items: Vec<ComplaintItem> = serde_json::from_str(
        r#"[{"type": "invoice", "entityId": "INV-1"}, {"type": "pallet"}]"#,
    )
    .expect("decode items");
    let validation = validate_complaint_items(&items);
    assert!(!validation.is_valid);
    assert_eq!(validation.errors.len(), 2);
    assert!(validation.errors.iter().all(|e| e.starts_with("Item 2:")));
}

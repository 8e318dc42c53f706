//! Logistics records shared by the business rules, the REST client and the
//! on-disk caches.

use serde::{Deserialize, Serialize};

use crate::util::serde_ext::{f64_from_json, string_from_json};

/// Per-destination pricing coefficients.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DestinationRate {
    #[serde(deserialize_with = "string_from_json")]
    pub id: String,
    /// Destination name; the pricing lookup joins on this, not on `id`.
    #[serde(alias = "name")]
    pub destination: String,
    #[serde(alias = "base_rate", deserialize_with = "f64_from_json")]
    pub base_rate: f64,
    /// Per kg
    #[serde(alias = "weight_rate", deserialize_with = "f64_from_json")]
    pub weight_rate: f64,
    /// Per m³
    #[serde(alias = "volume_rate", deserialize_with = "f64_from_json")]
    pub volume_rate: f64,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ShipmentStatus {
    #[default]
    Pending,
    #[serde(rename = "In Transit", alias = "InTransit")]
    InTransit,
    Delivered,
    Cancelled,
    Delayed,
}

impl ShipmentStatus {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::InTransit => "In Transit",
            Self::Delivered => "Delivered",
            Self::Cancelled => "Cancelled",
            Self::Delayed => "Delayed",
        }
    }

    /// Parses either the wire label ("In Transit") or a compact form
    /// ("in-transit", "intransit"), ignoring case.
    pub fn parse(raw: &str) -> Option<Self> {
        let compact: String = raw
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .map(|c| c.to_ascii_lowercase())
            .collect();
        match compact.as_str() {
            "pending" => Some(Self::Pending),
            "intransit" => Some(Self::InTransit),
            "delivered" => Some(Self::Delivered),
            "cancelled" | "canceled" => Some(Self::Cancelled),
            "delayed" => Some(Self::Delayed),
            _ => None,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Currency {
    #[default]
    #[serde(rename = "EUR")]
    Eur,
    #[serde(rename = "DZD")]
    Dzd,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShipmentHistoryEvent {
    pub date: String,
    pub status: ShipmentStatus,
    pub location: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Shipment {
    #[serde(deserialize_with = "string_from_json")]
    pub id: String,
    #[serde(deserialize_with = "string_from_json")]
    pub client_id: String,
    #[serde(default)]
    pub client_name: String,
    #[serde(default, deserialize_with = "string_from_json")]
    pub destination_id: String,
    #[serde(default)]
    pub destination: String,
    pub weight: f64,
    pub volume: f64,
    pub price: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub currency: Option<Currency>,
    pub status: ShipmentStatus,
    #[serde(default)]
    pub date_created: String,
    #[serde(default)]
    pub estimated_delivery: String,
    #[serde(default)]
    pub history: Vec<ShipmentHistoryEvent>,
    /// Assigned route, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub route_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub driver_id: Option<String>,
    /// Set once the shipment is assigned to a route.
    #[serde(default)]
    pub is_locked: bool,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InvoiceStatus {
    Paid,
    Partial,
    #[default]
    Unpaid,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Invoice {
    #[serde(deserialize_with = "string_from_json")]
    pub id: String,
    #[serde(deserialize_with = "string_from_json")]
    pub client_id: String,
    #[serde(default)]
    pub shipment_ids: Vec<String>,
    #[serde(rename = "amountHT")]
    pub amount_ht: f64,
    pub tva: f64,
    #[serde(rename = "amountTTC")]
    pub amount_ttc: f64,
    #[serde(default)]
    pub paid_amount: f64,
    #[serde(default)]
    pub outstanding_balance: f64,
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub status: InvoiceStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub currency: Option<Currency>,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PaymentMethod {
    Cash,
    Check,
    Card,
    #[default]
    Transfer,
}

impl PaymentMethod {
    /// Label stored by the backend's free-text `method` column.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Cash => "Cash",
            Self::Check => "Check",
            Self::Card => "Card",
            Self::Transfer => "Bank Transfer",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        let compact: String = raw
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .map(|c| c.to_ascii_lowercase())
            .collect();
        match compact.as_str() {
            "cash" => Some(Self::Cash),
            "check" | "cheque" => Some(Self::Check),
            "card" | "creditcard" | "debitcard" => Some(Self::Card),
            "transfer" | "banktransfer" | "wire" => Some(Self::Transfer),
            _ => None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentRecord {
    #[serde(deserialize_with = "string_from_json")]
    pub id: String,
    #[serde(deserialize_with = "string_from_json")]
    pub invoice_id: String,
    pub amount: f64,
    pub date: String,
    #[serde(default)]
    pub currency: Currency,
    #[serde(default)]
    pub method: PaymentMethod,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Client {
    #[serde(deserialize_with = "string_from_json")]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub balance: f64,
}

/// An entity linked to a complaint. `kind` stays a raw string so that
/// malformed submissions can be reported instead of rejected at decode time.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComplaintItem {
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub entity_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shipment_decodes_backend_payload() {
        let raw = r#"{
            "id": 42,
            "clientId": 7,
            "destinationId": "3",
            "destination": "Oran",
            "weight": 12.5,
            "volume": 0.4,
            "price": 80.0,
            "status": "In Transit"
        }"#;
        let shipment: Shipment = serde_json::from_str(raw).expect("decode shipment");
        assert_eq!(shipment.id, "42");
        assert_eq!(shipment.client_id, "7");
        assert_eq!(shipment.status, ShipmentStatus::InTransit);
        assert!(!shipment.is_locked);
        assert!(shipment.history.is_empty());
    }

    #[test]
    fn invoice_uses_ht_ttc_field_names() {
        let invoice = Invoice {
            id: "INV-1".into(),
            client_id: "C-1".into(),
            amount_ht: 100.0,
            tva: 19.0,
            amount_ttc: 119.0,
            ..Invoice::default()
        };
        let json = serde_json::to_value(&invoice).expect("encode invoice");
        assert_eq!(json["amountHT"], 100.0);
        assert_eq!(json["amountTTC"], 119.0);
        assert_eq!(json["status"], "Unpaid");
    }

    #[test]
    fn status_parse_accepts_loose_forms() {
        assert_eq!(ShipmentStatus::parse("in-transit"), Some(ShipmentStatus::InTransit));
        assert_eq!(ShipmentStatus::parse("In Transit"), Some(ShipmentStatus::InTransit));
        assert_eq!(ShipmentStatus::parse("DELIVERED"), Some(ShipmentStatus::Delivered));
        assert_eq!(ShipmentStatus::parse("lost"), None);
    }

    #[test]
    fn payment_method_labels_parse_back() {
        for method in [
            PaymentMethod::Cash,
            PaymentMethod::Check,
            PaymentMethod::Card,
            PaymentMethod::Transfer,
        ] {
            assert_eq!(PaymentMethod::parse(method.label()), Some(method));
        }
        assert_eq!(PaymentMethod::parse("cheque"), Some(PaymentMethod::Check));
        assert_eq!(PaymentMethod::parse("barter"), None);
    }
}

//! Validation of the entity references attached to a complaint.

use super::entities::ComplaintItem;

/// Entity kinds a complaint may reference.
pub const COMPLAINT_ITEM_KINDS: [&str; 3] = ["shipment", "invoice", "service"];

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ComplaintValidation {
    pub is_valid: bool,
    pub errors: Vec<String>,
}

/// Checks every linked item and reports all problems at once.
pub fn validate_complaint_items(items: &[ComplaintItem]) -> ComplaintValidation {
    let mut errors = Vec::new();

    if items.is_empty() {
        errors.push("At least one item must be linked to a complaint".to_string());
    }

    for (index, item) in items.iter().enumerate() {
        let position = index + 1;
        if !COMPLAINT_ITEM_KINDS.contains(&item.kind.as_str()) {
            errors.push(format!(
                "Item {position}: Invalid type. Must be shipment, invoice, or service"
            ));
        }
        if item.entity_id.is_empty() {
            errors.push(format!("Item {position}: Entity ID is required"));
        }
    }

    ComplaintValidation {
        is_valid: errors.is_empty(),
        errors,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(kind: &str, entity_id: &str) -> ComplaintItem {
        ComplaintItem {
            kind: kind.into(),
            entity_id: entity_id.into(),
            description: None,
        }
    }

    #[test]
    fn empty_list_is_rejected() {
        let result = validate_complaint_items(&[]);
        assert!(!result.is_valid);
        assert_eq!(result.errors, vec!["At least one item must be linked to a complaint"]);
    }

    #[test]
    fn valid_items_pass() {
        let result = validate_complaint_items(&[item("shipment", "SHP-1"), item("service", "2")]);
        assert!(result.is_valid);
        assert!(result.errors.is_empty());
    }

    #[test]
    fn all_violations_are_collected() {
        let result = validate_complaint_items(&[
            item("parcel", ""),
            item("invoice", "INV-1"),
            item("Shipment", "SHP-2"),
        ]);
        assert!(!result.is_valid);
        assert_eq!(
            result.errors,
            vec![
                "Item 1: Invalid type. Must be shipment, invoice, or service",
                "Item 1: Entity ID is required",
                "Item 3: Invalid type. Must be shipment, invoice, or service",
            ]
        );
    }
}

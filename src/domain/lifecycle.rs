//! Shipment status flow and route locking.

use super::entities::{Shipment, ShipmentHistoryEvent, ShipmentStatus};
use crate::util::today_iso;

/// A shipment may be edited only while unlocked and still pending.
pub fn can_modify(shipment: &Shipment) -> bool {
    !shipment.is_locked && shipment.status == ShipmentStatus::Pending
}

/// Deletion is blocked by the route lock alone, whatever the status.
pub fn can_delete(shipment: &Shipment) -> bool {
    !shipment.is_locked
}

/// Next status in the delivery flow; `None` for terminal states.
pub fn next_status(status: ShipmentStatus) -> Option<ShipmentStatus> {
    match status {
        ShipmentStatus::Pending => Some(ShipmentStatus::InTransit),
        ShipmentStatus::InTransit => Some(ShipmentStatus::Delivered),
        ShipmentStatus::Delayed => Some(ShipmentStatus::InTransit),
        ShipmentStatus::Delivered | ShipmentStatus::Cancelled => None,
    }
}

pub fn is_terminal(status: ShipmentStatus) -> bool {
    next_status(status).is_none()
}

/// Assigns the shipment to a route and locks it. Status is left as is.
pub fn lock_for_route(shipment: Shipment, route_id: impl Into<String>) -> Shipment {
    Shipment {
        route_id: Some(route_id.into()),
        is_locked: true,
        ..shipment
    }
}

/// Moves the shipment one step along the flow and records the step in its
/// history. Returns `None` when the shipment is already in a terminal state.
pub fn advance(shipment: Shipment, location: &str) -> Option<Shipment> {
    advance_on(shipment, location, today_iso())
}

pub fn advance_on(mut shipment: Shipment, location: &str, date: String) -> Option<Shipment> {
    let next = next_status(shipment.status)?;
    tracing::debug!(
        shipment = %shipment.id,
        from = shipment.status.label(),
        to = next.label(),
        "advancing shipment"
    );
    shipment.status = next;
    shipment.history.push(ShipmentHistoryEvent {
        date,
        status: next,
        location: location.to_string(),
        description: None,
    });
    Some(shipment)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shipment(status: ShipmentStatus, is_locked: bool) -> Shipment {
        Shipment {
            id: "SHP-1".into(),
            client_id: "C-1".into(),
            status,
            is_locked,
            ..Shipment::default()
        }
    }

    const ALL: [ShipmentStatus; 5] = [
        ShipmentStatus::Pending,
        ShipmentStatus::InTransit,
        ShipmentStatus::Delivered,
        ShipmentStatus::Cancelled,
        ShipmentStatus::Delayed,
    ];

    #[test]
    fn locked_shipment_is_never_modifiable() {
        for status in ALL {
            assert!(!can_modify(&shipment(status, true)), "{status:?}");
            assert!(!can_delete(&shipment(status, true)), "{status:?}");
        }
    }

    #[test]
    fn only_unlocked_pending_is_modifiable() {
        assert!(can_modify(&shipment(ShipmentStatus::Pending, false)));
        assert!(!can_modify(&shipment(ShipmentStatus::InTransit, false)));
        assert!(!can_modify(&shipment(ShipmentStatus::Delayed, false)));
        assert!(can_delete(&shipment(ShipmentStatus::Delivered, false)));
    }

    #[test]
    fn transition_table() {
        assert_eq!(next_status(ShipmentStatus::Pending), Some(ShipmentStatus::InTransit));
        assert_eq!(next_status(ShipmentStatus::InTransit), Some(ShipmentStatus::Delivered));
        assert_eq!(next_status(ShipmentStatus::Delayed), Some(ShipmentStatus::InTransit));
        assert_eq!(next_status(ShipmentStatus::Delivered), None);
        assert_eq!(next_status(ShipmentStatus::Cancelled), None);
    }

    #[test]
    fn locking_keeps_status() {
        let locked = lock_for_route(shipment(ShipmentStatus::Delayed, false), "R-7");
        assert!(locked.is_locked);
        assert_eq!(locked.route_id.as_deref(), Some("R-7"));
        assert_eq!(locked.status, ShipmentStatus::Delayed);
    }

    #[test]
    fn advance_appends_history() {
        let moved = advance_on(
            shipment(ShipmentStatus::Pending, true),
            "Algiers hub",
            "2026-01-02".into(),
        )
        .expect("pending advances");
        assert_eq!(moved.status, ShipmentStatus::InTransit);
        assert_eq!(moved.history.len(), 1);
        assert_eq!(moved.history[0].location, "Algiers hub");
        assert_eq!(moved.history[0].date, "2026-01-02");
    }

    #[test]
    fn terminal_states_do_not_advance() {
        assert!(advance(shipment(ShipmentStatus::Delivered, false), "x").is_none());
        assert!(advance(shipment(ShipmentStatus::Cancelled, false), "x").is_none());
        assert!(is_terminal(ShipmentStatus::Cancelled));
    }
}

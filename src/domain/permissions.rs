//! Role → capability table.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Manager,
    Client,
    Driver,
}

impl Role {
    pub fn name(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Manager => "manager",
            Role::Client => "client",
            Role::Driver => "driver",
        }
    }

    /// Case-insensitive parse of a backend role string.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "admin" => Some(Role::Admin),
            "manager" => Some(Role::Manager),
            "client" => Some(Role::Client),
            "driver" => Some(Role::Driver),
            _ => None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Capability {
    CreateManager,
    DeleteUsers,
    ManageFleet,
    ManageDrivers,
    CreateRoutes,
    ViewBilling,
    ViewDashboard,
    ViewComplaints,
    ManagePricing,
    ViewOwnShipments,
    CreateShipment,
    CreateComplaint,
    ViewAssignedRoutes,
    CompleteDelivery,
    ReportIncident,
}

impl Capability {
    pub const ALL: [Capability; 15] = [
        Capability::CreateManager,
        Capability::DeleteUsers,
        Capability::ManageFleet,
        Capability::ManageDrivers,
        Capability::CreateRoutes,
        Capability::ViewBilling,
        Capability::ViewDashboard,
        Capability::ViewComplaints,
        Capability::ManagePricing,
        Capability::ViewOwnShipments,
        Capability::CreateShipment,
        Capability::CreateComplaint,
        Capability::ViewAssignedRoutes,
        Capability::CompleteDelivery,
        Capability::ReportIncident,
    ];

    /// Roles granted this capability. Any authenticated role may file a complaint.
    pub fn granted_to(&self) -> &'static [Role] {
        use Role::*;
        match self {
            Capability::CreateManager | Capability::DeleteUsers => &[Admin],
            Capability::ManageFleet
            | Capability::ManageDrivers
            | Capability::CreateRoutes
            | Capability::ViewBilling
            | Capability::ViewDashboard
            | Capability::ViewComplaints
            | Capability::ManagePricing => &[Admin, Manager],
            Capability::ViewOwnShipments | Capability::CreateShipment => {
                &[Admin, Manager, Client]
            }
            Capability::CreateComplaint => &[Admin, Manager, Client, Driver],
            Capability::ViewAssignedRoutes => &[Admin, Manager, Driver],
            Capability::CompleteDelivery | Capability::ReportIncident => &[Admin, Driver],
        }
    }
}

/// Capability set resolved for one user.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Permissions {
    role: Option<Role>,
    granted: BTreeSet<Capability>,
}

impl Permissions {
    /// `None` is an unauthenticated user and carries no capability.
    pub fn for_role(role: Option<Role>) -> Self {
        let granted = match role {
            Some(role) => Capability::ALL
                .iter()
                .copied()
                .filter(|cap| cap.granted_to().contains(&role))
                .collect(),
            None => BTreeSet::new(),
        };
        Self { role, granted }
    }

    pub fn role(&self) -> Option<Role> {
        self.role
    }

    pub fn allows(&self, capability: Capability) -> bool {
        self.granted.contains(&capability)
    }

    pub fn iter(&self) -> impl Iterator<Item = Capability> + '_ {
        self.granted.iter().copied()
    }

    pub fn has_any_role(&self, roles: &[Role]) -> bool {
        self.role.map(|r| roles.contains(&r)).unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn admin_has_everything() {
        let admin = Permissions::for_role(Some(Role::Admin));
        assert!(Capability::ALL.iter().all(|cap| admin.allows(*cap)));
    }

    #[test]
    fn manager_cannot_manage_users() {
        let manager = Permissions::for_role(Some(Role::Manager));
        assert!(manager.allows(Capability::ViewBilling));
        assert!(manager.allows(Capability::ViewAssignedRoutes));
        assert!(!manager.allows(Capability::DeleteUsers));
        assert!(!manager.allows(Capability::CompleteDelivery));
    }

    #[test]
    fn driver_and_client_scopes() {
        let driver = Permissions::for_role(Some(Role::Driver));
        assert!(!driver.allows(Capability::ViewBilling));
        assert!(driver.allows(Capability::ReportIncident));
        assert!(driver.allows(Capability::CreateComplaint));
        assert!(!driver.allows(Capability::CreateShipment));

        let client = Permissions::for_role(Some(Role::Client));
        assert_eq!(
            client.iter().collect::<Vec<_>>(),
            vec![
                Capability::ViewOwnShipments,
                Capability::CreateShipment,
                Capability::CreateComplaint
            ]
        );
    }

    #[test]
    fn anonymous_has_nothing() {
        let anon = Permissions::for_role(None);
        assert_eq!(anon.iter().count(), 0);
        assert!(!anon.has_any_role(&[Role::Admin, Role::Client]));
    }

    #[test]
    fn role_parse_ignores_case() {
        assert_eq!(Role::parse("ADMIN"), Some(Role::Admin));
        assert_eq!(Role::parse(" Driver "), Some(Role::Driver));
        assert_eq!(Role::parse("owner"), None);
        assert!(Permissions::for_role(Role::parse("Manager")).has_any_role(&[Role::Manager]));
    }
}

//! Dashboard shell
//!
//! Which pages each tenant kind sees and who may open them. The HTTP
//! handlers in `api::dashboard` apply [`check_access`] and answer with
//! [`navigation`] or a redirect.

use serde::Serialize;
use shared::session::SessionData;
use shared::{BusinessType, UserRole};

pub const LOGIN_PATH: &str = "/login";
pub const PENDING_APPROVAL_PATH: &str = "/pending-approval";
pub const ADMIN_PATH: &str = "/admin";

/// A gated section of the dashboard
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Area {
    Business(BusinessType),
    Admin,
}

impl Area {
    pub fn root(&self) -> &'static str {
        match self {
            Self::Business(BusinessType::Hotel) => "/hotel/dashboard",
            Self::Business(BusinessType::Restaurant) => "/restaurant/dashboard",
            Self::Business(BusinessType::Salon) => "/salon/dashboard",
            Self::Admin => ADMIN_PATH,
        }
    }

    /// Area whose root is `path` or a parent of it
    pub fn from_path(path: &str) -> Option<Self> {
        BusinessType::ALL
            .into_iter()
            .map(Self::Business)
            .chain(std::iter::once(Self::Admin))
            .find(|area| {
                let root = area.root();
                path == root
                    || path
                        .strip_prefix(root)
                        .is_some_and(|rest| rest.starts_with('/'))
            })
    }

    /// (key, label) pairs; the first entry is the area root
    fn pages(&self) -> &'static [(&'static str, &'static str)] {
        match self {
            Self::Business(BusinessType::Hotel) => &[
                ("dashboard", "Dashboard"),
                ("reservations", "Reservations"),
                ("guests", "Guests"),
                ("rooms", "Rooms"),
                ("room-types", "Room types"),
                ("options", "Options"),
                ("opening-hours", "Opening hours"),
                ("invoices", "Invoices"),
                ("payments", "Payments"),
                ("settings", "Settings"),
            ],
            Self::Business(BusinessType::Restaurant) => &[
                ("overview", "Overview"),
                ("privatisations", "Privatisations"),
                ("tables-disponibilites", "Tables & availability"),
                ("settings", "Settings"),
                ("invoices", "Invoices"),
                ("payments", "Payments"),
            ],
            Self::Business(BusinessType::Salon) => &[
                ("dashboard", "Dashboard"),
                ("bookings", "Bookings"),
                ("clients", "Clients"),
                ("services", "Services"),
                ("staff", "Staff"),
                ("schedule", "Schedule"),
                ("rooms", "Rooms"),
                ("options", "Options"),
                ("invoices", "Invoices"),
                ("payments", "Payments"),
                ("settings", "Settings"),
            ],
            Self::Admin => &[
                ("overview", "Overview"),
                ("hotels", "Hotels"),
                ("restaurants", "Restaurants"),
                ("salons", "Salons"),
            ],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NavItem {
    pub key: &'static str,
    pub label: &'static str,
    pub href: String,
}

pub fn navigation(area: Area) -> Vec<NavItem> {
    let root = area.root();
    area.pages()
        .iter()
        .enumerate()
        .map(|(i, &(key, label))| NavItem {
            key,
            label,
            href: if i == 0 {
                root.to_string()
            } else {
                format!("{}/{}", root, key)
            },
        })
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    Allow,
    Redirect(&'static str),
}

pub fn check_access(path: &str, session: &SessionData) -> Access {
    let Some(area) = Area::from_path(path) else {
        return Access::Allow;
    };

    let user = match (&session.user, session.is_logged_in) {
        (Some(user), true) => user,
        _ => return Access::Redirect(LOGIN_PATH),
    };
    if !user.is_active {
        return Access::Redirect(PENDING_APPROVAL_PATH);
    }

    let is_admin = user.role == UserRole::Admin;
    match area {
        Area::Admin if !is_admin => Access::Redirect(LOGIN_PATH),
        Area::Admin => Access::Allow,
        Area::Business(_) if is_admin => Access::Redirect(ADMIN_PATH),
        Area::Business(kind) if session.business_type != Some(kind) => {
            Access::Redirect(LOGIN_PATH)
        }
        Area::Business(_) => Access::Allow,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::session::SessionUser;

    fn session(role: UserRole, is_active: bool, kind: Option<BusinessType>) -> SessionData {
        SessionData {
            is_logged_in: true,
            token: Some("tok".into()),
            user: Some(SessionUser {
                id: "user:u1".into(),
                first_name: None,
                last_name: None,
                email: "u@example.com".into(),
                role,
                business_type: kind,
                business_id: kind.map(|_| "business:b1".into()),
                is_active,
            }),
            business_id: kind.map(|_| "business:b1".into()),
            business_type: kind,
            services: vec![],
        }
    }

    #[test]
    fn test_area_from_path() {
        assert_eq!(
            Area::from_path("/salon/dashboard/staff"),
            Some(Area::Business(BusinessType::Salon))
        );
        assert_eq!(Area::from_path("/admin"), Some(Area::Admin));
        assert_eq!(Area::from_path("/administrator"), None);
        assert_eq!(Area::from_path("/login"), None);
    }

    #[test]
    fn test_anonymous_and_pending_users() {
        let anonymous = SessionData::default();
        assert_eq!(
            check_access("/hotel/dashboard", &anonymous),
            Access::Redirect(LOGIN_PATH)
        );
        assert_eq!(check_access("/pricing", &anonymous), Access::Allow);

        let pending = session(UserRole::Manager, false, Some(BusinessType::Hotel));
        assert_eq!(
            check_access("/hotel/dashboard/rooms", &pending),
            Access::Redirect(PENDING_APPROVAL_PATH)
        );
    }

    #[test]
    fn test_role_and_kind_gates() {
        let manager = session(UserRole::Manager, true, Some(BusinessType::Restaurant));
        assert_eq!(check_access("/restaurant/dashboard", &manager), Access::Allow);
        assert_eq!(
            check_access("/salon/dashboard", &manager),
            Access::Redirect(LOGIN_PATH)
        );
        assert_eq!(check_access("/admin/hotels", &manager), Access::Redirect(LOGIN_PATH));

        let admin = session(UserRole::Admin, true, None);
        assert_eq!(check_access("/admin/hotels", &admin), Access::Allow);
        assert_eq!(
            check_access("/hotel/dashboard", &admin),
            Access::Redirect(ADMIN_PATH)
        );
    }

    #[test]
    fn test_navigation_links() {
        let nav = navigation(Area::Business(BusinessType::Restaurant));
        assert_eq!(nav.len(), 6);
        assert_eq!(nav[0].href, "/restaurant/dashboard");
        assert_eq!(nav[2].href, "/restaurant/dashboard/tables-disponibilites");

        let nav = navigation(Area::Admin);
        assert_eq!(nav[0].href, "/admin");
        assert_eq!(nav[3].key, "salons");
        assert_eq!(navigation(Area::Business(BusinessType::Salon)).len(), 11);
    }
}

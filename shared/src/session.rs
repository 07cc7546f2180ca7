//! Session payload types
//!
//! Shape of the data sealed into the session cookie and returned by the
//! session HTTP routes. Field names are camelCase on the wire.

use crate::tenant::{BusinessType, UserRole};
use serde::{Deserialize, Serialize};

/// A business the user manages besides the active one
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceRef {
    pub business_id: String,
    pub business_type: BusinessType,
    /// `false` until an administrator approves the business
    #[serde(default)]
    pub is_active: bool,
}

impl ServiceRef {
    pub fn new(business_type: BusinessType, business_id: impl Into<String>, is_active: bool) -> Self {
        Self {
            business_id: business_id.into(),
            business_type,
            is_active,
        }
    }

    /// Same business, regardless of activation flag
    pub fn matches(&self, business_type: BusinessType, business_id: &str) -> bool {
        self.business_type == business_type && self.business_id == business_id
    }
}

/// Identity snapshot taken from the login response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionUser {
    pub id: String,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    pub email: String,
    pub role: UserRole,
    #[serde(default)]
    pub business_type: Option<BusinessType>,
    #[serde(default)]
    pub business_id: Option<String>,
    pub is_active: bool,
}

/// Everything held in the session cookie
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionData {
    pub is_logged_in: bool,
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default)]
    pub user: Option<SessionUser>,
    #[serde(default)]
    pub business_id: Option<String>,
    #[serde(default)]
    pub business_type: Option<BusinessType>,
    #[serde(default)]
    pub services: Vec<ServiceRef>,
}

/// One entry of the service-status batch response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceStatus {
    #[serde(rename = "type")]
    pub kind: String,
    pub id: String,
    pub is_active: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_data_wire_format() {
        let data = SessionData {
            is_logged_in: true,
            token: Some("tok".into()),
            user: None,
            business_id: Some("business:h1".into()),
            business_type: Some(BusinessType::Hotel),
            services: vec![ServiceRef::new(BusinessType::Salon, "business:s1", false)],
        };
        let json = serde_json::to_value(&data).unwrap();
        assert_eq!(json["isLoggedIn"], true);
        assert_eq!(json["businessType"], "hotel");
        assert_eq!(json["services"][0]["businessId"], "business:s1");
        assert_eq!(json["services"][0]["isActive"], false);
    }

    #[test]
    fn test_service_ref_defaults_inactive() {
        let svc: ServiceRef =
            serde_json::from_str(r#"{"businessId":"b1","businessType":"restaurant"}"#).unwrap();
        assert!(!svc.is_active);
        assert!(svc.matches(BusinessType::Restaurant, "b1"));
        assert!(!svc.matches(BusinessType::Hotel, "b1"));
    }

    #[test]
    fn test_service_status_uses_type_key() {
        let status = ServiceStatus {
            kind: "hotel".into(),
            id: "business:h1".into(),
            is_active: true,
        };
        let json = serde_json::to_value(&status).unwrap();
        assert_eq!(json["type"], "hotel");
        assert_eq!(json["isActive"], true);
    }
}

//! Cookie-backed session
//!
//! The whole [`SessionData`] is sealed into one httpOnly cookie. Handlers
//! go through [`SessionManager`] to read it and to produce the
//! `Set-Cookie` value after a change; [`Session`] only exposes the
//! create/mutate operations.

pub mod seal;

use axum::http::{HeaderMap, HeaderValue, header};
use shared::BusinessType;
use shared::session::{ServiceRef, SessionData, SessionUser};

pub use seal::{SealError, SessionKey};

pub const COOKIE_NAME: &str = "concierge_session";

/// Cookie lifetime (14 days)
pub const COOKIE_MAX_AGE_SECS: u64 = 14 * 24 * 3600;

/// Session state of one browser
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    data: SessionData,
}

impl Session {
    pub fn logged_out() -> Self {
        Self::default()
    }

    /// Fresh session after a successful login
    pub fn create(user: SessionUser, token: String, services: Vec<ServiceRef>) -> Self {
        Self {
            data: SessionData {
                is_logged_in: true,
                token: Some(token),
                business_id: user.business_id.clone(),
                business_type: user.business_type,
                user: Some(user),
                services,
            },
        }
    }

    pub fn is_logged_in(&self) -> bool {
        self.data.is_logged_in
    }

    pub fn data(&self) -> &SessionData {
        &self.data
    }

    pub fn token(&self) -> Option<&str> {
        self.data.token.as_deref()
    }

    fn is_active_service(&self, business_type: BusinessType, business_id: &str) -> bool {
        self.data.business_type == Some(business_type)
            && self.data.business_id.as_deref() == Some(business_id)
    }

    /// Register another business; `false` when already known
    pub fn add_service(&mut self, business_type: BusinessType, business_id: &str) -> bool {
        let known = self.is_active_service(business_type, business_id)
            || self
                .data
                .services
                .iter()
                .any(|s| s.matches(business_type, business_id));
        if known {
            return false;
        }
        self.data
            .services
            .push(ServiceRef::new(business_type, business_id, false));
        true
    }

    /// Make another business the active one
    ///
    /// The previously active business moves into the services list (marked
    /// active since it was approved) and the selected one leaves it.
    pub fn switch_service(&mut self, business_type: BusinessType, business_id: &str) {
        if self.is_active_service(business_type, business_id) {
            return;
        }

        if let (Some(prev_type), Some(prev_id)) =
            (self.data.business_type, self.data.business_id.take())
            && !self
                .data
                .services
                .iter()
                .any(|s| s.matches(prev_type, &prev_id))
        {
            self.data
                .services
                .push(ServiceRef::new(prev_type, prev_id, true));
        }

        self.data
            .services
            .retain(|s| !s.matches(business_type, business_id));
        self.data.business_type = Some(business_type);
        self.data.business_id = Some(business_id.to_string());
    }
}

/// Reads and writes the session cookie
#[derive(Clone)]
pub struct SessionManager {
    key: SessionKey,
    secure: bool,
}

impl SessionManager {
    /// `secure` adds the `Secure` cookie attribute (production)
    pub fn new(password: &str, secure: bool) -> Self {
        Self {
            key: SessionKey::derive(password),
            secure,
        }
    }

    /// Session of the request; logged out when absent or unreadable
    pub fn read(&self, headers: &HeaderMap) -> Session {
        let Some(sealed) = cookie_value(headers, COOKIE_NAME) else {
            return Session::logged_out();
        };
        match self.key.open::<SessionData>(sealed) {
            Ok(data) => Session { data },
            Err(e) => {
                tracing::debug!(error = %e, "Discarding unreadable session cookie");
                Session::logged_out()
            }
        }
    }

    /// `Set-Cookie` value persisting the session
    pub fn commit(&self, session: &Session) -> Result<HeaderValue, SealError> {
        let sealed = self.key.seal(&session.data)?;
        let cookie = format!(
            "{}={}; {}; Max-Age={}",
            COOKIE_NAME,
            sealed,
            self.attributes(),
            COOKIE_MAX_AGE_SECS
        );
        // base64url plus fixed attributes is always a valid header value
        HeaderValue::from_str(&cookie).map_err(|_| SealError::Encrypt)
    }

    /// `Set-Cookie` value expiring the session; safe to send when none exists
    pub fn destroy(&self) -> HeaderValue {
        let cookie = format!("{}=; {}; Max-Age=0", COOKIE_NAME, self.attributes());
        HeaderValue::from_str(&cookie).unwrap_or_else(|_| HeaderValue::from_static(""))
    }

    fn attributes(&self) -> &'static str {
        if self.secure {
            "HttpOnly; Path=/; SameSite=Lax; Secure"
        } else {
            "HttpOnly; Path=/; SameSite=Lax"
        }
    }
}

/// Value of one cookie from the `Cookie` headers
fn cookie_value<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(key, _)| *key == name)
        .map(|(_, value)| value)
        .filter(|value| !value.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::UserRole;

    fn user() -> SessionUser {
        SessionUser {
            id: "user:u1".into(),
            first_name: Some("Ada".into()),
            last_name: None,
            email: "ada@example.com".into(),
            role: UserRole::Manager,
            business_type: Some(BusinessType::Hotel),
            business_id: Some("business:h1".into()),
            is_active: true,
        }
    }

    fn cookie_headers(set_cookie: &HeaderValue) -> HeaderMap {
        let pair = set_cookie.to_str().unwrap().split(';').next().unwrap();
        let mut headers = HeaderMap::new();
        headers.insert(
            header::COOKIE,
            HeaderValue::from_str(&format!("theme=dark; {}", pair)).unwrap(),
        );
        headers
    }

    #[test]
    fn test_commit_then_read_round_trip() {
        let manager = SessionManager::new("session-password-session-password-xx", false);
        let session = Session::create(user(), "tok".into(), vec![]);

        let set_cookie = manager.commit(&session).unwrap();
        assert!(set_cookie.to_str().unwrap().contains("HttpOnly"));
        assert!(!set_cookie.to_str().unwrap().contains("Secure"));

        let read = manager.read(&cookie_headers(&set_cookie));
        assert_eq!(read, session);
        assert_eq!(read.data().business_type, Some(BusinessType::Hotel));
        assert_eq!(read.token(), Some("tok"));
    }

    #[test]
    fn test_missing_or_foreign_cookie_reads_logged_out() {
        let manager = SessionManager::new("session-password-session-password-xx", true);
        assert!(!manager.read(&HeaderMap::new()).is_logged_in());

        let other = SessionManager::new("another-password-another-password-x", true);
        let set_cookie = other
            .commit(&Session::create(user(), "tok".into(), vec![]))
            .unwrap();
        assert!(!manager.read(&cookie_headers(&set_cookie)).is_logged_in());
    }

    #[test]
    fn test_destroy_expires_cookie() {
        let manager = SessionManager::new("session-password-session-password-xx", true);
        let value = manager.destroy();
        let value = value.to_str().unwrap();
        assert!(value.starts_with("concierge_session=;"));
        assert!(value.contains("Max-Age=0"));
        assert!(value.contains("Secure"));
    }

    #[test]
    fn test_add_service_is_idempotent() {
        let mut session = Session::create(user(), "tok".into(), vec![]);
        assert!(session.add_service(BusinessType::Salon, "business:s1"));
        assert!(!session.add_service(BusinessType::Salon, "business:s1"));
        assert!(!session.add_service(BusinessType::Hotel, "business:h1"));

        let services = &session.data().services;
        assert_eq!(services.len(), 1);
        assert!(!services[0].is_active);
    }

    #[test]
    fn test_switch_service_swaps_active_pair() {
        let mut session = Session::create(user(), "tok".into(), vec![]);
        session.add_service(BusinessType::Salon, "business:s1");
        session.switch_service(BusinessType::Salon, "business:s1");

        let data = session.data();
        assert_eq!(data.business_type, Some(BusinessType::Salon));
        assert_eq!(data.business_id.as_deref(), Some("business:s1"));
        assert_eq!(
            data.services,
            vec![ServiceRef::new(BusinessType::Hotel, "business:h1", true)]
        );

        session.switch_service(BusinessType::Hotel, "business:h1");
        let data = session.data();
        assert_eq!(data.business_id.as_deref(), Some("business:h1"));
        assert_eq!(
            data.services,
            vec![ServiceRef::new(BusinessType::Salon, "business:s1", true)]
        );
    }
}

//! # Service Locator Client
//!
//! Request/response glue over a [`Transport`]: logs in, holds the session,
//! and exchanges wire-encoded values with the service locator. Every
//! operation is one POST of a JSON body; the interesting work — encoding and
//! decoding the values — happens in `wireline-core`.

use serde_json::{json, Value};
use tracing::debug;
use wireline_core::{DateTime, FromJson, ToJson, WireError};

use crate::directory::{DirectoryEntry, Permissions};
use crate::error::ServiceError;
use crate::transport::Transport;

/// A client of the service locator.
///
/// Holds the logged-in account and session id after [`login`] succeeds.
/// Session-scoped operations fail with [`ServiceError::NotLoggedIn`] until
/// then.
///
/// [`login`]: ServiceLocatorClient::login
#[derive(Debug)]
pub struct ServiceLocatorClient<T> {
    transport: T,
    account: Option<DirectoryEntry>,
    session_id: Option<String>,
}

fn field<'a>(response: &'a Value, name: &'static str) -> Result<&'a Value, ServiceError> {
    let object = response
        .as_object()
        .ok_or_else(|| WireError::mismatch("a response object", response))?;
    Ok(object.get(name).ok_or(WireError::MissingField(name))?)
}

impl<T: Transport> ServiceLocatorClient<T> {
    /// Creates a logged-out client over the given transport.
    pub fn new(transport: T) -> Self {
        ServiceLocatorClient {
            transport,
            account: None,
            session_id: None,
        }
    }

    /// The logged-in account, if any.
    pub fn account(&self) -> Option<&DirectoryEntry> {
        self.account.as_ref()
    }

    /// The current session id, if any.
    pub fn session_id(&self) -> Option<&str> {
        self.session_id.as_deref()
    }

    fn require_session(&self) -> Result<(), ServiceError> {
        if self.account.is_none() {
            return Err(ServiceError::NotLoggedIn);
        }
        Ok(())
    }

    /// Logs in and stores the returned account and session id.
    ///
    /// A rejected or malformed login leaves the client logged out.
    pub fn login(
        &mut self,
        username: &str,
        password: &str,
    ) -> Result<DirectoryEntry, ServiceError> {
        debug!(username, "logging in");
        let response = self.transport.post(
            "/api/service_locator/login",
            &json!({"username": username, "password": password}),
        )?;
        let account = DirectoryEntry::from_json(field(&response, "account")?)?;
        let session_id = String::from_json(field(&response, "session_id")?)?;
        debug!(account = %account, "login succeeded");
        self.account = Some(account.clone());
        self.session_id = Some(session_id);
        Ok(account)
    }

    /// Logs out and clears the session. Does nothing when not logged in.
    pub fn close(&mut self) -> Result<(), ServiceError> {
        if self.account.is_none() {
            return Ok(());
        }
        debug!("logging out");
        self.transport
            .post("/api/service_locator/logout", &json!({}))?;
        self.account = None;
        self.session_id = None;
        Ok(())
    }

    /// Loads the directory entry with the given id.
    pub fn load_directory_entry(&mut self, id: i32) -> Result<DirectoryEntry, ServiceError> {
        self.require_session()?;
        debug!(id, "loading directory entry");
        let response = self
            .transport
            .post("/api/service_locator/load_directory_entry", &json!({"id": id}))?;
        Ok(DirectoryEntry::from_json(&response)?)
    }

    /// Loads when the account registered.
    pub fn load_registration_time(
        &mut self,
        account: &DirectoryEntry,
    ) -> Result<DateTime, ServiceError> {
        self.require_session()?;
        debug!(account = %account, "loading registration time");
        let response = self.transport.post(
            "/api/service_locator/load_registration_time",
            &json!({"account": account.to_json()}),
        )?;
        Ok(DateTime::from_json(&response)?)
    }

    /// Loads when the account most recently logged in.
    pub fn load_last_login_time(
        &mut self,
        account: &DirectoryEntry,
    ) -> Result<DateTime, ServiceError> {
        self.require_session()?;
        debug!(account = %account, "loading last login time");
        let response = self.transport.post(
            "/api/service_locator/load_last_login_time",
            &json!({"account": account.to_json()}),
        )?;
        Ok(DateTime::from_json(&response)?)
    }

    /// Sets the permissions `source` holds over `target`.
    pub fn store_permissions(
        &mut self,
        source: &DirectoryEntry,
        target: &DirectoryEntry,
        permissions: Permissions,
    ) -> Result<(), ServiceError> {
        self.require_session()?;
        debug!(source = %source, target = %target, "storing permissions");
        self.transport.post(
            "/api/service_locator/store_permissions",
            &json!({
                "source": source.to_json(),
                "target": target.to_json(),
                "permissions": permissions.to_json(),
            }),
        )?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::directory::Permission;
    use std::cell::RefCell;
    use std::rc::Rc;
    use wireline_core::{Date, Duration};

    fn logged_in_response() -> Value {
        json!({
            "account": {"type": 0, "id": 12, "name": "alice"},
            "session_id": "s-1",
        })
    }

    #[test]
    fn test_login_posts_credentials_and_stores_the_session() {
        let transport = |path: &str, body: &Value| -> Result<Value, ServiceError> {
            assert_eq!(path, "/api/service_locator/login");
            assert_eq!(
                body,
                &json!({"username": "alice", "password": "hunter2"})
            );
            Ok(logged_in_response())
        };
        let mut client = ServiceLocatorClient::new(transport);

        let account = client.login("alice", "hunter2").unwrap();

        assert_eq!(account, DirectoryEntry::make_account(12, "alice"));
        assert_eq!(client.account(), Some(&account));
        assert_eq!(client.session_id(), Some("s-1"));
    }

    #[test]
    fn test_operations_require_a_session() {
        let transport =
            |_: &str, _: &Value| -> Result<Value, ServiceError> { panic!("no session, no POST") };
        let mut client = ServiceLocatorClient::new(transport);
        let account = DirectoryEntry::make_account(12, "alice");

        assert_eq!(
            client.load_directory_entry(5),
            Err(ServiceError::NotLoggedIn)
        );
        assert_eq!(
            client.load_registration_time(&account),
            Err(ServiceError::NotLoggedIn)
        );
        assert_eq!(
            client.load_last_login_time(&account),
            Err(ServiceError::NotLoggedIn)
        );
        assert_eq!(
            client.store_permissions(&account, &account, Permissions::new()),
            Err(ServiceError::NotLoggedIn)
        );
    }

    #[test]
    fn test_rejected_login_leaves_the_client_logged_out() {
        let transport = |_: &str, _: &Value| -> Result<Value, ServiceError> {
            Err(ServiceError::Rejected {
                message: "bad password".to_owned(),
                code: None,
            })
        };
        let mut client = ServiceLocatorClient::new(transport);

        assert!(client.login("alice", "wrong").is_err());
        assert_eq!(client.account(), None);
        assert_eq!(client.session_id(), None);
    }

    #[test]
    fn test_malformed_login_response_is_a_payload_error() {
        let transport = |_: &str, _: &Value| -> Result<Value, ServiceError> {
            Ok(json!({"account": {"type": 0, "id": 12, "name": "alice"}}))
        };
        let mut client = ServiceLocatorClient::new(transport);

        assert_eq!(
            client.login("alice", "hunter2"),
            Err(ServiceError::Payload(WireError::MissingField("session_id")))
        );
        assert_eq!(client.account(), None);
    }

    #[test]
    fn test_loads_directory_entries() {
        let transport = |path: &str, body: &Value| -> Result<Value, ServiceError> {
            match path {
                "/api/service_locator/login" => Ok(logged_in_response()),
                "/api/service_locator/load_directory_entry" => {
                    assert_eq!(body, &json!({"id": 5}));
                    Ok(json!({"type": 1, "id": 5, "name": "traders"}))
                }
                other => panic!("unexpected path {other}"),
            }
        };
        let mut client = ServiceLocatorClient::new(transport);
        client.login("alice", "hunter2").unwrap();

        let entry = client.load_directory_entry(5).unwrap();
        assert_eq!(entry, DirectoryEntry::make_directory(5, "traders"));
    }

    #[test]
    fn test_registration_time_decodes_the_wire_text() {
        let transport = |path: &str, body: &Value| -> Result<Value, ServiceError> {
            match path {
                "/api/service_locator/login" => Ok(logged_in_response()),
                "/api/service_locator/load_registration_time" => {
                    assert_eq!(
                        body,
                        &json!({"account": {"type": 0, "id": 12, "name": "alice"}})
                    );
                    Ok(json!("20230615T143000"))
                }
                other => panic!("unexpected path {other}"),
            }
        };
        let mut client = ServiceLocatorClient::new(transport);
        let account = client.login("alice", "hunter2").unwrap();

        let registered = client.load_registration_time(&account).unwrap();
        assert_eq!(
            registered,
            DateTime::new(Date::new(2023, 6, 15), Duration::from_ticks(52_200_000.0))
        );
    }

    #[test]
    fn test_last_login_time_decodes_sentinels() {
        let transport = |path: &str, _: &Value| -> Result<Value, ServiceError> {
            match path {
                "/api/service_locator/login" => Ok(logged_in_response()),
                "/api/service_locator/load_last_login_time" => Ok(json!("not-a-date-time")),
                other => panic!("unexpected path {other}"),
            }
        };
        let mut client = ServiceLocatorClient::new(transport);
        let account = client.login("alice", "hunter2").unwrap();

        let last_login = client.load_last_login_time(&account).unwrap();
        assert_eq!(last_login, DateTime::NOT_A_DATE_TIME);
    }

    #[test]
    fn test_store_permissions_sends_the_bit_mask() {
        let transport = |path: &str, body: &Value| -> Result<Value, ServiceError> {
            match path {
                "/api/service_locator/login" => Ok(logged_in_response()),
                "/api/service_locator/store_permissions" => {
                    assert_eq!(
                        body,
                        &json!({
                            "source": {"type": 0, "id": 12, "name": "alice"},
                            "target": {"type": 1, "id": 0, "name": "*"},
                            "permissions": 5,
                        })
                    );
                    Ok(json!(null))
                }
                other => panic!("unexpected path {other}"),
            }
        };
        let mut client = ServiceLocatorClient::new(transport);
        let account = client.login("alice", "hunter2").unwrap();

        let granted = Permissions::new()
            .with(Permission::Read)
            .with(Permission::Administrate);
        client
            .store_permissions(&account, &DirectoryEntry::star_directory(), granted)
            .unwrap();
    }

    #[test]
    fn test_close_posts_logout_and_clears_the_session() {
        let posted = Rc::new(RefCell::new(Vec::new()));
        let log = Rc::clone(&posted);
        let transport = move |path: &str, _: &Value| -> Result<Value, ServiceError> {
            log.borrow_mut().push(path.to_owned());
            match path {
                "/api/service_locator/login" => Ok(logged_in_response()),
                "/api/service_locator/logout" => Ok(json!(null)),
                other => panic!("unexpected path {other}"),
            }
        };
        let mut client = ServiceLocatorClient::new(transport);
        client.login("alice", "hunter2").unwrap();

        client.close().unwrap();

        assert_eq!(client.account(), None);
        assert_eq!(client.session_id(), None);
        assert_eq!(
            *posted.borrow(),
            vec![
                "/api/service_locator/login".to_owned(),
                "/api/service_locator/logout".to_owned(),
            ]
        );
        assert_eq!(
            client.load_directory_entry(1),
            Err(ServiceError::NotLoggedIn)
        );
    }

    #[test]
    fn test_close_without_a_session_posts_nothing() {
        let transport =
            |_: &str, _: &Value| -> Result<Value, ServiceError> { panic!("no session, no POST") };
        let mut client = ServiceLocatorClient::new(transport);
        assert_eq!(client.close(), Ok(()));
    }
}

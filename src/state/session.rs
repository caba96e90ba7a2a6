// Signed-in state, shared with every view through a context instead of a
// global token.
use std::rc::Rc;

use gloo::storage::{LocalStorage, Storage};
use yew::prelude::*;

use crate::api::{ApiClient, ApiError};
use crate::api::types::Account;
use crate::config::AppConfig;

pub const TOKEN_KEY: &str = "as_token";

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Session {
    pub token: Option<String>,
    /// Loaded from `/auth/account` after sign-in or on start.
    pub account: Option<Account>,
}

#[derive(Clone, Debug)]
pub enum SessionAction {
    SignedIn(String),
    AccountLoaded(Account),
    SignedOut,
}

impl Reducible for Session {
    type Action = SessionAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        use SessionAction::*;
        match action {
            SignedIn(token) => Rc::new(Session { token: Some(token), account: None }),
            AccountLoaded(account) => {
                if self.token.is_none() {
                    // Sign-out raced the account fetch.
                    return self;
                }
                let mut new = (*self).clone();
                new.account = Some(account);
                Rc::new(new)
            }
            SignedOut => Rc::new(Session::default()),
        }
    }
}

impl Session {
    pub fn restore() -> Self {
        Self {
            token: LocalStorage::get::<String>(TOKEN_KEY).ok().filter(|t| !t.is_empty()),
            account: None,
        }
    }

    pub fn persist(&self) {
        let saved = match &self.token {
            Some(t) => LocalStorage::set(TOKEN_KEY, t),
            None => {
                LocalStorage::delete(TOKEN_KEY);
                Ok(())
            }
        };
        if let Err(e) = saved {
            crate::util::cwarn(&format!("could not persist session: {e}"));
        }
    }

    /// A rejected token signs the user out; transport or server hiccups keep
    /// the session so the next load can retry.
    pub fn on_account_error(err: &ApiError) -> Option<SessionAction> {
        err.is_unauthorized().then_some(SessionAction::SignedOut)
    }

    pub fn is_signed_in(&self) -> bool {
        self.token.is_some()
    }

    pub fn username(&self) -> Option<&str> {
        self.account.as_ref().map(|a| a.username.as_str())
    }

    pub fn is_admin(&self) -> bool {
        self.account.as_ref().is_some_and(|a| a.is_admin)
    }
}

#[derive(Clone, PartialEq)]
pub struct SessionContext {
    pub session: UseReducerHandle<Session>,
    pub config: Rc<AppConfig>,
}

impl SessionContext {
    pub fn client(&self) -> ApiClient {
        ApiClient::new(self.config.api_base.clone(), self.session.token.clone())
    }

    pub fn sign_in(&self, token: String) {
        self.session.dispatch(SessionAction::SignedIn(token));
    }

    pub fn sign_out(&self) {
        self.session.dispatch(SessionAction::SignedOut);
    }
}

#[hook]
pub fn use_session() -> SessionContext {
    use_context::<SessionContext>().expect("SessionContext provider missing")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn account(admin: bool) -> Account {
        Account {
            id: 1,
            username: "caustic".into(),
            email: "c@example.com".into(),
            discord: None,
            is_admin: admin,
        }
    }

    #[test]
    fn sign_in_then_account() {
        let s = Rc::new(Session::default()).reduce(SessionAction::SignedIn("tok".into()));
        assert!(s.is_signed_in());
        assert_eq!(s.username(), None);
        let s = s.reduce(SessionAction::AccountLoaded(account(true)));
        assert_eq!(s.username(), Some("caustic"));
        assert!(s.is_admin());
    }

    #[test]
    fn account_after_sign_out_is_ignored() {
        let s = Rc::new(Session::default()).reduce(SessionAction::AccountLoaded(account(false)));
        assert_eq!(*s, Session::default());
    }

    #[test]
    fn only_rejected_tokens_sign_out() {
        let expired = ApiError::from_status(401, r#"{"msg":"Token has expired"}"#);
        assert!(matches!(Session::on_account_error(&expired), Some(SessionAction::SignedOut)));
        let malformed = ApiError::from_status(422, r#"{"msg":"Not enough segments"}"#);
        assert!(Session::on_account_error(&malformed).is_some());
        assert!(Session::on_account_error(&ApiError::Network("offline".into())).is_none());
        assert!(Session::on_account_error(&ApiError::from_status(502, "")).is_none());
    }

    #[test]
    fn sign_out_clears_everything() {
        let s = Rc::new(Session::default())
            .reduce(SessionAction::SignedIn("tok".into()))
            .reduce(SessionAction::AccountLoaded(account(false)))
            .reduce(SessionAction::SignedOut);
        assert!(!s.is_signed_in());
        assert!(!s.is_admin());
    }
}

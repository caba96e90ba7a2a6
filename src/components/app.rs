use std::rc::Rc;

use gloo::events::EventListener;
use yew::prelude::*;

use super::{
    admin_view::AdminView, home_view::HomeView, join_view::JoinView, lobby_view::LobbyView,
    login_view::LoginView, nav_bar::NavBar, profile_view::ProfileView, register_view::RegisterView,
};
use crate::api::auth;
use crate::config::AppConfig;
use crate::state::{Session, SessionAction, SessionContext};
use crate::util::{clog, cwarn};

#[derive(Clone, Debug, PartialEq)]
pub enum View {
    Home,
    Join,
    Login,
    Register,
    Lobby(i64),
    Profile,
    Admin,
}

impl View {
    /// Parses `location.hash`; anything unknown lands on Home.
    pub fn from_hash(hash: &str) -> Self {
        let path = hash.trim_start_matches('#').trim_start_matches('/');
        let mut parts = path.split('/');
        match (parts.next().unwrap_or(""), parts.next()) {
            ("join", _) => View::Join,
            ("login", _) => View::Login,
            ("register", _) => View::Register,
            ("profile", _) => View::Profile,
            ("admin", _) => View::Admin,
            ("lobby", Some(id)) => id.parse().map(View::Lobby).unwrap_or(View::Home),
            _ => View::Home,
        }
    }

    pub fn to_hash(&self) -> String {
        match self {
            View::Home => "#/".into(),
            View::Join => "#/join".into(),
            View::Login => "#/login".into(),
            View::Register => "#/register".into(),
            View::Lobby(id) => format!("#/lobby/{id}"),
            View::Profile => "#/profile".into(),
            View::Admin => "#/admin".into(),
        }
    }
}

fn current_hash() -> String {
    web_sys::window()
        .and_then(|w| w.location().hash().ok())
        .unwrap_or_default()
}

#[derive(Properties, PartialEq)]
pub struct AppProps {
    pub config: Rc<AppConfig>,
}

#[function_component(App)]
pub fn app(props: &AppProps) -> Html {
    let view = use_state(|| View::from_hash(&current_hash()));
    let session = use_reducer(Session::restore);

    // Follow back/forward and manual hash edits
    {
        let view = view.clone();
        use_effect_with((), move |_| {
            let listener = web_sys::window().map(|win| {
                EventListener::new(&win, "hashchange", move |_| {
                    view.set(View::from_hash(&current_hash()));
                })
            });
            move || drop(listener)
        });
    }

    // Persist token; (re)load the account whenever it changes
    {
        let session = session.clone();
        let config = props.config.clone();
        use_effect_with(session.token.clone(), move |token| {
            session.persist();
            if let Some(token) = token.clone() {
                let client = crate::api::ApiClient::new(config.api_base.clone(), Some(token));
                let session = session.clone();
                wasm_bindgen_futures::spawn_local(async move {
                    match auth::account(&client).await {
                        Ok(account) => {
                            clog(&format!("signed in as {}", account.username));
                            session.dispatch(SessionAction::AccountLoaded(account));
                        }
                        Err(e) => match Session::on_account_error(&e) {
                            Some(action) => {
                                cwarn(&format!("account load rejected, signing out: {e}"));
                                session.dispatch(action);
                            }
                            None => cwarn(&format!("account load failed, keeping token: {e}")),
                        },
                    }
                });
            }
            || ()
        });
    }

    let navigate = {
        let view = view.clone();
        Callback::from(move |next: View| {
            if let Some(win) = web_sys::window() {
                // hashchange fires afterwards and lands on the same view
                if win.location().set_hash(&next.to_hash()).is_err() {
                    cwarn("could not update location hash");
                }
            }
            view.set(next);
        })
    };

    let ctx = SessionContext { session: session.clone(), config: props.config.clone() };

    let content = match (*view).clone() {
        View::Home => html! { <HomeView navigate={navigate.clone()} /> },
        View::Join => html! { <JoinView navigate={navigate.clone()} /> },
        View::Login => html! { <LoginView navigate={navigate.clone()} /> },
        View::Register => html! { <RegisterView navigate={navigate.clone()} /> },
        View::Lobby(id) => html! { <LobbyView key={id} lobby_id={id} /> },
        View::Profile => html! { <ProfileView navigate={navigate.clone()} /> },
        View::Admin => html! { <AdminView /> },
    };

    html! {
        <ContextProvider<SessionContext> context={ctx}>
            <div style="min-height:100vh; background:#0e1116; color:#e6edf3; font-family:system-ui, sans-serif;">
                <NavBar navigate={navigate.clone()} />
                <main style="max-width:1100px; margin:0 auto; padding:16px; display:flex; flex-direction:column; gap:16px;">
                    { content }
                </main>
            </div>
        </ContextProvider<SessionContext>>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_routes_parse() {
        assert_eq!(View::from_hash(""), View::Home);
        assert_eq!(View::from_hash("#/"), View::Home);
        assert_eq!(View::from_hash("#/join"), View::Join);
        assert_eq!(View::from_hash("#/lobby/42"), View::Lobby(42));
        assert_eq!(View::from_hash("#/admin"), View::Admin);
    }

    #[test]
    fn bad_lobby_id_falls_back_home() {
        assert_eq!(View::from_hash("#/lobby/abc"), View::Home);
        assert_eq!(View::from_hash("#/lobby"), View::Home);
        assert_eq!(View::from_hash("#/nowhere"), View::Home);
    }

    #[test]
    fn hash_is_inverse_of_parse() {
        for v in [View::Home, View::Join, View::Login, View::Register, View::Lobby(7), View::Profile, View::Admin] {
            assert_eq!(View::from_hash(&v.to_hash()), v);
        }
    }
}

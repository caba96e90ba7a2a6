use gloo::dialogs::confirm;
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use super::app::View;
use super::field::{bind, TextField};
use super::{FetchStatus, ERROR_STYLE, OK_STYLE, PANEL_STYLE};
use crate::api::auth;
use crate::api::types::{Account, AccountPatch};
use crate::state::{use_session, SessionAction};
use crate::util::cwarn;

#[derive(Properties, PartialEq, Clone)]
pub struct ProfileViewProps {
    pub navigate: Callback<View>,
}

/// Only fields that differ from the loaded account go into the patch;
/// a blank password means "keep".
pub fn account_patch(current: &Account, email: &str, discord: &str, password: &str) -> AccountPatch {
    let email = email.trim();
    let discord = discord.trim();
    AccountPatch {
        email: (!email.is_empty() && email != current.email).then(|| email.to_string()),
        discord: (discord != current.discord.as_deref().unwrap_or("")).then(|| discord.to_string()),
        password: (!password.is_empty()).then(|| password.to_string()),
    }
}

#[function_component(ProfileView)]
pub fn profile_view(props: &ProfileViewProps) -> Html {
    let ctx = use_session();
    let account = ctx.session.account.clone();
    let email = use_state(String::new);
    let discord = use_state(String::new);
    let password = use_state(String::new);
    let status = use_state(|| FetchStatus::Idle);
    let saved = use_state(|| false);

    // Seed the form once the account arrives
    {
        let (email, discord) = (email.clone(), discord.clone());
        use_effect_with(account.clone(), move |account| {
            if let Some(a) = account {
                email.set(a.email.clone());
                discord.set(a.discord.clone().unwrap_or_default());
            }
            || ()
        });
    }

    let Some(account) = account else {
        let body = if ctx.session.is_signed_in() { "Loading account…" } else { "Log in to see your profile." };
        return html! { <section style={PANEL_STYLE}>{ body }</section> };
    };

    let onsubmit = {
        let ctx = ctx.clone();
        let account = account.clone();
        let (email, discord, password) = (email.clone(), discord.clone(), password.clone());
        let (status, saved) = (status.clone(), saved.clone());
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            saved.set(false);
            let patch = account_patch(&account, &email, &discord, &password);
            if patch.is_empty() {
                status.set(FetchStatus::Error("Nothing to update.".into()));
                return;
            }
            status.set(FetchStatus::Loading);
            let ctx = ctx.clone();
            let (status, saved, password) = (status.clone(), saved.clone(), password.clone());
            spawn_local(async move {
                let client = ctx.client();
                match auth::update_account(&client, &patch).await {
                    Ok(()) => {
                        status.set(FetchStatus::Idle);
                        saved.set(true);
                        password.set(String::new());
                        match auth::account(&client).await {
                            Ok(a) => ctx.session.dispatch(SessionAction::AccountLoaded(a)),
                            Err(e) => cwarn(&format!("account reload: {e}")),
                        }
                    }
                    Err(e) => status.set(FetchStatus::Error(e.to_string())),
                }
            });
        })
    };

    let on_delete = {
        let ctx = ctx.clone();
        let status = status.clone();
        let navigate = props.navigate.clone();
        Callback::from(move |_: MouseEvent| {
            if !confirm("Delete your account? This cannot be undone.") {
                return;
            }
            let ctx = ctx.clone();
            let status = status.clone();
            let navigate = navigate.clone();
            spawn_local(async move {
                match auth::delete_account(&ctx.client()).await {
                    Ok(()) => {
                        ctx.sign_out();
                        navigate.emit(View::Home);
                    }
                    Err(e) => status.set(FetchStatus::Error(e.to_string())),
                }
            });
        })
    };

    let on_logout = {
        let ctx = ctx.clone();
        let navigate = props.navigate.clone();
        Callback::from(move |_: MouseEvent| {
            ctx.sign_out();
            navigate.emit(View::Home);
        })
    };

    html! {
        <section style={PANEL_STYLE}>
            <h2 style="margin-top:0;">{ format!("Profile: {}", account.username) }</h2>
            if account.is_admin {
                <div style="font-size:12px; color:#f0883e; margin-bottom:8px;">{"Administrator"}</div>
            }
            <form {onsubmit} style="display:flex; flex-direction:column; gap:8px; max-width:320px;">
                <TextField value={(*email).clone()} placeholder="Email" input_type="email" on_change={bind(&email)} />
                <TextField value={(*discord).clone()} placeholder="Discord" on_change={bind(&discord)} />
                <TextField value={(*password).clone()} placeholder="New password" input_type="password" on_change={bind(&password)} />
                <button type="submit" disabled={*status == FetchStatus::Loading}>{"Save"}</button>
            </form>
            if *saved { <div style={OK_STYLE}>{"Saved."}</div> }
            if let FetchStatus::Error(msg) = &*status {
                <div style={ERROR_STYLE}>{ msg }</div>
            }
            <div style="display:flex; gap:8px; margin-top:16px;">
                <button onclick={on_logout}>{"Log out"}</button>
                <button onclick={on_delete} style="background:#f85149; color:#fff; border:none; border-radius:6px; padding:4px 10px;">{"Delete account"}</button>
            </div>
        </section>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn account() -> Account {
        Account {
            id: 3,
            username: "bloodhound".into(),
            email: "b@example.com".into(),
            discord: Some("hound".into()),
            is_admin: false,
        }
    }

    #[test]
    fn unchanged_form_yields_empty_patch() {
        let p = account_patch(&account(), "b@example.com", "hound", "");
        assert!(p.is_empty());
    }

    #[test]
    fn only_changed_fields_are_sent() {
        let p = account_patch(&account(), "new@example.com", "hound", "secret");
        assert_eq!(p.email.as_deref(), Some("new@example.com"));
        assert_eq!(p.discord, None);
        assert_eq!(p.password.as_deref(), Some("secret"));
    }

    #[test]
    fn clearing_discord_sends_empty_string() {
        let p = account_patch(&account(), "b@example.com", "  ", "");
        assert_eq!(p.discord.as_deref(), Some(""));
    }
}

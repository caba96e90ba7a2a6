use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use super::app::View;
use super::field::{bind, TextField};
use super::{FetchStatus, ERROR_STYLE, PANEL_STYLE};
use crate::api::auth;
use crate::api::types::Registration;
use crate::state::use_session;

#[derive(Properties, PartialEq, Clone)]
pub struct RegisterViewProps {
    pub navigate: Callback<View>,
}

/// Builds the request body; a blank discord handle is left out.
pub fn registration(username: &str, email: &str, password: &str, discord: &str) -> Registration {
    let discord = discord.trim();
    Registration {
        username: username.trim().to_string(),
        email: email.trim().to_string(),
        password: password.to_string(),
        discord: (!discord.is_empty()).then(|| discord.to_string()),
    }
}

#[function_component(RegisterView)]
pub fn register_view(props: &RegisterViewProps) -> Html {
    let ctx = use_session();
    let username = use_state(String::new);
    let email = use_state(String::new);
    let password = use_state(String::new);
    let discord = use_state(String::new);
    let status = use_state(|| FetchStatus::Idle);

    let onsubmit = {
        let ctx = ctx.clone();
        let (username, email, password, discord) =
            (username.clone(), email.clone(), password.clone(), discord.clone());
        let status = status.clone();
        let navigate = props.navigate.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            let body = registration(&username, &email, &password, &discord);
            status.set(FetchStatus::Loading);
            let ctx = ctx.clone();
            let status = status.clone();
            let navigate = navigate.clone();
            spawn_local(async move {
                match auth::register(&ctx.client(), &body).await {
                    Ok(resp) => {
                        status.set(FetchStatus::Idle);
                        ctx.sign_in(resp.access_token);
                        navigate.emit(View::Home);
                    }
                    Err(e) => status.set(FetchStatus::Error(e.to_string())),
                }
            });
        })
    };

    html! {
        <section style={PANEL_STYLE}>
            <h2 style="margin-top:0;">{"Register"}</h2>
            <form {onsubmit} style="display:flex; flex-direction:column; gap:8px; max-width:320px;">
                <TextField value={(*username).clone()} placeholder="Username" on_change={bind(&username)} required=true />
                <TextField value={(*email).clone()} placeholder="Email" input_type="email" on_change={bind(&email)} required=true />
                <TextField value={(*password).clone()} placeholder="Password" input_type="password" on_change={bind(&password)} required=true />
                <TextField value={(*discord).clone()} placeholder="Discord (optional)" on_change={bind(&discord)} />
                <button type="submit" disabled={*status == FetchStatus::Loading}>{"Create account"}</button>
            </form>
            if let FetchStatus::Error(msg) = &*status {
                <div style={ERROR_STYLE}>{ msg }</div>
            }
        </section>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_discord_is_omitted() {
        let r = registration(" wraith ", "w@example.com", "pw", "   ");
        assert_eq!(r.username, "wraith");
        assert_eq!(r.discord, None);
    }

    #[test]
    fn discord_is_trimmed() {
        let r = registration("wraith", "w@example.com", "pw", " wraith#1 ");
        assert_eq!(r.discord.as_deref(), Some("wraith#1"));
    }
}

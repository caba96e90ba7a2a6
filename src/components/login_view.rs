use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use super::app::View;
use super::field::{bind, TextField};
use super::{FetchStatus, ERROR_STYLE, PANEL_STYLE};
use crate::api::auth;
use crate::api::types::Credentials;
use crate::state::use_session;

#[derive(Properties, PartialEq, Clone)]
pub struct LoginViewProps {
    pub navigate: Callback<View>,
}

#[function_component(LoginView)]
pub fn login_view(props: &LoginViewProps) -> Html {
    let ctx = use_session();
    let username = use_state(String::new);
    let password = use_state(String::new);
    let status = use_state(|| FetchStatus::Idle);

    let onsubmit = {
        let ctx = ctx.clone();
        let username = username.clone();
        let password = password.clone();
        let status = status.clone();
        let navigate = props.navigate.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            let creds = Credentials {
                username: username.trim().to_string(),
                password: (*password).clone(),
            };
            status.set(FetchStatus::Loading);
            let ctx = ctx.clone();
            let status = status.clone();
            let navigate = navigate.clone();
            spawn_local(async move {
                match auth::login(&ctx.client(), &creds).await {
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

    let to_register = {
        let navigate = props.navigate.clone();
        Callback::from(move |_: MouseEvent| navigate.emit(View::Register))
    };

    html! {
        <section style={PANEL_STYLE}>
            <h2 style="margin-top:0;">{"Login"}</h2>
            <form {onsubmit} style="display:flex; flex-direction:column; gap:8px; max-width:320px;">
                <TextField value={(*username).clone()} placeholder="Username" on_change={bind(&username)} required=true />
                <TextField value={(*password).clone()} placeholder="Password" input_type="password" on_change={bind(&password)} required=true />
                <button type="submit" disabled={*status == FetchStatus::Loading}>{"Login"}</button>
            </form>
            if let FetchStatus::Error(msg) = &*status {
                <div style={ERROR_STYLE}>{ msg }</div>
            }
            <div style="margin-top:8px; font-size:13px;">
                {"No account? "}
                <button onclick={to_register} style="background:none; border:none; color:#58a6ff; cursor:pointer; padding:0;">{"Register"}</button>
            </div>
        </section>
    }
}

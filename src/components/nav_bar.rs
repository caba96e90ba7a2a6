use yew::prelude::*;

use super::app::View;
use crate::state::use_session;

#[derive(Properties, PartialEq, Clone)]
pub struct NavBarProps {
    pub navigate: Callback<View>,
}

fn link(label: &'static str, to: View, navigate: &Callback<View>) -> Html {
    let navigate = navigate.clone();
    let onclick = Callback::from(move |_: MouseEvent| navigate.emit(to.clone()));
    html! { <button {onclick} style="background:none; border:none; color:#58a6ff; cursor:pointer; font-size:14px;">{ label }</button> }
}

#[function_component(NavBar)]
pub fn nav_bar(props: &NavBarProps) -> Html {
    let ctx = use_session();
    let session = &*ctx.session;
    let right = if session.is_signed_in() {
        let who = session.username().unwrap_or("…").to_string();
        html! { <>
            if session.is_admin() { { link("Admin", View::Admin, &props.navigate) } }
            { link("Profile", View::Profile, &props.navigate) }
            <span style="opacity:0.7; font-size:13px;">{ who }</span>
        </> }
    } else {
        html! { <>
            { link("Login", View::Login, &props.navigate) }
            { link("Register", View::Register, &props.navigate) }
        </> }
    };
    html! {
        <nav style="display:flex; align-items:center; justify-content:space-between; padding:10px 16px; background:#161b22; border-bottom:1px solid #30363d;">
            <div style="display:flex; gap:8px; align-items:center;">
                <strong style="margin-right:12px;">{"Apex Scrims"}</strong>
                { link("Home", View::Home, &props.navigate) }
                { link("Join lobby", View::Join, &props.navigate) }
            </div>
            <div style="display:flex; gap:8px; align-items:center;">{ right }</div>
        </nav>
    }
}

use web_sys::HtmlInputElement;
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct TextFieldProps {
    pub value: String,
    pub placeholder: AttrValue,
    pub on_change: Callback<String>,
    #[prop_or(AttrValue::Static("text"))]
    pub input_type: AttrValue,
    #[prop_or(false)]
    pub required: bool,
}

#[function_component(TextField)]
pub fn text_field(props: &TextFieldProps) -> Html {
    let oninput = {
        let cb = props.on_change.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            cb.emit(input.value());
        })
    };
    html! {
        <input
            type={props.input_type.clone()}
            placeholder={props.placeholder.clone()}
            value={props.value.clone()}
            required={props.required}
            {oninput}
            style="padding:6px 8px; background:#0d1117; color:#e6edf3; border:1px solid #30363d; border-radius:6px;"
        />
    }
}

/// `on_change` callback writing into a string state handle.
pub fn bind(handle: &UseStateHandle<String>) -> Callback<String> {
    let handle = handle.clone();
    Callback::from(move |v: String| handle.set(v))
}

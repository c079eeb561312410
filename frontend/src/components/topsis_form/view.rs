//! View rendering for the TOPSIS form component.
//!
//! Five inputs, a submit button with an inline loader, and two message areas
//! (`#error-message`, `#success-message`). The native submit event is
//! cancelled and turned into `Msg::Submit`.

use web_sys::{HtmlInputElement, SubmitEvent};
use yew::html::Scope;
use yew::prelude::*;

use super::helpers::describe_file;
use super::messages::Msg;
use super::state::TopsisFormComponent;

/// Main view function for the form component.
pub fn view(component: &TopsisFormComponent, ctx: &Context<TopsisFormComponent>) -> Html {
    let link = ctx.link();
    let onsubmit = link.callback(|e: SubmitEvent| {
        e.prevent_default();
        Msg::Submit
    });

    html! {
        <div class="container">
            <h1>{"TOPSIS Analysis"}</h1>
            <p class="subtitle">{"Upload a decision matrix and receive the ranked result by email."}</p>
            <form id="topsisForm" ref={component.form_ref.clone()} {onsubmit} novalidate={true}>
                { build_file_input(component, link) }
                { text_input(&component.weights_ref, "weights", "Weights", "1,1,1,2") }
                { text_input(&component.impacts_ref, "impacts", "Impacts", "+,+,-,+") }
                { email_input(component) }
                { build_submit_button(component.busy) }
            </form>
            <p id="error-message" class="message error">{ component.error_message.clone() }</p>
            <p id="success-message" class="message success">{ component.success_message.clone() }</p>
        </div>
    }
}

fn build_file_input(component: &TopsisFormComponent, link: &Scope<TopsisFormComponent>) -> Html {
    let onchange = link.callback(|e: Event| {
        let input = e.target_unchecked_into::<HtmlInputElement>();
        Msg::FileChanged(input.files().and_then(|files| files.get(0)))
    });

    html! {
        <div class="form-group">
            <label for="file">{"Input file (.csv, .xlsx)"}</label>
            <input type="file" id="file" name="file" accept=".csv,.xlsx,.xls" ref={component.file_ref.clone()} {onchange} />
            {
                if let Some(file) = &component.selected_file {
                    html! { <small class="file-info">{ describe_file(file) }</small> }
                } else {
                    html! {}
                }
            }
        </div>
    }
}

fn text_input(node_ref: &NodeRef, id: &'static str, label: &'static str, placeholder: &'static str) -> Html {
    html! {
        <div class="form-group">
            <label for={id}>{label}</label>
            <input type="text" id={id} name={id} {placeholder} ref={node_ref.clone()} />
        </div>
    }
}

fn email_input(component: &TopsisFormComponent) -> Html {
    html! {
        <div class="form-group">
            <label for="email">{"Email"}</label>
            <input type="email" id="email" name="email" placeholder="user@example.com" ref={component.email_ref.clone()} />
        </div>
    }
}

/// The label and the loader swap places while a request is in flight.
fn build_submit_button(busy: bool) -> Html {
    let (label_style, loader_style) = if busy {
        ("display: none;", "display: block;")
    } else {
        ("display: inline;", "display: none;")
    };

    html! {
        <button type="submit" id="submitBtn" disabled={busy}>
            <span class="btn-text" style={label_style}>{"Submit"}</span>
            <div class="loader" style={loader_style}></div>
        </button>
    }
}

//! Update function for the TOPSIS form component.
//!
//! `Msg::Submit` reads the inputs and spawns the submit flow; the flow then
//! reports back through the port messages, which are the only messages that
//! change the message areas or the busy flag.

use yew::platform::spawn_local;
use yew::prelude::*;

use crate::submission::{handle_submit, BrowserTransport};

use super::messages::Msg;
use super::state::{SelectedFile, TopsisFormComponent};

/// Central update function for the component.
///
/// Returns `true` when the view must re-render.
pub fn update(component: &mut TopsisFormComponent, ctx: &Context<TopsisFormComponent>, msg: Msg) -> bool {
    match msg {
        Msg::Submit => {
            let Some(input) = component.begin_submit() else {
                return false;
            };
            let ports = ctx.link().clone();
            let config = ctx.props().config.clone();
            spawn_local(async move {
                let outcome = handle_submit(&ports, &BrowserTransport, &config, input).await;
                log::debug!("submission finished: {}", outcome.message());
            });
            false
        }
        Msg::FileChanged(file) => {
            component.selected_file = file.as_ref().map(SelectedFile::from);
            true
        }
        Msg::ClearMessages => {
            component.error_message.clear();
            component.success_message.clear();
            true
        }
        Msg::ShowError(message) => {
            component.error_message = message;
            true
        }
        Msg::ShowSuccess(message) => {
            component.success_message = message;
            true
        }
        Msg::SetBusy(busy) => {
            component.busy = busy;
            true
        }
        Msg::ResetForm => {
            component.reset_inputs();
            true
        }
    }
}

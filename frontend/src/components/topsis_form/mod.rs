//! TOPSIS submission form: root module wiring the Yew `Component`
//! implementation with submodules for state, update logic and view rendering.
//!
//! The component owns the DOM side of the form. The submit flow itself lives
//! in `crate::submission`; this module only hands it the input values and a
//! set of ports, implemented on the component's `Scope` so that every UI
//! effect of the flow comes back as a `Msg`.

use yew::html::Scope;
use yew::prelude::*;

use crate::submission::FormPorts;

mod helpers;
mod messages;
mod props;
mod state;
mod update;
mod view;

pub use messages::Msg;
pub use props::TopsisFormProps;
pub use state::TopsisFormComponent;

impl Component for TopsisFormComponent {
    type Message = Msg;
    type Properties = TopsisFormProps;

    fn create(_ctx: &Context<Self>) -> Self {
        TopsisFormComponent::new()
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        update::update(self, ctx, msg)
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        view::view(self, ctx)
    }
}

impl FormPorts for Scope<TopsisFormComponent> {
    fn clear_messages(&self) {
        self.send_message(Msg::ClearMessages);
    }

    fn show_error(&self, message: &str) {
        self.send_message(Msg::ShowError(message.to_string()));
    }

    fn show_success(&self, message: &str) {
        self.send_message(Msg::ShowSuccess(message.to_string()));
    }

    fn set_busy(&self, busy: bool) {
        self.send_message(Msg::SetBusy(busy));
    }

    fn reset_form(&self) {
        self.send_message(Msg::ResetForm);
    }
}

//! Component state for the TOPSIS form.
//!
//! Holds the references to the form inputs, the text of the two message
//! areas, the busy flag and a summary of the selected file.

use web_sys::{HtmlFormElement, HtmlInputElement};
use yew::prelude::*;

use common::model::submission::FormFields;

use crate::submission::FormInput;

/// Name and size of the file currently selected in the file input.
#[derive(Clone, Debug, PartialEq)]
pub struct SelectedFile {
    pub name: String,
    pub size: u64,
}

/// Main state container for the `TopsisFormComponent`.
///
/// Fields are `pub` because they are accessed by `view` and `update` modules.
pub struct TopsisFormComponent {
    /// Reference to the `<form>` element, used to reset it after a success.
    pub form_ref: NodeRef,

    pub file_ref: NodeRef,
    pub weights_ref: NodeRef,
    pub impacts_ref: NodeRef,
    pub email_ref: NodeRef,

    /// Text of the error area. Empty when nothing is shown.
    pub error_message: String,

    /// Text of the success area. Empty when nothing is shown.
    pub success_message: String,

    /// `true` while a request is in flight: the button is disabled and the
    /// loader replaces its label.
    pub busy: bool,

    pub selected_file: Option<SelectedFile>,
}

impl TopsisFormComponent {
    pub fn new() -> Self {
        Self {
            form_ref: Default::default(),
            file_ref: Default::default(),
            weights_ref: Default::default(),
            impacts_ref: Default::default(),
            email_ref: Default::default(),
            error_message: String::new(),
            success_message: String::new(),
            busy: false,
            selected_file: None,
        }
    }

    /// Reads the current values of every input.
    ///
    /// Missing elements read as empty, which the validation then reports.
    pub fn read_input(&self) -> FormInput<web_sys::File> {
        let file = self
            .file_ref
            .cast::<HtmlInputElement>()
            .and_then(|input| input.files())
            .and_then(|files| files.get(0));

        FormInput {
            file,
            fields: FormFields {
                weights: input_value(&self.weights_ref),
                impacts: input_value(&self.impacts_ref),
                email: input_value(&self.email_ref),
            },
        }
    }

    /// Reads the inputs for a new submission, or `None` while one is in
    /// flight. The button is disabled while busy, but Enter in a text input
    /// still submits the form.
    pub fn begin_submit(&self) -> Option<FormInput<web_sys::File>> {
        (!self.busy).then(|| self.read_input())
    }

    /// Clears every input through the native form reset.
    pub fn reset_inputs(&mut self) {
        if let Some(form) = self.form_ref.cast::<HtmlFormElement>() {
            form.reset();
        }
        self.selected_file = None;
    }
}

fn input_value(node: &NodeRef) -> String {
    node.cast::<HtmlInputElement>()
        .map(|input| input.value())
        .unwrap_or_default()
}

#[derive(Clone)]
pub enum Msg {
    Submit,
    FileChanged(Option<web_sys::File>),
    ClearMessages,
    ShowError(String),
    ShowSuccess(String),
    SetBusy(bool),
    ResetForm,
}

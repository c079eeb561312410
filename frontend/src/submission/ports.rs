//! UI handles used by the submission handler.
//!
//! The handler never looks elements up by itself; whoever drives it passes
//! an implementation of [`FormPorts`]. The form component implements it by
//! posting messages to its own scope.

pub trait FormPorts {
    /// Empties both the error and the success area.
    fn clear_messages(&self);

    fn show_error(&self, message: &str);

    fn show_success(&self, message: &str);

    /// `true` disables the submit control, hides its label and shows the
    /// loader; `false` restores it.
    fn set_busy(&self, busy: bool);

    /// Clears every input of the form.
    fn reset_form(&self);
}

/// Holds the form in its busy state until dropped.
pub(crate) struct BusyGuard<'a, P: FormPorts + ?Sized> {
    ports: &'a P,
}

impl<'a, P: FormPorts + ?Sized> BusyGuard<'a, P> {
    pub(crate) fn enter(ports: &'a P) -> Self {
        ports.set_busy(true);
        Self { ports }
    }
}

impl<P: FormPorts + ?Sized> Drop for BusyGuard<'_, P> {
    fn drop(&mut self) {
        self.ports.set_busy(false);
    }
}

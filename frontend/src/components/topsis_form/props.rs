//! Defines the properties for the `TopsisFormComponent`.

use yew::prelude::*;

use crate::config::SubmitConfig;

/// Properties for the `TopsisFormComponent`.
#[derive(Properties, PartialEq, Clone)]
pub struct TopsisFormProps {
    /// Endpoint and error hint used for every submission.
    ///
    /// Defaults to the build-time configuration of the running page.
    #[prop_or_else(SubmitConfig::from_environment)]
    pub config: SubmitConfig,
}

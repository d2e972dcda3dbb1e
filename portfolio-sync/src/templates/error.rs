//! Card template error types.

use thiserror::Error;

/// Errors raised while turning repositories into card markup.
#[derive(Debug, Error)]
pub enum TemplateError {
    /// A card could not be rendered, e.g. the template names an unknown field.
    #[error("Failed to render project card: {0}")]
    RenderError(#[from] handlebars::RenderError),

    /// The card template does not parse.
    #[error("Invalid card template: {0}")]
    RegistrationError(#[from] handlebars::TemplateError),
}

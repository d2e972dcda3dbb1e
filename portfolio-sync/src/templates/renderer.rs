//! Project card renderer.

use super::{TemplateError, DEFAULT_SNIPPET_TEMPLATE, FALLBACK_DESCRIPTION, PLACEHOLDER_IMAGE_URL};
use crate::classify::ClassifiedRepository;
use handlebars::{html_escape, no_escape, Handlebars, Template};
use serde_json::{json, Value};

/// Creates a configured Handlebars registry.
///
/// The registry is configured with:
/// - No HTML escaping unless `escape_html` is set
/// - Strict mode (catches missing variables in custom templates)
#[must_use]
pub fn create_handlebars_registry(escape_html: bool) -> Handlebars<'static> {
    let mut hbs = Handlebars::new();

    if escape_html {
        hbs.register_escape_fn(html_escape);
    } else {
        hbs.register_escape_fn(no_escape);
    }

    hbs.set_strict_mode(true);

    hbs
}

/// Renders repositories into project card markup.
pub struct SnippetRenderer {
    handlebars: Handlebars<'static>,
    template: String,
}

impl Default for SnippetRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl SnippetRenderer {
    /// Creates a renderer with the built-in template and no escaping.
    #[must_use]
    pub fn new() -> Self {
        Self {
            handlebars: create_handlebars_registry(false),
            template: DEFAULT_SNIPPET_TEMPLATE.to_string(),
        }
    }

    /// Enables or disables HTML escaping of interpolated values.
    ///
    /// Without escaping, repository names and descriptions containing markup
    /// end up in the document verbatim.
    #[must_use]
    pub fn with_escape_html(mut self, escape_html: bool) -> Self {
        self.handlebars = create_handlebars_registry(escape_html);
        self
    }

    /// Replaces the built-in card template.
    #[must_use]
    pub fn with_template(mut self, template: String) -> Self {
        self.template = template;
        self
    }

    /// Checks that the template parses.
    ///
    /// # Errors
    ///
    /// Returns [`TemplateError::RegistrationError`] for a malformed template.
    pub fn validate(&self) -> Result<(), TemplateError> {
        Template::compile(&self.template)?;
        Ok(())
    }

    /// Renders one card. `position` is zero-based; cards are numbered from 1.
    ///
    /// # Errors
    ///
    /// Returns an error if the template fails to parse or references an
    /// unknown variable.
    pub fn render(
        &self,
        repository: &ClassifiedRepository,
        position: usize,
    ) -> Result<String, TemplateError> {
        let data = card_data(repository, position);
        Ok(self.handlebars.render_template(&self.template, &data)?)
    }

    /// Renders every repository in order.
    ///
    /// # Errors
    ///
    /// Returns the first rendering error.
    pub fn render_all(
        &self,
        repositories: &[ClassifiedRepository],
    ) -> Result<Vec<String>, TemplateError> {
        repositories
            .iter()
            .enumerate()
            .map(|(position, repository)| self.render(repository, position))
            .collect()
    }
}

fn card_data(repository: &ClassifiedRepository, position: usize) -> Value {
    let record = &repository.record;

    json!({
        "ordinal": position + 1,
        "category": repository.category.as_str(),
        "name": record.name,
        "image_url": PLACEHOLDER_IMAGE_URL,
        "live_url": record.live_url(),
        "repository_url": record.canonical_url,
        "display_name": repository.display_name,
        "description": record.description.as_deref().unwrap_or(FALLBACK_DESCRIPTION),
        "tags": repository.display_tags,
    })
}

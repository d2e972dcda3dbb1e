//! Project card rendering using Handlebars.
//!
//! Each selected repository becomes one card; cards are joined with newlines
//! in ranking order before being spliced into the portfolio document.

mod error;
mod renderer;

pub use error::TemplateError;
pub use renderer::{create_handlebars_registry, SnippetRenderer};

/// Description used when a repository has none.
pub const FALLBACK_DESCRIPTION: &str =
    "A well-crafted project showcasing modern development practices and clean code architecture.";

/// Placeholder image shown on every card.
pub const PLACEHOLDER_IMAGE_URL: &str =
    "https://images.unsplash.com/photo-1460925895917-afdab827c52f?w=600&h=400&fit=crop";

/// Built-in card template.
///
/// Available variables: `ordinal`, `category`, `name`, `image_url`,
/// `live_url`, `repository_url`, `display_name`, `description`, `tags`.
/// The image URL is a fixed constant and is emitted unescaped.
pub const DEFAULT_SNIPPET_TEMPLATE: &str = r#"
                <!-- Project {{ordinal}} -->
                <div class="project-card" data-category="{{category}}">
                    <div class="project-image">
                        <img src="{{{image_url}}}" alt="{{name}}">
                        <div class="project-overlay">
                            <div class="project-links">
                                <a href="{{live_url}}" class="project-link" target="_blank"><i class="fas fa-external-link-alt"></i></a>
                                <a href="{{repository_url}}" class="project-link" target="_blank"><i class="fab fa-github"></i></a>
                            </div>
                        </div>
                    </div>
                    <div class="project-info">
                        <h3>{{display_name}}</h3>
                        <p>{{description}}</p>
                        <div class="project-tech">
                            {{#each tags}}<span class="tech-tag">{{this}}</span>{{/each}}
                        </div>
                    </div>
                </div>"#;

/// Joins rendered cards in order, one newline between each.
#[must_use]
pub fn join_snippets(snippets: &[String]) -> String {
    snippets.join("\n")
}

//! Template loading and rendering via `minijinja`.
//!
//! Templates are compiled into the binary from `templates/`. A directory
//! can be configured to override any of them by file name; templates it
//! does not contain keep the built-in version.

use std::path::Path;
use std::sync::LazyLock;

use axum::http::StatusCode;
use axum::response::Html;
use minijinja::{Environment, context};
use serde::Serialize;

use crate::error::WebError;

const TEMPLATES: &[(&str, &str)] = &[
    ("layout.html", include_str!("../templates/layout.html")),
    ("index.html", include_str!("../templates/index.html")),
    ("error.html", include_str!("../templates/error.html")),
    ("owners/find.html", include_str!("../templates/owners/find.html")),
    ("owners/list.html", include_str!("../templates/owners/list.html")),
    ("owners/form.html", include_str!("../templates/owners/form.html")),
    ("owners/details.html", include_str!("../templates/owners/details.html")),
    ("pets/form.html", include_str!("../templates/pets/form.html")),
    ("pets/visit_form.html", include_str!("../templates/pets/visit_form.html")),
    ("vets/list.html", include_str!("../templates/vets/list.html")),
];

/// Built-in views used for error pages, which are rendered outside any
/// request state.
static ERROR_VIEWS: LazyLock<Option<Views>> = LazyLock::new(|| Views::builtin().ok());

/// Holds every page template.
pub struct Views {
    env: Environment<'static>,
}

impl Views {
    /// Load the templates compiled into the binary.
    ///
    /// # Errors
    ///
    /// Returns [`WebError::Template`] if a template fails to parse.
    pub fn builtin() -> Result<Self, WebError> {
        let mut env = Environment::new();
        for &(name, source) in TEMPLATES {
            env.add_template(name, source)?;
        }
        Ok(Self { env })
    }

    /// Load the built-in templates, then replace each one that also exists
    /// under `dir`.
    ///
    /// # Errors
    ///
    /// Returns [`WebError::Internal`] if an override cannot be read, or
    /// [`WebError::Template`] if one fails to parse.
    pub fn with_overrides(dir: &Path) -> Result<Self, WebError> {
        let mut views = Self::builtin()?;

        for &(name, _) in TEMPLATES {
            let path = dir.join(name);
            if !path.is_file() {
                continue;
            }
            let source = std::fs::read_to_string(&path).map_err(|e| {
                WebError::Internal(format!("failed to read template {}: {e}", path.display()))
            })?;
            views.env.add_template_owned(name, source)?;
            tracing::debug!(template = name, path = %path.display(), "Loaded template override");
        }

        Ok(views)
    }

    /// Render template `name` with `ctx`.
    ///
    /// # Errors
    ///
    /// Returns [`WebError::Template`] if the template is unknown or fails
    /// to render.
    pub fn render<S: Serialize>(&self, name: &str, ctx: S) -> Result<Html<String>, WebError> {
        let template = self.env.get_template(name)?;
        Ok(Html(template.render(ctx)?))
    }
}

impl std::fmt::Debug for Views {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Views")
            .field("templates", &TEMPLATES.len())
            .finish_non_exhaustive()
    }
}

/// Render the error page for `status`, falling back to plain text if the
/// template is unavailable.
pub fn render_error_page(status: StatusCode, message: &str) -> String {
    let rendered = ERROR_VIEWS.as_ref().and_then(|views| {
        views
            .render(
                "error.html",
                context! { status => status.as_u16(), reason => status.canonical_reason(), message },
            )
            .ok()
    });

    match rendered {
        Some(Html(body)) => body,
        None => format!("{status}: {message}"),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn builtin_templates_parse() {
        let views = Views::builtin().unwrap();
        let Html(body) = views
            .render("index.html", context! { welcome => "Welcome" })
            .unwrap();
        assert!(body.contains("Welcome"));
    }

    #[test]
    fn error_page_contains_message() {
        let body = render_error_page(StatusCode::NOT_FOUND, "Owner with ID x not found");
        assert!(body.contains("Owner with ID x not found"));
        assert!(body.contains("404"));
    }

    #[test]
    fn html_is_escaped() {
        let body = render_error_page(StatusCode::BAD_REQUEST, "<script>");
        assert!(!body.contains("<script>"));
    }

    #[test]
    fn missing_override_dir_keeps_builtins() {
        let views = Views::with_overrides(Path::new("/nonexistent/templates")).unwrap();
        assert!(views.render("vets/list.html", context! { vets => Vec::<String>::new() }).is_ok());
    }
}

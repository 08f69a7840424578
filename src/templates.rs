//! HTML rendering.
//!
//! Page templates are compiled into the binary and rendered with minijinja.
//! Handlers talk to the [`Renderer`] trait so a failing renderer can be
//! substituted in tests.

use minijinja::{Environment, Value};

use crate::error::AppResult;

/// Renders a named template with a data context
#[cfg_attr(test, mockall::automock)]
pub trait Renderer: Send + Sync {
    fn render(&self, template: &str, ctx: Value) -> AppResult<String>;
}

const TEMPLATES: &[(&str, &str)] = &[
    ("layout.html", include_str!("../templates/layout.html")),
    ("_instance_status.html", include_str!("../templates/_instance_status.html")),
    ("index.html", include_str!("../templates/index.html")),
    ("genre_list.html", include_str!("../templates/genre_list.html")),
    ("genre_detail.html", include_str!("../templates/genre_detail.html")),
    ("genre_form.html", include_str!("../templates/genre_form.html")),
    ("genre_delete.html", include_str!("../templates/genre_delete.html")),
    ("author_list.html", include_str!("../templates/author_list.html")),
    ("author_detail.html", include_str!("../templates/author_detail.html")),
    ("author_form.html", include_str!("../templates/author_form.html")),
    ("author_delete.html", include_str!("../templates/author_delete.html")),
    ("book_list.html", include_str!("../templates/book_list.html")),
    ("book_detail.html", include_str!("../templates/book_detail.html")),
    ("book_form.html", include_str!("../templates/book_form.html")),
    ("book_delete.html", include_str!("../templates/book_delete.html")),
    ("bookinstance_list.html", include_str!("../templates/bookinstance_list.html")),
    ("bookinstance_detail.html", include_str!("../templates/bookinstance_detail.html")),
    ("bookinstance_form.html", include_str!("../templates/bookinstance_form.html")),
    ("bookinstance_delete.html", include_str!("../templates/bookinstance_delete.html")),
];

/// Embedded page templates
pub struct Templates {
    env: Environment<'static>,
}

impl Templates {
    pub fn new() -> AppResult<Self> {
        let mut env = Environment::new();
        for (name, source) in TEMPLATES {
            env.add_template(name, source)?;
        }
        Ok(Self { env })
    }
}

impl Renderer for Templates {
    fn render(&self, template: &str, ctx: Value) -> AppResult<String> {
        Ok(self.env.get_template(template)?.render(ctx)?)
    }
}

// crates/server/src/render.rs
//! HTML rendering of channel records.

use std::path::Path;

use minijinja::Environment;
use serde::Serialize;

/// Template used for the channel page.
pub const STATISTICS_TEMPLATE: &str = "statistics";

/// Named-template renderer backed by a directory of `<name>.html` files.
///
/// Templates are loaded on first use and kept for the life of the process.
/// `.html` templates are auto-escaped.
pub struct Renderer {
    env: Environment<'static>,
}

impl Renderer {
    pub fn new(template_dir: impl AsRef<Path>) -> Self {
        let mut env = Environment::new();
        env.set_loader(minijinja::path_loader(template_dir.as_ref().to_path_buf()));
        Self { env }
    }

    pub fn render<S: Serialize>(&self, name: &str, data: &S) -> Result<String, minijinja::Error> {
        let template = self.env.get_template(&format!("{name}.html"))?;
        template.render(data)
    }
}

//! HTML email signatures rendered from static per-project templates.
//!
//! Every project template extends `signatures/base.html` and only fills in
//! the project label and web links. Templates are compiled once, so a broken
//! template surfaces when the renderer is built rather than per request.

use tera::{Context, Tera};
use thiserror::Error;

use crate::domain::signature::{Project, SignatureRequest};

const BASE_TEMPLATE_NAME: &str = "signatures/base.html";
const BASE_TEMPLATE: &str = include_str!("../../../templates/signatures/base.html");

#[derive(Debug, Error)]
pub enum SignatureError {
    #[error("signature templates failed to compile: {0}")]
    Compile(#[source] tera::Error),
    #[error("signature template `{template}` failed to render: {source}")]
    Render {
        template: String,
        #[source]
        source: tera::Error,
    },
}

#[derive(Clone, Debug)]
pub struct SignatureRenderer {
    tera: Tera,
}

impl SignatureRenderer {
    pub fn new() -> Result<Self, SignatureError> {
        let mut templates = vec![(BASE_TEMPLATE_NAME.to_owned(), BASE_TEMPLATE)];
        templates.extend(
            Project::ALL
                .into_iter()
                .map(|project| (template_name(project), template_source(project))),
        );

        let mut tera = Tera::default();
        tera.add_raw_templates(templates).map_err(SignatureError::Compile)?;
        tera.autoescape_on(vec![".html"]);
        tera.set_escape_fn(escape_markup);

        Ok(Self { tera })
    }

    pub fn render(&self, request: &SignatureRequest) -> Result<String, SignatureError> {
        let template = template_name(request.project);

        let mut context = Context::new();
        context.insert("full_name", &request.full_name);
        context.insert("pronouns", &request.formatted_pronouns());
        context.insert("position", &request.position);
        context.insert("email", &request.email);
        context.insert("work_number", request.work_number.as_deref().unwrap_or(""));

        let html = self
            .tera
            .render(&template, &context)
            .map_err(|source| SignatureError::Render { template: template.clone(), source })?;

        match request.work_number {
            Some(_) => Ok(html),
            None => Ok(strip_blank_lines(&html)),
        }
    }
}

fn template_name(project: Project) -> String {
    format!("signatures/{project}.html")
}

fn template_source(project: Project) -> &'static str {
    match project {
        Project::EachOne => include_str!("../../../templates/signatures/each-one.html"),
        Project::Community => include_str!("../../../templates/signatures/community.html"),
        Project::Cuz => include_str!("../../../templates/signatures/cuz.html"),
        Project::Jugend => include_str!("../../../templates/signatures/jugend.html"),
        Project::Nar => include_str!("../../../templates/signatures/nar.html"),
        Project::Afrolution => include_str!("../../../templates/signatures/afrolution.html"),
    }
}

// Slashes stay literal so pronouns like `sie/ihr` read naturally in mail clients.
fn escape_markup(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#x27;"),
            other => escaped.push(other),
        }
    }
    escaped
}

fn strip_blank_lines(html: &str) -> String {
    html.lines().filter(|line| !line.trim().is_empty()).collect::<Vec<_>>().join("\n")
}

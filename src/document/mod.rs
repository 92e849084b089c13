//! Document assembly subsystem.
//!
//! # Data Flow
//! ```text
//! RenderContext (envelope + ambient fields)
//!     → markup.rs (body markup, or a redirect signal)
//!     → styles.rs (critical styles for the classes actually used)
//!     → assets.rs / amp.rs (canonical chunks XOR the AMP asset set)
//!     → serialize.rs (script-safe initial state, canonical only)
//!     → compose skeleton → minify.rs → final HTML string
//! ```
//!
//! # Design Decisions
//! - Pure: same context in, byte-identical document out. Wall-clock
//!   fields (`timeOnServer`) are the dispatcher's responsibility and
//!   arrive already set in the context.
//! - Canonical hydration scripts and the AMP asset set are mutually
//!   exclusive per response.

pub mod amp;
pub mod assets;
pub mod markup;
pub mod minify;
pub mod serialize;
pub mod styles;

use serde::Serialize;

pub use assets::{AssetError, AssetRegistry};

use crate::toggles::ToggleSet;
use crate::upstream::PageDataEnvelope;

/// The initial state serialized into the document for hydration.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PageJson {
    #[serde(flatten)]
    pub envelope: PageDataEnvelope,
    pub toggles: ToggleSet,
    pub path: String,
    /// Milliseconds since the epoch, set by the dispatcher.
    pub time_on_server: u64,
    pub show_ads_based_on_location: bool,
}

/// Everything the assembler needs for one response. Built once per
/// request, consumed once, never persisted.
#[derive(Debug, Clone)]
pub struct RenderContext {
    pub bbc_origin: Option<String>,
    pub data: PageJson,
    pub is_amp: bool,
    pub service: String,
    /// Inbound path without query string.
    pub path: String,
    /// Full inbound URL (path + query).
    pub url: String,
}

/// Outcome of document assembly: exactly one of HTML or redirect.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderOutcome {
    Html(String),
    Redirect(String),
}

/// Fatal assembly failures. Mapped to 500 by the dispatcher.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("success envelope carries an error payload")]
    InconsistentEnvelope,

    #[error("failed to serialize page state: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Assembles final HTML documents from render contexts.
pub struct DocumentAssembler {
    assets: AssetRegistry,
}

impl DocumentAssembler {
    pub fn new(assets: AssetRegistry) -> Self {
        Self { assets }
    }

    /// Produce the response document for a render context.
    pub fn render(&self, context: &RenderContext) -> Result<RenderOutcome, RenderError> {
        let app = match markup::render_app(context)? {
            markup::AppMarkup::Redirect(url) => return Ok(RenderOutcome::Redirect(url)),
            markup::AppMarkup::Page(html) => html,
        };

        let critical_styles = styles::extract_critical(&app);
        let resource_hints = self.resource_hints(context.is_amp);
        let (title, description) = head_text(context);

        let html_attrs = if context.is_amp {
            r#" amp lang="en-GB""#.to_string()
        } else {
            r#" lang="en-GB" class="no-js""#.to_string()
        };
        let body_attrs = if context.is_amp {
            r#" class="amp-geo-pending""#
        } else {
            ""
        };
        let head_assets = if context.is_amp {
            amp::head_assets()
        } else {
            String::new()
        };
        let scripts = if context.is_amp {
            String::new()
        } else {
            self.hydration_scripts(&context.data)?
        };

        let doc = format!(
            concat!(
                "<!doctype html>\n",
                "<html{html_attrs}>\n",
                "<head>\n",
                "<meta charset=\"utf-8\"/>\n",
                "<meta name=\"viewport\" content=\"width=device-width,initial-scale=1\"/>\n",
                "<title>{title}</title>\n",
                "{description}",
                "<link rel=\"shortcut icon\" href=\"/favicon.ico\" type=\"image/x-icon\"/>\n",
                "{resource_hints}",
                "<style>{styles}</style>\n",
                "{head_assets}",
                "</head>\n",
                "<body{body_attrs}>\n",
                "<div id=\"root\">{app}</div>\n",
                "{scripts}",
                "</body>\n",
                "</html>"
            ),
            html_attrs = html_attrs,
            title = markup::escape_html(&title),
            description = description
                .map(|d| format!(
                    "<meta name=\"description\" content=\"{}\"/>\n",
                    markup::escape_html(&d)
                ))
                .unwrap_or_default(),
            resource_hints = resource_hints,
            styles = critical_styles,
            head_assets = head_assets,
            body_attrs = body_attrs,
            app = app,
            scripts = scripts,
        );

        Ok(RenderOutcome::Html(minify::minify(&doc)))
    }

    /// `preconnect` and `dns-prefetch` hints for every distinct asset
    /// origin this response can reference.
    fn resource_hints(&self, is_amp: bool) -> String {
        let mut origins = self.assets.origins();
        if is_amp {
            let amp_origin = amp::AMP_ORIGIN.to_string();
            if !origins.contains(&amp_origin) {
                origins.push(amp_origin);
            }
        }
        origins
            .iter()
            .map(|origin| {
                format!(
                    concat!(
                        "<link rel=\"preconnect\" href=\"{origin}\" crossorigin=\"anonymous\"/>",
                        "<link rel=\"dns-prefetch\" href=\"{origin}\"/>\n"
                    ),
                    origin = origin
                )
            })
            .collect()
    }

    /// Serialized state plus deferred chunk scripts, canonical only.
    fn hydration_scripts(&self, data: &PageJson) -> Result<String, RenderError> {
        let serialized = serialize::serialize_for_script(data)?;
        Ok(format!(
            concat!(
                "<script>window.__INITIAL_DATA__={serialized}</script>\n",
                "<!--[if !IE]><!-->\n",
                "{chunks}\n",
                "<!--<![endif]-->\n",
                "<script>document.documentElement.classList.remove(\"no-js\");</script>\n"
            ),
            serialized = serialized,
            chunks = self.assets.script_tags(),
        ))
    }
}

fn head_text(context: &RenderContext) -> (String, Option<String>) {
    match context.data.envelope.page_data() {
        Some(data) => (data.title.clone(), Some(data.description.clone())),
        None => (
            format!("Error {}", context.data.envelope.status),
            None,
        ),
    }
}

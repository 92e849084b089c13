//! Body markup for the supported page kinds.
//!
//! This is the stand-in for the UI component layer: it turns a render
//! context into the `#root` markup string. Topic pages carry the
//! `topic-promos` / `topic-pagination` test ids the end-to-end suites
//! key on; error envelopes render a status page.

use crate::document::{RenderContext, RenderError};
use crate::upstream::{EnvelopeResult, PageData};

/// Result of rendering the app markup: a page body, or a redirect the
/// routing layer signalled.
pub enum AppMarkup {
    Page(String),
    Redirect(String),
}

/// Render the body markup for a request.
pub fn render_app(context: &RenderContext) -> Result<AppMarkup, RenderError> {
    match &context.data.envelope.result {
        EnvelopeResult::Data(data) => {
            if context.data.envelope.status == 200 && data.active_page > data.page_count {
                // Out-of-range page: send the client back to the
                // unpaginated path.
                return Ok(AppMarkup::Redirect(context.path.clone()));
            }
            Ok(AppMarkup::Page(topic_page(data, context.is_amp)))
        }
        EnvelopeResult::Error(message) => {
            if context.data.envelope.status == 200 {
                return Err(RenderError::InconsistentEnvelope);
            }
            Ok(AppMarkup::Page(error_page(
                context.data.envelope.status,
                message,
            )))
        }
    }
}

fn topic_page(data: &PageData, is_amp: bool) -> String {
    let mut out = String::with_capacity(1024);
    out.push_str(r#"<main role="main" class="page-main">"#);
    out.push_str(&format!(
        r#"<h1 id="content" class="page-title">{}</h1>"#,
        escape_html(&data.title)
    ));
    out.push_str(&format!(
        r#"<p class="topic-description">{}</p>"#,
        escape_html(&data.description)
    ));

    out.push_str(r#"<ul data-testid="topic-promos" class="promo-list">"#);
    for promo in &data.promos {
        out.push_str(r#"<li class="promo">"#);
        out.push_str(&format!(
            r#"<h2 class="promo-heading"><a class="promo-link" href="{}">{}</a></h2>"#,
            escape_html(&promo.link),
            escape_html(&promo.title)
        ));
        out.push_str(&format!(
            r#"<time class="promo-timestamp" datetime="{}">{}</time>"#,
            escape_html(&promo.first_published),
            escape_html(&promo.first_published)
        ));
        out.push_str(&promo_image(promo, is_amp));
        out.push_str("</li>");
    }
    out.push_str("</ul>");

    if let Some(pagination) = data.pagination() {
        out.push_str(
            r#"<nav class="pagination" aria-label="Page"><ol data-testid="topic-pagination" class="pagination-list">"#,
        );
        for page in 1..=pagination.page_count {
            if page == pagination.active_page {
                out.push_str(&format!(
                    r#"<li class="pagination-item pagination-active" aria-current="page">{page}</li>"#
                ));
            } else {
                out.push_str(&format!(r#"<li class="pagination-item">{page}</li>"#));
            }
        }
        out.push_str("</ol></nav>");
    }

    out.push_str("</main>");
    out
}

fn promo_image(promo: &crate::upstream::Promo, is_amp: bool) -> String {
    if promo.image_url.is_empty() {
        return String::new();
    }
    let src = escape_html(&promo.image_url);
    let alt = escape_html(&promo.image_alt);
    if is_amp {
        format!(
            r#"<amp-img class="promo-image" src="{src}" alt="{alt}" width="1024" height="576" layout="responsive"></amp-img>"#
        )
    } else {
        format!(r#"<img class="promo-image" src="{src}" alt="{alt}" loading="lazy"/>"#)
    }
}

fn error_page(status: u16, message: &str) -> String {
    format!(
        concat!(
            r#"<main role="main" class="page-main error-page">"#,
            r#"<h1 class="error-status">{status}</h1>"#,
            r#"<p class="error-message">{message}</p>"#,
            "</main>"
        ),
        status = status,
        message = escape_html(message),
    )
}

/// Escape text for use in HTML content and attribute values.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

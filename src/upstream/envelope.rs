//! The tagged result of a page-data fetch.
//!
//! Exactly one of `pageData`/`error` is populated. The envelope
//! serializes to the shape embedded in the rendered document for client
//! hydration, so field names are camelCase on the wire.

use serde::{Deserialize, Serialize};

/// Uniform result of the page-data fetch stage.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PageDataEnvelope {
    /// HTTP status the response to the client will carry.
    pub status: u16,

    #[serde(flatten)]
    pub result: EnvelopeResult,
}

/// Success or failure payload. Externally tagged, so the envelope
/// serializes as `{"status":N,"pageData":{..}}` or
/// `{"status":N,"error":".."}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum EnvelopeResult {
    #[serde(rename = "pageData")]
    Data(PageData),

    #[serde(rename = "error")]
    Error(String),
}

impl PageDataEnvelope {
    pub fn ok(status: u16, data: PageData) -> Self {
        Self {
            status,
            result: EnvelopeResult::Data(data),
        }
    }

    pub fn error(status: u16, message: impl Into<String>) -> Self {
        Self {
            status,
            result: EnvelopeResult::Error(message.into()),
        }
    }

    pub fn page_data(&self) -> Option<&PageData> {
        match &self.result {
            EnvelopeResult::Data(data) => Some(data),
            EnvelopeResult::Error(_) => None,
        }
    }

    pub fn error_message(&self) -> Option<&str> {
        match &self.result {
            EnvelopeResult::Data(_) => None,
            EnvelopeResult::Error(message) => Some(message),
        }
    }
}

/// Normalized page content for one rendered page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageData {
    pub title: String,
    pub description: String,
    pub promos: Vec<Promo>,
    pub active_page: u32,
    pub page_count: u32,
    pub metadata: PageMetadata,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageMetadata {
    #[serde(rename = "type")]
    pub kind: String,
}

/// A single promoted item. Order within `promos` is presentation order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Promo {
    pub title: String,
    #[serde(rename = "type")]
    pub kind: String,
    /// ISO-8601 publication timestamp, passed through untouched.
    pub first_published: String,
    pub image_url: String,
    pub image_alt: String,
    pub link: String,
    pub id: String,
}

/// Derived pagination view. Absent when there is a single page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub active_page: u32,
    pub page_count: u32,
}

impl PageData {
    /// Pagination control data; `None` when `page_count <= 1`. The
    /// maximum page index exposed equals `page_count`.
    pub fn pagination(&self) -> Option<Pagination> {
        if self.page_count <= 1 {
            return None;
        }
        Some(Pagination {
            active_page: self.active_page,
            page_count: self.page_count,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page_data(page_count: u32) -> PageData {
        PageData {
            title: "Donald Trump".into(),
            description: "Donald Trump articles".into(),
            promos: vec![],
            active_page: 1,
            page_count,
            metadata: PageMetadata {
                kind: "Topic".into(),
            },
        }
    }

    #[test]
    fn success_envelope_serializes_with_page_data_key() {
        let envelope = PageDataEnvelope::ok(200, page_data(1));
        let json = serde_json::to_value(&envelope).unwrap();

        assert_eq!(json["status"], 200);
        assert_eq!(json["pageData"]["title"], "Donald Trump");
        assert_eq!(json["pageData"]["activePage"], 1);
        assert!(json.get("error").is_none());
    }

    #[test]
    fn error_envelope_serializes_with_error_key() {
        let envelope = PageDataEnvelope::error(404, "Not Found");
        let json = serde_json::to_value(&envelope).unwrap();

        assert_eq!(json["status"], 404);
        assert_eq!(json["error"], "Not Found");
        assert!(json.get("pageData").is_none());
    }

    #[test]
    fn single_page_has_no_pagination() {
        assert!(page_data(0).pagination().is_none());
        assert!(page_data(1).pagination().is_none());
    }

    #[test]
    fn multi_page_pagination_exposes_page_count_as_max() {
        let pagination = page_data(42).pagination().unwrap();
        assert_eq!(pagination.page_count, 42);
        assert_eq!(pagination.active_page, 1);
    }

    #[test]
    fn promo_round_trips_camel_case() {
        let promo: Promo = serde_json::from_value(serde_json::json!({
            "title": "Wetin happun for January 6 one year ago?",
            "type": "article",
            "firstPublished": "2022-01-06T19:00:29.000Z",
            "imageUrl": "mock-image-url",
            "imageAlt": "mock-image-alt",
            "link": "mock-link",
            "id": "54321"
        }))
        .unwrap();

        assert_eq!(promo.kind, "article");
        assert_eq!(promo.first_published, "2022-01-06T19:00:29.000Z");

        let json = serde_json::to_value(&promo).unwrap();
        assert_eq!(json["firstPublished"], "2022-01-06T19:00:29.000Z");
        assert_eq!(json["imageAlt"], "mock-image-alt");
    }
}

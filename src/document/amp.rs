//! AMP runtime and boilerplate assets.
//!
//! AMP pages carry a fixed, ordered asset set instead of hydration
//! scripts: the boilerplate styles, the runtime, then the geo, consent
//! and analytics extensions. The order is part of the AMP contract and
//! must not change.

/// Mandatory AMP boilerplate style.
pub const AMP_BOILERPLATE_CSS: &str = "body{-webkit-animation:-amp-start 8s steps(1,end) 0s 1 normal both;-moz-animation:-amp-start 8s steps(1,end) 0s 1 normal both;-ms-animation:-amp-start 8s steps(1,end) 0s 1 normal both;animation:-amp-start 8s steps(1,end) 0s 1 normal both}@-webkit-keyframes -amp-start{from{visibility:hidden}to{visibility:visible}}@-moz-keyframes -amp-start{from{visibility:hidden}to{visibility:visible}}@-ms-keyframes -amp-start{from{visibility:hidden}to{visibility:visible}}@-o-keyframes -amp-start{from{visibility:hidden}to{visibility:visible}}@keyframes -amp-start{from{visibility:hidden}to{visibility:visible}}";

/// Boilerplate override for clients without JavaScript.
pub const AMP_NOSCRIPT_CSS: &str =
    "body{-webkit-animation:none;-moz-animation:none;-ms-animation:none;animation:none}";

const AMP_RUNTIME_JS: &str = r#"<script async src="https://cdn.ampproject.org/v0.js"></script>"#;
const AMP_GEO_JS: &str = r#"<script async custom-element="amp-geo" src="https://cdn.ampproject.org/v0/amp-geo-0.1.js"></script>"#;
const AMP_CONSENT_JS: &str = r#"<script async custom-element="amp-consent" src="https://cdn.ampproject.org/v0/amp-consent-0.1.js"></script>"#;
const AMP_ANALYTICS_JS: &str = r#"<script async custom-element="amp-analytics" src="https://cdn.ampproject.org/v0/amp-analytics-0.1.js"></script>"#;

/// Origin the AMP runtime is served from, for resource hints.
pub const AMP_ORIGIN: &str = "https://cdn.ampproject.org";

/// The full head asset block for an AMP page, in contract order.
pub fn head_assets() -> String {
    format!(
        concat!(
            "<style amp-boilerplate=\"\">{boilerplate}</style>",
            "<noscript><style amp-boilerplate=\"\">{noscript}</style></noscript>",
            "{runtime}{geo}{consent}{analytics}"
        ),
        boilerplate = AMP_BOILERPLATE_CSS,
        noscript = AMP_NOSCRIPT_CSS,
        runtime = AMP_RUNTIME_JS,
        geo = AMP_GEO_JS,
        consent = AMP_CONSENT_JS,
        analytics = AMP_ANALYTICS_JS,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn assets_are_in_contract_order() {
        let assets = head_assets();
        let runtime = assets.find("v0.js").unwrap();
        let geo = assets.find("amp-geo").unwrap();
        let consent = assets.find("amp-consent").unwrap();
        let analytics = assets.find("amp-analytics").unwrap();

        assert!(runtime < geo && geo < consent && consent < analytics);
    }

    #[test]
    fn boilerplate_precedes_runtime() {
        let assets = head_assets();
        assert!(assets.find("amp-boilerplate").unwrap() < assets.find("v0.js").unwrap());
    }
}

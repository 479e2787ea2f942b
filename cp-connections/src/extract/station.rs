//! Station detail scanning.
//!
//! Unlike the rest of an entry, the station detail node has no fixed shape:
//! the name, platform and request-stop marker appear or not depending on the
//! stop. They are found by attribute signature anywhere under the node.

use crate::document::Element;

use super::layout::text_of;

/// Localized `title` attributes that label station detail fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StationLabels {
    /// Title of the platform/track element.
    pub platform: String,
    /// Title of the request-stop marker element.
    pub request_stop: String,
}

impl StationLabels {
    /// Create labels for a site localization.
    pub fn new(platform: impl Into<String>, request_stop: impl Into<String>) -> Self {
        Self {
            platform: platform.into(),
            request_stop: request_stop.into(),
        }
    }
}

impl Default for StationLabels {
    fn default() -> Self {
        Self::new("nástupište", "na znamenie")
    }
}

/// Optional fields found under one station detail node.
#[derive(Debug, Default, PartialEq, Eq)]
pub(super) struct StationDetails {
    pub name: Option<String>,
    pub platform: Option<String>,
    pub on_request: Option<String>,
}

fn is_name(el: &Element) -> bool {
    el.class().is_some_and(|c| c.trim() == "name")
}

/// Scan `node` (itself included) for the three station fields.
///
/// An element counts for the first field it matches, checked in the order
/// name, platform, request stop. When several elements match one field the
/// last in document order wins, even if its text is empty.
pub(super) fn station_details(node: &Element, labels: &StationLabels) -> StationDetails {
    let is_platform =
        |el: &Element| !is_name(el) && el.attr("title") == Some(labels.platform.as_str());
    let is_request = |el: &Element| {
        !is_name(el)
            && !is_platform(el)
            && el.attr("title") == Some(labels.request_stop.as_str())
    };

    StationDetails {
        name: node.find_all(is_name).last().and_then(text_of),
        platform: node.find_all(is_platform).last().and_then(text_of),
        on_request: node.find_all(is_request).last().and_then(text_of),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::Document;

    fn scan(markup: &str) -> StationDetails {
        let doc = Document::parse(markup.as_bytes()).unwrap();
        let node = doc.find_first(|e| e.id() == Some("st")).unwrap();
        station_details(node, &StationLabels::default())
    }

    #[test]
    fn all_fields_present() {
        let details = scan(
            r#"<div id="st">
                <strong class="name ">Bratislava hl.st.</strong>
                <span title="nástupište">3A</span>
                <span title="na znamenie">x</span>
            </div>"#,
        );
        assert_eq!(details.name.as_deref(), Some("Bratislava hl.st."));
        assert_eq!(details.platform.as_deref(), Some("3A"));
        assert_eq!(details.on_request.as_deref(), Some("x"));
    }

    #[test]
    fn no_matches_leaves_all_none() {
        let details = scan(r#"<div id="st"><span>Miloslavov</span></div>"#);
        assert_eq!(details, StationDetails::default());
    }

    #[test]
    fn finds_fields_at_any_depth() {
        let details = scan(
            r#"<div id="st"><p><em><span title="nástupište"> 1 </span></em></p></div>"#,
        );
        assert_eq!(details.platform.as_deref(), Some("1"));
    }

    #[test]
    fn last_platform_in_document_order_wins() {
        let details = scan(
            r#"<div id="st">
                <span title="nástupište">1</span>
                <p><span title="nástupište">2</span></p>
            </div>"#,
        );
        assert_eq!(details.platform.as_deref(), Some("2"));
    }

    #[test]
    fn last_match_without_text_clears_field() {
        let details = scan(
            r#"<div id="st"><span title="nástupište">1</span><span title="nástupište"></span></div>"#,
        );
        assert_eq!(details.platform, None);
    }

    #[test]
    fn name_class_takes_priority_over_title() {
        let details = scan(
            r#"<div id="st"><span class="name" title="nástupište">Senec</span></div>"#,
        );
        assert_eq!(details.name.as_deref(), Some("Senec"));
        assert_eq!(details.platform, None);
    }

    #[test]
    fn scans_node_itself() {
        let details = scan(r#"<span id="st" class="name">Senec</span>"#);
        assert_eq!(details.name.as_deref(), Some("Senec"));
    }

    #[test]
    fn custom_labels() {
        let doc = Document::parse(
            r#"<div id="st"><span title="platform">7</span><span title="request stop">R</span></div>"#
                .as_bytes(),
        )
        .unwrap();
        let node = doc.find_first(|e| e.id() == Some("st")).unwrap();
        let labels = StationLabels::new("platform", "request stop");
        let details = station_details(node, &labels);
        assert_eq!(details.platform.as_deref(), Some("7"));
        assert_eq!(details.on_request.as_deref(), Some("R"));
    }
}

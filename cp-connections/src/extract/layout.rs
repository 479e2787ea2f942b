//! Fixed-position accessors for one journey entry.
//!
//! The results page has no schema; fields sit at stable child indices inside
//! each `connectionBox` entry. Every index used by the extractor lives in
//! this file, one accessor per block, so a site redesign means editing
//! the accessor for the block that moved and nothing else.
//!
//! Entry shape, as indices from the entry root:
//!
//! ```text
//! entry @data-share-url
//! ├─ [0][0][1]  header
//! │   ├─ [0]    schedule   text = departure time, [0].text = departure date
//! │   └─ [1]    totals     [0].text = duration, [1].text = distance
//! └─ [1][0][0]  details
//!     ├─ [0][0][0]  title container
//!     │   ├─ [1]    title node  @title = title, [0].text = id
//!     │   ├─ [2]    owner block when class is "line-right-part reset"
//!     │   └─ [3]    owner block otherwise
//!     ├─ [1]        delay bubble
//!     └─ [2]        track      [0] = from, [1] = to
//!                   each side: [0].text = time, [1] = station detail
//! ```

use crate::document::Element;

use super::error::LayoutMismatch;

/// Class marking the title container's inline owner block.
pub const INLINE_OWNER_CLASS: &str = "line-right-part reset";

/// Walk `indices` down from `from`, failing with the block's `path`.
fn at<'a>(
    from: &'a Element,
    indices: &[usize],
    path: &'static str,
) -> Result<&'a Element, LayoutMismatch> {
    indices.iter().try_fold(from, |node, &i| {
        node.child(i).ok_or(LayoutMismatch::missing_node(path))
    })
}

/// Trimmed, non-blank leading text of `el`.
pub(super) fn text_of(el: &Element) -> Option<String> {
    el.text()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
}

fn required_text(el: &Element, path: &'static str) -> Result<String, LayoutMismatch> {
    text_of(el).ok_or(LayoutMismatch::missing_text(path))
}

fn required_attr(
    el: &Element,
    attr: &'static str,
    path: &'static str,
) -> Result<String, LayoutMismatch> {
    el.attr(attr)
        .map(str::to_string)
        .ok_or(LayoutMismatch::missing_attribute(path, attr))
}

/// `entry@data-share-url`
pub(super) fn share_url(entry: &Element) -> Result<String, LayoutMismatch> {
    required_attr(entry, "data-share-url", "entry")
}

/// Scheduled start and totals, read from the header block.
#[derive(Debug)]
pub(super) struct Header {
    pub departure_time: String,
    pub departure_date: String,
    pub total_duration: String,
    pub total_distance: String,
}

/// `entry[0][0][1]`
pub(super) fn header_block(entry: &Element) -> Result<Header, LayoutMismatch> {
    let header = at(entry, &[0, 0, 1], "entry[0][0][1]")?;

    let schedule = at(header, &[0], "entry[0][0][1][0]")?;
    let date = at(schedule, &[0], "entry[0][0][1][0][0]")?;
    let totals = at(header, &[1], "entry[0][0][1][1]")?;
    let duration = at(totals, &[0], "entry[0][0][1][1][0]")?;
    let distance = at(totals, &[1], "entry[0][0][1][1][1]")?;

    Ok(Header {
        departure_time: required_text(schedule, "entry[0][0][1][0]")?,
        departure_date: required_text(date, "entry[0][0][1][0][0]")?,
        total_duration: required_text(duration, "entry[0][0][1][1][0]")?,
        total_distance: required_text(distance, "entry[0][0][1][1][1]")?,
    })
}

/// `entry[1][0][0]`
pub(super) fn details_block(entry: &Element) -> Result<&Element, LayoutMismatch> {
    at(entry, &[1, 0, 0], "entry[1][0][0]")
}

/// `details[0][0][0]`
pub(super) fn title_container(details: &Element) -> Result<&Element, LayoutMismatch> {
    at(details, &[0, 0, 0], "entry[1][0][0][0][0][0]")
}

/// Line id and full title from the title node at `container[1]`.
///
/// The node's visible text is a shortened label; the full description is
/// only in its `title` attribute.
pub(super) fn line_title(container: &Element) -> Result<(String, String), LayoutMismatch> {
    let node = at(container, &[1], "entry[1][0][0][0][0][0][1]")?;
    let title = required_attr(node, "title", "entry[1][0][0][0][0][0][1]")?;
    let id_node = at(node, &[0], "entry[1][0][0][0][0][0][1][0]")?;
    let id = required_text(id_node, "entry[1][0][0][0][0][0][1][0]")?;
    Ok((id, title))
}

/// Where the carrier name is displayed.
///
/// The site uses two layouts for the owner, told apart only by the class
/// of `container[2]`.
#[derive(Debug, Clone, Copy)]
pub(super) enum OwnerSource<'a> {
    /// `container[2]` carries [`INLINE_OWNER_CLASS`]; owner is its `[0][0]`.
    Inline(&'a Element),
    /// Any other `container[2]`; owner is `container[3][0][0]`.
    Parent(&'a Element),
}

impl<'a> OwnerSource<'a> {
    pub(super) fn resolve(container: &'a Element) -> Result<Self, LayoutMismatch> {
        let specs = at(container, &[2], "entry[1][0][0][0][0][0][2]")?;
        if specs.class() == Some(INLINE_OWNER_CLASS) {
            Ok(OwnerSource::Inline(specs))
        } else {
            let block = at(container, &[3], "entry[1][0][0][0][0][0][3]")?;
            Ok(OwnerSource::Parent(block))
        }
    }

    pub(super) fn owner(&self) -> Result<String, LayoutMismatch> {
        match self {
            OwnerSource::Inline(block) => {
                let path = "entry[1][0][0][0][0][0][2][0][0]";
                required_text(at(block, &[0, 0], path)?, path)
            }
            OwnerSource::Parent(block) => {
                let path = "entry[1][0][0][0][0][0][3][0][0]";
                required_text(at(block, &[0, 0], path)?, path)
            }
        }
    }
}

/// Delay text from the bubble at `details[1]`.
///
/// A bubble without children holds the text itself; otherwise the text is
/// in its first child. Blank text means no known delay.
pub(super) fn delay(details: &Element) -> Result<Option<String>, LayoutMismatch> {
    let bubble = at(details, &[1], "entry[1][0][0][1]")?;
    let source = bubble.child(0).unwrap_or(bubble);
    Ok(text_of(source))
}

/// One side of the track block.
#[derive(Debug)]
pub(super) struct TrackSide<'a> {
    pub time: String,
    pub station: &'a Element,
}

/// `details[2]`, split into its "from" and "to" sides.
pub(super) fn track_block(
    details: &Element,
) -> Result<(TrackSide<'_>, TrackSide<'_>), LayoutMismatch> {
    let track = at(details, &[2], "entry[1][0][0][2]")?;

    let from = at(track, &[0], "entry[1][0][0][2][0]")?;
    let from = TrackSide {
        time: required_text(
            at(from, &[0], "entry[1][0][0][2][0][0]")?,
            "entry[1][0][0][2][0][0]",
        )?,
        station: at(from, &[1], "entry[1][0][0][2][0][1]")?,
    };

    let to = at(track, &[1], "entry[1][0][0][2][1]")?;
    let to = TrackSide {
        time: required_text(
            at(to, &[0], "entry[1][0][0][2][1][0]")?,
            "entry[1][0][0][2][1][0]",
        )?,
        station: at(to, &[1], "entry[1][0][0][2][1][1]")?,
    };

    Ok((from, to))
}

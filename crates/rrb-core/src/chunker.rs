//! Splits a rendered report into Telegram-sized segments.
//!
//! Segments are continuations: they must be delivered to a recipient in
//! order. Item blocks are the unit of packing; a block is never split across
//! two segments. One block larger than the limit is passed through as its own
//! oversized segment rather than truncated; Telegram then rejects that one
//! send and the dispatcher records the failure.

use crate::{
    formatting::{ITEM_DIVIDER, SECTION_RULE},
    locale::ReportStyle,
};

/// Split `text` into segments of at most `max_len` bytes (with the
/// documented oversized-block exception).
///
/// A document that fits is returned unchanged as the sole segment. Otherwise
/// the header/summary region becomes the first segment, closed by the items
/// heading and rule, and item blocks are packed into the following segments
/// with the divider restored between them. The item region's first segment
/// keeps its own copy of the heading, so readers of any later message still
/// see which section they are in.
pub fn split_report(text: &str, style: &ReportStyle, max_len: usize) -> Vec<String> {
    if text.len() <= max_len {
        return vec![text.to_string()];
    }

    // Escaped user text cannot contain a literal `<b>`, so the bold heading
    // is a reliable boundary marker.
    let marker = format!("<b>{}</b>", style.locale.labels().items_heading);
    let Some(boundary) = text.find(&marker) else {
        return split_plain(text, max_len);
    };

    let header = &text[..boundary];
    let item_region = &text[boundary..];
    let blocks: Vec<&str> = item_region.split(ITEM_DIVIDER).collect();

    let mut segments = vec![format!("{header}{marker}\n{SECTION_RULE}")];

    // Each non-final block carries its trailing divider, so the size check
    // sees the full cost of a block before committing it to a segment.
    let mut current = String::new();
    for (i, block) in blocks.iter().enumerate() {
        let mut piece = (*block).to_string();
        if i + 1 < blocks.len() {
            piece.push_str(ITEM_DIVIDER);
        }
        if !current.is_empty() && current.len() + piece.len() > max_len {
            segments.push(std::mem::take(&mut current));
        }
        current.push_str(&piece);
    }
    if !current.is_empty() {
        segments.push(current);
    }

    segments
}

/// Fixed-width fallback for overlong documents without an items heading.
fn split_plain(text: &str, max_len: usize) -> Vec<String> {
    let mut out = Vec::new();
    let mut cur = String::new();

    for ch in text.chars() {
        if cur.len() >= max_len {
            out.push(cur);
            cur = String::new();
        }
        cur.push(ch);
    }
    if !cur.is_empty() {
        out.push(cur);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        formatting::render_report,
        locale::{Locale, ReportStyle},
        submission::{Item, Submission, Summary},
    };

    fn style() -> ReportStyle {
        ReportStyle::new(Locale::Uk, false)
    }

    fn submission_with_items(count: usize, ads_len: usize) -> Submission {
        let items = (0..count)
            .map(|i| {
                let code = format!("T{i}");
                (
                    code.clone(),
                    Item {
                        code,
                        name: format!("Item {i}"),
                        time_view_formatted: "1:00".to_string(),
                        time_typing_formatted: "2:00".to_string(),
                        ads_copy: "a".repeat(ads_len),
                        analysis: "ok".to_string(),
                        landing: "https://example.com/l".to_string(),
                        video: "https://example.com/v".to_string(),
                    },
                )
            })
            .collect::<Vec<_>>();

        Submission {
            fio: "Test".to_string(),
            telegram: "@t".to_string(),
            submitted_at_local: "01.01.2026".to_string(),
            summary: Summary {
                total_view_time_formatted: "5:00".to_string(),
                total_typing_time_formatted: "7:00".to_string(),
                items_count: count as u32,
            },
            items,
            page_url: "https://example.com".to_string(),
            user_agent: "Mozilla/5.0".to_string(),
            version: None,
        }
    }

    #[test]
    fn short_document_is_a_single_unchanged_segment() {
        let report = render_report(&submission_with_items(1, 50), &style());
        let segments = split_report(&report, &style(), 4000);
        assert_eq!(segments, vec![report]);
    }

    #[test]
    fn long_document_respects_the_limit() {
        let report = render_report(&submission_with_items(8, 600), &style());
        assert!(report.len() > 2000);

        let segments = split_report(&report, &style(), 2000);
        assert!(segments.len() > 2);
        for seg in &segments {
            assert!(seg.len() <= 2000, "segment of {} bytes", seg.len());
        }
    }

    #[test]
    fn no_item_block_is_split_across_segments() {
        let report = render_report(&submission_with_items(8, 600), &style());
        let segments = split_report(&report, &style(), 2000);

        // Every block of the item region must appear whole in one segment.
        let marker = "<b>📝 ВІДПОВІДІ ПО ТОВАРАХ:</b>";
        let region = &report[report.find(marker).unwrap()..];
        for block in region.split(ITEM_DIVIDER) {
            assert!(
                segments.iter().any(|seg| seg.contains(block)),
                "block was split: {block:?}"
            );
        }
    }

    #[test]
    fn item_region_concatenation_reproduces_the_document() {
        let report = render_report(&submission_with_items(8, 600), &style());
        let segments = split_report(&report, &style(), 2000);

        let marker = "<b>📝 ВІДПОВІДІ ПО ТОВАРАХ:</b>";
        let region = &report[report.find(marker).unwrap()..];
        assert_eq!(segments[1..].concat(), region);
    }

    #[test]
    fn header_segment_ends_with_heading_and_rule() {
        let report = render_report(&submission_with_items(8, 600), &style());
        let segments = split_report(&report, &style(), 2000);

        let marker = "<b>📝 ВІДПОВІДІ ПО ТОВАРАХ:</b>";
        assert!(segments[0].ends_with(&format!("{marker}\n{SECTION_RULE}")));
        // The item region re-emits the heading at its start.
        assert!(segments[1].starts_with(marker));
    }

    #[test]
    fn oversized_single_block_becomes_its_own_segment() {
        let report = render_report(&submission_with_items(3, 5000), &style());
        let segments = split_report(&report, &style(), 2000);

        let oversized: Vec<&String> =
            segments.iter().filter(|s| s.len() > 2000).collect();
        assert_eq!(oversized.len(), 3);
        for seg in oversized {
            assert!(seg.contains("aaaa"));
        }
    }

    #[test]
    fn falls_back_to_plain_split_without_a_heading() {
        let text = "x".repeat(5000);
        let segments = split_report(&text, &style(), 2000);
        assert_eq!(segments.len(), 3);
        assert_eq!(segments.concat(), text);
    }
}

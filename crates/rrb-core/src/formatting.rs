//! Submission → Telegram HTML rendering.
//!
//! Pure functions of their input; no I/O. Telegram HTML supports only a small
//! tag subset (`<b>`, `<code>`, `<a href>`), so every user-supplied field is
//! escaped before it is embedded: free text must not be able to open or
//! close tags around it.

use crate::{
    locale::ReportStyle,
    submission::{Item, Submission},
};

/// Divider between item blocks. The chunker splits the item region on this
/// exact string, so renderer and chunker must agree on it.
pub const ITEM_DIVIDER: &str = "─────────────────────────";

/// Rule under the items-section heading.
pub const SECTION_RULE: &str = "══════════════════════════════";

const DEVICE_MOBILE: &str = "📱 Mobile";
const DEVICE_DESKTOP: &str = "💻 Desktop";

/// Escape HTML special characters for Telegram HTML parse mode.
pub fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

/// Coarse device classification from the client user-agent string.
fn device_label(user_agent: &str) -> &'static str {
    if user_agent.contains("Mobile") {
        DEVICE_MOBILE
    } else {
        DEVICE_DESKTOP
    }
}

/// Render one submission into a single HTML document: title, candidate
/// identity, aggregate timing summary, one block per item separated by
/// [`ITEM_DIVIDER`], and a technical-metadata footer.
pub fn render_report(submission: &Submission, style: &ReportStyle) -> String {
    let l = style.locale.labels();
    let mut out = String::new();

    out.push_str(&format!("<b>{}</b>\n\n", l.title));

    out.push_str(&format!(
        "<b>{}</b> <code>{}</code>\n",
        l.candidate,
        escape_html(&submission.fio)
    ));
    out.push_str(&format!(
        "<b>{}</b> {}\n",
        l.telegram,
        escape_html(&submission.telegram)
    ));
    out.push_str(&format!(
        "<b>{}</b> {}\n\n",
        l.submitted_at,
        escape_html(&submission.submitted_at_local)
    ));

    out.push_str(&format!("<b>{}</b>\n", l.timing_heading));
    out.push_str(&format!(
        "• {} {}\n",
        l.total_view,
        escape_html(&submission.summary.total_view_time_formatted)
    ));
    out.push_str(&format!(
        "• {} {}\n",
        l.total_typing,
        escape_html(&submission.summary.total_typing_time_formatted)
    ));
    out.push_str(&format!(
        "• {} {}\n\n",
        l.items_count, submission.summary.items_count
    ));

    out.push_str(&format!("<b>{}</b>\n{SECTION_RULE}\n", l.items_heading));

    for (_, item) in &submission.items {
        render_item(&mut out, item, style);
    }

    out.push_str(&format!("\n<b>{}</b>\n", l.tech_heading));
    out.push_str(&format!(
        "• {} {}\n",
        l.page,
        escape_html(&submission.page_url)
    ));
    out.push_str(&format!(
        "• {} {}\n",
        l.device,
        device_label(&submission.user_agent)
    ));
    if style.include_version_footer {
        if let Some(version) = &submission.version {
            out.push_str(&format!("• {} {}\n", l.version, escape_html(version)));
        }
    }

    out
}

fn render_item(out: &mut String, item: &Item, style: &ReportStyle) {
    let l = style.locale.labels();

    out.push_str(&format!(
        "\n<b>{} - {}</b>\n",
        escape_html(&item.code),
        escape_html(&item.name)
    ));
    out.push_str(&format!(
        "⏱ {} {} | {} {}\n",
        l.item_time_view,
        escape_html(&item.time_view_formatted),
        l.item_time_typing,
        escape_html(&item.time_typing_formatted)
    ));

    out.push_str(&format!(
        "\n<b>{}</b>\n<code>{}</code>\n",
        l.ads_copy,
        escape_html(&item.ads_copy)
    ));
    out.push_str(&format!(
        "\n<b>{}</b>\n<code>{}</code>\n",
        l.analysis,
        escape_html(&item.analysis)
    ));
    out.push_str(&format!(
        "\n<b>{}</b>\n• <a href=\"{}\">{}</a> | <a href=\"{}\">{}</a>\n",
        l.materials,
        escape_html(&item.landing),
        l.landing,
        escape_html(&item.video),
        l.video
    ));

    out.push_str(&format!("\n{ITEM_DIVIDER}\n"));
}

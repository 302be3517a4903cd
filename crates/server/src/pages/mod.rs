//! Server-rendered HTML pages.

pub mod landing;
pub mod order;

use shared::protocol::{Notice, NoticeKind};

const SHARED_STYLE: &str = r#"
:root { --accent: #DBFE01; --violet: #5940FE; --ink: #0b0b0b; }
* { box-sizing: border-box; }
body { margin: 0; font-family: system-ui, sans-serif; background: var(--ink); color: #fff; }
a { color: inherit; }
.container { max-width: 1100px; margin: 0 auto; padding: 0 24px; }
.site-header { display: flex; justify-content: space-between; align-items: center; padding: 20px 24px; }
.site-header nav a { margin-left: 18px; text-decoration: none; }
section { padding: 72px 0; }
h1, h2 { color: var(--accent); }
.button { display: inline-block; background: var(--accent); color: #000; border-radius: 999px; padding: 12px 28px; font-weight: 600; text-decoration: none; border: 0; }
.button[disabled] { opacity: .6; }
.grid { display: grid; grid-template-columns: repeat(auto-fit, minmax(220px, 1fr)); gap: 16px; }
.card { border: 1px solid #333; border-radius: 24px; padding: 20px; }
.order-form { position: relative; max-width: 32rem; margin: 64px auto; padding: 32px; border: 1px solid #444; border-radius: 24px; background: #000; }
.order-form .back { position: absolute; top: 16px; right: 16px; color: var(--accent); text-decoration: none; }
.chips { display: grid; grid-template-columns: repeat(3, 1fr); gap: 12px; margin-bottom: 24px; }
.chip { display: flex; justify-content: space-between; border-radius: 999px; padding: 8px 16px; background: #fff; color: #000; cursor: pointer; }
.chip input { display: none; }
.chip.selected, .chip:has(input:checked) { background: var(--violet); color: #fff; }
.contacts { display: flex; gap: 12px; margin-bottom: 24px; }
.contact { border: 1px solid #666; border-radius: 999px; padding: 8px 16px; cursor: pointer; }
.contact input { display: none; }
.contact.selected, .contact:has(input:checked) { background: var(--accent); color: #000; border-color: var(--accent); }
.field { position: relative; margin-bottom: 24px; }
.field input, .field textarea { width: 100%; background: transparent; color: #fff; border: 0; border-bottom: 1px solid #666; padding: 8px 48px 8px 0; }
.field textarea { min-height: 8rem; border: 1px solid #666; }
.counter { position: absolute; right: 4px; bottom: 4px; font-size: 12px; color: #999; }
.counter.at-limit { color: #ef4444; }
.notice { border-radius: 16px; padding: 12px 16px; margin-bottom: 20px; background: #1f2937; }
.notice-agreement_required { border-left: 4px solid #ef4444; }
.notice-submitted { border-left: 4px solid var(--accent); }
"#;

pub(crate) fn escape_html(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

pub(crate) fn document(title: &str, head_extra: &str, body: &str) -> String {
    let mut html = String::with_capacity(SHARED_STYLE.len() + body.len() + 512);
    html.push_str("<!DOCTYPE html>\n<html lang=\"ru\">\n<head>\n<meta charset=\"utf-8\">\n");
    html.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n");
    html.push_str(&format!("<title>{}</title>\n", escape_html(title)));
    html.push_str(head_extra);
    html.push_str("<style>");
    html.push_str(SHARED_STYLE);
    html.push_str("</style>\n</head>\n<body>\n");
    html.push_str(body);
    html.push_str("\n</body>\n</html>\n");
    html
}

pub(crate) fn render_notices(notices: &[Notice]) -> String {
    notices
        .iter()
        .map(|notice| {
            let kind = match notice.kind {
                NoticeKind::AgreementRequired => "agreement_required",
                NoticeKind::Submitted => "submitted",
            };
            format!(
                "<div class=\"notice notice-{kind}\" role=\"status\"><strong>{}</strong><p>{}</p></div>",
                escape_html(&notice.title),
                escape_html(&notice.description)
            )
        })
        .collect()
}

//! Result serialization into the `cas:results` XML envelope.
//!
//! Pure formatting: entities in aggregation order, attributes in each
//! entity's own key order, one `cas:attribute` element per value in the
//! value's original order.

use dirgate_core::DirectoryEntity;

/// Render a merged entity sequence as the response document.
pub fn render(entries: &[DirectoryEntity]) -> String {
    let mut out = String::from(
        "<?xml version=\"1.0\" encoding=\"utf-8\"?>\n\
         <cas:results xmlns:cas=\"http://www.yale.edu/tp/cas\">",
    );
    for entry in entries {
        push_entry(&mut out, entry);
    }
    out.push_str("\n</cas:results>");
    out
}

fn push_entry(out: &mut String, entity: &DirectoryEntity) {
    out.push_str("\n\t<cas:entry>");

    let tag = if entity.is_group() { "group" } else { "user" };
    out.push_str(&format!(
        "\n\t\t<cas:{tag}>{}</cas:{tag}>",
        escape(&entity.id)
    ));

    for (name, values) in &entity.attributes {
        for value in values {
            out.push_str(&format!(
                "\n\t\t<cas:attribute name=\"{}\" value=\"{}\"/>",
                escape(name),
                escape(value)
            ));
        }
    }

    out.push_str("\n\t</cas:entry>");
}

/// Escape a string for use in XML text and attribute values.
pub fn escape(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            other => escaped.push(other),
        }
    }
    escaped
}

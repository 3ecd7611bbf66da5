// src/core/html.rs
use scraper::{Html, Selector};

use super::sanitize::replace_nbsp;

/// Text lines of every element matched by `selector`, in document order.
///
/// Result pages are preformatted: one `<font>` block may hold a single
/// runner line or a whole column of them, so blocks are split on newlines.
/// Blank lines are dropped; `&nbsp;` becomes a plain space.
pub fn text_lines(doc: &str, selector: &Selector) -> Vec<String> {
    let html = Html::parse_document(doc);
    let mut out = Vec::new();
    for el in html.select(selector) {
        let text = replace_nbsp(&el.text().collect::<String>());
        out.extend(
            text.lines()
                .map(str::trim_end)
                .filter(|l| !l.trim().is_empty())
                .map(str::to_string),
        );
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_blocks_into_lines() {
        let doc = r#"<html><head><title> Zürich  Marathon </title></head><body><pre>
            <font size="2">line one
line&nbsp;two

</font><font size="3">ignored</font><font size=2>line three</font></pre></body></html>"#;
        let sel = Selector::parse(r#"font[size="2"]"#).unwrap();
        let lines = text_lines(doc, &sel);
        assert_eq!(lines, vec!["line one", "line two", "line three"]);
    }
}

//! Wraps converted body markup in the fixed page template. The template is a
//! configuration constant of the system, not a loadable asset, and the
//! substitution is a plain two-slot string replacement: no escaping is
//! performed, so a title or body containing markup passes through unaltered
//! (a documented limitation, not a defect).

/// The slot in a template that receives the page title.
pub const TITLE_SLOT: &str = "{{title}}";

/// The slot in a template that receives the page body.
pub const BODY_SLOT: &str = "{{body}}";

/// The template applied to every converted document.
pub const PAGE_TEMPLATE: &str = r#"<!DOCTYPE html>
<html>
<head>
    <meta charset="utf-8">
    <meta name="viewport" content="width=device-width, initial-scale=1">
    <title>{{title}}</title>
    <link rel="stylesheet" type="text/css" href="/dist/styles/common.css">
</head>
<body>
{{body}}
</body>
</html>
"#;

/// Renders a page by substituting `title` and `body` into [`PAGE_TEMPLATE`].
pub fn render_page(title: &str, body: &str) -> String {
    substitute(PAGE_TEMPLATE, title, body)
}

/// Fills the first occurrence of each slot in `template`. A template missing
/// one or both slots degrades to its literal text rather than failing.
pub fn substitute(template: &str, title: &str, body: &str) -> String {
    template
        .replacen(TITLE_SLOT, title, 1)
        .replacen(BODY_SLOT, body, 1)
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_render_contains_title_and_body() {
        let rendered = render_page("My Title", "<p>hello</p>");
        assert!(rendered.contains("<title>My Title</title>"));
        assert!(rendered.contains("<p>hello</p>"));
        assert!(!rendered.contains(TITLE_SLOT));
        assert!(!rendered.contains(BODY_SLOT));
    }

    #[test]
    fn test_no_escaping() {
        let rendered = render_page("</title>", "<script>");
        assert!(rendered.contains("<title></title></title>"));
        assert!(rendered.contains("<script>"));
    }

    #[test]
    fn test_slotless_template_degrades_to_literal_text() {
        assert_eq!("static text", substitute("static text", "t", "b"));
    }

    #[test]
    fn test_only_first_slot_occurrence_is_filled() {
        assert_eq!(
            "a {{title}}",
            substitute("{{title}} {{title}}", "a", "unused")
        );
    }
}

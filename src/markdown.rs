//! The markdown-to-HTML conversion routine. This is a thin wrapper over
//! [`pulldown_cmark`]; the rest of the system treats it as an external
//! collaborator that is total for any UTF-8 input.

use pulldown_cmark::{html, Options, Parser};

/// Converts a markdown document into HTML markup.
pub fn to_html(markdown: &str) -> String {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_FOOTNOTES);
    options.insert(Options::ENABLE_SMART_PUNCTUATION);
    options.insert(Options::ENABLE_STRIKETHROUGH);
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_TASKLISTS);

    let mut markup = String::new();
    html::push_html(&mut markup, Parser::new_ext(markdown, options));
    markup
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_heading() {
        assert_eq!("<h1>Intro</h1>\n", to_html("# Intro"));
    }

    #[test]
    fn test_paragraph() {
        assert_eq!("<p>hello world</p>\n", to_html("hello world"));
    }

    #[test]
    fn test_strikethrough_enabled() {
        assert_eq!("<p><del>gone</del></p>\n", to_html("~~gone~~"));
    }

    #[test]
    fn test_empty_input() {
        assert_eq!("", to_html(""));
    }
}

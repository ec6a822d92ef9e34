//! Turns raw file names into human-readable page titles.

/// Document extension suffixes recognized by [`make_title`], longest first so
/// `.markdown` is never mangled by the `.md` match.
const DOCUMENT_SUFFIXES: [&str; 2] = [".markdown", ".md"];

/// Converts a raw file name into a display title: underscores become spaces,
/// the first occurrence of a recognized document extension is removed, and
/// the result is title-cased word by word.
///
/// The capitalization is deliberately naive: every maximal run of non-space
/// characters has its first character upper-cased and the rest lower-cased.
/// Small words, possessives, and acronyms get no special treatment, so
/// `FAQ_for_APIs.md` becomes `Faq For Apis`.
pub fn make_title(file_name: &str) -> String {
    let mut title = file_name.replace('_', " ");
    let lowered = title.to_ascii_lowercase();
    for suffix in &DOCUMENT_SUFFIXES {
        if let Some(i) = lowered.find(suffix) {
            title.replace_range(i..i + suffix.len(), "");
            break;
        }
    }

    title
        .to_lowercase()
        .split(' ')
        .map(capitalize)
        .collect::<Vec<String>>()
        .join(" ")
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        None => String::new(),
        Some(first) => first.to_uppercase().chain(chars).collect(),
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_underscores_and_extension() {
        assert_eq!("My Cool Post", make_title("my_cool_post.md"));
    }

    #[test]
    fn test_markdown_extension() {
        assert_eq!("Release Notes", make_title("release_notes.markdown"));
    }

    #[test]
    fn test_extension_case_insensitive() {
        assert_eq!("Readme", make_title("README.MD"));
    }

    #[test]
    fn test_internal_capitals_are_flattened() {
        assert_eq!("Faq For Apis", make_title("FAQ_for_APIs.md"));
    }

    #[test]
    fn test_no_extension() {
        assert_eq!("Plain Name", make_title("plain_name"));
    }

    #[test]
    fn test_empty_input() {
        assert_eq!("", make_title(""));
    }

    #[test]
    fn test_only_first_extension_occurrence_is_removed() {
        assert_eq!("A B.md", make_title("a.md_b.md"));
    }
}

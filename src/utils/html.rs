/// Reduces author-supplied text to plain text.
///
/// Every tag is stripped, `<script>` and `<style>` along with their
/// content. The result is stored and compared as plain text, so the
/// entities the sanitizer writes back (`&amp;`, `&lt;`, `&gt;`, `&nbsp;`)
/// are decoded again. Clients escape it when rendering.
pub fn clean_html(input: &str) -> String {
    let mut text = strip_tags(input);
    // Decoded entities can spell out new tags; repeat until stable.
    for _ in 0..4 {
        let next = strip_tags(&text);
        if next == text {
            break;
        }
        text = next;
    }
    text
}

fn strip_tags(input: &str) -> String {
    let escaped = ammonia::Builder::empty().clean(input).to_string();
    escaped
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&nbsp;", "\u{a0}")
        .replace("&amp;", "&")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_titles_are_untouched() {
        assert_eq!(clean_html("World Capitals"), "World Capitals");
        assert_eq!(clean_html("Tom & Jerry"), "Tom & Jerry");
        assert_eq!(clean_html("Q&A: is 1 < 2 > 0?"), "Q&A: is 1 < 2 > 0?");
    }

    #[test]
    fn test_tags_are_stripped_and_script_removed() {
        let cleaned = clean_html("Intro<script>alert(1)</script> to <b>Rust</b>");
        assert_eq!(cleaned, "Intro to Rust");

        let cleaned = clean_html("<img src=x onerror=alert(1)>Caption");
        assert_eq!(cleaned, "Caption");
    }

    #[test]
    fn test_encoded_tags_do_not_survive() {
        let cleaned = clean_html("&lt;script&gt;alert(1)&lt;/script&gt;Safe");
        assert!(!cleaned.contains("<script"));
        assert!(cleaned.ends_with("Safe"));
    }

    #[test]
    fn test_cleaning_is_stable() {
        let once = clean_html("Fish &amp; Chips <i>Menu</i>");
        assert_eq!(clean_html(&once), once);
    }
}

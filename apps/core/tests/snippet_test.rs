use notesearch_core::snippet::{highlighted_snippet, highlighted_snippet_with, SnippetOptions};

#[test]
fn text_without_markers_is_unchanged() {
    let text = "a plain note body that is considerably longer than the snippet window would ever allow, repeated twice over to be sure it is long";
    assert_eq!(highlighted_snippet(text), text);
    assert_eq!(highlighted_snippet(""), "");
}

#[test]
fn short_text_with_early_mark_is_unchanged() {
    let text = "the <mark>cat</mark> sat";
    assert_eq!(highlighted_snippet(text), text);
}

#[test]
fn long_text_is_windowed_with_trailing_ellipsis() {
    let text = format!("aaaaaaaaaa<mark>X</mark>{}", "b".repeat(300));
    let snippet = highlighted_snippet(&text);

    assert!(snippet.starts_with("aaaaaaaaaa<mark>X</mark>"));
    assert!(snippet.ends_with("..."));
    assert_eq!(snippet.chars().count(), 100 + 3);
}

#[test]
fn leading_ellipsis_when_window_starts_late() {
    let text = format!("{}<mark>match</mark>{}", "p".repeat(50), "s".repeat(300));
    let snippet = highlighted_snippet(&text);

    let expected_core: String = text.chars().skip(40).take(100).collect();
    assert_eq!(snippet, format!("...{expected_core}..."));
    assert!(snippet.contains("<mark>match</mark>"));
}

#[test]
fn cut_highlight_is_extended_through_close_marker() {
    // Second highlight opens inside the window and closes past its end.
    let text = format!(
        "<mark>a</mark>{}<mark>{}</mark> tail",
        "x".repeat(80),
        "y".repeat(40)
    );
    let snippet = highlighted_snippet(&text);

    assert!(snippet.ends_with(&format!("<mark>{}</mark>...", "y".repeat(40))));
    assert!(!snippet.starts_with("..."));
}

#[test]
fn unterminated_highlight_returns_window_as_is() {
    let text = format!("{}<mark>{}", "x".repeat(5), "z".repeat(300));
    let snippet = highlighted_snippet(&text);

    let expected_core: String = text.chars().take(100).collect();
    assert_eq!(snippet, format!("{expected_core}..."));
}

#[test]
fn no_trailing_ellipsis_when_window_reaches_end() {
    let text = format!("{}<mark>end</mark>", "q".repeat(40));
    let snippet = highlighted_snippet(&text);

    assert_eq!(snippet, format!("...{}<mark>end</mark>", "q".repeat(10)));
}

#[test]
fn custom_options_change_window() {
    let text = format!("{}<mark>hit</mark>{}", "l".repeat(30), "r".repeat(100));
    let options = SnippetOptions {
        max_chars: 30,
        left_context: 5,
    };
    let snippet = highlighted_snippet_with(&text, options);

    assert_eq!(
        snippet,
        format!("...lllll<mark>hit</mark>{}...", "r".repeat(9))
    );
}

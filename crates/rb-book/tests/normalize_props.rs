//! Property tests for listing normalization.

use proptest::prelude::*;

use rb_book::listing::{ensure_trailing_newline, normalize_listing, strip_callouts};

proptest! {
    /// Normalizing twice is the same as normalizing once.
    #[test]
    fn normalization_is_idempotent(text in "\\PC*") {
        let once = normalize_listing(&text);
        let twice = normalize_listing(&once);
        prop_assert_eq!(once, twice);
    }

    /// Every non-empty normalized listing ends with exactly one newline.
    #[test]
    fn normalized_listing_ends_with_single_newline(text in "\\PC*") {
        let normalized = normalize_listing(&text);
        if !normalized.is_empty() {
            prop_assert!(normalized.ends_with('\n'));
            prop_assert!(!normalized.ends_with("\n\n"));
        }
    }

    /// Callout stripping leaves callout-free text byte-identical.
    #[test]
    fn stripping_preserves_callout_free_text(
        lines in prop::collection::vec("[a-zA-Z0-9 ;{}()=_.!]*", 0..20)
    ) {
        let text = lines.join("\n");
        prop_assert_eq!(strip_callouts(&text), text);
    }

    /// Trailing-newline repair never touches anything before the tail.
    #[test]
    fn trailing_newline_repair_keeps_body(body in "[a-z\\n]*[a-z]") {
        let padded = format!("{body}\n\n\n");
        prop_assert_eq!(ensure_trailing_newline(padded), format!("{body}\n"));
    }
}

#[test]
fn strips_every_callout_occurrence() {
    let text = "a // <1>\nb\nc // <2>\nd // <10>\n";
    assert_eq!(strip_callouts(text), "a\nb\nc\nd\n");
}

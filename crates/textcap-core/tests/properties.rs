//! Property-based tests for counting and enforcement invariants.

use proptest::prelude::*;
use textcap_core::enforce::{enforce_bulk, enforce_incremental};
use textcap_core::feedback::tier_for;
use textcap_core::{FeedbackTier, LimitConfig, LimitType, TextBuffer, count};

fn mode() -> impl Strategy<Value = LimitType> {
    prop_oneof![Just(LimitType::Characters), Just(LimitType::Words)]
}

fn limits(mode: LimitType, max: usize) -> LimitConfig {
    let mut config = LimitConfig {
        limit_type: mode,
        ..LimitConfig::default()
    };
    config.set_active_max(max);
    config
}

proptest! {
    /// Property: appending never shrinks the count
    #[test]
    fn count_is_monotonic_under_appends(
        base in "[a-z \\n]{0,40}",
        suffix in "[a-zé \\t]{0,40}",
        mode in mode(),
    ) {
        let combined = format!("{base}{suffix}");
        prop_assert!(count(&combined, mode) >= count(&base, mode));
    }

    /// Property: a keystroke never leaves the document over a limit it was under
    #[test]
    fn keystrokes_never_break_the_limit(
        typed in "[a-z ]{0,60}",
        max in 1usize..30,
        mode in mode(),
    ) {
        let config = limits(mode, max);
        let mut buf = TextBuffer::new();
        for ch in typed.chars() {
            buf.insert_char(ch);
            enforce_incremental(&mut buf, &config);
            prop_assert!(count(buf.text(), mode) <= max);
        }
    }

    /// Property: a character-mode paste keeps the original text and a prefix of the paste
    #[test]
    fn character_trim_keeps_a_prefix(
        original in "[a-z]{0,20}",
        pasted in "[A-Z]{0,40}",
        max in 1usize..40,
    ) {
        prop_assume!(original.chars().count() <= max);
        let config = limits(LimitType::Characters, max);
        let mut buf = TextBuffer::with_text(original.clone());

        enforce_bulk(&mut buf, &config, |b| b.insert_str(&pasted));

        let expected_len = (original.len() + pasted.len()).min(max);
        prop_assert_eq!(buf.len_chars(), expected_len);
        prop_assert!(buf.text().starts_with(&original));
        prop_assert!(pasted.starts_with(&buf.text()[original.len()..]));
    }

    /// Property: a word-mode paste never leaves the document over budget,
    /// wherever the cursor sits
    #[test]
    fn word_trim_fits_budget(
        original in "[a-z ]{0,30}",
        cursor in 0usize..31,
        pasted in "[a-z ]{0,40}",
        max in 1usize..12,
    ) {
        // Text after the cursor is never trimmed, so it has to fit on its own.
        let tail: String = original.chars().skip(cursor).collect();
        prop_assume!(count(&tail, LimitType::Words) <= max);

        let config = limits(LimitType::Words, max);
        let mut buf = TextBuffer::with_text(original);
        buf.set_cursor(cursor);

        enforce_bulk(&mut buf, &config, |b| b.insert_str(&pasted));

        prop_assert!(count(buf.text(), LimitType::Words) <= max);
    }

    /// Property: tier never decreases as the count grows
    #[test]
    fn tier_is_monotonic_in_count(
        current in 0usize..500,
        max in 0usize..500,
        warning in 1u8..50,
        gap in 1u8..50,
    ) {
        let critical = warning + gap;
        let rank = |tier: FeedbackTier| match tier {
            FeedbackTier::Normal => 0,
            FeedbackTier::Warning => 1,
            FeedbackTier::Critical => 2,
        };
        let now = tier_for(current, max, warning, critical);
        let next = tier_for(current + 1, max, warning, critical);
        prop_assert!(rank(next) >= rank(now));
    }
}

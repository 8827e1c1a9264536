//! Domain-specific assertion macros for otail harnesses.
//!
//! These add context-rich failure messages that say which store or session
//! invariant broke.

/// Assert every partition of a store is contiguous: entries start at 0, each
/// entry's `end` is the next entry's `start`, each range matches its message's
/// line count, and the last `end` equals `total_lines`.
#[macro_export]
macro_rules! assert_contiguous {
    ($store:expr) => {{
        let store: &otail_core::MessageStore = &$store;
        for kind in otail_core::Kind::TABS {
            let mut expected_start = 0usize;
            for (i, entry) in store.entries(kind).iter().enumerate() {
                assert_eq!(
                    entry.start(),
                    expected_start,
                    "assert_contiguous! failed: {kind} entry {i} starts at {} but previous ended at {}",
                    entry.start(),
                    expected_start
                );
                assert_eq!(
                    entry.end() - entry.start(),
                    entry.message().line_count(),
                    "assert_contiguous! failed: {kind} entry {i} range {:?} does not match {} lines",
                    entry.range(),
                    entry.message().line_count()
                );
                expected_start = entry.end();
            }
            assert_eq!(
                store.total_lines(kind),
                expected_start,
                "assert_contiguous! failed: {kind} total_lines disagrees with its entries"
            );
        }
    }};
}

/// Assert the session cursor sits inside the active partition and, when
/// paused, inside the viewport window.
#[macro_export]
macro_rules! assert_cursor_in_bounds {
    ($session:expr) => {{
        let session: &otail_core::Session = &$session;
        let total = session.store().total_lines(session.active());
        let line = session.cursor().line();
        assert!(
            line < total.max(1),
            "assert_cursor_in_bounds! failed: cursor {line} outside {total} lines of {}",
            session.active()
        );
        if session.is_paused() && total > 0 {
            let vp = session.viewport();
            assert!(
                vp.y_offset() <= line && line < vp.y_offset() + vp.height().max(1),
                "assert_cursor_in_bounds! failed: cursor {line} outside window {}..{}",
                vp.y_offset(),
                vp.y_offset() + vp.height()
            );
        }
    }};
}

/// Assert the kind and line count of a classified message.
#[macro_export]
macro_rules! assert_classified {
    ($message:expr, $kind:expr) => {{
        let message: &otail_core::Message = &$message;
        let expected: otail_core::Kind = $kind;
        assert_eq!(
            message.kind(),
            expected,
            "assert_classified! failed:\n  expected: {:?}\n  actual:   {:?}\n  text:\n{}",
            expected,
            message.kind(),
            message.text()
        );
    }};
}

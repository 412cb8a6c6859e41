//! Property-based invariant tests for buffer text drawing.
//!
//! 1. `draw_str` never writes at or beyond `max_x`.
//! 2. The returned end column never exceeds `max_x` or the buffer width.
//! 3. Rows other than the target row are never touched.
//! 4. Every `Continuation` cell follows a wide grapheme.

use proptest::prelude::*;
use tally_render::{Buffer, CellContent, Style};

fn text() -> impl Strategy<Value = String> {
    prop::collection::vec(
        prop_oneof![
            Just("a"),
            Just("Z"),
            Just(" "),
            Just("计"),
            Just("ह"),
            Just("ि"),
            Just("ع"),
            Just("🎉"),
            Just("e\u{301}"),
        ],
        0..24,
    )
    .prop_map(|parts| parts.concat())
}

proptest! {
    #[test]
    fn draw_str_respects_clip(s in text(), x in 0u16..12, max_x in 0u16..16) {
        let mut buf = Buffer::new(12, 3);
        let end = buf.draw_str(x, 1, &s, Style::new(), max_x);
        let limit = max_x.min(12);
        prop_assert!(end <= limit.max(x));
        for col in limit..12 {
            prop_assert!(buf.get(col, 1).unwrap().is_empty());
        }
    }

    #[test]
    fn draw_str_touches_only_its_row(s in text(), x in 0u16..12) {
        let mut buf = Buffer::new(12, 3);
        buf.draw_str(x, 1, &s, Style::new(), 12);
        for col in 0..12 {
            prop_assert!(buf.get(col, 0).unwrap().is_empty());
            prop_assert!(buf.get(col, 2).unwrap().is_empty());
        }
    }

    #[test]
    fn continuation_follows_content(s in text()) {
        let mut buf = Buffer::new(12, 1);
        buf.draw_str(0, 0, &s, Style::new(), 12);
        for col in 0..12u16 {
            if buf.get(col, 0).unwrap().content == CellContent::Continuation {
                prop_assert!(col > 0);
                let prev = &buf.get(col - 1, 0).unwrap().content;
                prop_assert!(!matches!(prev, CellContent::Empty | CellContent::Continuation));
            }
        }
    }
}

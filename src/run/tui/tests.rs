#![allow(clippy::unwrap_used)]

use super::*;

#[test]
fn test_guard_restores_screen_and_cursor_on_drop() {
    let mut out: Vec<u8> = Vec::new();
    drop(TerminalGuard {
        out: &mut out,
        raw_mode: false,
    });
    let written = String::from_utf8(out).unwrap();
    assert!(written.contains("\x1b[?1049l"));
    assert!(written.contains("\x1b[?25h"));
}


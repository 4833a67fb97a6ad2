use super::*;
use crate::text::font::BlockFont;

/// One unit per character.
fn count(s: &str) -> StickerResult<f32> {
    Ok(s.chars().count() as f32)
}

#[test]
fn short_text_is_one_line() {
    let out = wrap_lines("hello", 10.0, 2, count).unwrap();
    assert_eq!(out.lines, vec!["hello"]);
    assert!(!out.truncated);
}

#[test]
fn breaks_at_last_space_and_drops_it() {
    let out = wrap_lines("hello big world", 10.0, 3, count).unwrap();
    assert_eq!(out.lines, vec!["hello big", "world"]);
}

#[test]
fn punctuation_stays_on_its_line() {
    let out = wrap_lines("ありがとう。またね", 7.0, 3, count).unwrap();
    assert_eq!(out.lines, vec!["ありがとう。", "またね"]);
}

#[test]
fn hard_breaks_without_break_chars() {
    let out = wrap_lines("abcdefgh", 3.0, 5, count).unwrap();
    assert_eq!(out.lines, vec!["abc", "def", "gh"]);
}

#[test]
fn single_wide_char_is_not_split() {
    let out = wrap_lines("ab", 0.5, 5, count).unwrap();
    assert_eq!(out.lines, vec!["a", "b"]);
}

#[test]
fn newline_forces_break() {
    let out = wrap_lines("ab\ncd", 10.0, 3, count).unwrap();
    assert_eq!(out.lines, vec!["ab", "cd"]);
}

#[test]
fn max_lines_truncates_with_ellipsis() {
    let out = wrap_lines("abcdefghij", 3.0, 2, count).unwrap();
    assert_eq!(out.lines, vec!["abc", "de…"]);
    assert!(out.truncated);
}

#[test]
fn single_char_last_line_becomes_ellipsis() {
    let out = wrap_lines("a\nb\nc", 10.0, 2, count).unwrap();
    assert_eq!(out.lines, vec!["a", "…"]);
    assert!(out.truncated);
}

#[test]
fn zero_max_lines_is_rejected() {
    assert!(wrap_lines("a", 10.0, 0, count).is_err());
}

#[test]
fn rewrapping_lines_is_idempotent() {
    let mut font = BlockFont;
    let text = "今日はいい天気ですね、散歩に行きましょう! see you soon.";
    let first = wrap_with_font(text, 120.0, 10, &mut font, 20.0).unwrap();
    assert!(first.lines.len() > 1);
    for line in &first.lines {
        let again = wrap_with_font(line, 120.0, 10, &mut font, 20.0).unwrap();
        assert_eq!(again.lines, vec![line.clone()]);
    }
}

#[test]
fn width_errors_propagate() {
    let err = wrap_lines("abc", 1.0, 2, |_| Err(StickerError::render("boom"))).unwrap_err();
    assert!(matches!(err, StickerError::Render(_)));
}

use crate::foundation::error::{StickerError, StickerResult};
use crate::text::font::FontBackend;

/// Characters after which a line may break: whitespace plus CJK and Latin punctuation.
pub fn is_break_char(c: char) -> bool {
    c.is_whitespace()
        || matches!(
            c,
            '、' | ',' | '，' | ';' | '；' | '。' | '.' | '！' | '!' | '？' | '?' | '・' | 'ー'
        )
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct WrappedText {
    pub lines: Vec<String>,
    /// True when text was dropped to respect `max_lines`.
    pub truncated: bool,
}

/// Greedy character-by-character wrap of `text` to `max_width`.
///
/// When a character overflows the line, the line breaks after the last break character
/// before it, or right before the overflowing character when there is none. Whitespace at
/// a break is dropped; punctuation stays on the line it ends. A single character wider than
/// `max_width` is never split. `\n` forces a break.
///
/// More than `max_lines` lines are cut to `max_lines`, and the last kept line ends in `…`.
pub fn wrap_lines<F>(
    text: &str,
    max_width: f32,
    max_lines: usize,
    mut width_of: F,
) -> StickerResult<WrappedText>
where
    F: FnMut(&str) -> StickerResult<f32>,
{
    if max_lines == 0 {
        return Err(StickerError::validation("max_lines must be >= 1"));
    }

    let mut lines: Vec<String> = Vec::new();
    let mut buf: Vec<char> = Vec::new();
    let mut overflowed = false;

    'chars: for c in text.chars() {
        if c == '\n' {
            push_line(&mut lines, &buf);
            buf.clear();
            if lines.len() > max_lines {
                overflowed = true;
                break;
            }
            continue;
        }

        buf.push(c);
        while buf.len() > 1 && width_of(&buf.iter().collect::<String>())? > max_width {
            let last = buf.len() - 1;
            let split = (0..last).rev().find(|&i| is_break_char(buf[i]));
            let rest = match split {
                Some(i) => buf.split_off(i + 1),
                None => buf.split_off(last),
            };
            push_line(&mut lines, &buf);
            buf = rest.into_iter().skip_while(|c| c.is_whitespace()).collect();
            if lines.len() > max_lines {
                overflowed = true;
                break 'chars;
            }
        }
    }
    if !overflowed {
        push_line(&mut lines, &buf);
    }

    let truncated = lines.len() > max_lines;
    if truncated {
        lines.truncate(max_lines);
        if let Some(last) = lines.last_mut() {
            *last = with_ellipsis(last);
        }
    }
    Ok(WrappedText { lines, truncated })
}

/// [`wrap_lines`] measuring with `font` at `size_px`.
pub fn wrap_with_font(
    text: &str,
    max_width: f32,
    max_lines: usize,
    font: &mut dyn FontBackend,
    size_px: f32,
) -> StickerResult<WrappedText> {
    wrap_lines(text, max_width, max_lines, |s| {
        Ok(font.measure(s, size_px)?.width)
    })
}

fn push_line(lines: &mut Vec<String>, buf: &[char]) {
    let line: String = buf.iter().collect();
    let line = line.trim_end();
    if !line.is_empty() {
        lines.push(line.to_string());
    }
}

fn with_ellipsis(line: &str) -> String {
    let mut chars: Vec<char> = line.chars().collect();
    if chars.len() > 1 {
        chars.pop();
        chars.push('…');
        chars.into_iter().collect()
    } else {
        "…".to_string()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/text/wrap.rs"]
mod tests;

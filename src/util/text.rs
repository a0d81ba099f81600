use std::borrow::Cow;

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Display width of a string in terminal columns.
///
/// ```
/// use reel::util::display_width;
///
/// assert_eq!(display_width("Hello"), 5);
/// assert_eq!(display_width("你好"), 4);
/// ```
pub fn display_width(s: &str) -> usize {
    UnicodeWidthStr::width(s)
}

const ELLIPSIS: &str = "...";
const ELLIPSIS_WIDTH: usize = 3;

/// Truncate a string to at most `max_width` columns, appending "..." when
/// anything was cut.
///
/// Widths of 3 or less have no room for an ellipsis; the result is just the
/// characters that fit. Borrowed when no truncation is needed.
///
/// ```
/// use reel::util::truncate_to_width;
///
/// assert_eq!(truncate_to_width("Short", 10), "Short");
/// assert_eq!(truncate_to_width("Hello World", 8), "Hello...");
/// assert_eq!(truncate_to_width("Test", 2), "Te");
/// ```
pub fn truncate_to_width(s: &str, max_width: usize) -> Cow<'_, str> {
    if max_width == 0 {
        return Cow::Borrowed("");
    }

    if max_width <= ELLIPSIS_WIDTH {
        let mut byte_end = 0;
        let mut current_width = 0;
        for (idx, c) in s.char_indices() {
            let char_width = UnicodeWidthChar::width(c).unwrap_or(0);
            if current_width + char_width > max_width {
                break;
            }
            current_width += char_width;
            byte_end = idx + c.len_utf8();
        }
        if byte_end == s.len() {
            return Cow::Borrowed(s);
        }
        return Cow::Owned(s[..byte_end].to_string());
    }
    let target_width = max_width - ELLIPSIS_WIDTH;

    let mut current_width = 0;
    let mut cut_point = None;
    for (idx, c) in s.char_indices() {
        let char_width = UnicodeWidthChar::width(c).unwrap_or(0);
        if cut_point.is_none() && current_width + char_width > target_width {
            cut_point = Some(idx);
        }
        if current_width + char_width > max_width {
            let cut = cut_point.unwrap_or(idx);
            return Cow::Owned(format!("{}{}", &s[..cut], ELLIPSIS));
        }
        current_width += char_width;
    }

    Cow::Borrowed(s)
}

/// Strip terminal control characters and ANSI escape sequences.
///
/// Post captions, names and locations come from a user-supplied file and are
/// written straight to the terminal. Keeps tab, newline and carriage return.
pub fn strip_control_chars(s: &str) -> Cow<'_, str> {
    fn is_control(b: u8) -> bool {
        b == 0x1b || b == 0x7f || (b < 0x20 && b != 0x09 && b != 0x0a && b != 0x0d)
    }

    let bytes = s.as_bytes();
    if !bytes.iter().any(|&b| is_control(b)) {
        return Cow::Borrowed(s);
    }

    let len = bytes.len();
    let mut out = String::with_capacity(len);
    let mut i = 0;
    while i < len {
        let b = bytes[i];
        if b == 0x1b {
            match bytes.get(i + 1) {
                // CSI: parameters until a final byte in 0x40..=0x7e
                Some(b'[') => {
                    i += 2;
                    while i < len {
                        let c = bytes[i];
                        i += 1;
                        if (0x40..=0x7e).contains(&c) {
                            break;
                        }
                    }
                }
                // OSC: until BEL or ST
                Some(b']') => {
                    i += 2;
                    while i < len {
                        if bytes[i] == 0x07 {
                            i += 1;
                            break;
                        }
                        if bytes[i] == 0x1b && bytes.get(i + 1) == Some(&b'\\') {
                            i += 2;
                            break;
                        }
                        i += 1;
                    }
                }
                _ => i += 1,
            }
        } else if is_control(b) {
            i += 1;
        } else {
            let start = i;
            while i < len && !is_control(bytes[i]) {
                i += 1;
            }
            // Control bytes are ASCII, so start..i sits on char boundaries
            out.push_str(&s[start..i]);
        }
    }

    Cow::Owned(out)
}

/// Group digits with commas: `3500` becomes `"3,500"`.
///
/// ```
/// use reel::util::format_count;
///
/// assert_eq!(format_count(253), "253");
/// assert_eq!(format_count(1_234_567), "1,234,567");
/// ```
pub fn format_count(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Uppercase the first character.
pub fn capitalize(s: &str) -> Cow<'_, str> {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) if !first.is_uppercase() => {
            Cow::Owned(first.to_uppercase().chain(chars).collect())
        }
        _ => Cow::Borrowed(s),
    }
}

/// `m:ss` clock for video positions.
pub fn format_clock(secs: u32) -> String {
    format!("{}:{:02}", secs / 60, secs % 60)
}

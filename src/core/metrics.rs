//! Advance widths for the builtin Helvetica face, used to right-align and
//! wrap text without embedding a font file.

/// Widths in 1/1000 em for printable ASCII, starting at `' '` (0x20).
const HELVETICA_ASCII: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278, // ' '..'/'
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 278, 278, 584, 584, 584, 556, // '0'..'?'
    1015, 667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, 722, 778, // '@'..'O'
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 278, 278, 278, 469, 556, // 'P'..'_'
    333, 556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, 556, 556, // '`'..'o'
    556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, 334, 260, 334, 584, // 'p'..'~'
];

const FALLBACK_WIDTH: u16 = 556;

/// Bold glyphs run wider on letters; digits and punctuation barely change.
const BOLD_FACTOR: f32 = 1.06;

/// Characters the builtin fonts can draw (WinAnsiEncoding). Anything else is
/// dropped by the PDF writer.
pub fn is_win_ansi(ch: char) -> bool {
    matches!(
        ch,
        ' '..='~'
            | '\u{a0}'..='\u{ff}'
            | '€' | '‚' | 'ƒ' | '„' | '…' | '†' | '‡' | 'ˆ' | '‰' | 'Š' | '‹' | 'Œ' | 'Ž'
            | '‘' | '’' | '“' | '”' | '•' | '–' | '—' | '˜' | '™' | 'š' | '›' | 'œ' | 'ž'
            | 'Ÿ'
    )
}

fn glyph_width(ch: char) -> u16 {
    match ch {
        ' '..='~' => HELVETICA_ASCII[ch as usize - 0x20],
        '\u{a0}' => 278,
        '€' | '£' | '¥' => 556,
        _ if is_win_ansi(ch) => FALLBACK_WIDTH,
        _ => 0,
    }
}

/// Width in points of `text` set at `size` with `letter_spacing` points between
/// glyphs. Characters outside WinAnsi are never drawn and take no space.
pub fn text_width(text: &str, size: f32, bold: bool, letter_spacing: f32) -> f32 {
    let mut units = 0u32;
    let mut glyphs = 0usize;
    for ch in text.chars().filter(|&ch| is_win_ansi(ch)) {
        units += u32::from(glyph_width(ch));
        glyphs += 1;
    }
    let factor = if bold { BOLD_FACTOR } else { 1.0 };
    units as f32 / 1000.0 * size * factor + letter_spacing * glyphs as f32
}

/// Greedy word wrap. Explicit newlines always break; a single word wider
/// than `max_width` is split between characters.
pub fn wrap(text: &str, max_width: f32, measure: impl Fn(&str) -> f32) -> Vec<String> {
    let mut lines = Vec::new();

    for paragraph in text.split('\n') {
        let mut current = String::new();
        for word in paragraph.split_whitespace() {
            let candidate = if current.is_empty() {
                word.to_string()
            } else {
                format!("{current} {word}")
            };
            if measure(&candidate) <= max_width {
                current = candidate;
                continue;
            }
            if !current.is_empty() {
                lines.push(std::mem::take(&mut current));
            }
            if measure(word) <= max_width {
                current = word.to_string();
            } else {
                for ch in word.chars() {
                    let mut next = current.clone();
                    next.push(ch);
                    if !current.is_empty() && measure(&next) > max_width {
                        lines.push(std::mem::take(&mut current));
                        current.push(ch);
                    } else {
                        current = next;
                    }
                }
            }
        }
        lines.push(current);
    }

    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn digits_share_one_width() {
        let a = text_width("1111", 10.0, false, 0.0);
        let b = text_width("8888", 10.0, false, 0.0);
        assert_eq!(a, b);
        assert!((a - 22.24).abs() < 1e-3);
    }

    #[test]
    fn letter_spacing_adds_per_glyph() {
        let plain = text_width("FROM", 9.0, false, 0.0);
        let spaced = text_width("FROM", 9.0, false, 1.0);
        assert!((spaced - plain - 4.0).abs() < 1e-4);
    }

    #[test]
    fn win_ansi_covers_latin1_and_cp1252_extras() {
        for ch in ['A', '\u{a0}', '£', '¥', 'é', 'ÿ', '€', '™', '—'] {
            assert!(is_win_ansi(ch), "{ch:?}");
        }
        for ch in ['₹', '₩', '₪', '₫', '\u{81}', '\n'] {
            assert!(!is_win_ansi(ch), "{ch:?}");
        }
    }

    #[test]
    fn undrawable_characters_take_no_width() {
        let plain = text_width("Fee 10", 10.0, false, 0.5);
        let with_rupee = text_width("Fee ₹10", 10.0, false, 0.5);
        assert_eq!(plain, with_rupee);
    }

    #[test]
    fn wrap_breaks_on_words_and_newlines() {
        let per_char = |s: &str| s.chars().count() as f32;
        let lines = wrap("one two three\nfour", 8.0, per_char);
        assert_eq!(lines, vec!["one two", "three", "four"]);
    }

    #[test]
    fn wrap_splits_oversized_words() {
        let per_char = |s: &str| s.chars().count() as f32;
        let lines = wrap("abcdefghij", 4.0, per_char);
        assert_eq!(lines, vec!["abcd", "efgh", "ij"]);
    }

    #[test]
    fn empty_text_yields_one_empty_line() {
        let lines = wrap("", 10.0, |s: &str| s.len() as f32);
        assert_eq!(lines, vec![String::new()]);
    }
}

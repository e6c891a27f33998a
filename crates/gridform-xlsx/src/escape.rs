//! Text escaping for cell values
//!
//! XML 1.0 cannot carry most control characters, so SpreadsheetML encodes
//! them as `_xHHHH_`. Carriage returns go the same way, since an XML parser
//! folds a raw `\r` into `\n`. A literal underscore that would otherwise read as such
//! a sequence is itself encoded as `_x005F_`.

use quick_xml::escape::escape;

/// Escape a cell value for use as XML text content
pub(crate) fn escape_cell_text(s: &str) -> String {
    let mut encoded = String::with_capacity(s.len());
    for (i, c) in s.char_indices() {
        if c == '_' && looks_like_escape(&s[i..]) {
            encoded.push_str("_x005F_");
        } else if c == '\r' || is_xml_restricted(c) {
            encoded.push_str(&format!("_x{:04X}_", c as u32));
        } else {
            encoded.push(c);
        }
    }
    escape(encoded.as_str()).into_owned()
}

/// Whether the value needs `xml:space="preserve"` to survive a round trip
pub(crate) fn needs_preserve(s: &str) -> bool {
    s.starts_with(char::is_whitespace) || s.ends_with(char::is_whitespace) || s.contains('\n')
}

fn is_xml_restricted(c: char) -> bool {
    matches!(c, '\u{0}'..='\u{8}' | '\u{B}' | '\u{C}' | '\u{E}'..='\u{1F}' | '\u{FFFE}' | '\u{FFFF}')
}

fn looks_like_escape(s: &str) -> bool {
    let bytes = s.as_bytes();
    bytes.len() >= 7
        && bytes[1] == b'x'
        && bytes[2..6].iter().all(u8::is_ascii_hexdigit)
        && bytes[6] == b'_'
}

/// Decode `_xHHHH_` sequences back into characters
pub(crate) fn decode_excel_escapes(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    let mut rest = s;

    while let Some(pos) = rest.find('_') {
        result.push_str(&rest[..pos]);
        rest = &rest[pos..];

        let decoded = if looks_like_escape(rest) {
            u32::from_str_radix(&rest[2..6], 16)
                .ok()
                .and_then(char::from_u32)
        } else {
            None
        };

        match decoded {
            Some(c) => {
                result.push(c);
                rest = &rest[7..];
            }
            None => {
                result.push('_');
                rest = &rest[1..];
            }
        }
    }

    result.push_str(rest);
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_markup() {
        assert_eq!(escape_cell_text("a<b>&\"c\""), "a&lt;b&gt;&amp;&quot;c&quot;");
        assert_eq!(escape_cell_text("plain"), "plain");
    }

    #[test]
    fn test_escape_control_chars() {
        assert_eq!(escape_cell_text("a\u{1}b"), "a_x0001_b");
        assert_eq!(escape_cell_text("tab\tkept"), "tab\tkept");
        assert_eq!(escape_cell_text("a\r\nb\rc"), "a_x000D_\nb_x000D_c");
    }

    #[test]
    fn test_escape_literal_sequence() {
        assert_eq!(escape_cell_text("_x0041_"), "_x005F_x0041_");
        assert_eq!(escape_cell_text("snake_case"), "snake_case");
    }

    #[test]
    fn test_decode() {
        assert_eq!(decode_excel_escapes("a_x0001_b"), "a\u{1}b");
        assert_eq!(decode_excel_escapes("a_x000D_\nb"), "a\r\nb");
        assert_eq!(decode_excel_escapes("_x005F_x0041_"), "_x0041_");
        assert_eq!(decode_excel_escapes("snake_case_"), "snake_case_");
        assert_eq!(decode_excel_escapes("_xZZZZ_"), "_xZZZZ_");
    }

    #[test]
    fn test_preserve() {
        assert!(needs_preserve(" lead"));
        assert!(needs_preserve("trail "));
        assert!(needs_preserve("two\nlines"));
        assert!(!needs_preserve("inner space"));
        assert!(!needs_preserve(""));
    }
}

//! Byte-bounded truncation of text values.
//!
//! Attribute values are limited by their encoded size, not their character
//! count. Truncation always lands on a character boundary so the result is a
//! valid string on its own.

/// Encoding used to measure attribute byte sizes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextEncoding {
    #[default]
    Utf8,
    Utf16,
}

impl TextEncoding {
    pub fn encoded_len(&self, s: &str) -> usize {
        match self {
            TextEncoding::Utf8 => s.len(),
            TextEncoding::Utf16 => s.encode_utf16().count() * 2,
        }
    }

    fn char_len(&self, c: char) -> usize {
        match self {
            TextEncoding::Utf8 => c.len_utf8(),
            TextEncoding::Utf16 => c.len_utf16() * 2,
        }
    }
}

/// Truncates strings to a fixed encoded-byte budget.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ByteBoundedTruncator {
    max_bytes: usize,
    encoding: TextEncoding,
}

impl ByteBoundedTruncator {
    pub fn new(max_bytes: usize, encoding: TextEncoding) -> Self {
        Self {
            max_bytes,
            encoding,
        }
    }

    pub fn utf8(max_bytes: usize) -> Self {
        Self::new(max_bytes, TextEncoding::Utf8)
    }

    pub fn max_bytes(&self) -> usize {
        self.max_bytes
    }

    pub fn encoding(&self) -> TextEncoding {
        self.encoding
    }

    /// Returns the longest prefix of `value` whose encoded size fits the
    /// budget. Values that already fit are returned as-is.
    pub fn truncate<'a>(&self, value: &'a str) -> &'a str {
        match self.encoding {
            TextEncoding::Utf8 => truncate_utf8(value, self.max_bytes),
            TextEncoding::Utf16 => self.truncate_by_width(value),
        }
    }

    /// Like [`truncate`](Self::truncate) but reports whether anything was cut.
    pub fn truncate_checked<'a>(&self, value: &'a str) -> (&'a str, bool) {
        let cut = self.truncate(value);
        (cut, cut.len() < value.len())
    }

    fn truncate_by_width<'a>(&self, value: &'a str) -> &'a str {
        if self.encoding.encoded_len(value) <= self.max_bytes {
            return value;
        }
        let mut used = 0;
        for (idx, c) in value.char_indices() {
            used += self.encoding.char_len(c);
            if used > self.max_bytes {
                return &value[..idx];
            }
        }
        value
    }
}

/// UTF-8 truncation: step back from the byte budget to the nearest
/// character boundary. At most three steps are needed.
pub fn truncate_utf8(value: &str, max_bytes: usize) -> &str {
    if value.len() <= max_bytes {
        return value;
    }
    let mut end = max_bytes;
    while end > 0 && !value.is_char_boundary(end) {
        end -= 1;
    }
    &value[..end]
}

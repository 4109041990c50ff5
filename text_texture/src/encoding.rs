// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Conversion between the legacy Japanese code page and UTF-8.

use std::borrow::Cow;

use encoding_rs::{Encoding, SHIFT_JIS, UTF_8};

/// A code page supported by [`convert_encoding`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Codepage {
    /// Shift-JIS, Windows code page 932.
    ShiftJis,
    /// UTF-8, Windows code page 65001.
    Utf8,
}

impl Codepage {
    /// Looks up a Windows code page identifier.
    pub const fn from_id(id: u32) -> Option<Self> {
        match id {
            932 => Some(Self::ShiftJis),
            65001 => Some(Self::Utf8),
            _ => None,
        }
    }

    /// The Windows code page identifier.
    pub const fn id(self) -> u32 {
        match self {
            Self::ShiftJis => 932,
            Self::Utf8 => 65001,
        }
    }

    fn encoding(self) -> &'static Encoding {
        match self {
            Self::ShiftJis => SHIFT_JIS,
            Self::Utf8 => UTF_8,
        }
    }

    /// Decodes `bytes`, replacing malformed sequences with U+FFFD.
    pub fn decode(self, bytes: &[u8]) -> Cow<'_, str> {
        self.encoding().decode_without_bom_handling(bytes).0
    }

    /// Encodes `text`. Characters the code page cannot represent are written
    /// as HTML numeric character references.
    pub fn encode(self, text: &str) -> Cow<'_, [u8]> {
        self.encoding().encode(text).0
    }
}

/// Re-encodes `bytes` from one code page to another.
pub fn convert_encoding(bytes: &[u8], from: Codepage, to: Codepage) -> Vec<u8> {
    if from == to {
        return bytes.to_vec();
    }
    let text = from.decode(bytes);
    to.encode(&text).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    // "日本語" in Shift-JIS.
    const NIHONGO_SJIS: &[u8] = &[0x93, 0xFA, 0x96, 0x7B, 0x8C, 0xEA];

    #[test]
    fn shift_jis_to_utf8() {
        let utf8 = convert_encoding(NIHONGO_SJIS, Codepage::ShiftJis, Codepage::Utf8);
        assert_eq!(utf8, "日本語".as_bytes());
    }

    #[test]
    fn utf8_to_shift_jis() {
        let sjis = convert_encoding("日本語".as_bytes(), Codepage::Utf8, Codepage::ShiftJis);
        assert_eq!(sjis, NIHONGO_SJIS);
    }

    #[test]
    fn ascii_passes_through() {
        let bytes = b"Score: 100";
        assert_eq!(
            convert_encoding(bytes, Codepage::Utf8, Codepage::ShiftJis),
            bytes
        );
    }

    #[test]
    fn malformed_input_is_replaced() {
        let utf8 = convert_encoding(&[0x93], Codepage::ShiftJis, Codepage::Utf8);
        assert_eq!(utf8, "\u{FFFD}".as_bytes());
    }

    #[test]
    fn code_page_ids() {
        assert_eq!(Codepage::from_id(932), Some(Codepage::ShiftJis));
        assert_eq!(Codepage::from_id(65001), Some(Codepage::Utf8));
        assert_eq!(Codepage::from_id(1252), None);
        assert_eq!(Codepage::Utf8.id(), 65001);
    }
}

// src/layout/font.rs
//! The four PDF base-14 fonts the templates draw with, their advance widths
//! and the WinAnsi encoding their text is written in.
//!
//! Widths come from the Adobe AFM files, in thousandths of an em, indexed by
//! `(char as usize) - 32` for printable ASCII.

use pdf_writer::Name;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StandardFont {
    Helvetica,
    HelveticaBold,
    Courier,
    CourierBold,
}

impl StandardFont {
    pub const ALL: [StandardFont; 4] = [
        StandardFont::Helvetica,
        StandardFont::HelveticaBold,
        StandardFont::Courier,
        StandardFont::CourierBold,
    ];

    /// Page resource name the content stream refers to.
    pub fn resource_name(&self) -> Name<'static> {
        match self {
            Self::Helvetica => Name(b"F1"),
            Self::HelveticaBold => Name(b"F2"),
            Self::Courier => Name(b"F3"),
            Self::CourierBold => Name(b"F4"),
        }
    }

    pub fn base_font(&self) -> Name<'static> {
        match self {
            Self::Helvetica => Name(b"Helvetica"),
            Self::HelveticaBold => Name(b"Helvetica-Bold"),
            Self::Courier => Name(b"Courier"),
            Self::CourierBold => Name(b"Courier-Bold"),
        }
    }

    pub fn is_monospace(&self) -> bool {
        matches!(self, Self::Courier | Self::CourierBold)
    }

    /// Advance width of one character in font units (1/1000 em).
    /// Characters the encoding cannot carry are dropped when drawn, so they measure zero.
    pub fn char_units(&self, c: char) -> u16 {
        if self.is_monospace() {
            return if to_winansi(c).is_some() { 600 } else { 0 };
        }

        let code = c as usize;
        if (32..=126).contains(&code) {
            let table = match self {
                Self::HelveticaBold => &HELVETICA_BOLD_WIDTHS,
                _ => &HELVETICA_WIDTHS,
            };
            return table[code - 32];
        }

        match to_winansi(c) {
            Some(_) => 556,
            None => 0,
        }
    }

    /// Width of `text` in points at `size`.
    pub fn text_width(&self, text: &str, size: f64) -> f64 {
        let units: u32 = text.chars().map(|c| u32::from(self.char_units(c))).sum();
        f64::from(units) * size / 1000.0
    }
}

#[rustfmt::skip]
static HELVETICA_WIDTHS: [u16; 95] = [
    // sp   !    "    #    $    %    &    '    (    )    *    +    ,    -    .    /
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278,
    // 0-9
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556,
    // :    ;    <    =    >    ?    @
    278, 278, 584, 584, 584, 556, 1015,
    // A    B    C    D    E    F    G    H    I    J    K    L    M
    667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833,
    // N    O    P    Q    R    S    T    U    V    W    X    Y    Z
    722, 778, 667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611,
    // [    \    ]    ^    _    `
    278, 278, 278, 469, 556, 333,
    // a    b    c    d    e    f    g    h    i    j    k    l    m
    556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833,
    // n    o    p    q    r    s    t    u    v    w    x    y    z
    556, 556, 556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500,
    // {    |    }    ~
    334, 260, 334, 584,
];

#[rustfmt::skip]
static HELVETICA_BOLD_WIDTHS: [u16; 95] = [
    // sp   !    "    #    $    %    &    '    (    )    *    +    ,    -    .    /
    278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278,
    // 0-9
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556,
    // :    ;    <    =    >    ?    @
    333, 333, 584, 584, 584, 611, 975,
    // A    B    C    D    E    F    G    H    I    J    K    L    M
    722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833,
    // N    O    P    Q    R    S    T    U    V    W    X    Y    Z
    722, 778, 667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611,
    // [    \    ]    ^    _    `
    333, 278, 333, 584, 556, 333,
    // a    b    c    d    e    f    g    h    i    j    k    l    m
    556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889,
    // n    o    p    q    r    s    t    u    v    w    x    y    z
    611, 611, 611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500,
    // {    |    }    ~
    389, 280, 389, 584,
];

/// Map a character to its WinAnsiEncoding byte.
pub fn to_winansi(c: char) -> Option<u8> {
    let code = c as u32;
    match code {
        0x20..=0x7E | 0xA0..=0xFF => Some(code as u8),
        _ => match c {
            '€' => Some(0x80),
            '‚' => Some(0x82),
            'ƒ' => Some(0x83),
            '„' => Some(0x84),
            '…' => Some(0x85),
            '†' => Some(0x86),
            '‡' => Some(0x87),
            'ˆ' => Some(0x88),
            '‰' => Some(0x89),
            'Š' => Some(0x8A),
            '‹' => Some(0x8B),
            'Œ' => Some(0x8C),
            'Ž' => Some(0x8E),
            '\u{2018}' => Some(0x91),
            '\u{2019}' => Some(0x92),
            '\u{201C}' => Some(0x93),
            '\u{201D}' => Some(0x94),
            '•' => Some(0x95),
            '–' => Some(0x96),
            '—' => Some(0x97),
            '˜' => Some(0x98),
            '™' => Some(0x99),
            'š' => Some(0x9A),
            '›' => Some(0x9B),
            'œ' => Some(0x9C),
            'ž' => Some(0x9E),
            'Ÿ' => Some(0x9F),
            _ => None,
        },
    }
}

/// Encode text for a simple-font `Tj` operand, dropping what WinAnsi cannot carry.
pub fn encode_winansi(text: &str) -> Vec<u8> {
    text.chars().filter_map(to_winansi).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_helvetica_widths() {
        let f = StandardFont::Helvetica;
        assert_eq!(f.char_units(' '), 278);
        assert_eq!(f.char_units('W'), 944);
        assert_eq!(f.char_units('i'), 222);
        assert!((f.text_width("Hi", 10.0) - 9.44).abs() < 1e-9);
    }

    #[test]
    fn test_bold_is_wider() {
        let text = "Software Developer";
        assert!(
            StandardFont::HelveticaBold.text_width(text, 12.0)
                > StandardFont::Helvetica.text_width(text, 12.0)
        );
    }

    #[test]
    fn test_courier_is_monospace() {
        let f = StandardFont::Courier;
        assert_eq!(f.text_width("iiii", 10.0), f.text_width("WWWW", 10.0));
        assert_eq!(f.text_width("abc", 10.0), 18.0);
    }

    #[test]
    fn test_emoji_measures_zero_and_is_dropped() {
        let f = StandardFont::HelveticaBold;
        assert_eq!(f.char_units('💡'), 0);
        assert_eq!(
            f.text_width("💡 OBJECTIVE", 13.0),
            f.text_width(" OBJECTIVE", 13.0)
        );
        assert_eq!(encode_winansi("💡 OK"), b" OK".to_vec());
    }

    #[test]
    fn test_latin1_and_specials_encode() {
        assert_eq!(encode_winansi("café"), vec![b'c', b'a', b'f', 0xE9]);
        assert_eq!(encode_winansi("a – b"), vec![b'a', b' ', 0x96, b' ', b'b']);
        assert_eq!(to_winansi('\n'), None);
    }
}

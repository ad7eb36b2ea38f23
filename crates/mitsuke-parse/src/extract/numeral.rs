//! Number spellings found in titles: arabic, roman, english ordinals, kanji.

/// Parse a plain arabic number ("2", "02").
pub fn parse_number(s: &str) -> Option<u32> {
    s.parse().ok()
}

/// Parse a number that might be arabic or roman.
pub fn parse_number_or_roman(s: &str) -> Option<u32> {
    parse_number(s).or_else(|| roman_to_u32(s))
}

/// Simple roman numeral to u32 conversion (I–XXXIX range).
pub fn roman_to_u32(s: &str) -> Option<u32> {
    if s.is_empty() {
        return None;
    }
    let s = s.to_uppercase();
    let mut total: i32 = 0;
    let mut prev = 0i32;

    for c in s.chars().rev() {
        let value = match c {
            'I' => 1,
            'V' => 5,
            'X' => 10,
            'L' => 50,
            _ => return None,
        };
        if value < prev {
            total -= value;
        } else {
            total += value;
        }
        prev = value;
    }

    if total > 0 {
        Some(total as u32)
    } else {
        None
    }
}

/// Render a number as an uppercase roman numeral. Zero has no spelling.
pub fn to_roman(mut n: u32) -> Option<String> {
    if n == 0 || n > 3999 {
        return None;
    }
    const TABLE: &[(u32, &str)] = &[
        (1000, "M"),
        (900, "CM"),
        (500, "D"),
        (400, "CD"),
        (100, "C"),
        (90, "XC"),
        (50, "L"),
        (40, "XL"),
        (10, "X"),
        (9, "IX"),
        (5, "V"),
        (4, "IV"),
        (1, "I"),
    ];
    let mut out = String::new();
    for &(value, glyph) in TABLE {
        while n >= value {
            out.push_str(glyph);
            n -= value;
        }
    }
    Some(out)
}

/// English ordinal words up to ten.
const ORDINAL_WORDS: &[(&str, u32)] = &[
    ("first", 1),
    ("second", 2),
    ("third", 3),
    ("fourth", 4),
    ("fifth", 5),
    ("sixth", 6),
    ("seventh", 7),
    ("eighth", 8),
    ("ninth", 9),
    ("tenth", 10),
];

/// "second" → 2.
pub fn ordinal_word_to_u32(s: &str) -> Option<u32> {
    let lower = s.to_lowercase();
    ORDINAL_WORDS
        .iter()
        .find(|(word, _)| *word == lower)
        .map(|&(_, n)| n)
}

/// 2 → "2nd", 11 → "11th", 23 → "23rd".
pub fn ordinal(n: u32) -> String {
    let suffix = match (n % 10, n % 100) {
        (_, 11..=13) => "th",
        (1, _) => "st",
        (2, _) => "nd",
        (3, _) => "rd",
        _ => "th",
    };
    format!("{n}{suffix}")
}

/// Kanji numerals one through ninety-nine ("二" → 2, "十二" → 12, "二十" → 20).
pub fn kanji_to_u32(s: &str) -> Option<u32> {
    fn digit(c: char) -> Option<u32> {
        Some(match c {
            '一' => 1,
            '二' => 2,
            '三' => 3,
            '四' => 4,
            '五' => 5,
            '六' => 6,
            '七' => 7,
            '八' => 8,
            '九' => 9,
            _ => return None,
        })
    }

    let chars: Vec<char> = s.chars().collect();
    match chars.as_slice() {
        [c] if *c == '十' => Some(10),
        [c] => digit(*c),
        ['十', ones] => Some(10 + digit(*ones)?),
        [tens, '十'] => Some(digit(*tens)? * 10),
        [tens, '十', ones] => Some(digit(*tens)? * 10 + digit(*ones)?),
        _ => None,
    }
}

/// Parse an arabic or kanji number.
pub fn parse_number_or_kanji(s: &str) -> Option<u32> {
    parse_number(s).or_else(|| kanji_to_u32(s))
}

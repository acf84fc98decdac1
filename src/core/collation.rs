//! Name ordering for the alphabetical listing.
//!
//! Approximates a root-locale collation: letters compare without regard to
//! accents or case first, then accents break ties, then lowercase sorts
//! before uppercase, and finally raw code points decide.

use std::cmp::Ordering;

/// Strip the diacritic from common Latin letters
fn base_letter(c: char) -> char {
    match c {
        'à' | 'á' | 'â' | 'ã' | 'ä' | 'å' | 'ā' | 'ă' | 'ą' => 'a',
        'ç' | 'ć' | 'ĉ' | 'ċ' | 'č' => 'c',
        'ď' | 'đ' => 'd',
        'è' | 'é' | 'ê' | 'ë' | 'ē' | 'ĕ' | 'ė' | 'ę' | 'ě' => 'e',
        'ĝ' | 'ğ' | 'ġ' | 'ģ' => 'g',
        'ĥ' | 'ħ' => 'h',
        'ì' | 'í' | 'î' | 'ï' | 'ĩ' | 'ī' | 'ĭ' | 'į' | 'ı' => 'i',
        'ĵ' => 'j',
        'ķ' => 'k',
        'ĺ' | 'ļ' | 'ľ' | 'ŀ' | 'ł' => 'l',
        'ñ' | 'ń' | 'ņ' | 'ň' => 'n',
        'ò' | 'ó' | 'ô' | 'õ' | 'ö' | 'ø' | 'ō' | 'ŏ' | 'ő' => 'o',
        'ŕ' | 'ŗ' | 'ř' => 'r',
        'ś' | 'ŝ' | 'ş' | 'š' => 's',
        'ţ' | 'ť' | 'ŧ' => 't',
        'ù' | 'ú' | 'û' | 'ü' | 'ũ' | 'ū' | 'ŭ' | 'ů' | 'ű' | 'ų' => 'u',
        'ŵ' => 'w',
        'ý' | 'ÿ' | 'ŷ' => 'y',
        'ź' | 'ż' | 'ž' => 'z',
        other => other,
    }
}

fn lowercase_chars(s: &str) -> impl Iterator<Item = char> + '_ {
    s.chars().flat_map(char::to_lowercase)
}

/// Ligatures and sharp s weigh as their two-letter spellings
fn primary_letters(c: char) -> impl Iterator<Item = char> {
    let (letters, len) = match c {
        'ß' => (['s', 's'], 2),
        'æ' => (['a', 'e'], 2),
        'œ' => (['o', 'e'], 2),
        'þ' => (['t', 'h'], 2),
        other => ([base_letter(other), '\0'], 1),
    };
    letters.into_iter().take(len)
}

fn primary_key(s: &str) -> impl Iterator<Item = char> + '_ {
    lowercase_chars(s).flat_map(primary_letters)
}

/// Lowercase before uppercase at the first case difference
fn compare_case(a: &str, b: &str) -> Ordering {
    for (ca, cb) in a.chars().zip(b.chars()) {
        if ca == cb {
            continue;
        }
        match (ca.is_lowercase(), cb.is_lowercase()) {
            (true, false) => return Ordering::Less,
            (false, true) => return Ordering::Greater,
            _ => {}
        }
    }
    Ordering::Equal
}

/// Compare two display names the way a locale-aware sort would
pub fn compare_names(a: &str, b: &str) -> Ordering {
    primary_key(a)
        .cmp(primary_key(b))
        .then_with(|| lowercase_chars(a).cmp(lowercase_chars(b)))
        .then_with(|| compare_case(a, b))
        .then_with(|| a.cmp(b))
}

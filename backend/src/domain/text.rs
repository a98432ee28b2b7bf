//! Case/accent-insensitive text matching helpers.
//!
//! Catalog descriptions and agreement keys come from Spanish-language data
//! entered over many years, with inconsistent casing and accents. All
//! description matching (X-ray detection, subsequent-exposure detection) and
//! alias-key matching goes through these helpers.

/// Lowercase the input and fold Spanish accented characters to their plain
/// ASCII counterparts.
pub fn normalize(input: &str) -> String {
    input
        .to_lowercase()
        .chars()
        .map(|c| match c {
            'á' | 'à' | 'ä' | 'â' => 'a',
            'é' | 'è' | 'ë' | 'ê' => 'e',
            'í' | 'ì' | 'ï' | 'î' => 'i',
            'ó' | 'ò' | 'ö' | 'ô' => 'o',
            'ú' | 'ù' | 'ü' | 'û' => 'u',
            'ñ' => 'n',
            other => other,
        })
        .collect()
}

/// Case/accent-insensitive substring check.
pub fn contains_normalized(haystack: &str, needle: &str) -> bool {
    normalize(haystack).contains(&normalize(needle))
}

/// Normalize an agreement field key: accent folding plus unifying the
/// word separators historical revisions disagree on.
pub fn normalize_key(key: &str) -> String {
    normalize(key)
        .chars()
        .map(|c| if matches!(c, ' ' | '-' | '.') { '_' } else { c })
        .collect()
}

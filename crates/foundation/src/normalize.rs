//! Name normalization for cross-dataset joins.
//!
//! Two levels: `normalize_name` is the display-identity key (keeps CJK,
//! drops whitespace), `normalize_geo_name` is the join key for country and
//! city lookups (Latin diacritics folded, everything outside `[a-z0-9]`
//! dropped). Both are idempotent.

/// Trim, casefold and strip all whitespace. CJK text passes through, so
/// province names keep their identity.
pub fn normalize_name(value: &str) -> String {
    value
        .trim()
        .to_lowercase()
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect()
}

/// Join key for geographic names: casefold, fold Latin diacritics to their
/// base letter, then keep ASCII alphanumerics only. Characters without a
/// base-letter decomposition (including CJK) are dropped, which matches the
/// datasets: their join keys are plain Latin.
pub fn normalize_geo_name(value: &str) -> String {
    value
        .trim()
        .to_lowercase()
        .chars()
        .map(fold_latin)
        .filter(char::is_ascii_alphanumeric)
        .collect()
}

// Covers the accented Latin letters that actually occur in the country and
// city datasets (Curacao, Reunion, Sao Paulo, Bogota, Malmo, ...).
fn fold_latin(c: char) -> char {
    match c {
        'à' | 'á' | 'â' | 'ã' | 'ä' | 'å' | 'ā' | 'ă' | 'ą' => 'a',
        'ç' | 'ć' | 'č' => 'c',
        'è' | 'é' | 'ê' | 'ë' | 'ē' | 'ė' | 'ę' | 'ě' => 'e',
        'ì' | 'í' | 'î' | 'ï' | 'ī' | 'į' => 'i',
        'ñ' | 'ń' | 'ň' => 'n',
        'ò' | 'ó' | 'ô' | 'õ' | 'ö' | 'ō' => 'o',
        'ř' => 'r',
        'ś' | 'š' | 'ş' | 'ș' => 's',
        'ţ' | 'ț' | 'ť' => 't',
        'ù' | 'ú' | 'û' | 'ü' | 'ū' | 'ů' => 'u',
        'ý' | 'ÿ' => 'y',
        'ź' | 'ż' | 'ž' => 'z',
        'ğ' => 'g',
        other => other,
    }
}

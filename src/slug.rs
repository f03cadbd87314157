/// URL slugs for movies, actors and directors: transliterated to ASCII,
/// lowercased, hyphen-separated. Computed once when a record is created and
/// never recomputed on updates, so catalog URLs stay stable.
pub fn slugify(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut prev_dash = false;
    for c in text.chars().flat_map(|c| c.to_lowercase()) {
        if c.is_ascii_alphanumeric() {
            out.push(c);
            prev_dash = false;
        } else if let Some(tr) = transliterate(c) {
            out.push_str(tr);
            prev_dash = false;
        } else if (c.is_whitespace() || c == '-' || c == '_') && !prev_dash {
            out.push('-');
            prev_dash = true;
        }
    }
    out.trim_matches('-').to_string()
}

/// Joins name parts the way entity slugs are derived ("first-last").
pub fn slugify_name(first: &str, last: &str) -> String {
    slugify(&format!("{first} {last}"))
}

// Cyrillic follows the Ukrainian romanization table; the Latin rows fold the
// diacritics that show up in catalog names. Anything unmapped is dropped.
fn transliterate(c: char) -> Option<&'static str> {
    let tr = match c {
        'а' => "a",
        'б' => "b",
        'в' => "v",
        'г' => "h",
        'ґ' => "g",
        'д' => "d",
        'е' | 'э' | 'ё' => "e",
        'є' => "ie",
        'ж' => "zh",
        'з' => "z",
        'и' => "y",
        'і' | 'ї' | 'й' => "i",
        'к' => "k",
        'л' => "l",
        'м' => "m",
        'н' => "n",
        'о' => "o",
        'п' => "p",
        'р' => "r",
        'с' => "s",
        'т' => "t",
        'у' => "u",
        'ф' => "f",
        'х' => "kh",
        'ц' => "ts",
        'ч' => "ch",
        'ш' => "sh",
        'щ' => "shch",
        'ь' | 'ъ' => "",
        'ы' => "y",
        'ю' => "iu",
        'я' => "ia",
        'à' | 'á' | 'â' | 'ä' | 'å' | 'ã' => "a",
        'è' | 'é' | 'ê' | 'ë' => "e",
        'ì' | 'í' | 'î' | 'ï' => "i",
        'ò' | 'ó' | 'ô' | 'ö' | 'õ' => "o",
        'ù' | 'ú' | 'û' | 'ü' => "u",
        'ç' => "c",
        'ñ' => "n",
        'ß' => "ss",
        _ => return None,
    };
    Some(tr)
}

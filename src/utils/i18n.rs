use tracing::warn;

/// Locales shipped in `locales/`
pub const AVAILABLE_LOCALES: &[&str] = &["en", "ko"];

/// Set the current locale, falling back to English for unknown codes
pub fn set_locale(locale: &str) {
    let locale = normalize_locale(locale);
    rust_i18n::set_locale(locale);
}

/// Map a locale code such as `ko-KR` onto one we ship
pub fn normalize_locale(locale: &str) -> &'static str {
    let lang = locale
        .split(['-', '_'])
        .next()
        .unwrap_or_default()
        .to_ascii_lowercase();

    match AVAILABLE_LOCALES.iter().find(|l| **l == lang) {
        Some(found) => *found,
        None => {
            warn!("Unsupported locale '{}', using en", locale);
            "en"
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_locale() {
        assert_eq!(normalize_locale("ko"), "ko");
        assert_eq!(normalize_locale("ko-KR"), "ko");
        assert_eq!(normalize_locale("EN_us"), "en");
        assert_eq!(normalize_locale("fi"), "en");
        assert_eq!(normalize_locale(""), "en");
    }
}

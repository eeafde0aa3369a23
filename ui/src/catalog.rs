//! Fixed country and language catalogs offered as recipient filters.

/// A selectable filter value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CatalogEntry {
    pub code: &'static str,
    pub name: &'static str,
}

const fn entry(code: &'static str, name: &'static str) -> CatalogEntry {
    CatalogEntry { code, name }
}

pub const COUNTRIES: [CatalogEntry; 23] = [
    entry("BG", "Bulgaria"),
    entry("GR", "Greece"),
    entry("MK", "North Macedonia"),
    entry("AL", "Albania"),
    entry("TR", "Turkey"),
    entry("RO", "Romania"),
    entry("RS", "Serbia"),
    entry("BA", "Bosnia and Herzegovina"),
    entry("HR", "Croatia"),
    entry("HU", "Hungary"),
    entry("SK", "Slovakia"),
    entry("SI", "Slovenia"),
    entry("DE", "Germany"),
    entry("PL", "Poland"),
    entry("CZ", "Czechia"),
    entry("IT", "Italy"),
    entry("FR", "France"),
    entry("ES", "Spain"),
    entry("PT", "Portugal"),
    entry("NL", "Netherlands"),
    entry("LT", "Lithuania"),
    entry("LV", "Latvia"),
    entry("EE", "Estonia"),
];

pub const LANGUAGES: [CatalogEntry; 23] = [
    entry("bg", "Bulgarian"),
    entry("el", "Greek"),
    entry("mk", "Macedonian"),
    entry("sq", "Albanian"),
    entry("tr", "Turkish"),
    entry("ro", "Romanian"),
    entry("sr", "Serbian"),
    entry("bs", "Bosnian"),
    entry("hr", "Croatian"),
    entry("hu", "Hungarian"),
    entry("sk", "Slovak"),
    entry("sl", "Slovenian"),
    entry("de", "German"),
    entry("pl", "Polish"),
    entry("cs", "Czech"),
    entry("it", "Italian"),
    entry("fr", "French"),
    entry("es", "Spanish"),
    entry("pt", "Portuguese"),
    entry("nl", "Dutch"),
    entry("lt", "Lithuanian"),
    entry("lv", "Latvian"),
    entry("et", "Estonian"),
];

// Index-aligned with LANGUAGES.
const LANGUAGE_COUNTRIES: [&str; 23] = [
    "BG", "GR", "MK", "AL", "TR", "RO", "RS", "BA", "HR", "HU", "SK", "SI", "DE", "PL", "CZ",
    "IT", "FR", "ES", "PT", "NL", "LT", "LV", "EE",
];

pub fn is_known_country(code: &str) -> bool {
    COUNTRIES.iter().any(|c| c.code == code)
}

pub fn is_known_language(code: &str) -> bool {
    LANGUAGES.iter().any(|l| l.code == code)
}

/// Display name for a country code, or the code itself when unknown.
pub fn country_name(code: &str) -> &str {
    COUNTRIES
        .iter()
        .find(|c| c.code == code)
        .map(|c| c.name)
        .unwrap_or(code)
}

pub fn language_name(code: &str) -> Option<&'static str> {
    LANGUAGES.iter().find(|l| l.code == code).map(|l| l.name)
}

/// Country most associated with a language code, case-insensitive.
pub fn infer_country_from_language(language: &str) -> Option<&'static str> {
    let language = language.to_lowercase();
    LANGUAGES
        .iter()
        .position(|l| l.code == language)
        .map(|index| LANGUAGE_COUNTRIES[index])
}

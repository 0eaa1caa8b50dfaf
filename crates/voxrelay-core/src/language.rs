//! Static language tables shared by the services
//!
//! All tables are process-wide, read-only and compiled in.

/// Human-readable names for the language codes the services display
const LANGUAGE_NAMES: &[(&str, &str)] = &[
    ("en", "English"),
    ("es", "Spanish"),
    ("fr", "French"),
    ("de", "German"),
    ("it", "Italian"),
    ("pt", "Portuguese"),
    ("ru", "Russian"),
    ("ja", "Japanese"),
    ("ko", "Korean"),
    ("zh", "Chinese"),
    ("zh-cn", "Chinese (Simplified)"),
    ("zh-tw", "Chinese (Traditional)"),
    ("ar", "Arabic"),
    ("hi", "Hindi"),
    ("nl", "Dutch"),
    ("sv", "Swedish"),
    ("no", "Norwegian"),
    ("da", "Danish"),
    ("fi", "Finnish"),
    ("pl", "Polish"),
    ("tr", "Turkish"),
    ("he", "Hebrew"),
    ("th", "Thai"),
    ("vi", "Vietnamese"),
    ("uk", "Ukrainian"),
    ("cs", "Czech"),
    ("hu", "Hungarian"),
    ("ro", "Romanian"),
    ("bg", "Bulgarian"),
    ("hr", "Croatian"),
    ("sk", "Slovak"),
    ("sl", "Slovenian"),
    ("et", "Estonian"),
    ("lv", "Latvian"),
    ("lt", "Lithuanian"),
    ("is", "Icelandic"),
    ("mt", "Maltese"),
    ("cy", "Welsh"),
];

/// Aliases folded into a canonical code during normalization
const CODE_ALIASES: &[(&str, &str)] = &[("zh", "zh-cn"), ("chinese", "zh-cn"), ("mandarin", "zh-cn")];

/// Codes accepted by the Google translation endpoint
pub const TRANSLATION_LANGUAGES: &[&str] = &[
    "af", "sq", "am", "ar", "hy", "az", "eu", "be", "bn", "bs", "bg", "ca", "ceb", "ny", "zh-cn", "zh-tw", "co", "hr",
    "cs", "da", "nl", "en", "eo", "et", "tl", "fi", "fr", "fy", "gl", "ka", "de", "el", "gu", "ht", "ha", "haw", "iw",
    "he", "hi", "hmn", "hu", "is", "ig", "id", "ga", "it", "ja", "jw", "kn", "kk", "km", "ko", "ku", "ky", "lo", "la",
    "lv", "lt", "lb", "mk", "mg", "ms", "ml", "mt", "mi", "mr", "mn", "my", "ne", "no", "or", "ps", "fa", "pl", "pt",
    "pa", "ro", "ru", "sm", "gd", "sr", "st", "sn", "sd", "si", "sk", "sl", "so", "es", "su", "sw", "sv", "tg", "ta",
    "te", "th", "tr", "uk", "ur", "ug", "uz", "vi", "cy", "xh", "yi", "yo", "zu",
];

/// Codes understood by the Whisper speech model
pub const SPEECH_LANGUAGES: &[&str] = &[
    "en", "zh", "de", "es", "ru", "ko", "fr", "ja", "pt", "tr", "pl", "ca", "nl", "ar", "sv", "it", "id", "hi", "fi",
    "vi", "he", "uk", "el", "ms", "cs", "ro", "da", "hu", "ta", "no", "th", "ur", "hr", "bg", "lt", "la", "mi", "ml",
    "cy", "sk", "te", "fa", "lv", "bn", "sr", "az", "sl", "kn", "et", "mk", "br", "eu", "is", "hy", "ne", "mn", "bs",
    "kk", "sq", "sw", "gl", "mr", "pa", "si", "km", "sn", "yo", "so", "af", "oc", "ka", "be", "tg", "sd", "gu", "am",
    "yi", "lo", "uz", "fo", "ht", "ps", "tk", "nn", "mt", "sa", "lb", "my", "bo", "tl", "mg", "as", "tt", "haw", "ln",
    "ha", "ba", "jw", "su", "yue",
];

/// Speech languages reported while the model is not ready
pub const SPEECH_FALLBACK: &[&str] = &["en", "es", "fr", "de", "it", "pt", "ru", "ja", "ko", "zh", "ar", "hi"];

/// Last-resort speech language list when listing itself fails
pub const SPEECH_MINIMAL: &[&str] = &["en", "es", "fr", "de"];

/// Translation languages reported when the provider listing fails
pub const TRANSLATION_FALLBACK: &[&str] = &["en", "es", "fr", "de", "it", "ja", "ko", "zh"];

/// Translation languages reported by the backend when its sibling is down
pub const PROXY_FALLBACK: &[&str] = &["en", "es", "fr", "de", "it", "ja", "ko", "zh", "ar", "hi"];

/// Last-resort translation language list for the backend
pub const PROXY_MINIMAL: &[&str] = &["en", "es", "fr", "de", "it"];

/// Look up the display name of a language code
pub fn language_name(code: &str) -> Option<&'static str> {
    LANGUAGE_NAMES.iter().find(|(c, _)| *c == code).map(|(_, name)| *name)
}

/// Display name of a language code, falling back to the code itself
pub fn display_name(code: &str) -> String {
    language_name(code).map_or_else(|| code.to_owned(), str::to_owned)
}

/// Every code with a known display name
pub fn named_languages() -> Vec<String> {
    LANGUAGE_NAMES.iter().map(|(code, _)| (*code).to_owned()).collect()
}

/// Canonicalize a language code
///
/// Lower-cases and trims the input, then folds known aliases
/// (`zh`, `chinese`, `mandarin` become `zh-cn`).
pub fn normalize(code: &str) -> String {
    let lowered = code.trim().to_lowercase();

    CODE_ALIASES
        .iter()
        .find(|(alias, _)| *alias == lowered)
        .map_or(lowered, |(_, canonical)| (*canonical).to_owned())
}

/// Convert a static code list into owned strings
pub fn to_owned_list(codes: &[&str]) -> Vec<String> {
    codes.iter().map(|code| (*code).to_owned()).collect()
}

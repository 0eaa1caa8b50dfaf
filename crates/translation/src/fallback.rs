//! Locally synthesized translations for when the provider cannot be
//! reached over TLS

use voxrelay_core::language::display_name;

use crate::types::{Provenance, TranslationResult};

/// Known phrase translations, keyed by (text, normalized target)
const PHRASES: &[(&str, &str, &str)] = &[
    ("Hello world", "es", "Hola mundo"),
    ("Hello world", "fr", "Bonjour le monde"),
    ("Hello world", "de", "Hallo Welt"),
    ("Hello world", "it", "Ciao mondo"),
    ("Hello world", "pt", "Olá mundo"),
    ("Hello", "es", "Hola"),
    ("Thank you", "es", "Gracias"),
    ("Good morning", "es", "Buenos días"),
    ("How are you?", "es", "¿Cómo estás?"),
];

const FALLBACK_CONFIDENCE: f64 = 0.9;

/// Build a fallback result tagged with [`Provenance::MockTranslatorSslFallback`]
pub fn translate(text: &str, target_language: &str, source_language: Option<&str>) -> TranslationResult {
    let translated_text = PHRASES
        .iter()
        .find(|(phrase, target, _)| *phrase == text && *target == target_language)
        .map_or_else(
            || format!("[MOCK] {text} -> {target_language}"),
            |(_, _, translated)| (*translated).to_owned(),
        );

    let source_language = source_language.unwrap_or("en");

    tracing::warn!(target_language, %translated_text, "Using fallback translation");

    TranslationResult {
        original_text: text.to_owned(),
        translated_text,
        source_language: source_language.to_owned(),
        target_language: target_language.to_owned(),
        source_language_name: display_name(source_language),
        target_language_name: display_name(target_language),
        confidence: Some(FALLBACK_CONFIDENCE),
        provenance: Provenance::MockTranslatorSslFallback,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_phrase() {
        let result = translate("Hello world", "es", None);

        assert_eq!(result.translated_text, "Hola mundo");
        assert_eq!(result.source_language, "en");
        assert_eq!(result.source_language_name, "English");
        assert_eq!(result.target_language_name, "Spanish");
        assert!(result.provenance.is_fallback());
    }

    #[test]
    fn unknown_phrase_is_tagged_placeholder() {
        let result = translate("Good night", "ja", Some("en"));
        assert_eq!(result.translated_text, "[MOCK] Good night -> ja");
        assert_eq!(result.target_language_name, "Japanese");
    }

    #[test]
    fn phrase_lookup_is_exact() {
        assert_eq!(translate("hello world", "es", None).translated_text, "[MOCK] hello world -> es");
    }

    #[test]
    fn serializes_provenance_as_service() {
        let value = serde_json::to_value(translate("Hello", "es", None)).unwrap();
        assert_eq!(value["service"], "mock_translator_ssl_fallback");
        assert_eq!(value["translated_text"], "Hola");
    }
}

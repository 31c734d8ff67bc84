// src/utils/html.rs

use std::collections::HashSet;

use ammonia::Builder;

/// Strips every HTML tag from short free-text profile fields (names,
/// occupation) and trims the result. Text content is kept; markup and
/// script bodies are dropped.
pub fn sanitize_text(input: &str) -> String {
    let mut builder = Builder::empty();
    builder.clean_content_tags(HashSet::from(["script", "style"]));
    builder.clean(input).to_string().trim().to_string()
}

/// Sanitizes an optional field, mapping blank results to `None`.
pub fn sanitize_optional(input: Option<&str>) -> Option<String> {
    input.map(sanitize_text).filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tags_are_stripped() {
        assert_eq!(sanitize_text("  <b>Samara</b> "), "Samara");
        assert_eq!(sanitize_text("Lee<script>alert(1)</script>"), "Lee");
    }

    #[test]
    fn test_blank_optional_becomes_none() {
        assert_eq!(sanitize_optional(Some("<i></i>")), None);
        assert_eq!(sanitize_optional(Some("Student")), Some("Student".to_string()));
        assert_eq!(sanitize_optional(None), None);
    }
}

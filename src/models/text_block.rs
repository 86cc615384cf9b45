use serde::{Deserialize, Serialize};

/// Script composition of a recognized block, as far as this scanner cares:
/// nutrition labels in scope mix Hangul syllables and Latin letters.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ScriptHint {
    Latin,
    Korean,
    Mixed,
}

impl ScriptHint {
    /// Classify a recognized string by the letters it contains.
    /// Blocks without any letter default to Latin.
    pub fn detect(text: &str) -> Self {
        let has_hangul = text.chars().any(|c| ('가'..='힣').contains(&c));
        let has_latin = text.chars().any(|c| c.is_ascii_alphabetic());

        match (has_hangul, has_latin) {
            (true, true) => Self::Mixed,
            (true, false) => Self::Korean,
            _ => Self::Latin,
        }
    }
}

/// One unit of OCR output: a contiguous recognized text region.
///
/// Produced by the recognition collaborator, never mutated by the parser.
/// `text` may contain embedded line breaks; normalization happens per parse
/// call, on a copy.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TextBlock {
    pub text: String,
    #[serde(default)]
    pub script: Option<ScriptHint>,
}

impl TextBlock {
    /// Create a block with its script hint derived from the content.
    pub fn new(text: impl Into<String>) -> Self {
        let text = text.into();
        let script = Some(ScriptHint::detect(&text));
        Self { text, script }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_script_hint_hangul_only() {
        assert_eq!(ScriptHint::detect("단백질 10g"), ScriptHint::Korean);
    }

    #[test]
    fn test_script_hint_latin_only() {
        assert_eq!(ScriptHint::detect("Protein 10g"), ScriptHint::Latin);
    }

    #[test]
    fn test_script_hint_mixed() {
        assert_eq!(ScriptHint::detect("단백질 Protein 10g"), ScriptHint::Mixed);
    }

    #[test]
    fn test_script_hint_no_letters_defaults_to_latin() {
        assert_eq!(ScriptHint::detect("123 456 %"), ScriptHint::Latin);
    }

    #[test]
    fn test_block_new_tags_script() {
        let block = TextBlock::new("나트륨 200mg");
        assert_eq!(block.script, Some(ScriptHint::Korean));
        assert_eq!(block.text, "나트륨 200mg");
    }

    #[test]
    fn test_block_deserializes_without_script() {
        let block: TextBlock = serde_json::from_str(r#"{"text":"지방 5g"}"#).unwrap();
        assert_eq!(block.text, "지방 5g");
        assert!(block.script.is_none());
    }
}

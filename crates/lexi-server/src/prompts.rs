//! Prompt builders, one per capability.

use serde_json::{Value, json};

pub fn definition(term: &str, native_lang: &str, target_lang: &str) -> String {
    format!(
        "Define \"{term}\" in {target_lang} for a {native_lang} speaker.\n\
         Include:\n\
         1) Native language definition\n\
         2) Two example sentences (target + native)\n\
         3) A short usage note (fun, casual tone)"
    )
}

/// Response schema sent with the definition request so the model answers
/// in the exact shape the client parses.
pub fn definition_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "definition": { "type": "STRING" },
            "examples": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "target": { "type": "STRING" },
                        "native": { "type": "STRING" },
                    },
                },
            },
            "usageNote": { "type": "STRING" },
        },
    })
}

pub fn image(term: &str, target_lang: &str) -> String {
    format!(
        "A simple, pop-art style illustration representing \"{term}\" in {target_lang}. \
         White background."
    )
}

/// Per-category task line for the quick-answer prompt. Unknown categories
/// are rejected at the route boundary.
pub fn quick_instruction(category: &str, term: &str) -> Option<String> {
    let instruction = match category {
        "natural" => {
            format!("Explain how to use \"{term}\" naturally with 1-2 casual example sentences.")
        }
        "mistake" => format!(
            "Explain the most common mistakes when using \"{term}\" and how a learner can avoid them."
        ),
        "funfact" => format!("Give a fun etymology or mnemonic to remember \"{term}\"."),
        _ => return None,
    };
    Some(instruction)
}

pub fn quick(instruction: &str, native_lang: &str, target_lang: &str) -> String {
    format!(
        "You are a friendly {target_lang} tutor teaching a {native_lang} speaker.\n\
         Respond in a casual tone, max 4 sentences, include emojis.\n\
         Task: {instruction}"
    )
}

pub fn story(words: &[String], native_lang: &str, target_lang: &str) -> String {
    format!(
        "Create a simple real-life dialogue in {target_lang} using these words:\n\
         {}.\n\n\
         Requirements:\n\
         - Simple beginner language\n\
         - Max 6-8 lines\n\
         - After each {target_lang} line, include {native_lang} translation in parentheses.",
        words.join(", ")
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn definition_prompt_names_both_languages() {
        let prompt = definition("gato", "English", "Spanish");
        assert!(prompt.contains("\"gato\""));
        assert!(prompt.contains("in Spanish"));
        assert!(prompt.contains("English speaker"));
    }

    #[test]
    fn quick_instruction_covers_every_category() {
        for category in ["natural", "mistake", "funfact"] {
            assert!(quick_instruction(category, "gato").is_some(), "{category}");
        }
        assert!(quick_instruction("etymology", "gato").is_none());
    }

    #[test]
    fn story_prompt_lists_all_words() {
        let words = vec!["sol".to_string(), "luna".to_string()];
        let prompt = story(&words, "English", "Spanish");
        assert!(prompt.contains("sol, luna"));
    }

    #[test]
    fn definition_schema_matches_wire_fields() {
        let schema = definition_schema();
        assert!(schema["properties"]["usageNote"].is_object());
        assert!(schema["properties"]["examples"]["items"]["properties"]["target"].is_object());
    }
}

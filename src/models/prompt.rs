// file: src/models/prompt.rs
// description: system prompt records used as optional seed data

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SystemPrompt {
    pub prompt_id: String,
    pub text: String,
}

impl SystemPrompt {
    pub fn new(prompt_id: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            prompt_id: prompt_id.into(),
            text: text.into(),
        }
    }

    /// The prompts shipped with the stack, keyed `A` and `B`.
    pub fn defaults() -> Vec<Self> {
        vec![
            Self::new(
                "A",
                "Tu es un assistant très gentil qui répond à toutes les questions qu'on lui pose. \
                 Tu parles exclusivement le français. Toutes tes réponses doivent être en français.",
            ),
            Self::new(
                "B",
                "You are an assistant who answers questions in English with Shakespearean English. \
                 All your responses must be in English.",
            ),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_prompts() {
        let prompts = SystemPrompt::defaults();
        let ids: Vec<&str> = prompts.iter().map(|p| p.prompt_id.as_str()).collect();
        assert_eq!(ids, vec!["A", "B"]);
        assert!(prompts[0].text.contains("français"));
        assert!(prompts[1].text.contains("Shakespearean"));
    }

    #[test]
    fn test_serializes_flat() {
        let value = serde_json::to_value(SystemPrompt::new("C", "hello")).unwrap();
        assert_eq!(value, serde_json::json!({ "prompt_id": "C", "text": "hello" }));
    }
}

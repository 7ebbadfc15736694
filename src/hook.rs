//! Hook Envelope
//!
//! The byte-level boundary with the host assistant: one JSON object in on
//! stdin, at most one JSON object out on stdout. Anything unparseable on
//! the way in simply means no injection; the process still exits 0.

use std::io::Write;

use serde::{Deserialize, Serialize};

use crate::error::{RouterError, RouterResult};

#[derive(Debug, Deserialize)]
struct HookInput {
    #[serde(default)]
    prompt: String,
}

#[derive(Debug, Serialize)]
struct HookOutput {
    #[serde(rename = "systemMessage")]
    system_message: String,
}

/// Extract the prompt from the stdin envelope. Unknown fields are ignored;
/// malformed JSON, a missing prompt, and a blank prompt are all rejected,
/// which the entry point turns into an empty emission.
pub fn read_prompt(raw: &str) -> RouterResult<String> {
    let input: HookInput = serde_json::from_str(raw)
        .map_err(|e| RouterError::input_malformed(e.to_string()))?;
    if input.prompt.trim().is_empty() {
        return Err(RouterError::input_malformed("missing or blank prompt"));
    }
    Ok(input.prompt)
}

/// Serialize the injection text into the output envelope.
pub fn render_output(text: &str) -> RouterResult<String> {
    Ok(serde_json::to_string(&HookOutput {
        system_message: text.to_string(),
    })?)
}

/// Write the output envelope to stdout, without a trailing newline.
pub fn emit(text: &str) -> RouterResult<()> {
    let payload = render_output(text)?;
    let mut stdout = std::io::stdout().lock();
    stdout.write_all(payload.as_bytes())?;
    stdout.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_prompt() {
        let prompt = read_prompt(r#"{"prompt": "review my code"}"#).unwrap();
        assert_eq!(prompt, "review my code");
    }

    #[test]
    fn test_read_prompt_ignores_unknown_fields() {
        let prompt = read_prompt(
            r#"{"prompt": "review my code", "sessionId": "abc", "cwd": "/tmp"}"#,
        )
        .unwrap();
        assert_eq!(prompt, "review my code");
    }

    #[test]
    fn test_read_prompt_malformed_json() {
        for raw in ["not json", "", "42"] {
            let err = read_prompt(raw).unwrap_err();
            assert!(matches!(err, RouterError::InputMalformed(_)));
        }
    }

    #[test]
    fn test_read_prompt_missing_or_blank() {
        assert!(read_prompt(r#"{}"#).is_err());
        assert!(read_prompt(r#"{"prompt": ""}"#).is_err());
        assert!(read_prompt(r#"{"prompt": "   "}"#).is_err());
    }

    #[test]
    fn test_render_output_shape() {
        let payload = render_output("hello **world**").unwrap();
        let value: serde_json::Value = serde_json::from_str(&payload).unwrap();
        let object = value.as_object().unwrap();
        assert_eq!(object.len(), 1);
        assert_eq!(object["systemMessage"], "hello **world**");
    }

    #[test]
    fn test_render_output_keeps_non_ascii() {
        let payload = render_output("审查代码").unwrap();
        assert!(payload.contains("审查代码"));
    }
}

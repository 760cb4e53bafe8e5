use anyhow::{bail, Context, Result};
use serde::Deserialize;

use super::types::ProductConcept;

/// Recover the JSON payload from a free-form model reply.
///
/// Models rarely return bare JSON: they wrap it in prose, markdown fences,
/// or both. A fenced ``` block containing a payload wins; otherwise the
/// reply is scanned for the first `[` or `{` and the balanced slice from
/// there is returned. Replies with no JSON, or with an unterminated payload,
/// are errors. Nothing is ever silently replaced with an empty structure.
pub fn extract_json_payload(reply: &str) -> Result<&str> {
    if let Some(fenced) = extract_fenced_block(reply) {
        if let Ok(payload) = extract_balanced(fenced) {
            return Ok(payload);
        }
    }
    extract_balanced(reply)
}

/// Parse a concept list out of a model reply.
///
/// Accepts either a bare array of concepts or an object wrapping a
/// `concepts` array. An empty list in valid JSON is returned as-is; invented
/// concepts are worse than none.
pub fn parse_concepts(reply: &str) -> Result<Vec<ProductConcept>> {
    let payload = extract_json_payload(reply)?;

    #[derive(Deserialize)]
    struct Envelope {
        concepts: Vec<ProductConcept>,
    }

    if payload.starts_with('[') {
        serde_json::from_str(payload).context("concept array did not match the expected schema")
    } else {
        let envelope: Envelope = serde_json::from_str(payload)
            .context("concept object did not contain a valid \"concepts\" array")?;
        Ok(envelope.concepts)
    }
}

/// Pull the contents of the first fenced code block, tolerating a language
/// tag after the opening fence.
fn extract_fenced_block(reply: &str) -> Option<&str> {
    let open = reply.find("```")?;
    let after_fence = &reply[open + 3..];
    let body_start = after_fence.find('\n')? + 1;
    let body = &after_fence[body_start..];
    let close = body.find("```")?;
    Some(&body[..close])
}

/// Return the balanced JSON slice starting at the first `[` or `{`.
///
/// Tracks bracket depth while skipping string literals and escapes, so
/// brackets inside concept names don't end the scan early.
fn extract_balanced(text: &str) -> Result<&str> {
    let start = text
        .find(['[', '{'])
        .context("reply contains no JSON payload")?;

    let bytes = text.as_bytes();
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (offset, &byte) in bytes[start..].iter().enumerate() {
        if escaped {
            escaped = false;
            continue;
        }
        match byte {
            b'\\' if in_string => escaped = true,
            b'"' => in_string = !in_string,
            b'[' | b'{' if !in_string => depth += 1,
            b']' | b'}' if !in_string => {
                depth = depth.saturating_sub(1);
                if depth == 0 {
                    return Ok(&text[start..start + offset + 1]);
                }
            }
            _ => {}
        }
    }

    bail!("JSON payload is unterminated (unbalanced brackets)")
}

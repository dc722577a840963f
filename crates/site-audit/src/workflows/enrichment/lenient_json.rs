use regex::Regex;
use serde::de::DeserializeOwned;
use std::sync::OnceLock;

static CODE_FENCE: OnceLock<Option<Regex>> = OnceLock::new();

/// Which tier of [`decode_lenient`] produced the value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecodeTier {
    Direct,
    Extracted,
}

/// Normalizes model output before decoding: markdown fences removed, ASCII control
/// characters other than `\n` and `\r` (tabs included) turned into spaces.
pub fn clean_response(raw: &str) -> String {
    let fence = CODE_FENCE.get_or_init(|| Regex::new(r"```(?:json)?\s*").ok());
    let unfenced = match fence {
        Some(fence) => fence.replace_all(raw, "").into_owned(),
        None => raw.replace("```json", "").replace("```", ""),
    };

    unfenced
        .trim()
        .chars()
        .map(|c| {
            if c.is_ascii_control() && c != '\n' && c != '\r' {
                ' '
            } else {
                c
            }
        })
        .collect()
}

/// Direct parse first, then the outermost `{...}` span. `None` means the caller should
/// substitute its own placeholder.
pub fn decode_lenient<T>(raw: &str) -> Option<(T, DecodeTier)>
where
    T: DeserializeOwned,
{
    let cleaned = clean_response(raw);
    if let Ok(value) = serde_json::from_str(&cleaned) {
        return Some((value, DecodeTier::Direct));
    }

    let start = cleaned.find('{')?;
    let end = cleaned.rfind('}')?;
    if end <= start {
        return None;
    }
    serde_json::from_str(&cleaned[start..=end])
        .ok()
        .map(|value| (value, DecodeTier::Extracted))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Deserialize, PartialEq)]
    struct Guidance {
        insights: Vec<String>,
    }

    #[test]
    fn strips_fences_and_control_characters() {
        let cleaned = clean_response("```json\n{\"a\":\t1,\u{0007}\"b\":2}\r\n```");
        assert_eq!(cleaned, "{\"a\": 1, \"b\":2}");
    }

    #[test]
    fn decodes_clean_json_directly() {
        let (value, tier) =
            decode_lenient::<Guidance>(r#"{"insights":["ok"]}"#).expect("direct");
        assert_eq!(tier, DecodeTier::Direct);
        assert_eq!(value.insights, vec!["ok"]);
    }

    #[test]
    fn extracts_object_from_chatty_reply() {
        let raw = "Sure! Here is the analysis:\n```json\n{\"insights\": [\"fast {site}\"]}\n```\nHope it helps.";
        let (value, tier) = decode_lenient::<Guidance>(raw).expect("extracted");
        assert_eq!(tier, DecodeTier::Extracted);
        assert_eq!(value.insights, vec!["fast {site}"]);
    }

    #[test]
    fn gives_up_on_unrecoverable_output() {
        assert!(decode_lenient::<Guidance>("no json here").is_none());
        assert!(decode_lenient::<Guidance>("} backwards {").is_none());
        assert!(decode_lenient::<Guidance>("{\"insights\": [unterminated").is_none());
    }
}

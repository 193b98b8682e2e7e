//! Prompt assembly for the generation proxy.

use crate::models::Preset;
use crate::store::seed::DEFAULT_SYSTEM_PROMPT;

/// Resolves the (system prompt, output structure) pair for a request.
/// Precedence per field: explicit override, then the referenced preset's
/// stored value, then the built-in default (which carries no structure).
pub fn resolve_prompt_fields(
    system_override: Option<&str>,
    structure_override: Option<&str>,
    preset: Option<&Preset>,
) -> (String, String) {
    let system_prompt = non_blank(system_override)
        .map(str::to_string)
        .or_else(|| preset.map(|p| p.system_prompt.clone()))
        .unwrap_or_else(|| DEFAULT_SYSTEM_PROMPT.to_string());

    let output_structure = non_blank(structure_override)
        .map(str::to_string)
        .or_else(|| preset.map(|p| p.output_structure.clone()))
        .unwrap_or_default();

    (system_prompt, output_structure)
}

/// The instruction context: system prompt, with the output-structure block
/// appended only when one is present.
pub fn build_system_prompt(system_prompt: &str, output_structure: &str) -> String {
    if output_structure.trim().is_empty() {
        system_prompt.to_string()
    } else {
        format!("{system_prompt}\n\nOUTPUT STRUCTURE:\n{output_structure}")
    }
}

/// The user content: labeled concatenation of the caller's fields. The
/// creator section is omitted entirely when absent or blank.
pub fn build_user_prompt(
    description: &str,
    metrics: &str,
    fact: &str,
    creator: Option<&str>,
) -> String {
    let mut prompt =
        format!("Description:\n{description}\n\nMetrics:\n{metrics}\n\nFOOH fact/insight:\n{fact}");
    if let Some(creator) = non_blank(creator) {
        prompt.push_str(&format!("\n\nCreator:\n{creator}"));
    }
    prompt
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn preset() -> Preset {
        let now = Utc::now();
        Preset {
            id: 1,
            name: "Stored".to_string(),
            system_prompt: "stored system".to_string(),
            output_structure: "stored structure".to_string(),
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_override_beats_preset() {
        let p = preset();
        let (system, structure) =
            resolve_prompt_fields(Some("override system"), Some("override structure"), Some(&p));
        assert_eq!(system, "override system");
        assert_eq!(structure, "override structure");
    }

    #[test]
    fn test_preset_beats_default() {
        let p = preset();
        let (system, structure) = resolve_prompt_fields(None, None, Some(&p));
        assert_eq!(system, "stored system");
        assert_eq!(structure, "stored structure");
    }

    #[test]
    fn test_default_fallback_has_no_structure() {
        let (system, structure) = resolve_prompt_fields(None, None, None);
        assert_eq!(system, DEFAULT_SYSTEM_PROMPT);
        assert!(structure.is_empty());
    }

    #[test]
    fn test_blank_override_falls_through() {
        let p = preset();
        let (system, _) = resolve_prompt_fields(Some("   "), None, Some(&p));
        assert_eq!(system, "stored system");
    }

    #[test]
    fn test_structure_block_appended_when_present() {
        let full = build_system_prompt("base", "1. Hook");
        assert_eq!(full, "base\n\nOUTPUT STRUCTURE:\n1. Hook");
    }

    #[test]
    fn test_structure_block_omitted_when_empty() {
        assert_eq!(build_system_prompt("base", ""), "base");
        assert_eq!(build_system_prompt("base", "  \n"), "base");
    }

    #[test]
    fn test_user_prompt_with_creator() {
        let prompt = build_user_prompt("a video", "10k views", "an insight", Some("Jane"));
        assert_eq!(
            prompt,
            "Description:\na video\n\nMetrics:\n10k views\n\nFOOH fact/insight:\nan insight\n\nCreator:\nJane"
        );
    }

    #[test]
    fn test_user_prompt_omits_blank_creator() {
        let without = build_user_prompt("d", "m", "f", None);
        assert!(!without.contains("Creator:"));
        assert_eq!(build_user_prompt("d", "m", "f", Some(" ")), without);
    }
}

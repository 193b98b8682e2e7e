//! Default content inserted into an empty store on first initialization.
//!
//! The text below is load-bearing for existing deployments: byte-for-byte
//! identical content means a re-pointed database seeds indistinguishably.
//! Do not reflow or "fix" the wording.

pub const DEFAULT_PRESET_NAME: &str = "Default";

/// Also the fallback system prompt for generation requests that reference no
/// preset and carry no override.
pub const DEFAULT_SYSTEM_PROMPT: &str = r#"You write short, high-signal LinkedIn posts about FOOH (Fake Out Of Home) videos.
Rules:
- Start with a varied HOOK that includes "FOOH".
- Include one-line performance indicator (views & likes).
- Relate directly to what happens in the video.
- Mention the creator(s) or "🎬 Created by [add creator]".
- Add one compact insight about why it worked.
- End with: "Explore more examples in the FOOH Library → fooh.com/library".
- Keep it 4–7 short lines, no hashtags.
- Vary hooks and rhythm so posts never feel repetitive.
When writing the hook, make sure to keep it short, consider mentioning the brand and use best practice on linkedin.
Use at most 1 emoji in the hook."#;

pub const DEFAULT_OUTPUT_STRUCTURE: &str = r#"Output Structure:
1. Hook with "FOOH" mention
2. Performance metrics line
3. Video description connection
4. Creator attribution
5. Key insight about effectiveness
6. Library link call-to-action

Length: 4-7 short lines
Tone: Professional, engaging
Emojis: Maximum 1 in hook
Hashtags: None"#;

/// Seeded without categories, in this order.
pub const DEFAULT_FACTS: &[&str] = &[
    "FOOH leverages public places that a lot of people travel to, that are infamous and/or happen to be in media and movies often. Something impossible is added using CGI. The combination of something familiar with something impossible makes it engaging.",
    "Scale illusions work best when integrated with iconic landmarks that provide instant size reference and context for viewers.",
    "Urban environments provide perfect backdrops for FOOH because of high foot traffic and multiple viewing angles that create authentic reactions.",
    "Color contrast is crucial in FOOH - bright, unexpected colors against neutral city backdrops create immediate visual impact and stopping power.",
    "Movement and transformation elements in FOOH (like objects opening, growing, or changing) create memorable moments that drive engagement.",
    "FOOH works because it hijacks familiar spaces and adds the impossible, creating cognitive dissonance that captures attention and drives shares.",
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_six_default_facts() {
        assert_eq!(DEFAULT_FACTS.len(), 6);
        assert!(DEFAULT_FACTS.iter().all(|f| !f.trim().is_empty()));
    }

    #[test]
    fn test_default_prompt_mentions_library_cta() {
        assert!(DEFAULT_SYSTEM_PROMPT.contains("fooh.com/library"));
        assert!(DEFAULT_OUTPUT_STRUCTURE.starts_with("Output Structure:"));
    }
}

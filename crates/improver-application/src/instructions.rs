//! System instructions and user messages sent to the completion gateway.
//!
//! Rendered with minijinja so the conditional directive lives next to the
//! policy text it extends.

use improver_core::{ImproverError, Result};
use minijinja::{Environment, context};

/// Returned by change analysis when the model produced nothing.
pub const ANALYSIS_FALLBACK: &str = "Unable to analyze changes";

pub const THUMBS_DOWN_NOTE: &str = "The user gave a thumbs down to the current prompt.";
pub const GENERIC_DIRECTIVE: &str =
    "Please improve this prompt to be more effective, clear, and specific.";

const IMPROVE_INSTRUCTION: &str = "improve_instruction.txt";
const IMPROVE_USER: &str = "improve_user.txt";
const ANALYSIS_USER: &str = "analysis_user.txt";

const IMPROVE_INSTRUCTION_TEMPLATE: &str = r#"You are a prompt editor. Your job is to take a user's raw prompt and transform it into a polished, context-rich, ready-to-use prompt while preserving the original's writing style and tone.

CRITICAL: Maintain the original prompt's writing style, tone, and voice. If the original is casual, keep it casual. If it's formal, keep it formal. If it's simple and direct, don't make it academic or overly complex. The goal is enhancement, not transformation of style.

FEEDBACK INTEGRATION: When user feedback is provided, incorporate it thoughtfully while keeping as much of the original prompt intact as possible. Make targeted changes to address the specific feedback rather than completely rewriting the prompt. Only do a full revision if the feedback explicitly requests a complete rewrite.

Follow this internal process (DO NOT include any of these steps in your output):

1. Extract & Restate the Goal - Identify what the user wants
2. Analyze Original Style - Note the tone, formality level, and writing style to preserve
3. Infer Missing Context - Add essential background and domain knowledge
4. Specify Audience & Tone - Define who it's for while matching the original style
5. Define Output Format & Length - State structure and detail level
6. Embed Examples or Placeholders - Include relevant examples if helpful
7. Add Constraints & Requirements - List must-haves and forbidden elements
8. Frame Success Criteria - Note quality measures if relevant

Your response must be ONLY the final improved prompt - a single, cohesive prompt that someone could copy and paste directly into an AI system. Do not include step headers, explanations, reasoning, or any meta-commentary about your process.

{% if thumbs_down %}{{ thumbs_down_note }} {% endif %}{% if feedback %}User feedback: "{{ feedback }}".{% endif %}{% if not thumbs_down and not feedback %}{{ generic_directive }}{% endif %}"#;

const IMPROVE_USER_TEMPLATE: &str = "Current prompt to improve:\n\n{{ prompt }}";

/// Instruction for change analysis; fixed, no variables.
pub const ANALYSIS_INSTRUCTION: &str = r#"You are an expert prompt engineer analyzing improvements between two prompts. Compare the original and improved versions and identify the key optimizations made.

Respond with 2-4 concise bullet points (each 10-15 words max) describing what was changed or improved. Focus on:
- Structure improvements
- Clarity enhancements
- Added specificity
- Better context or instructions
- Improved formatting

Format as bullet points without any bullet symbols, just start each line with "- ". Keep it brief and actionable."#;

const ANALYSIS_USER_TEMPLATE: &str =
    "Original prompt:\n{{ original }}\n\nImproved prompt:\n{{ improved }}";

fn environment() -> Result<Environment<'static>> {
    let mut env = Environment::new();
    env.set_keep_trailing_newline(true);
    env.add_template(IMPROVE_INSTRUCTION, IMPROVE_INSTRUCTION_TEMPLATE)
        .map_err(template_error)?;
    env.add_template(IMPROVE_USER, IMPROVE_USER_TEMPLATE)
        .map_err(template_error)?;
    env.add_template(ANALYSIS_USER, ANALYSIS_USER_TEMPLATE)
        .map_err(template_error)?;
    Ok(env)
}

fn template_error(err: minijinja::Error) -> ImproverError {
    ImproverError::internal(format!("Failed to render template: {err}"))
}

fn render(name: &str, ctx: minijinja::Value) -> Result<String> {
    let env = environment()?;
    let template = env.get_template(name).map_err(template_error)?;
    template.render(ctx).map_err(template_error)
}

/// System instruction for prompt improvement.
///
/// A thumbs-down note comes first, then quoted feedback; with neither, the
/// generic directive is used. Blank feedback counts as none.
pub fn improvement_instruction(feedback: &str, thumbs_up: Option<bool>) -> Result<String> {
    let feedback = Some(feedback).filter(|text| !text.trim().is_empty());
    render(
        IMPROVE_INSTRUCTION,
        context! {
            thumbs_down => thumbs_up == Some(false),
            thumbs_down_note => THUMBS_DOWN_NOTE,
            feedback => feedback,
            generic_directive => GENERIC_DIRECTIVE,
        },
    )
    .map(|text| text.trim_end().to_string())
}

pub fn improvement_user_message(prompt: &str) -> Result<String> {
    render(IMPROVE_USER, context! { prompt => prompt })
}

pub fn analysis_user_message(original: &str, improved: &str) -> Result<String> {
    render(
        ANALYSIS_USER,
        context! { original => original, improved => improved },
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_signal_uses_generic_directive() {
        let instruction = improvement_instruction("", None).unwrap();
        assert!(instruction.starts_with("You are a prompt editor."));
        assert!(instruction.ends_with(GENERIC_DIRECTIVE));
        assert!(!instruction.contains("User feedback"));
        assert!(!instruction.contains(THUMBS_DOWN_NOTE));
    }

    #[test]
    fn test_thumbs_up_true_is_not_a_signal() {
        let instruction = improvement_instruction("   ", Some(true)).unwrap();
        assert!(instruction.ends_with(GENERIC_DIRECTIVE));
    }

    #[test]
    fn test_feedback_is_quoted_verbatim() {
        let instruction = improvement_instruction("make it <shorter> & \"punchier\"", None).unwrap();
        assert!(instruction.ends_with(r#"User feedback: "make it <shorter> & "punchier""."#));
        assert!(!instruction.contains(GENERIC_DIRECTIVE));
    }

    #[test]
    fn test_thumbs_down_precedes_feedback() {
        let instruction = improvement_instruction("more examples", Some(false)).unwrap();
        let note = instruction.find(THUMBS_DOWN_NOTE).unwrap();
        let feedback = instruction.find("User feedback: \"more examples\".").unwrap();
        assert!(note < feedback);
        assert!(!instruction.contains(GENERIC_DIRECTIVE));
    }

    #[test]
    fn test_thumbs_down_alone_replaces_generic_directive() {
        let instruction = improvement_instruction("", Some(false)).unwrap();
        assert!(instruction.ends_with(THUMBS_DOWN_NOTE));
    }

    #[test]
    fn test_user_messages() {
        assert_eq!(
            improvement_user_message("write a poem").unwrap(),
            "Current prompt to improve:\n\nwrite a poem"
        );
        assert_eq!(
            analysis_user_message("a", "b").unwrap(),
            "Original prompt:\na\n\nImproved prompt:\nb"
        );
    }
}

//! Transcript formatting. The generator prompt embeds this text verbatim, so the
//! format is part of the scoring contract.

use crate::models::feedback::TranscriptTurn;

/// Renders each turn as `- {role}: {content}\n`, in order, with nothing dropped.
pub fn format_transcript(turns: &[TranscriptTurn]) -> String {
    turns
        .iter()
        .map(|turn| format!("- {}: {}\n", turn.role, turn.content))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn turn(role: &str, content: &str) -> TranscriptTurn {
        TranscriptTurn {
            role: role.to_string(),
            content: content.to_string(),
        }
    }

    #[test]
    fn test_empty_transcript_is_empty_string() {
        assert_eq!(format_transcript(&[]), "");
    }

    #[test]
    fn test_turns_render_in_order_one_per_line() {
        let turns = vec![
            turn("assistant", "Tell me about yourself."),
            turn("user", "I build React apps."),
            turn("assistant", "Why TypeScript?"),
        ];
        let formatted = format_transcript(&turns);
        assert_eq!(
            formatted,
            "- assistant: Tell me about yourself.\n- user: I build React apps.\n- assistant: Why TypeScript?\n"
        );
        assert_eq!(formatted.lines().count(), turns.len());
    }

    #[test]
    fn test_content_is_kept_verbatim() {
        let formatted = format_transcript(&[turn("user", "  spaced: *stars* / slashes  ")]);
        assert_eq!(formatted, "- user:   spaced: *stars* / slashes  \n");
    }

    #[test]
    fn test_formatting_is_deterministic() {
        let turns = vec![turn("user", "a"), turn("assistant", "b")];
        assert_eq!(format_transcript(&turns), format_transcript(&turns));
    }
}

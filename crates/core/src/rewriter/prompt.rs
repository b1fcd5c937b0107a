//! Prompt construction and output cleanup for rewrites.

use once_cell::sync::Lazy;
use regex_lite::Regex;

use super::RewriteStyle;

const SEO_INSTRUCTIONS: &str = "Rewrite the following text to improve SEO, make it more hooking, and enhance storytelling, all while keeping the original facts and meaning intact.

Instructions:

Start with a captivating introduction: use a surprising fact, bold statement, or provocative question.

Use vivid, sensory language to make the story feel dynamic and engaging.

Naturally include relevant SEO keywords (no stuffing).

Use attention-grabbing headings and subheadings.

Apply open loops or cliffhangers where appropriate to keep the reader interested.

Write in a conversational tone with short, active sentences.

Highlight the reader's benefit or reason to keep reading.

Keep or slightly expand the original length for better flow.

Text to improve:";

const GENERAL_INSTRUCTIONS: &str = "Improve the following text to make it more exciting, vivid, and eventful while keeping the facts and core idea unchanged.

Instructions:

Hook the reader immediately with a surprising intro or bold question.

Add emotional depth and vivid descriptions to create mental images.

Use a conversational, human tone.

Create suspense or curiosity when appropriate (open loops).

Keep the narrative flowing naturally and engagingly.

Do not fabricate facts or change the core message.

Slightly expand the text if needed to improve storytelling flow.

Text to enhance:";

/// Markdown heading markers; the hosting service renders raw HTML.
static HEADING_MARKS: Lazy<Regex> = Lazy::new(|| Regex::new(r"#+").expect("valid regex"));

/// Build the full prompt sent to the model.
pub fn build_prompt(text: &str, style: RewriteStyle) -> String {
    let instructions = match style {
        RewriteStyle::Seo => SEO_INSTRUCTIONS,
        RewriteStyle::General => GENERAL_INSTRUCTIONS,
    };
    format!("{}\n\n{}", instructions, text)
}

/// Strip heading markers from model output.
pub fn clean_output(text: &str) -> String {
    HEADING_MARKS.replace_all(text, "").into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_prompt_appends_text() {
        let prompt = build_prompt("The harbor reopened.", RewriteStyle::Seo);
        assert!(prompt.starts_with("Rewrite the following text to improve SEO"));
        assert!(prompt.ends_with("Text to improve:\n\nThe harbor reopened."));

        let prompt = build_prompt("x", RewriteStyle::General);
        assert!(prompt.contains("Text to enhance:"));
    }

    #[test]
    fn test_clean_output_strips_heading_marks() {
        assert_eq!(
            clean_output("## Big News\n\nBody with a # sign"),
            " Big News\n\nBody with a  sign"
        );
        assert_eq!(clean_output("plain"), "plain");
    }
}

// Prompt constants for interview question generation.

/// System prompt for backends that accept one (Anthropic). The Hugging Face
/// inference endpoint takes the user prompt only.
pub const QUESTION_SYSTEM: &str = "You are an experienced technical recruiter preparing a candidate \
    for an upcoming interview. Respond with one interview question per line and nothing else.";

/// Builds the question prompt. Inputs are embedded verbatim: no truncation,
/// escaping or sanitization.
pub fn build_question_prompt(job_title: &str, job_description: &str, resume_text: &str) -> String {
    format!(
        "Based on the following job title and description, generate a list of likely interview questions.\n\
         \n\
         Job Title: {job_title}\n\
         Job Description: {job_description}\n\
         Resume: {resume_text}\n\
         \n\
         Please provide a list of questions."
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_embeds_all_inputs_verbatim() {
        let prompt = build_question_prompt(
            "Backend Engineer",
            "Build APIs",
            "5 years experience in Go and distributed systems",
        );
        assert!(prompt.contains("Job Title: Backend Engineer"));
        assert!(prompt.contains("Job Description: Build APIs"));
        assert!(prompt.contains("Resume: 5 years experience in Go and distributed systems"));
        assert!(prompt.ends_with("Please provide a list of questions."));
    }

    #[test]
    fn test_prompt_does_not_escape_or_truncate() {
        let resume = format!("<b>\"quoted\"</b>\n\t{}", "x".repeat(20_000));
        let description = "Use {braces} and $dollars & ampersands";
        let prompt = build_question_prompt("SRE", description, &resume);
        assert!(prompt.contains(&resume));
        assert!(prompt.contains(description));
    }

    #[test]
    fn test_placeholder_text_in_inputs_is_left_alone() {
        let prompt = build_question_prompt("{resume_text}", "{job_title}", "real resume");
        assert!(prompt.contains("Job Title: {resume_text}"));
        assert!(prompt.contains("Job Description: {job_title}"));
        assert!(prompt.contains("Resume: real resume"));
    }

    #[test]
    fn test_prompt_is_deterministic() {
        let a = build_question_prompt("PM", "Own roadmap", "MBA");
        let b = build_question_prompt("PM", "Own roadmap", "MBA");
        assert_eq!(a, b);
    }
}

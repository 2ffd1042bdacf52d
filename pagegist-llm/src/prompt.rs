//! Prompt assembly: pure functions from extracted page parts to the message
//! pair the provider expects.

use crate::traits::Message;

/// Fixed instruction sent as the system message of every request.
pub const SYSTEM_PROMPT: &str = "You are an assistant that analyzes the contents of a website \
and provides a short summary, ignoring text that might be navigation related. \
Respond in markdown.";

/// Compose the `[system, user]` pair for one page.
///
/// The user message embeds the full extracted body verbatim; there is no
/// truncation or token budgeting, so very large pages ride on the provider's
/// own input limits.
pub fn build_summary_prompt(title: &str, body: &str) -> Vec<Message> {
    let user = format!(
        "You are looking at a website titled {title}\n\
         The contents of this website is as follows; \
         please provide a short summary of this website in markdown. \
         If it includes news or announcements, then summarize these too.\n\n{body}"
    );
    vec![Message::system(SYSTEM_PROMPT), Message::user(user)]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::Role;

    #[test]
    fn prompt_is_exactly_system_then_user() {
        let messages = build_summary_prompt("Example", "Hi");
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].role, Role::System);
        assert_eq!(messages[1].role, Role::User);
    }

    #[test]
    fn system_message_is_the_fixed_instruction() {
        let messages = build_summary_prompt("anything", "whatever");
        assert_eq!(messages[0].content, SYSTEM_PROMPT);
        assert!(messages[0].content.contains("Respond in markdown."));
    }

    #[test]
    fn user_message_embeds_title_and_full_body() {
        let title = "Example Domain";
        let body = "Heading\nFirst paragraph.\nSecond paragraph.";
        let messages = build_summary_prompt(title, body);

        let user = &messages[1].content;
        assert!(user.contains("You are looking at a website titled Example Domain"));
        assert!(user.contains(body), "full body must appear verbatim");
        assert!(user.contains("news or announcements"));
    }

    #[test]
    fn extracted_heading_reaches_the_user_message() {
        let messages = build_summary_prompt("Example", "Hi");
        assert!(messages[1].content.contains("Hi"));
        assert!(!messages[1].content.contains("bad()"));
    }

    #[test]
    fn body_is_not_truncated() {
        let body = "line\n".repeat(50_000);
        let messages = build_summary_prompt("Big", &body);
        assert!(messages[1].content.contains(&body));
    }
}

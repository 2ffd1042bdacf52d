//! Submit-line classification. URLs never start with `/`, so slash commands
//! share the prompt with them without ambiguity.

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Help,    // /help
    Quit,    // /quit or /exit
    Unknown(String),
}

/// What a submitted line asks the UI to do.
#[derive(Debug, Clone, PartialEq)]
pub enum Submission {
    /// Nothing but whitespace.
    Empty,
    Command(Command),
    /// Anything else is taken as a URL to summarize.
    Url(String),
}

pub fn classify_submission(input: &str) -> Submission {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Submission::Empty;
    }
    if trimmed.starts_with('/') {
        return Submission::Command(parse_command(trimmed));
    }
    Submission::Url(trimmed.to_string())
}

fn parse_command(trimmed: &str) -> Command {
    let mut parts = trimmed.splitn(2, char::is_whitespace);
    let verb = parts.next().unwrap_or_default();

    match verb {
        "/help" => Command::Help,
        "/quit" | "/exit" => Command::Quit,
        _ => Command::Unknown(trimmed.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn whitespace_only_is_empty() {
        assert_eq!(classify_submission(""), Submission::Empty);
        assert_eq!(classify_submission("   "), Submission::Empty);
        assert_eq!(classify_submission("\t\n"), Submission::Empty);
    }

    #[test]
    fn quit_and_exit_both_quit() {
        assert_eq!(
            classify_submission("/quit"),
            Submission::Command(Command::Quit)
        );
        assert_eq!(
            classify_submission("/exit"),
            Submission::Command(Command::Quit)
        );
    }

    #[test]
    fn help_is_recognized() {
        assert_eq!(
            classify_submission("/help"),
            Submission::Command(Command::Help)
        );
    }

    #[test]
    fn unknown_commands_carry_their_text() {
        assert_eq!(
            classify_submission("/frobnicate now"),
            Submission::Command(Command::Unknown("/frobnicate now".into()))
        );
    }

    #[test]
    fn urls_are_trimmed_and_passed_through() {
        assert_eq!(
            classify_submission("  https://techcrunch.com/  "),
            Submission::Url("https://techcrunch.com/".into())
        );
    }

    #[test]
    fn bare_hostnames_still_classify_as_urls() {
        // Validation happens in the fetch stage, not here.
        assert_eq!(
            classify_submission("techcrunch.com"),
            Submission::Url("techcrunch.com".into())
        );
    }
}

use std::path::PathBuf;

use parlor_core::Category;

// ── constants ────────────────────────────────────────────────────────────────

pub(super) const SLASH_COMMANDS: &[(&str, &str)] = &[
    ("/clear", "clear this conversation and its model session"),
    ("/reset", "forget every model session"),
    (
        "/category",
        "filter the sidebar  usage: /category <science|politics|philosophy|art|all>",
    ),
    ("/attach", "attach a file to the next message  usage: /attach <path>"),
    ("/help", "list commands"),
    ("/quit", "exit parlor"),
];

#[derive(Debug, PartialEq, Eq)]
pub(super) enum SlashCommand {
    Clear,
    Reset,
    /// `None` removes the filter.
    Category(Option<Category>),
    Attach(PathBuf),
    Help,
    Quit,
}

/// Parse a line that starts with `/`. Returns `None` for ordinary text and
/// `Some(Err(usage))` for a malformed or unknown command.
pub(super) fn parse(input: &str) -> Option<Result<SlashCommand, String>> {
    let input = input.trim();
    if !input.starts_with('/') {
        return None;
    }
    let (cmd, arg) = match input.split_once(char::is_whitespace) {
        Some((c, a)) => (c, a.trim()),
        None => (input, ""),
    };

    let parsed = match cmd {
        "/clear" => Ok(SlashCommand::Clear),
        "/reset" => Ok(SlashCommand::Reset),
        "/help" => Ok(SlashCommand::Help),
        "/quit" | "/exit" => Ok(SlashCommand::Quit),
        "/category" => match arg {
            "" => Err("usage: /category <science|politics|philosophy|art|all>".to_string()),
            "all" => Ok(SlashCommand::Category(None)),
            name => name
                .parse::<Category>()
                .map(|c| SlashCommand::Category(Some(c)))
                .map_err(|e| e.to_string()),
        },
        "/attach" => {
            if arg.is_empty() {
                Err("usage: /attach <path>".to_string())
            } else {
                Ok(SlashCommand::Attach(expand_home(arg)))
            }
        }
        other => Err(format!("unknown command {other}  (try /help)")),
    };
    Some(parsed)
}

pub(super) fn slash_suggestions(prefix: &str) -> Vec<(&'static str, &'static str)> {
    let word = prefix.split_whitespace().next().unwrap_or(prefix);
    SLASH_COMMANDS
        .iter()
        .filter(|(cmd, _)| cmd.starts_with(word))
        .copied()
        .collect()
}

pub(super) fn help_text() -> String {
    let names: Vec<&str> = SLASH_COMMANDS.iter().map(|(c, _)| *c).collect();
    format!(
        "{}   tab switches pane, ctrl+c quits",
        names.join("  ")
    )
}

fn expand_home(path: &str) -> PathBuf {
    match path.strip_prefix("~/") {
        Some(rest) => dirs::home_dir()
            .map(|h| h.join(rest))
            .unwrap_or_else(|| PathBuf::from(path)),
        None => PathBuf::from(path),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_text_is_not_a_command() {
        assert!(parse("hello there").is_none());
        assert!(parse("  what is /clear?").is_none());
    }

    #[test]
    fn parses_simple_commands() {
        assert_eq!(parse("/clear"), Some(Ok(SlashCommand::Clear)));
        assert_eq!(parse(" /reset "), Some(Ok(SlashCommand::Reset)));
        assert_eq!(parse("/help"), Some(Ok(SlashCommand::Help)));
        assert_eq!(parse("/quit"), Some(Ok(SlashCommand::Quit)));
        assert_eq!(parse("/exit"), Some(Ok(SlashCommand::Quit)));
    }

    #[test]
    fn category_takes_a_name_or_all() {
        assert_eq!(
            parse("/category Science"),
            Some(Ok(SlashCommand::Category(Some(Category::Science))))
        );
        assert_eq!(parse("/category all"), Some(Ok(SlashCommand::Category(None))));
        assert!(matches!(parse("/category"), Some(Err(_))));
        assert!(matches!(parse("/category music"), Some(Err(e)) if e.contains("music")));
    }

    #[test]
    fn attach_requires_a_path() {
        assert_eq!(
            parse("/attach notes/relativity.txt"),
            Some(Ok(SlashCommand::Attach(PathBuf::from("notes/relativity.txt"))))
        );
        assert!(matches!(parse("/attach"), Some(Err(_))));
    }

    #[test]
    fn unknown_command_is_reported() {
        assert!(matches!(parse("/summon tesla"), Some(Err(e)) if e.contains("/summon")));
    }

    #[test]
    fn suggestions_follow_prefix() {
        let s = slash_suggestions("/c");
        let names: Vec<_> = s.iter().map(|(c, _)| *c).collect();
        assert_eq!(names, ["/clear", "/category"]);
        assert_eq!(slash_suggestions("/category sc").len(), 1);
        assert!(slash_suggestions("/z").is_empty());
    }
}

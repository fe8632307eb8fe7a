/// Command typed at the follow-up prompt instead of a question
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SlashCommand {
    /// Follow the company of the loaded report
    Follow,
    Unfollow,
    /// Followed companies with their updates
    Watchlist,
    /// Mark the updates of the n-th watchlist entry as read (1-based)
    Read(usize),
    /// Saved conversations of this session
    History,
    /// Load the n-th history entry (1-based)
    Restore(usize),
    Help,
    /// Unknown command or bad arguments; carries the message to show
    Invalid(String),
}

pub const HELP: &[(&str, &str)] = &[
    ("/follow", "follow the company of the loaded report"),
    ("/unfollow", "stop following it"),
    ("/watchlist", "followed companies and their updates"),
    ("/read <n>", "mark updates of watchlist entry n as read"),
    ("/history", "conversations saved in this session"),
    ("/restore <n>", "reload history entry n"),
    ("/help", "this list"),
];

fn position(arg: Option<&&str>) -> Option<usize> {
    arg.and_then(|n| n.parse::<usize>().ok()).filter(|n| *n > 0)
}

/// Parse a prompt line; `None` when it is not a slash command
pub fn parse_slash_command(input: &str) -> Option<SlashCommand> {
    let rest = input.trim().strip_prefix('/')?;
    let parts: Vec<&str> = rest.split_whitespace().collect();
    let Some(name) = parts.first() else {
        return Some(SlashCommand::Invalid("empty command, try /help".to_string()));
    };

    let command = match *name {
        "follow" => SlashCommand::Follow,
        "unfollow" => SlashCommand::Unfollow,
        "watchlist" => SlashCommand::Watchlist,
        "history" => SlashCommand::History,
        "help" => SlashCommand::Help,
        "read" => match position(parts.get(1)) {
            Some(n) => SlashCommand::Read(n),
            None => SlashCommand::Invalid("usage: /read <n>".to_string()),
        },
        "restore" => match position(parts.get(1)) {
            Some(n) => SlashCommand::Restore(n),
            None => SlashCommand::Invalid("usage: /restore <n>".to_string()),
        },
        other => SlashCommand::Invalid(format!("unknown command /{}, try /help", other)),
    };
    Some(command)
}

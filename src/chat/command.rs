//! Chat command parser and dispatch for huddle.
//!
//! Messages starting with the `@` sigil are interpreted as commands: the
//! AI-assistant stub, the embedded-movie link, or a mention of an online
//! user. Everything else passes through untouched.

use super::events::MessageKind;

/// Leading character marking a message as a potential command.
pub const COMMAND_SIGIL: char = '@';

/// Reserved assistant name, matched case-insensitively.
pub const AI_TRIGGER: &str = "@奶小胖";

/// Reserved movie-link name.
pub const MOVIE_TRIGGER: &str = "@电影";

/// Sender label used when relaying AI replies.
pub const SYSTEM_SENDER: &str = "系统";

/// External resolver endpoint for movie links.
const MOVIE_RESOLVER: &str = "https://jx.m3u8.tv/jiexi/?url=";

/// Notice returned when the movie command is missing its target.
const MISSING_URL_NOTICE: &str = "请提供有效的电影URL地址";

/// Output of the command processor.
///
/// Same shape as an outbound chat message, sender left to the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandResult {
    /// Kind of the produced message.
    pub kind: MessageKind,
    /// Produced message body.
    pub body: String,
}

impl CommandResult {
    fn new(kind: MessageKind, body: impl Into<String>) -> Self {
        Self {
            kind,
            body: body.into(),
        }
    }
}

/// A command token recognized in an `@`-prefixed message.
///
/// Variants are checked in fixed precedence order: the AI trigger, the
/// movie trigger, then mentions. A nickname colliding with a reserved
/// trigger name is shadowed by the trigger.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Command<'a> {
    /// AI-assistant stub.
    Ai,
    /// Movie link with its target (untrimmed remainder).
    Movie(&'a str),
    /// Candidate mention: sigil-stripped token plus remainder.
    MentionCandidate { target: &'a str, content: &'a str },
}

/// Split an `@`-prefixed message into a command variant.
///
/// Returns None for messages that do not carry the sigil.
fn parse(body: &str) -> Option<Command<'_>> {
    if !body.starts_with(COMMAND_SIGIL) {
        return None;
    }

    let (token, content) = match body.split_once(' ') {
        Some((token, content)) => (token, content),
        None => (body, ""),
    };

    // Trigger matching is case-insensitive; the AI trigger is the one the
    // original protocol spells out, the movie trigger has no case to fold.
    let normalized = token.to_lowercase();
    if normalized == AI_TRIGGER {
        return Some(Command::Ai);
    }
    if normalized == MOVIE_TRIGGER {
        return Some(Command::Movie(content));
    }

    token
        .strip_prefix(COMMAND_SIGIL)
        .map(|target| Command::MentionCandidate { target, content })
}

/// Process a message body into a command result.
///
/// Pure transformation: no shared state. `online` is a snapshot of the
/// currently registered nicknames; `sender` is excluded from mention
/// matching, so self-mentions fall through to a normal message.
pub fn process(body: &str, sender: &str, online: &[String]) -> CommandResult {
    match parse(body) {
        Some(Command::Ai) => CommandResult::new(
            MessageKind::AiResponse,
            format!("[AI回复] 你好{sender}，我是奶小胖！很高兴为你服务。"),
        ),
        Some(Command::Movie(content)) => {
            let target = content.trim();
            if target.is_empty() {
                CommandResult::new(MessageKind::System, MISSING_URL_NOTICE)
            } else {
                CommandResult::new(
                    MessageKind::MovieLink,
                    format!(
                        r#"<iframe class="movie-iframe" src="{MOVIE_RESOLVER}{target}" width="400" height="400" frameborder="0" allowfullscreen></iframe>"#
                    ),
                )
            }
        }
        Some(Command::MentionCandidate { target, content })
            if target != sender && online.iter().any(|n| n == target) =>
        {
            CommandResult::new(MessageKind::Mention, format!("@{target} {content}"))
        }
        // Unrecognized commands, offline mentions and self-mentions are
        // broadcast verbatim, no error surfaced.
        _ => CommandResult::new(MessageKind::Normal, body),
    }
}

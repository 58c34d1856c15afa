//! Input parsers converging on the shared command model.
//!
//! Two entry surfaces exist: CLI argument vectors and chat messages.
//! Both end up in [`from_tokens`]; the chat parser additionally
//! handles the `/` command prefix and routes unrecognized free text to
//! the `chat` verb. Verb resolution is a fixed total mapping — a token
//! that matches no entry resolves to `Verb::Unknown`, never to a
//! guessed near-miss.

use assistant_models::{Command, Verb};

/// Builds a command from pre-split tokens (an argument vector).
///
/// Tokens of the form `--key=value` become named options; everything
/// else is positional. An empty vector resolves to `help`.
pub fn from_tokens<S: AsRef<str>>(tokens: &[S]) -> Command {
    let tokens: Vec<&str> = tokens.iter().map(AsRef::as_ref).collect();

    let Some(&first) = tokens.first() else {
        return Command::new(Verb::Help);
    };
    let head = first.to_ascii_lowercase();

    let (verb, rest): (Verb, &[&str]) = match head.as_str() {
        "help" | "--help" | "-h" => (Verb::Help, &tokens[1..]),
        "project" => match tokens.get(1).map(|s| s.to_ascii_lowercase()).as_deref() {
            Some("list") => (Verb::ProjectList, &tokens[2..]),
            Some("create") => (Verb::ProjectCreate, &tokens[2..]),
            Some("switch") => (Verb::ProjectSwitch, &tokens[2..]),
            Some("info") => (Verb::ProjectInfo, &tokens[2..]),
            _ => return unknown(&tokens),
        },
        "project-list" | "list_projects" => (Verb::ProjectList, &tokens[1..]),
        "project-create" => (Verb::ProjectCreate, &tokens[1..]),
        "project-switch" => (Verb::ProjectSwitch, &tokens[1..]),
        "project-info" => (Verb::ProjectInfo, &tokens[1..]),
        "analyze" => (Verb::Analyze, &tokens[1..]),
        "analyze-project" | "analyze_project" => (Verb::AnalyzeProject, &tokens[1..]),
        "chat" => return with_joined_text(Verb::Chat, &tokens[1..]),
        "generate" => return with_joined_text(Verb::Generate, &tokens[1..]),
        _ => return unknown(&tokens),
    };

    let mut command = Command::new(verb);
    for token in rest {
        if let Some(option) = token.strip_prefix("--") {
            if let Some((key, value)) = option.split_once('=') {
                command.options.insert(key.to_string(), value.to_string());
                continue;
            }
        }
        command.args.push((*token).to_string());
    }
    command
}

/// Builds a command from one chat message.
///
/// A leading `/` marks an explicit command; its remainder is tokenized
/// and resolved like an argument vector, and stays `unknown` if the
/// verb does not resolve. Text without the prefix is resolved the same
/// way first, and falls back to the `chat` verb carrying the whole
/// message as a single positional argument.
pub fn from_text(text: &str) -> Command {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Command::new(Verb::Help);
    }

    if let Some(rest) = trimmed.strip_prefix('/') {
        return from_tokens(&tokenize(rest));
    }

    let command = from_tokens(&tokenize(trimmed));
    if command.verb == Verb::Unknown {
        Command::with_args(Verb::Chat, [trimmed])
    } else {
        command
    }
}

/// Splits text on whitespace, honoring single- and double-quoted
/// segments. Quotes group words; there is no escape syntax.
pub fn tokenize(text: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut quote: Option<char> = None;

    for c in text.chars() {
        match quote {
            Some(q) if c == q => quote = None,
            Some(_) => current.push(c),
            None if c == '"' || c == '\'' => quote = Some(c),
            None if c.is_whitespace() => {
                if !current.is_empty() {
                    tokens.push(std::mem::take(&mut current));
                }
            }
            None => current.push(c),
        }
    }
    if !current.is_empty() {
        tokens.push(current);
    }
    tokens
}

fn unknown(tokens: &[&str]) -> Command {
    Command::with_args(Verb::Unknown, tokens.iter().copied())
}

fn with_joined_text(verb: Verb, rest: &[&str]) -> Command {
    let text = rest.join(" ");
    if text.is_empty() {
        Command::new(verb)
    } else {
        Command::with_args(verb, [text])
    }
}

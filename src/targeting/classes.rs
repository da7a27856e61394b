use crate::entities::mobile::Notoriety;
use crate::scripting::error::ScriptError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AcquireMode {
    Closest,
    Random,
    Next,
    Prev,
}

/// Body-type restriction for an acquisition primitive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyKind {
    Any,
    Humanoid,
    Monster,
}

/// Priority-grammar target classes. `Friend` is the friends list, not a
/// notoriety; the rest map onto notoriety sets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetClass {
    Enemy,
    Friend,
    Friendly,
    Gray,
    Criminal,
    Innocent,
    Murderer,
    NonFriendly,
}

impl TargetClass {
    pub fn parse(token: &str) -> Option<TargetClass> {
        match token.trim().to_ascii_lowercase().as_str() {
            "enemy" => Some(TargetClass::Enemy),
            "friend" => Some(TargetClass::Friend),
            "friendly" => Some(TargetClass::Friendly),
            "gray" | "grey" => Some(TargetClass::Gray),
            "criminal" => Some(TargetClass::Criminal),
            "blue" | "innocent" => Some(TargetClass::Innocent),
            "red" | "murderer" => Some(TargetClass::Murderer),
            "nonfriendly" => Some(TargetClass::NonFriendly),
            _ => None,
        }
    }
}

/// Expand a notoriety-set grammar token into primitive classes.
pub fn expand_notoriety_token(token: &str) -> Result<Vec<Notoriety>, ScriptError> {
    let expanded = match token.trim().to_ascii_lowercase().as_str() {
        "friendly" => vec![Notoriety::Innocent, Notoriety::GuildAlly],
        "nonfriendly" => vec![
            Notoriety::Hostile,
            Notoriety::Criminal,
            Notoriety::Enemy,
            Notoriety::Murderer,
        ],
        "red" => vec![Notoriety::Murderer],
        "blue" => vec![Notoriety::Innocent],
        "gray" | "grey" => vec![Notoriety::Hostile, Notoriety::Criminal],
        "green" | "guild" => vec![Notoriety::GuildAlly],
        "innocent" => vec![Notoriety::Innocent],
        "guildally" => vec![Notoriety::GuildAlly],
        "attackable" | "hostile" => vec![Notoriety::Hostile],
        "criminal" => vec![Notoriety::Criminal],
        "enemy" => vec![Notoriety::Enemy],
        "murderer" => vec![Notoriety::Murderer],
        "invulnerable" => vec![Notoriety::Invulnerable],
        other => return Err(ScriptError::UnknownTargetType(other.to_string())),
    };
    Ok(expanded)
}

/// Cursor flavor of an active target request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetCursor {
    Neutral,
    Harmful,
    Beneficial,
}

/// `neutral`/`harmful`/`beneficial` or `any` (None).
pub fn parse_target_cursor(token: &str) -> Result<Option<TargetCursor>, ScriptError> {
    match token.trim().to_ascii_lowercase().as_str() {
        "neutral" => Ok(Some(TargetCursor::Neutral)),
        "harmful" => Ok(Some(TargetCursor::Harmful)),
        "beneficial" => Ok(Some(TargetCursor::Beneficial)),
        "any" => Ok(None),
        other => Err(ScriptError::InvalidArgument(format!(
            "invalid target type '{}'",
            other
        ))),
    }
}

use std::collections::HashMap;

use crate::entities::item::EntityId;
use crate::scripting::error::ScriptError;

/// Interpreter-visible name bindings. Script variables are mirrored
/// into this table so any argument slot can name an entity.
pub type Aliases = HashMap<String, EntityId>;

/// The interpreter's universal argument type.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Value {
    Str(String),
    Int(i32),
    UInt(u32),
    Entity(EntityId),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValueError {
    NotText(String),
    NotNumeric(String),
    NotAnEntity(String),
}

impl std::fmt::Display for ValueError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValueError::NotText(got) => write!(f, "expected text, got {}", got),
            ValueError::NotNumeric(got) => write!(f, "expected a number, got '{}'", got),
            ValueError::NotAnEntity(got) => write!(f, "'{}' is not an entity reference", got),
        }
    }
}

impl std::error::Error for ValueError {}

impl From<ValueError> for ScriptError {
    fn from(err: ValueError) -> Self {
        ScriptError::InvalidArgument(err.to_string())
    }
}

/// Parse decimal or `0x`-prefixed hex text.
pub(crate) fn parse_u32(text: &str) -> Option<u32> {
    let text = text.trim();
    if let Some(hex) = text.strip_prefix("0x").or_else(|| text.strip_prefix("0X")) {
        u32::from_str_radix(hex, 16).ok()
    } else {
        text.parse::<u32>().ok()
    }
}

pub(crate) fn parse_i32(text: &str) -> Option<i32> {
    let text = text.trim();
    if let Some(hex) = text.strip_prefix("0x").or_else(|| text.strip_prefix("0X")) {
        u32::from_str_radix(hex, 16).ok().map(|value| value as i32)
    } else {
        text.parse::<i32>().ok()
    }
}

impl Value {
    pub fn from_bool(flag: bool) -> Value {
        Value::Int(if flag { 1 } else { 0 })
    }

    /// Textual rendering. When `strict`, non-text variants are refused
    /// instead of rendered.
    pub fn as_string(&self, strict: bool) -> Result<String, ValueError> {
        match self {
            Value::Str(text) => Ok(text.clone()),
            _ if strict => Err(ValueError::NotText(self.describe())),
            Value::Int(value) => Ok(value.to_string()),
            Value::UInt(value) => Ok(value.to_string()),
            Value::Entity(id) => Ok(id.to_string()),
        }
    }

    pub fn as_int(&self) -> Result<i32, ValueError> {
        match self {
            Value::Int(value) => Ok(*value),
            Value::UInt(value) => Ok(*value as i32),
            Value::Entity(id) => Ok(id.0 as i32),
            Value::Str(text) => {
                parse_i32(text).ok_or_else(|| ValueError::NotNumeric(text.clone()))
            }
        }
    }

    pub fn as_uint(&self) -> Result<u32, ValueError> {
        match self {
            Value::UInt(value) => Ok(*value),
            Value::Int(value) if *value >= 0 => Ok(*value as u32),
            Value::Int(value) => Err(ValueError::NotNumeric(value.to_string())),
            Value::Entity(id) => Ok(id.0),
            Value::Str(text) => {
                parse_u32(text).ok_or_else(|| ValueError::NotNumeric(text.clone()))
            }
        }
    }

    /// Resolve an entity reference: a registered alias wins over a
    /// numeric literal.
    pub fn as_entity(&self, aliases: &Aliases) -> Result<EntityId, ValueError> {
        match self {
            Value::Entity(id) => Ok(*id),
            Value::Int(value) if *value >= 0 => Ok(EntityId(*value as u32)),
            Value::Int(value) => Err(ValueError::NotAnEntity(value.to_string())),
            Value::UInt(value) => Ok(EntityId(*value)),
            Value::Str(text) => {
                let trimmed = text.trim();
                if let Some(id) = aliases.get(trimmed) {
                    return Ok(*id);
                }
                parse_u32(trimmed)
                    .map(EntityId)
                    .ok_or_else(|| ValueError::NotAnEntity(trimmed.to_string()))
            }
        }
    }

    fn describe(&self) -> String {
        match self {
            Value::Str(text) => format!("string '{}'", text),
            Value::Int(value) => format!("integer {}", value),
            Value::UInt(value) => format!("unsigned integer {}", value),
            Value::Entity(id) => format!("entity {}", id),
        }
    }
}

impl From<&str> for Value {
    fn from(text: &str) -> Self {
        Value::Str(text.to_string())
    }
}

impl From<String> for Value {
    fn from(text: String) -> Self {
        Value::Str(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strict_string_refuses_numbers() {
        assert!(Value::Int(5).as_string(true).is_err());
        assert_eq!(Value::Int(5).as_string(false).unwrap(), "5");
        assert_eq!(
            Value::Str("front".to_string()).as_string(true).unwrap(),
            "front"
        );
    }

    #[test]
    fn numeric_parsing_accepts_hex() {
        assert_eq!(Value::from("0x1234").as_int().unwrap(), 0x1234);
        assert_eq!(Value::from("4660").as_uint().unwrap(), 4660);
        assert!(Value::from("brimstone").as_int().is_err());
    }

    #[test]
    fn entity_resolution_prefers_aliases() {
        let mut aliases = Aliases::new();
        aliases.insert("mount".to_string(), EntityId(0x00042));
        let value = Value::from("mount");
        assert_eq!(value.as_entity(&aliases).unwrap(), EntityId(0x42));

        let literal = Value::from("66");
        assert_eq!(literal.as_entity(&aliases).unwrap(), EntityId(66));

        let unknown = Value::from("packhorse");
        assert!(unknown.as_entity(&aliases).is_err());
    }

    #[test]
    fn alias_lookup_trims_the_token() {
        let mut aliases = Aliases::new();
        aliases.insert("bank".to_string(), EntityId(9));
        assert_eq!(
            Value::from("  bank ").as_entity(&aliases).unwrap(),
            EntityId(9)
        );
    }

    #[test]
    fn equality_is_value_based() {
        assert_eq!(Value::from("back"), Value::Str("back".to_string()));
        assert_ne!(Value::Int(1), Value::UInt(1));
    }
}

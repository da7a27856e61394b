use crate::entities::mobile::Notoriety;
use crate::scripting::error::ScriptError;
use crate::scripting::session::Session;
use crate::scripting::value::Value;
use crate::targeting::classes::{
    expand_notoriety_token, AcquireMode, BodyKind, TargetClass, TargetCursor,
};

/// Host-side target acquisition primitives. The runtime never walks the
/// client's target state itself; it asks the surface and records the outcome.
pub trait TargetingSurface {
    /// Acquire any mobile, regardless of class or body.
    fn acquire_any(&mut self, mode: AcquireMode) -> bool;
    /// Acquire the best mobile of one class.
    fn acquire_class(&mut self, mode: AcquireMode, class: TargetClass, body: BodyKind) -> bool;
    /// Acquire the best mobile whose notoriety is in `classes`.
    fn acquire_set(&mut self, mode: AcquireMode, classes: &[Notoriety], body: BodyKind) -> bool;
    /// Acquire the best mobile of a body type, any class.
    fn acquire_body(&mut self, mode: AcquireMode, body: BodyKind) -> bool;
    /// Whether a target request cursor is currently up.
    fn has_target(&self) -> bool;
    /// Flavor of the active cursor, if any.
    fn cursor_type(&self) -> Option<TargetCursor>;
}

fn parse_body(arg: Option<&Value>) -> Result<BodyKind, ScriptError> {
    let Some(arg) = arg else {
        return Ok(BodyKind::Any);
    };
    let text = arg.as_string(false)?.to_ascii_lowercase();
    if text.contains("human") {
        Ok(BodyKind::Humanoid)
    } else if text.contains("monster") {
        Ok(BodyKind::Monster)
    } else {
        Ok(BodyKind::Any)
    }
}

/// Resolve a target specification and record the outcome in
/// `session.target_found`.
///
/// No spec at all acquires any mobile. A `!`-separated spec is a priority
/// list: classes are tried left to right and the first hit wins. A
/// `,`-separated spec is a notoriety set resolved in a single acquisition.
/// For `Next`/`Prev`, a lone `human`/`humanoid` or `monster` token restricts
/// by body instead of class.
pub fn resolve_target(
    session: &mut Session,
    surface: &mut dyn TargetingSurface,
    mode: AcquireMode,
    spec: Option<&Value>,
    body_arg: Option<&Value>,
) -> Result<(), ScriptError> {
    session.target_found = false;

    let Some(spec) = spec else {
        session.target_found = surface.acquire_any(mode);
        return Ok(());
    };
    let text = spec.as_string(false)?;
    let body = parse_body(body_arg)?;

    if matches!(mode, AcquireMode::Next | AcquireMode::Prev)
        && body_arg.is_none()
        && !text.contains('!')
        && !text.contains(',')
    {
        match text.trim().to_ascii_lowercase().as_str() {
            "human" | "humanoid" => {
                session.target_found = surface.acquire_body(mode, BodyKind::Humanoid);
                return Ok(());
            }
            "monster" => {
                session.target_found = surface.acquire_body(mode, BodyKind::Monster);
                return Ok(());
            }
            _ => {}
        }
    }

    if !text.contains(',') {
        // Priority grammar. Every token must parse even when an earlier
        // one already matched on a previous run.
        for token in text.split('!') {
            let class = TargetClass::parse(token)
                .ok_or_else(|| ScriptError::UnknownTargetType(token.trim().to_string()))?;
            if !session.target_found {
                session.target_found = surface.acquire_class(mode, class, body);
            }
        }
        return Ok(());
    }

    let mut classes: Vec<Notoriety> = Vec::new();
    for token in text.split(',') {
        for noto in expand_notoriety_token(token)? {
            if !classes.contains(&noto) {
                classes.push(noto);
            }
        }
    }
    session.target_found = surface.acquire_set(mode, &classes, body);
    Ok(())
}

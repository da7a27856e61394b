use std::collections::HashSet;

use crate::entities::item::{Containment, EntityId, Item};
use crate::entities::mobile::Mobile;
use crate::scripting::error::ScriptError;
use crate::scripting::session::Session;
use crate::scripting::value::{parse_i32, Value};
use crate::world::state::World;

/// Default search radius when a command gives none.
pub const DEFAULT_SEARCH_RANGE: i32 = 18;
/// Ground pickup reach for the self/backpack/ground scope.
const GROUND_REACH: i32 = 2;
const DEFAULT_MAX_DEPTH: i32 = 100;

/// Containment region a filter restricts its search to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceScope {
    SelfOnly,
    SelfAndBackpack,
    SelfBackpackAndGround,
    Container(EntityId),
    /// No scope given: the entity must be directly uncontained.
    Ground,
    /// No containment predicate at all.
    Any,
}

impl SourceScope {
    fn is_explicit_container(self) -> bool {
        matches!(self, SourceScope::Container(_))
    }

    /// Range filtering only applies where the scope does not already
    /// imply locality through containment.
    fn range_applies(self) -> bool {
        matches!(self, SourceScope::Ground | SourceScope::Any)
    }
}

/// Walk the container chain upward looking for `target`. A corpse
/// anywhere in the chain is a hard stop; a mobile container is always
/// the top of the chain. A negative `max_depth` means the default of
/// 100. Unresolvable links terminate the walk with false.
pub fn check_in_container(world: &World, item: &Item, target: EntityId, max_depth: i32) -> bool {
    let mut depth = if max_depth < 0 {
        DEFAULT_MAX_DEPTH
    } else {
        max_depth
    };
    let mut current = item;
    loop {
        if current.is_corpse {
            return false;
        }
        if current.id == target {
            return true;
        }
        match current.container {
            Containment::Mobile(id) => return id == target,
            Containment::None => return false,
            Containment::Item(id) => match world.item(id) {
                Some(next) => current = next,
                None => return false,
            },
        }
        if depth <= 0 {
            return false;
        }
        depth -= 1;
    }
}

/// Lazy, single-pass filter over a candidate set. `hue == -1` matches
/// any hue; `min_amount` only excludes when greater than 1 (amount 0
/// never satisfies a minimum above 1). The ignore set is checked last.
pub fn filter_items<'a, I>(
    world: &'a World,
    ignored: &'a HashSet<EntityId>,
    items: I,
    hue: i32,
    min_amount: i32,
    scope: SourceScope,
    range: i32,
) -> impl Iterator<Item = &'a Item> + 'a
where
    I: IntoIterator<Item = &'a Item>,
    I::IntoIter: 'a,
{
    let player_id = world.player().map_or(EntityId::ZERO, |p| p.id);
    let backpack_id = world.player().map_or(EntityId::ZERO, |p| p.backpack);
    let player_pos = world.player().map(|p| p.position);

    items.into_iter().filter(move |item| {
        if hue != -1 && i32::from(item.hue) != hue {
            return false;
        }
        if min_amount > 1 && i32::from(item.amount) < min_amount {
            return false;
        }

        let contained_ok = match scope {
            SourceScope::SelfOnly => check_in_container(world, item, player_id, range),
            SourceScope::SelfAndBackpack => {
                check_in_container(world, item, player_id, range)
                    || check_in_container(world, item, backpack_id, range)
            }
            SourceScope::SelfBackpackAndGround => {
                check_in_container(world, item, player_id, range)
                    || check_in_container(world, item, backpack_id, range)
                    || (item.on_ground()
                        && player_pos
                            .map_or(false, |pos| pos.in_range(item.position, GROUND_REACH)))
            }
            SourceScope::Container(id) => check_in_container(world, item, id, range),
            SourceScope::Ground => item.on_ground(),
            SourceScope::Any => true,
        };
        if !contained_ok {
            return false;
        }

        if range > 0
            && scope.range_applies()
            && !player_pos.map_or(false, |pos| pos.in_range(item.position, range))
        {
            return false;
        }

        !ignored.contains(&item.id)
    })
}

pub fn items_by_graphic_filtered<'a>(
    world: &'a World,
    session: &'a Session,
    graphic: u16,
    hue: i32,
    min_amount: i32,
    scope: SourceScope,
    range: i32,
) -> Vec<&'a Item> {
    filter_items(
        world,
        session.ignored(),
        world.items_by_graphic(graphic),
        hue,
        min_amount,
        scope,
        range,
    )
    .collect()
}

pub fn items_by_name_filtered<'a>(
    world: &'a World,
    session: &'a Session,
    name: &str,
    hue: i32,
    min_amount: i32,
    scope: SourceScope,
    range: i32,
) -> Vec<&'a Item> {
    filter_items(
        world,
        session.ignored(),
        world.items_by_name(name),
        hue,
        min_amount,
        scope,
        range,
    )
    .collect()
}

/// Mobiles by body id. Ghosts and humans are never candidates here.
pub fn mobiles_by_body(world: &World, body: u16, range: i32) -> Vec<&Mobile> {
    let range = if range == -1 { DEFAULT_SEARCH_RANGE } else { range };
    world
        .mobiles_in_range(range)
        .into_iter()
        .filter(|m| !m.is_ghost && !m.is_human && m.body == body)
        .collect()
}

pub fn mobiles_by_name<'a>(world: &'a World, name: &str, range: i32) -> Vec<&'a Mobile> {
    let range = if range == -1 { DEFAULT_SEARCH_RANGE } else { range };
    let Some(player) = world.player() else {
        return Vec::new();
    };
    world
        .mobiles_by_name(name)
        .into_iter()
        .filter(|m| !m.is_ghost && !m.is_human)
        .filter(|m| player.position.in_range(m.position, range))
        .collect()
}

/// A number (decimal or hex) or the literal `any`, which reads as -1.
pub fn number_or_any(value: &Value) -> Result<i32, ScriptError> {
    let text = value.as_string(false)?;
    let text = text.trim();
    if let Some(parsed) = parse_i32(text) {
        return Ok(parsed);
    }
    if text.eq_ignore_ascii_case("any") {
        return Ok(-1);
    }
    Err(ScriptError::InvalidArgument(format!(
        "expected a number or 'any', got '{}'",
        text
    )))
}

fn parse_source_scope(session: &Session, value: &Value) -> Result<SourceScope, ScriptError> {
    let text = value.as_string(false)?;
    match text.trim().to_ascii_lowercase().as_str() {
        "true" => Ok(SourceScope::SelfBackpackAndGround),
        "self" => Ok(SourceScope::SelfOnly),
        "ground" => Ok(SourceScope::Ground),
        "any" => Ok(SourceScope::Any),
        _ => {
            let id = value.as_entity(&session.aliases)?;
            if id.is_assigned() {
                Ok(SourceScope::Container(id))
            } else {
                Ok(SourceScope::Ground)
            }
        }
    }
}

/// Deconstruct `[src] [hue] [qty] [range]` tail arguments, as used by
/// `find`. Index 0 is the entity/graphic argument itself.
pub fn parse_find_arguments(
    session: &Session,
    args: &[Value],
) -> Result<(SourceScope, i32, i32, i32), ScriptError> {
    let scope = match args.get(1) {
        Some(value) => parse_source_scope(session, value)?,
        None => SourceScope::SelfAndBackpack,
    };
    let hue = match args.get(2) {
        Some(value) => number_or_any(value)?,
        None => -1,
    };
    let qty = match args.get(3) {
        Some(value) => number_or_any(value)?,
        None => -1,
    };
    let range = match args.get(4) {
        Some(value) => number_or_any(value)?,
        None => -1,
    };
    Ok((scope, hue, qty, range))
}

/// Deconstruct `[src] [hue] [range]` tail arguments, as used by
/// `counttype`.
pub fn parse_count_arguments(
    session: &Session,
    args: &[Value],
) -> Result<(SourceScope, i32, i32), ScriptError> {
    let scope = match args.get(1) {
        Some(value) => parse_source_scope(session, value)?,
        None => SourceScope::SelfAndBackpack,
    };
    let hue = match args.get(2) {
        Some(value) => number_or_any(value)?,
        None => -1,
    };
    let range = match args.get(3) {
        Some(value) => number_or_any(value)?,
        None => -1,
    };
    Ok((scope, hue, range))
}

//! Built-in script commands and expressions.

use crate::entities::item::EntityId;
use crate::entities::layer::Layer;
use crate::entities::skills::{skill_by_name, LockDirection};
use crate::scripting::error::ScriptError;
use crate::scripting::filter::{
    filter_items, items_by_graphic_filtered, items_by_name_filtered, number_or_any,
    parse_count_arguments, parse_find_arguments, DEFAULT_SEARCH_RANGE,
};
use crate::scripting::getlabel::poll_label_query;
use crate::scripting::interpreter::{Interpreter, ScriptContext};
use crate::scripting::session::OutboundRequest;
use crate::scripting::value::{parse_u32, Value};
use crate::targeting::classes::{parse_target_cursor, AcquireMode};
use crate::targeting::resolve::resolve_target;

pub fn register_builtins(interpreter: &mut Interpreter) {
    // Lists
    interpreter.register_command_handler("poplist", pop_list);
    interpreter.register_command_handler("pushlist", push_list);
    interpreter.register_command_handler("removelist", remove_list);
    interpreter.register_command_handler("createlist", create_list);
    interpreter.register_command_handler("clearlist", clear_list);

    // Timers
    interpreter.register_command_handler("settimer", set_timer);
    interpreter.register_command_handler("removetimer", remove_timer);
    interpreter.register_command_handler("createtimer", create_timer);

    interpreter.register_command_handler("getlabel", get_label);
    interpreter.register_command_handler("warmode", warmode_command);
    interpreter.register_command_handler("unsetvar", unset_var);
    interpreter.register_command_handler("rename", rename);
    interpreter.register_command_handler("setskill", set_skill);

    interpreter.register_command_handler("ignore", add_ignore);
    interpreter.register_command_handler("clearignore", clear_ignore);

    interpreter.register_command_handler("targetclosest", target_closest);
    interpreter.register_command_handler("targetrandom", target_random);
    interpreter.register_command_handler("targetnext", target_next);
    interpreter.register_command_handler("targetprev", target_prev);

    interpreter.register_expression_handler("listexists", list_exists);
    interpreter.register_expression_handler("list", list_length);
    interpreter.register_expression_handler("inlist", in_list);

    interpreter.register_expression_handler("timer", timer_value);
    interpreter.register_expression_handler("timerexists", timer_exists);

    interpreter.register_expression_handler("followers", followers);
    interpreter.register_expression_handler("hue", hue);
    interpreter.register_expression_handler("name", player_name);
    interpreter.register_expression_handler("findlayer", find_layer);
    interpreter.register_expression_handler("find", find);
    interpreter.register_expression_handler("targetexists", target_exists);
    interpreter.register_expression_handler("maxweight", max_weight);
    interpreter.register_expression_handler("diffweight", diff_weight);
    interpreter.register_expression_handler("diffhits", diff_hits);
    interpreter.register_expression_handler("diffstam", diff_stam);
    interpreter.register_expression_handler("diffmana", diff_mana);
    interpreter.register_expression_handler("counttype", count_type);

    // Mobile flags
    interpreter.register_expression_handler("paralyzed", paralyzed);
    interpreter.register_expression_handler("blessed", blessed);
    interpreter.register_expression_handler("warmode", in_warmode);
    interpreter.register_expression_handler("noto", notoriety);
    interpreter.register_expression_handler("dead", dead);

    // Gumps
    interpreter.register_expression_handler("gumpexist", gump_exists);
    interpreter.register_expression_handler("ingump", in_gump);
}

// --- list commands -------------------------------------------------------

fn pop_list(
    ctx: &mut ScriptContext,
    _name: &str,
    args: &[Value],
    _quiet: bool,
    force: bool,
) -> Result<bool, ScriptError> {
    if args.len() != 2 {
        return Err(ScriptError::Usage(
            "Usage: poplist ('list name') ('element value'/'front'/'back')",
        ));
    }
    let list = args[0].as_string(false)?;
    let selector = args[1].as_string(false)?;
    match selector.as_str() {
        "front" | "back" => {
            let front = selector == "front";
            if force {
                while ctx.session.pop_list(&list, front).is_some() {}
            } else {
                ctx.session.pop_list(&list, front);
            }
        }
        _ => {
            if force {
                while ctx.session.pop_list_value(&list, &args[1]) {}
            } else {
                ctx.session.pop_list_value(&list, &args[1]);
            }
        }
    }
    Ok(true)
}

fn push_list(
    ctx: &mut ScriptContext,
    _name: &str,
    args: &[Value],
    _quiet: bool,
    force: bool,
) -> Result<bool, ScriptError> {
    if args.len() < 2 || args.len() > 3 {
        return Err(ScriptError::Usage(
            "Usage: pushlist ('list name') ('element value') ['front'/'back']",
        ));
    }
    let list = args[0].as_string(false)?;
    let front = match args.get(2) {
        Some(position) => position.as_string(false)? == "front",
        None => false,
    };
    ctx.session.push_list(&list, args[1].clone(), front, force);
    Ok(true)
}

fn remove_list(
    ctx: &mut ScriptContext,
    _name: &str,
    args: &[Value],
    _quiet: bool,
    _force: bool,
) -> Result<bool, ScriptError> {
    if args.len() != 1 {
        return Err(ScriptError::Usage("Usage: removelist ('list name')"));
    }
    ctx.session.destroy_list(&args[0].as_string(false)?);
    Ok(true)
}

fn create_list(
    ctx: &mut ScriptContext,
    _name: &str,
    args: &[Value],
    _quiet: bool,
    _force: bool,
) -> Result<bool, ScriptError> {
    if args.len() != 1 {
        return Err(ScriptError::Usage("Usage: createlist ('list name')"));
    }
    ctx.session.create_list(&args[0].as_string(false)?);
    Ok(true)
}

fn clear_list(
    ctx: &mut ScriptContext,
    _name: &str,
    args: &[Value],
    _quiet: bool,
    _force: bool,
) -> Result<bool, ScriptError> {
    if args.len() != 1 {
        return Err(ScriptError::Usage("Usage: clearlist ('list name')"));
    }
    ctx.session.clear_list(&args[0].as_string(false)?);
    Ok(true)
}

// --- timer commands ------------------------------------------------------

fn set_timer(
    ctx: &mut ScriptContext,
    _name: &str,
    args: &[Value],
    _quiet: bool,
    _force: bool,
) -> Result<bool, ScriptError> {
    if args.len() != 2 {
        return Err(ScriptError::Usage("Usage: settimer (timer name) (value)"));
    }
    let name = args[0].as_string(false)?;
    let elapsed = args[1].as_int()?;
    ctx.session.set_timer(&name, elapsed.max(0) as u64);
    Ok(true)
}

fn remove_timer(
    ctx: &mut ScriptContext,
    _name: &str,
    args: &[Value],
    _quiet: bool,
    _force: bool,
) -> Result<bool, ScriptError> {
    if args.len() != 1 {
        return Err(ScriptError::Usage("Usage: removetimer (timer name)"));
    }
    ctx.session.remove_timer(&args[0].as_string(false)?);
    Ok(true)
}

fn create_timer(
    ctx: &mut ScriptContext,
    _name: &str,
    args: &[Value],
    _quiet: bool,
    _force: bool,
) -> Result<bool, ScriptError> {
    if args.len() != 1 {
        return Err(ScriptError::Usage("Usage: createtimer (timer name)"));
    }
    ctx.session.create_timer(&args[0].as_string(false)?);
    Ok(true)
}

// --- label / state commands ----------------------------------------------

fn get_label(
    ctx: &mut ScriptContext,
    _name: &str,
    args: &[Value],
    quiet: bool,
    _force: bool,
) -> Result<bool, ScriptError> {
    if args.len() != 2 {
        return Err(ScriptError::Usage("Usage: getlabel (serial) (name)"));
    }
    let target = args[0].as_entity(&ctx.session.aliases)?;
    let variable = args[1].as_string(false)?;
    Ok(poll_label_query(ctx.session, target, &variable, quiet))
}

fn warmode_command(
    ctx: &mut ScriptContext,
    _name: &str,
    args: &[Value],
    _quiet: bool,
    _force: bool,
) -> Result<bool, ScriptError> {
    if args.len() != 1 {
        return Err(ScriptError::Usage("Usage: warmode ('on' / 'off' )"));
    }
    let state = match args[0].as_string(false)?.to_ascii_lowercase().as_str() {
        "on" => true,
        "off" => false,
        other => {
            return Err(ScriptError::InvalidArgument(format!(
                "warmode expects 'on' or 'off', got '{}'",
                other
            )))
        }
    };
    ctx.session.queue_request(OutboundRequest::SetWarMode(state));
    Ok(true)
}

fn unset_var(
    ctx: &mut ScriptContext,
    _name: &str,
    args: &[Value],
    quiet: bool,
    force: bool,
) -> Result<bool, ScriptError> {
    if args.len() != 1 {
        return Err(ScriptError::Usage("Usage: unsetvar ('name')"));
    }
    let name = args[0].as_string(false)?;
    if force {
        if quiet {
            ctx.session.clear_variable(&name);
        } else {
            ctx.session.clear_alias(&name);
        }
    } else {
        ctx.session.unregister_variable(&name);
    }
    Ok(true)
}

fn rename(
    ctx: &mut ScriptContext,
    _name: &str,
    args: &[Value],
    _quiet: bool,
    _force: bool,
) -> Result<bool, ScriptError> {
    if args.len() != 2 {
        return Err(ScriptError::Usage("Usage: rename (serial) (new_name)"));
    }
    let new_name = args[1].as_string(false)?;
    if new_name.is_empty() {
        return Err(ScriptError::Runtime(
            "Mobile name must be longer then 1 char".to_string(),
        ));
    }
    let id = args[0].as_entity(&ctx.session.aliases)?;
    if let Some(mobile) = ctx.world.mobile(id) {
        if mobile.can_rename {
            ctx.session.queue_request(OutboundRequest::RenameMobile {
                id,
                name: new_name,
            });
        }
    }
    Ok(true)
}

fn set_skill(
    ctx: &mut ScriptContext,
    _name: &str,
    args: &[Value],
    _quiet: bool,
    _force: bool,
) -> Result<bool, ScriptError> {
    if args.len() < 2 {
        return Err(ScriptError::Usage(
            "Usage: setskill (skill_name) (up/down/lock)",
        ));
    }
    let lock = LockDirection::parse(&args[1].as_string(false)?).ok_or_else(|| {
        ScriptError::InvalidArgument(
            "Invalid set skill modifier - should be up/down/lock".to_string(),
        )
    })?;
    let skill = skill_by_name(&args[0].as_string(false)?)
        .ok_or_else(|| ScriptError::InvalidArgument("Invalid skill name".to_string()))?;
    ctx.session
        .queue_request(OutboundRequest::SetSkillLock { skill, lock });
    Ok(true)
}

// --- ignore commands -----------------------------------------------------

fn add_ignore(
    ctx: &mut ScriptContext,
    _name: &str,
    args: &[Value],
    quiet: bool,
    _force: bool,
) -> Result<bool, ScriptError> {
    if args.len() != 1 {
        return Err(ScriptError::Usage("Usage: ignore (serial)"));
    }
    let id = args[0].as_entity(&ctx.session.aliases)?;
    ctx.session.add_ignore(id);
    ctx.session
        .send_message(format!("Added {} to ignore list", id), quiet);
    Ok(true)
}

fn clear_ignore(
    ctx: &mut ScriptContext,
    _name: &str,
    _args: &[Value],
    quiet: bool,
    _force: bool,
) -> Result<bool, ScriptError> {
    ctx.session.clear_ignore();
    ctx.session.send_message("Ignore List cleared", quiet);
    Ok(true)
}

// --- target commands -----------------------------------------------------

fn run_target(
    ctx: &mut ScriptContext,
    mode: AcquireMode,
    args: &[Value],
    usage: &'static str,
) -> Result<bool, ScriptError> {
    if args.len() > 2 {
        return Err(ScriptError::Usage(usage));
    }
    resolve_target(ctx.session, ctx.targeting, mode, args.first(), args.get(1))?;
    Ok(true)
}

fn target_closest(
    ctx: &mut ScriptContext,
    _name: &str,
    args: &[Value],
    _quiet: bool,
    _force: bool,
) -> Result<bool, ScriptError> {
    run_target(
        ctx,
        AcquireMode::Closest,
        args,
        "Usage: targetclosest [notoriety] [type]",
    )
}

fn target_random(
    ctx: &mut ScriptContext,
    _name: &str,
    args: &[Value],
    _quiet: bool,
    _force: bool,
) -> Result<bool, ScriptError> {
    run_target(
        ctx,
        AcquireMode::Random,
        args,
        "Usage: targetrandom [notoriety] [type]",
    )
}

fn target_next(
    ctx: &mut ScriptContext,
    _name: &str,
    args: &[Value],
    _quiet: bool,
    _force: bool,
) -> Result<bool, ScriptError> {
    run_target(
        ctx,
        AcquireMode::Next,
        args,
        "Usage: targetnext [notoriety] [type]",
    )
}

fn target_prev(
    ctx: &mut ScriptContext,
    _name: &str,
    args: &[Value],
    _quiet: bool,
    _force: bool,
) -> Result<bool, ScriptError> {
    run_target(
        ctx,
        AcquireMode::Prev,
        args,
        "Usage: targetprev [notoriety] [type]",
    )
}

// --- list/timer expressions ----------------------------------------------

fn list_exists(
    ctx: &mut ScriptContext,
    _name: &str,
    args: &[Value],
    _quiet: bool,
) -> Result<Value, ScriptError> {
    if args.len() != 1 {
        return Err(ScriptError::Usage("Usage: listexists ('list name')"));
    }
    let exists = ctx.session.list_exists(&args[0].as_string(false)?);
    Ok(Value::from_bool(exists))
}

fn list_length(
    ctx: &mut ScriptContext,
    _name: &str,
    args: &[Value],
    _quiet: bool,
) -> Result<Value, ScriptError> {
    if args.len() != 1 {
        return Err(ScriptError::Usage(
            "Usage: list (list name) (operator) (value)",
        ));
    }
    let length = ctx.session.list_length(&args[0].as_string(false)?);
    Ok(Value::Int(length as i32))
}

fn in_list(
    ctx: &mut ScriptContext,
    _name: &str,
    args: &[Value],
    _quiet: bool,
) -> Result<Value, ScriptError> {
    if args.len() != 2 {
        return Err(ScriptError::Usage("Usage: inlist (list name) (element)"));
    }
    let contains = ctx
        .session
        .list_contains(&args[0].as_string(false)?, &args[1]);
    Ok(Value::from_bool(contains))
}

/// Absent timer reads as zero elapsed rather than failing the statement.
fn timer_value(
    ctx: &mut ScriptContext,
    _name: &str,
    args: &[Value],
    _quiet: bool,
) -> Result<Value, ScriptError> {
    if args.len() != 1 {
        return Err(ScriptError::Usage("Usage: timer ('timer name')"));
    }
    let elapsed = ctx
        .session
        .timer_ms(&args[0].as_string(false)?)
        .unwrap_or(0);
    Ok(Value::Int(elapsed.min(i32::MAX as u64) as i32))
}

fn timer_exists(
    ctx: &mut ScriptContext,
    _name: &str,
    args: &[Value],
    _quiet: bool,
) -> Result<Value, ScriptError> {
    if args.len() != 1 {
        return Err(ScriptError::Usage("Usage: timerexists ('timer name')"));
    }
    let exists = ctx.session.timer_exists(&args[0].as_string(false)?);
    Ok(Value::from_bool(exists))
}

// --- player expressions --------------------------------------------------

fn followers(
    ctx: &mut ScriptContext,
    _name: &str,
    args: &[Value],
    _quiet: bool,
) -> Result<Value, ScriptError> {
    if !args.is_empty() {
        return Err(ScriptError::Usage("Usage: followers"));
    }
    Ok(Value::Int(ctx.world.player().map_or(0, |p| p.followers)))
}

fn player_name(
    ctx: &mut ScriptContext,
    _name: &str,
    _args: &[Value],
    _quiet: bool,
) -> Result<Value, ScriptError> {
    let name = ctx.world.player().map_or_else(String::new, |p| p.name.clone());
    Ok(Value::Str(name))
}

fn max_weight(
    ctx: &mut ScriptContext,
    _name: &str,
    _args: &[Value],
    _quiet: bool,
) -> Result<Value, ScriptError> {
    Ok(Value::Int(ctx.world.player().map_or(0, |p| p.max_weight)))
}

fn diff_weight(
    ctx: &mut ScriptContext,
    _name: &str,
    _args: &[Value],
    _quiet: bool,
) -> Result<Value, ScriptError> {
    let diff = ctx.world.player().map_or(0, |p| p.max_weight - p.weight);
    Ok(Value::Int(diff))
}

fn diff_hits(
    ctx: &mut ScriptContext,
    _name: &str,
    _args: &[Value],
    _quiet: bool,
) -> Result<Value, ScriptError> {
    let diff = ctx.world.player().map_or(0, |p| p.hits_max - p.hits);
    Ok(Value::Int(diff))
}

fn diff_stam(
    ctx: &mut ScriptContext,
    _name: &str,
    _args: &[Value],
    _quiet: bool,
) -> Result<Value, ScriptError> {
    let diff = ctx.world.player().map_or(0, |p| p.stam_max - p.stam);
    Ok(Value::Int(diff))
}

fn diff_mana(
    ctx: &mut ScriptContext,
    _name: &str,
    _args: &[Value],
    _quiet: bool,
) -> Result<Value, ScriptError> {
    let diff = ctx.world.player().map_or(0, |p| p.mana_max - p.mana);
    Ok(Value::Int(diff))
}

fn paralyzed(
    ctx: &mut ScriptContext,
    _name: &str,
    _args: &[Value],
    _quiet: bool,
) -> Result<Value, ScriptError> {
    Ok(Value::from_bool(
        ctx.world.player().map_or(false, |p| p.paralyzed),
    ))
}

fn blessed(
    ctx: &mut ScriptContext,
    _name: &str,
    _args: &[Value],
    _quiet: bool,
) -> Result<Value, ScriptError> {
    Ok(Value::from_bool(
        ctx.world.player().map_or(false, |p| p.blessed),
    ))
}

fn in_warmode(
    ctx: &mut ScriptContext,
    _name: &str,
    _args: &[Value],
    _quiet: bool,
) -> Result<Value, ScriptError> {
    Ok(Value::from_bool(
        ctx.world.player().map_or(false, |p| p.warmode),
    ))
}

// --- entity expressions --------------------------------------------------

fn hue(
    ctx: &mut ScriptContext,
    _name: &str,
    args: &[Value],
    _quiet: bool,
) -> Result<Value, ScriptError> {
    if args.len() != 1 {
        return Err(ScriptError::Usage("Usage: hue ('serial')"));
    }
    let id = args[0].as_entity(&ctx.session.aliases)?;
    Ok(Value::Int(
        ctx.world.item(id).map_or(0, |item| i32::from(item.hue)),
    ))
}

fn notoriety(
    ctx: &mut ScriptContext,
    name: &str,
    args: &[Value],
    quiet: bool,
) -> Result<Value, ScriptError> {
    if args.len() != 1 {
        return Err(ScriptError::Usage("Usage: noto (serial)"));
    }
    let id = args[0].as_entity(&ctx.session.aliases)?;
    match ctx.world.mobile(id) {
        Some(mobile) => Ok(Value::Str(mobile.notoriety.token().to_string())),
        None => {
            ctx.session
                .send_warning(name, &format!("Mobile '{}' not found", id), quiet);
            Ok(Value::Str(String::new()))
        }
    }
}

/// No serial argument means the player; a missing mobile reads as dead.
fn dead(
    ctx: &mut ScriptContext,
    _name: &str,
    args: &[Value],
    _quiet: bool,
) -> Result<Value, ScriptError> {
    if let Some(arg) = args.first() {
        let id = arg.as_entity(&ctx.session.aliases)?;
        return Ok(Value::from_bool(
            ctx.world
                .mobile(id)
                .map_or(true, |m| m.is_ghost || m.dead),
        ));
    }
    Ok(Value::from_bool(
        ctx.world.player().map_or(true, |p| p.is_ghost || p.dead),
    ))
}

fn find_layer(
    ctx: &mut ScriptContext,
    name: &str,
    args: &[Value],
    quiet: bool,
) -> Result<Value, ScriptError> {
    if args.len() != 2 {
        return Err(ScriptError::Usage("Usage: findlayer (serial) (layer)"));
    }
    let id = args[0].as_entity(&ctx.session.aliases)?;
    let Some(mobile) = ctx.world.mobile(id) else {
        ctx.session
            .send_warning(name, &format!("Mobile {} not found", id), quiet);
        return Ok(Value::UInt(0));
    };
    let layer = Layer::parse(&args[1].as_string(false)?)
        .ok_or_else(|| ScriptError::InvalidArgument("Invalid layer name".to_string()))?;
    Ok(Value::UInt(mobile.item_on_layer(layer).0))
}

fn find(
    ctx: &mut ScriptContext,
    _name: &str,
    args: &[Value],
    _quiet: bool,
) -> Result<Value, ScriptError> {
    if args.is_empty() {
        return Err(ScriptError::Usage(
            "Usage: find ('serial') [src] [hue] [qty] [range]",
        ));
    }
    let id = args[0].as_entity(&ctx.session.aliases)?;
    let (scope, hue, qty, range) = parse_find_arguments(ctx.session, args)?;
    let range = if range == -1 { DEFAULT_SEARCH_RANGE } else { range };

    if let Some(mobile) = ctx.world.mobile(id) {
        if mobile.is_human {
            return Ok(Value::UInt(0));
        }
        if hue != -1 && i32::from(mobile.hue) != hue {
            return Ok(Value::UInt(0));
        }
        let in_range = ctx
            .world
            .player()
            .map_or(false, |p| p.position.in_range(mobile.position, range));
        if !in_range {
            return Ok(Value::UInt(0));
        }
        return Ok(Value::UInt(mobile.id.0));
    }

    let Some(item) = ctx.world.item(id) else {
        return Ok(Value::UInt(0));
    };
    let found = filter_items(
        ctx.world,
        ctx.session.ignored(),
        std::iter::once(item),
        hue,
        qty,
        scope,
        range,
    )
    .next()
    .map_or(EntityId::ZERO, |i| i.id);
    Ok(Value::UInt(found.0))
}

fn count_type(
    ctx: &mut ScriptContext,
    _name: &str,
    args: &[Value],
    _quiet: bool,
) -> Result<Value, ScriptError> {
    if args.is_empty() {
        return Err(ScriptError::Usage(
            "Usage: counttype (name or graphic) [src] [hue] [range]",
        ));
    }
    let token = args[0].as_string(false)?;
    let graphic = parse_u32(token.trim())
        .and_then(|value| u16::try_from(value).ok())
        .unwrap_or(0);
    let (scope, hue, range) = parse_count_arguments(ctx.session, args)?;

    let count = if graphic == 0 {
        items_by_name_filtered(ctx.world, ctx.session, &token, hue, -1, scope, range).len()
    } else {
        items_by_graphic_filtered(ctx.world, ctx.session, graphic, hue, -1, scope, range).len()
    };
    Ok(Value::UInt(count as u32))
}

fn target_exists(
    ctx: &mut ScriptContext,
    _name: &str,
    args: &[Value],
    _quiet: bool,
) -> Result<Value, ScriptError> {
    let wanted = match args.first() {
        Some(arg) => parse_target_cursor(&arg.as_string(false)?)?,
        None => None,
    };
    if !ctx.targeting.has_target() {
        return Ok(Value::from_bool(false));
    }
    let matches = match wanted {
        None => true,
        Some(cursor) => ctx.targeting.cursor_type() == Some(cursor),
    };
    Ok(Value::from_bool(matches))
}

// --- gump expressions ----------------------------------------------------

fn gump_exists(
    ctx: &mut ScriptContext,
    _name: &str,
    args: &[Value],
    _quiet: bool,
) -> Result<Value, ScriptError> {
    if args.len() != 1 {
        return Err(ScriptError::Usage("Usage: gumpexist (gumpId/'any')"));
    }
    let gump_id = number_or_any(&args[0])?;
    let Some(player) = ctx.world.player() else {
        return Ok(Value::from_bool(false));
    };
    let exists = if gump_id == -1 {
        !player.gumps.is_empty()
    } else {
        player.gumps.contains_key(&(gump_id as u32))
    };
    Ok(Value::from_bool(exists))
}

fn in_gump(
    ctx: &mut ScriptContext,
    _name: &str,
    args: &[Value],
    _quiet: bool,
) -> Result<Value, ScriptError> {
    if args.is_empty() {
        return Err(ScriptError::Usage("Usage: ingump (text) [gumpId/'any']"));
    }
    let text = args[0].as_string(false)?;
    let gump_id = match args.get(1) {
        Some(arg) => number_or_any(arg)?,
        None => -1,
    };
    let Some(player) = ctx.world.player() else {
        return Ok(Value::from_bool(false));
    };
    let found = if gump_id > 0 {
        player
            .gumps
            .get(&(gump_id as u32))
            .map_or(false, |gump| gump.contains_text(&text))
    } else {
        player.any_gump_contains(&text)
    };
    Ok(Value::from_bool(found))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::item::{Containment, Item};
    use crate::entities::mobile::{Mobile, Notoriety};
    use crate::entities::player::{Gump, Player};
    use crate::entities::skills::SkillId;
    use crate::scripting::session::Session;
    use crate::targeting::classes::{BodyKind, TargetClass, TargetCursor};
    use crate::targeting::resolve::TargetingSurface;
    use crate::world::position::Position;
    use crate::world::state::World;

    struct FakeSurface {
        acquired: bool,
        target_up: bool,
        cursor: Option<TargetCursor>,
    }

    impl Default for FakeSurface {
        fn default() -> Self {
            Self {
                acquired: true,
                target_up: false,
                cursor: None,
            }
        }
    }

    impl TargetingSurface for FakeSurface {
        fn acquire_any(&mut self, _mode: AcquireMode) -> bool {
            self.acquired
        }
        fn acquire_class(
            &mut self,
            _mode: AcquireMode,
            _class: TargetClass,
            _body: BodyKind,
        ) -> bool {
            self.acquired
        }
        fn acquire_set(
            &mut self,
            _mode: AcquireMode,
            _classes: &[Notoriety],
            _body: BodyKind,
        ) -> bool {
            self.acquired
        }
        fn acquire_body(&mut self, _mode: AcquireMode, _body: BodyKind) -> bool {
            self.acquired
        }
        fn has_target(&self) -> bool {
            self.target_up
        }
        fn cursor_type(&self) -> Option<TargetCursor> {
            self.cursor
        }
    }

    struct Fixture {
        session: Session,
        world: World,
        surface: FakeSurface,
        interpreter: Interpreter,
    }

    impl Fixture {
        fn new() -> Self {
            Self {
                session: Session::new(),
                world: World::new(),
                surface: FakeSurface::default(),
                interpreter: Interpreter::new(),
            }
        }

        fn command(&mut self, name: &str, args: &[&str], quiet: bool, force: bool) -> Result<bool, ScriptError> {
            let args: Vec<Value> = args.iter().map(|a| Value::from(*a)).collect();
            let mut ctx = ScriptContext {
                session: &mut self.session,
                world: &self.world,
                targeting: &mut self.surface,
            };
            self.interpreter.run_command(&mut ctx, name, &args, quiet, force)
        }

        fn expression(&mut self, name: &str, args: &[&str]) -> Result<Value, ScriptError> {
            let args: Vec<Value> = args.iter().map(|a| Value::from(*a)).collect();
            let mut ctx = ScriptContext {
                session: &mut self.session,
                world: &self.world,
                targeting: &mut self.surface,
            };
            self.interpreter.run_expression(&mut ctx, name, &args, false)
        }
    }

    #[test]
    fn list_lifecycle_through_the_dispatcher() {
        let mut fx = Fixture::new();
        fx.command("createlist", &["loot"], false, false).unwrap();
        fx.command("pushlist", &["loot", "gold"], false, false).unwrap();
        fx.command("pushlist", &["loot", "gem", "front"], false, false).unwrap();
        assert_eq!(fx.expression("list", &["loot"]).unwrap(), Value::Int(2));
        assert_eq!(fx.expression("inlist", &["loot", "gem"]).unwrap(), Value::Int(1));

        fx.command("poplist", &["loot", "front"], false, false).unwrap();
        assert_eq!(fx.expression("inlist", &["loot", "gem"]).unwrap(), Value::Int(0));

        fx.command("removelist", &["loot"], false, false).unwrap();
        assert_eq!(fx.expression("listexists", &["loot"]).unwrap(), Value::Int(0));
    }

    #[test]
    fn forced_poplist_drains_the_list() {
        let mut fx = Fixture::new();
        fx.command("createlist", &["runes"], false, false).unwrap();
        for rune in ["a", "b", "c"] {
            fx.command("pushlist", &["runes", rune], false, false).unwrap();
        }
        fx.command("poplist", &["runes", "back"], false, true).unwrap();
        assert_eq!(fx.expression("list", &["runes"]).unwrap(), Value::Int(0));
    }

    #[test]
    fn pushlist_without_force_rejects_duplicates() {
        let mut fx = Fixture::new();
        fx.command("createlist", &["x"], false, false).unwrap();
        fx.command("pushlist", &["x", "gold"], false, false).unwrap();
        fx.command("pushlist", &["x", "gold"], false, false).unwrap();
        assert_eq!(fx.expression("list", &["x"]).unwrap(), Value::Int(1));
        fx.command("pushlist", &["x", "gold"], false, true).unwrap();
        assert_eq!(fx.expression("list", &["x"]).unwrap(), Value::Int(2));
    }

    #[test]
    fn timer_reads_elapsed_clock_time() {
        let mut fx = Fixture::new();
        fx.command("createtimer", &["cooldown"], false, false).unwrap();
        fx.session.clock.advance_ms(1500);
        assert_eq!(fx.expression("timer", &["cooldown"]).unwrap(), Value::Int(1500));
        fx.command("settimer", &["cooldown", "400"], false, false).unwrap();
        assert_eq!(fx.expression("timer", &["cooldown"]).unwrap(), Value::Int(400));
        fx.command("removetimer", &["cooldown"], false, false).unwrap();
        assert_eq!(fx.expression("timerexists", &["cooldown"]).unwrap(), Value::Int(0));
        assert_eq!(fx.expression("timer", &["cooldown"]).unwrap(), Value::Int(0));
    }

    #[test]
    fn wrong_arity_reports_the_usage_string() {
        let mut fx = Fixture::new();
        let err = fx.command("createlist", &[], false, false).unwrap_err();
        assert_eq!(err, ScriptError::Usage("Usage: createlist ('list name')"));
        let err = fx.expression("getlabelish", &[]).unwrap_err();
        assert!(matches!(err, ScriptError::Runtime(_)));
    }

    #[test]
    fn unsetvar_force_quiet_clears_only_the_runtime_variable() {
        let mut fx = Fixture::new();
        fx.session.set_variable("x", Value::from("label"));
        fx.session.set_alias("x", EntityId(5));
        fx.session.register_variable("y", EntityId(6));

        fx.command("unsetvar", &["x"], true, true).unwrap();
        assert!(fx.session.variable("x").is_none());
        assert_eq!(fx.session.aliases.get("x"), Some(&EntityId(5)));

        fx.command("unsetvar", &["x"], false, true).unwrap();
        assert!(fx.session.aliases.get("x").is_none());

        fx.command("unsetvar", &["y"], false, false).unwrap();
        assert!(fx.session.script_variable("y").is_none());
        assert!(fx.session.aliases.get("y").is_none());
    }

    #[test]
    fn warmode_requires_a_strict_on_off_token() {
        let mut fx = Fixture::new();
        fx.command("warmode", &["on"], false, false).unwrap();
        assert_eq!(
            fx.session.take_requests(),
            vec![OutboundRequest::SetWarMode(true)]
        );
        assert!(matches!(
            fx.command("warmode", &["sideways"], false, false),
            Err(ScriptError::InvalidArgument(_))
        ));
    }

    #[test]
    fn rename_queues_only_for_renameable_mobiles() {
        let mut fx = Fixture::new();
        let mut pet = Mobile::new(EntityId(10), 0xD9);
        pet.can_rename = true;
        fx.world.insert_mobile(pet);
        let mut npc = Mobile::new(EntityId(11), 0x190);
        npc.can_rename = false;
        fx.world.insert_mobile(npc);

        fx.command("rename", &["0xA", "Rex"], false, false).unwrap();
        fx.command("rename", &["0xB", "Bob"], false, false).unwrap();
        assert_eq!(
            fx.session.take_requests(),
            vec![OutboundRequest::RenameMobile {
                id: EntityId(10),
                name: "Rex".to_string()
            }]
        );
        assert!(fx.command("rename", &["0xA", ""], false, false).is_err());
    }

    #[test]
    fn setskill_validates_name_and_lock_direction() {
        let mut fx = Fixture::new();
        fx.command("setskill", &["magery", "up"], false, false).unwrap();
        assert_eq!(
            fx.session.take_requests(),
            vec![OutboundRequest::SetSkillLock {
                skill: SkillId(25),
                lock: LockDirection::Up
            }]
        );
        assert!(fx.command("setskill", &["magery", "diagonal"], false, false).is_err());
        assert!(fx.command("setskill", &["basketweaving", "up"], false, false).is_err());
    }

    #[test]
    fn ignore_adds_and_reports() {
        let mut fx = Fixture::new();
        fx.command("ignore", &["0x40"], false, false).unwrap();
        assert!(fx.session.is_ignored(EntityId(0x40)));
        let messages = fx.session.take_messages();
        assert_eq!(messages.len(), 1);
        assert!(messages[0].text.contains("ignore list"));

        fx.command("clearignore", &[], true, false).unwrap();
        assert!(!fx.session.is_ignored(EntityId(0x40)));
        assert!(fx.session.take_messages().is_empty());
    }

    #[test]
    fn target_commands_record_the_found_flag() {
        let mut fx = Fixture::new();
        fx.command("targetclosest", &["enemy"], false, false).unwrap();
        assert!(fx.session.target_found);
        fx.surface.acquired = false;
        fx.command("targetrandom", &["enemy!criminal"], false, false).unwrap();
        assert!(!fx.session.target_found);
        assert!(fx.command("targetnext", &["chartreuse"], false, false).is_err());
    }

    #[test]
    fn targetexists_checks_cursor_flavor() {
        let mut fx = Fixture::new();
        assert_eq!(fx.expression("targetexists", &[]).unwrap(), Value::Int(0));
        fx.surface.target_up = true;
        fx.surface.cursor = Some(TargetCursor::Harmful);
        assert_eq!(fx.expression("targetexists", &["any"]).unwrap(), Value::Int(1));
        assert_eq!(fx.expression("targetexists", &["harmful"]).unwrap(), Value::Int(1));
        assert_eq!(fx.expression("targetexists", &["beneficial"]).unwrap(), Value::Int(0));
        assert!(fx.expression("targetexists", &["sideways"]).is_err());
    }

    #[test]
    fn player_expressions_read_zero_without_a_player() {
        let mut fx = Fixture::new();
        assert_eq!(fx.expression("followers", &[]).unwrap(), Value::Int(0));
        assert_eq!(fx.expression("diffhits", &[]).unwrap(), Value::Int(0));
        assert_eq!(fx.expression("paralyzed", &[]).unwrap(), Value::Int(0));
        assert_eq!(fx.expression("name", &[]).unwrap(), Value::Str(String::new()));
        // No player: self is dead.
        assert_eq!(fx.expression("dead", &[]).unwrap(), Value::Int(1));
    }

    #[test]
    fn player_expressions_report_stat_differences() {
        let mut fx = Fixture::new();
        let mut player = Player::new(EntityId(1));
        player.name = "Aella".to_string();
        player.followers = 2;
        player.weight = 80;
        player.max_weight = 125;
        player.hits = 60;
        player.hits_max = 90;
        player.stam = 40;
        player.stam_max = 50;
        player.mana = 10;
        player.mana_max = 100;
        player.warmode = true;
        fx.world.set_player(player);

        assert_eq!(fx.expression("followers", &[]).unwrap(), Value::Int(2));
        assert_eq!(fx.expression("maxweight", &[]).unwrap(), Value::Int(125));
        assert_eq!(fx.expression("diffweight", &[]).unwrap(), Value::Int(45));
        assert_eq!(fx.expression("diffhits", &[]).unwrap(), Value::Int(30));
        assert_eq!(fx.expression("diffstam", &[]).unwrap(), Value::Int(10));
        assert_eq!(fx.expression("diffmana", &[]).unwrap(), Value::Int(90));
        assert_eq!(fx.expression("warmode", &[]).unwrap(), Value::Int(1));
        assert_eq!(fx.expression("name", &[]).unwrap(), Value::Str("Aella".to_string()));
        assert_eq!(fx.expression("dead", &[]).unwrap(), Value::Int(0));
    }

    #[test]
    fn hue_reads_zero_for_a_missing_item() {
        let mut fx = Fixture::new();
        let mut item = Item::new(EntityId(0x50), 0x0F26);
        item.hue = 88;
        fx.world.insert_item(item);
        assert_eq!(fx.expression("hue", &["0x50"]).unwrap(), Value::Int(88));
        assert_eq!(fx.expression("hue", &["0x51"]).unwrap(), Value::Int(0));
    }

    #[test]
    fn noto_returns_the_token_or_warns() {
        let mut fx = Fixture::new();
        let mut mobile = Mobile::new(EntityId(0x60), 0x190);
        mobile.notoriety = Notoriety::Murderer;
        fx.world.insert_mobile(mobile);
        assert_eq!(
            fx.expression("noto", &["0x60"]).unwrap(),
            Value::Str("murderer".to_string())
        );
        assert_eq!(
            fx.expression("noto", &["0x61"]).unwrap(),
            Value::Str(String::new())
        );
        let messages = fx.session.take_messages();
        assert!(messages.iter().any(|m| m.text.contains("not found")));
    }

    #[test]
    fn dead_reads_a_missing_mobile_as_dead() {
        let mut fx = Fixture::new();
        let mut ghost = Mobile::new(EntityId(0x70), 0x190);
        ghost.is_ghost = true;
        fx.world.insert_mobile(ghost);
        fx.world.insert_mobile(Mobile::new(EntityId(0x71), 0x190));
        assert_eq!(fx.expression("dead", &["0x70"]).unwrap(), Value::Int(1));
        assert_eq!(fx.expression("dead", &["0x71"]).unwrap(), Value::Int(0));
        assert_eq!(fx.expression("dead", &["0x99"]).unwrap(), Value::Int(1));
    }

    #[test]
    fn findlayer_reads_equipment_or_warns() {
        let mut fx = Fixture::new();
        let mut knight = Mobile::new(EntityId(0x80), 0x190);
        knight.equipment.insert(Layer::RightHand, EntityId(0x81));
        fx.world.insert_mobile(knight);

        assert_eq!(
            fx.expression("findlayer", &["0x80", "righthand"]).unwrap(),
            Value::UInt(0x81)
        );
        assert_eq!(
            fx.expression("findlayer", &["0x80", "lefthand"]).unwrap(),
            Value::UInt(0)
        );
        assert!(fx.expression("findlayer", &["0x80", "elbow"]).is_err());
        assert_eq!(
            fx.expression("findlayer", &["0x99", "righthand"]).unwrap(),
            Value::UInt(0)
        );
    }

    #[test]
    fn find_rejects_humans_and_out_of_range_mobiles() {
        let mut fx = Fixture::new();
        let mut player = Player::new(EntityId(1));
        player.position = Position::new(100, 100, 0);
        fx.world.set_player(player);

        let mut ogre = Mobile::new(EntityId(0x90), 0x0001);
        ogre.position = Position::new(105, 100, 0);
        fx.world.insert_mobile(ogre);
        let mut vendor = Mobile::new(EntityId(0x91), 0x190);
        vendor.is_human = true;
        vendor.position = Position::new(101, 100, 0);
        fx.world.insert_mobile(vendor);
        let mut far = Mobile::new(EntityId(0x92), 0x0001);
        far.position = Position::new(200, 100, 0);
        fx.world.insert_mobile(far);

        assert_eq!(fx.expression("find", &["0x90"]).unwrap(), Value::UInt(0x90));
        assert_eq!(fx.expression("find", &["0x91"]).unwrap(), Value::UInt(0));
        assert_eq!(fx.expression("find", &["0x92"]).unwrap(), Value::UInt(0));
    }

    #[test]
    fn find_applies_the_item_filter_to_a_single_candidate() {
        let mut fx = Fixture::new();
        let mut player = Player::new(EntityId(1));
        player.position = Position::new(100, 100, 0);
        player.backpack = EntityId(2);
        fx.world.set_player(player);
        let mut backpack = Item::new(EntityId(2), 0x0E75);
        backpack.container = Containment::Mobile(EntityId(1));
        fx.world.insert_item(backpack);

        let mut gold = Item::new(EntityId(0xA0), 0x0EED);
        gold.container = Containment::Item(EntityId(2));
        fx.world.insert_item(gold);

        assert_eq!(fx.expression("find", &["0xA0"]).unwrap(), Value::UInt(0xA0));
        assert_eq!(
            fx.expression("find", &["0xA0", "ground"]).unwrap(),
            Value::UInt(0)
        );
        fx.session.add_ignore(EntityId(0xA0));
        assert_eq!(fx.expression("find", &["0xA0"]).unwrap(), Value::UInt(0));
    }

    #[test]
    fn counttype_counts_in_range_stacks_by_graphic() {
        let mut fx = Fixture::new();
        let mut player = Player::new(EntityId(1));
        player.position = Position::new(100, 100, 0);
        fx.world.set_player(player);

        for (n, x) in [(0u32, 101), (1, 105), (2, 109), (3, 150), (4, 160)] {
            let mut item = Item::new(EntityId(0xB0 + n), 0x04D2);
            item.position = Position::new(x, 100, 0);
            fx.world.insert_item(item);
        }

        let count = fx
            .expression("counttype", &["1234", "any", "any", "10"])
            .unwrap();
        assert_eq!(count, Value::UInt(3));
    }

    #[test]
    fn counttype_falls_back_to_name_matching() {
        let mut fx = Fixture::new();
        let mut apple = Item::new(EntityId(0xC0), 0x09D0);
        apple.name = "an apple".to_string();
        fx.world.insert_item(apple);

        let count = fx
            .expression("counttype", &["apple", "any"])
            .unwrap();
        assert_eq!(count, Value::UInt(1));
    }

    #[test]
    fn gump_expressions_search_open_gumps() {
        let mut fx = Fixture::new();
        let mut player = Player::new(EntityId(1));
        player.gumps.insert(
            0x554B87F3,
            Gump {
                lines: vec!["Runebook".to_string(), "Charges: 10".to_string()],
            },
        );
        fx.world.set_player(player);

        assert_eq!(fx.expression("gumpexist", &["any"]).unwrap(), Value::Int(1));
        assert_eq!(
            fx.expression("gumpexist", &["0x554B87F3"]).unwrap(),
            Value::Int(1)
        );
        assert_eq!(fx.expression("gumpexist", &["0x1"]).unwrap(), Value::Int(0));
        assert_eq!(
            fx.expression("ingump", &["charges"]).unwrap(),
            Value::Int(1)
        );
        assert_eq!(
            fx.expression("ingump", &["charges", "0x554B87F3"]).unwrap(),
            Value::Int(1)
        );
        assert_eq!(
            fx.expression("ingump", &["charges", "0x1"]).unwrap(),
            Value::Int(0)
        );
        assert_eq!(fx.expression("ingump", &["wand"]).unwrap(), Value::Int(0));
    }

    #[test]
    fn getlabel_completes_after_the_quiet_period() {
        let mut fx = Fixture::new();
        let target = EntityId(0xD0);

        assert!(!fx.command("getlabel", &["0xD0", "out"], false, false).unwrap());
        assert_eq!(
            fx.session.take_requests(),
            vec![OutboundRequest::SingleClick(target)]
        );

        assert!(fx.session.deliver_label(target, "a magic wand"));
        assert!(!fx.command("getlabel", &["0xD0", "out"], false, false).unwrap());

        fx.session.clock.advance_ms(600);
        assert!(fx.command("getlabel", &["0xD0", "out"], false, false).unwrap());
        assert_eq!(
            fx.session.variable("out"),
            Some(&Value::Str("a magic wand\n".to_string()))
        );
    }
}

use std::collections::HashMap;

use crate::scripting::error::ScriptError;
use crate::scripting::session::Session;
use crate::scripting::value::Value;
use crate::targeting::resolve::TargetingSurface;
use crate::world::state::World;

/// Everything a handler may touch for one statement.
pub struct ScriptContext<'a> {
    pub session: &'a mut Session,
    pub world: &'a World,
    pub targeting: &'a mut dyn TargetingSurface,
}

/// A command returns whether the statement completed; `false` means the
/// runner should re-invoke it after the session's suspension resolves.
pub type CommandFn =
    fn(&mut ScriptContext, &str, &[Value], bool, bool) -> Result<bool, ScriptError>;

pub type ExpressionFn = fn(&mut ScriptContext, &str, &[Value], bool) -> Result<Value, ScriptError>;

/// Name-keyed dispatch tables. Registration happens once at startup;
/// registering a name twice replaces the earlier handler.
#[derive(Default)]
pub struct Interpreter {
    commands: HashMap<String, CommandFn>,
    expressions: HashMap<String, ExpressionFn>,
}

impl Interpreter {
    pub fn new() -> Self {
        let mut interpreter = Self::default();
        crate::scripting::commands::register_builtins(&mut interpreter);
        interpreter
    }

    /// An empty table, for hosts that register their own handler set.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn register_command_handler(&mut self, name: &str, handler: CommandFn) {
        self.commands.insert(name.to_ascii_lowercase(), handler);
    }

    pub fn register_expression_handler(&mut self, name: &str, handler: ExpressionFn) {
        self.expressions.insert(name.to_ascii_lowercase(), handler);
    }

    pub fn run_command(
        &self,
        ctx: &mut ScriptContext,
        name: &str,
        args: &[Value],
        quiet: bool,
        force: bool,
    ) -> Result<bool, ScriptError> {
        let key = name.to_ascii_lowercase();
        let handler = self
            .commands
            .get(&key)
            .ok_or_else(|| ScriptError::Runtime(format!("Unknown command: '{}'", name)))?;
        handler(ctx, &key, args, quiet, force)
    }

    pub fn run_expression(
        &self,
        ctx: &mut ScriptContext,
        name: &str,
        args: &[Value],
        quiet: bool,
    ) -> Result<Value, ScriptError> {
        let key = name.to_ascii_lowercase();
        let handler = self
            .expressions
            .get(&key)
            .ok_or_else(|| ScriptError::Runtime(format!("Unknown expression: '{}'", name)))?;
        handler(ctx, &key, args, quiet)
    }
}

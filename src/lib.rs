pub mod entities;
pub mod persistence;
pub mod scripting;
pub mod targeting;
pub mod telemetry;
pub mod world;

pub use entities::item::{Containment, EntityId, Item};
pub use entities::mobile::{Mobile, Notoriety};
pub use entities::player::{Gump, Player};
pub use scripting::error::ScriptError;
pub use scripting::interpreter::{CommandFn, ExpressionFn, Interpreter, ScriptContext};
pub use scripting::session::{MsgLevel, OutboundRequest, Session, UserMessage};
pub use scripting::value::Value;
pub use targeting::classes::{AcquireMode, BodyKind, TargetClass, TargetCursor};
pub use targeting::resolve::{resolve_target, TargetingSurface};
pub use world::state::World;

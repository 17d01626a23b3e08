pub mod classify;
pub mod engine;
pub mod patterns;
pub mod traits;
pub mod types;

pub use crate::classify::previous_context;
pub use crate::engine::{Engine, EngineBuilder, EngineSnapshot, IndentConfig, IndentReport};
pub use crate::patterns::classify_line_start;
pub use crate::traits::TextOps;
pub use crate::types::{Command, Context, ItemKind, Position, Range, Role};

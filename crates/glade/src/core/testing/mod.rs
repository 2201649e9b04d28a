/// Recording widget behavior.
pub mod recorder;
/// Scripted event source.
pub mod script;

pub use recorder::{Call, Recorder};
pub use script::ScriptedSource;

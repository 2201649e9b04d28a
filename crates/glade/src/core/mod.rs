//! Core types for the Glade engine.

// Core modules - public
/// Event sources and the terminal backend.
pub mod backend;
/// Debug dump utilities.
pub mod dump;
/// Core error types.
pub mod error;
/// Raw input event types.
pub mod event;
/// Layout collaborator contract and the reference stack layout.
pub mod layout;
/// Node records and per-node handles.
pub mod node;
/// Props records and attribute values.
pub mod props;
/// Testing utilities.
pub mod testing;

// Core modules - internal
/// Per-frame tree declaration.
pub mod builder;
/// Event dispatch and touch release synthesis.
pub mod dispatch;
/// Engine facade.
pub mod glade;
/// Node and timer identifiers.
pub mod id;
/// Node identity paths.
pub mod identity;
/// Engine options.
pub mod options;
/// Type tag to behavior mapping.
pub mod registry;
/// Per-frame geometry.
pub mod render;
/// Persistent node storage and reconciliation.
pub mod store;
/// Widget type tags.
pub mod tag;

// Public exports from internal modules
pub use builder::{Builder, NodeSpec};
pub use dispatch::Dispatcher;
pub use glade::Glade;
pub use id::{NodeId, TimerId};
pub use identity::{Identity, Key};
pub use layout::{LayoutEngine, StackLayout};
pub use node::NodeHandle;
pub use options::Options;
pub use registry::Registry;
pub use render::RenderTree;
pub use store::NodeStore;
pub use tag::TypeTag;

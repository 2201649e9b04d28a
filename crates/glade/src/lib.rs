//! Glade: an immediate-mode UI engine.
//!
//! The host declares its widget tree from scratch every frame. Glade
//! reconciles each declaration with the previous frame so that interaction
//! state (focus, pressed buttons, widget memory) survives the rebuild, lays the
//! tree out on a character grid, and routes input events to the nodes they hit.
//!
//! # Quick Start
//!
//! The main entry points are:
//! - [`Glade`] - The engine facade and host loop
//! - [`Builder`] and [`NodeSpec`] - The per-frame declaration API
//! - [`Widget`] - The behavior contract implemented per type tag
//! - [`EventSource`] - Where raw input comes from
//!
//! # Module Organization
//!
//! - [`geom`] - Geometry primitives (Rect, Point, Expanse)
//! - [`widgets`] - Reference widget behaviors
//! - [`backend`] - Event sources, including the crossterm terminal backend
//! - [`testing`] - A scripted event source and a recording widget for tests

#![warn(missing_docs)]

// Internal core module - re-export specific items below
mod core;

// Public modules
pub mod widget;
pub mod widgets;

/// Geometry primitives.
pub mod geom {
    pub use glade_geom::*;
}

pub use core::testing;
pub use core::{
    Builder, Dispatcher, Glade, Identity, Key as NodeKey, LayoutEngine, NodeHandle, NodeId,
    NodeSpec, NodeStore, Options, Registry, RenderTree, StackLayout, TimerId, TypeTag,
};
pub use core::{backend, dump, error, event, layout, node, props};

pub use event::{EventSource, RawEvent};
pub use widget::Widget;

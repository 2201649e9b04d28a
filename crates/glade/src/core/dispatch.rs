//! Event dispatch.
//!
//! A [`Dispatcher`] handles one classified input event per call: it blocks on
//! the event source, updates the interaction state of the nodes the event
//! concerns and invokes their behaviors. Touch input only reports presses, so
//! the dispatcher schedules a timer for every touch and synthesizes the
//! release when it fires.

use std::{collections::HashMap, mem, time::Duration};

use tracing::{error, trace, warn};

use crate::{
    NodeId, NodeStore, Options, Registry, RenderTree, TimerId, Widget,
    error::{Error, Result},
    event::{EventSource, RawEvent, mouse::Button},
    geom::{Expanse, Point},
    node::NodeHandle,
};

/// The run loop step.
#[derive(Debug)]
pub struct Dispatcher {
    /// Pending touch releases: timer to touch location.
    timers: HashMap<TimerId, Point>,
    /// Delay between a touch and its synthesized release.
    touch_release: Duration,
    /// Only touches from this surface are accepted, if set.
    touch_surface: Option<String>,
    /// Faults collected since the host last drained them.
    faults: Vec<Error>,
    /// The most recent screen size reported by the source.
    resize: Option<Expanse>,
}

impl Default for Dispatcher {
    fn default() -> Self {
        Self::new(&Options::default())
    }
}

impl Dispatcher {
    /// A dispatcher configured from options.
    pub fn new(options: &Options) -> Self {
        Self {
            timers: HashMap::new(),
            touch_release: options.touch_release(),
            touch_surface: options.touch_surface.clone(),
            faults: Vec::new(),
            resize: None,
        }
    }

    /// Number of touch releases waiting for their timer.
    pub fn pending_timers(&self) -> usize {
        self.timers.len()
    }

    /// Faults recorded since the last call, oldest first.
    pub fn take_faults(&mut self) -> Vec<Error> {
        mem::take(&mut self.faults)
    }

    /// The screen size from the last resize event, if one arrived since the
    /// last call.
    pub fn take_resize(&mut self) -> Option<Expanse> {
        self.resize.take()
    }

    /// Wait for and handle one event. Returns `Ok(false)` when the host
    /// should stop and `Ok(true)` when it should build a new frame.
    ///
    /// The render tree must have been computed from the store's current
    /// generation.
    pub fn dispatch<S>(
        &mut self,
        source: &mut S,
        store: &mut NodeStore,
        render: &RenderTree,
        registry: &Registry,
    ) -> Result<bool>
    where
        S: EventSource + ?Sized,
    {
        if render.generation() != store.generation() {
            return Err(Error::StaleRenderTree {
                store: store.generation(),
                render: render.generation(),
            });
        }
        loop {
            let event = source.next().inspect_err(|e| error!("event source: {e}"))?;
            match event {
                RawEvent::Terminate => {
                    if !self.timers.is_empty() {
                        trace!(pending = self.timers.len(), "discarding touch timers");
                    }
                    self.timers.clear();
                    return Ok(false);
                }
                RawEvent::Timer(id) => match self.timers.remove(&id) {
                    Some(location) => {
                        self.pointer_up(store, render, registry, location, Button::Left);
                        return Ok(true);
                    }
                    None => trace!(%id, "ignoring unknown timer"),
                },
                RawEvent::Touch { surface, location } => {
                    if self
                        .touch_surface
                        .as_ref()
                        .is_some_and(|want| *want != surface)
                    {
                        trace!(%surface, "ignoring touch from foreign surface");
                        continue;
                    }
                    let id = source.start_timer(self.touch_release)?;
                    self.timers.insert(id, location);
                    self.pointer_down(store, render, registry, location, Button::Left);
                    return Ok(true);
                }
                RawEvent::MouseDown { button, location } => {
                    self.pointer_down(store, render, registry, location, button);
                    return Ok(true);
                }
                RawEvent::MouseUp { button, location } => {
                    self.pointer_up(store, render, registry, location, button);
                    return Ok(true);
                }
                RawEvent::KeyDown { key, held } => {
                    self.each(store, registry, |w, n| w.handle_key(n, key, held));
                    return Ok(true);
                }
                RawEvent::KeyUp { key } => {
                    self.each(store, registry, |w, n| w.handle_key_up(n, key));
                    return Ok(true);
                }
                RawEvent::Resize(size) => {
                    self.resize = Some(size);
                    return Ok(true);
                }
                RawEvent::Other(what) => trace!(%what, "ignoring event"),
            }
        }
    }

    /// The point in the node's local coordinates, if it falls inside the
    /// node.
    fn hit(render: &RenderTree, id: NodeId, location: Point) -> Option<Point> {
        render.rect(id).and_then(|r| r.localize(location))
    }

    /// Press: every hit node is pressed and clicked, every other focused node
    /// loses focus.
    fn pointer_down(
        &mut self,
        store: &mut NodeStore,
        render: &RenderTree,
        registry: &Registry,
        location: Point,
        button: Button,
    ) {
        for id in store.order().to_vec() {
            match Self::hit(render, id, location) {
                Some(local) => self.invoke(store, registry, id, |w, n| {
                    n.props.pressed = Some(button);
                    w.handle_click(n, local, button)
                }),
                None => {
                    let focused = store.get(id).is_some_and(|n| n.props.focused);
                    if focused {
                        self.invoke(store, registry, id, |w, n| {
                            n.props.focused = false;
                            w.handle_lost_focus(n)
                        });
                    }
                }
            }
        }
    }

    /// Release: every hit node is released at its local coordinates, every
    /// other pressed node is released at (0, 0).
    fn pointer_up(
        &mut self,
        store: &mut NodeStore,
        render: &RenderTree,
        registry: &Registry,
        location: Point,
        button: Button,
    ) {
        for id in store.order().to_vec() {
            let at = match Self::hit(render, id, location) {
                Some(local) => local,
                None if store.get(id).is_some_and(|n| n.props.pressed.is_some()) => Point::zero(),
                None => continue,
            };
            self.invoke(store, registry, id, |w, n| {
                n.props.pressed = None;
                w.handle_click_up(n, at, button)
            });
        }
    }

    /// Invoke a handler on every node in pre-order.
    fn each<F>(&mut self, store: &mut NodeStore, registry: &Registry, mut f: F)
    where
        F: FnMut(&dyn Widget, &mut NodeHandle<'_>) -> Result<()>,
    {
        for id in store.order().to_vec() {
            self.invoke(store, registry, id, &mut f);
        }
    }

    /// Run a handler for one node. Faults are recorded and do not stop the
    /// pass. A node whose tag is unknown is left untouched.
    fn invoke<F>(&mut self, store: &mut NodeStore, registry: &Registry, id: NodeId, f: F)
    where
        F: FnOnce(&dyn Widget, &mut NodeHandle<'_>) -> Result<()>,
    {
        let ret = store.handle(id).and_then(|mut handle| {
            let widget = registry.get(handle.tag())?;
            f(widget, &mut handle)
        });
        if let Err(e) = ret {
            warn!(node = ?id, "dispatch fault: {e}");
            self.faults.push(e);
        }
    }
}

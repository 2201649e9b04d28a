use crate::{
    Builder, Dispatcher, LayoutEngine, NodeStore, Options, Registry, RenderTree, StackLayout,
    Widget, dump,
    error::{Error, Result},
    event::EventSource,
    geom::Expanse,
};

/// Default screen size until the host or the event source reports one.
const DEFAULT_SCREEN: Expanse = Expanse { w: 80, h: 24 };

/// The engine: node store, widget registry, layout and dispatcher.
///
/// A host drives the engine one tick at a time: [`Glade::frame`] declares and
/// lays out the tree, [`Glade::dispatch`] handles one input event against it.
/// [`Glade::run`] repeats the two until the event source terminates.
pub struct Glade {
    /// Persistent node state.
    store: NodeStore,
    /// Type tag behaviors.
    registry: Registry,
    /// Layout collaborator.
    layout: Box<dyn LayoutEngine>,
    /// Event dispatch and touch timers.
    dispatcher: Dispatcher,
    /// Geometry for the current store generation.
    render: RenderTree,
    /// Size of the root surface.
    screen: Expanse,
    /// Engine configuration.
    options: Options,
}

impl Default for Glade {
    fn default() -> Self {
        Self::new()
    }
}

impl Glade {
    /// An engine with default options, the reference widgets and the stack
    /// layout.
    pub fn new() -> Self {
        Self::with_options(Options::default())
    }

    /// An engine with the given options.
    pub fn with_options(options: Options) -> Self {
        Self {
            store: NodeStore::new(),
            registry: Registry::with_defaults(),
            layout: Box::new(StackLayout::new()),
            dispatcher: Dispatcher::new(&options),
            render: RenderTree::default(),
            screen: DEFAULT_SCREEN,
            options,
        }
    }

    /// Replace the widget registry.
    pub fn with_registry(mut self, registry: Registry) -> Self {
        self.registry = registry;
        self
    }

    /// Register a behavior for a tag, replacing any previous behavior.
    pub fn register(&mut self, tag: &str, widget: impl Into<Box<dyn Widget>>) -> Result<()> {
        self.registry.register(tag, widget)
    }

    /// The widget registry.
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Mutable access to the widget registry.
    pub fn registry_mut(&mut self) -> &mut Registry {
        &mut self.registry
    }

    /// Replace the layout collaborator. Takes effect at the next frame.
    pub fn set_layout(&mut self, layout: impl LayoutEngine + 'static) {
        self.layout = Box::new(layout);
    }

    /// The engine options.
    pub fn options(&self) -> &Options {
        &self.options
    }

    /// The node store.
    pub fn store(&self) -> &NodeStore {
        &self.store
    }

    /// The render tree of the most recent frame.
    pub fn render(&self) -> &RenderTree {
        &self.render
    }

    /// Size of the root surface.
    pub fn screen(&self) -> Expanse {
        self.screen
    }

    /// Set the size of the root surface. Takes effect at the next frame.
    pub fn set_screen(&mut self, screen: Expanse) {
        self.screen = screen;
    }

    /// Build, commit and lay out a frame.
    ///
    /// If the build fails the store is unchanged and the previous frame's
    /// geometry stays valid. If layout fails the new generation is committed
    /// but has no geometry, and dispatch is refused until a frame succeeds.
    pub fn frame<F>(&mut self, build: F) -> Result<()>
    where
        F: FnOnce(&mut Builder<'_>) -> Result<()>,
    {
        self.store.rebuild(build)?;
        let render = self.layout.layout(&self.store, self.screen)?;
        if render.generation() != self.store.generation() {
            return Err(Error::Layout(format!(
                "layout produced generation {} for store generation {}",
                render.generation(),
                self.store.generation()
            )));
        }
        self.render = render;
        Ok(())
    }

    /// Wait for and handle one input event. Returns `Ok(false)` when the
    /// source terminated.
    pub fn dispatch<S>(&mut self, source: &mut S) -> Result<bool>
    where
        S: EventSource + ?Sized,
    {
        let more =
            self.dispatcher
                .dispatch(source, &mut self.store, &self.render, &self.registry)?;
        if let Some(size) = self.dispatcher.take_resize() {
            self.screen = size;
        }
        Ok(more)
    }

    /// Run the host loop: build, lay out and dispatch until the source
    /// terminates.
    pub fn run<S, F>(&mut self, source: &mut S, build: F) -> Result<()>
    where
        S: EventSource + ?Sized,
        F: FnMut(&mut Builder<'_>) -> Result<()>,
    {
        self.run_with(source, build, |_| Ok(()))
    }

    /// Like [`Glade::run`], calling `after` once each frame has been laid out
    /// and before the next event is dispatched. Hosts draw from here.
    pub fn run_with<S, F, A>(&mut self, source: &mut S, mut build: F, mut after: A) -> Result<()>
    where
        S: EventSource + ?Sized,
        F: FnMut(&mut Builder<'_>) -> Result<()>,
        A: FnMut(&Self) -> Result<()>,
    {
        loop {
            self.frame(&mut build)?;
            after(self)?;
            if !self.dispatch(source)? {
                return Ok(());
            }
        }
    }

    /// Faults recorded during dispatch since the last call.
    pub fn take_faults(&mut self) -> Vec<Error> {
        self.dispatcher.take_faults()
    }

    /// Touch releases waiting for their timer.
    pub fn pending_timers(&self) -> usize {
        self.dispatcher.pending_timers()
    }

    /// A table of every node, for diagnostics.
    pub fn dump(&self) -> Result<String> {
        dump::dump(&self.store, &self.render)
    }
}

//! The layout collaborator contract and the reference stack layout.
//!
//! Layout runs once per frame, after the store has been committed, and
//! produces a [`RenderTree`] stamped with the store's generation.

use unicode_width::UnicodeWidthStr;

use crate::{
    NodeId, NodeStore, RenderTree,
    error::{Error, Result},
    geom::{Axis, Expanse, Rect},
    props::{Align, Props},
};

/// Computes geometry for every node in a store.
pub trait LayoutEngine {
    /// Lay the store out on a screen of the given size. The result must be
    /// stamped with the store's current generation.
    fn layout(&self, store: &NodeStore, screen: Expanse) -> Result<RenderTree>;
}

impl<L: LayoutEngine + ?Sized> LayoutEngine for Box<L> {
    fn layout(&self, store: &NodeStore, screen: Expanse) -> Result<RenderTree> {
        (**self).layout(store, screen)
    }
}

/// A stacking layout.
///
/// Top-level nodes stack as a column filling the screen. Each node lays its
/// children out along its declared direction inside its content area (the
/// outer rectangle minus padding), separated by the declared gap. Fixed and
/// naturally sized children are placed first and expanding children split
/// what is left evenly, with the remainder going to the earliest. On the
/// cross axis a child is stretched to the full content extent unless it has
/// an explicit size or a non-stretch alignment. Every rectangle is clamped to
/// its parent's content area.
///
/// The natural size of a leaf is the display width of its `label` (or
/// `text`) attribute by one row, or nothing if it has neither. The natural
/// size of a container is the sum of its children along its direction plus
/// gaps, by the largest child across it, plus padding.
#[derive(Debug, Default, Clone, Copy)]
pub struct StackLayout;

impl StackLayout {
    /// Construct a stack layout.
    pub fn new() -> Self {
        Self
    }

    /// Preferred outer size of a node.
    fn natural(&self, store: &NodeStore, id: NodeId) -> Result<Expanse> {
        let node = store.node(id)?;
        let spec = node.props().layout();
        let axis = spec.direction;
        let content = if node.children().is_empty() {
            leaf_size(node.props())
        } else {
            let mut main: u32 = 0;
            let mut cross: u32 = 0;
            for child in node.children() {
                let sz = self.natural(store, *child)?;
                main = main.saturating_add(sz.along(axis));
                cross = cross.max(sz.along(axis.cross()));
            }
            let gaps = spec
                .gap
                .saturating_mul(node.children().len().saturating_sub(1) as u32);
            Expanse::from_main_cross(axis, main.saturating_add(gaps), cross)
        };
        let pad = spec.padding.saturating_mul(2);
        Ok(Expanse::new(
            spec.width.unwrap_or(content.w.saturating_add(pad)),
            spec.height.unwrap_or(content.h.saturating_add(pad)),
        ))
    }

    /// Place a run of siblings inside a content rectangle.
    fn place(
        &self,
        store: &NodeStore,
        children: &[NodeId],
        content: Rect,
        axis: Axis,
        gap: u32,
        out: &mut RenderTree,
    ) -> Result<()> {
        if children.is_empty() {
            return Ok(());
        }
        let cross_axis = axis.cross();
        let available = content.along(axis);
        let cross_available = content.along(cross_axis);

        let mut sized = Vec::with_capacity(children.len());
        for id in children {
            let node = store
                .get(*id)
                .ok_or_else(|| Error::Layout(format!("dangling child {id:?}")))?;
            sized.push((*id, node.props(), self.natural(store, *id)?));
        }

        let gaps = gap.saturating_mul(children.len() as u32 - 1);
        let fixed: u32 = sized
            .iter()
            .filter(|(_, p, _)| !p.layout().expand)
            .fold(0u32, |acc, (_, _, sz)| acc.saturating_add(sz.along(axis)));
        let expanders = sized.iter().filter(|(_, p, _)| p.layout().expand).count();
        let mut shares = split_evenly(
            available.saturating_sub(gaps).saturating_sub(fixed),
            expanders,
        )
        .into_iter();

        let mut offset: u32 = 0;
        for (id, props, natural) in sized {
            let spec = props.layout();
            let main = if spec.expand {
                shares.next().unwrap_or(0)
            } else {
                natural.along(axis)
            };
            let (cross, cross_offset) = match (spec.align, spec.fixed(cross_axis)) {
                (Align::Stretch, None) => (cross_available, 0),
                (align, _) => {
                    let size = natural.along(cross_axis).min(cross_available);
                    (size, align_offset(size, cross_available, align))
                }
            };
            let rect = content
                .sub_main_cross(axis, offset, cross_offset, main, cross)
                .clamp_within(&content);
            out.insert(id, rect);
            self.place(
                store,
                store.children(id)?,
                rect.inset(spec.padding),
                spec.direction,
                spec.gap,
                out,
            )?;
            offset = offset.saturating_add(main).saturating_add(gap);
        }
        Ok(())
    }
}

impl LayoutEngine for StackLayout {
    fn layout(&self, store: &NodeStore, screen: Expanse) -> Result<RenderTree> {
        let mut out = RenderTree::new(store.generation());
        self.place(store, store.roots(), screen.rect(), Axis::Vertical, 0, &mut out)?;
        Ok(out)
    }
}

/// Natural content size of a leaf node.
fn leaf_size(props: &Props) -> Expanse {
    props
        .attr("label")
        .or_else(|| props.attr("text"))
        .and_then(|v| v.as_text())
        .map_or(Expanse::default(), |t| Expanse::new(t.width() as u32, 1))
}

/// Split `remaining` cells among `n` claimants, earliest first for the
/// remainder.
fn split_evenly(remaining: u32, n: usize) -> Vec<u32> {
    if n == 0 {
        return Vec::new();
    }
    let n32 = n as u32;
    let base = remaining / n32;
    let extra = (remaining % n32) as usize;
    (0..n)
        .map(|i| if i < extra { base + 1 } else { base })
        .collect()
}

/// Offset of a child of `child_size` inside `available` cells.
fn align_offset(child_size: u32, available: u32, align: Align) -> u32 {
    match align {
        Align::Start | Align::Stretch => 0,
        Align::Center => available.saturating_sub(child_size) / 2,
        Align::End => available.saturating_sub(child_size),
    }
}

//! StackSurface - in-memory vertical stack layout
//!
//! Models a scroll container holding `[top spacer, nodes..., bottom spacer]`
//! laid out top to bottom with no overlap. It is the display layer used by the
//! terminal host and by the test suite.
//!
//! # Complexity
//!
//! Offsets are computed by walking the stack, so `offset`/`insert_*`/`remove`
//! are O(mounted nodes). The controller keeps only a viewport's worth of nodes
//! mounted, so this stays small.

use super::{Anchor, NodeTree, Spacer, Viewport};

/// Measurement of a node's natural extent, before margins.
pub trait Measure {
    /// Natural extent of this node.
    fn measure(&self) -> f64;
}

impl Measure for f64 {
    fn measure(&self) -> f64 {
        *self
    }
}

/// Handle to a node mounted in a [`StackSurface`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeHandle(u64);

impl NodeHandle {
    /// Raw handle value.
    pub fn get(&self) -> u64 {
        self.0
    }
}

#[derive(Debug, Clone)]
enum Slot<N> {
    Spacer { spacer: Spacer, extent: f64 },
    Node { handle: NodeHandle, node: N, extent: f64 },
}

impl<N> Slot<N> {
    fn extent(&self) -> f64 {
        match self {
            Slot::Spacer { extent, .. } | Slot::Node { extent, .. } => *extent,
        }
    }

    fn matches(&self, anchor: Anchor<NodeHandle>) -> bool {
        match (self, anchor) {
            (Slot::Spacer { spacer, .. }, Anchor::Spacer(wanted)) => *spacer == wanted,
            (Slot::Node { handle, .. }, Anchor::Node(wanted)) => *handle == wanted,
            _ => false,
        }
    }
}

/// A mounted node together with its placement relative to the viewport.
#[derive(Debug, Clone, Copy)]
pub struct Placed<'a, N> {
    /// Handle of the node.
    pub handle: NodeHandle,
    /// Top edge relative to the viewport's top edge.
    pub offset: f64,
    /// Extent including the item margin.
    pub extent: f64,
    /// The node itself.
    pub node: &'a N,
}

/// Vertical stack layout implementing [`Viewport`] and [`NodeTree`].
///
/// Node extents are captured at insertion time as `measure() + item_margin`.
///
/// # Scroll notifications
///
/// A change of the scroll offset leaves one notification pending, mirroring
/// a scroll event fired by a real toolkit. Changes made before the host takes
/// it collapse into that one notification, as toolkits fire at most one
/// scroll event per frame. Hosts drain it with
/// [`take_scroll_notification`](Self::take_scroll_notification) and forward
/// it to the controller.
#[derive(Debug, Clone)]
pub struct StackSurface<N> {
    slots: Vec<Slot<N>>,
    next_handle: u64,
    scroll_offset: f64,
    viewport_extent: f64,
    item_margin: f64,
    scroll_pending: bool,
}

impl<N: Measure> StackSurface<N> {
    /// Creates an empty surface with the given visible extent.
    ///
    /// # Examples
    ///
    /// ```
    /// # use virtlist::surface::{StackSurface, Viewport};
    /// let surface: StackSurface<f64> = StackSurface::new(500.0);
    /// assert_eq!(surface.viewport_extent(), 500.0);
    /// assert_eq!(surface.scroll_extent(), 0.0);
    /// ```
    pub fn new(viewport_extent: f64) -> Self {
        Self {
            slots: empty_stack(),
            next_handle: 0,
            scroll_offset: 0.0,
            viewport_extent: viewport_extent.max(0.0),
            item_margin: 0.0,
            scroll_pending: false,
        }
    }

    /// Adds a fixed margin to every node inserted from now on.
    pub fn with_item_margin(mut self, margin: f64) -> Self {
        self.item_margin = margin.max(0.0);
        self
    }

    /// Resizes the visible region, re-clamping the scroll offset.
    pub fn set_viewport_extent(&mut self, extent: f64) {
        self.viewport_extent = extent.max(0.0);
        let clamped = self.clamp_offset(self.scroll_offset);
        self.move_offset(clamped);
    }

    /// Takes the pending scroll notification, if any.
    pub fn take_scroll_notification(&mut self) -> bool {
        std::mem::take(&mut self.scroll_pending)
    }

    /// True while a scroll notification is undelivered.
    pub fn has_pending_notification(&self) -> bool {
        self.scroll_pending
    }

    /// Current extent of a spacer.
    pub fn spacer_extent(&self, spacer: Spacer) -> f64 {
        self.slots
            .iter()
            .find(|slot| slot.matches(Anchor::Spacer(spacer)))
            .map(Slot::extent)
            .unwrap_or(0.0)
    }

    /// Number of mounted nodes (spacers excluded).
    pub fn node_count(&self) -> usize {
        self.slots
            .iter()
            .filter(|slot| matches!(slot, Slot::Node { .. }))
            .count()
    }

    /// Looks up a mounted node.
    pub fn node(&self, handle: NodeHandle) -> Option<&N> {
        self.slots.iter().find_map(|slot| match slot {
            Slot::Node { handle: h, node, .. } if *h == handle => Some(node),
            _ => None,
        })
    }

    /// Every mounted node in stack order, with viewport-relative placement.
    pub fn placed_nodes(&self) -> impl Iterator<Item = Placed<'_, N>> + '_ {
        let scroll = self.scroll_offset;
        self.slots
            .iter()
            .scan(0.0_f64, move |top, slot| {
                let start = *top;
                *top += slot.extent();
                Some((start - scroll, slot))
            })
            .filter_map(|(offset, slot)| match slot {
                Slot::Node {
                    handle,
                    node,
                    extent,
                } => Some(Placed {
                    handle: *handle,
                    offset,
                    extent: *extent,
                    node,
                }),
                Slot::Spacer { .. } => None,
            })
    }

    /// Nodes intersecting the visible region.
    pub fn visible_nodes(&self) -> impl Iterator<Item = Placed<'_, N>> + '_ {
        let bottom = self.viewport_extent;
        self.placed_nodes()
            .filter(move |placed| placed.offset + placed.extent > 0.0 && placed.offset < bottom)
    }

    fn position(&self, anchor: Anchor<NodeHandle>) -> usize {
        self.slots
            .iter()
            .position(|slot| slot.matches(anchor))
            .unwrap_or_else(|| panic!("anchor {anchor:?} is not mounted"))
    }

    fn absolute_top(&self, index: usize) -> f64 {
        self.slots[..index].iter().map(Slot::extent).sum()
    }

    fn mount(&mut self, index: usize, node: N) -> NodeHandle {
        let handle = NodeHandle(self.next_handle);
        self.next_handle += 1;
        let extent = node.measure().max(0.0) + self.item_margin;
        self.slots.insert(
            index,
            Slot::Node {
                handle,
                node,
                extent,
            },
        );
        handle
    }

    fn max_offset(&self) -> f64 {
        (self.scroll_extent() - self.viewport_extent).max(0.0)
    }

    fn clamp_offset(&self, offset: f64) -> f64 {
        if offset.is_nan() {
            return 0.0;
        }
        offset.clamp(0.0, self.max_offset())
    }

    fn move_offset(&mut self, offset: f64) {
        if offset != self.scroll_offset {
            self.scroll_offset = offset;
            self.scroll_pending = true;
        }
    }
}

fn empty_stack<N>() -> Vec<Slot<N>> {
    vec![
        Slot::Spacer {
            spacer: Spacer::Top,
            extent: 0.0,
        },
        Slot::Spacer {
            spacer: Spacer::Bottom,
            extent: 0.0,
        },
    ]
}

impl<N: Measure> Viewport for StackSurface<N> {
    fn scroll_offset(&self) -> f64 {
        self.scroll_offset
    }

    fn set_scroll_offset(&mut self, offset: f64) {
        let clamped = self.clamp_offset(offset);
        self.move_offset(clamped);
    }

    fn viewport_extent(&self) -> f64 {
        self.viewport_extent
    }

    fn scroll_extent(&self) -> f64 {
        self.slots.iter().map(Slot::extent).sum()
    }
}

impl<N: Measure> NodeTree for StackSurface<N> {
    type Node = N;
    type Handle = NodeHandle;

    /// Emptying the container snaps the offset back to zero without queueing
    /// a notification.
    fn clear(&mut self) {
        self.slots = empty_stack();
        self.scroll_offset = 0.0;
        self.scroll_pending = false;
    }

    fn insert_before(&mut self, node: N, anchor: Anchor<NodeHandle>) -> NodeHandle {
        let index = self.position(anchor);
        self.mount(index, node)
    }

    fn insert_after(&mut self, node: N, anchor: Anchor<NodeHandle>) -> NodeHandle {
        let index = self.position(anchor) + 1;
        self.mount(index, node)
    }

    fn remove(&mut self, handle: NodeHandle) {
        self.slots
            .retain(|slot| !matches!(slot, Slot::Node { handle: h, .. } if *h == handle));
    }

    fn extent(&self, handle: NodeHandle) -> f64 {
        self.slots[self.position(Anchor::Node(handle))].extent()
    }

    fn offset(&self, handle: NodeHandle) -> f64 {
        self.absolute_top(self.position(Anchor::Node(handle))) - self.scroll_offset
    }

    fn set_spacer_extent(&mut self, spacer: Spacer, extent: f64) {
        let index = self.position(Anchor::Spacer(spacer));
        if let Slot::Spacer { extent: current, .. } = &mut self.slots[index] {
            *current = extent.max(0.0);
        }
    }
}

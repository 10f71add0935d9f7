//! Display-layer collaborators consumed by the window controller.
//!
//! The controller never owns display nodes. It talks to the host through two
//! narrow capabilities:
//!
//! - [`Viewport`]: the scrollable region (offset, visible extent, total extent)
//! - [`NodeTree`]: insertion/removal/measurement of nodes between two spacers
//!
//! Anything implementing both is a [`Surface`]. Items are turned into nodes by
//! an [`ItemRenderer`], which the controller treats as an opaque pure function.
//!
//! # Units
//!
//! All extents and offsets are `f64` in whatever length unit the host uses
//! (pixels, terminal rows, ...). Extents always include margins and borders so
//! that spacer accounting matches each node's real contribution to the
//! scrollable range.

pub mod stack;

pub use stack::{Measure, NodeHandle, Placed, StackSurface};

use std::fmt::Debug;

/// One of the two sized placeholders bracketing the materialized window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Spacer {
    /// Stands in for every unmaterialized item above the window.
    Top,
    /// Stands in for every unmaterialized item below the window.
    Bottom,
}

/// Reference point for node insertion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Anchor<H> {
    /// One of the two spacers.
    Spacer(Spacer),
    /// A node previously inserted by the caller.
    Node(H),
}

/// The scrollable region hosting the list.
pub trait Viewport {
    /// Current scroll offset from the top of the scrollable content.
    fn scroll_offset(&self) -> f64;

    /// Programmatically move the scroll offset.
    ///
    /// Hosts may clamp the value; callers must re-read `scroll_offset()` to
    /// learn where the viewport actually ended up.
    fn set_scroll_offset(&mut self, offset: f64);

    /// Visible extent of the viewport.
    fn viewport_extent(&self) -> f64;

    /// Total scrollable extent (spacers plus every mounted node).
    fn scroll_extent(&self) -> f64;
}

/// Node insertion primitive owned by the display layer.
///
/// Handles are lookup keys only. The display layer owns node lifetime; the
/// controller merely asks for insertions and removals it issued itself.
pub trait NodeTree {
    /// Displayable node produced by an [`ItemRenderer`].
    type Node;

    /// Back-reference to a mounted node.
    type Handle: Copy + Eq + Debug;

    /// Drop every child and remount both spacers at zero extent.
    fn clear(&mut self);

    /// Mount `node` immediately before `anchor`.
    fn insert_before(&mut self, node: Self::Node, anchor: Anchor<Self::Handle>) -> Self::Handle;

    /// Mount `node` immediately after `anchor`.
    fn insert_after(&mut self, node: Self::Node, anchor: Anchor<Self::Handle>) -> Self::Handle;

    /// Unmount a node.
    fn remove(&mut self, handle: Self::Handle);

    /// Rendered extent of a mounted node, margins included.
    fn extent(&self, handle: Self::Handle) -> f64;

    /// Offset of a node's top edge relative to the viewport's top edge.
    ///
    /// Negative when the node starts above the visible region.
    fn offset(&self, handle: Self::Handle) -> f64;

    /// Resize one of the spacers.
    fn set_spacer_extent(&mut self, spacer: Spacer, extent: f64);
}

/// A display layer usable by the window controller.
pub trait Surface: Viewport + NodeTree {}

impl<S: Viewport + NodeTree> Surface for S {}

/// Render strategy: maps an item to a displayable node.
///
/// Implemented for every `Fn(&T) -> N`, so closures can be passed directly.
pub trait ItemRenderer<T, N> {
    /// Produce the node for `item`.
    fn render(&self, item: &T) -> N;
}

impl<T, N, F> ItemRenderer<T, N> for F
where
    F: Fn(&T) -> N,
{
    fn render(&self, item: &T) -> N {
        self(item)
    }
}

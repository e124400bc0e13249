#![forbid(unsafe_code)]

//! Host collaborators.
//!
//! The toast system owns lifecycle and coordination only. Everything that
//! touches an actual display goes through two traits the embedding host
//! implements:
//!
//! - [`Surface`]: the node tree. Creates and destroys the shared container,
//!   mounts rendered content into new nodes, reads and writes inline styles, measures
//!   node width, and resolves a point to the topmost node under it.
//! - [`Animator`]: "animate node N to style S over D, tell me when done".
//!
//! # Completion contract
//!
//! [`Animator::animate`] is fire-and-forget. The host must report completion
//! of every ticket it handed out exactly once, by calling
//! [`Toaster::animation_finished`](crate::toaster::Toaster::animation_finished),
//! unless the node was detached first, in which case the report is optional
//! and ignored. A host that drops a completion leaks the toast whose exit
//! animation it was: the toast stays in `Exiting` forever.

use std::fmt;

use ftoast_core::animation::{AnimationRequest, AnimationTicket, NodeStyle};
use ftoast_core::geometry::Point;

use crate::message::Markup;

/// Handle to a node mounted on the surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub u64);

/// Handle to the shared toast container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ContainerId(pub u64);

/// Errors a [`Surface`] may report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SurfaceError {
    /// The container handle no longer refers to a live container.
    ContainerUnavailable(ContainerId),
    /// The host refused to create a node for the rendered content.
    MountRejected(String),
}

impl fmt::Display for SurfaceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ContainerUnavailable(id) => write!(f, "toast container {} is not available", id.0),
            Self::MountRejected(reason) => write!(f, "surface rejected toast node: {reason}"),
        }
    }
}

impl std::error::Error for SurfaceError {}

/// The node tree toasts render into.
pub trait Surface {
    /// Create the shared container toasts are appended to.
    fn create_container(&mut self) -> ContainerId;

    /// Destroy the shared container.
    fn destroy_container(&mut self, container: ContainerId);

    /// Append a node holding `content` to `container`, tagged with `classes`.
    fn mount(
        &mut self,
        container: ContainerId,
        content: &Markup,
        classes: &[String],
    ) -> Result<NodeId, SurfaceError>;

    /// Remove a node from the tree.
    fn detach(&mut self, node: NodeId);

    /// Replace the node's inline style.
    fn set_style(&mut self, node: NodeId, style: &NodeStyle);

    /// The node's current inline style, including values an in-flight
    /// animation has written. Unknown nodes report an empty style.
    fn node_style(&self, node: NodeId) -> NodeStyle;

    /// Current rendered width of the node in pixels.
    fn node_width(&self, node: NodeId) -> f32;

    /// Topmost node under `point`, if any.
    fn hit_test(&self, point: Point) -> Option<NodeId>;
}

/// Host animation engine.
pub trait Animator {
    /// Start animating `node` towards `request.target`.
    fn animate(&mut self, node: NodeId, request: AnimationRequest) -> AnimationTicket;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn surface_error_display() {
        assert_eq!(
            SurfaceError::ContainerUnavailable(ContainerId(4)).to_string(),
            "toast container 4 is not available"
        );
        assert_eq!(
            SurfaceError::MountRejected("detached document".into()).to_string(),
            "surface rejected toast node: detached document"
        );
    }
}

#![forbid(unsafe_code)]

//! Minimal in-memory host used by unit tests.
//!
//! Every node occupies the same 300x50 box at the origin, so the most
//! recently mounted live node is the topmost hit.

use ftoast_core::animation::{AnimationRequest, AnimationTicket, NodeStyle};
use ftoast_core::geometry::{Point, Rect};

use crate::host::{Animator, ContainerId, NodeId, Surface, SurfaceError};
use crate::message::Markup;

pub(crate) const NODE_BOX: Rect = Rect::new(0.0, 0.0, 300.0, 50.0);

#[derive(Debug, Clone)]
pub(crate) struct FakeNode {
    pub id: NodeId,
    pub content: Markup,
    pub classes: Vec<String>,
    pub style: NodeStyle,
    pub detached: bool,
}

#[derive(Debug, Default)]
pub(crate) struct FakeSurface {
    pub containers_created: u64,
    pub containers_destroyed: u64,
    pub reject_mounts: bool,
    pub nodes: Vec<FakeNode>,
    pub detached: Vec<NodeId>,
}

impl FakeSurface {
    pub fn node(&self, id: NodeId) -> Option<&FakeNode> {
        self.nodes.iter().find(|n| n.id == id)
    }
}

impl Surface for FakeSurface {
    fn create_container(&mut self) -> ContainerId {
        self.containers_created += 1;
        ContainerId(self.containers_created)
    }

    fn destroy_container(&mut self, _container: ContainerId) {
        self.containers_destroyed += 1;
    }

    fn mount(
        &mut self,
        _container: ContainerId,
        content: &Markup,
        classes: &[String],
    ) -> Result<NodeId, SurfaceError> {
        if self.reject_mounts {
            return Err(SurfaceError::MountRejected("test surface".into()));
        }
        let id = NodeId(self.nodes.len() as u64 + 1);
        self.nodes.push(FakeNode {
            id,
            content: content.clone(),
            classes: classes.to_vec(),
            style: NodeStyle::new(),
            detached: false,
        });
        Ok(id)
    }

    fn detach(&mut self, node: NodeId) {
        if let Some(n) = self.nodes.iter_mut().find(|n| n.id == node) {
            n.detached = true;
        }
        self.detached.push(node);
    }

    fn set_style(&mut self, node: NodeId, style: &NodeStyle) {
        if let Some(n) = self.nodes.iter_mut().find(|n| n.id == node) {
            n.style = *style;
        }
    }

    fn node_style(&self, node: NodeId) -> NodeStyle {
        self.node(node).map(|n| n.style).unwrap_or_default()
    }

    fn node_width(&self, _node: NodeId) -> f32 {
        NODE_BOX.width
    }

    fn hit_test(&self, point: Point) -> Option<NodeId> {
        if !NODE_BOX.contains(point) {
            return None;
        }
        self.nodes.iter().rev().find(|n| !n.detached).map(|n| n.id)
    }
}

#[derive(Debug, Default)]
pub(crate) struct FakeAnimator {
    next: u64,
    pub requests: Vec<(NodeId, AnimationRequest)>,
    pending: Vec<AnimationTicket>,
}

impl FakeAnimator {
    /// Tickets handed out since the last drain, in order.
    pub fn drain(&mut self) -> Vec<AnimationTicket> {
        std::mem::take(&mut self.pending)
    }
}

impl Animator for FakeAnimator {
    fn animate(&mut self, node: NodeId, request: AnimationRequest) -> AnimationTicket {
        self.next += 1;
        let ticket = AnimationTicket(self.next);
        self.requests.push((node, request));
        self.pending.push(ticket);
        ticket
    }
}

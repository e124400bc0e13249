#![forbid(unsafe_code)]

//! In-memory node tree with stacking layout and z-ordered hit testing.
//!
//! [`SimSurface`] lays toasts out top to bottom in mount order, the way the
//! toast container's stylesheet would: each live node takes a slot of
//! `node_height + gap`, shifted by its own `top` and `margin_top` and
//! horizontally by `translate_x`. A negative `margin_top` therefore pulls the
//! nodes below it upwards as the exit animation collapses its slot.
//!
//! # Invariants
//!
//! 1. Hit tests return the topmost live node under the point: the node
//!    mounted last wins where boxes overlap.
//! 2. Detached nodes and nodes of a destroyed container are never hit.
//! 3. Every mutation is appended to the [`SurfaceOp`] journal.

use ftoast_core::animation::NodeStyle;
use ftoast_core::geometry::{Point, Rect};
use ftoast_widgets::{ContainerId, Markup, NodeId, Surface, SurfaceError};

/// Layout of the simulated container.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceLayout {
    /// Top-left corner of the container.
    pub origin: Point,
    /// Width of every toast node, px.
    pub node_width: f32,
    /// Height of every toast node, px.
    pub node_height: f32,
    /// Vertical gap between nodes, px.
    pub gap: f32,
}

impl Default for SurfaceLayout {
    fn default() -> Self {
        Self {
            origin: Point::new(20.0, 20.0),
            node_width: 300.0,
            node_height: 48.0,
            gap: 10.0,
        }
    }
}

/// One entry of the surface journal.
#[derive(Debug, Clone, PartialEq)]
pub enum SurfaceOp {
    /// A container was created.
    CreateContainer(ContainerId),
    /// A container was destroyed.
    DestroyContainer(ContainerId),
    /// A node was mounted.
    Mount(NodeId),
    /// A mount was refused.
    MountFailed(SurfaceError),
    /// A node was detached.
    Detach(NodeId),
    /// A node's inline style was replaced.
    SetStyle(NodeId, NodeStyle),
}

/// A node mounted on the simulated surface.
#[derive(Debug, Clone, PartialEq)]
pub struct SimNode {
    /// Node handle.
    pub id: NodeId,
    /// Container it was mounted into.
    pub container: ContainerId,
    /// Rendered content.
    pub content: Markup,
    /// Classes, base class first.
    pub classes: Vec<String>,
    /// Current inline style.
    pub style: NodeStyle,
    /// Whether the node is still in the tree.
    pub attached: bool,
}

impl SimNode {
    /// Whether the node carries `class`.
    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }
}

/// Simulated host surface.
#[derive(Debug, Default)]
pub struct SimSurface {
    layout: SurfaceLayout,
    container: Option<ContainerId>,
    next_container: u64,
    nodes: Vec<SimNode>,
    journal: Vec<SurfaceOp>,
    reject_next_mount: Option<String>,
}

impl SimSurface {
    /// Surface with the default layout.
    pub fn new() -> Self {
        Self::default()
    }

    /// Surface with an explicit layout.
    pub fn with_layout(layout: SurfaceLayout) -> Self {
        Self {
            layout,
            ..Self::default()
        }
    }

    /// Container layout.
    pub fn layout(&self) -> &SurfaceLayout {
        &self.layout
    }

    /// Live container, if any.
    pub fn container(&self) -> Option<ContainerId> {
        self.container
    }

    /// Refuse the next mount with `reason`.
    pub fn reject_next_mount(&mut self, reason: impl Into<String>) {
        self.reject_next_mount = Some(reason.into());
    }

    /// Every node ever mounted, including detached ones.
    pub fn all_nodes(&self) -> &[SimNode] {
        &self.nodes
    }

    /// Nodes still in the tree, in mount order.
    pub fn live_nodes(&self) -> impl Iterator<Item = &SimNode> {
        self.nodes.iter().filter(|n| n.attached)
    }

    /// Look up a node, attached or not.
    pub fn node(&self, id: NodeId) -> Option<&SimNode> {
        self.nodes.iter().find(|n| n.id == id)
    }

    /// Mutation journal.
    pub fn journal(&self) -> &[SurfaceOp] {
        &self.journal
    }

    /// Count journal entries matching `pred`.
    pub fn count_ops(&self, pred: impl Fn(&SurfaceOp) -> bool) -> usize {
        self.journal.iter().filter(|op| pred(op)).count()
    }

    /// Current box of a live node.
    pub fn bounds(&self, id: NodeId) -> Option<Rect> {
        let mut y = self.layout.origin.y;
        for node in self.live_nodes() {
            let margin = node.style.margin_top.unwrap_or(0.0);
            let top = node.style.top.unwrap_or(0.0);
            let slot_y = y + margin;
            if node.id == id {
                let x = self.layout.origin.x + node.style.translate_x.unwrap_or(0.0);
                return Some(Rect::new(
                    x,
                    slot_y + top,
                    self.layout.node_width,
                    self.layout.node_height,
                ));
            }
            y = slot_y + self.layout.node_height + self.layout.gap;
        }
        None
    }

    /// Centre of a live node's box.
    pub fn center(&self, id: NodeId) -> Option<Point> {
        self.bounds(id).map(|r| {
            Point::new(r.x + r.width / 2.0, r.y + r.height / 2.0)
        })
    }

    /// Overlay an animated style on the node's current inline style.
    ///
    /// Unlike [`Surface::set_style`] this keeps properties the animation does
    /// not touch. Returns `false` if the node is gone.
    pub fn apply_animated(&mut self, id: NodeId, style: &NodeStyle) -> bool {
        match self.nodes.iter_mut().find(|n| n.id == id && n.attached) {
            Some(node) => {
                node.style = node.style.merged(style);
                true
            }
            None => false,
        }
    }

    /// Current inline style of a live node.
    pub fn style(&self, id: NodeId) -> Option<NodeStyle> {
        self.nodes
            .iter()
            .find(|n| n.id == id && n.attached)
            .map(|n| n.style)
    }
}

impl Surface for SimSurface {
    fn create_container(&mut self) -> ContainerId {
        self.next_container += 1;
        let id = ContainerId(self.next_container);
        self.container = Some(id);
        self.journal.push(SurfaceOp::CreateContainer(id));
        id
    }

    fn destroy_container(&mut self, container: ContainerId) {
        if self.container == Some(container) {
            self.container = None;
        }
        for node in self.nodes.iter_mut().filter(|n| n.container == container) {
            node.attached = false;
        }
        self.journal.push(SurfaceOp::DestroyContainer(container));
    }

    fn mount(
        &mut self,
        container: ContainerId,
        content: &Markup,
        classes: &[String],
    ) -> Result<NodeId, SurfaceError> {
        let refusal = if let Some(reason) = self.reject_next_mount.take() {
            Some(SurfaceError::MountRejected(reason))
        } else if self.container != Some(container) {
            Some(SurfaceError::ContainerUnavailable(container))
        } else {
            None
        };
        if let Some(err) = refusal {
            self.journal.push(SurfaceOp::MountFailed(err.clone()));
            return Err(err);
        }

        let id = NodeId(self.nodes.len() as u64 + 1);
        self.nodes.push(SimNode {
            id,
            container,
            content: content.clone(),
            classes: classes.to_vec(),
            style: NodeStyle::new(),
            attached: true,
        });
        self.journal.push(SurfaceOp::Mount(id));
        Ok(id)
    }

    fn detach(&mut self, node: NodeId) {
        if let Some(n) = self.nodes.iter_mut().find(|n| n.id == node) {
            n.attached = false;
        }
        self.journal.push(SurfaceOp::Detach(node));
    }

    fn set_style(&mut self, node: NodeId, style: &NodeStyle) {
        if let Some(n) = self.nodes.iter_mut().find(|n| n.id == node && n.attached) {
            n.style = *style;
        }
        self.journal.push(SurfaceOp::SetStyle(node, *style));
    }

    fn node_style(&self, node: NodeId) -> NodeStyle {
        self.style(node).unwrap_or_default()
    }

    fn node_width(&self, node: NodeId) -> f32 {
        if self.node(node).is_some_and(|n| n.attached) {
            self.layout.node_width
        } else {
            0.0
        }
    }

    fn hit_test(&self, point: Point) -> Option<NodeId> {
        self.live_nodes()
            .filter(|n| self.bounds(n.id).is_some_and(|r| r.contains(point)))
            .last()
            .map(|n| n.id)
    }
}

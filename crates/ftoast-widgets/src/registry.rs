#![forbid(unsafe_code)]

//! Shared container bookkeeping.
//!
//! All toasts of a toaster live in one container node. The registry counts
//! live toasts (active or exiting), creates the container when the count goes
//! from zero to one and destroys it when the count returns to zero. It also
//! holds the single drag binding: which toast, if any, the in-progress gesture
//! belongs to.
//!
//! # Invariants
//!
//! - `container().is_some() == (live_count() > 0)`
//! - at most one toast is bound to the gesture at any instant

use crate::host::{ContainerId, Surface};
use crate::toast::ToastId;

/// Live toast count, container handle and drag binding.
#[derive(Debug, Default)]
pub struct ContainerRegistry {
    live: usize,
    container: Option<ContainerId>,
    dragged: Option<ToastId>,
}

impl ContainerRegistry {
    /// Empty registry: no toasts, no container, no binding.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register one more live toast, creating the container on the first.
    ///
    /// Returns the container the toast should be mounted into.
    pub fn acquire<S: Surface + ?Sized>(&mut self, surface: &mut S) -> ContainerId {
        let container = match self.container {
            Some(container) => container,
            None => {
                let container = surface.create_container();
                ftoast_core::debug!(container = container.0, "toast container created");
                self.container = Some(container);
                container
            }
        };
        self.live += 1;
        container
    }

    /// Unregister one live toast, destroying the container after the last.
    ///
    /// Releasing with nothing live is a no-op.
    pub fn release<S: Surface + ?Sized>(&mut self, surface: &mut S) {
        if self.live == 0 {
            ftoast_core::warn!("toast registry release with no live toasts");
            return;
        }
        self.live -= 1;
        if self.live == 0 {
            self.teardown(surface);
        }
    }

    fn teardown<S: Surface + ?Sized>(&mut self, surface: &mut S) {
        match self.container.take() {
            Some(container) => {
                surface.destroy_container(container);
                ftoast_core::debug!(container = container.0, "toast container destroyed");
            }
            None => ftoast_core::warn!("toast container already torn down"),
        }
        if let Some(id) = self.dragged.take() {
            ftoast_core::warn!(toast = id.0, "drag binding outlived the container");
        }
    }

    /// Number of toasts that are active or exiting.
    pub fn live_count(&self) -> usize {
        self.live
    }

    /// The shared container, present iff any toast is live.
    pub fn container(&self) -> Option<ContainerId> {
        self.container
    }

    /// Whether the shared container exists.
    pub fn has_container(&self) -> bool {
        self.container.is_some()
    }

    /// Bind the in-progress gesture to `toast`.
    ///
    /// Returns `false` (and changes nothing) if another toast is bound.
    pub fn bind_drag(&mut self, toast: ToastId) -> bool {
        match self.dragged {
            Some(current) if current != toast => {
                ftoast_core::debug!(
                    toast = toast.0,
                    bound = current.0,
                    "drag bind refused: another toast is bound"
                );
                false
            }
            _ => {
                self.dragged = Some(toast);
                true
            }
        }
    }

    /// Clear the drag binding, returning the toast that was bound.
    pub fn unbind_drag(&mut self) -> Option<ToastId> {
        self.dragged.take()
    }

    /// Toast bound to the in-progress gesture.
    pub fn dragged_toast(&self) -> Option<ToastId> {
        self.dragged
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::FakeSurface;

    #[test]
    fn container_created_on_first_and_reused() {
        let mut surface = FakeSurface::default();
        let mut reg = ContainerRegistry::new();
        let a = reg.acquire(&mut surface);
        let b = reg.acquire(&mut surface);
        assert_eq!(a, b);
        assert_eq!(surface.containers_created, 1);
        assert_eq!(reg.live_count(), 2);
        assert!(reg.has_container());
    }

    #[test]
    fn container_destroyed_at_zero() {
        let mut surface = FakeSurface::default();
        let mut reg = ContainerRegistry::new();
        reg.acquire(&mut surface);
        reg.acquire(&mut surface);
        reg.release(&mut surface);
        assert!(reg.has_container());
        reg.release(&mut surface);
        assert!(!reg.has_container());
        assert_eq!(surface.containers_destroyed, 1);
    }

    #[test]
    fn release_at_zero_is_noop() {
        let mut surface = FakeSurface::default();
        let mut reg = ContainerRegistry::new();
        reg.release(&mut surface);
        assert_eq!(reg.live_count(), 0);
        assert_eq!(surface.containers_destroyed, 0);
    }

    #[test]
    fn recreated_after_teardown() {
        let mut surface = FakeSurface::default();
        let mut reg = ContainerRegistry::new();
        let first = reg.acquire(&mut surface);
        reg.release(&mut surface);
        let second = reg.acquire(&mut surface);
        assert_ne!(first, second);
        assert_eq!(surface.containers_created, 2);
    }

    #[test]
    fn single_drag_binding() {
        let mut reg = ContainerRegistry::new();
        assert!(reg.bind_drag(ToastId(1)));
        assert!(reg.bind_drag(ToastId(1)));
        assert!(!reg.bind_drag(ToastId(2)));
        assert_eq!(reg.dragged_toast(), Some(ToastId(1)));
        assert_eq!(reg.unbind_drag(), Some(ToastId(1)));
        assert_eq!(reg.unbind_drag(), None);
        assert!(reg.bind_drag(ToastId(2)));
    }
}

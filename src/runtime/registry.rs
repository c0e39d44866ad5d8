//! Guard-owned registrations for frame loops and input listeners.
//!
//! A [`Subscription`] only flips a shared liveness flag when dropped; the owning [`Registry`]
//! prunes dead slots before every pass. A slot whose guard is gone is therefore never visited
//! again, even when the guard is dropped from inside a callback of the same pass.
//!
//! Slots hold weak handles. The mount owner keeps the only strong one, so dropping it frees
//! the controller right away instead of at the next prune.

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use crate::runtime::stage::View;

/// Unique identifier of one registration.
pub type SubId = u64;

/// Shared handle to a mounted controller.
pub(crate) type ViewCell = Rc<RefCell<dyn View>>;

/// Registration guard. Dropping it unregisters the slot.
#[derive(Debug)]
pub struct Subscription {
    id: SubId,
    alive: Rc<Cell<bool>>,
}

impl Subscription {
    /// Registration id.
    pub fn id(&self) -> SubId {
        self.id
    }

    /// Return `true` until the guard is dropped.
    pub fn is_active(&self) -> bool {
        self.alive.get()
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.alive.set(false);
    }
}

struct Slot {
    id: SubId,
    alive: Rc<Cell<bool>>,
    view: Weak<RefCell<dyn View>>,
}

impl Slot {
    fn is_live(&self) -> bool {
        self.alive.get() && self.view.strong_count() > 0
    }
}

/// Ordered set of live registrations.
#[derive(Default)]
pub(crate) struct Registry {
    slots: Vec<Slot>,
    next_id: SubId,
}

impl std::fmt::Debug for Registry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Registry")
            .field("slots", &self.slots.iter().map(|s| s.id).collect::<Vec<_>>())
            .field("next_id", &self.next_id)
            .finish()
    }
}

impl Registry {
    /// Register `view` without taking ownership of it.
    pub(crate) fn register(&mut self, view: &ViewCell) -> Subscription {
        let id = self.next_id;
        self.next_id += 1;
        let alive = Rc::new(Cell::new(true));
        self.slots.push(Slot {
            id,
            alive: Rc::clone(&alive),
            view: Rc::downgrade(view),
        });
        Subscription { id, alive }
    }

    /// Drop slots whose guard or view is gone. Returns how many were removed.
    pub(crate) fn prune(&mut self) -> usize {
        let before = self.slots.len();
        self.slots.retain(Slot::is_live);
        let removed = before - self.slots.len();
        if removed > 0 {
            tracing::debug!(removed, remaining = self.slots.len(), "pruned registrations");
        }
        removed
    }

    /// Number of live registrations.
    pub(crate) fn len(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_live()).count()
    }

    /// Visit live views in registration order.
    ///
    /// Liveness is re-checked right before each visit. A view that is already borrowed
    /// elsewhere is skipped for this pass.
    pub(crate) fn for_each_live<E>(
        &mut self,
        mut f: impl FnMut(SubId, &mut dyn View) -> Result<(), E>,
    ) -> Result<(), E> {
        self.prune();
        for slot in &self.slots {
            if !slot.alive.get() {
                continue;
            }
            let Some(view) = slot.view.upgrade() else {
                continue;
            };
            let Ok(mut view) = view.try_borrow_mut() else {
                tracing::warn!(id = slot.id, "view busy; skipped this pass");
                continue;
            };
            f(slot.id, &mut *view)?;
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/runtime/registry.rs"]
mod tests;

//! Change notification.
//!
//! Both the [`Manifest`](crate::Manifest) and the [`Mod`](crate::Mod) report
//! changes through a [`ModificationCallback`]. The callback is invoked
//! synchronously, after all changes of one operation are complete and before the
//! operation returns.

use resmod_resource::ResourceId;
use std::rc::Rc;

/// Observer of resource modifications.
///
/// Closures of the shape `Fn(&[ResourceId], &[ResourceId])` implement this trait.
///
/// # Reentrancy
///
/// Callbacks must not modify the object that notified them. All mutating
/// operations take `&mut self`, so a callback can only reach its origin through
/// a shared wrapper such as `Rc<RefCell<_>>`; that wrapper is already mutably
/// borrowed while the notification runs, and an attempt to reenter panics with
/// a borrow error instead of corrupting state.
pub trait ModificationCallback {
    /// `modified_ids` lists the resources whose effective content changed,
    /// `failed_ids` the resources whose modification could not be applied.
    fn resources_modified(&self, modified_ids: &[ResourceId], failed_ids: &[ResourceId]);
}

impl<F> ModificationCallback for F
where
    F: Fn(&[ResourceId], &[ResourceId]),
{
    fn resources_modified(&self, modified_ids: &[ResourceId], failed_ids: &[ResourceId]) {
        self(modified_ids, failed_ids)
    }
}

/// Shared handle to a callback.
pub type SharedCallback = Rc<dyn ModificationCallback>;

/// Invoked after a mod was reset to new content.
pub type ResetCallback = Rc<dyn Fn()>;

pub(crate) fn notify(
    callback: &Option<SharedCallback>,
    modified_ids: &[ResourceId],
    failed_ids: &[ResourceId],
) {
    if let Some(callback) = callback {
        callback.resources_modified(modified_ids, failed_ids);
    }
}

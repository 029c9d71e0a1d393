//! Shared traits and lookup helpers for entities stored in the ledger.

use uuid::Uuid;

/// Stable identifier shared by every entity a ledger stores.
pub trait Identifiable {
    fn id(&self) -> Uuid;
}

/// Renders an entity as a short user-facing label.
pub trait Displayable {
    fn display_label(&self) -> String;
}

/// Finds an entity by its stable identifier.
pub fn find_by_id<T: Identifiable>(items: &[T], id: Uuid) -> Option<&T> {
    items.iter().find(|item| item.id() == id)
}

pub fn find_by_id_mut<T: Identifiable>(items: &mut [T], id: Uuid) -> Option<&mut T> {
    items.iter_mut().find(|item| item.id() == id)
}

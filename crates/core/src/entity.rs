//! Entity trait: identity that survives in-place edits.

/// Anything addressed by a stable handle rather than by its field values.
///
/// A row keeps its identity while the user rewrites every one of its cells.
pub trait Entity {
    type Id: Copy + Eq + core::hash::Hash + core::fmt::Debug;

    fn id(&self) -> Self::Id;
}

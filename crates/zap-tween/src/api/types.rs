use serde::{Deserialize, Serialize};

/// Identifier of an entity slot in a [`TweenStore`](crate::core::store::TweenStore).
///
/// The host picks the values; the store only uses them as lookup keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EntityId(pub u32);

impl std::fmt::Display for EntityId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

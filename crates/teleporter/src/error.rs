//! Teleport error types.

use engine_component::Entity;

/// Reasons a teleport did not happen.
///
/// None of these are fatal: the traveler is left exactly where it was.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TeleportError {
    /// The teleporter has no destination configured.
    #[error("teleporter {teleporter} has no destination set")]
    DestinationUnset { teleporter: Entity },

    /// The overlap was reported against an entity that is not a teleporter.
    #[error("{0} is not a teleporter")]
    NotATeleporter(Entity),

    /// A teleporter, destination or traveler has no transform to read or
    /// write.
    #[error("{0} has no transform")]
    MissingTransform(Entity),
}

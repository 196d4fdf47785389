/// Entity identifiers are opaque strings (UUID v4 in practice).
pub type EntityId = String;

/// Generate a fresh, globally unique entity id.
pub fn new_entity_id() -> EntityId {
    uuid::Uuid::new_v4().to_string()
}

//! Identifier generation
//!
//! Columns and cards get opaque string IDs. The default generator encodes a
//! random UUID with base58, which keeps IDs short enough to type on the
//! command line while staying collision-resistant.

use uuid::Uuid;

/// Source of fresh identifiers
pub trait IdGenerator {
    /// Produce an identifier not returned before by this generator
    fn next_id(&mut self) -> String;
}

/// Random base58-encoded UUIDv4 identifiers
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomIds;

impl IdGenerator for RandomIds {
    fn next_id(&mut self) -> String {
        bs58::encode(Uuid::new_v4().as_bytes()).into_string()
    }
}

/// Deterministic `<prefix>-<n>` identifiers
///
/// Useful for fixtures and tests where IDs need to be predictable.
#[derive(Debug, Clone)]
pub struct SequentialIds {
    prefix: String,
    next: u64,
}

impl SequentialIds {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            next: 1,
        }
    }
}

impl IdGenerator for SequentialIds {
    fn next_id(&mut self) -> String {
        let id = format!("{}-{}", self.prefix, self.next);
        self.next += 1;
        id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_random_ids_are_unique() {
        let mut ids = RandomIds;
        let generated: HashSet<String> = (0..1000).map(|_| ids.next_id()).collect();
        assert_eq!(generated.len(), 1000);
    }

    #[test]
    fn test_random_id_is_base58() {
        let id = RandomIds.next_id();
        let decoded = bs58::decode(&id).into_vec().unwrap();
        assert_eq!(decoded.len(), 16);
    }

    #[test]
    fn test_sequential_ids() {
        let mut ids = SequentialIds::new("card");
        assert_eq!(ids.next_id(), "card-1");
        assert_eq!(ids.next_id(), "card-2");
        assert_eq!(ids.next_id(), "card-3");
    }
}

use rand::distributions::Alphanumeric;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::sync::atomic::{AtomicU64, Ordering};

const RANDOM_PART_LENGTH: usize = 10;

static NEXT_SEQUENCE: AtomicU64 = AtomicU64::new(0);

/// Identifier of a single property pane node, assigned at registration.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PropertyConfigId(String);

impl PropertyConfigId {
    /// Random characters keep keys opaque, the sequence number keeps them distinct.
    pub fn generate() -> Self {
        let random_part: String = rand::thread_rng()
            .sample_iter(&Alphanumeric)
            .take(RANDOM_PART_LENGTH)
            .map(char::from)
            .collect();
        let sequence = NEXT_SEQUENCE.fetch_add(1, Ordering::Relaxed);
        Self(format!("{}{:x}", random_part.to_lowercase(), sequence))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for PropertyConfigId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::PropertyConfigId;
    use std::collections::HashSet;

    #[test]
    fn generated_ids_are_distinct() {
        let ids: HashSet<_> = (0..1000).map(|_| PropertyConfigId::generate()).collect();
        assert_eq!(1000, ids.len());
    }

    #[test]
    fn generated_ids_are_alphanumeric() {
        let id = PropertyConfigId::generate();
        assert!(id.as_str().len() > 10);
        assert!(id.as_str().chars().all(|c| c.is_ascii_alphanumeric()));
    }
}

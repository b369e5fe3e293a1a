//! Item id generation
//!
//! Ids are a millisecond timestamp followed by a random base-36 suffix.

use std::collections::HashSet;

use rand::Rng;

use crate::domain::{IdSource, Snapshot};

const SUFFIX_LEN: usize = 9;
const BASE36: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Session-scoped id generator
///
/// Remembers every id it has issued so a later id can never repeat one,
/// even after the item holding it was deleted.
#[derive(Debug, Default)]
pub struct IdGenerator {
    issued: HashSet<String>,
}

impl IdGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn issued_count(&self) -> usize {
        self.issued.len()
    }

    fn candidate() -> String {
        let millis = chrono::Utc::now().timestamp_millis();
        let mut rng = rand::thread_rng();
        let suffix: String = (0..SUFFIX_LEN)
            .map(|_| BASE36[rng.gen_range(0..BASE36.len())] as char)
            .collect();
        format!("{}{}", millis, suffix)
    }
}

impl IdSource for IdGenerator {
    fn generate_id(&mut self, snapshot: &Snapshot) -> String {
        loop {
            let id = Self::candidate();
            if self.issued.contains(&id) || snapshot.contains_id(&id) {
                continue;
            }
            self.issued.insert(id.clone());
            return id;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_are_unique_and_shaped() {
        let mut ids = IdGenerator::new();
        let snapshot = Snapshot::default();
        let generated: HashSet<String> = (0..500).map(|_| ids.generate_id(&snapshot)).collect();

        assert_eq!(generated.len(), 500);
        assert_eq!(ids.issued_count(), 500);
        for id in &generated {
            let (prefix, suffix) = id.split_at(id.len() - SUFFIX_LEN);
            assert!(prefix.chars().all(|c| c.is_ascii_digit()));
            assert!(suffix.chars().all(|c| c.is_ascii_digit() || c.is_ascii_lowercase()));
        }
    }
}

pub use crate::config::*;

/// A builder for assembling the pool of participants.
///
/// Aliases are unique across the pool; adding the same alias twice is a
/// configuration error and fails immediately.
pub struct PoolBuilder {
    entries: Vec<(String, Entry)>,
}

impl PoolBuilder {
    pub fn new() -> PoolBuilder {
        PoolBuilder {
            entries: Vec::new(),
        }
    }

    /// Adds one participant's prediction pair under the given alias.
    pub fn add_entry(&mut self, alias: &str, entry: Entry) -> Result<(), ScoringError> {
        if self.entries.iter().any(|(existing, _)| existing == alias) {
            return Err(ScoringError::DuplicateAlias(alias.to_string()));
        }
        self.entries.push((alias.to_string(), entry));
        Ok(())
    }

    /// Finalizes the pool. Entries are sorted case-insensitively by alias so
    /// that the evaluation order (and hence tie order) is deterministic.
    pub fn build(mut self) -> Pool {
        self.entries.sort_by_key(|(alias, _)| alias.to_lowercase());
        Pool {
            entries: self.entries,
        }
    }
}

impl Default for PoolBuilder {
    fn default() -> Self {
        PoolBuilder::new()
    }
}

/// All loaded participants, in case-insensitive alias order.
#[derive(Debug, Clone)]
pub struct Pool {
    entries: Vec<(String, Entry)>,
}

impl Pool {
    pub fn entries(&self) -> &[(String, Entry)] {
        &self.entries
    }

    pub fn get(&self, alias: &str) -> Option<&Entry> {
        self.entries
            .iter()
            .find(|(a, _)| a == alias)
            .map(|(_, e)| e)
    }
}

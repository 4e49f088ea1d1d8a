//! Pools of containers waiting to be reused.

use indexmap::IndexMap;
use tiffin_core::Container;

/// Hands out containers by reuse identifier.
pub trait ReusePool {
    /// A free container for `reuse_identifier`, or a fresh one.
    fn dequeue(&mut self, reuse_identifier: &str) -> Container;

    /// Takes a container back. It may be handed out for any later row with
    /// the same reuse identifier.
    fn enqueue(&mut self, container: Container);
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ReuseStats {
    pub created: usize,
    pub reused: usize,
    pub enqueued: usize,
}

/// In-memory pool keyed by reuse identifier, newest container first.
#[derive(Debug, Default)]
pub struct MemoryReusePool {
    free: IndexMap<String, Vec<Container>>,
    stats: ReuseStats,
}

impl MemoryReusePool {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stats(&self) -> ReuseStats {
        self.stats
    }

    pub fn free_count(&self, reuse_identifier: &str) -> usize {
        self.free.get(reuse_identifier).map_or(0, Vec::len)
    }

    pub fn total_free(&self) -> usize {
        self.free.values().map(Vec::len).sum()
    }

    pub fn reuse_identifiers(&self) -> impl Iterator<Item = &str> {
        self.free.keys().map(String::as_str)
    }

    pub fn clear(&mut self) {
        self.free.clear();
    }
}

impl ReusePool for MemoryReusePool {
    fn dequeue(&mut self, reuse_identifier: &str) -> Container {
        match self
            .free
            .get_mut(reuse_identifier)
            .and_then(|queue| queue.pop())
        {
            Some(container) => {
                self.stats.reused += 1;
                container
            }
            None => {
                self.stats.created += 1;
                Container::new(reuse_identifier)
            }
        }
    }

    fn enqueue(&mut self, mut container: Container) {
        container.unbind();
        self.stats.enqueued += 1;
        self.free
            .entry(container.reuse_identifier().to_string())
            .or_default()
            .push(container);
    }
}

#[cfg(test)]
#[path = "tests/reuse_pool_tests.rs"]
mod tests;

//! Call-site memoization for repeated sweeps over the same model inputs.

use drawodds_core::query::ProbabilityQuery;
use std::collections::{HashMap, VecDeque};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub entries: usize,
}

/// Stores model results keyed by the clamped query, evicting oldest first.
#[derive(Debug)]
pub struct ProbabilityCache {
    entries: HashMap<ProbabilityQuery, f64>,
    order: VecDeque<ProbabilityQuery>,
    capacity: usize,
    hits: u64,
    misses: u64,
}

impl ProbabilityCache {
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: HashMap::new(),
            order: VecDeque::new(),
            capacity,
            hits: 0,
            misses: 0,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn get(&self, query: &ProbabilityQuery) -> Option<f64> {
        self.entries.get(&query.clamped()).copied()
    }

    /// Cached probability for `query`, evaluating the model on a miss.
    pub fn probability(&mut self, query: ProbabilityQuery) -> f64 {
        let key = query.clamped();
        if let Some(value) = self.entries.get(&key) {
            self.hits += 1;
            return *value;
        }

        self.misses += 1;
        let value = key.evaluate().probability;
        self.insert(key, value);
        value
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.hits,
            misses: self.misses,
            entries: self.entries.len(),
        }
    }

    fn insert(&mut self, key: ProbabilityQuery, value: f64) {
        if self.capacity == 0 {
            return;
        }
        if self.entries.insert(key, value).is_none() {
            self.order.push_back(key);
        }
        self.evict_if_needed();
    }

    fn evict_if_needed(&mut self) {
        while self.capacity > 0 && self.order.len() > self.capacity {
            if let Some(oldest) = self.order.pop_front() {
                self.entries.remove(&oldest);
            }
        }
    }
}

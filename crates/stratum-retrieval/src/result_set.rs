//! Bounded best-of result set with threshold-gated replacement.
//!
//! `top_k` is small (single digits in practice), so members live in a plain
//! `Vec` and the weakest member is found by linear scan.

use stratum_core::models::Match;

/// Outcome of offering one candidate to the set.
#[derive(Debug, Clone, PartialEq)]
pub enum Admission {
    /// The set had room.
    Admitted,
    /// The candidate displaced the weakest member.
    Replaced { evicted: Match },
    /// A member with the same id is already present.
    Duplicate,
    /// The set is full and the replacement rule did not fire.
    Rejected,
    /// Non-finite score.
    Invalid,
}

/// Per-tier merge counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MergeStats {
    pub candidates: usize,
    /// Candidates that entered the set, with or without evicting a member.
    pub admitted: usize,
    /// Subset of `admitted` that evicted a member.
    pub replaced: usize,
    pub discarded: usize,
}

#[derive(Debug, Clone)]
struct Slot {
    entry: Match,
    /// Insertion order, used to break score ties deterministically.
    seq: u64,
}

/// The working state of one retrieval call.
///
/// Invariants: at most `capacity` members, unique by id. Once full, a member
/// is only ever evicted for a strictly better candidate while it sits below
/// the threshold.
#[derive(Debug, Clone)]
pub struct ResultSet {
    capacity: usize,
    slots: Vec<Slot>,
    next_seq: u64,
}

impl ResultSet {
    /// Create an empty set holding at most `capacity` members (minimum 1).
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            capacity,
            slots: Vec::new(),
            next_seq: 0,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.slots.len() >= self.capacity
    }

    pub fn contains(&self, id: &str) -> bool {
        self.slots.iter().any(|s| s.entry.id == id)
    }

    /// Members in insertion order.
    pub fn members(&self) -> impl Iterator<Item = &Match> {
        self.slots.iter().map(|s| &s.entry)
    }

    /// Lowest-scored member; ties go to the earliest inserted.
    pub fn weakest(&self) -> Option<&Match> {
        self.weakest_index().map(|i| &self.slots[i].entry)
    }

    fn weakest_index(&self) -> Option<usize> {
        self.slots
            .iter()
            .enumerate()
            .min_by(|(_, a), (_, b)| {
                a.entry
                    .score
                    .total_cmp(&b.entry.score)
                    .then(a.seq.cmp(&b.seq))
            })
            .map(|(i, _)| i)
    }

    /// Apply the admission rule to one candidate.
    ///
    /// Dedupe by id first. With room, admit. When full, evict the weakest
    /// member only if it is below `threshold` and the candidate scores
    /// strictly higher.
    pub fn offer(&mut self, candidate: Match, threshold: f64) -> Admission {
        if !candidate.score.is_finite() {
            return Admission::Invalid;
        }
        if self.contains(&candidate.id) {
            return Admission::Duplicate;
        }
        if !self.is_full() {
            self.push(candidate);
            return Admission::Admitted;
        }

        let Some(idx) = self.weakest_index() else {
            return Admission::Rejected;
        };
        let weakest = &self.slots[idx].entry;
        if weakest.score < threshold && candidate.score > weakest.score {
            let evicted = self.slots.remove(idx).entry;
            self.push(candidate);
            Admission::Replaced { evicted }
        } else {
            Admission::Rejected
        }
    }

    /// Merge one tier's batch: stable-sort by score descending, then offer
    /// each candidate in that order.
    pub fn merge(&mut self, mut batch: Vec<Match>, threshold: f64) -> MergeStats {
        batch.sort_by(|a, b| b.score.total_cmp(&a.score));

        let mut stats = MergeStats {
            candidates: batch.len(),
            ..Default::default()
        };
        for candidate in batch {
            match self.offer(candidate, threshold) {
                Admission::Admitted => stats.admitted += 1,
                Admission::Replaced { .. } => {
                    stats.admitted += 1;
                    stats.replaced += 1;
                }
                Admission::Duplicate | Admission::Rejected | Admission::Invalid => {
                    stats.discarded += 1
                }
            }
        }
        stats
    }

    /// Full, and every member clears the threshold.
    pub fn quality_met(&self, threshold: f64) -> bool {
        self.is_full() && self.slots.iter().all(|s| s.entry.meets(threshold))
    }

    /// Consume the set into ranked order: score descending, insertion order on ties.
    pub fn into_ranked(mut self) -> Vec<Match> {
        self.slots.sort_by(|a, b| {
            b.entry
                .score
                .total_cmp(&a.entry.score)
                .then(a.seq.cmp(&b.seq))
        });
        self.slots.into_iter().map(|s| s.entry).collect()
    }

    fn push(&mut self, entry: Match) {
        self.slots.push(Slot {
            entry,
            seq: self.next_seq,
        });
        self.next_seq += 1;
    }
}

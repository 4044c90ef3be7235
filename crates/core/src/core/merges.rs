//! Merge rule management for BPE.
//!
//! Merge rules are stored using symbol IDs rather than strings for fast
//! comparison. The order in which rules were learned is the order in which
//! they are applied at encode time, so it is preserved exactly: a rule's
//! rank is its position in the sequence.

/// A pair of adjacent symbol IDs that can be merged.
pub type Pair = (u32, u32);

/// A single learned merge: `(left, right) -> new_id`, tagged with the
/// training step (rank) at which it was learned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MergeRule {
    /// Left operand symbol ID
    pub left: u32,
    /// Right operand symbol ID
    pub right: u32,
    /// ID of the symbol created by this merge
    pub new_id: u32,
}

impl MergeRule {
    /// The pair this rule merges.
    #[inline]
    pub fn pair(&self) -> Pair {
        (self.left, self.right)
    }
}

/// Ordered sequence of BPE merge rules.
///
/// Ranks are implicit: `rules[k]` was learned at step `k` and is applied
/// `k`-th during encoding. The sequence only ever grows.
#[derive(Debug, Clone, Default)]
pub struct MergeSequence {
    rules: Vec<MergeRule>,
}

impl MergeSequence {
    /// Create an empty merge sequence.
    pub fn new() -> Self {
        Self { rules: Vec::new() }
    }

    /// Create an empty sequence with capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            rules: Vec::with_capacity(capacity),
        }
    }

    /// Append a rule at the next rank.
    ///
    /// Returns the rank assigned to the rule.
    pub fn push(&mut self, rule: MergeRule) -> u32 {
        self.rules.push(rule);
        (self.rules.len() - 1) as u32
    }

    /// Get the rule learned at the given rank.
    #[inline]
    pub fn get(&self, rank: u32) -> Option<&MergeRule> {
        self.rules.get(rank as usize)
    }

    /// Iterate over rules in learned (= application) order.
    pub fn iter(&self) -> impl Iterator<Item = &MergeRule> {
        self.rules.iter()
    }

    /// Number of learned rules.
    #[inline]
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Check if no rules have been learned.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Access the rules as a slice.
    pub fn as_slice(&self) -> &[MergeRule] {
        &self.rules
    }
}

impl<'a> IntoIterator for &'a MergeSequence {
    type Item = &'a MergeRule;
    type IntoIter = std::slice::Iter<'a, MergeRule>;

    fn into_iter(self) -> Self::IntoIter {
        self.rules.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_assigns_ranks_in_order() {
        let mut seq = MergeSequence::new();
        let r0 = seq.push(MergeRule {
            left: 4,
            right: 5,
            new_id: 6,
        });
        let r1 = seq.push(MergeRule {
            left: 6,
            right: 5,
            new_id: 7,
        });

        assert_eq!(r0, 0);
        assert_eq!(r1, 1);
        assert_eq!(seq.get(0).unwrap().pair(), (4, 5));
        assert_eq!(seq.get(1).unwrap().new_id, 7);
        assert_eq!(seq.get(2), None);
    }

    #[test]
    fn test_iteration_preserves_learned_order() {
        let mut seq = MergeSequence::new();
        for k in 0..5u32 {
            seq.push(MergeRule {
                left: k,
                right: k + 1,
                new_id: 10 + k,
            });
        }

        let new_ids: Vec<u32> = seq.iter().map(|r| r.new_id).collect();
        assert_eq!(new_ids, vec![10, 11, 12, 13, 14]);
    }
}

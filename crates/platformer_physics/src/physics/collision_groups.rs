//! Collision group system for filtering collision resolution
//!
//! Group ids are unbounded. Membership is stored sparsely as 8-bit blocks
//! keyed by `group / 8`, so a body in group 0 and group 1_000_000 only keeps
//! two bytes around. Two bodies collide physically only when they share at
//! least one group; otherwise their overlap is reported as an intersection.

use std::collections::BTreeMap;

const BLOCK_BITS: usize = 8;

/// Sparse, unbounded set of collision group ids
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CollisionGroups {
    /// Block index -> membership bits; empty blocks are never stored
    blocks: BTreeMap<usize, u8>,
}

impl CollisionGroups {
    /// The group every body joins unless told otherwise
    pub const DEFAULT_GROUP: usize = 0;

    /// Empty set: collides with nothing
    pub fn none() -> Self {
        Self::default()
    }

    /// Set containing only [`Self::DEFAULT_GROUP`]
    pub fn default_group() -> Self {
        Self::of(&[Self::DEFAULT_GROUP])
    }

    /// Set containing the given groups
    ///
    /// # Example
    /// ```
    /// use platformer_physics::physics::CollisionGroups;
    ///
    /// let groups = CollisionGroups::of(&[0, 3, 900]);
    /// assert!(groups.contains(900));
    /// assert!(!groups.contains(1));
    /// ```
    pub fn of(groups: &[usize]) -> Self {
        groups.iter().fold(Self::none(), |mut acc, &group| {
            acc.insert(group);
            acc
        })
    }

    const fn locate(group: usize) -> (usize, u8) {
        (group / BLOCK_BITS, 1 << (group % BLOCK_BITS))
    }

    /// Whether `group` is in the set
    pub fn contains(&self, group: usize) -> bool {
        let (block, bit) = Self::locate(group);
        self.blocks.get(&block).is_some_and(|bits| bits & bit != 0)
    }

    /// Add or remove `group`
    pub fn set(&mut self, group: usize, member: bool) {
        if member {
            self.insert(group);
        } else {
            self.remove(group);
        }
    }

    /// Add `group`
    pub fn insert(&mut self, group: usize) {
        let (block, bit) = Self::locate(group);
        *self.blocks.entry(block).or_insert(0) |= bit;
    }

    /// Remove `group`
    pub fn remove(&mut self, group: usize) {
        let (block, bit) = Self::locate(group);
        if let Some(bits) = self.blocks.get_mut(&block) {
            *bits &= !bit;
            if *bits == 0 {
                self.blocks.remove(&block);
            }
        }
    }

    /// Whether the set is empty
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Every group id in ascending order
    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        self.blocks.iter().flat_map(|(&block, &bits)| {
            (0..BLOCK_BITS)
                .filter(move |bit| bits & (1 << bit) != 0)
                .map(move |bit| block * BLOCK_BITS + bit)
        })
    }

    /// Check if two sets share at least one group
    ///
    /// Walks both sorted block maps in lockstep and stops at the first aligned
    /// block with a common bit, so the cost is linear in the number of stored
    /// blocks rather than in the range of group ids.
    pub fn shares_any(&self, other: &Self) -> bool {
        let mut ours = self.blocks.iter().peekable();
        let mut theirs = other.blocks.iter().peekable();

        while let (Some(&(&a_block, &a_bits)), Some(&(&b_block, &b_bits))) = (ours.peek(), theirs.peek()) {
            match a_block.cmp(&b_block) {
                std::cmp::Ordering::Less => {
                    ours.next();
                }
                std::cmp::Ordering::Greater => {
                    theirs.next();
                }
                std::cmp::Ordering::Equal => {
                    if a_bits & b_bits != 0 {
                        return true;
                    }
                    ours.next();
                    theirs.next();
                }
            }
        }
        false
    }
}

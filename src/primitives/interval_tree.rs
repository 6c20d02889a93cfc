//! Persistent interval-aggregate tree.
//!
//! ## Purpose
//!
//! This module maps a contiguous range of integer indices to numeric values
//! and answers range-minimum queries over it. It is the working structure of
//! the binary partition solver, whose forward pass builds one new version of
//! the map per observation by slicing, shifting and concatenating the
//! previous version.
//!
//! ## Design notes
//!
//! * **Arena**: Nodes live in a `RangeArena` and are addressed by `RangeId`.
//!   Nodes are never mutated once pushed, so every version stays valid and
//!   versions share untouched subtrees.
//! * **Lazy offsets**: An internal node carries an additive offset applied to
//!   every value below it. Shifting a whole tree allocates one node.
//! * **Balancing**: Every join realigns the split point of its children to a
//!   power-of-two boundary, donating a slice from one side to the other. This
//!   keeps the height logarithmic under the repeated concatenations of the
//!   forward pass.
//!
//! ## Key concepts
//!
//! * **Rank**: The smallest `r` such that `x_min >> r == x_max >> r`, i.e. the
//!   size class of the aligned block containing the node's range.
//! * **Cached minimum**: `v_min = min(left.v_min, right.v_min) + v` for
//!   internal nodes and `v_min = v` for leaves.
//!
//! ## Invariants
//!
//! * Children are exactly adjacent: `left.x_max + 1 == right.x_min`.
//! * Queries must lie inside the covered range.
//! * Ties in minimum queries resolve to the leftmost index.
//!
//! ## Non-goals
//!
//! * This module does not reclaim nodes; an arena lives for one solver call.

// Feature-gated imports
#[cfg(not(feature = "std"))]
use alloc::vec::Vec;
#[cfg(feature = "std")]
use std::vec::Vec;

// External dependencies
use num_traits::Float;

// Internal dependencies
use crate::primitives::errors::IsotonicError;

// ============================================================================
// Node Storage
// ============================================================================

/// Handle to a tree version stored in a [`RangeArena`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RangeId(usize);

impl RangeId {
    /// Position of the node inside its arena.
    pub fn index(self) -> usize {
        self.0
    }
}

#[derive(Debug, Clone, Copy)]
struct RangeNode<T> {
    x_min: usize,
    x_max: usize,
    v: T,
    v_min: T,
    children: Option<(RangeId, RangeId)>,
    height: u32,
    rank: u32,
}

/// Where the minimum of a range query lies.
enum Argmin {
    /// The whole subtree was covered; its own leftmost minimum applies.
    Subtree(RangeId),
    /// A partially covered leaf; the leftmost requested index applies.
    At(usize),
}

#[inline]
fn shr(x: usize, rank: u32) -> usize {
    x.checked_shr(rank).unwrap_or(0)
}

#[inline]
fn shl(x: usize, rank: u32) -> usize {
    x.checked_shl(rank).unwrap_or(0)
}

fn span_rank(x_min: usize, x_max: usize, start: u32) -> u32 {
    let mut rank = start;
    while shr(x_min, rank) != shr(x_max, rank) {
        rank += 1;
    }
    rank
}

// ============================================================================
// Arena
// ============================================================================

/// Arena owning every node of every tree version built during one fit.
#[derive(Debug, Clone, Default)]
pub struct RangeArena<T> {
    nodes: Vec<RangeNode<T>>,
}

impl<T: Float> RangeArena<T> {
    /// Create an empty arena.
    pub fn new() -> Self {
        Self { nodes: Vec::new() }
    }

    /// Create an empty arena with room for `capacity` nodes.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            nodes: Vec::with_capacity(capacity),
        }
    }

    /// Number of nodes allocated so far.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether no node has been allocated.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    #[inline]
    fn node(&self, id: RangeId) -> RangeNode<T> {
        self.nodes[id.0]
    }

    fn push(&mut self, node: RangeNode<T>) -> RangeId {
        self.nodes.push(node);
        RangeId(self.nodes.len() - 1)
    }

    // ========================================================================
    // Construction
    // ========================================================================

    /// A tree mapping every index in `[x_min, x_max]` to `v`.
    pub fn leaf(&mut self, x_min: usize, x_max: usize, v: T) -> Result<RangeId, IsotonicError> {
        if x_min > x_max {
            return Err(IsotonicError::DegenerateRange {
                lo: x_min,
                hi: x_max,
            });
        }

        Ok(self.push(RangeNode {
            x_min,
            x_max,
            v,
            v_min: v,
            children: None,
            height: 0,
            rank: span_rank(x_min, x_max, 0),
        }))
    }

    /// Join two adjacent trees under a new root, adding `v` to every value.
    pub fn join(&mut self, left: RangeId, right: RangeId, v: T) -> Result<RangeId, IsotonicError> {
        let (left, right) = self.balance(left, right)?;
        let l = self.node(left);
        let r = self.node(right);

        Ok(self.push(RangeNode {
            x_min: l.x_min,
            x_max: r.x_max,
            v,
            v_min: l.v_min.min(r.v_min) + v,
            children: Some((left, right)),
            height: l.height.max(r.height) + 1,
            rank: span_rank(l.x_min, r.x_max, l.rank.max(r.rank)),
        }))
    }

    /// Realign the split between two adjacent trees to a power-of-two boundary.
    fn balance(
        &mut self,
        left: RangeId,
        right: RangeId,
    ) -> Result<(RangeId, RangeId), IsotonicError> {
        let l = self.node(left);
        let r = self.node(right);
        if l.x_max + 1 != r.x_min {
            return Err(IsotonicError::NonAdjacentRanges {
                left_max: l.x_max,
                right_min: r.x_min,
            });
        }

        let mut new_rank = l.rank.max(r.rank);
        while shr(l.x_min, new_rank) != shr(r.x_min, new_rank) {
            new_rank += 1;
        }

        let split_rank = new_rank.saturating_sub(1);
        if shr(l.x_max, split_rank) != shr(r.x_min, split_rank) {
            return Ok((left, right));
        }

        let split_mid = shl(shr(r.x_max, split_rank), split_rank);
        let before_mid = split_mid
            .checked_sub(1)
            .ok_or(IsotonicError::InvariantViolation("balance split below zero"))?;

        if l.x_max >= split_mid {
            // left overhangs the boundary: donate its tail to the right
            let left_new = self.extract(left, l.x_min, before_mid)?;
            let tail = self.extract(left, split_mid, l.x_max)?;
            let right_new = self.join(tail, right, T::zero())?;
            Ok((left_new, right_new))
        } else {
            // right starts before the boundary: donate its head to the left
            let head = self.extract(right, r.x_min, before_mid)?;
            let left_new = self.join(left, head, T::zero())?;
            let right_new = self.extract(right, split_mid, r.x_max)?;
            Ok((left_new, right_new))
        }
    }

    /// A tree with every value shifted by `delta`.
    pub fn offset(&mut self, id: RangeId, delta: T) -> Result<RangeId, IsotonicError> {
        if delta == T::zero() {
            return Ok(id);
        }

        let n = self.node(id);
        match n.children {
            None => self.leaf(n.x_min, n.x_max, n.v + delta),
            Some((l, r)) => self.join(l, r, n.v + delta),
        }
    }

    /// Concatenate two trees covering adjacent ranges, in either order.
    pub fn concat(&mut self, a: RangeId, b: RangeId) -> Result<RangeId, IsotonicError> {
        let (first, second) = if self.node(a).x_min < self.node(b).x_min {
            (a, b)
        } else {
            (b, a)
        };

        let f = self.node(first);
        let s = self.node(second);
        if f.x_max + 1 != s.x_min {
            return Err(IsotonicError::NonAdjacentRanges {
                left_max: f.x_max,
                right_min: s.x_min,
            });
        }

        self.join(first, second, T::zero())
    }

    /// A tree restricted to `[lo, hi]`, sharing structure with `id`.
    pub fn extract(&mut self, id: RangeId, lo: usize, hi: usize) -> Result<RangeId, IsotonicError> {
        let n = self.check_range(id, lo, hi)?;
        if n.x_min == lo && n.x_max == hi {
            return Ok(id);
        }

        match n.children {
            None => self.leaf(lo, hi, n.v),
            Some((l, r)) => {
                let left_max = self.node(l).x_max;
                let right_min = self.node(r).x_min;

                if hi <= left_max {
                    let sub = self.extract(l, lo, hi)?;
                    self.offset(sub, n.v)
                } else if right_min <= lo {
                    let sub = self.extract(r, lo, hi)?;
                    self.offset(sub, n.v)
                } else {
                    let a = self.extract(l, lo, left_max)?;
                    let b = self.extract(r, right_min, hi)?;
                    self.join(a, b, n.v)
                }
            }
        }
    }

    // ========================================================================
    // Queries
    // ========================================================================

    fn check_range(&self, id: RangeId, lo: usize, hi: usize) -> Result<RangeNode<T>, IsotonicError> {
        let n = self.node(id);
        if lo > hi {
            return Err(IsotonicError::DegenerateRange { lo, hi });
        }
        if lo < n.x_min || n.x_max < hi {
            return Err(IsotonicError::RangeOutOfBounds {
                lo,
                hi,
                min: n.x_min,
                max: n.x_max,
            });
        }
        Ok(n)
    }

    fn min_over(&self, id: RangeId, lo: usize, hi: usize) -> (T, Argmin) {
        let n = self.node(id);
        if lo == n.x_min && hi == n.x_max {
            return (n.v_min, Argmin::Subtree(id));
        }

        match n.children {
            None => (n.v, Argmin::At(lo)),
            Some((l, r)) => {
                let left_max = self.node(l).x_max;
                let right_min = self.node(r).x_min;

                let (best, at) = if hi <= left_max {
                    self.min_over(l, lo, hi)
                } else if right_min <= lo {
                    self.min_over(r, lo, hi)
                } else {
                    let left = self.min_over(l, lo, left_max);
                    let right = self.min_over(r, right_min, hi);
                    if left.0 <= right.0 {
                        left
                    } else {
                        right
                    }
                };
                (best + n.v, at)
            }
        }
    }

    /// Minimum value over `[lo, hi]`.
    pub fn range_min(&self, id: RangeId, lo: usize, hi: usize) -> Result<T, IsotonicError> {
        self.check_range(id, lo, hi)?;
        Ok(self.min_over(id, lo, hi).0)
    }

    /// Leftmost index achieving the minimum over `[lo, hi]`.
    pub fn range_argmin(&self, id: RangeId, lo: usize, hi: usize) -> Result<usize, IsotonicError> {
        self.check_range(id, lo, hi)?;
        Ok(match self.min_over(id, lo, hi).1 {
            Argmin::Subtree(sub) => self.min_x(sub),
            Argmin::At(x) => x,
        })
    }

    /// Leftmost index achieving the minimum of the whole tree.
    pub fn min_x(&self, id: RangeId) -> usize {
        let mut id = id;
        loop {
            let n = self.node(id);
            match n.children {
                None => return n.x_min,
                Some((l, r)) => {
                    id = if self.node(l).v_min <= self.node(r).v_min {
                        l
                    } else {
                        r
                    };
                }
            }
        }
    }

    /// Minimum value of the whole tree.
    pub fn min_value(&self, id: RangeId) -> T {
        self.node(id).v_min
    }

    /// Value stored at index `x`.
    pub fn value_at(&self, id: RangeId, x: usize) -> Result<T, IsotonicError> {
        self.range_min(id, x, x)
    }

    /// Covered index range `(x_min, x_max)`.
    pub fn bounds(&self, id: RangeId) -> (usize, usize) {
        let n = self.node(id);
        (n.x_min, n.x_max)
    }

    /// Number of edges on the longest root-to-leaf path.
    pub fn height(&self, id: RangeId) -> u32 {
        self.node(id).height
    }

    /// Every value of the tree, in index order.
    pub fn to_vec(&self, id: RangeId) -> Vec<T> {
        let n = self.node(id);
        let mut out = Vec::with_capacity(n.x_max - n.x_min + 1);
        self.collect(id, T::zero(), &mut out);
        out
    }

    fn collect(&self, id: RangeId, carried: T, out: &mut Vec<T>) {
        let n = self.node(id);
        match n.children {
            None => {
                for _ in n.x_min..=n.x_max {
                    out.push(n.v + carried);
                }
            }
            Some((l, r)) => {
                self.collect(l, carried + n.v, out);
                self.collect(r, carried + n.v, out);
            }
        }
    }
}

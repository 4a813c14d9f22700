//! An indexable skip list: a skip list whose forward pointers are
//! augmented with a span ("width"), so that looking up the element at a
//! given rank costs O(log k) expected instead of O(k) (spec §4.6, GLOSSARY).
//!
//! Levels are chosen with a fair coin flip via `nanorand`'s `WyRand`, the
//! same RNG the teacher crate uses for its `shuffle()` operator.

use nanorand::{Rng, WyRand};

const MAX_LEVEL: usize = 32;
/// Sentinel standing in for the head of the list in the `update`/`rank`
/// scratch arrays, distinguishing it from a real arena slot.
const HEAD: usize = usize::MAX;

struct Node<T> {
    value: T,
    forward: Vec<usize>,
    width: Vec<usize>,
}

/// A sorted multiset supporting O(log k) expected insert, remove-by-value
/// and rank lookup.
pub struct SkipList<T> {
    nodes: Vec<Option<Node<T>>>,
    free: Vec<usize>,
    head_forward: Vec<usize>,
    head_width: Vec<usize>,
    level: usize,
    len: usize,
    rng: WyRand,
}

impl<T: PartialOrd + Clone> SkipList<T> {
    pub fn new() -> Self {
        Self {
            nodes: Vec::new(),
            free: Vec::new(),
            head_forward: vec![HEAD; MAX_LEVEL],
            head_width: vec![1; MAX_LEVEL],
            level: 1,
            len: 0,
            rng: WyRand::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    fn random_level(&mut self) -> usize {
        let mut lvl = 1;
        while lvl < MAX_LEVEL && self.rng.generate::<u8>() & 1 == 0 {
            lvl += 1;
        }
        lvl
    }

    fn forward(&self, node: usize, level: usize) -> usize {
        if node == HEAD {
            self.head_forward[level]
        } else {
            self.nodes[node].as_ref().unwrap().forward[level]
        }
    }

    fn set_forward(&mut self, node: usize, level: usize, to: usize) {
        if node == HEAD {
            self.head_forward[level] = to;
        } else {
            self.nodes[node].as_mut().unwrap().forward[level] = to;
        }
    }

    fn width(&self, node: usize, level: usize) -> usize {
        if node == HEAD {
            self.head_width[level]
        } else {
            self.nodes[node].as_ref().unwrap().width[level]
        }
    }

    fn set_width(&mut self, node: usize, level: usize, w: usize) {
        if node == HEAD {
            self.head_width[level] = w;
        } else {
            self.nodes[node].as_mut().unwrap().width[level] = w;
        }
    }

    fn value(&self, node: usize) -> &T {
        &self.nodes[node].as_ref().unwrap().value
    }

    /// Insert `value`, keeping the list sorted. Equal values are inserted
    /// to the right of existing equal values (stable-ish, though insertion
    /// identity is otherwise untracked).
    pub fn insert(&mut self, value: T) {
        let mut update = [HEAD; MAX_LEVEL];
        let mut rank_at = [0usize; MAX_LEVEL];
        let mut cur = HEAD;

        for lvl in (0..self.level).rev() {
            let mut dist = if lvl + 1 < self.level {
                rank_at[lvl + 1]
            } else {
                0
            };
            loop {
                let next = self.forward(cur, lvl);
                if next != HEAD && *self.value(next) <= value {
                    dist += self.width(cur, lvl);
                    cur = next;
                } else {
                    break;
                }
            }
            update[lvl] = cur;
            rank_at[lvl] = dist;
        }

        let new_level = self.random_level();
        if new_level > self.level {
            for lvl in self.level..new_level {
                self.head_forward[lvl] = HEAD;
                self.head_width[lvl] = self.len + 1;
                update[lvl] = HEAD;
                rank_at[lvl] = 0;
            }
            self.level = new_level;
        }

        let node_idx = match self.free.pop() {
            Some(idx) => idx,
            None => {
                self.nodes.push(None);
                self.nodes.len() - 1
            }
        };
        let node = Node {
            value,
            forward: vec![HEAD; new_level],
            width: vec![1; new_level],
        };
        self.nodes[node_idx] = Some(node);

        for lvl in 0..new_level {
            let prev = update[lvl];
            let next = self.forward(prev, lvl);
            self.set_forward(node_idx, lvl, next);
            self.set_forward(prev, lvl, node_idx);

            let prev_span = self.width(prev, lvl);
            let new_span_before = rank_at[0] - rank_at[lvl] + 1;
            self.set_width(node_idx, lvl, prev_span - new_span_before + 1);
            self.set_width(prev, lvl, new_span_before);
        }
        for lvl in new_level..self.level {
            let prev = update[lvl];
            let w = self.width(prev, lvl);
            self.set_width(prev, lvl, w + 1);
        }

        self.len += 1;
    }

    /// Remove one occurrence equal to `target`, if present.
    pub fn remove(&mut self, target: &T) -> bool {
        let mut update = [HEAD; MAX_LEVEL];
        let mut cur = HEAD;
        for lvl in (0..self.level).rev() {
            loop {
                let next = self.forward(cur, lvl);
                if next != HEAD && self.value(next) < target {
                    cur = next;
                } else {
                    break;
                }
            }
            update[lvl] = cur;
        }
        let candidate = self.forward(cur, 0);
        if candidate == HEAD || !(*self.value(candidate) == *target) {
            return false;
        }

        for lvl in 0..self.level {
            let prev = update[lvl];
            if self.forward(prev, lvl) == candidate {
                let next = self.forward(candidate, lvl);
                let merged = self.width(prev, lvl) + self.width(candidate, lvl) - 1;
                self.set_forward(prev, lvl, next);
                self.set_width(prev, lvl, merged);
            } else {
                let w = self.width(prev, lvl);
                self.set_width(prev, lvl, w - 1);
            }
        }

        self.nodes[candidate] = None;
        self.free.push(candidate);
        self.len -= 1;

        while self.level > 1 && self.head_forward[self.level - 1] == HEAD {
            self.level -= 1;
        }
        true
    }

    /// The value at 0-indexed rank `rank`, expected O(log k).
    pub fn rank(&self, rank: usize) -> Option<&T> {
        if rank >= self.len {
            return None;
        }
        let target = rank + 1; // ranks are 1-indexed internally via width
        let mut cur = HEAD;
        let mut dist = 0;
        for lvl in (0..self.level).rev() {
            loop {
                let next = self.forward(cur, lvl);
                let next_dist = dist + self.width(cur, lvl);
                if next != HEAD && next_dist <= target {
                    cur = next;
                    dist = next_dist;
                } else {
                    break;
                }
            }
            if dist == target {
                return Some(self.value(cur));
            }
        }
        None
    }
}

impl<T: PartialOrd + Clone> Default for SkipList<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_and_rank_matches_sorted_order() {
        let mut list = SkipList::new();
        let values = [5, 1, 4, 2, 3, 3, 0];
        for v in values {
            list.insert(v);
        }
        let mut sorted = values.to_vec();
        sorted.sort();
        for (r, expected) in sorted.iter().enumerate() {
            assert_eq!(list.rank(r), Some(expected));
        }
    }

    #[test]
    fn remove_keeps_rank_consistent() {
        let mut list = SkipList::new();
        for v in [5, 1, 4, 2, 3] {
            list.insert(v);
        }
        assert!(list.remove(&4));
        let mut remaining = vec![1, 2, 3, 5];
        remaining.sort();
        for (r, expected) in remaining.iter().enumerate() {
            assert_eq!(list.rank(r), Some(expected));
        }
        assert_eq!(list.len(), 4);
        assert!(!list.remove(&100));
    }

    #[test]
    fn handles_duplicates() {
        let mut list = SkipList::new();
        for v in [2, 2, 2, 1, 3] {
            list.insert(v);
        }
        assert_eq!(list.rank(0), Some(&1));
        assert_eq!(list.rank(4), Some(&3));
        list.remove(&2);
        assert_eq!(list.len(), 4);
    }
}

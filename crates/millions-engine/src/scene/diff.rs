use std::cmp::Ordering;
use std::sync::Arc;

use super::chunks::Chunks;
use super::{Entity, ZIndex};

/// One primitive edit turning a scene into its successor.
#[derive(Debug, Clone, PartialEq)]
pub enum DiffOp {
    /// Entity present only in the newer scene.
    Insert(Entity),
    /// Entity present only in the older scene.
    Remove(Entity),
    /// Both scenes have an entity at this z-index but they differ.
    Replace { old: Entity, new: Entity },
}

impl DiffOp {
    /// The z-index this op touches. `Replace` shares one z-index by construction.
    #[inline]
    pub fn z_index(&self) -> ZIndex {
        match self {
            DiffOp::Insert(e) | DiffOp::Remove(e) => e.z_index(),
            DiffOp::Replace { new, .. } => new.z_index(),
        }
    }
}

/// Ordered edit script produced by [`Scene::compare_to`](super::Scene::compare_to).
///
/// Ops are sorted by z-index ascending.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SceneDiff {
    ops: Vec<DiffOp>,
}

impl SceneDiff {
    #[inline]
    pub(crate) fn from_ops(ops: Vec<DiffOp>) -> Self {
        Self { ops }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.ops.len()
    }

    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = &DiffOp> {
        self.ops.iter()
    }

    #[inline]
    pub fn ops(&self) -> &[DiffOp] {
        &self.ops
    }
}

impl IntoIterator for SceneDiff {
    type Item = DiffOp;
    type IntoIter = std::vec::IntoIter<DiffOp>;

    fn into_iter(self) -> Self::IntoIter {
        self.ops.into_iter()
    }
}

impl<'a> IntoIterator for &'a SceneDiff {
    type Item = &'a DiffOp;
    type IntoIter = std::slice::Iter<'a, DiffOp>;

    fn into_iter(self) -> Self::IntoIter {
        self.ops.iter()
    }
}

/// Diffs two chunked sequences, skipping leading and trailing chunks they
/// still share by pointer.
pub(crate) fn diff_chunks(old: &Chunks, new: &Chunks) -> Vec<DiffOp> {
    let (a, b) = (old.chunks(), new.chunks());

    let prefix = a.iter().zip(b).take_while(|(x, y)| Arc::ptr_eq(x, y)).count();
    let (a, b) = (&a[prefix..], &b[prefix..]);

    let suffix = a
        .iter()
        .rev()
        .zip(b.iter().rev())
        .take_while(|(x, y)| Arc::ptr_eq(x, y))
        .count();
    let (a, b) = (&a[..a.len() - suffix], &b[..b.len() - suffix]);

    diff_sorted(a.iter().flat_map(|c| c.iter()), b.iter().flat_map(|c| c.iter()))
}

/// Merge-walks two z-ordered entity sequences.
///
/// Equal entities are skipped; same z-index with different content becomes a
/// `Replace`.
pub(crate) fn diff_sorted<'a>(
    old: impl IntoIterator<Item = &'a Entity>,
    new: impl IntoIterator<Item = &'a Entity>,
) -> Vec<DiffOp> {
    let mut ops = Vec::new();
    let (mut old, mut new) = (old.into_iter().peekable(), new.into_iter().peekable());

    while let (Some(&a), Some(&b)) = (old.peek(), new.peek()) {
        match a.z_index().cmp(&b.z_index()) {
            Ordering::Less => {
                ops.push(DiffOp::Remove(a.clone()));
                old.next();
            }
            Ordering::Greater => {
                ops.push(DiffOp::Insert(b.clone()));
                new.next();
            }
            Ordering::Equal => {
                if a != b {
                    ops.push(DiffOp::Replace { old: a.clone(), new: b.clone() });
                }
                old.next();
                new.next();
            }
        }
    }

    ops.extend(old.cloned().map(DiffOp::Remove));
    ops.extend(new.cloned().map(DiffOp::Insert));
    ops
}

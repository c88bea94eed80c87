use std::sync::Arc;

use super::{Entity, SceneError, ZIndex};

/// Target chunk length. A chunk splits in two once it grows past twice this.
pub(crate) const CHUNK_LEN: usize = 512;

/// Persistent z-ordered entity sequence stored as shared chunks.
///
/// Cloning shares everything. An edit copies the chunk list (one pointer per
/// chunk) plus the one chunk it touches, so two versions a few edits apart
/// still share almost every chunk by pointer.
///
/// Invariants: no chunk is empty; entities are in strictly increasing
/// z-order across chunk boundaries.
#[derive(Debug, Clone, Default)]
pub(crate) struct Chunks {
    chunks: Arc<Vec<Arc<Vec<Entity>>>>,
    len: usize,
}

impl Chunks {
    /// Builds from entities already sorted by strictly increasing z-index.
    pub(crate) fn from_sorted(entities: Vec<Entity>) -> Self {
        let len = entities.len();
        let chunks = entities
            .chunks(CHUNK_LEN)
            .map(|chunk| Arc::new(chunk.to_vec()))
            .collect();
        Self {
            chunks: Arc::new(chunks),
            len,
        }
    }

    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub(crate) fn chunks(&self) -> &[Arc<Vec<Entity>>] {
        &self.chunks
    }

    #[inline]
    pub(crate) fn ptr_eq(&self, other: &Chunks) -> bool {
        Arc::ptr_eq(&self.chunks, &other.chunks)
    }

    pub(crate) fn iter(&self) -> impl Iterator<Item = &Entity> + Clone {
        self.chunks.iter().flat_map(|chunk| chunk.iter())
    }

    /// Entities whose z-index is `>= z`, or all of them for `None`.
    pub(crate) fn iter_from(&self, z: Option<ZIndex>) -> impl Iterator<Item = &Entity> {
        let (c, at) = match z {
            None => (0, 0),
            Some(z) => match self.locate(z) {
                (c, Ok(i) | Err(i)) => (c, i),
            },
        };

        self.chunks
            .get(c..)
            .unwrap_or_default()
            .iter()
            .enumerate()
            .flat_map(move |(k, chunk)| chunk[if k == 0 { at } else { 0 }..].iter())
    }

    pub(crate) fn get(&self, z: ZIndex) -> Option<&Entity> {
        match self.locate(z) {
            (c, Ok(i)) => Some(&self.chunks[c][i]),
            _ => None,
        }
    }

    pub(crate) fn insert(&mut self, entity: Entity) -> Result<(), SceneError> {
        let z = entity.z_index();
        let (c, at) = match self.locate(z) {
            (_, Ok(_)) => return Err(SceneError::DuplicateZIndex(z)),
            (c, Err(at)) => (c, at),
        };

        let chunks = Arc::make_mut(&mut self.chunks);
        self.len += 1;

        let Some(last) = chunks.len().checked_sub(1) else {
            chunks.push(Arc::new(vec![entity]));
            return Ok(());
        };

        // Past the last chunk: append to it.
        let (c, at) = if c > last { (last, chunks[last].len()) } else { (c, at) };

        let chunk = Arc::make_mut(&mut chunks[c]);
        chunk.insert(at, entity);
        if chunk.len() > 2 * CHUNK_LEN {
            let tail = chunk.split_off(CHUNK_LEN);
            chunks.insert(c + 1, Arc::new(tail));
        }
        Ok(())
    }

    pub(crate) fn remove(&mut self, z: ZIndex) -> Result<Entity, SceneError> {
        let (c, i) = match self.locate(z) {
            (c, Ok(i)) => (c, i),
            _ => return Err(SceneError::MissingZIndex(z)),
        };

        let chunks = Arc::make_mut(&mut self.chunks);
        let chunk = Arc::make_mut(&mut chunks[c]);
        let removed = chunk.remove(i);
        if chunk.is_empty() {
            chunks.remove(c);
        }
        self.len -= 1;
        Ok(removed)
    }

    pub(crate) fn replace(&mut self, entity: Entity) -> Result<(), SceneError> {
        let z = entity.z_index();
        let (c, i) = match self.locate(z) {
            (c, Ok(i)) => (c, i),
            _ => return Err(SceneError::MissingZIndex(z)),
        };

        let chunks = Arc::make_mut(&mut self.chunks);
        Arc::make_mut(&mut chunks[c])[i] = entity;
        Ok(())
    }

    /// Removes every entity in `[begin, end)`. Returns how many were removed.
    pub(crate) fn remove_range(&mut self, begin: ZIndex, end: ZIndex) -> usize {
        let in_range = |e: &Entity| (begin..end).contains(&e.z_index());

        if !self.iter_from(Some(begin)).next().is_some_and(in_range) {
            return 0;
        }

        let first = self
            .chunks
            .partition_point(|ch| ch.last().is_some_and(|e| e.z_index() < begin));
        let last = self
            .chunks
            .partition_point(|ch| ch.first().is_some_and(|e| e.z_index() < end));

        let chunks = Arc::make_mut(&mut self.chunks);
        let mut removed = 0;

        for c in (first..last).rev() {
            let chunk = &chunks[c];
            if chunk.first().is_some_and(in_range) && chunk.last().is_some_and(in_range) {
                removed += chunks.remove(c).len();
                continue;
            }
            if !chunks[c].iter().any(in_range) {
                continue;
            }

            let chunk = Arc::make_mut(&mut chunks[c]);
            let before = chunk.len();
            chunk.retain(|e| !in_range(e));
            removed += before - chunk.len();
            if chunk.is_empty() {
                chunks.remove(c);
            }
        }

        self.len -= removed;
        removed
    }

    /// Chunk holding `z` (or where it would go) and the position within it.
    ///
    /// The chunk index equals the chunk count when `z` is past every entity.
    fn locate(&self, z: ZIndex) -> (usize, Result<usize, usize>) {
        let c = self
            .chunks
            .partition_point(|ch| ch.last().is_some_and(|e| e.z_index() < z));

        match self.chunks.get(c) {
            Some(chunk) => (c, chunk.binary_search_by(|e| e.z_index().cmp(&z))),
            None => (c, Err(0)),
        }
    }
}

impl PartialEq for Chunks {
    fn eq(&self, other: &Self) -> bool {
        self.len == other.len && (self.ptr_eq(other) || self.iter().eq(other.iter()))
    }
}

use crate::scene::ZIndex;

use super::PoolError;

/// Lower bound of a region. `Unbounded` sorts before every real z-index.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum RegionStart {
    Unbounded,
    At(ZIndex),
}

impl RegionStart {
    #[inline]
    pub fn z(self) -> Option<ZIndex> {
        match self {
            RegionStart::Unbounded => None,
            RegionStart::At(z) => Some(z),
        }
    }
}

/// Identity of a region, stable for the region's lifetime.
///
/// Slots remember the id of the region they hold geometry for; ids are never
/// reused by a [`RegionList`].
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RegionId(u64);

/// A contiguous range of z-index space backed by one pooled buffer.
///
/// The range is `[start, next.start)`; the last region extends to +∞.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct BufferRegion {
    id: RegionId,
    start: RegionStart,
    dirty: bool,
}

impl BufferRegion {
    #[inline]
    pub fn id(&self) -> RegionId {
        self.id
    }

    #[inline]
    pub fn start(&self) -> RegionStart {
        self.start
    }

    /// Whether the backing geometry must be regenerated before the next draw.
    #[inline]
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    #[inline]
    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    #[inline]
    pub(crate) fn mark_clean(&mut self) {
        self.dirty = false;
    }
}

/// Sorted, gap-free partition of z-index space into regions.
///
/// Invariants:
/// - the first region starts at [`RegionStart::Unbounded`]
/// - starts are strictly increasing
#[derive(Debug)]
pub struct RegionList {
    regions: Vec<BufferRegion>,
    next_id: u64,
}

impl Default for RegionList {
    fn default() -> Self {
        Self::new()
    }
}

impl RegionList {
    /// A single clean region covering all of z-index space.
    pub fn new() -> Self {
        Self {
            regions: vec![BufferRegion {
                id: RegionId(0),
                start: RegionStart::Unbounded,
                dirty: false,
            }],
            next_id: 1,
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.regions.len()
    }

    /// Always false: the partition has at least the unbounded region.
    #[inline]
    pub fn is_empty(&self) -> bool {
        false
    }

    #[inline]
    pub fn as_slice(&self) -> &[BufferRegion] {
        &self.regions
    }

    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = &BufferRegion> {
        self.regions.iter()
    }

    /// Exclusive upper bound of region `i`; `None` means +∞.
    #[inline]
    pub fn end_of(&self, i: usize) -> Option<ZIndex> {
        self.regions.get(i + 1).and_then(|r| r.start.z())
    }

    /// Index of the region whose range contains `z`.
    pub fn index_containing(&self, z: ZIndex) -> usize {
        let at = RegionStart::At(z);
        // The first region is unbounded, so the partition point is at least 1.
        self.regions.partition_point(|r| r.start <= at) - 1
    }

    /// Marks the region containing `z` dirty and returns its id.
    pub fn mark_containing(&mut self, z: ZIndex) -> RegionId {
        let i = self.index_containing(z);
        let region = &mut self.regions[i];
        region.mark_dirty();
        region.id
    }

    /// Folds every dirty region into an immediately preceding dirty region.
    ///
    /// Returns the ids of the regions that no longer exist.
    pub fn merge_dirty(&mut self) -> Vec<RegionId> {
        let mut removed = Vec::new();
        let mut prev_dirty = false;

        self.regions.retain(|r| {
            let merge = prev_dirty && r.dirty;
            prev_dirty = r.dirty;
            if merge {
                removed.push(r.id);
            }
            !merge
        });

        removed
    }

    /// Inserts a dirty region starting at `at` right after region `i`.
    ///
    /// `at` must fall strictly inside region `i`; anything else would leave
    /// an empty region or break ordering.
    pub fn split_after(&mut self, i: usize, at: ZIndex) -> Result<RegionId, PoolError> {
        let start = RegionStart::At(at);
        let inside = self.regions[i].start < start && self.end_of(i).is_none_or(|end| at < end);
        if !inside {
            return Err(PoolError::InvalidSplit { z: at });
        }

        let id = self.fresh_id();
        self.regions.insert(i + 1, BufferRegion { id, start, dirty: true });
        Ok(id)
    }

    /// Splits the list around region `i`: the region itself, its end bound,
    /// and every region after it (the ones still to be visited this frame).
    pub(crate) fn cursor(
        &mut self,
        i: usize,
    ) -> (&mut BufferRegion, Option<ZIndex>, &[BufferRegion]) {
        let end = self.end_of(i);
        let (head, upcoming) = self.regions.split_at_mut(i + 1);
        (&mut head[i], end, upcoming)
    }

    /// Checks the partition invariants.
    pub fn is_valid_partition(&self) -> bool {
        matches!(self.regions.first(), Some(r) if r.start == RegionStart::Unbounded)
            && self.regions.windows(2).all(|w| w[0].start < w[1].start)
    }

    fn fresh_id(&mut self) -> RegionId {
        let id = RegionId(self.next_id);
        self.next_id += 1;
        id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn list_with_splits(at: &[i32]) -> RegionList {
        let mut list = RegionList::new();
        for &z in at {
            let last = list.len() - 1;
            list.split_after(last, ZIndex(z)).unwrap();
        }
        list
    }

    fn starts(list: &RegionList) -> Vec<Option<i32>> {
        list.iter().map(|r| r.start().z().map(ZIndex::get)).collect()
    }

    // ── lookup ────────────────────────────────────────────────────────────

    #[test]
    fn new_list_is_one_unbounded_region() {
        let list = RegionList::new();
        assert_eq!(list.len(), 1);
        assert!(list.is_valid_partition());
        assert_eq!(list.end_of(0), None);
        assert_eq!(list.index_containing(ZIndex(i32::MIN)), 0);
    }

    #[test]
    fn index_containing_respects_half_open_ranges() {
        let list = list_with_splits(&[10, 20]);
        assert_eq!(list.index_containing(ZIndex(-5)), 0);
        assert_eq!(list.index_containing(ZIndex(9)), 0);
        assert_eq!(list.index_containing(ZIndex(10)), 1);
        assert_eq!(list.index_containing(ZIndex(19)), 1);
        assert_eq!(list.index_containing(ZIndex(20)), 2);
        assert_eq!(list.index_containing(ZIndex(i32::MAX)), 2);
    }

    #[test]
    fn end_of_is_next_start() {
        let list = list_with_splits(&[10, 20]);
        assert_eq!(list.end_of(0), Some(ZIndex(10)));
        assert_eq!(list.end_of(1), Some(ZIndex(20)));
        assert_eq!(list.end_of(2), None);
    }

    // ── splitting ─────────────────────────────────────────────────────────

    #[test]
    fn split_inserts_dirty_region_after() {
        let mut list = list_with_splits(&[20]);
        let id = list.split_after(0, ZIndex(5)).unwrap();
        assert_eq!(starts(&list), vec![None, Some(5), Some(20)]);
        assert_eq!(list.as_slice()[1].id(), id);
        assert!(list.as_slice()[1].is_dirty());
        assert!(list.is_valid_partition());
    }

    #[test]
    fn split_at_own_start_is_invalid() {
        let mut list = list_with_splits(&[10]);
        assert_eq!(list.split_after(1, ZIndex(10)), Err(PoolError::InvalidSplit { z: ZIndex(10) }));
    }

    #[test]
    fn split_past_end_is_invalid() {
        let mut list = list_with_splits(&[10]);
        assert_eq!(list.split_after(0, ZIndex(10)), Err(PoolError::InvalidSplit { z: ZIndex(10) }));
        assert_eq!(list.len(), 2);
    }

    #[test]
    fn ids_are_never_reused() {
        let mut list = list_with_splits(&[10, 20]);
        let before: Vec<_> = list.iter().map(BufferRegion::id).collect();
        list.mark_containing(ZIndex(10));
        list.mark_containing(ZIndex(20));
        list.merge_dirty();
        let id = list.split_after(1, ZIndex(30)).unwrap();
        assert!(!before.contains(&id));
    }

    // ── merging ───────────────────────────────────────────────────────────

    #[test]
    fn adjacent_dirty_regions_merge_into_first() {
        let mut list = list_with_splits(&[10, 20, 30]);
        for r in &mut list.regions {
            r.mark_clean();
        }
        let second = list.mark_containing(ZIndex(10));
        let third = list.mark_containing(ZIndex(25));

        let removed = list.merge_dirty();

        assert_eq!(removed, vec![third]);
        assert_eq!(starts(&list), vec![None, Some(10), Some(30)]);
        assert_eq!(list.as_slice()[1].id(), second);
        assert!(list.is_valid_partition());
    }

    #[test]
    fn separated_dirty_regions_stay_apart() {
        let mut list = list_with_splits(&[10, 20]);
        for r in &mut list.regions {
            r.mark_clean();
        }
        list.mark_containing(ZIndex(0));
        list.mark_containing(ZIndex(20));
        assert!(list.merge_dirty().is_empty());
        assert_eq!(list.len(), 3);
    }

    #[test]
    fn merging_everything_leaves_one_region() {
        let mut list = list_with_splits(&[10, 20, 30]);
        list.mark_containing(ZIndex(0));
        list.merge_dirty();
        assert_eq!(list.len(), 1);
        assert!(!list.is_empty());
        assert_eq!(list.as_slice()[0].start(), RegionStart::Unbounded);
    }

    #[test]
    fn cursor_exposes_upcoming_regions() {
        let mut list = list_with_splits(&[10, 20]);
        let (region, end, upcoming) = list.cursor(1);
        assert_eq!(region.start(), RegionStart::At(ZIndex(10)));
        assert_eq!(end, Some(ZIndex(20)));
        assert_eq!(upcoming.len(), 1);
    }
}

use crate::coords::Rect;
use crate::paint::Color;

use super::chunks::Chunks;
use super::diff::diff_chunks;
use super::{DiffOp, Entity, SceneDiff, SceneError, ZIndex};

/// Persistent, z-ordered collection of entities plus a background color.
///
/// Every mutating operation returns a new `Scene`; the receiver is never
/// modified. Cloning is O(1). Entities live in shared fixed-size chunks, so
/// an edit copies one chunk and scenes a few edits apart diff in time
/// proportional to the chunks that changed.
///
/// Invariant: entities are sorted by strictly increasing z-index.
#[derive(Debug, Clone, PartialEq)]
pub struct Scene {
    entities: Chunks,
    background: Color,
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}

impl Scene {
    /// Empty scene with a white background.
    pub fn new() -> Self {
        Self {
            entities: Chunks::default(),
            background: Color::WHITE,
        }
    }

    /// Builds a scene from entities in any order.
    ///
    /// Fails with [`SceneError::DuplicateZIndex`] if two entities share a z-index.
    pub fn from_entities<I>(entities: I) -> Result<Scene, SceneError>
    where
        I: IntoIterator,
        I::Item: Into<Entity>,
    {
        let mut entities: Vec<Entity> = entities.into_iter().map(Into::into).collect();
        entities.sort_by_key(Entity::z_index);

        if let Some(w) = entities.windows(2).find(|w| w[0].z_index() == w[1].z_index()) {
            return Err(SceneError::DuplicateZIndex(w[0].z_index()));
        }

        Ok(Scene {
            entities: Chunks::from_sorted(entities),
            ..Scene::new()
        })
    }

    /// Entities in paint order (back-to-front).
    #[inline]
    pub fn entities(&self) -> impl Iterator<Item = &Entity> + Clone {
        self.entities.iter()
    }

    /// Entities with a z-index of at least `z` (all of them for `None`), in paint order.
    #[inline]
    pub fn entities_from(&self, z: Option<ZIndex>) -> impl Iterator<Item = &Entity> {
        self.entities.iter_from(z)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entities.len() == 0
    }

    #[inline]
    pub fn background(&self) -> Color {
        self.background
    }

    /// Returns the entity at `z`, if any.
    #[inline]
    pub fn entity(&self, z: ZIndex) -> Option<&Entity> {
        self.entities.get(z)
    }

    pub fn with_background_color(&self, color: Color) -> Scene {
        Scene {
            entities: self.entities.clone(),
            background: color,
        }
    }

    /// Returns a scene with `entity` inserted at its z-ordered position.
    ///
    /// Fails with [`SceneError::DuplicateZIndex`] if the z-index is taken.
    pub fn with_entity_added(&self, entity: impl Into<Entity>) -> Result<Scene, SceneError> {
        let mut next = self.clone();
        next.entities.insert(entity.into())?;
        Ok(next)
    }

    /// Returns a scene without any entity in the half-open range `[z_begin, z_end)`.
    ///
    /// An empty or inverted range returns an unchanged scene.
    pub fn with_entities_in_z_range_removed(&self, z_begin: ZIndex, z_end: ZIndex) -> Scene {
        let mut next = self.clone();
        if z_begin < z_end {
            next.entities.remove_range(z_begin, z_end);
        }
        next
    }

    /// Returns a scene without the entity at `z`.
    pub fn with_entity_removed(&self, z: ZIndex) -> Result<Scene, SceneError> {
        let mut next = self.clone();
        next.entities.remove(z)?;
        Ok(next)
    }

    /// Returns a scene where the entity at `entity.z_index()` is replaced.
    pub fn with_entity_replaced(&self, entity: impl Into<Entity>) -> Result<Scene, SceneError> {
        let mut next = self.clone();
        next.entities.replace(entity.into())?;
        Ok(next)
    }

    /// Edit script turning `self` into `other`.
    ///
    /// Scenes that still share entity storage compare in O(1).
    pub fn compare_to(&self, other: &Scene) -> SceneDiff {
        if self.entities.ptr_eq(&other.entities) {
            return SceneDiff::default();
        }
        SceneDiff::from_ops(diff_chunks(&self.entities, &other.entities))
    }

    /// Applies `diff` op by op.
    pub fn with_diff_applied(&self, diff: &SceneDiff) -> Result<Scene, SceneError> {
        let mut scene = self.clone();
        for op in diff {
            match op {
                DiffOp::Insert(e) => scene.entities.insert(e.clone())?,
                DiffOp::Remove(e) => {
                    scene.entities.remove(e.z_index())?;
                }
                DiffOp::Replace { new, .. } => scene.entities.replace(new.clone())?,
            }
        }
        Ok(scene)
    }

    /// Union of every entity's bounding box.
    ///
    /// An empty scene reports the unit square around the origin, `(-1, -1, 2, 2)`.
    pub fn bounding_box(&self) -> Rect {
        self.entities
            .iter()
            .map(Entity::bounding_box)
            .reduce(Rect::union)
            .unwrap_or(Rect::new(-1.0, -1.0, 2.0, 2.0))
    }
}

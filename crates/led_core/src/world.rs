//! World: the ordered set of levels and which one is active
//!
//! `add_level`, `make_active` and `delete_active_level` are the only ways
//! the active level changes, so the active id always names a member.

use crate::level::LevelId;
use crate::Level;
use glam::Vec2;

pub const DEFAULT_WORLD_NAME: &str = "New";

#[derive(Debug, Clone)]
pub struct World {
    pub name: String,
    levels: Vec<Level>,
    active: Option<LevelId>,
}

impl Default for World {
    fn default() -> Self {
        Self::new(DEFAULT_WORLD_NAME.to_string())
    }
}

impl World {
    pub fn new(name: String) -> Self {
        Self {
            name,
            levels: Vec::new(),
            active: None,
        }
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn levels(&self) -> &[Level] {
        &self.levels
    }

    /// Mutable access to the levels; membership can only change through the methods below
    pub fn levels_mut(&mut self) -> &mut [Level] {
        &mut self.levels
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    pub fn level(&self, id: LevelId) -> Option<&Level> {
        self.levels.iter().find(|l| l.id() == id)
    }

    pub fn level_mut(&mut self, id: LevelId) -> Option<&mut Level> {
        self.levels.iter_mut().find(|l| l.id() == id)
    }

    pub fn active_id(&self) -> Option<LevelId> {
        self.active
    }

    pub fn active_level(&self) -> Option<&Level> {
        self.active.and_then(|id| self.level(id))
    }

    pub fn active_level_mut(&mut self) -> Option<&mut Level> {
        let id = self.active?;
        self.level_mut(id)
    }

    pub fn is_active(&self, id: LevelId) -> bool {
        self.active == Some(id)
    }

    /// Name for the next level created in this world
    pub fn next_level_name(&self) -> String {
        format!("Level {}", self.levels.len() + 1)
    }

    /// Append a level and make it active
    pub fn add_level(&mut self, level: Level) -> LevelId {
        let id = level.id();
        log::debug!("Adding level '{}' at {}", level.name, level.bounds());
        self.levels.push(level);
        self.active = Some(id);
        id
    }

    /// Make a member level active. Returns true if the active level changed.
    pub fn make_active(&mut self, id: LevelId) -> bool {
        if self.active == Some(id) {
            return false;
        }
        if self.level(id).is_none() {
            log::warn!("Cannot activate unknown level {}", id);
            return false;
        }
        self.active = Some(id);
        true
    }

    /// Remove the active level. Any remaining level becomes active at random.
    pub fn delete_active_level(&mut self) -> Option<Level> {
        let id = self.active?;
        let index = self.levels.iter().position(|l| l.id() == id)?;
        let removed = self.levels.remove(index);

        self.active = if self.levels.is_empty() {
            None
        } else {
            Some(self.levels[fastrand::usize(..self.levels.len())].id())
        };

        log::info!("Deleted level '{}'", removed.name);
        Some(removed)
    }

    /// First level in insertion order whose bounds contain the point
    pub fn pick_level_at(&self, pos: Vec2) -> Option<LevelId> {
        self.levels
            .iter()
            .find(|l| l.bounds().contains(pos))
            .map(Level::id)
    }
}

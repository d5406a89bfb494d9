//! Shared projectile pool
//!
//! The world owns the pool; firing code only ever sees it through
//! [`ProjectileSink`], so nothing outside the world can read or remove shots.

use super::entity::{Body, Projectile};

/// Capability to inject a freshly fired projectile into the world
pub trait ProjectileSink {
    /// Returns `false` if the projectile was dropped
    fn add_projectile(&mut self, projectile: Projectile) -> bool;
}

/// Insertion-ordered, capacity-bounded projectile storage
#[derive(Debug, Clone)]
pub struct ProjectilePool {
    items: Vec<Projectile>,
    capacity: usize,
}

impl ProjectilePool {
    pub fn new(capacity: usize) -> Self {
        Self {
            items: Vec::new(),
            capacity,
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Projectile> {
        self.items.iter()
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, Projectile> {
        self.items.iter_mut()
    }

    /// Drop every inactive projectile, returning how many were removed
    pub fn remove_inactive(&mut self) -> usize {
        let before = self.items.len();
        self.items.retain(|p| p.is_active());
        before - self.items.len()
    }
}

impl ProjectileSink for ProjectilePool {
    fn add_projectile(&mut self, projectile: Projectile) -> bool {
        if self.items.len() >= self.capacity {
            log::warn!(
                "Projectile pool full ({}), dropping {:?} shot",
                self.capacity,
                projectile.kind
            );
            return false;
        }
        self.items.push(projectile);
        true
    }
}

//! Fixed-capacity projectile store.
//!
//! A slot's `active` flag is its only bookkeeping: inactive slots form the
//! free set, so there is no separate free list to keep in sync.  The pool
//! never grows, which bounds the cost of the collision passes.

use crate::entities::{Bullet, Facing};

#[derive(Clone, Debug)]
pub struct BulletPool {
    bullets: Vec<Bullet>,
}

impl BulletPool {
    /// A pool of `capacity` inactive bullets sharing one size and speed.
    pub fn new(capacity: usize, width: f32, height: f32, speed: f32) -> Self {
        let template = Bullet {
            x: 0.0,
            y: 0.0,
            width,
            height,
            speed,
            direction: Facing::Right,
            active: false,
        };
        BulletPool {
            bullets: vec![template; capacity],
        }
    }

    pub fn capacity(&self) -> usize {
        self.bullets.len()
    }

    pub fn active_count(&self) -> usize {
        self.bullets.iter().filter(|b| b.active).count()
    }

    /// Activate the first free slot at `(x, y)` travelling in `direction`.
    /// Returns the slot index, or `None` when every slot is busy; the shot is
    /// then simply dropped.
    pub fn acquire(&mut self, x: f32, y: f32, direction: Facing) -> Option<usize> {
        let (index, bullet) = self.bullets.iter_mut().enumerate().find(|(_, b)| !b.active)?;
        bullet.x = x;
        bullet.y = y;
        bullet.direction = direction;
        bullet.active = true;
        Some(index)
    }

    /// Return a slot to the free set.  Out-of-range indices are ignored.
    pub fn deactivate(&mut self, index: usize) {
        if let Some(bullet) = self.bullets.get_mut(index) {
            bullet.active = false;
        }
    }

    /// Move every active bullet one frame and free those that left
    /// `[0, world_width]`.
    pub fn update(&mut self, world_width: f32) {
        for bullet in self.bullets.iter_mut().filter(|b| b.active) {
            bullet.x += bullet.speed * bullet.direction.sign();
            if bullet.x > world_width || bullet.x + bullet.width < 0.0 {
                bullet.active = false;
            }
        }
    }

    pub fn get(&self, index: usize) -> Option<&Bullet> {
        self.bullets.get(index)
    }

    /// Active bullets only.
    pub fn active(&self) -> impl Iterator<Item = &Bullet> {
        self.bullets.iter().filter(|b| b.active)
    }

    /// Indices of active bullets, for passes that deactivate while iterating.
    pub fn active_indices(&self) -> Vec<usize> {
        self.bullets
            .iter()
            .enumerate()
            .filter(|(_, b)| b.active)
            .map(|(i, _)| i)
            .collect()
    }
}

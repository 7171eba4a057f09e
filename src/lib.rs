//! Simulation core for a side-scrolling portal shooter.
//!
//! The library owns every rule of the game: movement, collisions, spawning,
//! the boss encounter and collectable effects.  It performs no I/O.  The
//! terminal front-end in `main.rs` feeds an [`entities::InputState`] into
//! [`compute::tick`] once per frame and draws whatever
//! [`render::draw_list`] returns.

pub mod boss;
pub mod collectable;
pub mod collision;
pub mod compute;
pub mod config;
pub mod entities;
pub mod error;
pub mod pool;
pub mod render;
pub mod spawner;

//! Grid ray casting renderer: a first-person view of a tile map drawn one
//! screen column at a time, plus a top-down minimap.
//!
//! Per tick the [`frame::Simulation`] moves the player, casts one ray per
//! column with [`caster::RayCaster`], projects the hits with
//! [`renderer::render_view`] and overlays [`minimap::Minimap`]. All output
//! goes through a [`draw::DrawingBackend`].

pub mod caster;
pub mod config;
pub mod draw;
pub mod frame;
pub mod framebuffer;
pub mod minimap;
pub mod player;
pub mod renderer;
pub mod scaler;
pub mod world;

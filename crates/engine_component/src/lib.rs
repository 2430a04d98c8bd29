//! # engine_component
//!
//! The "C" in ECS: defines what a component is, how entities are
//! identified, and where component data lives at runtime.
//!
//! This crate provides:
//!
//! - [`Component`] trait: the contract all ECS data must satisfy.
//! - [`Entity`]: lightweight `u64` entity identifiers.
//! - [`EntityAllocator`]: monotonically increasing ID allocator.
//! - [`World`]: typed per-component storage that systems read and mutate.

pub mod component;
pub mod entity;
pub mod world;

pub use component::{Component, ComponentTypeId};
pub use entity::{Entity, EntityAllocator};
pub use world::{World, WorldError};

//! ECS components for entities.
//!
//! Submodules overview:
//! - [`controllerbinding`] – the controller an entity owns; releases it when removed
//! - [`inputcontrolled`] – moves an entity from its controller's directional inputs
//! - [`mapposition`] – world-space position (pivot) for an entity
//! - [`rigidbody`] – simple kinematic body storing velocity
//! - [`shapevisual`] – drawable queued for the entity every frame

pub mod controllerbinding;
pub mod inputcontrolled;
pub mod mapposition;
pub mod rigidbody;
pub mod shapevisual;

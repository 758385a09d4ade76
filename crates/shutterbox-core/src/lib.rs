//! Shared plumbing for Shutterbox services: health endpoints, tracing
//! setup, and common tower layers.

pub mod health;
pub mod middleware;
pub mod tracing;

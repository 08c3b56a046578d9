//! Request handlers

pub mod bubbles;
pub mod health;
pub mod live;
pub mod ops;
pub mod suggestions;

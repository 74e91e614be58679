//! API handlers module

pub mod catalog;
pub mod documents;
pub mod health;
pub mod translate;
pub mod translations;

//! Rally Sim - single-stage rally attempt simulation

pub mod analysis;
pub mod catalog;
pub mod core;
pub mod entity;
pub mod report;
pub mod simulation;

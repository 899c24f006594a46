//! Request handlers

pub mod crew_members;
pub mod reference;
pub mod health;

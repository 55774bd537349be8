// Service module exports

pub mod interaction;
pub mod layout;

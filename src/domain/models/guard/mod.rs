pub mod guard_decision;

pub use guard_decision::*;

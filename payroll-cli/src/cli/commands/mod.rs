pub mod aliases;
pub mod consolidate;
pub mod inspect;

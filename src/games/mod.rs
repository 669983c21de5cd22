//! Game rule sets.

pub mod kittens;

pub use kittens::KittensRules;

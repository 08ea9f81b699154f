//! Concrete games implementing `GameState`.

pub mod no_thanks;

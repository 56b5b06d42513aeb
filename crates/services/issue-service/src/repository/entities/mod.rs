//! SeaORM entity definitions.

pub mod issue;

//! `SeaORM` entity definitions.

pub mod cash_launches;

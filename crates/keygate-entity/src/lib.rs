//! # keygate-entity
//!
//! Domain entity models for Keygate. Entities derive `Debug`, `Clone`,
//! `Serialize`, `Deserialize`, and database entities additionally derive
//! `sqlx::FromRow`. The crate also defines the [`user::UserStore`]
//! capability implemented by the database crate.

pub mod user;

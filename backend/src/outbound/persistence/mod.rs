//! PostgreSQL persistence adapters using Diesel.
//!
//! Repositories translate between Diesel rows (`models`, `schema`) and
//! domain values and hold no business rules. Connections come from a `bb8`
//! pool through `diesel-async`; the schema is applied at startup from the
//! embedded migrations.
//!
//! ```ignore
//! use voter_registry::outbound::persistence::{DbPool, DieselRegistrantRepository, PoolConfig};
//!
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/registry")).await?;
//! let registrants = DieselRegistrantRepository::new(pool);
//! ```

mod diesel_basic_error_mapping;
mod diesel_partition_repository;
mod diesel_registrant_repository;
mod diesel_voter_repository;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_partition_repository::DieselPartitionRepository;
pub use diesel_registrant_repository::DieselRegistrantRepository;
pub use diesel_voter_repository::DieselVoterRepository;
pub use migrations::{MigrationError, run_pending_migrations};
pub use pool::{DbPool, PoolConfig, PoolError};

//! Output module for writing workflow results
//!
//! This module handles:
//! - Writing the enriched company table (email workflow)
//! - Writing collected registry records (registry workflow)
//! - Recording and printing run statistics

mod csv_output;
pub mod stats;

pub use csv_output::{
    registry_columns, save_email_table, save_registry_records, write_email_table,
    write_registry_records, DOMAIN_COLUMN, EMAIL_COLUMN,
};
pub use stats::{print_email_statistics, print_registry_statistics, EmailRunStats, RegistryRunStats};

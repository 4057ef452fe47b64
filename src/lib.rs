pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use crate::adapters::{LocalStorage, MemoryStorage};
pub use crate::core::engine::DashboardEngine;
pub use crate::core::generator::{generate, generate_on, hash_code, normalize_domain, pseudo_random};
pub use crate::domain::model::WebsiteMetrics;
pub use crate::utils::error::{Result, SiteMetricsError};

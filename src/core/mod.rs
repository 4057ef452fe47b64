pub mod bookmarks;
pub mod chart;
pub mod compare;
pub mod dashboard;
pub mod engine;
pub mod export;
pub mod format;
pub mod generator;
pub mod render;
pub mod share;
pub mod source;

pub use crate::domain::model::{Bookmark, WebsiteMetrics};
pub use crate::domain::ports::{MetricsSource, Storage};
pub use crate::utils::error::Result;

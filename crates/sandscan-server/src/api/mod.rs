pub mod admin;
pub mod analyze;

pub use admin::admin_router;
pub use analyze::analysis_router;

pub mod app_error;
pub mod classifier;
pub mod helpers;
pub mod use_cases;

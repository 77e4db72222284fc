pub mod app_error;
pub mod jwt;
pub mod origin_policy;

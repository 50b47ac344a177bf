pub mod attendance;
pub mod auth;
pub mod core;
pub mod form;
pub mod nav;
pub mod reports;
pub mod students;

pub mod auth;
pub mod kitchen;
pub mod menu;
pub mod orders;

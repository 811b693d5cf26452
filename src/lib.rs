pub mod api;
pub mod session;
pub mod storage;
pub mod theme;
pub mod token;
pub mod types;
pub mod ui;
pub mod views;

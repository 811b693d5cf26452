pub mod chat;
pub mod dashboard;
pub mod settings;
pub mod shared;
pub mod signin;

pub use chat::FloatingChat;
pub use dashboard::DashboardView;
pub use settings::SettingsView;
pub use signin::SignInView;

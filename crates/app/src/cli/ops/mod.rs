pub mod activity;
pub mod daemon;
pub mod dashboard;
pub mod health;
pub mod init;
pub mod login;
pub mod slide;
pub mod user;
pub mod version;

pub use activity::Activity;
pub use daemon::Daemon;
pub use dashboard::Dashboard;
pub use health::Health;
pub use init::Init;
pub use login::{Login, Logout, Passwd};
pub use slide::Slide;
pub use user::User;
pub use version::Version;

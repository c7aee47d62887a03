pub mod args;
pub mod op;
pub mod ops;

pub use ops::{
    Activity, Daemon, Dashboard, Health, Init, Login, Logout, Passwd, Slide, User, Version,
};

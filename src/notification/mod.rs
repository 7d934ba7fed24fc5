pub mod client;

pub use client::{NotificationsApi, NotificationsClient};

//! HTTP front-end over [`AddressMonitorTrait`](crate::services::address_monitor::AddressMonitorTrait).

mod server;

pub use server::{configure, create_api_server, MonitorData};

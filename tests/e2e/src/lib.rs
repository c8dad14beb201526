//! Process-level checks against a running `web` server.

pub mod browser;
pub mod test_server;

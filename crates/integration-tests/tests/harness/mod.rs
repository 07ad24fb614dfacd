//! Shared test harness: mock upstream, test server, config builder

pub mod config;
pub mod mock_openai;
pub mod server;

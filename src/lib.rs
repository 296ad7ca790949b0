pub mod api;
pub mod config;
pub mod debounce;
pub mod engine;
pub mod entities;
pub mod error;
pub mod external;
pub mod map;
pub mod report;
pub mod sequence;
pub mod server;

#![forbid(unsafe_code)]

pub mod config;
pub mod http;
pub mod memory;
pub mod repository;

pub use config::BackendConfig;
pub use http::HttpBackend;
pub use memory::InMemoryBackend;
pub use repository::{Backend, BackendError, ProgressBackend, QuizBackend, RoadmapBackend};

pub mod benchmark;
pub mod community;
pub mod config;
pub mod device;
pub mod error;
pub mod feedback;
pub mod games;
pub mod news;
pub mod player;
pub mod prompt;
pub mod sensitivity;
pub mod session;
pub mod stats;
pub mod storage;
pub mod updates;
// cmd and reports belong to the binary (main.rs); the pipeline and its collaborators live here
// so integration tests can drive them without a terminal.

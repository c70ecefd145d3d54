//! Infrastructure implementations (JSON files, paths) for CollegeBot.
//!
//! This crate provides the file-backed implementations of the core
//! repository traits, plus atomic write support and platform path
//! resolution.

pub mod atomic_json;
pub mod json_history_repository;
pub mod json_selection_repository;
pub mod paths;

pub use json_history_repository::JsonHistoryRepository;
pub use json_selection_repository::JsonSelectionRepository;
pub use paths::BotPaths;

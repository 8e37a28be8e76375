//! Port layer - Abstract interfaces for infrastructure dependencies
//!
//! The bridge never reaches for an ambient store or a global highlighter;
//! adapters for these traits are injected at startup.

pub mod highlighter;
pub mod storage_port;

pub use highlighter::SyntaxHighlighter;
pub use storage_port::StoragePort;

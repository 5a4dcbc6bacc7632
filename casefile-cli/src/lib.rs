// All categorization logic is in casefile-core
// This CLI acts as a thin wrapper around the core library

// CLI-specific modules
pub mod batch;
pub mod report;

// Re-export core types for convenience
pub use casefile_core::*;

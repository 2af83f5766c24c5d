// External integrations module
// Adapters for git, Azure DevOps and the OS keychain

pub mod azdo;
pub mod credentials;
pub mod git;

//! Command implementations.

pub mod completions;
pub mod configure;
pub mod workspace;

pub use completions::handle_completions;
pub use configure::handle_configure;
pub use workspace::handle_workspace;

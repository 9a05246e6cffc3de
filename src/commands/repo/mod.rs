//! Repository lifecycle and remote configuration.

pub mod clone;
pub mod config;
pub mod fetch;
pub mod init;
pub mod pull;
pub mod push;
pub mod remote;

pub use clone::clone;
pub use config::config;
pub use fetch::fetch;
pub use init::init;
pub use pull::pull;
pub use push::push;
pub use remote::remote;

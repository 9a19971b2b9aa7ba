pub mod config;
pub mod dispatcher;
pub mod signer;
pub mod transport;
pub mod validation;

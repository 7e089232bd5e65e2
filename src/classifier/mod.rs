mod client;
mod error;
mod wire;

pub use client::{Classifier, MailSenseClient};
pub use error::TransportError;

#[cfg(test)]
pub(crate) use client::tests::{echo_backend, spawn_backend};

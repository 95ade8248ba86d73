#[macro_use]
extern crate serde;

#[macro_use]
extern crate log;

#[macro_use]
mod serde_hex;

mod ballot;
mod challenge;
mod decryption;
mod dlog;
mod election;
mod error;
mod group;
mod keygen;
mod scalar;
mod service;
mod tally;
mod vote;

pub use ballot::*;
pub use challenge::*;
pub use decryption::*;
pub use dlog::*;
pub use election::*;
pub use error::*;
pub use group::*;
pub use keygen::*;
pub use scalar::*;
pub use serde_hex::*;
pub use service::*;
pub use tally::*;
pub use vote::*;

pub use rand_core::CryptoRngCore;

#[cfg(test)]
mod tests;

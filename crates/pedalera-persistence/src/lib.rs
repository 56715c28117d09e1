//! Bank document serialization and file storage for pedalera.
//!
//! This crate projects the live routing graph into a serializable document
//! tree and back:
//!
//! - [`codec`] - the document types and the `encode_bank`/`decode_bank`
//!   projection, with cross-references as integer indices
//! - [`bankfile`] - JSON file load/save on top of the codec
//! - [`paths`] - platform directories and bank-name resolution
//! - [`PersistError`] - typed failures for I/O, parsing, and graph rebuild
//!
//! Round trips are deterministic: given the same plugin registry,
//! `decode_bank(encode_bank(bank))` reconstructs a graph with the same
//! pedalboard order, effect order, and connection set.

pub mod bankfile;
pub mod codec;
pub mod error;
pub mod paths;

pub use bankfile::{load_bank, save_bank};
pub use codec::{
    BankDocument, ConnectionDocument, EffectDocument, EndpointDocument, EndpointEffect,
    PedalboardDocument, decode_bank, decode_pedalboard, encode_bank, encode_pedalboard,
};
pub use error::PersistError;

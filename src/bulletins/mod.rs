//! Circular data: wire types, envelope classification and the list client

pub mod client;
pub mod error;
pub mod types;

pub use client::{BulletinSource, HttpBulletinClient, StaticSource};
pub use error::FetchError;
pub use types::{
    Bulletin, Diagnostics, FetchedBulletins, ResponseEnvelope, GENERIC_FETCH_ERROR, NOT_AVAILABLE,
};

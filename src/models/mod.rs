//! Data models for the address book.
//!
//! This module contains the contact and tag records exactly as they are
//! persisted and exchanged through import/export.

pub mod contact;
pub mod tag;

pub use contact::Contact;
pub use tag::{Tag, DEFAULT_TAG_COLOR};

//! Domain value objects and validation.
//!
//! This module contains type-safe wrappers for contact ids and email
//! addresses, plus the record-level validation applied when contacts are
//! loaded from storage or created.

pub mod contact_id;
pub mod email;
pub mod errors;
pub mod validation;

pub use contact_id::ContactId;
pub use email::{normalize_email, EmailAddress};
pub use errors::ValidationError;
pub use validation::{validate_contact, validate_contacts, validate_new_contact};

//! Moving contacts and tags in and out as CSV or JSON text.

mod csv;
mod json;
mod merge;

pub use csv::{contacts_to_csv, csv_to_contacts, parse_csv_line};
pub use json::{contacts_to_json, json_to_contacts, JsonImport, EXPORT_FORMAT_VERSION};
pub use merge::{backup_filename, merge_contacts, merge_tags, TransferFormat};

pub mod contact;
pub mod test_utils;

pub use contact::{is_valid_contact, mask_contact, normalize_contact};

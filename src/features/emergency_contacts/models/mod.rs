pub mod contact;

pub use contact::{ContactChanges, EmergencyContact, NewContact};

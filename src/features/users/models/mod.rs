pub mod profile;

pub use profile::{ProfileChanges, UserProfile};

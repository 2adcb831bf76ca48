pub mod alert;

pub use alert::{AlertLocation, EmergencyAlert, NewAlert};

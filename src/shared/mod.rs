pub mod constants;
pub mod messages;
#[cfg(test)]
pub mod test_helpers;
pub mod types;
pub mod validation;

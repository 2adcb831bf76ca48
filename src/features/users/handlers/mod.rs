pub mod profile_handler;

pub use profile_handler::{
    __path_change_password, __path_get_profile, __path_update_profile, change_password,
    get_profile, update_profile,
};

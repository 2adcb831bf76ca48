pub mod contact_handler;

pub use contact_handler::{
    __path_create_contact, __path_delete_contact, __path_get_contact, __path_list_contacts,
    __path_update_contact, create_contact, delete_contact, get_contact, list_contacts,
    update_contact,
};

pub mod alert_handler;

pub use alert_handler::{
    __path_create_alert, __path_list_alerts, __path_resolve_alert, create_alert, list_alerts,
    resolve_alert,
};

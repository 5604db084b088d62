pub mod data_table;
pub mod layout;
pub mod save_badge;
pub mod session;
pub mod toast;

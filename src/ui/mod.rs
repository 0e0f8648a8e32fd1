pub mod components;
pub mod home;
pub mod project_form;
pub mod project_table;

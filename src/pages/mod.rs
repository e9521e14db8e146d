pub mod login;
pub mod projects;
pub mod settings;
pub mod tasks;

pub mod ai;
pub mod commands;
pub mod crm;
pub mod dashboard;
pub mod documents;
pub mod finance;
pub mod projects;

pub mod help;
pub mod lists;
pub mod modlog;
pub mod remind;
pub mod web;

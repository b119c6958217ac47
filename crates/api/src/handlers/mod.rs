pub mod catalog;
pub mod upload;

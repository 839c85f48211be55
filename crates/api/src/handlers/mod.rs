pub mod generate;
pub mod status;
pub mod tasks;
pub mod upload;

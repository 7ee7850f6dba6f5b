pub mod batch;
pub mod file;
pub mod interactive;

pub mod config;
pub mod document;
pub mod errors;
pub mod init;
pub mod logging;
pub mod review;
pub mod selection;
pub mod sift_config;
pub mod sink;
pub mod source;
pub mod ui;

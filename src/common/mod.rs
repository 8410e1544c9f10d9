pub mod error;
pub mod flash;
pub mod response;
pub mod security;

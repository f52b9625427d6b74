pub mod init;
pub mod schema;

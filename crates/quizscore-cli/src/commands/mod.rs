pub mod init;
pub mod results;
pub mod score;
pub mod serve;
pub mod upload_emails;
pub mod validate;

pub mod init;
pub mod team;
pub mod teams;

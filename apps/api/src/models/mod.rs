pub mod alert;
pub mod application;
pub mod company;
pub mod job;
pub mod resume;
pub mod user;

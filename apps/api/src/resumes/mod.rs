// Resume upload, text extraction, and resume-driven job matching.

pub mod handlers;
pub mod pdf;
pub mod queries;

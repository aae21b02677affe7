// Job board: search, posting, detail views, applications and saved jobs.

pub mod handlers;
pub mod queries;
pub mod search;

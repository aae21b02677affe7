// Role-specific dashboard summaries for candidates, employers and admins.

pub mod handlers;
pub mod metrics;

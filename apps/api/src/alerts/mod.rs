// Job alert subscriptions and new-job email fan-out.

pub mod dispatch;
pub mod handlers;

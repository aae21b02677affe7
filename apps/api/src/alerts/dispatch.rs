//! New-job alert fan-out.
//!
//! Runs detached from the request that created the job. Every failure is
//! logged and swallowed.

use std::sync::Arc;

use tokio::task::JoinHandle;
use tracing::{info, warn};

use crate::errors::AppError;
use crate::mailer::{job_alert_email, EmailMessage, JobAlert, Mailer};
use crate::models::alert::{AlertRecipientRow, AlertSubscriptionRow};
use crate::models::job::JobListingRow;
use crate::state::AppState;

/// A subscription matches when each criterion it sets is contained,
/// case-insensitively, in the job's title (keywords) or location.
/// Subscriptions with neither criterion never match.
pub fn alert_matches(subscription: &AlertSubscriptionRow, title: &str, location: &str) -> bool {
    if subscription.keywords.is_none() && subscription.location.is_none() {
        return false;
    }

    let contains = |haystack: &str, needle: &Option<String>| {
        needle
            .as_deref()
            .map_or(true, |n| haystack.to_lowercase().contains(&n.to_lowercase()))
    };

    contains(title, &subscription.keywords) && contains(location, &subscription.location)
}

pub fn matching_alerts(recipients: &[AlertRecipientRow], job: &JobListingRow) -> Vec<JobAlert> {
    recipients
        .iter()
        .filter(|r| !r.email.is_empty())
        .filter(|r| alert_matches(&r.subscription, &job.job.title, &job.job.location))
        .map(|r| JobAlert {
            to: r.email.clone(),
            job_title: job.job.title.clone(),
            company_name: job
                .company_name
                .clone()
                .unwrap_or_else(|| "Unknown company".to_string()),
            job_id: job.job.id,
        })
        .collect()
}

/// Sends each message on its own task.
pub fn deliver(mailer: Arc<dyn Mailer>, emails: Vec<EmailMessage>) -> Vec<JoinHandle<()>> {
    emails
        .into_iter()
        .map(|email| {
            let mailer = Arc::clone(&mailer);
            tokio::spawn(async move {
                let to = email.to.clone();
                if let Err(e) = mailer.send(email).await {
                    warn!(to = %to, "Job alert email failed: {e}");
                }
            })
        })
        .collect()
}

async fn send_job_alerts(state: &AppState, job: &JobListingRow) -> Result<usize, AppError> {
    let recipients = sqlx::query_as::<_, AlertRecipientRow>(
        r#"
        SELECT s.*, u.email
        FROM job_alert_subscriptions s
        JOIN users u ON u.id = s.user_id
        WHERE s.keywords IS NOT NULL OR s.location IS NOT NULL
        "#,
    )
    .fetch_all(&state.db)
    .await?;

    let emails: Vec<EmailMessage> = matching_alerts(&recipients, job)
        .iter()
        .map(|alert| job_alert_email(alert, &state.config.app_base_url))
        .collect();
    let sent = emails.len();

    deliver(Arc::clone(&state.mailer), emails);
    Ok(sent)
}

/// Detaches the alert fan-out for a newly created job.
pub fn spawn_job_alerts(state: AppState, job: JobListingRow) {
    tokio::spawn(async move {
        match send_job_alerts(&state, &job).await {
            Ok(0) => {}
            Ok(n) => info!("Dispatched {n} alert(s) for job {}", job.job.id),
            Err(e) => warn!("Alert fan-out for job {} failed: {e}", job.job.id),
        }
    });
}

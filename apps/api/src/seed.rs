//! Startup data: demo jobs for an empty board and the bootstrap admin.

use anyhow::{Context, Result};
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::auth::password::hash_password;
use crate::config::AdminBootstrap;
use crate::jobs::queries::{insert_job, NewJob};
use crate::models::user::Role;

pub const DEMO_COMPANY: &str = "RoleRocket Labs";
pub const DEMO_EMPLOYER_EMAIL: &str = "employer@rolerocket.com";

/// Never produced by `hash_password`, so the demo employer cannot sign in.
const UNUSABLE_PASSWORD_HASH: &str = "seed";

struct DemoJob {
    title: &'static str,
    description: &'static str,
    location: &'static str,
    salary: (i32, i32),
    job_type: &'static str,
    skills: &'static [&'static str],
}

const DEMO_JOBS: [DemoJob; 10] = [
    DemoJob {
        title: "Frontend Engineer Intern",
        description: "Join our core team to build responsive and performant web interfaces using React and Next.js.",
        location: "Remote",
        salary: (40_000, 60_000),
        job_type: "INTERNSHIP",
        skills: &["React", "Next.js", "TypeScript", "Tailwind CSS"],
    },
    DemoJob {
        title: "Senior Full Stack Developer",
        description: "Looking for an experienced engineer to lead our product development across the stack.",
        location: "San Francisco, CA",
        salary: (140_000, 180_000),
        job_type: "FULL_TIME",
        skills: &["Node.js", "React", "PostgreSQL", "AWS", "TypeScript"],
    },
    DemoJob {
        title: "Backend SWE Intern",
        description: "Help scale our API platform. You'll work with Node.js, databases, and message queues.",
        location: "New York, NY",
        salary: (50_000, 70_000),
        job_type: "INTERNSHIP",
        skills: &["Node.js", "Express", "PostgreSQL", "API"],
    },
    DemoJob {
        title: "DevOps Engineer",
        description: "Manage and improve our cloud infrastructure, CI/CD pipelines, and monitoring systems.",
        location: "Remote",
        salary: (120_000, 160_000),
        job_type: "FULL_TIME",
        skills: &["Docker", "Kubernetes", "AWS", "CI/CD", "Linux"],
    },
    DemoJob {
        title: "Product Manager",
        description: "Drive product strategy and execution for our core enterprise offerings.",
        location: "London, UK",
        salary: (110_000, 150_000),
        job_type: "FULL_TIME",
        skills: &["Product Management", "Agile", "Scrum", "Data Analysis"],
    },
    DemoJob {
        title: "Data Scientist Intern",
        description: "Analyze large datasets to extract actionable insights and build predictive models.",
        location: "Remote",
        salary: (45_000, 65_000),
        job_type: "INTERNSHIP",
        skills: &["Python", "SQL", "Machine Learning", "Data Analysis"],
    },
    DemoJob {
        title: "React Native Developer",
        description: "Build beautiful and fast mobile applications for iOS and Android.",
        location: "Berlin, Germany",
        salary: (90_000, 130_000),
        job_type: "FULL_TIME",
        skills: &["React Native", "JavaScript", "TypeScript", "Mobile"],
    },
    DemoJob {
        title: "Cloud Architect",
        description: "Design and implement scalable, resilient cloud architectures for our enterprise clients.",
        location: "Remote",
        salary: (160_000, 200_000),
        job_type: "FULL_TIME",
        skills: &["AWS", "Azure", "GCP", "Architecture", "Kubernetes"],
    },
    DemoJob {
        title: "UX/UI Designer Intern",
        description: "Create intuitive and engaging user experiences for our web platform.",
        location: "San Francisco, CA",
        salary: (40_000, 55_000),
        job_type: "INTERNSHIP",
        skills: &["Figma", "UI Design", "UX Research", "Prototyping"],
    },
    DemoJob {
        title: "QA Automation Engineer",
        description: "Develop automated test suites to ensure the quality and reliability of our applications.",
        location: "Remote",
        salary: (80_000, 110_000),
        job_type: "FULL_TIME",
        skills: &["Testing", "Jest", "Cypress", "Automation"],
    },
];

impl DemoJob {
    fn to_new_job(&self) -> NewJob {
        NewJob {
            title: self.title.to_string(),
            description: self.description.to_string(),
            location: self.location.to_string(),
            salary_min: Some(self.salary.0),
            salary_max: Some(self.salary.1),
            job_type: self.job_type.to_string(),
            skills: self.skills.iter().map(|s| s.to_string()).collect(),
        }
    }
}

/// Populates an empty jobs table with the demo company and its postings.
/// Returns the number of jobs inserted (0 when jobs already exist).
pub async fn seed_jobs_if_empty(pool: &PgPool) -> Result<usize> {
    let existing: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM jobs")
        .fetch_one(pool)
        .await?;
    if existing > 0 {
        return Ok(0);
    }

    info!("Seeding {} demo jobs", DEMO_JOBS.len());
    let mut tx = pool.begin().await?;

    let company_id: Uuid = match sqlx::query_scalar::<_, Uuid>(
        "SELECT id FROM companies WHERE name = $1 LIMIT 1",
    )
    .bind(DEMO_COMPANY)
    .fetch_optional(&mut *tx)
    .await?
    {
        Some(id) => id,
        None => {
            sqlx::query_scalar::<_, Uuid>(
                r#"
                INSERT INTO companies (name, description, location, website)
                VALUES ($1, $2, $3, $4)
                RETURNING id
                "#,
            )
            .bind(DEMO_COMPANY)
            .bind("Launching careers into orbit with the best roles.")
            .bind("San Francisco, CA")
            .bind("https://rolerocket.com")
            .fetch_one(&mut *tx)
            .await?
        }
    };

    sqlx::query(
        r#"
        INSERT INTO users (email, password_hash, name, role, company_id)
        VALUES ($1, $2, $3, $4, $5)
        ON CONFLICT (email) DO NOTHING
        "#,
    )
    .bind(DEMO_EMPLOYER_EMAIL)
    .bind(UNUSABLE_PASSWORD_HASH)
    .bind("RoleRocket Employer")
    .bind(Role::Employer.as_str())
    .bind(company_id)
    .execute(&mut *tx)
    .await?;

    for job in &DEMO_JOBS {
        insert_job(&mut *tx, company_id, &job.to_new_job())
            .await
            .with_context(|| format!("Failed to seed job '{}'", job.title))?;
    }

    tx.commit().await?;
    info!("Seeded {} demo jobs", DEMO_JOBS.len());
    Ok(DEMO_JOBS.len())
}

/// Creates the admin account if no user holds its email yet.
/// An existing account is left untouched.
pub async fn ensure_admin(pool: &PgPool, admin: &AdminBootstrap) -> Result<()> {
    let password_hash = hash_password(&admin.password)?;
    let inserted = sqlx::query(
        r#"
        INSERT INTO users (email, password_hash, name, role)
        VALUES ($1, $2, $3, $4)
        ON CONFLICT (email) DO NOTHING
        "#,
    )
    .bind(&admin.email)
    .bind(&password_hash)
    .bind("Administrator")
    .bind(Role::Admin.as_str())
    .execute(pool)
    .await?
    .rows_affected();

    if inserted > 0 {
        info!(email = %admin.email, "Created bootstrap admin account");
    }
    Ok(())
}

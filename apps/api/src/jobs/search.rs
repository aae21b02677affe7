//! Job search filters and pagination for `GET /api/jobs`.

use serde::Deserialize;
use sqlx::{Postgres, QueryBuilder};

pub const PAGE_SIZE: i64 = 10;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobSearchParams {
    pub q: Option<String>,
    pub location: Option<String>,
    pub job_type: Option<String>,
    pub company: Option<String>,
    pub page: Option<i64>,
}

impl JobSearchParams {
    /// 1-based page; anything below 1 is treated as the first page.
    /// Capped so `offset()` cannot overflow.
    pub fn page(&self) -> i64 {
        self.page.unwrap_or(1).clamp(1, i64::MAX / PAGE_SIZE)
    }

    pub fn offset(&self) -> i64 {
        (self.page() - 1) * PAGE_SIZE
    }

    /// Appends ` WHERE ...` for every non-blank filter.
    ///
    /// `q` matches title or description case-insensitively, or any of its
    /// comma-separated terms exactly equal to one of the job's skills.
    pub fn push_filters(&self, builder: &mut QueryBuilder<'_, Postgres>) {
        builder.push(" WHERE TRUE");

        if let Some(q) = present(&self.q) {
            let pattern = like_pattern(q);
            builder
                .push(" AND (j.title ILIKE ")
                .push_bind(pattern.clone())
                .push(" OR j.description ILIKE ")
                .push_bind(pattern)
                .push(" OR j.skills && ")
                .push_bind(skill_terms(q))
                .push(")");
        }

        if let Some(location) = present(&self.location) {
            builder
                .push(" AND j.location ILIKE ")
                .push_bind(like_pattern(location));
        }

        if let Some(job_type) = present(&self.job_type) {
            builder
                .push(" AND LOWER(j.job_type) = LOWER(")
                .push_bind(job_type.to_string())
                .push(")");
        }

        if let Some(company) = present(&self.company) {
            builder
                .push(" AND c.name ILIKE ")
                .push_bind(like_pattern(company));
        }
    }
}

fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

/// `%term%` with LIKE metacharacters escaped.
pub fn like_pattern(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len() + 2);
    escaped.push('%');
    for c in term.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped.push('%');
    escaped
}

pub fn skill_terms(q: &str) -> Vec<String> {
    q.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

pub fn total_pages(total: i64) -> i64 {
    (total + PAGE_SIZE - 1) / PAGE_SIZE
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(q: Option<&str>, page: Option<i64>) -> JobSearchParams {
        JobSearchParams {
            q: q.map(String::from),
            page,
            ..Default::default()
        }
    }

    #[test]
    fn test_page_defaults_and_clamps() {
        assert_eq!(params(None, None).page(), 1);
        assert_eq!(params(None, Some(0)).page(), 1);
        assert_eq!(params(None, Some(-4)).offset(), 0);
        assert_eq!(params(None, Some(3)).offset(), 20);
    }

    #[test]
    fn test_huge_page_does_not_overflow_offset() {
        let p = params(None, Some(i64::MAX));
        assert_eq!(p.page(), i64::MAX / PAGE_SIZE);
        assert!(p.offset() >= 0);
        assert_eq!(p.offset(), (i64::MAX / PAGE_SIZE - 1) * PAGE_SIZE);
    }

    #[test]
    fn test_total_pages_rounds_up() {
        assert_eq!(total_pages(0), 0);
        assert_eq!(total_pages(10), 1);
        assert_eq!(total_pages(11), 2);
    }

    #[test]
    fn test_like_pattern_escapes_wildcards() {
        assert_eq!(like_pattern("rust"), "%rust%");
        assert_eq!(like_pattern("100%_off"), "%100\\%\\_off%");
    }

    #[test]
    fn test_skill_terms_split_on_commas() {
        assert_eq!(skill_terms("React, Node.js ,,SQL"), vec!["React", "Node.js", "SQL"]);
    }

    #[test]
    fn test_no_filters_produces_bare_where() {
        let mut builder = QueryBuilder::<Postgres>::new("SELECT 1 FROM jobs j");
        JobSearchParams::default().push_filters(&mut builder);
        assert_eq!(builder.sql(), "SELECT 1 FROM jobs j WHERE TRUE");
    }

    #[test]
    fn test_all_filters_bind_parameters() {
        let mut builder = QueryBuilder::<Postgres>::new("SELECT 1 FROM jobs j");
        JobSearchParams {
            q: Some("react".to_string()),
            location: Some("Remote".to_string()),
            job_type: Some("full_time".to_string()),
            company: Some("Labs".to_string()),
            page: None,
        }
        .push_filters(&mut builder);

        let sql = builder.sql();
        assert!(sql.contains("j.title ILIKE $1"));
        assert!(sql.contains("j.skills && $3"));
        assert!(sql.contains("j.location ILIKE $4"));
        assert!(sql.contains("LOWER(j.job_type) = LOWER($5)"));
        assert!(sql.contains("c.name ILIKE $6"));
    }

    #[test]
    fn test_blank_filters_ignored() {
        let mut builder = QueryBuilder::<Postgres>::new("SELECT 1 FROM jobs j");
        JobSearchParams {
            q: Some("   ".to_string()),
            ..Default::default()
        }
        .push_filters(&mut builder);
        assert_eq!(builder.sql(), "SELECT 1 FROM jobs j WHERE TRUE");
    }
}

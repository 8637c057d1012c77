//! Portfolio projects.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::profile::non_blank;

/// A project card on the public page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    /// Project identifier.
    pub id: String,
    /// Title.
    pub title: String,
    /// Description.
    pub description: String,
    /// Thumbnail URL (classified before rendering).
    pub image: Option<String>,
    /// Live demo URL.
    pub url: Option<String>,
    /// Source repository URL.
    pub github_url: Option<String>,
    /// Comma separated technologies.
    pub tech_stack: Option<String>,
    /// Shown in the featured section.
    pub featured: bool,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

impl Project {
    /// Create a project from validated input.
    #[must_use]
    pub fn new(id: impl Into<String>, input: ProjectInput, now: DateTime<Utc>) -> Self {
        Self {
            id: id.into(),
            title: input.title,
            description: input.description,
            image: input.image,
            url: input.url,
            github_url: input.github_url,
            tech_stack: input.tech_stack,
            featured: input.featured,
            created_at: now,
            updated_at: now,
        }
    }

    /// Replace the editable fields with validated input.
    pub fn apply(&mut self, input: ProjectInput, now: DateTime<Utc>) {
        self.title = input.title;
        self.description = input.description;
        self.image = input.image;
        self.url = input.url;
        self.github_url = input.github_url;
        self.tech_stack = input.tech_stack;
        self.featured = input.featured;
        self.updated_at = now;
    }

    /// Editable fields, for prefilling the admin form.
    #[must_use]
    pub fn to_input(&self) -> ProjectInput {
        ProjectInput {
            title: self.title.clone(),
            description: self.description.clone(),
            image: self.image.clone(),
            url: self.url.clone(),
            github_url: self.github_url.clone(),
            tech_stack: self.tech_stack.clone(),
            featured: self.featured,
        }
    }

    /// Technologies split out of `tech_stack`.
    #[must_use]
    pub fn tech_tags(&self) -> Vec<String> {
        self.tech_stack
            .as_deref()
            .map(|stack| {
                stack
                    .split(',')
                    .map(str::trim)
                    .filter(|tag| !tag.is_empty())
                    .map(ToString::to_string)
                    .collect()
            })
            .unwrap_or_default()
    }
}

/// Project fields as submitted by the admin form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProjectInput {
    /// Title (required).
    pub title: String,
    /// Description (required).
    pub description: String,
    /// Thumbnail URL.
    pub image: Option<String>,
    /// Live demo URL.
    pub url: Option<String>,
    /// Source repository URL.
    pub github_url: Option<String>,
    /// Comma separated technologies.
    pub tech_stack: Option<String>,
    /// Featured flag.
    pub featured: bool,
}

impl ProjectInput {
    /// Trim fields and check that title and description are present.
    pub fn validate(self) -> Result<Self> {
        let title = self.title.trim().to_string();
        if title.is_empty() {
            return Err(Error::validation("Title is required"));
        }
        let description = self.description.trim().to_string();
        if description.is_empty() {
            return Err(Error::validation("Description is required"));
        }

        Ok(Self {
            title,
            description,
            image: non_blank(self.image),
            url: non_blank(self.url),
            github_url: non_blank(self.github_url),
            tech_stack: non_blank(self.tech_stack),
            featured: self.featured,
        })
    }
}

/// Sort projects newest first.
pub fn sort_newest_first(projects: &mut [Project]) {
    projects.sort_by(|a, b| b.created_at.cmp(&a.created_at));
}

/// Split projects into (featured, others), keeping their order.
#[must_use]
pub fn partition_featured(projects: Vec<Project>) -> (Vec<Project>, Vec<Project>) {
    projects.into_iter().partition(|p| p.featured)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use chrono::Duration;

    use super::*;

    fn input(title: &str, featured: bool) -> ProjectInput {
        ProjectInput {
            title: title.to_string(),
            description: "A thing I built".to_string(),
            featured,
            ..Default::default()
        }
    }

    #[test]
    fn test_validate_requires_title() {
        let err = input("   ", false).validate().unwrap_err();
        assert_eq!(err.to_string(), "Title is required");
    }

    #[test]
    fn test_validate_requires_description() {
        let err = ProjectInput {
            description: "\n".to_string(),
            ..input("Folio", false)
        }
        .validate()
        .unwrap_err();
        assert_eq!(err.to_string(), "Description is required");
    }

    #[test]
    fn test_validate_blanks_optional_fields() {
        let validated = ProjectInput {
            image: Some("  ".to_string()),
            url: Some(" https://folio.dev ".to_string()),
            ..input(" Folio ", true)
        }
        .validate()
        .unwrap();
        assert_eq!(validated.title, "Folio");
        assert_eq!(validated.image, None);
        assert_eq!(validated.url.as_deref(), Some("https://folio.dev"));
    }

    #[test]
    fn test_tech_tags() {
        let mut project = Project::new("1", input("Folio", false).validate().unwrap(), Utc::now());
        assert!(project.tech_tags().is_empty());
        project.tech_stack = Some("Rust, axum, ,Leptos".to_string());
        assert_eq!(project.tech_tags(), vec!["Rust", "axum", "Leptos"]);
    }

    #[test]
    fn test_sort_and_partition() {
        let now = Utc::now();
        let old = Project::new("old", input("Old", true), now - Duration::days(2));
        let mid = Project::new("mid", input("Mid", false), now - Duration::days(1));
        let new = Project::new("new", input("New", true), now);

        let mut projects = vec![old, new, mid];
        sort_newest_first(&mut projects);
        let ids: Vec<_> = projects.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["new", "mid", "old"]);

        let (featured, others) = partition_featured(projects);
        assert_eq!(
            featured.iter().map(|p| p.id.as_str()).collect::<Vec<_>>(),
            vec!["new", "old"]
        );
        assert_eq!(others.len(), 1);
    }

    #[test]
    fn test_to_input_prefills_form() {
        let project = Project::new(
            "1",
            ProjectInput {
                tech_stack: Some("Rust".to_string()),
                ..input("Folio", true)
            },
            Utc::now(),
        );
        let form = project.to_input();
        assert_eq!(form.title, "Folio");
        assert_eq!(form.tech_stack.as_deref(), Some("Rust"));
        assert!(form.featured);
    }

    #[test]
    fn test_apply_keeps_created_at() {
        let created = Utc::now() - Duration::hours(1);
        let mut project = Project::new("1", input("Folio", false), created);
        let now = Utc::now();
        project.apply(input("Folio 2", true), now);
        assert_eq!(project.title, "Folio 2");
        assert!(project.featured);
        assert_eq!(project.created_at, created);
        assert_eq!(project.updated_at, now);
    }
}

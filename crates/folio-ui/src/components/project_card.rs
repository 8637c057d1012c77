//! Project cards and sections.

use folio_core::Project;
use leptos::prelude::*;

use super::SafeImage;

/// A single project card.
#[component]
pub fn ProjectCard(project: Project) -> impl IntoView {
    let tags = project.tech_tags();
    let title = project.title.clone();
    let image = project.image.clone();

    view! {
        <article class="project-card" class:featured=project.featured data-testid="project-card">
            {image.map(|src| view! {
                <div class="project-thumb">
                    <SafeImage src=Some(src) alt=title.clone() fill=true />
                </div>
            })}
            <div class="project-body">
                <h3 class="project-title">{project.title}</h3>
                <p class="project-description">{project.description}</p>
                {(!tags.is_empty()).then(|| view! {
                    <div class="tech-tags">
                        {tags
                            .into_iter()
                            .map(|tag| view! { <span class="tech-tag">{tag}</span> })
                            .collect_view()}
                    </div>
                })}
                <div class="project-links">
                    {project.url.map(|url| view! {
                        <a class="project-link" href=url target="_blank" rel="noopener noreferrer">
                            "View Project " <span>"→"</span>
                        </a>
                    })}
                    {project.github_url.map(|url| view! {
                        <a class="project-link github" href=url target="_blank" rel="noopener noreferrer">
                            "GitHub"
                        </a>
                    })}
                </div>
            </div>
        </article>
    }
}

/// Titled grid of project cards. Renders nothing for an empty list.
#[component]
pub fn ProjectSection(
    /// Section heading.
    title: &'static str,
    /// Projects in display order.
    #[prop(into)]
    projects: Signal<Vec<Project>>,
) -> impl IntoView {
    view! {
        <Show when=move || projects.with(|p| !p.is_empty())>
            <section class="project-section">
                <h2 class="section-title">{title}</h2>
                <div class="project-grid">
                    <For
                        each=move || projects.get()
                        key=|project| (project.id.clone(), project.updated_at)
                        children=|project| view! { <ProjectCard project=project /> }
                    />
                </div>
            </section>
        </Show>
    }
}

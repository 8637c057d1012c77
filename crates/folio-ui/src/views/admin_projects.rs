//! Project list with create, edit and delete.

use folio_core::{Project, ProjectInput, UploadKind, sort_newest_first};
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api;
use crate::components::{
    CheckboxField, ConfirmDialog, FormField, SafeImage, UploadField, use_notifications,
};
use crate::route::{Route, use_navigator};

fn find_project(projects: &[Project], id: &str) -> Option<Project> {
    projects.iter().find(|p| p.id == id).cloned()
}

fn delete_message(title: &str) -> String {
    format!("Are you sure you want to delete \"{title}\"? This cannot be undone.")
}

const fn saved_message(editing: bool) -> &'static str {
    if editing { "Project updated" } else { "Project created" }
}

const fn submit_label(editing: bool, saving: bool) -> &'static str {
    match (saving, editing) {
        (true, _) => "Saving...",
        (false, true) => "Update Project",
        (false, false) => "Create Project",
    }
}

/// Admin list of projects. `editing` holds the id from
/// `/admin/projects/{id}`, which opens the edit form for that project.
#[component]
pub fn AdminProjects(
    /// Project being edited, if any.
    #[prop(into)]
    editing: Signal<Option<String>>,
) -> impl IntoView {
    let navigator = use_navigator();
    let notifications = use_notifications();

    let projects = RwSignal::new(Vec::<Project>::new());
    let (loaded, set_loaded) = signal(false);
    let (show_create, set_show_create) = signal(false);
    let delete_target = RwSignal::new(None::<Project>);
    let (deleting, set_deleting) = signal(false);

    let reload = move || {
        spawn_local(async move {
            match api::list_projects().await {
                Ok(mut list) => {
                    sort_newest_first(&mut list);
                    projects.set(list);
                }
                Err(e) => notifications.error(format!("Failed to load projects: {e}")),
            }
            set_loaded.set(true);
        });
    };
    reload();

    let edited = Memo::new(move |_| {
        let id = editing.get()?;
        projects.with(|list| find_project(list, &id))
    });

    // an unknown id in the address bar goes back to the list
    Effect::new(move |_| {
        if loaded.get() && editing.with(Option::is_some) && edited.with(Option::is_none) {
            notifications.error("Project not found");
            navigator.go(Route::AdminProjects);
        }
    });

    let on_created = Callback::new(move |_: Project| {
        set_show_create.set(false);
        reload();
    });
    let on_updated = Callback::new(move |_: Project| {
        navigator.go(Route::AdminProjects);
        reload();
    });
    let close_edit = Callback::new(move |()| navigator.go(Route::AdminProjects));

    let confirm_delete = Callback::new(move |()| {
        let Some(project) = delete_target.get_untracked() else {
            return;
        };
        set_deleting.set(true);
        spawn_local(async move {
            match api::delete_project(&project.id).await {
                Ok(()) => {
                    notifications.info("Project deleted");
                    if editing.get_untracked().as_deref() == Some(project.id.as_str()) {
                        navigator.go(Route::AdminProjects);
                    }
                    reload();
                }
                Err(e) => notifications.error(format!("Failed to delete project: {e}")),
            }
            set_deleting.set(false);
            delete_target.set(None);
        });
    });

    view! {
        <section class="admin-card">
            <div class="admin-card-header">
                <h2 class="admin-title">"Projects"</h2>
                <button
                    class="btn btn-primary"
                    on:click=move |_| set_show_create.update(|open| *open = !*open)
                >
                    {move || if show_create.get() { "Close" } else { "+ Add Project" }}
                </button>
            </div>

            <Show when=move || show_create.get()>
                <div class="admin-subsection">
                    <h3>"Add New Project"</h3>
                    <ProjectForm project=None on_saved=on_created />
                </div>
            </Show>

            {move || {
                edited
                    .get()
                    .map(|project| {
                        view! {
                            <div class="admin-subsection">
                                <h3>"Edit Project"</h3>
                                <ProjectForm
                                    project=Some(project)
                                    on_saved=on_updated
                                    on_cancel=close_edit
                                />
                            </div>
                        }
                    })
            }}

            <Show
                when=move || loaded.get()
                fallback=|| view! { <div class="site-loader" aria-busy="true"></div> }
            >
                <Show
                    when=move || projects.with(|list| !list.is_empty())
                    fallback=|| view! {
                        <p class="admin-empty">
                            "No projects yet. Click \"+ Add Project\" to create your first project!"
                        </p>
                    }
                >
                    <ul class="admin-project-list">
                        <For
                            each=move || projects.get()
                            key=|project| (project.id.clone(), project.updated_at)
                            children=move |project| {
                                view! {
                                    <AdminProjectRow
                                        project=project
                                        on_delete=Callback::new(move |p| delete_target.set(Some(p)))
                                    />
                                }
                            }
                        />
                    </ul>
                </Show>
            </Show>

            <ConfirmDialog
                is_open=Signal::derive(move || delete_target.with(Option::is_some))
                title="Delete Project"
                message=Signal::derive(move || {
                    delete_target.with(|p| p.as_ref().map(|p| delete_message(&p.title)).unwrap_or_default())
                })
                busy=deleting
                on_confirm=confirm_delete
                on_cancel=Callback::new(move |()| delete_target.set(None))
            />
        </section>
    }
}

#[component]
fn AdminProjectRow(project: Project, on_delete: Callback<Project>) -> impl IntoView {
    let navigator = use_navigator();
    let edit_route = Route::AdminProject(project.id.clone());
    let edit_href = edit_route.path();
    let image = project.image.clone();
    let title = project.title.clone();
    let alt = title.clone();
    let featured = project.featured;
    let description = project.description.clone();

    view! {
        <li class="admin-project">
            <div class="admin-project-thumb">
                <SafeImage src=Signal::derive(move || image.clone()) alt=alt fill=true />
            </div>
            <div class="admin-project-body">
                <div class="admin-project-heading">
                    <h3 class="admin-project-title">{title}</h3>
                    {featured.then(|| view! { <span class="badge-featured">"Featured"</span> })}
                </div>
                <p class="admin-project-description">{description}</p>
            </div>
            <div class="admin-project-actions">
                <a
                    href=edit_href
                    class="btn btn-secondary"
                    on:click=move |ev| {
                        ev.prevent_default();
                        navigator.go(edit_route.clone());
                    }
                >
                    "Edit"
                </a>
                <button class="btn btn-danger" on:click=move |_| on_delete.run(project.clone())>
                    "Delete"
                </button>
            </div>
        </li>
    }
}

/// Create or edit form. `project` is `None` for a new project.
#[component]
fn ProjectForm(
    project: Option<Project>,
    on_saved: Callback<Project>,
    #[prop(optional)] on_cancel: Option<Callback<()>>,
) -> impl IntoView {
    let notifications = use_notifications();

    let id = project.as_ref().map(|p| p.id.clone());
    let editing = id.is_some();
    let form = RwSignal::new(project.as_ref().map(Project::to_input).unwrap_or_default());
    let (saving, set_saving) = signal(false);

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        if saving.get_untracked() {
            return;
        }
        let input = match form.get_untracked().validate() {
            Ok(input) => input,
            Err(e) => {
                notifications.error(e.to_string());
                return;
            }
        };

        set_saving.set(true);
        let id = id.clone();
        spawn_local(async move {
            let result = match id.as_deref() {
                Some(id) => api::update_project(id, &input).await,
                None => api::create_project(&input).await,
            };
            set_saving.set(false);
            match result {
                Ok(saved) => {
                    notifications.info(saved_message(editing));
                    if !editing {
                        form.set(ProjectInput::default());
                    }
                    on_saved.run(saved);
                }
                Err(e) => notifications.error(format!("Failed to save project: {e}")),
            }
        });
    };

    let text = move |read: fn(&ProjectInput) -> String, write: fn(&mut ProjectInput, String)| {
        (
            Signal::derive(move || form.with(read)),
            Callback::new(move |v| form.update(|f| write(f, v))),
        )
    };
    let (title, set_title) = text(|f| f.title.clone(), |f, v| f.title = v);
    let (description, set_description) =
        text(|f| f.description.clone(), |f, v| f.description = v);
    let (image, set_image) = text(
        |f| f.image.clone().unwrap_or_default(),
        |f, v| f.image = Some(v),
    );
    let (url, set_url) = text(|f| f.url.clone().unwrap_or_default(), |f, v| f.url = Some(v));
    let (github, set_github) = text(
        |f| f.github_url.clone().unwrap_or_default(),
        |f, v| f.github_url = Some(v),
    );
    let (tech, set_tech) = text(
        |f| f.tech_stack.clone().unwrap_or_default(),
        |f, v| f.tech_stack = Some(v),
    );

    view! {
        <form class="admin-form" on:submit=on_submit>
            <FormField id="title" label="Title" required=true value=title on_input=set_title />
            <FormField
                id="description"
                label="Description"
                multiline=true
                required=true
                value=description
                on_input=set_description
            />
            <UploadField
                id="image"
                label="Image"
                kind=UploadKind::Image
                value=image
                on_change=set_image
                placeholder="https://... or upload"
            />
            <div class="form-grid">
                <FormField id="url" label="Project URL" input_type="url" value=url on_input=set_url />
                <FormField
                    id="githubUrl"
                    label="GitHub URL"
                    input_type="url"
                    value=github
                    on_input=set_github
                />
            </div>
            <FormField
                id="techStack"
                label="Tech Stack (comma-separated)"
                value=tech
                on_input=set_tech
                placeholder="Rust, axum, Leptos"
            />
            <CheckboxField
                id="featured"
                label="Featured Project"
                checked=Signal::derive(move || form.with(|f| f.featured))
                on_change=Callback::new(move |on| form.update(|f| f.featured = on))
            />
            <div class="form-actions">
                {on_cancel.map(|cancel| view! {
                    <button type="button" class="btn btn-secondary" on:click=move |_| cancel.run(())>
                        "Cancel"
                    </button>
                })}
                <button type="submit" class="btn btn-primary" disabled=move || saving.get()>
                    {move || submit_label(editing, saving.get())}
                </button>
            </div>
        </form>
    }
}

//! Profile editor.

use folio_core::{ProfileUpdate, UploadKind};
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api;
use crate::components::{CheckboxField, FormField, UploadField, use_notifications};

/// Optional text fields of the profile form, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ProfileField {
    Profession,
    Bio,
    Province,
    SchoolOrCompany,
    Gender,
    Age,
    Phone,
    Website,
    GitHub,
    LinkedIn,
    Twitter,
    Facebook,
    YouTube,
    TikTok,
}

impl ProfileField {
    const PERSONAL: [Self; 7] = [
        Self::Profession,
        Self::Bio,
        Self::Province,
        Self::SchoolOrCompany,
        Self::Gender,
        Self::Age,
        Self::Phone,
    ];

    const LINKS: [Self; 7] = [
        Self::Website,
        Self::GitHub,
        Self::LinkedIn,
        Self::Twitter,
        Self::Facebook,
        Self::YouTube,
        Self::TikTok,
    ];

    const fn id(self) -> &'static str {
        match self {
            Self::Profession => "profession",
            Self::Bio => "bio",
            Self::Province => "province",
            Self::SchoolOrCompany => "schoolOrCompany",
            Self::Gender => "gender",
            Self::Age => "age",
            Self::Phone => "phone",
            Self::Website => "website",
            Self::GitHub => "github",
            Self::LinkedIn => "linkedin",
            Self::Twitter => "twitter",
            Self::Facebook => "facebook",
            Self::YouTube => "youtube",
            Self::TikTok => "tiktok",
        }
    }

    const fn label(self) -> &'static str {
        match self {
            Self::Profession => "Profession",
            Self::Bio => "Bio",
            Self::Province => "Province / City",
            Self::SchoolOrCompany => "School or company",
            Self::Gender => "Gender",
            Self::Age => "Age",
            Self::Phone => "Phone",
            Self::Website => "Website",
            Self::GitHub => "GitHub",
            Self::LinkedIn => "LinkedIn",
            Self::Twitter => "X (Twitter)",
            Self::Facebook => "Facebook",
            Self::YouTube => "YouTube",
            Self::TikTok => "TikTok",
        }
    }

    const fn input_type(self) -> &'static str {
        match self {
            Self::Age => "number",
            Self::Phone => "tel",
            Self::Website
            | Self::GitHub
            | Self::LinkedIn
            | Self::Twitter
            | Self::Facebook
            | Self::YouTube
            | Self::TikTok => "url",
            _ => "text",
        }
    }

    fn slot_mut(self, form: &mut ProfileUpdate) -> &mut Option<String> {
        match self {
            Self::Profession => &mut form.profession,
            Self::Bio => &mut form.bio,
            Self::Province => &mut form.province,
            Self::SchoolOrCompany => &mut form.school_or_company,
            Self::Gender => &mut form.gender,
            Self::Age => &mut form.age,
            Self::Phone => &mut form.phone,
            Self::Website => &mut form.website,
            Self::GitHub => &mut form.github,
            Self::LinkedIn => &mut form.linkedin,
            Self::Twitter => &mut form.twitter,
            Self::Facebook => &mut form.facebook,
            Self::YouTube => &mut form.youtube,
            Self::TikTok => &mut form.tiktok,
        }
    }

    fn get(self, form: &ProfileUpdate) -> String {
        let value = match self {
            Self::Profession => &form.profession,
            Self::Bio => &form.bio,
            Self::Province => &form.province,
            Self::SchoolOrCompany => &form.school_or_company,
            Self::Gender => &form.gender,
            Self::Age => &form.age,
            Self::Phone => &form.phone,
            Self::Website => &form.website,
            Self::GitHub => &form.github,
            Self::LinkedIn => &form.linkedin,
            Self::Twitter => &form.twitter,
            Self::Facebook => &form.facebook,
            Self::YouTube => &form.youtube,
            Self::TikTok => &form.tiktok,
        };
        value.clone().unwrap_or_default()
    }

    /// Store typed text; blanks are cleared by `normalize` on save.
    fn set(self, form: &mut ProfileUpdate, value: String) {
        *self.slot_mut(form) = Some(value);
    }
}

/// Form state for a site with no profile yet.
fn blank_profile() -> ProfileUpdate {
    ProfileUpdate {
        enable_background_music: true,
        ..ProfileUpdate::default()
    }
}

/// Editor for every profile field, with avatar, logo and music uploads.
#[component]
pub fn AdminProfile() -> impl IntoView {
    let notifications = use_notifications();

    let form = RwSignal::new(blank_profile());
    let (loaded, set_loaded) = signal(false);
    let (saving, set_saving) = signal(false);

    spawn_local(async move {
        match api::get_profile().await {
            Ok(Some(profile)) => form.set(profile.to_update()),
            Ok(None) => {}
            Err(e) => notifications.error(format!("Failed to load profile: {e}")),
        }
        set_loaded.set(true);
    });

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        if saving.get_untracked() {
            return;
        }
        set_saving.set(true);
        let update = form.get_untracked();
        spawn_local(async move {
            match api::save_profile(&update).await {
                Ok(saved) => {
                    form.set(saved.to_update());
                    notifications.info("Profile saved");
                }
                Err(e) => notifications.error(format!("Failed to save profile: {e}")),
            }
            set_saving.set(false);
        });
    };

    let text_field = move |field: ProfileField| {
        let multiline = field == ProfileField::Bio;
        view! {
            <FormField
                id=field.id()
                label=field.label()
                input_type=field.input_type()
                multiline=multiline
                value=Signal::derive(move || form.with(|f| field.get(f)))
                on_input=Callback::new(move |v| form.update(|f| field.set(f, v)))
            />
        }
    };

    let url_field = move |read: fn(&ProfileUpdate) -> Option<String>,
                          write: fn(&mut ProfileUpdate, String)| {
        (
            Signal::derive(move || form.with(|f| read(f).unwrap_or_default())),
            Callback::new(move |v| form.update(|f| write(f, v))),
        )
    };
    let (avatar, set_avatar) = url_field(|f| f.avatar.clone(), |f, v| f.avatar = Some(v));
    let (logo, set_logo) = url_field(|f| f.logo.clone(), |f, v| f.logo = Some(v));
    let (music, set_music) = url_field(
        |f| f.background_music.clone(),
        |f, v| f.background_music = Some(v),
    );

    view! {
        <section class="admin-card">
            <h2 class="admin-title">"Profile Manager"</h2>
            <Show
                when=move || loaded.get()
                fallback=|| view! { <div class="site-loader" aria-busy="true"></div> }
            >
                <form class="admin-form" on:submit=on_submit>
                    <div class="form-grid">
                        <FormField
                            id="name"
                            label="Name"
                            required=true
                            value=Signal::derive(move || form.with(|f| f.name.clone()))
                            on_input=Callback::new(move |v| form.update(|f| f.name = v))
                        />
                        <FormField
                            id="email"
                            label="Email"
                            input_type="email"
                            required=true
                            value=Signal::derive(move || form.with(|f| f.email.clone()))
                            on_input=Callback::new(move |v| form.update(|f| f.email = v))
                        />
                        {ProfileField::PERSONAL.into_iter().map(text_field).collect_view()}
                        <UploadField
                            id="avatar"
                            label="Avatar"
                            kind=UploadKind::Image
                            value=avatar
                            on_change=set_avatar
                            placeholder="https://... or upload"
                        />
                        <UploadField
                            id="logo"
                            label="Logo"
                            kind=UploadKind::Logo
                            value=logo
                            on_change=set_logo
                            placeholder="https://... or upload"
                        />
                        {ProfileField::LINKS.into_iter().map(text_field).collect_view()}
                    </div>

                    <fieldset class="form-group">
                        <legend class="form-group-title">"Background Music"</legend>
                        <UploadField
                            id="backgroundMusic"
                            label="Music URL"
                            kind=UploadKind::Audio
                            value=music
                            on_change=set_music
                            placeholder="YouTube, Spotify, SoundCloud link or an audio file"
                        />
                        <CheckboxField
                            id="enableBackgroundMusic"
                            label="Enable background music"
                            checked=Signal::derive(move || form.with(|f| f.enable_background_music))
                            on_change=Callback::new(move |on| form.update(|f| f.enable_background_music = on))
                            hint="Shows the music toggle on the portfolio page. Untick to hide it completely."
                        />
                    </fieldset>

                    <div class="form-actions">
                        <button type="submit" class="btn btn-primary" disabled=move || saving.get()>
                            {move || if saving.get() { "Saving..." } else { "Save Profile" }}
                        </button>
                    </div>
                </form>
            </Show>
        </section>
    }
}

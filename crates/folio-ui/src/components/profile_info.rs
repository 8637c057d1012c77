//! Owner profile: hero block and contact details.

use folio_core::Profile;
use leptos::prelude::*;

use super::SafeImage;

/// One contact or personal detail card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InfoItem {
    /// Card heading.
    pub label: &'static str,
    /// Displayed value.
    pub value: String,
    /// Link target for clickable cards (`mailto:`, `tel:`).
    pub href: Option<String>,
}

impl InfoItem {
    fn text(label: &'static str, value: &str) -> Self {
        Self {
            label,
            value: value.to_string(),
            href: None,
        }
    }
}

/// Detail cards for the filled-in profile fields, in display order.
pub fn info_items(profile: &Profile) -> Vec<InfoItem> {
    let mut items = Vec::new();

    if !profile.email.is_empty() {
        items.push(InfoItem {
            label: "Email",
            value: profile.email.clone(),
            href: Some(format!("mailto:{}", profile.email)),
        });
    }
    if let Some(phone) = &profile.phone {
        items.push(InfoItem {
            label: "Phone",
            value: phone.clone(),
            href: Some(format!("tel:{phone}")),
        });
    }
    if let Some(province) = &profile.province {
        items.push(InfoItem::text("Location", province));
    }
    if let Some(org) = &profile.school_or_company {
        items.push(InfoItem::text("School/Company", org));
    }
    if let Some(gender) = &profile.gender {
        items.push(InfoItem::text("Gender", gender));
    }
    if let Some(age) = profile.age {
        items.push(InfoItem::text("Age", &format!("{age} years")));
    }

    items
}

/// Avatar, name, profession, bio and social links.
#[component]
pub fn ProfileHero(
    /// The owner profile, if one exists.
    #[prop(into)]
    profile: Signal<Option<Profile>>,
) -> impl IntoView {
    let name = move || {
        profile.with(|p| {
            p.as_ref()
                .map_or_else(|| "Welcome".to_string(), |p| p.name.clone())
        })
    };
    let profession = move || {
        profile.with(|p| {
            p.as_ref()
                .and_then(|p| p.profession.clone())
                .unwrap_or_else(|| "Professional".to_string())
        })
    };
    let bio = move || profile.with(|p| p.as_ref().and_then(|p| p.bio.clone()));
    let avatar = Signal::derive(move || profile.with(|p| p.as_ref().and_then(|p| p.avatar.clone())));
    let links = move || {
        profile.with(|p| p.as_ref().map(Profile::social_links).unwrap_or_default())
    };

    view! {
        <section class="hero" data-testid="hero">
            <Show when=move || avatar.with(Option::is_some)>
                <div class="hero-avatar">
                    <SafeImage src=avatar alt=name() class="avatar" />
                </div>
            </Show>
            <h2 class="hero-name">{name}</h2>
            <p class="hero-profession">{profession}</p>
            {move || bio().map(|bio| view! { <p class="hero-bio">{bio}</p> })}
            <div class="social-links">
                <For
                    each=links
                    key=|link| link.label
                    children=|link| {
                        view! {
                            <a
                                class="social-link"
                                href=link.url
                                target="_blank"
                                rel="noopener noreferrer"
                            >
                                {link.label}
                            </a>
                        }
                    }
                />
            </div>
        </section>
    }
}

/// Grid of contact and personal details. Renders nothing when empty.
#[component]
pub fn ProfileInfo(
    /// The owner profile, if one exists.
    #[prop(into)]
    profile: Signal<Option<Profile>>,
) -> impl IntoView {
    let items = Memo::new(move |_| {
        profile.with(|p| p.as_ref().map(info_items).unwrap_or_default())
    });

    view! {
        <Show when=move || items.with(|items| !items.is_empty())>
            <section class="profile-info" data-testid="profile-info">
                <h3 class="section-divider">"Professional Profile"</h3>
                <div class="info-grid">
                    <For
                        each=move || items.get()
                        key=|item| item.label
                        children=|item| {
                            let body = view! {
                                <p class="info-label">{item.label}</p>
                                <p class="info-value">{item.value}</p>
                            };
                            match item.href {
                                Some(href) => view! {
                                    <a class="info-card" href=href>{body}</a>
                                }
                                .into_any(),
                                None => view! { <div class="info-card">{body}</div> }.into_any(),
                            }
                        }
                    />
                </div>
            </section>
        </Show>
    }
}

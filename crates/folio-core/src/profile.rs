//! The single site profile and its admin form input.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::{Error, Result};

const fn default_true() -> bool {
    true
}

/// Owner profile shown on the public page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    /// Row identifier.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Short biography.
    pub bio: Option<String>,
    /// Contact email.
    pub email: String,
    /// Job title or field.
    pub profession: Option<String>,
    /// Province or region.
    pub province: Option<String>,
    /// School or company.
    pub school_or_company: Option<String>,
    /// Gender, free text.
    pub gender: Option<String>,
    /// Age in years.
    pub age: Option<u32>,
    /// Phone number.
    pub phone: Option<String>,
    /// GitHub profile URL.
    pub github: Option<String>,
    /// LinkedIn profile URL.
    pub linkedin: Option<String>,
    /// Twitter/X profile URL.
    pub twitter: Option<String>,
    /// Facebook profile URL.
    pub facebook: Option<String>,
    /// `YouTube` channel URL.
    pub youtube: Option<String>,
    /// TikTok profile URL.
    pub tiktok: Option<String>,
    /// Personal website.
    pub website: Option<String>,
    /// Avatar image URL.
    pub avatar: Option<String>,
    /// Site logo URL.
    pub logo: Option<String>,
    /// Background music URL (audio file or provider link).
    pub background_music: Option<String>,
    /// Whether the background music widget is shown.
    #[serde(default = "default_true")]
    pub enable_background_music: bool,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// A social link ready for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SocialLink {
    /// Network label ("GitHub", "LinkedIn", ...).
    pub label: &'static str,
    /// Target URL.
    pub url: String,
}

impl Profile {
    /// Build a new profile from validated input.
    #[must_use]
    pub fn from_update(id: impl Into<String>, update: ProfileUpdate, now: DateTime<Utc>) -> Self {
        let mut profile = Self {
            id: id.into(),
            name: String::new(),
            bio: None,
            email: String::new(),
            profession: None,
            province: None,
            school_or_company: None,
            gender: None,
            age: None,
            phone: None,
            github: None,
            linkedin: None,
            twitter: None,
            facebook: None,
            youtube: None,
            tiktok: None,
            website: None,
            avatar: None,
            logo: None,
            background_music: None,
            enable_background_music: true,
            created_at: now,
            updated_at: now,
        };
        profile.apply(update, now);
        profile
    }

    /// Overwrite every editable field with `update`.
    pub fn apply(&mut self, update: ProfileUpdate, now: DateTime<Utc>) {
        self.name = update.name;
        self.bio = update.bio;
        self.email = update.email;
        self.profession = update.profession;
        self.province = update.province;
        self.school_or_company = update.school_or_company;
        self.gender = update.gender;
        self.age = update.age.as_deref().and_then(parse_age);
        self.phone = update.phone;
        self.github = update.github;
        self.linkedin = update.linkedin;
        self.twitter = update.twitter;
        self.facebook = update.facebook;
        self.youtube = update.youtube;
        self.tiktok = update.tiktok;
        self.website = update.website;
        self.avatar = update.avatar;
        self.logo = update.logo;
        self.background_music = update.background_music;
        self.enable_background_music = update.enable_background_music;
        self.updated_at = now;
    }

    /// Current values as an editable form, for prefilling the admin page.
    #[must_use]
    pub fn to_update(&self) -> ProfileUpdate {
        ProfileUpdate {
            name: self.name.clone(),
            email: self.email.clone(),
            bio: self.bio.clone(),
            profession: self.profession.clone(),
            province: self.province.clone(),
            school_or_company: self.school_or_company.clone(),
            gender: self.gender.clone(),
            age: self.age.map(|age| age.to_string()),
            phone: self.phone.clone(),
            github: self.github.clone(),
            linkedin: self.linkedin.clone(),
            twitter: self.twitter.clone(),
            facebook: self.facebook.clone(),
            youtube: self.youtube.clone(),
            tiktok: self.tiktok.clone(),
            website: self.website.clone(),
            avatar: self.avatar.clone(),
            logo: self.logo.clone(),
            background_music: self.background_music.clone(),
            enable_background_music: self.enable_background_music,
        }
    }

    /// Social links that are filled in, in display order.
    #[must_use]
    pub fn social_links(&self) -> Vec<SocialLink> {
        [
            ("GitHub", &self.github),
            ("LinkedIn", &self.linkedin),
            ("Twitter", &self.twitter),
            ("Facebook", &self.facebook),
            ("YouTube", &self.youtube),
            ("TikTok", &self.tiktok),
            ("Website", &self.website),
        ]
        .into_iter()
        .filter_map(|(label, url)| {
            url.as_ref().map(|url| SocialLink {
                label,
                url: url.clone(),
            })
        })
        .collect()
    }
}

/// Profile fields as submitted by the admin form.
///
/// Call [`ProfileUpdate::normalize`] before storing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProfileUpdate {
    /// Display name (required).
    pub name: String,
    /// Contact email (required).
    pub email: String,
    /// Short biography.
    pub bio: Option<String>,
    /// Job title or field.
    pub profession: Option<String>,
    /// Province or region.
    pub province: Option<String>,
    /// School or company.
    pub school_or_company: Option<String>,
    /// Gender, free text.
    pub gender: Option<String>,
    /// Age as typed in the form. JSON clients may send a number.
    #[serde(deserialize_with = "text_or_number")]
    pub age: Option<String>,
    /// Phone number.
    pub phone: Option<String>,
    /// GitHub profile URL.
    pub github: Option<String>,
    /// LinkedIn profile URL.
    pub linkedin: Option<String>,
    /// Twitter/X profile URL.
    pub twitter: Option<String>,
    /// Facebook profile URL.
    pub facebook: Option<String>,
    /// `YouTube` channel URL.
    pub youtube: Option<String>,
    /// TikTok profile URL.
    pub tiktok: Option<String>,
    /// Personal website.
    pub website: Option<String>,
    /// Avatar image URL.
    pub avatar: Option<String>,
    /// Site logo URL.
    pub logo: Option<String>,
    /// Background music URL.
    pub background_music: Option<String>,
    /// Whether the background music widget is shown.
    pub enable_background_music: bool,
}

impl ProfileUpdate {
    /// Trim every field, turn blank optionals into `None` and check required fields.
    pub fn normalize(mut self) -> Result<Self> {
        self.name = self.name.trim().to_string();
        self.email = self.email.trim().to_string();
        if self.name.is_empty() {
            return Err(Error::validation("Name is required"));
        }
        if self.email.is_empty() {
            return Err(Error::validation("Email is required"));
        }

        for field in [
            &mut self.bio,
            &mut self.profession,
            &mut self.province,
            &mut self.school_or_company,
            &mut self.gender,
            &mut self.age,
            &mut self.phone,
            &mut self.github,
            &mut self.linkedin,
            &mut self.twitter,
            &mut self.facebook,
            &mut self.youtube,
            &mut self.tiktok,
            &mut self.website,
            &mut self.avatar,
            &mut self.logo,
            &mut self.background_music,
        ] {
            *field = non_blank(field.take());
        }
        Ok(self)
    }
}

/// Trim a form value, mapping blank input to `None`.
pub(crate) fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Accept `"27"` and `27` alike for numeric form fields.
fn text_or_number<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum TextOrNumber {
        Number(i64),
        Text(String),
    }

    Ok(
        Option::<TextOrNumber>::deserialize(deserializer)?.map(|value| match value {
            TextOrNumber::Number(n) => n.to_string(),
            TextOrNumber::Text(s) => s,
        }),
    )
}

/// Parse an age field; zero and garbage count as unset.
fn parse_age(raw: &str) -> Option<u32> {
    raw.trim().parse::<u32>().ok().filter(|age| *age > 0)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    fn update() -> ProfileUpdate {
        ProfileUpdate {
            name: "  Linh Tran ".to_string(),
            email: "linh@example.com".to_string(),
            bio: Some("   ".to_string()),
            age: Some(" 27 ".to_string()),
            github: Some("https://github.com/linh".to_string()),
            website: Some("https://linh.dev ".to_string()),
            background_music: Some("https://youtu.be/dQw4w9WgXcQ".to_string()),
            enable_background_music: true,
            ..Default::default()
        }
    }

    #[test]
    fn test_normalize_trims_and_blanks() {
        let normalized = update().normalize().unwrap();
        assert_eq!(normalized.name, "Linh Tran");
        assert_eq!(normalized.bio, None);
        assert_eq!(normalized.website.as_deref(), Some("https://linh.dev"));
    }

    #[test]
    fn test_normalize_requires_name_and_email() {
        let err = ProfileUpdate {
            name: " ".to_string(),
            ..update()
        }
        .normalize()
        .unwrap_err();
        assert_eq!(err.to_string(), "Name is required");

        let err = ProfileUpdate {
            email: String::new(),
            ..update()
        }
        .normalize()
        .unwrap_err();
        assert_eq!(err.to_string(), "Email is required");
    }

    #[test]
    fn test_from_update_parses_age() {
        let now = Utc::now();
        let profile = Profile::from_update("p1", update().normalize().unwrap(), now);
        assert_eq!(profile.age, Some(27));
        assert_eq!(profile.created_at, now);
        assert!(profile.enable_background_music);
    }

    #[test]
    fn test_invalid_age_is_unset() {
        assert_eq!(parse_age("abc"), None);
        assert_eq!(parse_age("0"), None);
        assert_eq!(parse_age("-3"), None);
    }

    #[test]
    fn test_age_accepts_number_or_text() {
        let numeric: ProfileUpdate =
            serde_json::from_str(r#"{"name": "A", "email": "a@b.c", "age": 27}"#).unwrap();
        assert_eq!(numeric.age.as_deref(), Some("27"));

        let text: ProfileUpdate =
            serde_json::from_str(r#"{"name": "A", "email": "a@b.c", "age": "31"}"#).unwrap();
        assert_eq!(text.age.as_deref(), Some("31"));

        let absent: ProfileUpdate = serde_json::from_str(r#"{"name": "A", "email": "a@b.c"}"#).unwrap();
        assert_eq!(absent.age, None);

        let null: ProfileUpdate =
            serde_json::from_str(r#"{"name": "A", "email": "a@b.c", "age": null}"#).unwrap();
        assert_eq!(null.age, None);

        let profile = Profile::from_update("p1", numeric.normalize().unwrap(), Utc::now());
        assert_eq!(profile.age, Some(27));
    }

    #[test]
    fn test_to_update_round_trips_through_apply() {
        let now = Utc::now();
        let profile = Profile::from_update("p1", update().normalize().unwrap(), now);
        let form = profile.to_update();
        assert_eq!(form.age.as_deref(), Some("27"));
        assert_eq!(form.name, "Linh Tran");

        let mut copy = profile.clone();
        copy.apply(form.normalize().unwrap(), now);
        assert_eq!(copy, profile);
    }

    #[test]
    fn test_social_links_order() {
        let profile = Profile::from_update("p1", update().normalize().unwrap(), Utc::now());
        let labels: Vec<_> = profile.social_links().iter().map(|l| l.label).collect();
        assert_eq!(labels, vec!["GitHub", "Website"]);
    }

    #[test]
    fn test_enable_background_music_defaults_true() {
        let json = r#"{
            "id": "p1", "name": "A", "bio": null, "email": "a@b.c",
            "profession": null, "province": null, "schoolOrCompany": null,
            "gender": null, "age": null, "phone": null, "github": null,
            "linkedin": null, "twitter": null, "facebook": null, "youtube": null,
            "tiktok": null, "website": null, "avatar": null, "logo": null,
            "backgroundMusic": null,
            "createdAt": "2024-01-01T00:00:00Z", "updatedAt": "2024-01-01T00:00:00Z"
        }"#;
        let profile: Profile = serde_json::from_str(json).unwrap();
        assert!(profile.enable_background_music);
    }
}

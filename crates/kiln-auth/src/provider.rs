//! Supported social sign-in providers.

use std::fmt;
use std::str::FromStr;

use ironhtml::html;
use ironhtml_elements::Span;
use kiln_forms::i18n::Translator;
use kiln_forms::widgets::class_names;
use serde::{Deserialize, Serialize};

use crate::error::AuthError;

/// OAuth provider id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderId {
    /// Google.
    Google,
    /// Discord.
    Discord,
    /// GitHub.
    Github,
}

impl ProviderId {
    /// Returns the wire id.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Google => "google",
            Self::Discord => "discord",
            Self::Github => "github",
        }
    }
}

impl fmt::Display for ProviderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProviderId {
    type Err = AuthError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "google" => Ok(Self::Google),
            "discord" => Ok(Self::Discord),
            "github" => Ok(Self::Github),
            other => Err(AuthError::UnknownProvider(other.to_string())),
        }
    }
}

/// Display configuration of a provider button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SocialProvider {
    /// Provider id.
    pub id: ProviderId,
    /// Display name.
    pub name: &'static str,
    /// Icon size in pixels.
    pub icon_size: u32,
    /// Icon color; `None` keeps the logo's own colors.
    pub logo_color: Option<&'static str>,
    /// Label color.
    pub text_color: &'static str,
    /// Button background.
    pub background_color: &'static str,
}

const PROVIDERS: [SocialProvider; 3] = [
    SocialProvider {
        id: ProviderId::Google,
        name: "Google",
        icon_size: 20,
        logo_color: None,
        text_color: "#000",
        background_color: "#fff",
    },
    SocialProvider {
        id: ProviderId::Discord,
        name: "Discord",
        icon_size: 20,
        logo_color: Some("#fff"),
        text_color: "#fff",
        background_color: "#5865f2",
    },
    SocialProvider {
        id: ProviderId::Github,
        name: "GitHub",
        icon_size: 20,
        logo_color: Some("#fff"),
        text_color: "#fff",
        background_color: "#333",
    },
];

/// Returns the supported providers in display order.
pub fn social_providers() -> &'static [SocialProvider] {
    &PROVIDERS
}

/// Returns the configuration of one provider.
pub fn social_provider(id: ProviderId) -> &'static SocialProvider {
    match id {
        ProviderId::Google => &PROVIDERS[0],
        ProviderId::Discord => &PROVIDERS[1],
        ProviderId::Github => &PROVIDERS[2],
    }
}

impl SocialProvider {
    /// Renders the sign-in button. It submits `provider=<id>` to the
    /// enclosing form.
    pub fn render_button(&self, t: &dyn Translator) -> String {
        let class = class_names([
            Some("btn w-100 d-flex align-items-center justify-content-center gap-2 border"),
            Some("social-btn"),
            (self.id == ProviderId::Google).then_some("social-btn-neutral-ring"),
        ]);
        let style = format!("--social-bg: {}", self.background_color);
        let icon_style = format!(
            "font-size: {}px; color: {}",
            self.icon_size,
            self.logo_color.unwrap_or("inherit")
        );
        let icon_class = format!("bi bi-{}", self.id);
        let label = t.translate("auth.sign-in-social", &[("name", self.name)]);
        let label_style = format!("color: {}", self.text_color);

        html! {
            button.type_("submit").class(#class)
        }
        .attr("name", "provider")
        .attr("value", self.id.as_str())
        .attr("style", &style)
        .child::<ironhtml_elements::I, _>(|i| {
            i.class(&icon_class)
                .attr("style", &icon_style)
                .attr("aria-hidden", "true")
        })
        .child::<Span, _>(|s| s.attr("style", &label_style).text(&label))
        .render()
    }
}

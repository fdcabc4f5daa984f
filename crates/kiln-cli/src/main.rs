//! kiln CLI
//!
//! Renders the auth screens to standalone HTML pages and validates JSON
//! payloads against the auth schemas.

use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{bail, Context};
use clap::{Parser, Subcommand, ValueEnum};
use ironhtml::typed::Document;
use ironhtml_elements::{Body, Div, Head, Html, Link, Meta, Script, Title};
use serde_json::{json, Value};
use tracing::{debug, info, Level};
use tracing_subscriber::FmtSubscriber;

use kiln_auth::{render_sign_in_page, ChangePasswordForm, SignInForm, SignInRoutes};
use kiln_forms::auth_schema::{
    change_password_schema, sign_in_schema, sign_up_schema, update_user_schema, PasswordPolicy,
};
use kiln_forms::i18n::{Catalog, KeyTranslator, Translator};
use kiln_forms::{build, AcceptAll, FieldRegistry, FormDescriptor, FormHandle, ObjectSchema, Schema};
use kiln_theme::{
    DocumentAttributes, MemoryStorage, ResolvedTheme, StaticPreference, Theme,
    ThemeStore, BOOTSTRAP_JS, THEME_KEY,
};

/// Render auth screens and validate payloads.
#[derive(Parser)]
#[command(name = "kiln")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Theme preference: dark, light or system.
    #[arg(long, env = "KILN_THEME", default_value = "system")]
    theme: Theme,

    /// OS color scheme used to resolve the `system` theme.
    #[arg(long, value_enum, default_value_t = OsScheme::Dark)]
    os_scheme: OsScheme,

    /// JSON message catalog. Message keys are printed when not given.
    #[arg(short, long, env = "KILN_MESSAGES")]
    messages: Option<PathBuf>,

    /// Minimum password length.
    #[arg(long, default_value_t = 8)]
    password_min: usize,

    /// Enable verbose output.
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render a built-in screen as a full HTML page.
    Render {
        /// Screen to render.
        #[arg(value_enum)]
        screen: Screen,

        /// Field preset.
        #[arg(short, long, value_enum, default_value_t = Preset::Basic)]
        preset: Preset,

        /// Pre-fill development credentials.
        #[arg(long, env = "KILN_DEV")]
        dev: bool,

        /// Where OAuth sign-ins return to.
        #[arg(long)]
        callback_url: Option<String>,

        /// Output file (stdout if not specified).
        #[arg(short, long)]
        out: Option<PathBuf>,
    },

    /// Render a form declared as JSON.
    RenderForm {
        /// Form descriptor file.
        descriptor: PathBuf,

        /// JSON file with the form values.
        #[arg(long)]
        values: Option<PathBuf>,

        /// Field preset.
        #[arg(short, long, value_enum, default_value_t = Preset::Basic)]
        preset: Preset,

        /// Form action URL.
        #[arg(long, default_value = "")]
        action: String,

        /// Output file (stdout if not specified).
        #[arg(short, long)]
        out: Option<PathBuf>,
    },

    /// Validate a JSON payload and print the accepted values.
    Validate {
        /// Schema to validate against.
        #[arg(value_enum)]
        schema: SchemaKind,

        /// Payload file (stdin if not specified).
        input: Option<PathBuf>,
    },

    /// Show, set or toggle the theme.
    Theme {
        /// New preference.
        #[arg(long, conflicts_with = "toggle")]
        set: Option<Theme>,

        /// Switch to the opposite of the applied theme.
        #[arg(long)]
        toggle: bool,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OsScheme {
    Dark,
    Light,
}

impl From<OsScheme> for ResolvedTheme {
    fn from(scheme: OsScheme) -> Self {
        match scheme {
            OsScheme::Dark => Self::Dark,
            OsScheme::Light => Self::Light,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Screen {
    SignIn,
    ChangePassword,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Preset {
    Basic,
    Fancy,
}

impl Preset {
    fn registry(self) -> FieldRegistry {
        match self {
            Self::Basic => FieldRegistry::basic(),
            Self::Fancy => FieldRegistry::fancy(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum SchemaKind {
    SignIn,
    SignUp,
    UpdateUser,
    ChangePassword,
}

impl SchemaKind {
    fn schema(self, t: &dyn Translator, policy: &PasswordPolicy) -> ObjectSchema {
        match self {
            Self::SignIn => sign_in_schema(t, policy),
            Self::SignUp => sign_up_schema(t, policy),
            Self::UpdateUser => update_user_schema(t),
            Self::ChangePassword => change_password_schema(t, policy),
        }
    }
}

fn load_translator(path: Option<&Path>) -> anyhow::Result<Arc<dyn Translator>> {
    let Some(path) = path else {
        return Ok(Arc::new(KeyTranslator));
    };
    let json = fs::read_to_string(path)
        .with_context(|| format!("reading message catalog {}", path.display()))?;
    let catalog = Catalog::from_json(&json)
        .with_context(|| format!("parsing message catalog {}", path.display()))?;
    debug!(messages = catalog.len(), path = %path.display(), "catalog loaded");
    Ok(Arc::new(catalog))
}

fn read_json(path: Option<&Path>) -> anyhow::Result<Value> {
    let text = match path {
        Some(path) => fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?,
        None => {
            let mut text = String::new();
            io::stdin().read_to_string(&mut text)?;
            text
        }
    };
    Ok(serde_json::from_str(&text)?)
}

fn theme_store(theme: Theme, os: ResolvedTheme) -> anyhow::Result<(ThemeStore, Arc<DocumentAttributes>)> {
    let storage = MemoryStorage::with_entries([(THEME_KEY, theme.as_str())]);
    let document = Arc::new(DocumentAttributes::new());
    let store = ThemeStore::new(
        Arc::new(storage),
        Arc::new(StaticPreference::new(os)),
        document.clone(),
    )?;
    Ok((store, document))
}

/// Wraps `content` in a standalone page with the theme applied.
fn render_page(title: &str, content: &str, resolved: ResolvedTheme) -> String {
    let color_scheme = format!("color-scheme: {resolved}");

    Document::new()
        .doctype()
        .root::<Html, _>(|html_el| {
            html_el
                .attr("lang", "en")
                .data("theme", resolved.as_str())
                .attr("style", &color_scheme)
                .child::<Head, _>(|head| {
                    head.child::<Meta, _>(|m| m.attr("charset", "UTF-8"))
                        .child::<Meta, _>(|m| {
                            m.attr("name", "viewport")
                                .attr("content", "width=device-width, initial-scale=1.0")
                        })
                        .child::<Title, _>(|t| t.text(title))
                        .child::<Link, _>(|l| {
                            l.attr("href", "https://cdn.jsdelivr.net/npm/bootstrap@5.3.2/dist/css/bootstrap.min.css")
                                .attr("rel", "stylesheet")
                        })
                        .child::<Script, _>(|s| s.attr("id", "theme-bootstrap").raw(BOOTSTRAP_JS))
                })
                .child::<Body, _>(|body| {
                    body.child::<Div, _>(|main| main.class("container py-5").raw(content))
                })
        })
        .build()
}

fn write_output(out: Option<&Path>, html: &str) -> anyhow::Result<()> {
    match out {
        Some(path) => {
            fs::write(path, html).with_context(|| format!("writing {}", path.display()))?;
            info!("Wrote {}", path.display());
        }
        None => println!("{html}"),
    }
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging
    let log_level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .without_time()
        .with_writer(io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let translator = load_translator(cli.messages.as_deref())?;
    let policy = PasswordPolicy::default().min_length(cli.password_min);
    let (store, document) = theme_store(cli.theme, cli.os_scheme.into())?;

    match cli.command {
        Commands::Render {
            screen,
            preset,
            dev,
            callback_url,
            out,
        } => {
            let registry = preset.registry();
            let (title, content) = match screen {
                Screen::SignIn => {
                    let form = SignInForm::new(translator.clone(), &policy, dev);
                    let routes = SignInRoutes {
                        callback_url,
                        ..SignInRoutes::default()
                    };
                    (
                        translator.t("auth.sign-in"),
                        render_sign_in_page(&form, &registry, &routes)?,
                    )
                }
                Screen::ChangePassword => {
                    if preset != Preset::Fancy {
                        debug!("change-password always uses the fancy preset");
                    }
                    let form = ChangePasswordForm::new(translator.clone(), &policy);
                    (
                        translator.t("auth.change-password"),
                        form.render("/account/password")?,
                    )
                }
            };
            write_output(out.as_deref(), &render_page(&title, &content, store.resolved()))?;
        }

        Commands::RenderForm {
            descriptor,
            values,
            preset,
            action,
            out,
        } => {
            let json = fs::read_to_string(&descriptor)
                .with_context(|| format!("reading {}", descriptor.display()))?;
            let form = FormDescriptor::from_json(&json)?;
            let values = match values {
                Some(path) => read_json(Some(&path))?,
                None => json!({}),
            };
            let handle = FormHandle::new(AcceptAll, values);
            let rendered = build(&preset.registry(), &form, &handle)?;
            let title = descriptor
                .file_stem()
                .map_or_else(|| "form".to_string(), |s| s.to_string_lossy().into_owned());
            let html = render_page(&title, &rendered.render(&action, "post"), store.resolved());
            write_output(out.as_deref(), &html)?;
        }

        Commands::Validate { schema, input } => {
            let payload = read_json(input.as_deref())?;
            match schema.schema(translator.as_ref(), &policy).validate(&payload) {
                Ok(accepted) => println!("{}", serde_json::to_string_pretty(&accepted)?),
                Err(errors) => {
                    println!("{}", serde_json::to_string_pretty(&errors)?);
                    bail!("{} field(s) failed validation", errors.len());
                }
            }
        }

        Commands::Theme { set, toggle } => {
            let state = match (set, toggle) {
                (Some(theme), _) => store.set(theme)?,
                (None, true) => store.toggle()?,
                (None, false) => store.state(),
            };
            println!("theme: {}", state.value);
            println!("resolved: {}", state.resolved);
            println!("html: <html {}>", document.html_attrs());
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_cli_parses() {
        let cli = Cli::try_parse_from(["kiln", "--theme", "dark", "render", "sign-in", "-p", "fancy"]).unwrap();
        assert_eq!(cli.theme, Theme::Dark);
        assert!(matches!(
            cli.command,
            Commands::Render { screen: Screen::SignIn, preset: Preset::Fancy, .. }
        ));

        assert!(Cli::try_parse_from(["kiln", "--theme", "sepia", "theme"]).is_err());
    }

    #[test]
    fn test_load_translator_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"auth": {{"sign-in": "Sign in"}}}}"#).unwrap();

        let translator = load_translator(Some(file.path())).unwrap();
        assert_eq!(translator.t("auth.sign-in"), "Sign in");
        assert_eq!(translator.t("auth.sign-up"), "auth.sign-up");

        let fallback = load_translator(None).unwrap();
        assert_eq!(fallback.t("auth.sign-in"), "auth.sign-in");
    }

    #[test]
    fn test_load_translator_rejects_bad_catalog() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"auth": {{"sign-in": 3}}}}"#).unwrap();
        assert!(load_translator(Some(file.path())).is_err());
    }

    #[test]
    fn test_theme_store_resolves_system() {
        let (store, document) = theme_store(Theme::System, ResolvedTheme::Light).unwrap();
        assert_eq!(store.resolved(), ResolvedTheme::Light);
        assert_eq!(document.color_scheme(), Some("light"));
    }

    #[test]
    fn test_render_page_applies_theme() {
        let html = render_page("Sign in", "<p>hi</p>", ResolvedTheme::Dark);
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains(r#"data-theme="dark""#));
        assert!(html.contains("color-scheme: dark"));
        assert!(html.contains(r#"<script id="theme-bootstrap">"#));
        assert!(html.contains("localStorage.getItem('theme')"));
        assert!(html.find("theme-bootstrap").unwrap() < html.find("</head>").unwrap());
        assert!(html.contains("<p>hi</p>"));
    }
}

//! Page renderer: maps loaded content onto the résumé template.

use minijinja::{AutoEscape, Environment, Error, Output, State, Value};
use serde::Serialize;

use vitae_content::{Content, GeneralData, Record, SectionKind};

use crate::markdown::Markdown;

/// Page-level settings that do not come from the content files.
#[derive(Debug, Clone)]
pub struct PageConfig {
    /// Document language
    pub lang: String,
    /// Meta description
    pub description: String,
    /// Footer copyright holder, omitted when empty
    pub copyright: String,
    /// Target of the footer "Built with vitae" credit; plain text when empty
    pub source_url: String,
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            lang: "en".to_string(),
            description: "Resume".to_string(),
            copyright: String::new(),
            source_url: String::new(),
        }
    }
}

/// How a contact field turns into a link.
struct ContactScheme {
    field: &'static str,
    icon: &'static str,
    prefix: &'static str,
    new_tab: bool,
}

/// Contact fields in display order.
const CONTACT_SCHEMES: [ContactScheme; 6] = [
    ContactScheme {
        field: "email",
        icon: "fa fa-envelope",
        prefix: "mailto:",
        new_tab: false,
    },
    ContactScheme {
        field: "phone",
        icon: "fa fa-phone",
        prefix: "tel:",
        new_tab: false,
    },
    ContactScheme {
        field: "website",
        icon: "fa fa-globe",
        prefix: "http://",
        new_tab: false,
    },
    ContactScheme {
        field: "linkedin",
        icon: "fa fa-linkedin",
        prefix: "https://linkedin.com/in/",
        new_tab: true,
    },
    ContactScheme {
        field: "github",
        icon: "fa fa-github",
        prefix: "http://github.com/",
        new_tab: true,
    },
    ContactScheme {
        field: "twitter",
        icon: "fa fa-twitter",
        prefix: "http://twitter.com/",
        new_tab: true,
    },
];

#[derive(Debug, Serialize)]
struct ContactLink {
    class: &'static str,
    icon: &'static str,
    href: String,
    text: String,
    new_tab: bool,
}

#[derive(Debug, Serialize)]
struct Profile {
    name: Option<String>,
    tagline: Option<String>,
    summary: Option<String>,
    contacts: Vec<ContactLink>,
}

#[derive(Debug, Serialize)]
struct EducationItem {
    degree: Option<String>,
    university: Option<String>,
    time: Option<String>,
}

#[derive(Debug, Serialize)]
struct LanguageItem {
    idiom: Option<String>,
    level: Option<String>,
}

#[derive(Debug, Serialize)]
struct InterestItem {
    item: Option<String>,
}

#[derive(Debug, Serialize)]
struct ExperienceItem {
    role: Option<String>,
    time: Option<String>,
    company: Option<String>,
    details: Option<String>,
}

#[derive(Debug, Serialize)]
struct ProjectItem {
    title: Option<String>,
    link: Option<String>,
    tagline: Option<String>,
}

#[derive(Debug, Serialize)]
struct SkillItem {
    name: Option<String>,
    time: Option<String>,
}

#[derive(Debug, Serialize)]
struct Footer<'a> {
    copyright: &'a str,
    source_url: &'a str,
}

/// Everything the template sees.
#[derive(Debug, Serialize)]
struct PageContext<'a> {
    lang: &'a str,
    description: &'a str,
    profile: Profile,
    education: Vec<EducationItem>,
    languages: Vec<LanguageItem>,
    interests: Vec<InterestItem>,
    experience: Vec<ExperienceItem>,
    projects: Vec<ProjectItem>,
    skills: Vec<SkillItem>,
    footer: Footer<'a>,
}

fn field(record: &Record, key: &str) -> Option<String> {
    record.field(key).map(str::to_owned)
}

fn items<T>(content: &Content, kind: SectionKind, view: impl Fn(&Record) -> T) -> Vec<T> {
    content.section(kind).iter().map(view).collect()
}

fn contacts(general: &GeneralData) -> Vec<ContactLink> {
    CONTACT_SCHEMES
        .iter()
        .filter_map(|scheme| {
            general.field(scheme.field).map(|value| ContactLink {
                class: scheme.field,
                icon: scheme.icon,
                href: format!("{}{}", scheme.prefix, value),
                text: value.to_string(),
                new_tab: scheme.new_tab,
            })
        })
        .collect()
}

impl<'a> PageContext<'a> {
    fn new(content: &Content, page: &'a PageConfig) -> Self {
        let general = &content.general;

        Self {
            lang: &page.lang,
            description: &page.description,
            profile: Profile {
                name: field(general.record(), "name"),
                tagline: field(general.record(), "tagline"),
                summary: field(general.record(), "summary"),
                contacts: contacts(general),
            },
            education: items(content, SectionKind::Education, |r| EducationItem {
                degree: field(r, "degree"),
                university: field(r, "university"),
                time: field(r, "time"),
            }),
            languages: items(content, SectionKind::Languages, |r| LanguageItem {
                idiom: field(r, "idiom"),
                level: field(r, "level"),
            }),
            interests: items(content, SectionKind::Interests, |r| InterestItem {
                item: field(r, "item"),
            }),
            experience: items(content, SectionKind::Experience, |r| ExperienceItem {
                role: field(r, "role"),
                time: field(r, "time"),
                company: field(r, "company"),
                details: field(r, "details"),
            }),
            projects: items(content, SectionKind::Projects, |r| ProjectItem {
                title: field(r, "title"),
                link: field(r, "link"),
                tagline: field(r, "tagline"),
            }),
            skills: items(content, SectionKind::Skills, |r| SkillItem {
                name: field(r, "name"),
                time: field(r, "time"),
            }),
            footer: Footer {
                copyright: &page.copyright,
                source_url: &page.source_url,
            },
        }
    }
}

/// Renders the single résumé page.
pub struct PageRenderer {
    env: Environment<'static>,
    page: PageConfig,
}

impl PageRenderer {
    /// Compile the page template and register the markdown filters.
    pub fn new(markdown: &Markdown, page: PageConfig) -> Self {
        let mut env = Environment::new();
        env.set_trim_blocks(true);
        env.set_lstrip_blocks(true);
        env.set_formatter(attribute_safe_formatter);

        let md = markdown.clone();
        env.add_filter("markdown", move |source: &str| {
            Value::from_safe_string(md.render(source))
        });
        let md = markdown.clone();
        env.add_filter("markdown_inline", move |source: &str| {
            Value::from_safe_string(md.render_inline(source))
        });

        env.add_template("index.html", PAGE_TEMPLATE)
            .expect("Failed to add page template");

        Self { env, page }
    }

    /// Render the page for the given content.
    pub fn render(&self, content: &Content) -> Result<String, Error> {
        let tmpl = self.env.get_template("index.html")?;
        tmpl.render(PageContext::new(content, &self.page))
    }
}

/// Escape HTML special characters including single quotes.
///
/// Unlike the stock escaper this leaves `/` alone so URLs stay readable.
fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}

fn attribute_safe_formatter(
    out: &mut Output<'_>,
    state: &State<'_, '_>,
    value: &Value,
) -> Result<(), Error> {
    if matches!(state.auto_escape(), AutoEscape::Html) && !value.is_safe() {
        if let Some(s) = value.as_str() {
            out.write_str(&html_escape(s))?;
            return Ok(());
        }
    }
    minijinja::escape_formatter(out, state, value)
}

const PAGE_TEMPLATE: &str = r##"<!DOCTYPE html>
<html lang="{{ lang }}">
<head>
    <meta charset="utf-8">
    {% if profile.name is not none %}
    <title>{{ profile.name }}</title>
    {% endif %}
    <meta name="description" content="{{ description }}">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <link rel="shortcut icon" href="Resources/favicon.ico">
    <link rel="stylesheet" href="https://fonts.googleapis.com/css?family=Roboto:400,500,400italic,300italic,300,500italic,700,700italic,900,900italic">
    <link rel="stylesheet" href="Resources/plugins/bootstrap/css/bootstrap.min.css">
    <link rel="stylesheet" href="Resources/plugins/font-awesome/css/font-awesome.css">
    <link rel="stylesheet" href="Resources/css/styles.css">
</head>
<body>
    <div class="wrapper">
        <div class="sidebar-wrapper">
            <div class="profile-container">
                <img class="profile-img" src="Resources/images/profile.png" alt="profile picture">
                {% if profile.name is not none %}
                <h1 class="name">{{ profile.name }}</h1>
                {% endif %}
                {% if profile.tagline is not none %}
                <h1 class="tagline">{{ profile.tagline }}</h1>
                {% endif %}
            </div>
            <div class="contact-container container-block">
                <ul class="list-unstyled contact-list">
                    {% for contact in profile.contacts %}
                    <li class="{{ contact.class }}"><i class="{{ contact.icon }}"></i><a href="{{ contact.href }}"{% if contact.new_tab %} target="_blank"{% endif %}>{{ contact.text }}</a></li>
                    {% endfor %}
                </ul>
            </div>
            {% if education %}
            <div class="education-container container-block">
                <h2 class="container-block-title">Education</h2>
                {% for edu in education %}
                <div class="item">
                    {% if edu.degree is not none %}
                    <h4 class="degree">{{ edu.degree }}</h4>
                    {% endif %}
                    {% if edu.university is not none %}
                    <h5 class="meta">{{ edu.university }}</h5>
                    {% endif %}
                    {% if edu.time is not none %}
                    <div class="time">{{ edu.time }}</div>
                    {% endif %}
                </div>
                {% endfor %}
            </div>
            {% endif %}
            {% if languages %}
            <div class="languages-container container-block">
                <h2 class="container-block-title">Languages</h2>
                <ul class="list-unstyled languages-list">
                    {% for language in languages %}
                    <li>{% if language.idiom is not none %}{{ language.idiom }}{% endif %}{% if language.level is not none %} <span class="lang-desc">({{ language.level }})</span>{% endif %}</li>
                    {% endfor %}
                </ul>
            </div>
            {% endif %}
            {% if interests %}
            <div class="interests-container container-block">
                <h2 class="container-block-title">Interests</h2>
                <ul class="list-unstyled interests-list">
                    {% for interest in interests %}
                    <li>{% if interest.item is not none %}{{ interest.item }}{% endif %}</li>
                    {% endfor %}
                </ul>
            </div>
            {% endif %}
        </div>
        <div class="main-wrapper">
            {% if profile.summary is not none %}
            <section class="section summary-section">
                <h2 class="section-title"><i class="fa fa-user"></i>Career Profile</h2>
                <div class="summary">
                    {{ profile.summary | markdown }}
                </div>
            </section>
            {% endif %}
            {% if experience %}
            <section class="section experiences-section">
                <h2 class="section-title"><i class="fa fa-briefcase"></i>Experiences</h2>
                {% for exp in experience %}
                <div class="item">
                    <div class="meta">
                        <div class="upper-row">
                            {% if exp.role is not none %}
                            <h3 class="job-title">{{ exp.role }}</h3>
                            {% endif %}
                            {% if exp.time is not none %}
                            <div class="time">{{ exp.time }}</div>
                            {% endif %}
                        </div>
                        <div class="company">{% if exp.company is not none %}{{ exp.company }}{% endif %}</div>
                    </div>
                    {% if exp.details is not none %}
                    <div class="details">
                        {{ exp.details | markdown }}
                    </div>
                    {% endif %}
                </div>
                {% endfor %}
            </section>
            {% endif %}
            {% if projects %}
            <section class="section projects-section">
                <h2 class="section-title"><i class="fa fa-archive"></i>Projects</h2>
                {% for project in projects %}
                <div class="item">
                    {% if project.title is not none %}
                    {% if project.link is not none %}
                    <span class="project-title"><a href="{{ project.link }}">{{ project.title }}</a></span>
                    {% else %}
                    <span class="project-title">{{ project.title }}</span>
                    {% endif %}
                    {% endif %}
                    {% if project.tagline is not none %}
                    <span class="project-tagline">{{ project.tagline | markdown_inline }}</span>
                    {% endif %}
                </div>
                {% endfor %}
            </section>
            {% endif %}
            {% if skills %}
            <section class="section skills-section">
                <h2 class="section-title"><i class="fa fa-rocket"></i>Skills &amp; Proficiency</h2>
                <div class="skillset">
                    {% for skill in skills %}
                    <div class="item">
                        {% if skill.name is not none %}
                        <h3 class="skill-title">{{ skill.name }}</h3>
                        {% endif %}
                        {% if skill.time is not none %}
                        <div class="skill-time">{{ skill.time }}</div>
                        {% endif %}
                    </div>
                    {% endfor %}
                </div>
            </section>
            {% endif %}
        </div>
    </div>
    <footer class="footer">
        <div class="text-center">
            <span class="copyright">
                {% if footer.copyright %}
                Copyright &copy; {{ footer.copyright }}<br>
                {% endif %}
                Built with {% if footer.source_url %}<a href="{{ footer.source_url }}" target="_blank">vitae</a>{% else %}vitae{% endif %}
            </span>
        </div>
    </footer>
</body>
</html>
"##;

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use vitae_content::Section;

    fn record(fields: &[(&str, &str)]) -> Record {
        fields.iter().copied().collect()
    }

    fn section(records: &[&[(&str, &str)]]) -> Section {
        records.iter().map(|fields| record(fields)).collect()
    }

    fn render(content: &Content) -> String {
        PageRenderer::new(&Markdown::new(), PageConfig::default())
            .render(content)
            .unwrap()
    }

    fn full_content() -> Content {
        let general = [
            ("name", "Ada Lovelace"),
            ("tagline", "Analyst"),
            ("summary", "Writes **programs** for [engines](https://example.com)."),
            ("email", "ada@example.com"),
            ("phone", "+44 20 0000"),
            ("website", "ada.dev"),
            ("linkedin", "ada"),
            ("github", "ada"),
            ("twitter", "ada"),
        ]
        .into_iter()
        .collect();

        Content::new(general)
            .with_section(
                SectionKind::Education,
                section(&[&[("degree", "BSc"), ("university", "London"), ("time", "1830")]]),
            )
            .with_section(
                SectionKind::Languages,
                section(&[&[("idiom", "English"), ("level", "Native")]]),
            )
            .with_section(SectionKind::Interests, section(&[&[("item", "Poetry")]]))
            .with_section(
                SectionKind::Experience,
                section(&[&[
                    ("role", "Analyst"),
                    ("time", "1842"),
                    ("company", "Babbage & Co"),
                    ("details", "Notes on the *engine*"),
                ]]),
            )
            .with_section(
                SectionKind::Projects,
                section(&[&[("title", "Note G"), ("tagline", "First *program*")]]),
            )
            .with_section(
                SectionKind::Skills,
                section(&[&[("name", "Mathematics"), ("time", "Lifelong")]]),
            )
    }

    fn position(html: &str, needle: &str) -> usize {
        html.find(needle)
            .unwrap_or_else(|| panic!("{needle} not found in output"))
    }

    #[test]
    fn renders_all_sections_in_canonical_order() {
        let html = render(&full_content());

        let order = [
            "profile-container",
            "contact-container",
            "education-container",
            "languages-container",
            "interests-container",
            "summary-section",
            "experiences-section",
            "projects-section",
            "skills-section",
            "class=\"footer\"",
        ];
        let positions: Vec<usize> = order.iter().map(|n| position(&html, n)).collect();
        let mut sorted = positions.clone();
        sorted.sort_unstable();

        assert_eq!(positions, sorted);
    }

    #[test]
    fn output_is_deterministic() {
        let content = full_content();

        assert_eq!(render(&content), render(&content));
    }

    #[test]
    fn empty_content_omits_optional_blocks() {
        let html = render(&Content::default());

        assert!(!html.contains("<title>"));
        assert!(!html.contains("class=\"name\""));
        assert!(!html.contains("Education"));
        assert!(!html.contains("Languages"));
        assert!(!html.contains("Interests"));
        assert!(!html.contains("Career Profile"));
        assert!(!html.contains("Experiences"));
        assert!(!html.contains("Projects"));
        assert!(!html.contains("Skills &amp; Proficiency"));
        assert!(html.contains("contact-list"));
        assert!(html.contains("class=\"footer\""));
    }

    #[test]
    fn title_follows_name() {
        let html = render(&Content::new([("name", "Ada")].into_iter().collect()));

        assert!(html.contains("<title>Ada</title>"));
        assert!(html.contains(r#"<h1 class="name">Ada</h1>"#));
        assert!(!html.contains("class=\"tagline\""));
    }

    #[test]
    fn summary_is_markdown_with_new_context_links() {
        let html = render(&full_content());

        assert!(html.contains("Career Profile"));
        assert!(html.contains("<strong>programs</strong>"));
        assert!(html.contains(r#"<a href="https://example.com" target="_blank">engines</a>"#));
    }

    #[test]
    fn every_link_opens_in_new_context_or_is_a_contact_scheme() {
        let html = render(&full_content());

        for anchor in html.match_indices("<a ").map(|(i, _)| &html[i..]) {
            let tag = &anchor[..anchor.find('>').unwrap()];
            assert!(
                tag.contains("target=\"_blank\"")
                    || tag.contains("mailto:")
                    || tag.contains("tel:")
                    || tag.contains("http://ada.dev"),
                "unexpected anchor {tag}"
            );
        }
    }

    #[test]
    fn contact_list_renders_only_present_fields() {
        let general = [("email", "a@b.io"), ("github", "ada")].into_iter().collect();
        let html = render(&Content::new(general));

        assert_eq!(html.matches("<li class=").count(), 2);
        let email = position(&html, r#"<a href="mailto:a@b.io">a@b.io</a>"#);
        let github = position(&html, r#"<a href="http://github.com/ada" target="_blank">ada</a>"#);
        assert!(email < github);
        assert!(!html.contains("tel:"));
        assert!(!html.contains("linkedin.com"));
    }

    #[test]
    fn contact_schemes() {
        let html = render(&full_content());

        assert!(html.contains(r#"href="tel:+44 20 0000""#));
        assert!(html.contains(r#"<a href="http://ada.dev">ada.dev</a>"#));
        assert!(html.contains(r#"href="https://linkedin.com/in/ada" target="_blank""#));
        assert!(html.contains(r#"href="http://twitter.com/ada" target="_blank""#));
    }

    #[test]
    fn project_title_without_link_is_plain_text() {
        let content = Content::default().with_section(
            SectionKind::Projects,
            section(&[&[("title", "Demo")]]),
        );
        let html = render(&content);

        assert!(html.contains(r#"<span class="project-title">Demo</span>"#));
        assert!(!html.contains(">Demo</a>"));
    }

    #[test]
    fn project_title_with_link_is_anchor() {
        let content = Content::default().with_section(
            SectionKind::Projects,
            section(&[&[("title", "Demo"), ("link", "http://x.io")]]),
        );
        let html = render(&content);

        assert!(html.contains(r#"<a href="http://x.io">Demo</a>"#));
    }

    #[test]
    fn project_tagline_is_inline_markdown() {
        let html = render(&full_content());

        assert!(html.contains(r#"<span class="project-tagline">First <em>program</em></span>"#));
    }

    #[test]
    fn experience_without_details_omits_details_block() {
        let content = Content::default().with_section(
            SectionKind::Experience,
            section(&[&[("role", "Engineer")], &[("company", "Acme"), ("details", "Built *things*")]]),
        );
        let html = render(&content);

        assert_eq!(html.matches("class=\"details\"").count(), 1);
        assert!(html.contains(r#"<h3 class="job-title">Engineer</h3>"#));
        assert!(html.contains("<em>things</em>"));
        assert!(html.contains(r#"<div class="company">Acme</div>"#));
    }

    #[test]
    fn plain_text_is_escaped() {
        let html = render(&full_content());

        assert!(html.contains("Babbage &amp; Co"));
    }

    #[test]
    fn language_level_in_parentheses() {
        let html = render(&full_content());

        assert!(html.contains(r#"<li>English <span class="lang-desc">(Native)</span></li>"#));
    }

    #[test]
    fn footer_uses_page_config() {
        let page = PageConfig {
            copyright: "Ada, 1843".to_string(),
            source_url: "https://example.com/src".to_string(),
            ..Default::default()
        };
        let html = PageRenderer::new(&Markdown::new(), page)
            .render(&Content::default())
            .unwrap();

        assert!(html.contains("Copyright &copy; Ada, 1843"));
        assert!(html.contains(r#"<a href="https://example.com/src" target="_blank">vitae</a>"#));
    }

    #[test]
    fn default_footer_still_credits_generator() {
        let html = render(&Content::default());
        let footer = &html[position(&html, "class=\"footer\"")..];

        assert!(footer.contains("Built with vitae"));
        assert!(!footer.contains("Copyright"));
        assert!(!footer.contains("<a "));
    }

    #[test]
    fn escapes_without_mangling_urls() {
        assert_eq!(html_escape(r#"<a href="x">'&'/"#), "&lt;a href=&quot;x&quot;&gt;&#x27;&amp;&#x27;/");
    }
}

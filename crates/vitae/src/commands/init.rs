//! Scaffold a résumé project.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

use crate::config::CONFIG_FILE;

/// Files written by `init`, relative to the project root.
const SCAFFOLD: [(&str, &str); 9] = [
    (CONFIG_FILE, DEFAULT_CONFIG),
    ("Contents/GeneralData.yml", DEFAULT_GENERAL_DATA),
    ("Contents/Sections/Education.yml", DEFAULT_EDUCATION),
    ("Contents/Sections/Languages.yml", DEFAULT_LANGUAGES),
    ("Contents/Sections/Interests.yml", DEFAULT_INTERESTS),
    ("Contents/Sections/Experience.yml", DEFAULT_EXPERIENCE),
    ("Contents/Sections/Projects.yml", DEFAULT_PROJECTS),
    ("Contents/Sections/Skills.yml", DEFAULT_SKILLS),
    ("Resources/css/styles.css", DEFAULT_STYLES),
];

/// Run the init command.
pub fn run(root: &Path, yes: bool) -> Result<()> {
    tracing::info!("Initializing vitae in {}...", root.display());

    if root.join("Contents").exists() && !yes {
        tracing::warn!("Contents/ directory already exists. Use --yes to overwrite.");
        return Ok(());
    }

    for (relative, body) in SCAFFOLD {
        let path = root.join(relative);
        if path.exists() && !yes {
            continue;
        }
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        fs::write(&path, body).with_context(|| format!("Failed to write {}", relative))?;
        tracing::info!("Created {}", relative);
    }

    fs::create_dir_all(root.join("Resources/images"))
        .context("Failed to create Resources/images")?;

    tracing::info!("Initialization complete!");
    tracing::info!("Add Resources/images/profile.png, then run 'vitae build'.");

    Ok(())
}

const DEFAULT_CONFIG: &str = r#"# vitae configuration

[site]
# Content root holding GeneralData.yml and Sections/
content = "Contents"

# Output directory, cleared on every build
output = "Output"

# Directories copied verbatim into the output
resources = ["Resources"]

[page]
lang = "en"
description = "Resume"

# Footer copyright holder; omitted when empty
copyright = ""

# Link behind the "Built with vitae" credit; plain text when empty
source_url = ""
"#;

const DEFAULT_GENERAL_DATA: &str = r#"name: Jane Doe
tagline: Systems Engineer
summary: |
  Engineer with a taste for **small, dependable tools**.
  Currently building storage services at [Example Corp](https://example.com).
email: jane@example.com
phone: "+1 555 0100"
website: jane.example.com
github: janedoe
"#;

const DEFAULT_EDUCATION: &str = r#"- degree: MSc Computer Science
  university: University of Somewhere
  time: 2012 - 2014
- degree: BSc Mathematics
  university: University of Elsewhere
  time: 2009 - 2012
"#;

const DEFAULT_LANGUAGES: &str = r#"- idiom: English
  level: Native
- idiom: German
  level: Professional
"#;

const DEFAULT_INTERESTS: &str = r#"- item: Climbing
- item: Chess
"#;

const DEFAULT_EXPERIENCE: &str = r#"- role: Senior Engineer
  time: 2018 - Present
  company: Example Corp
  details: |
    Led the rewrite of the ingestion pipeline.
    Cut p99 latency by *half*.
- role: Engineer
  time: 2014 - 2018
  company: Startup Inc
"#;

const DEFAULT_PROJECTS: &str = r#"- title: vitae
  link: https://example.com/vitae
  tagline: Résumé pages from *plain YAML*
- title: Side project
  tagline: Not published yet
"#;

const DEFAULT_SKILLS: &str = r#"- name: Rust
  time: 6 years
- name: Distributed systems
  time: 8 years
"#;

const DEFAULT_STYLES: &str = r#"body {
  font-family: Roboto, sans-serif;
  color: #545E6C;
  background: #f5f5f5;
}

.wrapper {
  display: flex;
  max-width: 1000px;
  margin: 0 auto;
  background: #fff;
}

.sidebar-wrapper {
  width: 280px;
  background: #42A8C0;
  color: #fff;
  padding: 1.5rem;
}

.main-wrapper {
  flex: 1;
  padding: 2rem;
}

.section-title {
  text-transform: uppercase;
  font-size: 1.25rem;
}

.footer {
  text-align: center;
  padding: 1rem;
  font-size: 0.8rem;
}
"#;

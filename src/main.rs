//! CLI entry point for memorial-cms

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use memorial_cms::commands::show::PostRef;
use memorial_cms::content::{NewPost, PostFilter, PostStatus, StatusFilter};
use memorial_cms::settings::MergeMode;
use memorial_cms::speech::Language;

#[derive(Parser)]
#[command(name = "memorial-cms")]
#[command(version)]
#[command(about = "Content management for a memorial website", long_about = None)]
struct Cli {
    /// Set the base directory (defaults to current directory)
    #[arg(short = 'C', long, global = true)]
    cwd: Option<PathBuf>,

    /// Config file (defaults to cms.yml, cms.yaml or cms.toml in the base directory)
    #[arg(short = 'f', long, global = true)]
    config: Option<PathBuf>,

    /// Enable debug output
    #[arg(short, long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List posts, newest first
    #[command(alias = "ls")]
    List {
        /// Status to show (draft, published, scheduled, all)
        #[arg(short, long)]
        status: Option<StatusFilter>,

        /// Category to show ("all" for every category)
        #[arg(short, long)]
        category: Option<String>,

        /// Maximum number of posts (defaults to per_page)
        #[arg(short, long)]
        limit: Option<usize>,

        /// Number of posts to skip
        #[arg(short, long)]
        offset: Option<usize>,

        /// Print JSON
        #[arg(long)]
        json: bool,
    },

    /// Show one post by id or slug
    Show {
        /// Post id
        #[arg(required_unless_present = "slug")]
        id: Option<String>,

        /// Look the post up by slug instead
        #[arg(long, conflicts_with = "id")]
        slug: Option<String>,

        /// Count this lookup as a view
        #[arg(long)]
        track: bool,

        /// Print JSON
        #[arg(long)]
        json: bool,
    },

    /// Create a new post
    New {
        /// Title of the new post
        title: String,

        /// Category (defaults to default_category)
        #[arg(short, long)]
        category: Option<String>,

        /// Initial status
        #[arg(short, long, default_value = "draft")]
        status: PostStatus,

        /// Markdown body
        #[arg(long, default_value = "")]
        content: String,

        /// Author (defaults to default_author)
        #[arg(short, long)]
        author: Option<String>,
    },

    /// List categories with post counts
    Categories {
        /// Print JSON
        #[arg(long)]
        json: bool,
    },

    /// Show or update site settings
    Settings {
        /// JSON patch, e.g. '{"siteName": "Remembrance"}'
        #[arg(long)]
        set: Option<String>,

        /// Merge nested groups field by field instead of replacing them
        #[arg(long, requires = "set")]
        deep: bool,

        /// Print JSON
        #[arg(long)]
        json: bool,
    },

    /// Print the slug generated for a title
    Slug {
        text: String,
    },

    /// Read text aloud
    Speak {
        text: String,

        /// Language (en or ar)
        #[arg(short, long, default_value = "en")]
        lang: Language,
    },

    /// Display version information
    Version,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.debug {
        "memorial_cms=debug,info"
    } else {
        "memorial_cms=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    // Commands that need no store
    match &cli.command {
        Commands::Slug { text } => {
            println!("{}", memorial_cms::helpers::generate_slug(text));
            return Ok(());
        }
        Commands::Version => {
            println!("memorial-cms version {}", env!("CARGO_PKG_VERSION"));
            return Ok(());
        }
        _ => {}
    }

    let base_dir = match cli.cwd {
        Some(dir) => dir,
        None => std::env::current_dir().context("Cannot determine current directory")?,
    };

    let mut cms = match &cli.config {
        Some(path) => {
            let config = memorial_cms::config::CmsConfig::load(path)?;
            memorial_cms::Cms::with_config(config, &base_dir)?
        }
        None => memorial_cms::Cms::new(&base_dir)?,
    };

    match cli.command {
        Commands::List {
            status,
            category,
            limit,
            offset,
            json,
        } => {
            let filter = PostFilter {
                status,
                category,
                limit,
                offset,
            };
            memorial_cms::commands::list::run(&cms, filter, json)?;
        }

        Commands::Show {
            id,
            slug,
            track,
            json,
        } => {
            let post_ref = match (&id, &slug) {
                (_, Some(slug)) => PostRef::Slug(slug),
                (Some(id), None) => PostRef::Id(id),
                (None, None) => anyhow::bail!("Pass a post id or --slug"),
            };
            memorial_cms::commands::show::run(&mut cms, post_ref, track, json)?;
        }

        Commands::New {
            title,
            category,
            status,
            content,
            author,
        } => {
            let mut new_post = NewPost::new(title)
                .with_status(status)
                .with_content(content);
            if let Some(category) = category {
                new_post = new_post.with_category(category);
            }
            if let Some(author) = author {
                new_post.author = author;
            }
            memorial_cms::commands::new::run(&mut cms, new_post)?;
        }

        Commands::Categories { json } => {
            memorial_cms::commands::list::categories(&cms, json)?;
        }

        Commands::Settings { set, deep, json } => {
            let mode = if deep {
                MergeMode::Deep
            } else {
                MergeMode::Shallow
            };
            memorial_cms::commands::settings::run(&mut cms, set.as_deref(), mode, json)?;
        }

        Commands::Speak { text, lang } => {
            memorial_cms::commands::speak::run(&cms, &text, lang).await?;
        }

        Commands::Slug { .. } | Commands::Version => {}
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_list_filters() {
        let cli = Cli::try_parse_from(["memorial-cms", "list", "-c", "news", "-s", "all"]).unwrap();
        let Commands::List {
            status, category, ..
        } = cli.command
        else {
            panic!("expected list");
        };
        assert_eq!(status, Some(StatusFilter::All));
        assert_eq!(category.as_deref(), Some("news"));
    }

    #[test]
    fn test_parse_new_with_global_config() {
        let cli = Cli::try_parse_from([
            "memorial-cms",
            "new",
            "Hello World",
            "-c",
            "stories",
            "-s",
            "published",
            "-f",
            "site/cms.toml",
        ])
        .unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("site/cms.toml")));
        let Commands::New {
            title,
            category,
            status,
            ..
        } = cli.command
        else {
            panic!("expected new");
        };
        assert_eq!(title, "Hello World");
        assert_eq!(category.as_deref(), Some("stories"));
        assert_eq!(status, PostStatus::Published);
    }

    #[test]
    fn test_parse_rejects_unknown_status() {
        assert!(Cli::try_parse_from(["memorial-cms", "list", "-s", "archived"]).is_err());
    }

    #[test]
    fn test_parse_speak_language() {
        let cli = Cli::try_parse_from(["memorial-cms", "speak", "مرحبا", "--lang", "ar"]).unwrap();
        let Commands::Speak { lang, .. } = cli.command else {
            panic!("expected speak");
        };
        assert_eq!(lang, Language::ArabicSa);
    }
}

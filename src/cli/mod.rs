//! 命令行界面
//!
//! 一次性子命令（search / add / health / theme）以及交互式 shell。

pub mod shell;

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};

use crate::backend::{SearchBackend, create_backend};
use crate::composer::ALL;
use crate::config::config::AppConfig;
use crate::config::loader::ConfigLoader;
use crate::preferences::{PreferenceStore, Theme};
use crate::render::ResultsView;
use crate::screens::{IngestForm, SearchScreen};

#[derive(Debug, Parser)]
#[command(name = "datasearch", version, about = "Document search and ingestion client")]
pub struct Cli {
    /// Path to a TOML configuration file.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Search service base URL (overrides configuration).
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    /// Use the in-memory mock backend (requires the `mock` feature).
    #[arg(long, global = true)]
    pub mock: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Search documents.
    Search {
        /// Free-text query.
        query: String,

        /// Document type filter (news, opinion, publicistic, scientific, or "all").
        #[arg(long, default_value = ALL)]
        doc_type: String,

        /// Entity type filter (PER, ORG, LOC, DATE, or "all").
        #[arg(long, default_value = ALL)]
        entity_type: String,

        /// Entity value filter.
        #[arg(long)]
        entity_value: Option<String>,

        /// Print the result view as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Submit a new document for analysis and indexing.
    Add {
        #[arg(long)]
        title: String,
        #[arg(long)]
        body: String,
        #[arg(long)]
        source: String,
        /// Publication date, e.g. 2024-01-01.
        #[arg(long)]
        date: String,
    },

    /// Check that the search service is reachable.
    Health,

    /// Show or change the interface theme.
    Theme {
        #[command(subcommand)]
        action: Option<ThemeAction>,
    },

    /// Interactive search shell (default).
    Shell,
}

#[derive(Debug, Subcommand)]
pub enum ThemeAction {
    /// Print the current theme.
    Show,
    /// Switch between light and dark.
    Toggle,
    /// Set the theme explicitly.
    Set {
        /// light or dark
        theme: Theme,
    },
}

/// 加载配置并应用命令行覆盖
pub fn resolve_config(cli: &Cli) -> anyhow::Result<AppConfig> {
    let mut config = match &cli.config {
        Some(path) => ConfigLoader::load_from(path.clone())
            .with_context(|| format!("failed to load config from {}", path.display()))?,
        None => ConfigLoader::load().context("failed to load configuration")?,
    };

    if let Some(base_url) = &cli.base_url {
        config.backend.base_url = base_url.clone();
    }
    if cli.mock {
        config.backend.use_mock = true;
    }

    ConfigLoader::validate(&config)?;
    Ok(config)
}

/// 执行命令
pub async fn run(cli: Cli, config: AppConfig) -> anyhow::Result<ExitCode> {
    match cli.command.unwrap_or(Commands::Shell) {
        Commands::Theme { action } => {
            let preferences = PreferenceStore::from_config(config.preferences.path.as_deref())?;
            run_theme(&preferences, action)
        }
        Commands::Search {
            query,
            doc_type,
            entity_type,
            entity_value,
            json,
        } => {
            let backend = create_backend(&config.backend)?;
            let mut screen = search_screen(query, doc_type, entity_type, entity_value);
            run_search(backend.as_ref(), &mut screen, json).await
        }
        Commands::Add {
            title,
            body,
            source,
            date,
        } => {
            let backend = create_backend(&config.backend)?;
            let mut form = IngestForm {
                title,
                body,
                source,
                date,
                ..IngestForm::default()
            };
            run_add(backend.as_ref(), &mut form).await
        }
        Commands::Health => {
            let backend = create_backend(&config.backend)?;
            run_health(backend.as_ref()).await
        }
        Commands::Shell => {
            let preferences = PreferenceStore::from_config(config.preferences.path.as_deref())?;
            let backend: Arc<dyn SearchBackend> = create_backend(&config.backend)?;
            let mut shell = shell::Shell::new(backend, preferences);
            let stdin = std::io::stdin();
            shell.run(stdin.lock(), std::io::stdout()).await?;
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn search_screen(
    query: String,
    doc_type: String,
    entity_type: String,
    entity_value: Option<String>,
) -> SearchScreen {
    let mut screen = SearchScreen::new();
    screen.query = query;
    screen.doc_type = doc_type;
    screen.entity_type = entity_type;
    screen.entity_value = entity_value.unwrap_or_default();
    screen
}

async fn run_search(
    backend: &dyn SearchBackend,
    screen: &mut SearchScreen,
    json: bool,
) -> anyhow::Result<ExitCode> {
    if !screen.can_search() {
        eprintln!("Query is empty; nothing to search.");
        return Ok(ExitCode::from(2));
    }

    screen.submit(backend).await;
    let view = screen.view();
    if json {
        println!("{}", serde_json::to_string_pretty(&view)?);
    } else {
        println!("{}", view);
    }

    Ok(match view {
        ResultsView::Error(_) => ExitCode::FAILURE,
        _ => ExitCode::SUCCESS,
    })
}

async fn run_add(backend: &dyn SearchBackend, form: &mut IngestForm) -> anyhow::Result<ExitCode> {
    if let Some(field) = form.payload().first_missing_field() {
        eprintln!("Field '{}' must not be empty.", field);
        return Ok(ExitCode::from(2));
    }

    if form.submit(backend).await {
        if let Some(confirmation) = form.confirmation() {
            println!("{}", confirmation);
        }
        Ok(ExitCode::SUCCESS)
    } else {
        println!("✗ {}", form.error.as_deref().unwrap_or_default());
        Ok(ExitCode::FAILURE)
    }
}

async fn run_health(backend: &dyn SearchBackend) -> anyhow::Result<ExitCode> {
    match backend.health().await {
        Ok(health) => {
            println!("status: {}, documents: {}", health.status, health.docs_count);
            Ok(ExitCode::SUCCESS)
        }
        Err(e) => {
            println!("✗ {}", e.user_message());
            Ok(ExitCode::FAILURE)
        }
    }
}

fn run_theme(preferences: &PreferenceStore, action: Option<ThemeAction>) -> anyhow::Result<ExitCode> {
    let theme = match action.unwrap_or(ThemeAction::Show) {
        ThemeAction::Show => preferences.load_theme(),
        ThemeAction::Toggle => preferences.toggle_theme()?,
        ThemeAction::Set { theme } => {
            preferences.save_theme(theme)?;
            theme
        }
    };
    println!("{}", theme);
    Ok(ExitCode::SUCCESS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::HttpBackend;
    use crate::transport::HttpTransport;
    use serde_json::json;
    use std::io::Write;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn backend_for(server: &MockServer) -> HttpBackend {
        HttpBackend::new(HttpTransport::new(&server.uri(), None).unwrap())
    }

    #[test]
    fn test_parse_search_defaults_to_all() {
        let cli = Cli::try_parse_from(["datasearch", "search", "університет"]).unwrap();

        match cli.command {
            Some(Commands::Search {
                query,
                doc_type,
                entity_type,
                entity_value,
                json,
            }) => {
                assert_eq!(query, "університет");
                assert_eq!(doc_type, ALL);
                assert_eq!(entity_type, ALL);
                assert!(entity_value.is_none());
                assert!(!json);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_parse_add_requires_all_fields() {
        assert!(Cli::try_parse_from(["datasearch", "add", "--title", "T"]).is_err());

        let cli = Cli::try_parse_from([
            "datasearch", "add", "--title", "T", "--body", "B", "--source", "S", "--date",
            "2024-01-01",
        ])
        .unwrap();
        assert!(matches!(cli.command, Some(Commands::Add { .. })));
    }

    #[test]
    fn test_parse_theme_set() {
        let cli = Cli::try_parse_from(["datasearch", "theme", "set", "dark"]).unwrap();
        assert!(matches!(
            cli.command,
            Some(Commands::Theme {
                action: Some(ThemeAction::Set { theme: Theme::Dark })
            })
        ));
        assert!(Cli::try_parse_from(["datasearch", "theme", "set", "sepia"]).is_err());
    }

    #[test]
    fn test_no_subcommand_means_shell() {
        let cli = Cli::try_parse_from(["datasearch"]).unwrap();
        assert!(cli.command.is_none());
    }

    #[test]
    fn test_resolve_config_applies_overrides() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[backend]\nbase_url = \"http://from-file:1\"").unwrap();
        let path = file.path().to_string_lossy().to_string();

        let cli = Cli::try_parse_from(["datasearch", "--config", &path, "health"]).unwrap();
        assert_eq!(resolve_config(&cli).unwrap().backend.base_url, "http://from-file:1");

        let cli = Cli::try_parse_from([
            "datasearch", "--config", &path, "--base-url", "http://override:2", "health",
        ])
        .unwrap();
        assert_eq!(resolve_config(&cli).unwrap().backend.base_url, "http://override:2");
    }

    #[test]
    fn test_resolve_config_rejects_invalid_override() {
        let cli = Cli::try_parse_from([
            "datasearch", "--config", "missing.toml", "--base-url", "ftp://x", "health",
        ])
        .unwrap();
        assert!(resolve_config(&cli).is_err());
    }

    #[tokio::test]
    async fn test_run_search_sends_selected_facets() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/search"))
            .and(query_param("q", "університет"))
            .and(query_param("doc_type", "news"))
            .and(query_param("entity_value", "Київ"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .expect(1)
            .mount(&server)
            .await;

        let mut screen = search_screen(
            "університет".into(),
            "news".into(),
            ALL.into(),
            Some("Київ".into()),
        );
        let code = run_search(&backend_for(&server), &mut screen, false).await.unwrap();

        assert_eq!(code, ExitCode::SUCCESS);
        assert_eq!(screen.view(), ResultsView::NoResults);
        assert_eq!(screen.latest_seq(), 1);
    }

    #[tokio::test]
    async fn test_run_search_reports_server_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(503).set_body_string("index unavailable"))
            .mount(&server)
            .await;

        let mut screen = search_screen("дані".into(), ALL.into(), ALL.into(), None);
        let code = run_search(&backend_for(&server), &mut screen, true).await.unwrap();

        assert_eq!(code, ExitCode::FAILURE);
        assert_eq!(screen.error.as_deref(), Some("index unavailable"));
    }

    #[tokio::test]
    async fn test_run_search_with_blank_query_sends_nothing() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .expect(0)
            .mount(&server)
            .await;

        let mut screen = search_screen("   ".into(), ALL.into(), ALL.into(), None);
        let code = run_search(&backend_for(&server), &mut screen, false).await.unwrap();

        assert_eq!(code, ExitCode::from(2));
    }

    #[tokio::test]
    async fn test_search_command_runs_against_backend() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/search"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .expect(1)
            .mount(&server)
            .await;

        let cli = Cli::try_parse_from(["datasearch", "search", "q"]).unwrap();
        let mut config = AppConfig::default();
        config.backend.base_url = server.uri();

        assert_eq!(run(cli, config).await.unwrap(), ExitCode::SUCCESS);
    }
}

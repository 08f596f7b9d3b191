//! 交互式搜索 shell

use std::io::{BufRead, Write};
use std::sync::Arc;

use crate::backend::SearchBackend;
use crate::composer::ALL;
use crate::error::Result;
use crate::preferences::{PreferenceStore, Theme};
use crate::screens::{IngestForm, SearchScreen};

const PROMPT: &str = "search> ";

/// shell 命令
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellCommand {
    Help,
    Quit,
    /// 显示当前过滤条件
    Filters,
    /// 设置文档类型过滤
    DocType(String),
    /// 设置实体类型和可选的实体值
    Entity {
        entity_type: String,
        value: Option<String>,
    },
    /// 录入新文档
    Add,
    Health,
    /// 主题：None 表示显示，Some 表示设置
    Theme(Option<ThemeChange>),
    /// 执行搜索
    Search(String),
    Unknown(String),
    Empty,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThemeChange {
    Toggle,
    Set(Theme),
}

pub fn parse_command(line: &str) -> ShellCommand {
    let line = line.trim();
    if line.is_empty() {
        return ShellCommand::Empty;
    }
    if !line.starts_with('/') {
        return ShellCommand::Search(line.to_string());
    }

    let mut parts = line.splitn(3, char::is_whitespace);
    let command = parts.next().unwrap_or_default();
    let first = parts.next().map(str::trim).filter(|s| !s.is_empty());
    let rest = parts.next().map(str::trim).filter(|s| !s.is_empty());

    match command {
        "/help" | "/h" => ShellCommand::Help,
        "/quit" | "/q" | "/exit" => ShellCommand::Quit,
        "/filters" | "/f" => ShellCommand::Filters,
        "/type" => ShellCommand::DocType(first.unwrap_or(ALL).to_string()),
        "/entity" => ShellCommand::Entity {
            entity_type: first.unwrap_or(ALL).to_string(),
            value: rest.map(str::to_string),
        },
        "/add" => ShellCommand::Add,
        "/health" => ShellCommand::Health,
        "/theme" => match first {
            None => ShellCommand::Theme(None),
            Some("toggle") => ShellCommand::Theme(Some(ThemeChange::Toggle)),
            Some(value) => match value.parse::<Theme>() {
                Ok(theme) => ShellCommand::Theme(Some(ThemeChange::Set(theme))),
                Err(_) => ShellCommand::Unknown(line.to_string()),
            },
        },
        _ => ShellCommand::Unknown(line.to_string()),
    }
}

pub struct Shell {
    backend: Arc<dyn SearchBackend>,
    preferences: PreferenceStore,
    search: SearchScreen,
    ingest: IngestForm,
}

impl Shell {
    pub fn new(backend: Arc<dyn SearchBackend>, preferences: PreferenceStore) -> Self {
        Self {
            backend,
            preferences,
            search: SearchScreen::new(),
            ingest: IngestForm::new(),
        }
    }

    pub fn search_screen(&self) -> &SearchScreen {
        &self.search
    }

    pub fn ingest_form(&self) -> &IngestForm {
        &self.ingest
    }

    /// 主循环，读到 EOF 或 `/quit` 时结束
    pub async fn run<R: BufRead, W: Write>(&mut self, mut input: R, mut out: W) -> Result<()> {
        writeln!(out, "DataSearch (/help for commands)")?;

        loop {
            write!(out, "{}", PROMPT)?;
            out.flush()?;

            let mut line = String::new();
            if input.read_line(&mut line)? == 0 {
                break;
            }

            match parse_command(&line) {
                ShellCommand::Empty => continue,
                ShellCommand::Quit => break,
                ShellCommand::Help => show_help(&mut out)?,
                ShellCommand::Filters => self.show_filters(&mut out)?,
                ShellCommand::DocType(doc_type) => {
                    self.search.doc_type = doc_type;
                    self.show_filters(&mut out)?;
                }
                ShellCommand::Entity { entity_type, value } => {
                    self.search.entity_type = entity_type;
                    self.search.entity_value = value.unwrap_or_default();
                    self.show_filters(&mut out)?;
                }
                ShellCommand::Search(query) => {
                    self.search.query = query;
                    self.search.submit(self.backend.as_ref()).await;
                    writeln!(out, "{}", self.search.view())?;
                }
                ShellCommand::Add => self.add_document(&mut input, &mut out).await?,
                ShellCommand::Health => match self.backend.health().await {
                    Ok(health) => writeln!(
                        out,
                        "status: {}, documents: {}",
                        health.status, health.docs_count
                    )?,
                    Err(e) => writeln!(out, "✗ {}", e.user_message())?,
                },
                ShellCommand::Theme(change) => {
                    let theme = match change {
                        None => self.preferences.load_theme(),
                        Some(ThemeChange::Toggle) => self.preferences.toggle_theme()?,
                        Some(ThemeChange::Set(theme)) => {
                            self.preferences.save_theme(theme)?;
                            theme
                        }
                    };
                    writeln!(out, "theme: {}", theme)?;
                }
                ShellCommand::Unknown(command) => {
                    writeln!(out, "Unknown command: {} (try /help)", command)?;
                }
            }
        }

        Ok(())
    }

    fn show_filters<W: Write>(&self, out: &mut W) -> Result<()> {
        let value = if self.search.entity_value.is_empty() {
            "-"
        } else {
            &self.search.entity_value
        };
        writeln!(
            out,
            "doc_type: {}, entity_type: {}, entity_value: {}",
            self.search.doc_type, self.search.entity_type, value
        )?;
        Ok(())
    }

    /// 逐项询问字段；失败后再次 `/add` 时已有的输入作为默认值保留
    async fn add_document<R: BufRead, W: Write>(&mut self, input: &mut R, out: &mut W) -> Result<()> {
        self.ingest.title = prompt_field(input, out, "title", &self.ingest.title)?;
        self.ingest.body = prompt_field(input, out, "body", &self.ingest.body)?;
        self.ingest.source = prompt_field(input, out, "source", &self.ingest.source)?;
        self.ingest.date = prompt_field(input, out, "date", &self.ingest.date)?;

        if !self.ingest.can_submit() {
            if let Some(field) = self.ingest.payload().first_missing_field() {
                writeln!(out, "Field '{}' must not be empty.", field)?;
            }
            return Ok(());
        }

        if self.ingest.submit(self.backend.as_ref()).await {
            if let Some(confirmation) = self.ingest.confirmation() {
                writeln!(out, "{}", confirmation)?;
            }
        } else if let Some(error) = &self.ingest.error {
            writeln!(out, "✗ {}", error)?;
        }
        Ok(())
    }
}

fn prompt_field<R: BufRead, W: Write>(
    input: &mut R,
    out: &mut W,
    name: &str,
    current: &str,
) -> Result<String> {
    if current.is_empty() {
        write!(out, "  {}: ", name)?;
    } else {
        write!(out, "  {} [{}]: ", name, current)?;
    }
    out.flush()?;

    let mut line = String::new();
    input.read_line(&mut line)?;
    let line = line.trim_end_matches(['\r', '\n']);
    if line.trim().is_empty() {
        Ok(current.to_string())
    } else {
        Ok(line.to_string())
    }
}

fn show_help<W: Write>(out: &mut W) -> Result<()> {
    writeln!(out, "Commands:")?;
    writeln!(out, "  <query>                 search for text")?;
    writeln!(out, "  /type <doc_type|all>    filter by document type")?;
    writeln!(out, "  /entity <TYPE|all> [v]  filter by entity type and value")?;
    writeln!(out, "  /filters                show current filters")?;
    writeln!(out, "  /add                    add a document")?;
    writeln!(out, "  /health                 check the search service")?;
    writeln!(out, "  /theme [toggle|light|dark]")?;
    writeln!(out, "  /quit                   exit")?;
    Ok(())
}

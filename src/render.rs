//! 结果渲染
//!
//! 把搜索结果映射为显示卡片，把搜索界面状态映射为结果区域的视图。
//! 纯函数，不访问网络。

use serde::Serialize;
use std::fmt;

use crate::models::{EntityType, FullDocument, SearchResult};
use crate::screens::SearchScreen;

/// 结果为空时的提示
pub const NO_RESULTS_TEXT: &str = "Немає результатів.";

/// 加载中的提示
pub const LOADING_TEXT: &str = "Завантаження…";

/// 实体徽章
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EntityBadge {
    pub entity_type: EntityType,
    pub value: String,
}

impl EntityBadge {
    /// `"<TYPE>: <value>"`
    pub fn label(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for EntityBadge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.entity_type, self.value)
    }
}

/// 结果卡片
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Card {
    pub id: String,
    pub title: String,
    pub snippet: String,
    /// 文档类型徽章，原样显示
    pub doc_type: String,
    /// 保留三位小数的分数
    pub score: String,
    pub entities: Vec<EntityBadge>,
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "[{}] {}", self.doc_type, self.title)?;
        writeln!(f, "    {}", self.snippet)?;
        if !self.entities.is_empty() {
            let badges = self
                .entities
                .iter()
                .map(EntityBadge::label)
                .collect::<Vec<_>>()
                .join(" · ");
            writeln!(f, "    {}", badges)?;
        }
        write!(f, "    score: {}", self.score)
    }
}

pub fn format_score(score: f64) -> String {
    format!("{:.3}", score)
}

/// 把搜索结果映射为卡片
pub fn to_card(result: &SearchResult) -> Card {
    Card {
        id: result.id.clone(),
        title: result.title.clone(),
        snippet: result.snippet.clone(),
        doc_type: result.doc_type.as_str().to_string(),
        score: format_score(result.score),
        entities: result
            .entities
            .iter()
            .map(|(entity_type, value)| EntityBadge {
                entity_type,
                value: value.to_string(),
            })
            .collect(),
    }
}

/// 结果区域视图
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", content = "data", rename_all = "snake_case")]
pub enum ResultsView {
    /// 请求进行中
    Loading,
    /// 请求失败
    Error(String),
    /// 没有结果，既不在加载也没有错误
    NoResults,
    /// 结果卡片
    Cards(Vec<Card>),
}

impl fmt::Display for ResultsView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResultsView::Loading => f.write_str(LOADING_TEXT),
            ResultsView::Error(message) => write!(f, "✗ {}", message),
            ResultsView::NoResults => f.write_str(NO_RESULTS_TEXT),
            ResultsView::Cards(cards) => {
                write!(f, "Результати ({})", cards.len())?;
                for card in cards {
                    write!(f, "\n\n{}", card)?;
                }
                Ok(())
            }
        }
    }
}

/// 根据搜索界面状态生成结果区域视图
pub fn render_results(screen: &SearchScreen) -> ResultsView {
    if screen.loading {
        return ResultsView::Loading;
    }
    if let Some(error) = &screen.error {
        return ResultsView::Error(error.clone());
    }
    if screen.results.is_empty() {
        return ResultsView::NoResults;
    }
    ResultsView::Cards(screen.results.iter().map(to_card).collect())
}

/// 文档录入成功后的确认信息
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Confirmation {
    pub id: String,
    pub title: String,
    pub doc_type: String,
}

impl Confirmation {
    pub fn from_document(document: &FullDocument) -> Self {
        Self {
            id: document.id.clone(),
            title: document.title.clone(),
            doc_type: document.doc_type.as_str().to_string(),
        }
    }
}

impl fmt::Display for Confirmation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Документ успішно додано")?;
        writeln!(f, "    ID: {}", self.id)?;
        writeln!(f, "    Заголовок: {}", self.title)?;
        write!(f, "    Тип: {}", self.doc_type)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{DocType, EntityBag};

    fn result_with(entities: EntityBag) -> SearchResult {
        SearchResult {
            id: "1".into(),
            title: "Заголовок".into(),
            snippet: "Фрагмент тексту".into(),
            score: 1.23456,
            doc_type: DocType::Publicistic,
            entities,
        }
    }

    #[test]
    fn test_badges_follow_fixed_type_order() {
        let result = result_with(EntityBag {
            per: vec!["A".into()],
            org: vec![],
            loc: vec!["X".into(), "Y".into()],
            date: vec![],
        });

        let labels: Vec<String> = to_card(&result).entities.iter().map(EntityBadge::label).collect();
        assert_eq!(labels, vec!["PER: A", "LOC: X", "LOC: Y"]);
    }

    #[test]
    fn test_badges_keep_list_order_and_duplicates() {
        let result = result_with(EntityBag {
            per: vec![],
            org: vec![],
            loc: vec![],
            date: vec!["2024".into(), "2021".into(), "2024".into()],
        });

        let labels: Vec<String> = to_card(&result).entities.iter().map(EntityBadge::label).collect();
        assert_eq!(labels, vec!["DATE: 2024", "DATE: 2021", "DATE: 2024"]);
    }

    #[test]
    fn test_card_fields_are_verbatim() {
        let card = to_card(&result_with(EntityBag::default()));

        assert_eq!(card.title, "Заголовок");
        assert_eq!(card.snippet, "Фрагмент тексту");
        assert_eq!(card.doc_type, "publicistic");
        assert_eq!(card.score, "1.235");
        assert!(card.entities.is_empty());
    }

    #[test]
    fn test_score_rounding() {
        assert_eq!(format_score(0.0), "0.000");
        assert_eq!(format_score(12.0), "12.000");
        assert_eq!(format_score(0.0004), "0.000");
        assert_eq!(format_score(-1.5), "-1.500");
    }

    #[test]
    fn test_to_card_is_idempotent() {
        let result = result_with(EntityBag {
            per: vec!["A".into()],
            org: vec!["B".into()],
            loc: vec![],
            date: vec!["C".into()],
        });

        assert_eq!(to_card(&result), to_card(&result));
        assert_eq!(to_card(&result).to_string(), to_card(&result).to_string());
    }

    #[test]
    fn test_card_text() {
        let result = result_with(EntityBag {
            per: vec!["A".into()],
            org: vec![],
            loc: vec!["X".into()],
            date: vec![],
        });

        assert_eq!(
            to_card(&result).to_string(),
            "[publicistic] Заголовок\n    Фрагмент тексту\n    PER: A · LOC: X\n    score: 1.235"
        );
    }

    #[test]
    fn test_results_view_states() {
        let mut screen = SearchScreen::default();
        assert_eq!(render_results(&screen), ResultsView::NoResults);

        screen.loading = true;
        assert_eq!(render_results(&screen), ResultsView::Loading);

        screen.loading = false;
        screen.error = Some("db error".into());
        assert_eq!(render_results(&screen), ResultsView::Error("db error".into()));

        screen.error = None;
        screen.results = vec![result_with(EntityBag::default())];
        match render_results(&screen) {
            ResultsView::Cards(cards) => assert_eq!(cards.len(), 1),
            other => panic!("unexpected view: {:?}", other),
        }
    }

    #[test]
    fn test_no_results_text_is_distinct() {
        assert_eq!(ResultsView::NoResults.to_string(), NO_RESULTS_TEXT);
        assert!(!NO_RESULTS_TEXT.is_empty());
    }

    #[test]
    fn test_confirmation_text() {
        let document = FullDocument {
            id: "doc-9".into(),
            title: "T".into(),
            body: "B".into(),
            source: "S".into(),
            date: "2024-01-01".into(),
            doc_type: DocType::News,
            entities: EntityBag::default(),
            tokens: vec![],
        };

        let text = Confirmation::from_document(&document).to_string();
        assert!(text.contains("ID: doc-9"));
        assert!(text.contains("Тип: news"));
    }
}

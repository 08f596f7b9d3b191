//! 搜索结果模型
//!
//! 搜索服务返回的记录，以及附带的命名实体集合。

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// 文档类型
///
/// Unknown values coming from the backend are kept as [`DocType::Other`] so
/// they can still be shown verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum DocType {
    /// 新闻
    News,
    /// 观点
    Opinion,
    /// 政论
    Publicistic,
    /// 科学
    Scientific,
    /// 其他
    Other(String),
}

impl DocType {
    /// 线上使用的字符串
    pub fn as_str(&self) -> &str {
        match self {
            DocType::News => "news",
            DocType::Opinion => "opinion",
            DocType::Publicistic => "publicistic",
            DocType::Scientific => "scientific",
            DocType::Other(raw) => raw,
        }
    }
}

impl From<String> for DocType {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "news" => DocType::News,
            "opinion" => DocType::Opinion,
            "publicistic" => DocType::Publicistic,
            "scientific" => DocType::Scientific,
            _ => DocType::Other(raw),
        }
    }
}

impl From<DocType> for String {
    fn from(doc_type: DocType) -> Self {
        doc_type.as_str().to_string()
    }
}

impl fmt::Display for DocType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 命名实体类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityType {
    /// 人物
    #[serde(rename = "PER")]
    Person,
    /// 组织
    #[serde(rename = "ORG")]
    Organization,
    /// 地点
    #[serde(rename = "LOC")]
    Location,
    /// 日期
    #[serde(rename = "DATE")]
    Date,
}

impl EntityType {
    /// Fixed display order of the entity bag.
    pub const ALL: [EntityType; 4] = [
        EntityType::Person,
        EntityType::Organization,
        EntityType::Location,
        EntityType::Date,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            EntityType::Person => "PER",
            EntityType::Organization => "ORG",
            EntityType::Location => "LOC",
            EntityType::Date => "DATE",
        }
    }
}

impl fmt::Display for EntityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EntityType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "PER" => Ok(EntityType::Person),
            "ORG" => Ok(EntityType::Organization),
            "LOC" => Ok(EntityType::Location),
            "DATE" => Ok(EntityType::Date),
            other => Err(format!("unknown entity type: {}", other)),
        }
    }
}

/// 实体集合
///
/// 固定的四个键，每个键对应一个按原顺序排列的字符串列表。
/// 缺失的键按空列表处理，重复值不去重。
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EntityBag {
    #[serde(rename = "PER")]
    pub per: Vec<String>,
    #[serde(rename = "ORG")]
    pub org: Vec<String>,
    #[serde(rename = "LOC")]
    pub loc: Vec<String>,
    #[serde(rename = "DATE")]
    pub date: Vec<String>,
}

impl EntityBag {
    /// 获取某一类型的实体列表
    pub fn get(&self, entity_type: EntityType) -> &[String] {
        match entity_type {
            EntityType::Person => &self.per,
            EntityType::Organization => &self.org,
            EntityType::Location => &self.loc,
            EntityType::Date => &self.date,
        }
    }

    /// Flattens the bag in `PER, ORG, LOC, DATE` order, keeping list order
    /// within each type.
    pub fn iter(&self) -> impl Iterator<Item = (EntityType, &str)> + '_ {
        EntityType::ALL.into_iter().flat_map(move |entity_type| {
            self.get(entity_type)
                .iter()
                .map(move |value| (entity_type, value.as_str()))
        })
    }
}

/// 搜索结果项
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    /// 文档 ID
    pub id: String,
    /// 标题
    pub title: String,
    /// 摘要片段
    pub snippet: String,
    /// 相关度分数，越高越相关
    pub score: f64,
    /// 文档类型
    pub doc_type: DocType,
    /// 实体集合
    #[serde(default)]
    pub entities: EntityBag,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_entity_bag_missing_keys_are_empty() {
        let bag: EntityBag = serde_json::from_value(json!({"PER": ["Шевченко"]})).unwrap();

        assert_eq!(bag.per, vec!["Шевченко".to_string()]);
        assert!(bag.org.is_empty());
        assert!(bag.loc.is_empty());
        assert!(bag.date.is_empty());
        assert_eq!(bag.iter().count(), 1);
    }

    #[test]
    fn test_entity_bag_iter_keeps_fixed_order_and_duplicates() {
        let bag = EntityBag {
            per: vec![],
            org: vec!["ООН".into()],
            loc: vec!["Київ".into(), "Київ".into()],
            date: vec!["2024".into()],
        };

        let flat: Vec<(EntityType, &str)> = bag.iter().collect();
        assert_eq!(
            flat,
            vec![
                (EntityType::Organization, "ООН"),
                (EntityType::Location, "Київ"),
                (EntityType::Location, "Київ"),
                (EntityType::Date, "2024"),
            ]
        );
    }

    #[test]
    fn test_unknown_doc_type_is_preserved() {
        let result: SearchResult = serde_json::from_value(json!({
            "id": "42",
            "title": "t",
            "snippet": "s",
            "score": 1.5,
            "doc_type": "blog",
            "entities": {"PER": [], "ORG": [], "LOC": [], "DATE": []}
        }))
        .unwrap();

        assert_eq!(result.doc_type, DocType::Other("blog".into()));
        assert_eq!(result.doc_type.as_str(), "blog");
        assert_eq!(serde_json::to_value(&result.doc_type).unwrap(), json!("blog"));
    }

    #[test]
    fn test_known_doc_types() {
        assert_eq!(DocType::from("news".to_string()), DocType::News);
        assert_eq!(DocType::from("publicistic".to_string()), DocType::Publicistic);
        assert_eq!(DocType::from("opinion".to_string()), DocType::Opinion);
        assert_eq!(DocType::Scientific.to_string(), "scientific");
    }

    #[test]
    fn test_entity_type_parse() {
        assert_eq!("LOC".parse::<EntityType>(), Ok(EntityType::Location));
        assert!("loc".parse::<EntityType>().is_err());
    }
}

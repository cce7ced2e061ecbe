//! Article categories and their lookup table.
//!
//! Every category maps to a [`CategoryProfile`]: a display label, the default
//! call-to-action, fallback tags, and the keyword list scanned by the tagger.
//! The table is passed explicitly wherever it is needed.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::{BlockportError, Result};

/// Article category.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Category {
    Psychology,
    Career,
    CoachingStory,
    #[default]
    Tips,
    Interview,
}

impl Category {
    pub const ALL: [Category; 5] =
        [Category::Psychology, Category::Career, Category::CoachingStory, Category::Tips, Category::Interview];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Psychology => "psychology",
            Self::Career => "career",
            Self::CoachingStory => "coaching-story",
            Self::Tips => "tips",
            Self::Interview => "interview",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = BlockportError;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| {
                let valid: Vec<&str> = Self::ALL.iter().map(|c| c.as_str()).collect();
                BlockportError::ConfigError(format!("Unknown category: {}. Valid options: {}", s, valid.join(", ")))
            })
    }
}

/// Call-to-action shown under an article.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CtaType {
    FindCoach,
    RegisterCoach,
    FreeTrial,
}

impl CtaType {
    pub const ALL: [CtaType; 3] = [CtaType::FindCoach, CtaType::RegisterCoach, CtaType::FreeTrial];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::FindCoach => "find-coach",
            Self::RegisterCoach => "register-coach",
            Self::FreeTrial => "free-trial",
        }
    }
}

/// Per-category defaults and keywords.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryProfile {
    pub label: String,
    pub default_cta: CtaType,
    pub default_tags: Vec<String>,
    #[serde(default)]
    pub keywords: Vec<String>,
}

impl CategoryProfile {
    fn new(label: &str, default_cta: CtaType, default_tags: &[&str], keywords: &[&str]) -> Self {
        Self {
            label: label.to_string(),
            default_cta,
            default_tags: default_tags.iter().map(|s| s.to_string()).collect(),
            keywords: keywords.iter().map(|s| s.to_string()).collect(),
        }
    }
}

/// Read-only lookup table from category to profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CategoryTable {
    profiles: BTreeMap<Category, CategoryProfile>,
}

impl CategoryTable {
    /// A table without any profile.
    pub fn empty() -> Self {
        Self { profiles: BTreeMap::new() }
    }

    pub fn get(&self, category: Category) -> Option<&CategoryProfile> {
        self.profiles.get(&category)
    }

    /// Keywords for `category`, empty when the category has no profile.
    pub fn keywords(&self, category: Category) -> &[String] {
        self.get(category).map(|p| p.keywords.as_slice()).unwrap_or_default()
    }

    /// Default tags for `category`, empty when the category has no profile.
    pub fn default_tags(&self, category: Category) -> &[String] {
        self.get(category).map(|p| p.default_tags.as_slice()).unwrap_or_default()
    }

    pub fn insert(&mut self, category: Category, profile: CategoryProfile) {
        self.profiles.insert(category, profile);
    }

    /// Overlay every profile from `other` onto this table.
    pub fn merge(&mut self, other: CategoryTable) {
        self.profiles.extend(other.profiles);
    }

    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }
}

impl Default for CategoryTable {
    fn default() -> Self {
        let mut table = Self::empty();
        table.insert(
            Category::Psychology,
            CategoryProfile::new(
                "心理学",
                CtaType::FindCoach,
                &["コーチング", "心理学"],
                &[
                    "心理学",
                    "自己肯定感",
                    "メンタル",
                    "ストレス",
                    "感情",
                    "認知",
                    "マインドフルネス",
                    "モチベーション",
                    "不安",
                    "習慣",
                ],
            ),
        );
        table.insert(
            Category::Career,
            CategoryProfile::new(
                "キャリア",
                CtaType::FindCoach,
                &["キャリア", "キャリアコーチング"],
                &[
                    "キャリアコーチング",
                    "キャリア",
                    "転職",
                    "副業",
                    "スキル",
                    "リーダーシップ",
                    "マネジメント",
                    "働き方",
                    "自己分析",
                    "面接",
                ],
            ),
        );
        table.insert(
            Category::CoachingStory,
            CategoryProfile::new(
                "体験談",
                CtaType::FindCoach,
                &["コーチング", "体験談"],
                &["コーチング", "体験談", "セッション", "目標", "気づき", "変化", "自己理解", "行動"],
            ),
        );
        table.insert(
            Category::Tips,
            CategoryProfile::new(
                "Tips",
                CtaType::FindCoach,
                &["コーチング", "Tips"],
                &["コーチング", "目標設定", "習慣", "時間管理", "質問", "傾聴", "振り返り", "Tips"],
            ),
        );
        table.insert(
            Category::Interview,
            CategoryProfile::new(
                "インタビュー",
                CtaType::RegisterCoach,
                &["コーチング", "インタビュー"],
                &["インタビュー", "コーチ", "資格", "独立", "経験", "コーチング", "キャリア"],
            ),
        );
        table
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_round_trip_names() {
        for category in Category::ALL {
            assert_eq!(category.as_str().parse::<Category>().unwrap(), category);
        }
        assert_eq!(serde_json::to_string(&Category::CoachingStory).unwrap(), r#""coaching-story""#);
    }

    #[test]
    fn test_unknown_category() {
        let err = "news".parse::<Category>().unwrap_err();
        assert!(err.to_string().contains("coaching-story"));
    }

    #[test]
    fn test_default_table_covers_all_categories() {
        let table = CategoryTable::default();
        assert_eq!(table.len(), Category::ALL.len());
        for category in Category::ALL {
            let profile = table.get(category).unwrap();
            assert!(!profile.default_tags.is_empty());
            assert!(!profile.keywords.is_empty());
        }
        assert_eq!(table.get(Category::Interview).unwrap().default_cta, CtaType::RegisterCoach);
    }

    #[test]
    fn test_missing_profile_lookups_are_empty() {
        let table = CategoryTable::empty();
        assert!(table.keywords(Category::Tips).is_empty());
        assert!(table.default_tags(Category::Tips).is_empty());
    }

    #[test]
    fn test_merge_overrides_per_category() {
        let mut table = CategoryTable::default();
        let mut overlay = CategoryTable::empty();
        overlay.insert(Category::Tips, CategoryProfile::new("Tips", CtaType::FreeTrial, &["x"], &["y"]));
        table.merge(overlay);

        assert_eq!(table.keywords(Category::Tips), ["y".to_string()]);
        assert_eq!(table.get(Category::Tips).unwrap().default_cta, CtaType::FreeTrial);
        assert_eq!(table.default_tags(Category::Career), ["キャリア".to_string(), "キャリアコーチング".to_string()]);
    }

    #[test]
    fn test_table_json_shape() {
        let json = r#"{"tips":{"label":"Tips","defaultCta":"free-trial","defaultTags":["a"],"keywords":["b"]}}"#;
        let table: CategoryTable = serde_json::from_str(json).unwrap();
        assert_eq!(table.len(), 1);
        assert_eq!(table.get(Category::Tips).unwrap().default_cta, CtaType::FreeTrial);
    }
}

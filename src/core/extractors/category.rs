use crate::domain::{Category, CategorySlot};

/// Synonyms per category. Table order is precedence: the first category
/// with any synonym contained in the text wins.
pub const CATEGORY_KEYWORDS: &[(Category, &[&str])] = &[
    (
        Category::Dining,
        &["餐饮", "吃饭", "餐厅", "外卖", "咖啡", "奶茶", "快餐", "美食"],
    ),
    (
        Category::Transport,
        &["交通", "打车", "地铁", "公交", "加油", "停车", "出行", "出租车"],
    ),
    (
        Category::Shopping,
        &["购物", "超市", "商场", "网购", "衣服", "日用品", "商品"],
    ),
    (
        Category::Entertainment,
        &["娱乐", "电影", "游戏", "KTV", "旅游", "休闲"],
    ),
    (Category::Medical, &["医疗", "医院", "药店", "体检", "看病"]),
    (Category::Education, &["教育", "培训", "学习", "书籍", "课程"]),
];

#[derive(Debug, Clone, Copy, Default)]
pub struct CategoryExtractor;

impl CategoryExtractor {
    pub fn new() -> Self {
        Self
    }

    pub fn extract(&self, text: &str) -> CategorySlot {
        CATEGORY_KEYWORDS
            .iter()
            .find(|(_, synonyms)| synonyms.iter().any(|synonym| text.contains(synonym)))
            .map(|(category, _)| CategorySlot::matched(*category))
            .unwrap_or_default()
    }
}

//! Human-readable rendering of query results.

use crate::cli::output;
use crate::domain::{Displayable, QueryResult};

/// A result flattened into a title and display lines.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedResult {
    pub title: String,
    pub lines: Vec<String>,
    pub note: Option<String>,
}

fn money(amount: f64) -> String {
    format!("¥{amount:.2}")
}

pub fn render(result: &QueryResult) -> RenderedResult {
    let mut lines = Vec::new();
    let mut note = None;
    let title = match result {
        QueryResult::TotalAmount(total) => {
            lines.push(format!("时间范围: {}", total.time_range));
            if let Some(category) = total.filters.category {
                lines.push(format!("类别: {category}"));
            }
            if let Some(merchant) = &total.filters.merchant {
                lines.push(format!("商家: {merchant}"));
            }
            lines.push(format!("总金额: {}", money(total.total_amount)));
            lines.push(format!("笔数: {}", total.count));
            lines.push(format!("平均: {}", money(total.avg_amount)));
            "总支出"
        }
        QueryResult::CategoryAmount(category) => {
            match category.category {
                Some(name) => lines.push(format!("类别: {name}")),
                None => {
                    for entry in &category.breakdown {
                        lines.push(format!(
                            "{}: {} ({} 笔)",
                            entry.category,
                            money(entry.total_amount),
                            entry.count
                        ));
                    }
                }
            }
            lines.push(format!("总金额: {}", money(category.total_amount)));
            lines.push(format!("笔数: {}", category.count));
            "分类支出"
        }
        QueryResult::TimeAmount(time) => {
            lines.push(format!("时间范围: {}", time.time_range));
            lines.push(format!("总金额: {}", money(time.total_amount)));
            lines.push(format!("笔数: {}", time.count));
            lines.push(format!("平均: {}", money(time.avg_amount)));
            if time.defaulted {
                note = Some("未识别到时间, 使用最近的默认时间段".to_string());
            }
            "时间段支出"
        }
        QueryResult::MerchantAmount(merchant) => {
            match &merchant.merchant {
                Some(name) => {
                    lines.push(format!("商家: {name}"));
                    lines.push(format!("总金额: {}", money(merchant.total_amount)));
                    lines.push(format!("笔数: {}", merchant.count));
                }
                None => note = merchant.message.clone(),
            }
            "商家支出"
        }
        QueryResult::Trend(trend) => {
            for month in &trend.months {
                lines.push(format!(
                    "{}月: {} ({} 笔)",
                    month.month,
                    money(month.total_amount),
                    month.count
                ));
            }
            lines.push(format!("{}年合计: {}", trend.year, money(trend.total_amount)));
            lines.push(format!("月均: {}", money(trend.avg_monthly)));
            "消费趋势"
        }
        QueryResult::Comparison(comparison) => {
            lines.push(format!(
                "本月: {} ({} 笔)",
                money(comparison.current_month.amount),
                comparison.current_month.count
            ));
            lines.push(format!(
                "上月: {} ({} 笔)",
                money(comparison.previous_month.amount),
                comparison.previous_month.count
            ));
            lines.push(format!(
                "变化: {} ({:+.1}%)",
                money(comparison.change_amount),
                comparison.change_percent
            ));
            "环比"
        }
        QueryResult::General(general) => {
            lines.push(format!("总金额: {}", money(general.total_amount)));
            lines.push(format!("笔数: {}", general.count));
            for record in &general.records {
                lines.push(record.display_label());
            }
            if general.count > general.records.len() {
                note = Some(format!("仅显示前 {} 条", general.records.len()));
            }
            "查询结果"
        }
    };

    RenderedResult {
        title: title.to_string(),
        lines,
        note,
    }
}

pub fn print_result(result: &QueryResult) {
    let rendered = render(result);
    output::section(&rendered.title);
    for line in &rendered.lines {
        output::field(line);
    }
    if let Some(note) = rendered.note {
        output::warning(note);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::MerchantAmountResult;

    #[test]
    fn missing_merchant_renders_message() {
        let rendered = render(&QueryResult::MerchantAmount(MerchantAmountResult::not_found()));
        assert_eq!(rendered.title, "商家支出");
        assert!(rendered.lines.is_empty());
        assert_eq!(rendered.note.as_deref(), Some("未找到商家信息"));
    }

    #[test]
    fn money_uses_two_decimals() {
        assert_eq!(money(12.5), "¥12.50");
    }
}

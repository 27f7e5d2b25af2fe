//! Report markup for the result panel.
//!
//! Every value coming from the workflow response is HTML-escaped before it is
//! interpolated; the templates themselves are fixed.

use crate::domain::model::{AnalysisData, AnalysisResult};
use html_escape::encode_text;

pub const UNSUCCESSFUL_FALLBACK_MESSAGE: &str = "抱歉，无法完成您的八字分析，请稍后重试。";

pub const PILLAR_LABELS: [&str; 4] = ["年柱", "月柱", "日柱", "时柱"];

/// 渲染工作流結果；`success == false` 時顯示失敗區塊
pub fn render_result(result: &AnalysisResult) -> String {
    match (&result.data, result.success) {
        (Some(data), true) => render_success(data),
        _ => render_unsuccessful(result.message.as_deref()),
    }
}

pub fn render_success(data: &AnalysisData) -> String {
    let bazi = &data.bazi_analysis;
    let elements = &bazi.five_elements;
    let pillars = [
        &bazi.year_pillar,
        &bazi.month_pillar,
        &bazi.day_pillar,
        &bazi.hour_pillar,
    ];

    let pillar_spans: String = PILLAR_LABELS
        .iter()
        .zip(pillars)
        .map(|(label, value)| {
            format!(
                "\n                <span class=\"pillar\">{}：{}</span>",
                label,
                encode_text(value)
            )
        })
        .collect();

    let recommendations: String = data
        .recommendations
        .iter()
        .map(|rec| format!("<li>{}</li>", encode_text(rec)))
        .collect();

    format!(
        r#"
        <div class="result-header">
            <h3>🎋 {name} 的八字命理分析报告</h3>
            <div class="basic-info">
                <p><strong>出生时间：</strong>{birth_date}</p>
                <p><strong>出生地点：</strong>{birth_place}</p>
                <p><strong>性别：</strong>{gender}</p>
            </div>
        </div>

        <div class="bazi-info highlight">
            <h4>📜 八字排盘</h4>
            <div class="bazi-pillars">{pillar_spans}
            </div>
        </div>

        <div class="five-elements highlight">
            <h4>🌟 五行分析</h4>
            <div class="elements-grid">
                <div class="element">木：{wood}</div>
                <div class="element">火：{fire}</div>
                <div class="element">土：{earth}</div>
                <div class="element">金：{metal}</div>
                <div class="element">水：{water}</div>
            </div>
        </div>

        <div class="fortune-summary">
            <h4>🔮 命理综述</h4>
            <div class="summary-text">{summary}</div>
        </div>

        <div class="recommendations highlight">
            <h4>💡 人生建议</h4>
            <ul>
                {recommendations}
            </ul>
        </div>

        <div class="disclaimer">
            <p><small>* 此报告仅供娱乐参考，不构成人生重大决策的依据。命运掌握在自己手中，努力奋斗才是成功的关键。</small></p>
        </div>
    "#,
        name = encode_text(&data.name),
        birth_date = encode_text(&data.basic_info.birth_date),
        birth_place = encode_text(&data.basic_info.birth_place),
        gender = encode_text(&data.basic_info.gender),
        pillar_spans = pillar_spans,
        wood = elements.wood,
        fire = elements.fire,
        earth = elements.earth,
        metal = elements.metal,
        water = elements.water,
        summary = encode_text(&data.fortune_summary).replace('\n', "<br>"),
        recommendations = recommendations,
    )
}

/// 工作流回傳 `success: false` 時的區塊（無重試按鈕）
pub fn render_unsuccessful(message: Option<&str>) -> String {
    let message = message
        .filter(|m| !m.trim().is_empty())
        .unwrap_or(UNSUCCESSFUL_FALLBACK_MESSAGE);
    format!(
        r#"
            <div class="error-message">
                <h3>😔 算命失败</h3>
                <p>{}</p>
            </div>
        "#,
        encode_text(message)
    )
}

/// 請求失敗時的錯誤區塊，附帶回到輸入面板的重試按鈕
pub fn render_failure(message: &str) -> String {
    format!(
        r#"
        <div class="error-message">
            <h3>😔 出现错误</h3>
            <p>{}</p>
            <button data-action="new-reading" class="submit-btn" style="margin-top: 20px;">
                <i class="fas fa-redo"></i>
                重新尝试
            </button>
        </div>
    "#,
        encode_text(message)
    )
}

pub const REPORT_STYLES: &str = r#"
.result-header { text-align: center; margin-bottom: 30px; }
.basic-info { background: rgba(102, 126, 234, 0.1); padding: 15px; border-radius: 10px; margin-top: 15px; }
.basic-info p { margin: 5px 0; }
.bazi-pillars { display: grid; grid-template-columns: repeat(auto-fit, minmax(120px, 1fr)); gap: 10px; margin-top: 10px; }
.pillar { background: #667eea; color: white; padding: 10px; text-align: center; border-radius: 8px; font-weight: 600; }
.elements-grid { display: grid; grid-template-columns: repeat(5, 1fr); gap: 10px; margin-top: 10px; }
.element { background: linear-gradient(135deg, #ffd700 0%, #ffed4e 100%); color: #333; padding: 10px; text-align: center; border-radius: 8px; font-weight: 600; }
.summary-text { background: white; padding: 20px; border-radius: 10px; line-height: 1.8; margin-top: 10px; }
.recommendations ul { list-style: none; padding: 0; }
.recommendations li { background: white; padding: 12px 15px; margin: 8px 0; border-radius: 8px; border-left: 4px solid #28a745; position: relative; }
.recommendations li:before { content: "✨"; margin-right: 8px; }
.disclaimer { text-align: center; margin-top: 30px; padding: 15px; background: rgba(255, 193, 7, 0.1); border-radius: 10px; border: 1px solid #ffc107; }
.error-message { text-align: center; padding: 40px; color: #dc3545; }
.error-message h3 { color: #dc3545; margin-bottom: 15px; }
@media (max-width: 768px) {
    .bazi-pillars { grid-template-columns: repeat(2, 1fr); }
    .elements-grid { grid-template-columns: repeat(3, 1fr); }
}
@media (max-width: 480px) {
    .elements-grid { grid-template-columns: repeat(2, 1fr); }
}
"#;

/// 把結果區塊包成可獨立開啟的 HTML 頁面
pub fn render_page(content: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="zh-CN">
<head>
<meta charset="UTF-8">
<meta name="viewport" content="width=device-width, initial-scale=1.0">
<title>八字命理分析报告</title>
<style>{}</style>
</head>
<body>
<section id="resultSection">
<div id="resultContent">{}</div>
</section>
</body>
</html>
"#,
        REPORT_STYLES, content
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::{BasicInfo, BaziAnalysis, FiveElements};

    fn sample_data() -> AnalysisData {
        AnalysisData {
            name: "李四".to_string(),
            basic_info: BasicInfo {
                birth_date: "2000-01-02 03:04:05".to_string(),
                birth_place: "上海".to_string(),
                gender: "female".to_string(),
            },
            bazi_analysis: BaziAnalysis {
                year_pillar: "己卯".to_string(),
                month_pillar: "丙子".to_string(),
                day_pillar: "壬寅".to_string(),
                hour_pillar: "壬寅".to_string(),
                five_elements: FiveElements {
                    wood: 3.0,
                    fire: 1.0,
                    earth: 1.0,
                    metal: 0.0,
                    water: 3.0,
                },
            },
            fortune_summary: "第一段\n\n第二段".to_string(),
            recommendations: vec!["甲".to_string(), "乙".to_string()],
        }
    }

    #[test]
    fn test_success_markup_contains_all_sections() {
        let markup = render_success(&sample_data());
        assert!(markup.contains("🎋 李四 的八字命理分析报告"));
        assert!(markup.contains("2000-01-02 03:04:05"));
        assert!(markup.contains("上海"));
        assert!(markup.contains("年柱：己卯"));
        assert!(markup.contains("时柱：壬寅"));
        assert!(markup.contains("木：3</div>"));
        assert!(markup.contains("金：0</div>"));
        assert!(markup.contains("第一段<br><br>第二段"));
        assert!(markup.contains("<li>甲</li><li>乙</li>"));
        assert!(!markup.contains("重新尝试"));
    }

    #[test]
    fn test_values_are_escaped() {
        let mut data = sample_data();
        data.name = "<script>alert(1)</script>".to_string();
        data.recommendations = vec!["a & b".to_string()];
        let markup = render_success(&data);
        assert!(!markup.contains("<script>"));
        assert!(markup.contains("&lt;script&gt;"));
        assert!(markup.contains("<li>a &amp; b</li>"));
    }

    #[test]
    fn test_unsuccessful_result_uses_message_or_fallback() {
        let result = AnalysisResult {
            success: false,
            data: None,
            message: Some("额度已用完".to_string()),
        };
        let markup = render_result(&result);
        assert!(markup.contains("算命失败"));
        assert!(markup.contains("额度已用完"));

        let markup = render_unsuccessful(None);
        assert!(markup.contains(UNSUCCESSFUL_FALLBACK_MESSAGE));
    }

    #[test]
    fn test_failure_markup_has_retry_affordance() {
        let markup = render_failure("API调用失败: 500 Internal Server Error");
        assert!(markup.contains("出现错误"));
        assert!(markup.contains("API调用失败: 500 Internal Server Error"));
        assert!(markup.contains("data-action=\"new-reading\""));
        assert!(markup.contains("重新尝试"));
    }

    #[test]
    fn test_page_wraps_content() {
        let page = render_page("<p>hi</p>");
        assert!(page.starts_with("<!DOCTYPE html>"));
        assert!(page.contains("<div id=\"resultContent\"><p>hi</p></div>"));
        assert!(page.contains(".pillar {"));
    }
}

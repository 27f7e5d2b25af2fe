use crate::domain::model::{
    AnalysisData, AnalysisResult, BasicInfo, BaziAnalysis, BirthQuery, FiveElements,
};
use crate::domain::ports::AnalysisClient;
use crate::utils::error::Result;
use async_trait::async_trait;
use std::time::Duration;

pub const DEFAULT_MOCK_DELAY: Duration = Duration::from_millis(2000);

pub const MOCK_RECOMMENDATIONS: [&str; 5] = [
    "保持积极乐观的心态，发挥自己的创造天赋",
    "在投资理财时要谨慎，不要盲目跟风",
    "注重身体健康，定期体检，保持良好作息",
    "善待身边的人，广结善缘，贵人运会更旺",
    "选择适合自己的职业道路，发挥专长优势",
];

/// 沒有真實端點時使用的演示結果
pub struct MockWorkflowClient {
    delay: Duration,
}

impl MockWorkflowClient {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }
}

impl Default for MockWorkflowClient {
    fn default() -> Self {
        Self::new(DEFAULT_MOCK_DELAY)
    }
}

#[async_trait]
impl AnalysisClient for MockWorkflowClient {
    async fn analyze(&self, query: &BirthQuery) -> Result<AnalysisResult> {
        tracing::debug!("Generating mock analysis after {:?}", self.delay);
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        Ok(mock_result(query))
    }
}

pub fn mock_result(query: &BirthQuery) -> AnalysisResult {
    let gender = query.gender.map(|g| g.to_string()).unwrap_or_default();

    let fortune_summary = format!(
        "{name}您好，根据您的八字分析：\n\n\
         您出生于{datetime}，{place}。\n\n\
         八字为：庚子年 戊寅月 甲午日 丙寅时\n\n\
         五行分析：木旺火相，性格开朗积极，具有很强的创造力和领导能力。您天生聪慧，善于思考，在事业上容易取得成功。\n\n\
         财运方面：中年后财运亨通，投资理财方面有很好的天赋，但需要注意不要过于冒险。\n\n\
         感情方面：感情丰富，桃花运较好，但要注意选择合适的伴侣，婚姻生活会很幸福。\n\n\
         健康方面：整体健康状况良好，但需要注意肝胆方面的保养，多运动，保持良好作息。\n\n\
         事业发展：适合从事创意、管理、教育等行业，贵人运较好，容易得到他人帮助。",
        name = query.name,
        datetime = query.birth_datetime,
        place = query.birth_place,
    );

    AnalysisResult {
        success: true,
        data: Some(AnalysisData {
            name: query.name.clone(),
            basic_info: BasicInfo {
                birth_date: query.birth_datetime.clone(),
                birth_place: query.birth_place.clone(),
                gender,
            },
            bazi_analysis: BaziAnalysis {
                year_pillar: "庚子".to_string(),
                month_pillar: "戊寅".to_string(),
                day_pillar: "甲午".to_string(),
                hour_pillar: "丙寅".to_string(),
                five_elements: FiveElements {
                    wood: 2.0,
                    fire: 2.0,
                    earth: 1.0,
                    metal: 1.0,
                    water: 2.0,
                },
            },
            fortune_summary,
            recommendations: MOCK_RECOMMENDATIONS.iter().map(|s| s.to_string()).collect(),
        }),
        message: None,
    }
}

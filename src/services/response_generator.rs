//! 随机答案生成器
//!
//! 按问卷配置里每个问题的分布，为每一轮提交生成一套独立的随机答案：
//! - 选择题：按权重做分类抽样（选项 i 的概率 = weight_i / Σweights）
//! - 主观题：从文本池均匀抽取；文本池为空时固定返回 [`DEFAULT_TEXT_RESPONSE`]
//!
//! 抽样分布在构造时预编译一次，`generate` 本身无副作用、不会失败，
//! 相邻两次调用互不相关（不设种子）。

use std::collections::BTreeMap;

use rand::distr::weighted::WeightedIndex;
use rand::distr::Distribution;
use rand::seq::IndexedRandom;

use crate::config::{QuestionConfig, SurveyConfig};
use crate::error::{AppResult, ConfigError};

/// 主观题文本池为空时的固定回退回答
///
/// 取自旧版 GUI 的默认占位文本，保证主观题永远不会被静默跳过
pub const DEFAULT_TEXT_RESPONSE: &str = "기본 응답입니다.";

/// 一个问题的答案
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Answer {
    /// 选择题：选中的选项 id
    Choice(String),
    /// 主观题：填入的文本
    Text(String),
}

/// 单个问题的预编译抽样器
enum Sampler {
    Weighted {
        dist: WeightedIndex<f64>,
        options: Vec<String>,
    },
    TextPool {
        texts: Vec<String>,
    },
}

/// 随机答案生成器
pub struct ResponseGenerator {
    samplers: Vec<(String, Sampler)>,
}

impl ResponseGenerator {
    /// 为问卷配置预编译抽样分布
    ///
    /// 权重不变量（非空、非负、和大于零）在这里最终兜底校验
    pub fn new(survey: &SurveyConfig) -> AppResult<Self> {
        let mut samplers = Vec::with_capacity(survey.questions.len());

        for (id, question) in &survey.questions {
            let sampler = match question {
                QuestionConfig::Choice { weights } => {
                    if weights.is_empty() {
                        return Err(ConfigError::EmptyOptions {
                            question: id.clone(),
                        }
                        .into());
                    }
                    let options: Vec<String> = weights.keys().cloned().collect();
                    let dist =
                        WeightedIndex::new(weights.values().copied()).map_err(|_| {
                            ConfigError::InvalidWeights {
                                question: id.clone(),
                            }
                        })?;
                    Sampler::Weighted { dist, options }
                }
                QuestionConfig::Text { texts } => Sampler::TextPool {
                    texts: texts.clone(),
                },
            };
            samplers.push((id.clone(), sampler));
        }

        Ok(Self { samplers })
    }

    /// 生成一套随机答案（问题 id → 答案）
    pub fn generate(&self) -> BTreeMap<String, Answer> {
        let mut rng = rand::rng();
        let mut answers = BTreeMap::new();

        for (id, sampler) in &self.samplers {
            let answer = match sampler {
                Sampler::Weighted { dist, options } => {
                    Answer::Choice(options[dist.sample(&mut rng)].clone())
                }
                Sampler::TextPool { texts } => Answer::Text(
                    texts
                        .choose(&mut rng)
                        .cloned()
                        .unwrap_or_else(|| DEFAULT_TEXT_RESPONSE.to_string()),
                ),
            };
            answers.insert(id.clone(), answer);
        }

        answers
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn survey(questions: &str) -> SurveyConfig {
        let json = format!(r#"{{ "url": "u", "questions": {} }}"#, questions);
        serde_json::from_str(&json).expect("解析问卷配置失败")
    }

    #[test]
    fn test_weighted_draw_frequency() {
        // 权重 {A:3, B:1}，10000 次抽样中 A 的频率应落在 75% ± 3% 内
        let survey = survey(r#"{ "2": { "type": "choice", "weights": { "A": 3, "B": 1 } } }"#);
        let generator = ResponseGenerator::new(&survey).expect("构造生成器失败");

        let draws = 10_000;
        let mut count_a = 0;
        for _ in 0..draws {
            match generator.generate().get("2") {
                Some(Answer::Choice(option)) if option == "A" => count_a += 1,
                Some(Answer::Choice(_)) => {}
                other => panic!("意外的答案: {:?}", other),
            }
        }

        let freq = count_a as f64 / draws as f64;
        assert!(
            (freq - 0.75).abs() < 0.03,
            "A 的频率 {} 偏离 75% 超过 3%",
            freq
        );
    }

    #[test]
    fn test_choice_never_outside_configured_options() {
        let survey = survey(
            r#"{ "2": { "type": "choice", "weights": { "0": 1, "1": 2, "2": 0 } } }"#,
        );
        let generator = ResponseGenerator::new(&survey).expect("构造生成器失败");

        for _ in 0..1000 {
            match generator.generate().get("2") {
                Some(Answer::Choice(option)) => {
                    assert!(["0", "1", "2"].contains(&option.as_str()));
                }
                other => panic!("意外的答案: {:?}", other),
            }
        }
    }

    #[test]
    fn test_zero_weight_option_never_drawn() {
        let survey = survey(r#"{ "2": { "type": "choice", "weights": { "0": 1, "1": 0 } } }"#);
        let generator = ResponseGenerator::new(&survey).expect("构造生成器失败");

        for _ in 0..500 {
            assert_eq!(
                generator.generate().get("2"),
                Some(&Answer::Choice("0".to_string()))
            );
        }
    }

    #[test]
    fn test_empty_text_pool_falls_back() {
        let survey = survey(r#"{ "5": { "type": "text", "texts": [] } }"#);
        let generator = ResponseGenerator::new(&survey).expect("构造生成器失败");

        for _ in 0..100 {
            assert_eq!(
                generator.generate().get("5"),
                Some(&Answer::Text(DEFAULT_TEXT_RESPONSE.to_string()))
            );
        }
    }

    #[test]
    fn test_text_drawn_from_pool() {
        let survey =
            survey(r#"{ "5": { "type": "text", "texts": ["좋습니다", "편리합니다"] } }"#);
        let generator = ResponseGenerator::new(&survey).expect("构造生成器失败");

        for _ in 0..100 {
            match generator.generate().get("5") {
                Some(Answer::Text(text)) => {
                    assert!(["좋습니다", "편리합니다"].contains(&text.as_str()));
                }
                other => panic!("意外的答案: {:?}", other),
            }
        }
    }

    #[test]
    fn test_generate_covers_every_question() {
        let survey = survey(
            r#"{
                "2": { "type": "choice", "weights": { "0": 1 } },
                "3": { "type": "choice", "weights": { "0": 2, "1": 1 } },
                "4": { "type": "text", "texts": ["응답"] }
            }"#,
        );
        let generator = ResponseGenerator::new(&survey).expect("构造生成器失败");

        let answers = generator.generate();
        assert_eq!(answers.len(), 3);
        assert!(answers.contains_key("2"));
        assert!(answers.contains_key("3"));
        assert!(answers.contains_key("4"));
    }
}

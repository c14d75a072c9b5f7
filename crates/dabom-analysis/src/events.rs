//! 유의미 이벤트 감지.
//!
//! 규칙을 순서대로 평가하며 첫 매치가 승리한다:
//! 1. 변화 점수 >= high 임계값 — 큰 가시적 변화
//! 2. 변화 점수 >= 0.25 이고 주목 키워드 포함
//! 3. 키워드가 이번 설명에 새로 등장 (직전 설명에는 없음)
//! 중복 억제는 오케스트레이터(컨텍스트) 책임이다.

use dabom_core::config::ScoreThresholds;
use dabom_core::models::frame::FrameRecord;

/// 주목 키워드 — 대소문자 무시 부분 문자열 매치, 배열 순서가 우선순위
pub const NOTEWORTHY_KEYWORDS: [&str; 12] = [
    "enter",
    "exit",
    "arrive",
    "depart",
    "approach",
    "hazard",
    "risk",
    "crowd",
    "conflict",
    "shift",
    "change",
    "collision",
];

/// 키워드 규칙의 점수 하한
const KEYWORD_SCORE_FLOOR: f32 = 0.25;

/// 발췌문 최대 길이 (문자)
const SNIPPET_MAX_CHARS: usize = 180;

/// 이벤트 판정 결과 — 프레임 메타데이터와 합쳐 `SignificantEvent`가 된다
#[derive(Debug, Clone, PartialEq)]
pub struct EventDetails {
    /// 판정 사유
    pub reason: String,
    /// 설명 첫 문장 발췌
    pub snippet: String,
    /// 변화 점수
    pub change_score: f32,
}

/// 프레임이 유의미 이벤트인지 판정
pub fn detect_significant_event(
    frame: &FrameRecord,
    description: &str,
    previous_description: &str,
    thresholds: &ScoreThresholds,
) -> Option<EventDetails> {
    let lowered = description.to_lowercase();
    let previous_lowered = previous_description.to_lowercase();
    let change_score = frame.change_score;
    let matched_keyword = NOTEWORTHY_KEYWORDS
        .iter()
        .find(|keyword| lowered.contains(*keyword));

    let reason = if change_score >= thresholds.high {
        Some("Large visible change or movement in the scene.".to_string())
    } else if change_score >= KEYWORD_SCORE_FLOOR && matched_keyword.is_some() {
        matched_keyword.map(|keyword| format!("Activity involving \"{keyword}\" becomes prominent."))
    } else {
        matched_keyword
            .filter(|keyword| !previous_lowered.contains(*keyword))
            .map(|keyword| format!("Newly visible detail related to \"{keyword}\"."))
    };

    reason.map(|reason| EventDetails {
        reason,
        snippet: first_sentence(description, SNIPPET_MAX_CHARS),
        change_score,
    })
}

/// 첫 문장 발췌 — 종결 부호(`.`/`!`/`?`)까지, 없으면 전체.
/// 최대 길이를 넘으면 말줄임표로 절단.
fn first_sentence(text: &str, max_chars: usize) -> String {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return String::new();
    }

    // 첫 문장 = 종결 부호가 아닌 문자들의 첫 구간 + 종결 부호 하나
    let start = trimmed.find(|c| !matches!(c, '.' | '!' | '?'));
    let candidate = match start {
        Some(start) => match trimmed[start..].find(['.', '!', '?']) {
            Some(end) => trimmed[start..start + end + 1].trim(),
            None => trimmed,
        },
        None => trimmed,
    };

    if candidate.chars().count() <= max_chars {
        return candidate.to_string();
    }
    let mut truncated: String = candidate.chars().take(max_chars - 1).collect();
    truncated.push('…');
    truncated
}

#[cfg(test)]
mod tests {
    use super::*;
    use dabom_core::models::frame::{ChangeCategory, EncodedImage};

    fn frame(change_score: f32) -> FrameRecord {
        FrameRecord {
            index: 0,
            seconds: 0.0,
            timestamp: "00:00".to_string(),
            image: EncodedImage {
                data: String::new(),
                format: "webp".to_string(),
            },
            change_score,
            change_category: ChangeCategory::from_score(
                change_score,
                &ScoreThresholds::default(),
            ),
        }
    }

    fn thresholds() -> ScoreThresholds {
        ScoreThresholds::default()
    }

    #[test]
    fn high_score_wins_over_keyword_rule() {
        let details =
            detect_significant_event(&frame(0.5), "A crowd enters the plaza.", "", &thresholds())
                .unwrap();
        assert!(details.reason.contains("Large visible change"));
    }

    #[test]
    fn keyword_rule_cites_first_keyword_in_set_order() {
        // "approach"가 "hazard"보다 키워드 순서상 앞선다
        let details = detect_significant_event(
            &frame(0.30),
            "A person approaches the hazard.",
            "",
            &thresholds(),
        )
        .unwrap();
        assert!(details.reason.contains("\"approach\""));
    }

    #[test]
    fn newly_visible_keyword_fires_below_score_floor() {
        let details = detect_significant_event(
            &frame(0.05),
            "A hazard appears near the door.",
            "An empty hallway.",
            &thresholds(),
        )
        .unwrap();
        assert!(details.reason.contains("Newly visible detail"));
        assert!(details.reason.contains("\"hazard\""));
    }

    #[test]
    fn repeated_keyword_without_score_does_not_fire() {
        let result = detect_significant_event(
            &frame(0.05),
            "The hazard is still visible.",
            "A hazard appears near the door.",
            &thresholds(),
        );
        assert!(result.is_none());
    }

    #[test]
    fn quiet_frame_yields_no_event() {
        let result =
            detect_significant_event(&frame(0.05), "A calm empty street.", "", &thresholds());
        assert!(result.is_none());
    }

    #[test]
    fn keyword_match_is_case_insensitive() {
        let details = detect_significant_event(
            &frame(0.30),
            "A CROWD gathers at the corner.",
            "",
            &thresholds(),
        )
        .unwrap();
        assert!(details.reason.contains("\"crowd\""));
    }

    #[test]
    fn snippet_is_first_sentence() {
        let details = detect_significant_event(
            &frame(0.6),
            "People enter the hall. Later they sit down.",
            "",
            &thresholds(),
        )
        .unwrap();
        assert_eq!(details.snippet, "People enter the hall.");
    }

    #[test]
    fn snippet_truncates_long_sentences_with_ellipsis() {
        let long = "x".repeat(400) + ".";
        let details = detect_significant_event(&frame(0.6), &long, "", &thresholds()).unwrap();
        assert_eq!(details.snippet.chars().count(), 180);
        assert!(details.snippet.ends_with('…'));
    }

    #[test]
    fn snippet_without_terminator_uses_whole_text() {
        let details =
            detect_significant_event(&frame(0.6), "no terminator here", "", &thresholds()).unwrap();
        assert_eq!(details.snippet, "no terminator here");
    }
}

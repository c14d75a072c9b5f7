//! 분석 관점 정의.
//!
//! 정적 조회 테이블. 프롬프트 템플릿과 요약 지시문은 불변이며 id로 조회한다.
//! 알 수 없는 id는 `find_perspective`에서는 `None`(엄격),
//! `perspective_or_default`에서는 기본 관점 폴백(명시적 관용 정책)이다.

/// 관점별 프롬프트 템플릿 묶음
#[derive(Debug)]
pub struct PerspectivePrompts {
    /// 고립 모드 — 컨텍스트 없는 고정 템플릿
    pub isolated: &'static str,
    /// 연속 모드 첫 프레임
    pub continuous_initial: &'static str,
    /// 연속 모드 후속 프레임 — `{{context}}` 자리표시자 포함
    pub continuous_subsequent: &'static str,
}

/// 분석 관점 — 명명된 분석 렌즈
#[derive(Debug)]
pub struct Perspective {
    /// 안정 식별자
    pub id: &'static str,
    /// 표시 라벨
    pub label: &'static str,
    /// 프레임 프롬프트 템플릿
    pub prompts: PerspectivePrompts,
    /// 요약 지시문
    pub summary_instruction: &'static str,
}

/// 관점 테이블 — 첫 항목이 기본 관점
pub const PERSPECTIVES: &[Perspective] = &[
    Perspective {
        id: "objective-description",
        label: "Objective Description",
        prompts: PerspectivePrompts {
            isolated: "Describe what you see in this video frame. Be objective and factual.",
            continuous_initial: "Describe this initial video frame objectively. Focus on people, objects, activities, and setting. State only what is clearly visible without guessing unseen causes or motives.",
            continuous_subsequent: "Given the previous context:\n{{context}}\nDescribe only the observable changes in this frame. Focus on new positions, movements, or visible elements and avoid inventing people, objects, or actions that are not clearly present.",
        },
        summary_instruction: "Produce a cohesive, factual narrative that summarizes the entire video. Focus on key events, transitions, and outcomes while avoiding repetition.",
    },
    Perspective {
        id: "urban-planning",
        label: "Urban Planning Analysis",
        prompts: PerspectivePrompts {
            isolated: "Analyze this from an urban planning perspective: traffic flow, pedestrian infrastructure, accessibility features, public space design, and urban functionality.",
            continuous_initial: "Analyze this initial frame from an urban planning perspective, noting infrastructure, circulation, and spatial function. Base remarks strictly on clearly visible features.",
            continuous_subsequent: "Continuing the urban analysis from previous observations:\n{{context}}\nExplain only the visible changes in infrastructure or usage. Highlight new or shifting elements without speculating about unseen causes or actors.",
        },
        summary_instruction: "Summarize the video from an urban planning perspective, highlighting infrastructure performance, circulation patterns, accessibility, and spatial functionality.",
    },
    Perspective {
        id: "social-dynamics",
        label: "Social Dynamics Analysis",
        prompts: PerspectivePrompts {
            isolated: "Analyze this from a sociological perspective: social interactions, group behavior, community dynamics, cultural patterns, and interpersonal relationships.",
            continuous_initial: "Analyze the initial social dynamics in this frame, noting roles, interactions, and group structures. Describe only behaviours you can directly observe.",
            continuous_subsequent: "Building on the previous frame:\n{{context}}\nDescribe how observable interactions shift in THIS frame compared to the previous one. Focus on specific changes in behaviours and proximity without assuming motivations or inventing new participants.",
        },
        summary_instruction: "Describe the overarching social narrative of the video, noting changing interactions, power dynamics, group behaviors, and notable social moments.",
    },
    Perspective {
        id: "safety-assessment",
        label: "Safety Assessment",
        prompts: PerspectivePrompts {
            isolated: "Analyze this from a safety perspective: identify potential hazards, risk factors, safety compliance issues, and protective measures.",
            continuous_initial: "Identify initial safety considerations in this frame, including hazards, protective measures, and risk levels. Mention only conditions you can clearly see.",
            continuous_subsequent: "Given earlier safety observations:\n{{context}}\nNote any clearly visible new hazards, mitigations, or risk changes. Do not infer events that are off-screen.",
        },
        summary_instruction: "Provide a comprehensive safety assessment of the video, capturing key risks, mitigations, compliance issues, and recommendations.",
    },
    Perspective {
        id: "accessibility-review",
        label: "Accessibility Review",
        prompts: PerspectivePrompts {
            isolated: "Analyze this from an accessibility perspective: identify barriers, evaluate inclusive design features, assess mobility challenges, and note universal design elements.",
            continuous_initial: "Assess initial accessibility features and barriers in this frame, noting inclusive design elements and obstacles that are visibly present.",
            continuous_subsequent: "Continuing from previous accessibility observations:\n{{context}}\nIdentify any visible changes in accessibility, new barriers, or adjustments. Avoid speculating about features outside the frame.",
        },
        summary_instruction: "Summarize accessibility conditions across the video, covering barriers, inclusive design features, and opportunities for improvement.",
    },
    Perspective {
        id: "creative-fiction",
        label: "Creative Fiction (First-Person Story)",
        prompts: PerspectivePrompts {
            isolated: "Pick one person visible in this frame and create a brief, respectful first-person narrative from their perspective. What might they be thinking or experiencing? Label clearly as creative fiction.",
            continuous_initial: "Begin a first-person narrative from someone in this frame. Establish who they are, where they are, and what they notice based solely on visible details. Label the response as creative fiction.",
            continuous_subsequent: "Continue the story from the perspective established earlier:\n{{context}}\nAdvance the narrative using only what can be observed in this frame. Reflect on emotions that align with visible cues and avoid introducing new unseen events. Label the response as creative fiction.",
        },
        summary_instruction: "Write a cohesive first-person story that spans the whole video, weaving together the key moments into a continuous narrative. Keep it respectful, brief, and clearly labelled as creative fiction.",
    },
];

/// 엄격 조회 — 런 엔트리 검증용
pub fn find_perspective(id: &str) -> Option<&'static Perspective> {
    PERSPECTIVES.iter().find(|p| p.id == id)
}

/// 관용 조회 — 알 수 없는 id는 기본(첫 번째) 관점으로 폴백.
/// 프롬프트 빌더 전용 정책이며, 런 엔트리에서는 `find_perspective`를 쓴다.
pub fn perspective_or_default(id: &str) -> &'static Perspective {
    find_perspective(id).unwrap_or(&PERSPECTIVES[0])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_has_six_perspectives_with_unique_ids() {
        assert_eq!(PERSPECTIVES.len(), 6);
        for (i, a) in PERSPECTIVES.iter().enumerate() {
            for b in &PERSPECTIVES[i + 1..] {
                assert_ne!(a.id, b.id);
            }
        }
    }

    #[test]
    fn strict_lookup_rejects_unknown_id() {
        assert!(find_perspective("safety-assessment").is_some());
        assert!(find_perspective("no-such-perspective").is_none());
    }

    #[test]
    fn lenient_lookup_falls_back_to_default() {
        let fallback = perspective_or_default("no-such-perspective");
        assert_eq!(fallback.id, PERSPECTIVES[0].id);
        let exact = perspective_or_default("creative-fiction");
        assert_eq!(exact.id, "creative-fiction");
    }

    #[test]
    fn subsequent_templates_carry_context_placeholder() {
        for perspective in PERSPECTIVES {
            assert!(perspective
                .prompts
                .continuous_subsequent
                .contains("{{context}}"));
        }
    }
}

//! Static page copy.
//!
//! Everything on the page that does not come from the datasets: section
//! headings, the hero, form labels, the tips lists and the closing
//! call-to-action.

use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct HeroCopy {
    pub badge: &'static str,
    pub title: &'static str,
    pub subtitle: &'static str,
    pub body: &'static str,
}

#[derive(Debug, Serialize)]
pub struct SearchFormCopy {
    pub title: &'static str,
    pub notice: &'static str,
    pub origin_label: &'static str,
    pub origin_value: &'static str,
    pub destination_label: &'static str,
    pub destination_placeholder: &'static str,
    pub purpose_label: &'static str,
    pub duration_label: &'static str,
    pub submit_label: &'static str,
}

/// Heading split into a light lead and a bold tail.
#[derive(Debug, Serialize)]
pub struct SectionHeading {
    pub lead: &'static str,
    pub strong: &'static str,
    pub subtitle: Option<&'static str>,
}

#[derive(Debug, Serialize)]
pub struct TipGroup {
    pub title: &'static str,
    /// Visual tone: "neutral", "caution" or "avoid"
    pub tone: &'static str,
    pub items: &'static [&'static str],
}

#[derive(Debug, Serialize)]
pub struct Feature {
    pub title: &'static str,
    pub body: &'static str,
}

#[derive(Debug, Serialize)]
pub struct CallToActionCopy {
    pub lead: &'static str,
    pub strong: &'static str,
    pub body: &'static str,
    pub features: &'static [Feature],
    pub button_label: &'static str,
    pub button_href: &'static str,
}

#[derive(Debug, Serialize)]
pub struct NoticeCopy {
    pub title: &'static str,
    pub body: &'static str,
    pub items: &'static [&'static str],
}

pub const PAGE_TITLE: &str = "한국 여권 비자 체커 | 50개국 비자 요건";

pub static HERO: HeroCopy = HeroCopy {
    badge: "2025 한국 여권 비자 가이드",
    title: "비자 체커",
    subtitle: "한국 여권으로 떠나는 세계 여행 준비",
    body: "한국 여권 소지자를 위한 50개국 비자 정보를 확인하고, 디지털노마드 비자부터 관광비자까지 모든 출입국 요구사항을 한눈에 파악하세요.",
};

pub static SEARCH_FORM: SearchFormCopy = SearchFormCopy {
    title: "한국 여권 비자 체커",
    notice: "중요: 출발 전 대사관에서 최신 정보 확인 필수",
    origin_label: "출발국",
    origin_value: "대한민국 (한국 여권 전용)",
    destination_label: "목적지",
    destination_placeholder: "예: 일본, 태국, 싱가포르...",
    purpose_label: "여행 목적",
    duration_label: "체류 기간",
    submit_label: "한국 여권 비자 요구사항 확인",
};

pub static POPULAR_HEADING: SectionHeading = SectionHeading {
    lead: "인기 여행지",
    strong: "비자 정보",
    subtitle: None,
};

pub static NOMAD_HEADING: SectionHeading = SectionHeading {
    lead: "디지털노마드",
    strong: "전용 비자",
    subtitle: Some("한국 여권 기준 원격근무자를 위한 특별 비자 프로그램"),
};

pub const NOMAD_COMPARE_LABEL: &str = "전체 노마드 도시 비교하기";
pub const NOMAD_COMPARE_HREF: &str = "/nomad-calculator";
pub const NOMAD_CALCULATOR_LABEL: &str = "노마드 계산기로 분석";

pub static TIPS_HEADING: SectionHeading = SectionHeading {
    lead: "비자 신청",
    strong: "필수 팁",
    subtitle: None,
};

pub static TIPS: &[TipGroup] = &[
    TipGroup {
        title: "반드시 확인할 것",
        tone: "neutral",
        items: &[
            "여권 유효기간 6개월 이상 남아있는지",
            "왕복 항공권 또는 제3국 출국 티켓",
            "충분한 체재비 증명 (은행 잔고증명서)",
            "여행자 보험 가입 확인",
            "숙박 예약 확인서",
        ],
    },
    TipGroup {
        title: "주의사항",
        tone: "caution",
        items: &[
            "무비자 ≠ 무조건 입국 가능",
            "출입국 관리소 재량으로 입국 거부 가능",
            "코로나19 등 상황에 따라 변경 가능",
            "여권에 충분한 빈 페이지 필요",
        ],
    },
    TipGroup {
        title: "유용한 팁",
        tone: "neutral",
        items: &[
            "출발 전 외교부 여행경보 확인",
            "대사관 웹사이트에서 최신 정보 확인",
            "여행 일정표 준비 (영문 또는 현지어)",
            "출입국 카드 미리 작성하기",
            "중요 서류 사본 준비",
        ],
    },
    TipGroup {
        title: "피해야 할 것",
        tone: "avoid",
        items: &[
            "만료 임박한 여권으로 출국",
            "불법 취업 가능성 의심받을 행동",
            "거짓 정보 제공",
            "과도한 현금 소지 (신고 필요)",
            "금지 품목 휴대",
        ],
    },
];

pub static CALL_TO_ACTION: CallToActionCopy = CallToActionCopy {
    lead: "비자 준비 완료!",
    strong: "이제 여행 가이드와 함께",
    body: "한국 여권으로 출입국 준비가 끝났다면, 그 나라에서만 경험할 수 있는 특별한 이야기와 문화를 AI 가이드가 안내해드립니다",
    features: &[
        Feature {
            title: "현지 문화 체험",
            body: "단순 관광이 아닌 그 나라의 깊은 역사와 문화 이해",
        },
        Feature {
            title: "현지인 관점",
            body: "현지인만 아는 숨겨진 명소와 생활 꿀팁",
        },
        Feature {
            title: "안전 여행 팁",
            body: "현지 상황과 주의사항을 실시간으로 안내",
        },
    ],
    button_label: "여행 가이드 시작하기",
    button_href: "/?visa=ready&guide=start",
};

pub static NOMAD_NOTICE: NoticeCopy = NoticeCopy {
    title: "디지털 노마드 추가 정보",
    body: "디지털 노마드로 활동하시는 경우, 각국의 세금 규정과 장기 체류 요건을 반드시 확인하세요.",
    items: &[
        "소득 증명 서류 및 건강보험 가입 확인",
        "현지 세금 신고 의무 및 이중 과세 방지 협정 검토",
        "장기 체류 시 거주 등록 및 비자 연장 절차 확인",
    ],
};

pub const NO_RESULTS_TITLE: &str = "검색 결과가 없습니다";
pub const NO_RESULTS_HINT: &str = "아래의 인기 여행지에서 원하는 국가를 찾아보세요.";
pub const STAY_WARNING: &str = "선택한 체류 기간이 무비자 체류 가능 기간보다 깁니다";
pub const DOCUMENTS_HEADING: &str = "필수 서류";
pub const NOMAD_PANEL_HEADING: &str = "디지털노마드 가능";
pub const LANGUAGE_LABEL: &str = "언어";
pub const CURRENCY_LABEL: &str = "통화";

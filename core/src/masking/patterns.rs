use crate::masking::redaction::{MaskingProfile, PiiCategory};
use lazy_static::lazy_static;
use regex::Regex;

/// One detection rule. `group` selects the capture that is actually masked,
/// so keyword-anchored rules ("성명: 홍길동") keep the keyword visible.
pub struct MaskingRule {
    pub rule_id: &'static str,
    pub category: PiiCategory,
    pub regex: Regex,
    pub group: usize,
    /// Reject hits glued to further digits (part of a longer number).
    pub digit_bounded: bool,
    pub min_profile: MaskingProfile,
}

impl MaskingRule {
    fn new(
        rule_id: &'static str,
        category: PiiCategory,
        pattern: &str,
        group: usize,
        digit_bounded: bool,
        min_profile: MaskingProfile,
    ) -> Self {
        Self {
            rule_id,
            category,
            regex: Regex::new(pattern).expect("valid masking regex"),
            group,
            digit_bounded,
            min_profile,
        }
    }

    pub fn applies_to(&self, profile: MaskingProfile) -> bool {
        profile >= self.min_profile
    }
}

lazy_static! {
    // Catalog tuned for Korean employment contracts. Best effort only:
    // unusual spellings of names and free-form addresses slip through.
    pub static ref MASKING_RULES: Vec<MaskingRule> = vec![
        // 주민등록번호 / 외국인등록번호: 900101-1234567
        MaskingRule::new(
            "PII.resident_number",
            PiiCategory::ResidentNumber,
            r"\d{6}\s?-\s?[1-8]\d{6}",
            0,
            true,
            MaskingProfile::Basic,
        ),
        // Mobile and landline, domestic or +82 form.
        MaskingRule::new(
            "PII.phone",
            PiiCategory::Phone,
            r"(?:\+82[-.\s]?|0)(?:1[016789]|2|[3-6][1-5]|70)[-.)\s]?\d{3,4}[-.\s]?\d{4}",
            0,
            true,
            MaskingProfile::Basic,
        ),
        MaskingRule::new(
            "PII.email",
            PiiCategory::Email,
            r"(?i)[A-Z0-9._%+-]+@[A-Z0-9.-]+\.[A-Z]{2,}",
            0,
            false,
            MaskingProfile::Basic,
        ),
        // "성명: 홍길동", "근로자 : 김철수"
        MaskingRule::new(
            "PII.name_labeled",
            PiiCategory::Name,
            r"(?:성\s*명|이\s*름|근\s*로\s*자|사\s*업\s*주|대\s*표\s*자|대표이사)\s*[:：]\s*([가-힣]{2,4})",
            1,
            false,
            MaskingProfile::Standard,
        ),
        // Signature lines: "홍길동 (인)", "김철수(서명)"
        MaskingRule::new(
            "PII.name_signature",
            PiiCategory::Name,
            r"([가-힣]{2,4})\s*\((?:인|서명)\)",
            1,
            false,
            MaskingProfile::Standard,
        ),
        MaskingRule::new(
            "PII.name_labeled_en",
            PiiCategory::Name,
            r"\b(?i:name)\s*:\s*([A-Z][a-z]+(?: [A-Z][a-z]+){0,2})",
            1,
            false,
            MaskingProfile::Standard,
        ),
        // "주소: ..." up to the end of the line.
        MaskingRule::new(
            "PII.address_labeled",
            PiiCategory::Address,
            r"(?m)(?:주\s*소|거\s*주\s*지|소\s*재\s*지)\s*[:：]\s*([^\n]+)",
            1,
            false,
            MaskingProfile::Standard,
        ),
        // Unlabeled road / lot addresses: a real province or metro city, a
        // district, a road or town name, then the building or lot number.
        MaskingRule::new(
            "PII.address",
            PiiCategory::Address,
            concat!(
                r"\b(?:",
                r"(?:서울|부산|대구|인천|광주|대전|울산|세종)(?:특별자치시|특별시|광역시|시)?",
                r"|(?:강원|전북|제주)특별자치도",
                r"|(?:경기|강원|충청북|충청남|전라북|전라남|경상북|경상남|제주)도",
                r"|충북|충남|전북|전남|경북|경남",
                r")",
                r"\s+[가-힣]{1,10}(?:시|군|구)",
                r"(?:\s+[가-힣]{1,10}(?:구|군))?",
                r"(?:\s+[가-힣0-9]{1,12}(?:읍|면|동|로|길))+",
                r"\s*\d{1,5}(?:-\d{1,5})?(?:번지)?",
            ),
            0,
            false,
            MaskingProfile::Standard,
        ),
        MaskingRule::new(
            "PII.bank_account",
            PiiCategory::BankAccount,
            r"(?:계\s*좌\s*번\s*호|계\s*좌)\s*[:：]?\s*(\d[\d-]{8,}\d)",
            1,
            false,
            MaskingProfile::Strict,
        ),
        MaskingRule::new(
            "PII.birth_date",
            PiiCategory::BirthDate,
            r"생\s*년\s*월\s*일\s*[:：]?\s*(\d{4}\s*[.\-/년]\s*\d{1,2}\s*[.\-/월]\s*\d{1,2}\s*일?)",
            1,
            false,
            MaskingProfile::Strict,
        ),
    ];
}

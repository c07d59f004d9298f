use crate::error::{CoreError, CoreResult};
use crate::masking::patterns::MASKING_RULES;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Masking profile for outgoing contract text
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
#[serde(rename_all = "UPPERCASE")]
pub enum MaskingProfile {
    Basic,    // ID numbers, phones, emails
    #[default]
    Standard, // + names, addresses
    Strict,   // + bank accounts, birth dates
}

impl MaskingProfile {
    pub fn from_str(s: &str) -> CoreResult<Self> {
        match s {
            "BASIC" => Ok(MaskingProfile::Basic),
            "STANDARD" => Ok(MaskingProfile::Standard),
            "STRICT" => Ok(MaskingProfile::Strict),
            _ => Err(CoreError::InvalidInput(format!(
                "Invalid masking profile: {}",
                s
            ))),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum PiiCategory {
    ResidentNumber,
    Phone,
    Email,
    Name,
    Address,
    BankAccount,
    BirthDate,
}

impl PiiCategory {
    pub fn placeholder(&self) -> &'static str {
        match self {
            PiiCategory::ResidentNumber => "[주민등록번호]",
            PiiCategory::Phone => "[전화번호]",
            PiiCategory::Email => "[이메일]",
            PiiCategory::Name => "[이름]",
            PiiCategory::Address => "[주소]",
            PiiCategory::BankAccount => "[계좌번호]",
            PiiCategory::BirthDate => "[생년월일]",
        }
    }
}

/// Record of what was masked. Offsets refer to the unmasked input; the
/// original value itself is deliberately not kept.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MaskingRecord {
    pub span_start: usize,
    pub span_end: usize,
    pub category: PiiCategory,
    pub rule_id: String,
    pub placeholder: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MaskedText {
    pub text: String,
    pub records: Vec<MaskingRecord>,
}

/// Masking engine
#[derive(Debug, Clone, Copy, Default)]
pub struct MaskingEngine {
    profile: MaskingProfile,
}

impl MaskingEngine {
    pub fn new(profile: MaskingProfile) -> Self {
        MaskingEngine { profile }
    }

    pub fn profile(&self) -> MaskingProfile {
        self.profile
    }

    /// Replace every detected identifier with its category placeholder.
    /// Finding nothing is the normal case and returns the text unchanged.
    pub fn mask(&self, text: &str) -> MaskedText {
        let mut hits = self.detect(text);

        // Earliest start wins; at equal starts the longer span wins.
        hits.sort_by(|a, b| {
            a.span_start
                .cmp(&b.span_start)
                .then(b.span_end.cmp(&a.span_end))
        });

        let mut records: Vec<MaskingRecord> = Vec::with_capacity(hits.len());
        let mut claimed_until = 0;
        for hit in hits {
            if hit.span_start < claimed_until {
                continue;
            }
            claimed_until = hit.span_end;
            records.push(hit);
        }

        let mut out = String::with_capacity(text.len());
        let mut last = 0;
        for record in &records {
            out.push_str(&text[last..record.span_start]);
            out.push_str(&record.placeholder);
            last = record.span_end;
        }
        out.push_str(&text[last..]);

        debug!(profile = ?self.profile, masked = records.len(), "masking applied");
        MaskedText { text: out, records }
    }

    fn detect(&self, text: &str) -> Vec<MaskingRecord> {
        let mut hits = Vec::new();
        for rule in MASKING_RULES.iter().filter(|r| r.applies_to(self.profile)) {
            for caps in rule.regex.captures_iter(text) {
                let Some(m) = caps.get(rule.group) else {
                    continue;
                };
                let value = m.as_str().trim_end();
                if value.trim().is_empty() {
                    continue;
                }
                let (start, end) = (m.start(), m.start() + value.len());
                if rule.digit_bounded && !is_digit_bounded(text, start, end) {
                    continue;
                }
                hits.push(MaskingRecord {
                    span_start: start,
                    span_end: end,
                    category: rule.category,
                    rule_id: rule.rule_id.to_string(),
                    placeholder: rule.category.placeholder().to_string(),
                });
            }
        }
        hits
    }
}

/// Mask with the default profile.
pub fn mask(raw_text: &str) -> String {
    MaskingEngine::default().mask(raw_text).text
}

fn is_digit_bounded(text: &str, start: usize, end: usize) -> bool {
    let before = text[..start].chars().next_back();
    let after = text[end..].chars().next();
    !before.is_some_and(|c| c.is_ascii_digit()) && !after.is_some_and(|c| c.is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_profile_resident_number() {
        let engine = MaskingEngine::new(MaskingProfile::Basic);
        let masked = engine.mask("주민등록번호: 900101-1234567");
        assert_eq!(masked.text, "주민등록번호: [주민등록번호]");
        assert_eq!(masked.records.len(), 1);
        assert_eq!(masked.records[0].rule_id, "PII.resident_number");
    }

    #[test]
    fn test_basic_profile_phone_and_email() {
        let engine = MaskingEngine::new(MaskingProfile::Basic);
        let masked = engine.mask("연락처 010-1234-5678, hong@example.com 으로 연락");
        assert_eq!(masked.text, "연락처 [전화번호], [이메일] 으로 연락");
    }

    #[test]
    fn test_basic_profile_leaves_names() {
        let engine = MaskingEngine::new(MaskingProfile::Basic);
        let masked = engine.mask("성명: 홍길동");
        assert_eq!(masked.text, "성명: 홍길동");
        assert!(masked.records.is_empty());
    }

    #[test]
    fn test_standard_profile_names_and_address() {
        let engine = MaskingEngine::new(MaskingProfile::Standard);
        let masked = engine.mask("성명: 홍길동\n주소: 서울특별시 강남구 테헤란로 123\n근로자 홍길동 (인)");
        assert_eq!(masked.text, "성명: [이름]\n주소: [주소]\n근로자 [이름] (인)");
    }

    #[test]
    fn test_unlabeled_address() {
        let masked = mask("사업장은 경기도 성남시 분당구 판교역로 235 에 둔다");
        assert_eq!(masked, "사업장은 [주소] 에 둔다");
    }

    #[test]
    fn test_clause_prose_with_particles_untouched() {
        let text = "제9조 근로자도 반드시 회사가 정한 규칙을 따른다.";
        let masked = MaskingEngine::default().mask(text);
        assert_eq!(masked.text, text);
        assert!(masked.records.is_empty());
    }

    #[test]
    fn test_strict_profile_account() {
        let engine = MaskingEngine::new(MaskingProfile::Strict);
        let masked = engine.mask("급여 계좌번호: 110-123-456789");
        assert_eq!(masked.text, "급여 계좌번호: [계좌번호]");
    }

    #[test]
    fn test_long_digit_runs_not_phone() {
        let masked = mask("사업자 관리번호 9010123456789012");
        assert_eq!(masked, "사업자 관리번호 9010123456789012");
    }

    #[test]
    fn test_nothing_to_mask() {
        let text = "제1조 (목적) 이 계약은 근로조건을 정한다.\n제2조 (근무장소) 본사";
        assert_eq!(mask(text), text);
    }

    #[test]
    fn test_line_structure_preserved() {
        let text = "전화: 02-345-6789\n\n이메일: a.b@corp.co.kr\n";
        let masked = mask(text);
        assert_eq!(masked.matches('\n').count(), text.matches('\n').count());
        assert!(!masked.contains("6789"));
        assert!(!masked.contains("corp.co.kr"));
    }

    #[test]
    fn test_profile_from_str() {
        assert_eq!(MaskingProfile::from_str("BASIC").unwrap(), MaskingProfile::Basic);
        assert_eq!(MaskingProfile::from_str("STANDARD").unwrap(), MaskingProfile::Standard);
        assert_eq!(MaskingProfile::from_str("STRICT").unwrap(), MaskingProfile::Strict);
        assert!(MaskingProfile::from_str("INVALID").is_err());
    }
}

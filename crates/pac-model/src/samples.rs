//! Curated sample cases spanning low to high blast radius

use crate::case::{Case, InfraFlags};
use crate::level::{BizValue, ImpactLevel, InfraLevel};

fn sample(
    id: &str,
    name: &str,
    impact: ImpactLevel,
    reliability: f64,
    biz: BizValue,
    infra: InfraLevel,
    source: &str,
) -> Case {
    Case::new(impact, reliability)
        .with_id(id)
        .with_name(name)
        .with_biz_value(biz)
        .with_infra(InfraFlags::up_to(infra))
        .with_source(source)
}

/// The sample dataset shown before any custom cases are entered
///
/// Identity keys carry an `ex-` prefix so callers can tell samples from
/// user-entered cases.
#[must_use]
pub fn sample_cases() -> Vec<Case> {
    use BizValue::{V1, V2, V3, V4};
    use ImpactLevel::{B1, B2, B3, B4, B5};
    use InfraLevel::{I2, I3, I4, I5};

    vec![
        sample(
            "ex-1",
            "Meeting summarizer",
            B1,
            88.0,
            V1,
            I2,
            "Transcription WER 2.6% clean / 22% noisy; summarization compounds errors",
        ),
        sample(
            "ex-0",
            "Internal knowledge search",
            B1,
            92.0,
            V1,
            I4,
            "RAG hallucination 5-15% on unstructured docs; curated KB near 98%",
        ),
        sample(
            "ex-2",
            "Log analysis & alerting",
            B1,
            97.0,
            V2,
            I5,
            "ML false-positive rate ~4.35%; deep learning lowers FPR further",
        ),
        sample(
            "ex-2b",
            "Code formatting agent",
            B1,
            99.0,
            V1,
            I5,
            "Deterministic formatters near-perfect; AI lint autofix 99%+ on style rules",
        ),
        sample(
            "ex-3",
            "Code review bot",
            B2,
            80.8,
            V2,
            I2,
            "SWE-bench Verified around 80% for frontier models",
        ),
        sample(
            "ex-4",
            "Ticket triage & routing",
            B2,
            95.0,
            V2,
            I3,
            "AI routing accuracy >90%; categorization >85%",
        ),
        sample(
            "ex-5",
            "CI/CD deploy assistant",
            B2,
            89.7,
            V3,
            I3,
            "Build failure prediction F1 0.89; deployment success 90-95%",
        ),
        sample(
            "ex-6",
            "Customer support chatbot",
            B3,
            92.0,
            V3,
            I3,
            "Generative AI 92% intent accuracy",
        ),
        sample(
            "ex-7",
            "Email drafting assistant",
            B3,
            91.0,
            V2,
            I2,
            "Hallucination rate ~6%; tone/style strong, factual claims riskier",
        ),
        sample(
            "ex-8",
            "Sales outreach agent",
            B3,
            85.0,
            V3,
            I3,
            "Multi-step agent pass@8 ~6%",
        )
        .with_spawns(true),
        sample(
            "ex-9",
            "HR onboarding assistant",
            B4,
            88.0,
            V2,
            I4,
            "72% HR AI adoption; avg data breach cost $4.88M",
        ),
        sample(
            "ex-10",
            "Patient intake processor",
            B4,
            83.0,
            V3,
            I4,
            "AI diagnostic accuracy 76-90%; ICD coding exact match <50% on broad tests",
        ),
        sample(
            "ex-11",
            "Expense report processor",
            B5,
            95.0,
            V2,
            I4,
            "Receipt extraction high-90s%",
        ),
        sample(
            "ex-12",
            "Invoice payment agent",
            B5,
            97.0,
            V4,
            I5,
            "99.5% field accuracy; 97% end-to-end with OCR",
        ),
    ]
}

/// True when the id belongs to the sample dataset
#[must_use]
pub fn is_sample_id(id: &crate::case::CaseId) -> bool {
    matches!(id, crate::case::CaseId::Text(s) if s.starts_with("ex-"))
}

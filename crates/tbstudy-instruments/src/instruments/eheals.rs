use std::sync::LazyLock;

use crate::scoring::{Band, BandThreshold, InstrumentSpec, ItemDomain, ItemPrompt};
use crate::Instrument;

/// eHEALS: eHealth Literacy Scale.
/// 10 items rated 1 (strongly disagree) to 5 (strongly agree). Items 1–2
/// are supplementary; the formal total sums items 3–10 (8–40).
/// High ≥ 32, Moderate 24–31, Low < 24.
pub struct Eheals;

impl Instrument for Eheals {
    fn id(&self) -> &str {
        "eheals"
    }

    fn name(&self) -> &str {
        "eHealth Literacy Scale (eHEALS)"
    }

    fn spec(&self) -> &InstrumentSpec {
        spec()
    }
}

pub fn spec() -> &'static InstrumentSpec {
    static SPEC: LazyLock<InstrumentSpec> = LazyLock::new(|| {
        let likert: Vec<String> = [
            "Strongly disagree",
            "Disagree",
            "Undecided",
            "Agree",
            "Strongly agree",
        ]
        .iter()
        .map(|o| o.to_string())
        .collect();

        let items = [
            (
                "internet_usefulness",
                "How useful do you feel the Internet is in helping you make decisions about your health?",
            ),
            (
                "internet_importance",
                "How important is it for you to be able to access health resources on the Internet?",
            ),
            ("know_available", "I know what health resources are available on the Internet"),
            ("know_where", "I know where to find helpful health resources on the Internet"),
            ("know_how", "I know how to find helpful health resources on the Internet"),
            (
                "answer_questions",
                "I know how to use the Internet to answer my questions about health",
            ),
            (
                "use_information",
                "I know how to use the health information I find on the Internet to help me",
            ),
            (
                "evaluate_skills",
                "I have the skills I need to evaluate the health resources I find on the Internet",
            ),
            (
                "tell_quality",
                "I can tell high quality health resources from low quality health resources on the Internet",
            ),
            (
                "confident_decisions",
                "I feel confident in using information from the Internet to make health decisions",
            ),
        ];

        let items: Vec<ItemPrompt> = items
            .iter()
            .map(|(id, prompt)| ItemPrompt {
                id: id.to_string(),
                prompt: prompt.to_string(),
                options: likert.clone(),
            })
            .collect();

        InstrumentSpec {
            column_prefix: "EHEALS".to_string(),
            domain: ItemDomain { min: 1, max: 5 },
            scored_items: (2..items.len()).collect(),
            reverse_scored: Vec::new(),
            items,
            bands: vec![
                BandThreshold {
                    min_total: 32,
                    band: Band::High,
                },
                BandThreshold {
                    min_total: 24,
                    band: Band::Moderate,
                },
                BandThreshold {
                    min_total: 8,
                    band: Band::Low,
                },
            ],
        }
    });
    &SPEC
}

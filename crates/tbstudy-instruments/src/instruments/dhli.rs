use std::sync::LazyLock;

use crate::scoring::{Band, BandThreshold, InstrumentSpec, ItemDomain, ItemPrompt};
use crate::Instrument;

/// DHLI: Digital Health Literacy Instrument, 10-item oral version.
/// Each item 0 (No/Disagree) or 1 (Yes/Agree); item 9 is reverse-scored.
/// Total 0–10. High ≥ 7, Moderate 4–6, Low ≤ 3.
pub struct Dhli;

impl Instrument for Dhli {
    fn id(&self) -> &str {
        "dhli"
    }

    fn name(&self) -> &str {
        "Digital Health Literacy Instrument (DHLI)"
    }

    fn spec(&self) -> &InstrumentSpec {
        spec()
    }
}

pub fn spec() -> &'static InstrumentSpec {
    static SPEC: LazyLock<InstrumentSpec> = LazyLock::new(|| {
        let yes_no = ["No", "Yes"];
        let agree = ["Disagree", "Agree"];

        let items = [
            ("access_phone", "Do you have access to a mobile phone for health info?", yes_no),
            ("call_advice", "Can you use a phone to call for medical advice?", yes_no),
            ("sms_messages", "Do you know how to send/receive SMS health messages?", agree),
            (
                "find_info",
                "Can you find health info using voice calls or simple apps?",
                yes_no,
            ),
            (
                "check_reliability",
                "Do you check if phone/online health info is reliable?",
                agree,
            ),
            ("understand_media", "Can you understand health videos/audio on phone?", yes_no),
            (
                "appointment_reminders",
                "Do you use digital tools (e.g., SMS) to remember appointments?",
                yes_no,
            ),
            ("share_family", "Can you share health info with family via phone?", agree),
            (
                "barriers",
                "Do you face problems using digital health services due to language/tech barriers?",
                yes_no,
            ),
            ("tb_reminders", "Would you use phone-based TB reminders if available?", yes_no),
        ];

        let items: Vec<ItemPrompt> = items
            .iter()
            .map(|(id, prompt, options)| ItemPrompt {
                id: id.to_string(),
                prompt: prompt.to_string(),
                options: options.iter().map(|o| o.to_string()).collect(),
            })
            .collect();

        InstrumentSpec {
            column_prefix: "DHLI".to_string(),
            domain: ItemDomain { min: 0, max: 1 },
            scored_items: (0..items.len()).collect(),
            reverse_scored: vec![8],
            items,
            bands: vec![
                BandThreshold {
                    min_total: 7,
                    band: Band::High,
                },
                BandThreshold {
                    min_total: 4,
                    band: Band::Moderate,
                },
                BandThreshold {
                    min_total: 0,
                    band: Band::Low,
                },
            ],
        }
    });
    &SPEC
}

use std::sync::LazyLock;

use triagem_core::models::severity::Severity;

use crate::builder::InstrumentBuilder;
use crate::scoring::{AlgorithmKind, Band, Instrument, Question, band};

/// Narcissistic trait screening based on the NPI.
/// Seven six-item trait subscales. Plain sum, 42 questions, 0-168.
///
/// Measures traits for self-reflection; not a diagnostic tool for
/// narcissistic personality disorder.
pub fn definition() -> &'static Instrument {
    static INSTRUMENT: LazyLock<Instrument> = LazyLock::new(build);
    &INSTRUMENT
}

/// `(prompt, reverse_scored)`
type Item = (&'static str, bool);

struct Trait {
    id: &'static str,
    name: &'static str,
    description: &'static str,
    items: [Item; 6],
}

const TRAITS: [Trait; 7] = [
    Trait {
        id: "grandiosity",
        name: "Grandiosity",
        description: "Inflated sense of self-importance and uniqueness",
        items: [
            ("I think I am a special person", false),
            ("I am more capable than other people", false),
            ("I have a natural talent for influencing people", false),
            ("I am essentially a modest person", true),
            ("I see myself as an ordinary person", true),
            ("I believe I am destined for greatness", false),
        ],
    },
    Trait {
        id: "entitlement",
        name: "Entitlement",
        description: "Expectation of special treatment and recognition",
        items: [
            ("I expect a great deal from other people", false),
            ("I deserve more recognition for my contributions", false),
            ("People should respect my authority", false),
            ("I am content with ordinary achievements", true),
            ("I don't expect special treatment from others", true),
            ("Rules should apply to me differently than to others", false),
        ],
    },
    Trait {
        id: "exploitation",
        name: "Exploitation",
        description: "Using others for personal gain without empathy",
        items: [
            ("I find it easy to manipulate people", false),
            ("I can make anyone believe anything I want them to", false),
            ("I get upset when others don't notice how I look", false),
            ("I genuinely care about others' feelings", true),
            ("I often use others to get what I want", false),
            ("Other people's needs are as important as mine", true),
        ],
    },
    Trait {
        id: "vanity",
        name: "Vanity",
        description: "Excessive focus on appearance and admiration",
        items: [
            ("I like to look at myself in the mirror", false),
            ("I really like to be the centre of attention", false),
            ("I am less attractive than most people", true),
            ("Physical appearance is not important to me", true),
            ("I often check my appearance in reflective surfaces", false),
            ("Compliments about my looks are very important to me", false),
        ],
    },
    Trait {
        id: "authority",
        name: "Authority",
        description: "Need to dominate and control others",
        items: [
            ("I like having authority over other people", false),
            ("I would prefer to be a leader", false),
            ("I don't like being told what to do", false),
            ("I prefer to follow rather than lead", true),
            ("People naturally look to me for leadership", false),
            ("I enjoy making decisions for others", false),
        ],
    },
    Trait {
        id: "self_sufficiency",
        name: "Self-Sufficiency",
        description: "Belief in superiority and independence",
        items: [
            ("I can live my life the way I want to", false),
            ("I am independent of others", false),
            ("I don't need others to validate my worth", false),
            ("I often seek advice from others", true),
            ("I rely heavily on others for emotional support", true),
            ("I function better when others depend on me than when I depend on others", false),
        ],
    },
    Trait {
        id: "exhibitionism",
        name: "Exhibitionism",
        description: "Attention-seeking and showing-off behaviours",
        items: [
            ("I know that I am good because everybody keeps telling me so", false),
            ("When people compliment me I get embarrassed", true),
            ("I enjoy performing in front of others", false),
            ("I prefer to blend into the background", true),
            ("I like to share my achievements with others", false),
            ("I enjoy being photographed", false),
        ],
    },
];

fn trait_bands(name: &str) -> Vec<Band> {
    let name = name.to_lowercase();
    vec![
        band(0, 5, Severity::Minimal, &format!("Low {name}"), &[
            "No specific action needed",
        ]),
        band(6, 11, Severity::Mild, &format!("Typical {name}"), &[
            "Reflect on how this trait shows up in your relationships",
        ]),
        band(12, 17, Severity::Moderate, &format!("Elevated {name}"), &[
            "Ask trusted people for honest feedback",
            "Consider counselling focused on empathy and relationships",
        ]),
        band(18, 24, Severity::Severe, &format!("High {name}"), &[
            "Consider an assessment with a mental health professional",
        ]),
    ]
}

fn build() -> Instrument {
    let mut builder = InstrumentBuilder::new("narcissism", "Narcissistic Personality Traits")
        .description("Screening of narcissistic personality traits based on the NPI")
        .scientific_basis("Narcissistic Personality Inventory (NPI-40), Raskin & Terry (1988)")
        .estimated_minutes(12)
        .algorithm(AlgorithmKind::Sum, 168);

    let mut n = 0;
    for t in &TRAITS {
        let questions = t
            .items
            .iter()
            .map(|&(prompt, reverse)| {
                n += 1;
                let question = Question::new(format!("npi{n}"), t.id, prompt);
                if reverse { question.reversed() } else { question }
            })
            .collect();
        builder = builder.subscale(t.id, t.name, t.description, questions, trait_bands(t.name));
    }

    builder.build()
}

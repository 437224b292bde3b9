use std::sync::LazyLock;

use triagem_core::models::severity::Severity;

use crate::builder::InstrumentBuilder;
use crate::scoring::{AlgorithmKind, Band, Instrument, Question, band};

/// Pathological lying (pseudologia fantastica) screening.
/// Compulsive lying items weigh double. Weighted sum, 35 questions, 0-168.
pub fn definition() -> &'static Instrument {
    static INSTRUMENT: LazyLock<Instrument> = LazyLock::new(build);
    &INSTRUMENT
}

/// `(prompt, reverse_scored)`
type Item = (&'static str, bool);

struct Cluster {
    id: &'static str,
    name: &'static str,
    description: &'static str,
    weight: u32,
    items: [Item; 7],
}

const CLUSTERS: [Cluster; 5] = [
    Cluster {
        id: "compulsive_lying",
        name: "Compulsive Lying",
        description: "Uncontrollable urge to lie even when there is no need",
        weight: 2,
        items: [
            ("I often lie even when the truth would be easier or better", false),
            ("I feel a strong urge to lie, even in situations that do not matter", false),
            ("I find it hard to stop lying once I have started", false),
            ("I lie automatically, without consciously thinking about it", false),
            ("I rarely feel the need to invent or exaggerate stories", true),
            ("I lie several times a day, even about small things", false),
            ("I always tell the truth, regardless of the consequences", true),
        ],
    },
    Cluster {
        id: "elaborate_fantasy",
        name: "Elaborate Fantasies",
        description: "Creating complex, detailed stories that are not real",
        weight: 1,
        items: [
            ("I create detailed and complex stories about my life that are not true", false),
            ("I invent dramatic or extraordinary experiences that never happened", false),
            ("I make up elaborate details to make my stories more interesting", false),
            ("I tell the same story in different ways to different people", false),
            ("I keep my stories simple and grounded in reality", true),
            ("I create fictional people or situations and present them as real", false),
            ("I prefer to tell only facts that really happened", true),
        ],
    },
    Cluster {
        id: "attention_seeking",
        name: "Attention Seeking",
        description: "Excessive need to be noticed and admired",
        weight: 1,
        items: [
            ("I often invent or exaggerate stories to impress others", false),
            ("I feel the need to be the centre of attention in conversations", false),
            ("I tell dramatic stories about myself to get sympathy or admiration", false),
            ("I feel uncomfortable when I am not the focus of attention", false),
            ("I am happy listening to others talk about their experiences", true),
            ("I exaggerate my problems or successes to get more attention", false),
            ("I rarely feel the need to be the centre of attention", true),
        ],
    },
    Cluster {
        id: "interpersonal_manipulation",
        name: "Interpersonal Manipulation",
        description: "Using lies to control or influence others",
        weight: 1,
        items: [
            ("I use lies to get what I want from other people", false),
            ("I lie to avoid responsibilities or consequences", false),
            ("I make up stories to make others feel sorry for me", false),
            ("I use false information to influence other people's decisions", false),
            ("I am always direct and honest in how I communicate", true),
            ("I lie to create conflict between other people", false),
            ("I never use lies to gain personal advantages", true),
        ],
    },
    Cluster {
        id: "reality_confusion",
        name: "Reality Confusion",
        description: "Difficulty telling truth from fantasy",
        weight: 1,
        items: [
            ("I sometimes struggle to remember whether something really happened or I made it up", false),
            ("My fantasies sometimes feel as real as true memories", false),
            ("I start believing my own lies after telling them several times", false),
            ("I have moments when I am not sure what is real", false),
            ("I am always clear about what is true and what is fantasy", true),
            ("I get confused about which version of a story is true", false),
            ("My memory of events is always accurate and reliable", true),
        ],
    },
];

fn cluster_bands(c: &Cluster) -> Vec<Band> {
    let max = 28 * c.weight;
    let step = max / 4;
    let name = c.name.to_lowercase();
    vec![
        band(0, step - 1, Severity::Minimal, &format!("No relevant signs of {name}"), &[
            "No specific action needed",
        ]),
        band(step, 2 * step - 1, Severity::Mild, &format!("Occasional {name}"), &[
            "Keep a journal of situations where the urge appears",
        ]),
        band(2 * step, 3 * step - 1, Severity::Moderate, &format!("Frequent {name}"), &[
            "Cognitive behavioural therapy is recommended",
            "Identify personal triggers with a professional",
        ]),
        band(3 * step, max, Severity::Severe, &format!("Pervasive {name}"), &[
            "Seek a professional assessment",
            "Consider family or couples therapy to rebuild trust",
        ]),
    ]
}

fn build() -> Instrument {
    let mut builder = InstrumentBuilder::new("mythomania", "Pathological Lying Tendencies")
        .description("Screening of pathological lying patterns and reality distortion")
        .scientific_basis("Research on pathological lying (Dike et al., 2005; Yang et al., 2005)")
        .estimated_minutes(12)
        .algorithm(AlgorithmKind::Weighted, 168);

    let mut n = 0;
    for c in &CLUSTERS {
        let questions = c
            .items
            .iter()
            .map(|&(prompt, reverse)| {
                n += 1;
                let question = Question::new(format!("myth{n}"), c.id, prompt).weighted(c.weight);
                if reverse { question.reversed() } else { question }
            })
            .collect();
        builder = builder.subscale(c.id, c.name, c.description, questions, cluster_bands(c));
    }

    builder.build()
}

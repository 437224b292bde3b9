use std::sync::LazyLock;

use triagem_core::models::severity::Severity;

use crate::builder::InstrumentBuilder;
use crate::scoring::{AlgorithmKind, Band, Instrument, Question, band};

/// Adult ADHD screening based on the WHO ASRS-1.1.
/// Part A items (asrs1-asrs6) are the most predictive and carry weight 2.
/// Weighted sum, 22 questions, 0-112.
pub fn definition() -> &'static Instrument {
    static INSTRUMENT: LazyLock<Instrument> = LazyLock::new(build);
    &INSTRUMENT
}

const PART_A_WEIGHT: u32 = 2;

fn asrs(n: u32, category: &str, prompt: &str) -> Question {
    let question = Question::new(format!("asrs{n}"), category, format!("How often do you {prompt}?"));
    if n <= 6 {
        question.weighted(PART_A_WEIGHT)
    } else {
        question
    }
}

fn quartile_bands(cuts: [u32; 4], area: &str, high: &[&str]) -> Vec<Band> {
    vec![
        band(0, cuts[0], Severity::Minimal, &format!("Few {area} symptoms"), &[
            "No specific action needed",
        ]),
        band(cuts[0] + 1, cuts[1], Severity::Mild, &format!("Some {area} symptoms"), &[
            "Use planners, reminders and routines",
        ]),
        band(cuts[1] + 1, cuts[2], Severity::Moderate, &format!("Frequent {area} symptoms"), &[
            "Assessment by a professional experienced in adult ADHD",
            "Organisational skills coaching",
        ]),
        band(cuts[2] + 1, cuts[3], Severity::Severe, &format!("Pervasive {area} symptoms"), high),
    ]
}

fn build() -> Instrument {
    InstrumentBuilder::new("adhd", "Attention-Deficit/Hyperactivity Disorder")
        .description("ASRS-1.1 symptom checklist with functional impact items for adults")
        .scientific_basis("Adult ADHD Self-Report Scale (ASRS-1.1), World Health Organization + DSM-5 Criteria")
        .estimated_minutes(10)
        .algorithm(AlgorithmKind::Weighted, 112)
        .subscale(
            "inattention",
            "Inattention",
            "Difficulty sustaining attention, organising and finishing tasks",
            vec![
                asrs(1, "task_completion", "have trouble wrapping up the final details of a project once the challenging parts are done"),
                asrs(2, "organization", "have difficulty getting things in order when a task requires organisation"),
                asrs(3, "memory", "have problems remembering appointments or obligations"),
                asrs(4, "procrastination", "avoid or delay getting started on a task that requires a lot of thought"),
                asrs(7, "careless_mistakes", "make careless mistakes when working on a boring or difficult project"),
                asrs(8, "sustained_attention", "have difficulty keeping your attention on boring or repetitive work"),
                asrs(9, "listening", "have difficulty concentrating on what people say, even when they speak to you directly"),
                asrs(10, "misplacing", "misplace things or have difficulty finding them at home or at work"),
                asrs(11, "distractibility", "get distracted by activity or noise around you"),
            ],
            quartile_bands([12, 25, 38, 52], "inattention", &[
                "Comprehensive ADHD evaluation",
                "Discuss treatment options with a psychiatrist",
            ]),
        )
        .subscale(
            "hyperactivity_impulsivity",
            "Hyperactivity and Impulsivity",
            "Motor restlessness and difficulty inhibiting responses",
            vec![
                asrs(5, "fidgeting", "fidget or squirm with your hands or feet when you have to sit down for a long time"),
                asrs(6, "overactivity", "feel overly active and compelled to do things, as if driven by a motor"),
                asrs(12, "leaving_seat", "leave your seat in meetings or other situations where you are expected to stay seated"),
                asrs(13, "restlessness", "feel restless or fidgety"),
                asrs(14, "unwinding", "have difficulty unwinding and relaxing when you have time to yourself"),
                asrs(15, "talkativeness", "find yourself talking too much in social situations"),
                asrs(16, "blurting", "finish other people's sentences before they can finish them"),
                asrs(17, "waiting", "have difficulty waiting your turn when turn taking is required"),
                asrs(18, "interrupting", "interrupt others when they are busy"),
            ],
            quartile_bands([10, 21, 32, 44], "hyperactive or impulsive", &[
                "Comprehensive ADHD evaluation",
                "Impulse management strategies with a therapist",
            ]),
        )
        .subscale(
            "functional_impact",
            "Functional Impact",
            "How much attention problems affect daily life",
            vec![
                Question::new("adhd_fn1", "work", "Attention problems have hurt my performance at work or school"),
                Question::new("adhd_fn2", "relationships", "My forgetfulness or impulsiveness causes conflict in relationships"),
                Question::new("adhd_fn3", "finances", "I miss bills or deadlines because I lose track of them"),
                Question::new("adhd_fn4", "history", "I have had these difficulties since childhood"),
            ],
            quartile_bands([3, 7, 11, 16], "functional impact", &[
                "Professional assessment of daily functioning",
                "Workplace or study accommodations",
            ]),
        )
        .build()
}

use std::sync::LazyLock;

use triagem_core::models::severity::Severity;

use crate::builder::InstrumentBuilder;
use crate::scoring::{AlgorithmKind, Band, Instrument, Question, band};

/// Bipolar spectrum screening modelled on the MDQ and HCL-32.
/// Manic items weigh double. Each subscale closes with one reverse-scored
/// item. Weighted sum, 31 questions, 0-152.
pub fn definition() -> &'static Instrument {
    static INSTRUMENT: LazyLock<Instrument> = LazyLock::new(build);
    &INSTRUMENT
}

const MANIA_WEIGHT: u32 = 2;

fn items(prefix: &str, category: &str, prompts: &[&str], reversed: &str) -> Vec<Question> {
    let mut questions: Vec<Question> = prompts
        .iter()
        .enumerate()
        .map(|(i, prompt)| Question::new(format!("{prefix}{}", i + 1), category, *prompt))
        .collect();
    questions.push(
        Question::new(format!("{prefix}{}", prompts.len() + 1), category, reversed).reversed(),
    );
    questions
}

fn bands(cuts: [u32; 4], area: &str) -> Vec<Band> {
    vec![
        band(0, cuts[0], Severity::Minimal, &format!("No relevant {area}"), &[
            "No specific action needed",
        ]),
        band(cuts[0] + 1, cuts[1], Severity::Mild, &format!("Some {area}"), &[
            "Keep a mood and sleep diary",
        ]),
        band(cuts[1] + 1, cuts[2], Severity::Moderate, &format!("Marked {area}"), &[
            "Psychiatric assessment recommended",
            "Share the mood diary with a professional",
        ]),
        band(cuts[2] + 1, cuts[3], Severity::Severe, &format!("Pronounced {area}"), &[
            "Prompt psychiatric assessment",
            "Avoid alcohol and keep a regular sleep schedule",
        ]),
    ]
}

fn build() -> Instrument {
    let mania: Vec<Question> = items(
        "bp_mania",
        "mania",
        &[
            "I have had periods where I felt so good or energetic that others thought I was not my normal self",
            "I have had times when I was more talkative or spoke faster than usual",
            "I have had periods when I needed much less sleep than usual",
            "I have had times when I was much more self-confident than usual",
            "I have had periods when I did things that were unusual for me or that others thought were excessive",
            "I have had times when I was much more active or did many more things than usual",
        ],
        "I have never experienced periods of unusually elevated mood",
    )
    .into_iter()
    .map(|q| q.weighted(MANIA_WEIGHT))
    .collect();

    InstrumentBuilder::new("bipolar", "Bipolar Spectrum Screening")
        .description("Screening for manic, hypomanic, depressive and mixed episodes")
        .scientific_basis("Mood Disorder Questionnaire (MDQ) + Hypomania Checklist-32 (HCL-32)")
        .estimated_minutes(12)
        .algorithm(AlgorithmKind::Weighted, 152)
        .subscale(
            "mania",
            "Manic and Hypomanic Episodes",
            "Periods of elevated mood, energy and activity",
            mania,
            bands([13, 27, 41, 56], "manic features"),
        )
        .subscale(
            "depressive",
            "Depressive Episodes",
            "Extended periods of low mood and loss of interest",
            items(
                "bp_dep",
                "depression",
                &[
                    "I have had periods lasting at least 2 weeks when I felt sad, depressed or empty most of the day",
                    "I have had times when I lost interest in activities I usually enjoyed",
                    "I have had periods when I felt worthless or excessively guilty",
                    "I have had significant changes in appetite or weight during low periods",
                    "I have had difficulty concentrating or making decisions during depressive periods",
                    "I have had thoughts of death or suicide during low periods",
                ],
                "I have never experienced extended periods of depression",
            ),
            bands([6, 13, 20, 28], "depressive features"),
        )
        .subscale(
            "mixed",
            "Mixed Features",
            "Manic and depressive symptoms at the same time",
            items(
                "bp_mixed",
                "mixed",
                &[
                    "I have had periods when I felt both energetic and depressed at the same time",
                    "I have had times when my mood changed rapidly from high to low",
                    "I have had periods when I felt agitated and restless while also feeling sad",
                    "I have had racing thoughts while feeling hopeless",
                    "I have had periods when I was irritable and had increased energy simultaneously",
                ],
                "My mood episodes are always clearly either high or low, never mixed",
            ),
            bands([5, 11, 17, 24], "mixed features"),
        )
        .subscale(
            "functional",
            "Functional Impairment",
            "Consequences of mood changes on work, relationships and finances",
            items(
                "bp_fn",
                "functional",
                &[
                    "My mood changes have caused problems in my work or school performance",
                    "My mood episodes have strained my relationships with family or friends",
                    "I have made important decisions during mood episodes that I later regretted",
                    "My mood changes have led to financial problems or poor spending decisions",
                    "I have been hospitalised or needed intensive treatment for mood episodes",
                ],
                "My mood changes have never significantly impacted my daily functioning",
            ),
            bands([5, 11, 17, 24], "functional impairment"),
        )
        .subscale(
            "sleep",
            "Sleep Disturbance",
            "Sleep changes that track mood episodes",
            items(
                "bp_sleep",
                "sleep",
                &[
                    "During elevated periods I have needed much less sleep than usual (3-4 hours)",
                    "I have had periods where I barely slept for days but still felt energetic",
                    "During low periods I sleep much more than usual or have trouble sleeping",
                    "My sleep patterns change dramatically with my mood",
                ],
                "My sleep remains consistent regardless of my mood",
            ),
            bands([4, 9, 14, 20], "sleep disturbance"),
        )
        .build()
}

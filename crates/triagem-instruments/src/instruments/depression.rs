use std::sync::LazyLock;

use triagem_core::models::severity::Severity;

use crate::builder::InstrumentBuilder;
use crate::scoring::{AlgorithmKind, Instrument, Question, band};

/// Comprehensive depression screening.
/// PHQ-9 core plus BDI-II style complementary items, with a separate
/// hopelessness/risk cluster. Plain sum, 42 questions, 0-168.
pub fn definition() -> &'static Instrument {
    static INSTRUMENT: LazyLock<Instrument> = LazyLock::new(build);
    &INSTRUMENT
}

const PHQ_STEM: &str = "Over the last 2 weeks, how often have you been bothered by";

fn phq(n: u32, category: &str, symptom: &str) -> Question {
    Question::new(format!("phq{n}"), category, format!("{PHQ_STEM} {symptom}?"))
}

fn add(n: u32, category: &str, prompt: &str) -> Question {
    Question::new(format!("dep_add{n}"), category, prompt)
}

fn build() -> Instrument {
    InstrumentBuilder::new("depression", "Comprehensive Depression Assessment")
        .description("PHQ-9 + Beck Depression Inventory + complementary criteria")
        .scientific_basis("PHQ-9 + BDI-II + DSM-5 Major Depressive Episode Criteria")
        .estimated_minutes(18)
        .algorithm(AlgorithmKind::Sum, 168)
        .subscale(
            "phq9_core",
            "Core Depressive Symptoms (PHQ-9)",
            "DSM-5 major depressive episode symptoms",
            vec![
                phq(1, "anhedonia", "little interest or pleasure in doing things"),
                phq(2, "depressed_mood", "feeling down, depressed or hopeless"),
                phq(3, "sleep", "trouble falling or staying asleep, or sleeping too much"),
                phq(4, "fatigue", "feeling tired or having little energy"),
                phq(5, "appetite", "poor appetite or overeating"),
                phq(6, "worthlessness", "feeling bad about yourself, or that you are a failure"),
                phq(7, "concentration", "trouble concentrating on things"),
                phq(8, "psychomotor", "moving or speaking slowly, or being fidgety and restless"),
                phq(9, "suicidal_ideation", "thoughts that you would be better off dead"),
            ],
            vec![
                band(0, 4, Severity::Minimal, "Minimal depressive symptoms", &[
                    "Keep up social and physical activity",
                ]),
                band(5, 9, Severity::Mild, "Mild depressive symptoms", &[
                    "Watchful waiting and self-care",
                    "Repeat screening in a few weeks",
                ]),
                band(10, 14, Severity::Moderate, "Moderate depressive symptoms", &[
                    "Professional assessment",
                    "Consider psychotherapy",
                ]),
                band(15, 19, Severity::Severe, "Moderately severe depressive symptoms", &[
                    "Active treatment with psychotherapy",
                    "Medical evaluation for medication",
                ]),
                band(20, 36, Severity::VerySevere, "Severe depressive symptoms", &[
                    "Urgent psychiatric assessment",
                    "Combined pharmacological and psychological treatment",
                ]),
            ],
        )
        .subscale(
            "hopelessness_risk",
            "Hopelessness and Risk",
            "Hopelessness, perceived burden and thoughts of death",
            vec![
                add(14, "hopelessness", "I feel the future is hopeless"),
                add(15, "burden", "I feel I am a burden to other people"),
                add(16, "death_thoughts", "I often think about death"),
                add(28, "suicidal_thoughts", "I often think everything would be better without me"),
            ],
            vec![
                band(0, 2, Severity::Minimal, "No relevant risk indicators", &[
                    "Keep up your support network",
                ]),
                band(3, 6, Severity::Mild, "Some hopeless thinking", &[
                    "Talk to someone you trust",
                    "Monitor these thoughts",
                ]),
                band(7, 10, Severity::Moderate, "Marked hopelessness", &[
                    "Professional assessment soon",
                    "Share a safety plan with someone close",
                ]),
                band(11, 16, Severity::Severe, "High risk indicators", &[
                    "Seek immediate professional help",
                    "Contact a crisis line if thoughts of self-harm arise",
                ]),
            ],
        )
        .questions([
            add(1, "mood", "I feel sad most of the time"),
            add(2, "anhedonia", "I no longer enjoy activities I used to like"),
            add(3, "guilt", "I blame myself for things that go wrong"),
            add(4, "emotional_lability", "I cry more easily than before"),
            add(5, "social_withdrawal", "I have lost interest in other people"),
            add(6, "indecisiveness", "I find it hard to make decisions"),
            add(7, "self_care", "I do not look after myself as I should (hygiene, appearance)"),
            add(8, "early_awakening", "I wake up very early and cannot get back to sleep"),
            add(9, "fatigue", "I get tired more easily than before"),
            add(10, "appetite_loss", "My appetite is lower than usual"),
            add(11, "weight_loss", "I have lost weight without dieting"),
            add(12, "libido", "I have less interest in sex"),
            add(13, "somatic_concerns", "I am worried about physical problems"),
            add(17, "meaninglessness", "I feel my life has no meaning"),
            add(18, "emotional_numbing", "I find it hard to feel positive emotions"),
            add(19, "social_avoidance", "I avoid social commitments"),
            add(20, "disconnection", "I feel disconnected from other people"),
            add(21, "self_criticism", "I have constant self-critical thoughts"),
            add(22, "unworthiness", "I feel I do not deserve to be happy"),
            add(23, "effort", "The smallest task feels like a huge effort"),
            add(24, "emptiness", "I feel a constant emptiness inside"),
            add(25, "emotional_connection", "I find it hard to feel love for others"),
            add(26, "perception", "The world looks grey and colourless"),
            add(27, "isolation", "I feel nobody really understands me"),
            add(29, "crying_spells", "I have crying spells for no apparent reason"),
            add(30, "identity_loss", "I feel I have lost my identity"),
            add(31, "motivation_loss", "Nothing manages to motivate or cheer me up"),
            add(32, "psychomotor_retardation", "I feel physically heavy or slow"),
            add(33, "rumination", "I keep remembering past failures"),
        ])
        .build()
}

use std::sync::LazyLock;

use triagem_core::models::severity::Severity;

use crate::builder::InstrumentBuilder;
use crate::scoring::{AlgorithmKind, Instrument, Question, band};

/// Comprehensive anxiety screening.
/// GAD-7 core symptoms, Beck Anxiety Inventory split into physical and
/// cognitive/emotional items, plus twelve complementary items.
/// Plain sum, 40 questions, 0-160.
pub fn definition() -> &'static Instrument {
    static INSTRUMENT: LazyLock<Instrument> = LazyLock::new(build);
    &INSTRUMENT
}

const GAD_STEM: &str = "Over the last 2 weeks, how often have you been bothered by";

fn gad(n: u32, category: &str, symptom: &str) -> Question {
    Question::new(format!("gad{n}"), category, format!("{GAD_STEM} {symptom}?"))
}

fn bai(n: u32, category: &str, symptom: &str) -> Question {
    Question::new(format!("bai{n}"), category, symptom)
}

fn build() -> Instrument {
    InstrumentBuilder::new("anxiety", "Comprehensive Anxiety Assessment")
        .description("GAD-7 + Beck Anxiety Inventory + complementary anxiety items")
        .scientific_basis("GAD-7 + BAI + DSM-5 Anxiety Disorders Criteria")
        .estimated_minutes(15)
        .algorithm(AlgorithmKind::Sum, 160)
        .subscale(
            "gad7",
            "Generalized Anxiety (GAD-7)",
            "Core symptoms of generalized anxiety",
            vec![
                gad(1, "core_anxiety", "feeling nervous, anxious or on edge"),
                gad(2, "worry_control", "not being able to stop or control worrying"),
                gad(3, "excessive_worry", "worrying too much about different things"),
                gad(4, "relaxation_difficulty", "trouble relaxing"),
                gad(5, "restlessness", "being so restless that it is hard to sit still"),
                gad(6, "irritability", "becoming easily annoyed or irritable"),
                gad(7, "fearful_anticipation", "feeling afraid as if something awful might happen"),
            ],
            vec![
                band(0, 4, Severity::Minimal, "Minimal anxiety", &[
                    "Keep up healthy habits",
                    "Preventive relaxation techniques",
                ]),
                band(5, 9, Severity::Mild, "Mild anxiety", &[
                    "Breathing techniques",
                    "Regular physical exercise",
                    "Mindfulness practice",
                ]),
                band(10, 14, Severity::Moderate, "Moderate anxiety", &[
                    "Cognitive behavioural therapy",
                    "Professional assessment",
                    "Coping techniques",
                ]),
                band(15, 28, Severity::Severe, "Severe anxiety", &[
                    "Urgent psychiatric assessment",
                    "Intensive therapy",
                    "Possible medication",
                ]),
            ],
        )
        .subscale(
            "bai_physical",
            "Physical Anxiety Symptoms",
            "Bodily manifestations of anxiety",
            vec![
                bai(1, "physical", "Numbness or tingling in hands, feet or face"),
                bai(2, "physical", "Feeling hot"),
                bai(3, "physical", "Wobbliness in legs"),
                bai(6, "physical", "Dizzy or lightheaded"),
                bai(7, "physical", "Heart pounding or racing"),
                bai(11, "physical", "Feeling of choking"),
                bai(12, "physical", "Hands trembling"),
                bai(13, "physical", "Shaky or unsteady"),
                bai(15, "physical", "Difficulty breathing"),
                bai(18, "physical", "Indigestion or discomfort in abdomen"),
                bai(19, "physical", "Faint"),
                bai(20, "physical", "Face flushed"),
                bai(21, "physical", "Hot or cold sweats"),
            ],
            vec![
                band(0, 12, Severity::Minimal, "Minimal physical symptoms", &[
                    "Regular physical activity",
                ]),
                band(13, 25, Severity::Mild, "Mild physical symptoms", &[
                    "Progressive muscle relaxation",
                ]),
                band(26, 38, Severity::Moderate, "Moderate physical symptoms", &[
                    "Medical check-up",
                    "Body-oriented therapy",
                ]),
                band(39, 52, Severity::Severe, "Severe physical symptoms", &[
                    "Urgent medical assessment",
                    "Integrated treatment",
                ]),
            ],
        )
        .subscale(
            "bai_cognitive",
            "Cognitive and Emotional Anxiety Symptoms",
            "Fearful thoughts and emotional arousal",
            vec![
                bai(4, "psychological", "Unable to relax"),
                bai(5, "cognitive", "Fear of the worst happening"),
                bai(8, "emotional", "Unsteady or insecure"),
                bai(9, "emotional", "Terrified"),
                bai(10, "emotional", "Nervous"),
                bai(14, "cognitive", "Fear of losing control"),
                bai(16, "cognitive", "Fear of dying"),
                bai(17, "emotional", "Scared"),
            ],
            vec![
                band(0, 7, Severity::Minimal, "Minimal fearful thinking", &[
                    "Keep up current coping habits",
                ]),
                band(8, 15, Severity::Mild, "Mild fearful thinking", &[
                    "Thought journaling",
                    "Mindfulness practice",
                ]),
                band(16, 23, Severity::Moderate, "Moderate fearful thinking", &[
                    "Cognitive restructuring with a therapist",
                    "Professional assessment",
                ]),
                band(24, 32, Severity::Severe, "Severe fearful thinking", &[
                    "Urgent professional assessment",
                    "Structured psychotherapy",
                ]),
            ],
        )
        .questions([
            Question::new("anx_add1", "obsessive_thoughts", "I have repetitive thoughts I cannot control"),
            Question::new("anx_add2", "social_anxiety", "I avoid social situations for fear of being judged"),
            Question::new("anx_add3", "sleep_anxiety", "I wake up at night worried about problems"),
            Question::new("anx_add4", "concentration", "I have trouble concentrating because of worries"),
            Question::new("anx_add5", "overwhelm", "I feel overwhelmed by responsibilities"),
            Question::new("anx_add6", "specific_phobias", "I fear specific situations (lifts, crowds, etc.)"),
            Question::new("anx_add7", "avoidance", "I put off important tasks because of anxiety"),
            Question::new("anx_add8", "panic", "I have sudden episodes of panic"),
            Question::new("anx_add9", "health_anxiety", "I worry excessively about my health"),
            Question::new("anx_add10", "future_anxiety", "I constantly feel anxious about the future"),
            Question::new("anx_add11", "compulsive_behaviors", "I use rituals or repetitive behaviours to control anxiety"),
            Question::new("anx_add12", "functional_impairment", "Anxiety significantly interferes with my work or studies"),
        ])
        .build()
}

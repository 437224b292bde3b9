use crate::scoring::{AlgorithmKind, Band, Instrument, Question, ScoringAlgorithm, Subscale};

/// Assembles an [`Instrument`] while keeping question and subscale
/// membership in sync.
///
/// Questions passed to [`InstrumentBuilder::subscale`] get their `subscale`
/// field set and are listed in the subscale's `question_ids`, in the order
/// given. The builder does not check integrity; that is the catalog's job.
#[derive(Debug, Clone)]
pub struct InstrumentBuilder {
    inner: Instrument,
}

impl InstrumentBuilder {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            inner: Instrument {
                id: id.into(),
                name: name.into(),
                description: String::new(),
                scientific_basis: String::new(),
                estimated_minutes: 0,
                questions: Vec::new(),
                subscales: Vec::new(),
                algorithm: ScoringAlgorithm {
                    kind: AlgorithmKind::Sum,
                    min_score: 0,
                    max_score: 0,
                },
            },
        }
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.inner.description = description.into();
        self
    }

    pub fn scientific_basis(mut self, basis: impl Into<String>) -> Self {
        self.inner.scientific_basis = basis.into();
        self
    }

    pub fn estimated_minutes(mut self, minutes: u32) -> Self {
        self.inner.estimated_minutes = minutes;
        self
    }

    /// Declare the scoring algorithm and its score range `[0, max_score]`.
    pub fn algorithm(mut self, kind: AlgorithmKind, max_score: u32) -> Self {
        self.inner.algorithm = ScoringAlgorithm {
            kind,
            min_score: 0,
            max_score,
        };
        self
    }

    /// Add a question that belongs to no subscale. It still counts toward
    /// the total.
    pub fn question(mut self, question: Question) -> Self {
        self.inner.questions.push(question);
        self
    }

    pub fn questions(mut self, questions: impl IntoIterator<Item = Question>) -> Self {
        self.inner.questions.extend(questions);
        self
    }

    pub fn subscale(
        mut self,
        id: &str,
        name: &str,
        description: &str,
        questions: Vec<Question>,
        bands: Vec<Band>,
    ) -> Self {
        let mut question_ids = Vec::with_capacity(questions.len());
        for mut question in questions {
            question.subscale = Some(id.to_string());
            question_ids.push(question.id.clone());
            self.inner.questions.push(question);
        }

        self.inner.subscales.push(Subscale {
            id: id.to_string(),
            name: name.to_string(),
            description: description.to_string(),
            question_ids,
            bands,
        });
        self
    }

    pub fn build(self) -> Instrument {
        self.inner
    }
}

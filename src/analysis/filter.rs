/// Decides whether text should be treated as offensive.
pub trait ContentClassifier: Send + Sync {
    fn classify(&self, text: &str) -> bool;
}

/// Case-insensitive substring match against a fixed block list.
///
/// No word boundaries: "badword1" also matches inside "xbadword12".
pub struct WordListFilter {
    words: Vec<String>,
}

impl WordListFilter {
    pub fn new<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            words: words
                .into_iter()
                .map(|w| w.as_ref().trim().to_lowercase())
                .filter(|w| !w.is_empty())
                .collect(),
        }
    }

    pub fn is_offensive(&self, text: &str) -> bool {
        let lowered = text.to_lowercase();
        self.words.iter().any(|word| lowered.contains(word.as_str()))
    }
}

impl ContentClassifier for WordListFilter {
    fn classify(&self, text: &str) -> bool {
        self.is_offensive(text)
    }
}

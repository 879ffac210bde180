/// One subtitle caption: a time range and the words spoken in it.
#[derive(Clone, Debug, PartialEq)]
pub struct SubtitleSegment {
    pub start_time: f64,
    pub end_time: f64,
    pub text: String,
}

impl SubtitleSegment {
    pub fn duration(&self) -> f64 {
        self.end_time - self.start_time
    }

    /// Space-separated tokens of the caption text.
    ///
    /// A recognized word that itself contains a space (`"New York"`) yields
    /// more than one token, so this can exceed the number of words grouped.
    pub fn words(&self) -> impl Iterator<Item = &str> {
        self.text.split(' ')
    }

    pub fn word_count(&self) -> usize {
        self.words().count()
    }
}

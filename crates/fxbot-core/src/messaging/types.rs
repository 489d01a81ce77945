/// Reply keyboard shown under the input field (currency shortcuts).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReplyKeyboard {
    pub rows: Vec<Vec<String>>,
}

impl ReplyKeyboard {
    /// Lay out `labels` as rows of `per_row` buttons.
    pub fn from_labels(labels: &[String], per_row: usize) -> Self {
        let per_row = per_row.max(1);
        Self {
            rows: labels.chunks(per_row).map(|row| row.to_vec()).collect(),
        }
    }
}

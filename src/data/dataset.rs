use burn::data::dataset::Dataset;

/// One encoded phrase with its sentiment class.
/// `tokens` is already padded to the configured max length.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentimentItem {
    pub tokens: Vec<u32>,
    pub label:  u8,
}

/// Encoded sequences and labels of one labelled split, kept as
/// parallel arrays.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LabeledSplit {
    pub tokens: Vec<Vec<u32>>,
    pub labels: Vec<u8>,
}

impl LabeledSplit {
    pub fn new(tokens: Vec<Vec<u32>>, labels: Vec<u8>) -> Self {
        debug_assert_eq!(tokens.len(), labels.len());
        Self { tokens, labels }
    }

    pub fn len(&self) -> usize { self.labels.len() }

    pub fn is_empty(&self) -> bool { self.labels.is_empty() }

    /// Pair up sequences and labels as Burn dataset items.
    pub fn to_dataset(&self) -> SentimentDataset {
        let items = self
            .tokens
            .iter()
            .zip(&self.labels)
            .map(|(tokens, &label)| SentimentItem { tokens: tokens.clone(), label })
            .collect();
        SentimentDataset::new(items)
    }
}

pub struct SentimentDataset {
    items: Vec<SentimentItem>,
}

impl SentimentDataset {
    pub fn new(items: Vec<SentimentItem>) -> Self { Self { items } }
}

impl Dataset<SentimentItem> for SentimentDataset {
    fn get(&self, index: usize) -> Option<SentimentItem> {
        self.items.get(index).cloned()
    }

    fn len(&self) -> usize {
        self.items.len()
    }
}

// ============================================================
// Layer 4 — Train/Validation Splitter
// ============================================================
// Splits the labelled rows into two sets by position:
//   - Training set:   rows [0, train_rows)
//   - Validation set: rows [train_rows, total)
//
// No shuffling happens here. The split is a pure function of
// the file contents, so every run trains and validates on the
// same rows. Shuffling of training batches is the DataLoader's
// job and does not move rows between the two sets.
//
// If the file holds fewer than `train_rows` rows, everything
// goes to training and the validation set is empty.
//
// Reference: Rust Book §8 (Vectors)

/// Split `rows` into (train, validation) at `train_rows`.
///
/// # Example
/// ```ignore
/// let (train, val) = split_at_row((0..10).collect::<Vec<_>>(), 8);
/// // train = 0..8, val = 8..10
/// ```
pub fn split_at_row<T>(mut rows: Vec<T>, train_rows: usize) -> (Vec<T>, Vec<T>) {
    let total    = rows.len();
    let split_at = train_rows.min(total);

    // split_off(n) leaves [0..n) in `rows` and returns [n..total)
    let validation = rows.split_off(split_at);

    tracing::debug!(
        "Dataset split: {} training, {} validation",
        rows.len(),
        validation.len(),
    );

    (rows, validation)
}

// ============================================================
// Layer 3 — Core Traits (Abstractions)
// ============================================================
// The vocabulary builder and the sequence encoder only need
// "something that turns a phrase into tokens". Putting that
// behind a trait keeps the splitting rule in one place and
// lets tests plug in their own tokenizer.
//
// Implementations:
//   - WhitespaceTokenizer → lower-case, split on single spaces
//
// Reference: Rust Book §10 (Traits: Defining Shared Behaviour)

// ─── Tokenizer ────────────────────────────────────────────────────────────────
/// Any component that can split a phrase into tokens.
pub trait Tokenizer {
    /// Split one phrase into its tokens, in order.
    fn tokenize(&self, phrase: &str) -> Vec<String>;

    /// Tokenize every phrase of a split.
    fn tokenize_all<'a, I>(&self, phrases: I) -> Vec<Vec<String>>
    where
        I: IntoIterator<Item = &'a str>,
    {
        phrases.into_iter().map(|p| self.tokenize(p)).collect()
    }
}

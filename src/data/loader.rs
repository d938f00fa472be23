// ============================================================
// Layer 4 — TSV Loader
// ============================================================
// Reads the two tab-separated input files:
//
//   train.tsv — PhraseId, SentenceId, Phrase, Sentiment
//   test.tsv  — PhraseId, SentenceId, Phrase
//
// Only `Phrase` and `Sentiment` are required from the training
// file. The test file is kept as a raw table so its identifier
// columns can be copied into the submission unchanged.
//
// Quoting is disabled: phrases contain bare `"` characters and
// the files never quote fields.
//
// Reference: csv crate documentation
//            Rust Book §9 (Error Handling)

use anyhow::{ensure, Context, Result};
use csv::{Reader, ReaderBuilder};
use std::{fs::File, io::Read, path::Path};

use crate::domain::phrase::{
    LabeledPhrase, TestTable, PHRASE_COLUMN, SENTENCE_ID_COLUMN, SENTIMENT_CLASSES,
    SENTIMENT_COLUMN,
};

/// Tab-delimited, header row, no quote handling.
fn tsv_reader<R: Read>(reader: R) -> Reader<R> {
    ReaderBuilder::new()
        .delimiter(b'\t')
        .has_headers(true)
        .quoting(false)
        .from_reader(reader)
}

/// Load every labelled row of the training file.
pub fn load_labeled(path: impl AsRef<Path>) -> Result<Vec<LabeledPhrase>> {
    let path = path.as_ref();
    let file = File::open(path)
        .with_context(|| format!("Cannot open labelled data '{}'", path.display()))?;

    let rows = read_labeled(file)
        .with_context(|| format!("Cannot parse labelled data '{}'", path.display()))?;

    tracing::info!("Loaded {} labelled phrases from '{}'", rows.len(), path.display());
    Ok(rows)
}

/// Parse labelled rows from any reader.
pub fn read_labeled<R: Read>(reader: R) -> Result<Vec<LabeledPhrase>> {
    let mut rdr = tsv_reader(reader);

    let headers = rdr.headers().context("Cannot read header row")?.clone();
    for required in [PHRASE_COLUMN, SENTIMENT_COLUMN] {
        ensure!(
            headers.iter().any(|h| h == required),
            "missing required column '{required}'"
        );
    }

    let mut rows = Vec::new();
    for (i, record) in rdr.deserialize::<LabeledPhrase>().enumerate() {
        // +2: one for the header, one for 1-based line numbers
        let line = i + 2;
        let row = record.with_context(|| format!("malformed row on line {line}"))?;
        ensure!(
            (row.sentiment as usize) < SENTIMENT_CLASSES,
            "line {line}: sentiment {} outside 0..{SENTIMENT_CLASSES}",
            row.sentiment
        );
        rows.push(row);
    }

    Ok(rows)
}

/// Load the unlabelled test file as a table.
pub fn load_test(path: impl AsRef<Path>) -> Result<TestTable> {
    let path = path.as_ref();
    let file = File::open(path)
        .with_context(|| format!("Cannot open test data '{}'", path.display()))?;

    let table = read_test(file)
        .with_context(|| format!("Cannot parse test data '{}'", path.display()))?;

    tracing::info!("Loaded {} test phrases from '{}'", table.len(), path.display());
    Ok(table)
}

/// Parse the test table from any reader.
pub fn read_test<R: Read>(reader: R) -> Result<TestTable> {
    let mut rdr = tsv_reader(reader);

    let headers: Vec<String> = rdr
        .headers()
        .context("Cannot read header row")?
        .iter()
        .map(str::to_string)
        .collect();

    let phrase_column = headers
        .iter()
        .position(|h| h == PHRASE_COLUMN)
        .with_context(|| format!("missing required column '{PHRASE_COLUMN}'"))?;
    ensure!(
        headers.iter().any(|h| h == SENTENCE_ID_COLUMN),
        "missing required column '{SENTENCE_ID_COLUMN}'"
    );

    let mut rows = Vec::new();
    for (i, record) in rdr.records().enumerate() {
        let record = record.with_context(|| format!("malformed row on line {}", i + 2))?;
        rows.push(record.iter().map(str::to_string).collect());
    }

    Ok(TestTable { headers, rows, phrase_column })
}

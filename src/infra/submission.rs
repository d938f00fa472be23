// ============================================================
// Layer 6 — Submission Writer
// ============================================================
// Writes the test predictions as a comma-separated file.
//
// Output columns:
//   every test column except SentenceId and Phrase, in their
//   original order, followed by Sentiment.
//
// For the standard test file that is just:
//   PhraseId,Sentiment
//   156061,2
//   156062,3
//   ...
//
// If the test table already carries a Sentiment column its
// values are overwritten in place instead of adding a second one.
//
// Reference: csv crate documentation

use anyhow::{ensure, Context, Result};
use csv::Writer;
use std::{fs, io::Write, path::Path};

use crate::domain::phrase::{TestTable, PHRASE_COLUMN, SENTENCE_ID_COLUMN, SENTIMENT_COLUMN};

/// Write predictions for `table` to a CSV file at `path`.
pub fn write_submission(
    path:        impl AsRef<Path>,
    table:       &TestTable,
    predictions: &[u8],
) -> Result<()> {
    let path = path.as_ref();
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        fs::create_dir_all(dir).with_context(|| format!("Cannot create '{}'", dir.display()))?;
    }

    let file = fs::File::create(path)
        .with_context(|| format!("Cannot create submission '{}'", path.display()))?;
    write_submission_to(file, table, predictions)
        .with_context(|| format!("Cannot write submission '{}'", path.display()))?;

    tracing::info!("Wrote {} predictions to '{}'", predictions.len(), path.display());
    Ok(())
}

/// Same as [`write_submission`] over any writer.
pub fn write_submission_to<W: Write>(
    writer:      W,
    table:       &TestTable,
    predictions: &[u8],
) -> Result<()> {
    ensure!(
        predictions.len() == table.len(),
        "{} predictions for {} test rows",
        predictions.len(),
        table.len()
    );

    let kept: Vec<usize> = table
        .headers
        .iter()
        .enumerate()
        .filter(|(_, h)| *h != SENTENCE_ID_COLUMN && *h != PHRASE_COLUMN)
        .map(|(i, _)| i)
        .collect();
    let sentiment_at = kept.iter().position(|&i| table.headers[i] == SENTIMENT_COLUMN);

    let mut wtr = Writer::from_writer(writer);

    let mut header: Vec<&str> = kept.iter().map(|&i| table.headers[i].as_str()).collect();
    if sentiment_at.is_none() {
        header.push(SENTIMENT_COLUMN);
    }
    wtr.write_record(&header)?;

    for (row, prediction) in table.rows.iter().zip(predictions) {
        let label = prediction.to_string();
        let mut record: Vec<&str> = kept
            .iter()
            .map(|&i| row.get(i).map(String::as_str).unwrap_or(""))
            .collect();
        match sentiment_at {
            Some(pos) => record[pos] = &label,
            None      => record.push(&label),
        }
        wtr.write_record(&record)?;
    }

    wtr.flush()?;
    Ok(())
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    fn table(headers: &[&str], rows: &[&[&str]]) -> TestTable {
        let headers: Vec<String> = headers.iter().map(|h| h.to_string()).collect();
        let phrase_column = headers.iter().position(|h| h == "Phrase").unwrap();
        TestTable {
            headers,
            rows: rows.iter().map(|r| r.iter().map(|v| v.to_string()).collect()).collect(),
            phrase_column,
        }
    }

    fn render(table: &TestTable, predictions: &[u8]) -> String {
        let mut out = Vec::new();
        write_submission_to(&mut out, table, predictions).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_drops_sentence_id_and_phrase() {
        let t = table(
            &["PhraseId", "SentenceId", "Phrase"],
            &[&["156061", "8545", "An intermittently pleasing"], &["156062", "8545", "An"]],
        );
        assert_eq!(render(&t, &[3, 2]), "PhraseId,Sentiment\n156061,3\n156062,2\n");
    }

    #[test]
    fn test_keeps_extra_identifier_columns_in_order() {
        let t = table(
            &["Split", "PhraseId", "SentenceId", "Phrase"],
            &[&["a", "1", "1", "good, really"]],
        );
        assert_eq!(render(&t, &[4]), "Split,PhraseId,Sentiment\na,1,4\n");
    }

    #[test]
    fn test_existing_sentiment_column_is_overwritten() {
        let t = table(
            &["PhraseId", "Sentiment", "SentenceId", "Phrase"],
            &[&["1", "", "1", "good"]],
        );
        assert_eq!(render(&t, &[1]), "PhraseId,Sentiment\n1,1\n");
    }

    #[test]
    fn test_prediction_count_must_match() {
        let t = table(&["PhraseId", "SentenceId", "Phrase"], &[&["1", "1", "good"]]);
        let mut out = Vec::new();
        assert!(write_submission_to(&mut out, &t, &[1, 2]).is_err());
    }

    #[test]
    fn test_writes_file_and_creates_parent() {
        let dir  = tempfile::tempdir().unwrap();
        let path = dir.path().join("out").join("submission.csv");
        let t    = table(&["PhraseId", "SentenceId", "Phrase"], &[&["7", "1", "good"]]);
        write_submission(&path, &t, &[0]).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "PhraseId,Sentiment\n7,0\n");
    }
}

//! Data loading for tab-separated sentiment datasets.

use std::fs::File;
use std::io::{BufRead, BufReader, ErrorKind};
use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};

use oorandom::Rand64;
use sentio_core::{DatasetSplit, LabeledExample, Result, SentioError};

/// Default share of examples held out for evaluation.
pub const DEFAULT_TEST_FRACTION: f64 = 0.2;

/// Load a dataset with one `text<TAB>label` example per line and no header.
///
/// The label is `0`/`1` or `false`/`true`. Blank lines are skipped. Each row
/// holds exactly one tab; text containing a tab is rejected.
///
/// # Errors
///
/// * `SentioError::FileNotFound` if `path` does not exist.
/// * `SentioError::DataFormat` for the first row that cannot be parsed,
///   including rows that are not valid UTF-8.
pub fn load_labeled_dataset<P: AsRef<Path>>(path: P) -> Result<Vec<LabeledExample>> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => SentioError::FileNotFound {
            path: path.to_path_buf(),
        },
        _ => SentioError::Io(e),
    })?;
    let reader = BufReader::new(file);

    let mut examples = Vec::new();
    for (idx, raw) in reader.split(b'\n').enumerate() {
        let line = String::from_utf8(raw?).map_err(|_| SentioError::DataFormat {
            line: idx + 1,
            reason: "invalid UTF-8".into(),
        })?;
        if line.trim().is_empty() {
            continue;
        }
        examples.push(parse_row(&line, idx + 1)?);
    }

    tracing::info!(
        path = %path.display(),
        examples = examples.len(),
        "Loaded labeled dataset"
    );
    Ok(examples)
}

fn parse_row(line: &str, line_no: usize) -> Result<LabeledExample> {
    let malformed = |reason: String| SentioError::DataFormat {
        line: line_no,
        reason,
    };

    let line = line.trim_end_matches(['\r', '\n']);
    let (text, label) = line
        .split_once('\t')
        .ok_or_else(|| malformed("expected `text<TAB>label`".into()))?;
    if label.contains('\t') {
        return Err(malformed(format!(
            "expected 2 tab-separated fields, found {}",
            line.matches('\t').count() + 1
        )));
    }

    let text = text.trim();
    if text.is_empty() {
        return Err(malformed("text field is empty".into()));
    }

    let label = parse_label(label.trim())
        .ok_or_else(|| malformed(format!("unrecognized label {:?}", label.trim())))?;

    Ok(LabeledExample::new(text, label))
}

fn parse_label(raw: &str) -> Option<bool> {
    match raw {
        "1" => Some(true),
        "0" => Some(false),
        _ if raw.eq_ignore_ascii_case("true") => Some(true),
        _ if raw.eq_ignore_ascii_case("false") => Some(false),
        _ => None,
    }
}

/// Shuffle `examples` and partition them into train/test.
///
/// The test side receives `round(len * test_fraction)` examples. With a
/// `seed` the partition is reproducible; without one it is seeded from the
/// clock and differs between calls.
///
/// # Errors
///
/// Returns `SentioError::InvalidInput` if `test_fraction` is not in `[0, 1]`.
pub fn split_dataset(
    mut examples: Vec<LabeledExample>,
    test_fraction: f64,
    seed: Option<u64>,
) -> Result<DatasetSplit> {
    if !(0.0..=1.0).contains(&test_fraction) {
        return Err(SentioError::InvalidInput(format!(
            "test fraction must be within [0, 1], got {test_fraction}"
        )));
    }

    let mut rng = rng_from_seed(seed);
    shuffle(&mut examples, &mut rng);

    let total = examples.len();
    let test_len = ((total as f64) * test_fraction).round() as usize;
    let test = examples.split_off(total - test_len.min(total));

    tracing::debug!(
        train = examples.len(),
        test = test.len(),
        seeded = seed.is_some(),
        "Dataset split"
    );

    Ok(DatasetSplit {
        train: examples,
        test,
    })
}

/// Seeded generator, or a clock-seeded one when no seed is configured.
pub(crate) fn rng_from_seed(seed: Option<u64>) -> Rand64 {
    let seed = seed.unwrap_or_else(|| {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or_default()
    });
    Rand64::new(u128::from(seed))
}

/// Fisher-Yates shuffle.
pub(crate) fn shuffle<T>(items: &mut [T], rng: &mut Rand64) {
    for i in (1..items.len()).rev() {
        let j = rng.rand_range(0..(i as u64 + 1)) as usize;
        items.swap(i, j);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_dataset(contents: &str) -> NamedTempFile {
        let mut f = NamedTempFile::new().unwrap();
        f.write_all(contents.as_bytes()).unwrap();
        f
    }

    fn numbered(n: usize) -> Vec<LabeledExample> {
        (0..n)
            .map(|i| LabeledExample::new(format!("review {i}"), i % 2 == 0))
            .collect()
    }

    #[test]
    fn test_load_dataset() {
        let f = write_dataset("Wow... Loved this place.\t1\nCrust is not good.\t0\n\nGreat\ttrue\r\n");
        let examples = load_labeled_dataset(f.path()).unwrap();
        assert_eq!(examples.len(), 3);
        assert_eq!(examples[0], LabeledExample::new("Wow... Loved this place.", true));
        assert!(!examples[1].label);
        assert!(examples[2].label);
    }

    #[test]
    fn test_load_missing_file() {
        let result = load_labeled_dataset("/nonexistent/yelp_labelled.txt");
        assert!(matches!(result, Err(SentioError::FileNotFound { .. })));
    }

    #[test]
    fn test_load_row_without_tab() {
        let f = write_dataset("Good food\t1\nno label here\n");
        match load_labeled_dataset(f.path()) {
            Err(SentioError::DataFormat { line, .. }) => assert_eq!(line, 2),
            other => panic!("expected DataFormat, got {other:?}"),
        }
    }

    #[test]
    fn test_load_invalid_utf8() {
        let mut f = NamedTempFile::new().unwrap();
        f.write_all(b"Good food\t1\nCaf\xe9 was bad\t0\n").unwrap();
        match load_labeled_dataset(f.path()) {
            Err(SentioError::DataFormat { line, reason }) => {
                assert_eq!(line, 2);
                assert!(reason.contains("UTF-8"));
            }
            other => panic!("expected DataFormat, got {other:?}"),
        }
    }

    #[test]
    fn test_load_row_with_extra_field() {
        let f = write_dataset("Good food\t1\nGood\tfood\t1\n");
        match load_labeled_dataset(f.path()) {
            Err(SentioError::DataFormat { line, reason }) => {
                assert_eq!(line, 2);
                assert!(reason.contains("found 3"));
            }
            other => panic!("expected DataFormat, got {other:?}"),
        }
    }

    #[test]
    fn test_load_bad_label() {
        let f = write_dataset("Good food\tmaybe\n");
        assert!(matches!(
            load_labeled_dataset(f.path()),
            Err(SentioError::DataFormat { line: 1, .. })
        ));
    }

    #[test]
    fn test_load_empty_text() {
        let f = write_dataset("  \t1\n");
        assert!(matches!(
            load_labeled_dataset(f.path()),
            Err(SentioError::DataFormat { .. })
        ));
    }

    #[test]
    fn test_split_sizes() {
        let split = split_dataset(numbered(1000), 0.2, Some(7)).unwrap();
        assert_eq!(split.test.len(), 200);
        assert_eq!(split.train.len(), 800);
    }

    #[test]
    fn test_split_rounds_test_size() {
        let split = split_dataset(numbered(13), 0.2, Some(1)).unwrap();
        // 13 * 0.2 = 2.6
        assert_eq!(split.test.len(), 3);
        assert_eq!(split.len(), 13);
    }

    #[test]
    fn test_split_preserves_all_examples() {
        let split = split_dataset(numbered(50), 0.3, None).unwrap();
        let mut texts: Vec<_> = split
            .train
            .iter()
            .chain(&split.test)
            .map(|e| e.text.clone())
            .collect();
        texts.sort();
        let mut expected: Vec<_> = numbered(50).into_iter().map(|e| e.text).collect();
        expected.sort();
        assert_eq!(texts, expected);
    }

    #[test]
    fn test_split_is_reproducible_with_seed() {
        let a = split_dataset(numbered(100), 0.2, Some(42)).unwrap();
        let b = split_dataset(numbered(100), 0.2, Some(42)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_split_edge_fractions() {
        let all_train = split_dataset(numbered(10), 0.0, Some(3)).unwrap();
        assert!(all_train.test.is_empty());

        let all_test = split_dataset(numbered(10), 1.0, Some(3)).unwrap();
        assert!(all_test.train.is_empty());

        let empty = split_dataset(Vec::new(), 0.2, Some(3)).unwrap();
        assert!(empty.is_empty());
    }

    #[test]
    fn test_split_rejects_bad_fraction() {
        assert!(split_dataset(numbered(10), 1.5, None).is_err());
        assert!(split_dataset(numbered(10), f64::NAN, None).is_err());
    }
}

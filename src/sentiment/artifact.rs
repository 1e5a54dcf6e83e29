//! Persistence for the fitted vectorizer/classifier pair.
//!
//! Artifacts live at well-known, versionless paths inside a model
//! directory: `vectorizer.bin` and `classifier.bin`. Each file is a bincode
//! envelope carrying a magic tag, a format version, the artifact kind, the
//! pair id minted for the training run, a CRC32 checksum of the payload,
//! and the payload itself. The envelope makes the files self-describing
//! enough to detect truncation, corruption, and mismatched pairs at load
//! time, which is where those failures must surface — never at first
//! prediction.
//!
//! A later training run silently overwrites the pair in place; there is no
//! versioning or rollback, last writer wins.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use log::info;
use serde::{Deserialize, Serialize};
use serde::de::DeserializeOwned;
use uuid::Uuid;

use crate::error::{Result, SentiraError};
use crate::sentiment::classifier::LogisticRegression;
use crate::sentiment::vectorizer::TfIdfVectorizer;

/// File name of the persisted vectorizer.
pub const VECTORIZER_FILE: &str = "vectorizer.bin";
/// File name of the persisted classifier.
pub const CLASSIFIER_FILE: &str = "classifier.bin";

const MAGIC: [u8; 4] = *b"SNTR";
const FORMAT_VERSION: u32 = 1;

/// What a persisted artifact contains.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ArtifactKind {
    /// A fitted TF-IDF vectorizer.
    Vectorizer,
    /// A trained logistic-regression classifier.
    Classifier,
}

impl std::fmt::Display for ArtifactKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ArtifactKind::Vectorizer => f.write_str("vectorizer"),
            ArtifactKind::Classifier => f.write_str("classifier"),
        }
    }
}

#[derive(Serialize, Deserialize)]
struct Envelope {
    magic: [u8; 4],
    format_version: u32,
    kind: ArtifactKind,
    pair_id: Uuid,
    created_at: DateTime<Utc>,
    checksum: u32,
    body: Vec<u8>,
}

/// Persist a fitted vectorizer/classifier pair to `dir`.
///
/// One pair id is minted for both files, and each file is written through a
/// temporary sibling and renamed into place, so an interrupted run never
/// leaves a partial artifact behind.
pub fn save_pair<P: AsRef<Path>>(
    dir: P,
    vectorizer: &TfIdfVectorizer,
    classifier: &LogisticRegression,
) -> Result<Uuid> {
    if classifier.dimension() != vectorizer.dimension() {
        return Err(SentiraError::invalid_operation(format!(
            "classifier dimension {} does not match vectorizer dimension {}",
            classifier.dimension(),
            vectorizer.dimension()
        )));
    }

    let dir = dir.as_ref();
    fs::create_dir_all(dir)?;

    let pair_id = Uuid::new_v4();
    write_artifact(
        &dir.join(VECTORIZER_FILE),
        ArtifactKind::Vectorizer,
        pair_id,
        vectorizer,
    )?;
    write_artifact(
        &dir.join(CLASSIFIER_FILE),
        ArtifactKind::Classifier,
        pair_id,
        classifier,
    )?;

    info!("saved artifact pair {pair_id} to {}", dir.display());
    Ok(pair_id)
}

/// Load and validate the artifact pair stored in `dir`.
///
/// Fails when either file is missing, corrupt, of the wrong kind or format
/// version, when the two files come from different training runs, or when
/// the classifier's weight dimension does not match the vectorizer's
/// vocabulary size.
pub fn load_pair<P: AsRef<Path>>(dir: P) -> Result<(TfIdfVectorizer, LogisticRegression)> {
    let dir = dir.as_ref();

    let (vectorizer_pair, vectorizer): (Uuid, TfIdfVectorizer) =
        read_artifact(&dir.join(VECTORIZER_FILE), ArtifactKind::Vectorizer)?;
    let (classifier_pair, classifier): (Uuid, LogisticRegression) =
        read_artifact(&dir.join(CLASSIFIER_FILE), ArtifactKind::Classifier)?;

    if vectorizer_pair != classifier_pair {
        return Err(SentiraError::model(format!(
            "artifact pair mismatch: vectorizer from run {vectorizer_pair}, classifier from run {classifier_pair}"
        )));
    }
    if classifier.dimension() != vectorizer.dimension() {
        return Err(SentiraError::model(format!(
            "artifact dimension mismatch: classifier expects {} features, vectorizer produces {}",
            classifier.dimension(),
            vectorizer.dimension()
        )));
    }

    Ok((vectorizer, classifier))
}

fn write_artifact<T: Serialize>(
    path: &Path,
    kind: ArtifactKind,
    pair_id: Uuid,
    artifact: &T,
) -> Result<()> {
    let body = bincode::serialize(artifact)
        .map_err(|e| SentiraError::model(format!("failed to encode {kind} artifact: {e}")))?;
    let envelope = Envelope {
        magic: MAGIC,
        format_version: FORMAT_VERSION,
        kind,
        pair_id,
        created_at: Utc::now(),
        checksum: crc32fast::hash(&body),
        body,
    };
    let bytes = bincode::serialize(&envelope)
        .map_err(|e| SentiraError::model(format!("failed to encode {kind} envelope: {e}")))?;

    let tmp = temp_sibling(path);
    fs::write(&tmp, &bytes)?;
    if let Err(e) = fs::rename(&tmp, path) {
        let _ = fs::remove_file(&tmp);
        return Err(e.into());
    }
    Ok(())
}

fn read_artifact<T: DeserializeOwned>(path: &Path, expected: ArtifactKind) -> Result<(Uuid, T)> {
    let bytes = fs::read(path).map_err(|e| {
        SentiraError::model(format!(
            "failed to read {expected} artifact {}: {e}",
            path.display()
        ))
    })?;

    let envelope: Envelope = bincode::deserialize(&bytes).map_err(|e| {
        SentiraError::model(format!(
            "corrupt {expected} artifact {}: {e}",
            path.display()
        ))
    })?;

    if envelope.magic != MAGIC {
        return Err(SentiraError::model(format!(
            "{} is not a sentira artifact",
            path.display()
        )));
    }
    if envelope.format_version != FORMAT_VERSION {
        return Err(SentiraError::model(format!(
            "{} uses unsupported artifact format version {}",
            path.display(),
            envelope.format_version
        )));
    }
    if envelope.kind != expected {
        return Err(SentiraError::model(format!(
            "{} holds a {} artifact, expected {expected}",
            path.display(),
            envelope.kind
        )));
    }
    if crc32fast::hash(&envelope.body) != envelope.checksum {
        return Err(SentiraError::model(format!(
            "checksum mismatch in {}, artifact is corrupt",
            path.display()
        )));
    }

    let artifact = bincode::deserialize(&envelope.body).map_err(|e| {
        SentiraError::model(format!(
            "corrupt {expected} artifact payload {}: {e}",
            path.display()
        ))
    })?;

    Ok((envelope.pair_id, artifact))
}

fn temp_sibling(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "artifact".to_string());
    name.push_str(".tmp");
    path.with_file_name(name)
}

//! Export and import of a whole account's credentials.
//!
//! Export encrypts the decrypted credential set with the current
//! account's key.  Import reverses that and hands duplicates back to the
//! caller as `Conflict`s instead of overwriting anything; the caller
//! settles them with `resolve_conflicts` or by calling
//! `CredentialRepository::update` directly.

use chrono::Utc;
use serde_json::Value;
use tracing::{debug, info};
use zeroize::Zeroizing;

use super::bundle::{ExportBundle, ExportPayload, FORMAT_TAG, PAYLOAD_VERSION};
use crate::crypto::{decrypt, encrypt};
use crate::errors::{Result, SecretBookError};
use crate::vault::{CredentialEntry, CredentialRecord, CredentialRepository};

/// Fields an incoming entry must carry to be considered at all.
const REQUIRED_FIELDS: [&str; 3] = ["website", "username", "password"];

/// How an import treats the account's existing credentials.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImportMode {
    /// Keep existing credentials and add the incoming ones.
    Merge,
    /// Delete every existing credential first.
    Replace,
}

/// An incoming credential that collides with one already stored.
#[derive(Debug, Clone)]
pub struct Conflict {
    pub incoming: CredentialRecord,
    pub existing: CredentialEntry,
}

/// Outcome of `import_bundle`.
#[derive(Debug, Clone, Default)]
pub struct ImportReport {
    /// Credentials written during the import.
    pub imported_count: usize,
    /// Duplicates left for the caller to resolve.
    pub conflicts: Vec<Conflict>,
}

/// A caller's answer for one conflict.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    /// Replace the existing credential with the incoming one.
    Overwrite,
    /// Keep the existing credential.
    Skip,
    /// Overwrite this and every remaining conflict.
    OverwriteAll,
    /// Skip this and every remaining conflict.
    SkipAll,
}

/// Encrypt every readable credential of the current account into a
/// bundle.
pub fn export_all(repo: &CredentialRepository) -> Result<ExportBundle> {
    let account = repo
        .current_account()
        .ok_or(SecretBookError::NotLoggedIn)?
        .to_string();

    let credentials: Vec<CredentialRecord> = repo
        .list_credentials()?
        .into_iter()
        .map(|entry| entry.record)
        .collect();

    let payload = ExportPayload {
        version: PAYLOAD_VERSION.to_string(),
        exported_at: Utc::now(),
        account,
        credentials,
    };
    let json = Zeroizing::new(
        serde_json::to_vec(&payload)
            .map_err(|e| SecretBookError::SerializationError(format!("export payload: {e}")))?,
    );

    let token = encrypt(repo.key()?, &json)?;
    info!(count = payload.credentials.len(), "exported credentials");
    Ok(ExportBundle::new(token))
}

/// Import a bundle into the current account.
///
/// Nothing is written until the bundle has passed the format, decryption
/// and payload checks.  In `Replace` mode the existing credentials are
/// then removed; the core asks for no confirmation.
pub fn import_bundle(
    repo: &CredentialRepository,
    bundle: &ExportBundle,
    mode: ImportMode,
) -> Result<ImportReport> {
    if bundle.format != FORMAT_TAG {
        return Err(SecretBookError::UnsupportedFormat(format!(
            "expected '{FORMAT_TAG}', found '{}'",
            bundle.format
        )));
    }

    let plaintext = Zeroizing::new(decrypt(repo.key()?, &bundle.ciphertext)?);
    let incoming = parse_payload(&plaintext)?;

    if mode == ImportMode::Replace {
        repo.clear()?;
    }

    let mut report = ImportReport::default();
    for item in incoming {
        let Some(record) = to_record(item) else {
            debug!("skipping incoming entry without required fields");
            continue;
        };

        match repo.find_duplicate(&record.website, &record.username, None)? {
            Some(existing) => report.conflicts.push(Conflict {
                incoming: record,
                existing,
            }),
            None => {
                repo.save(&record, true)?;
                report.imported_count += 1;
            }
        }
    }

    info!(
        imported = report.imported_count,
        conflicts = report.conflicts.len(),
        ?mode,
        "imported bundle"
    );
    Ok(report)
}

/// Walk `conflicts` in order, asking `decide` what to do with each.
///
/// `decide` receives the conflict, its zero-based position and the total
/// count.  An `OverwriteAll` or `SkipAll` answer settles the current
/// conflict and every one after it without further calls.  Returns the
/// number of credentials overwritten.
pub fn resolve_conflicts<F>(
    repo: &CredentialRepository,
    conflicts: &[Conflict],
    mut decide: F,
) -> Result<usize>
where
    F: FnMut(&Conflict, usize, usize) -> Result<Resolution>,
{
    let total = conflicts.len();
    let mut overwritten = 0;

    for (index, conflict) in conflicts.iter().enumerate() {
        match decide(conflict, index, total)? {
            Resolution::Overwrite => {
                overwrite(repo, conflict)?;
                overwritten += 1;
            }
            Resolution::Skip => {}
            Resolution::OverwriteAll => {
                for remaining in &conflicts[index..] {
                    overwrite(repo, remaining)?;
                    overwritten += 1;
                }
                break;
            }
            Resolution::SkipAll => break,
        }
    }

    Ok(overwritten)
}

fn overwrite(repo: &CredentialRepository, conflict: &Conflict) -> Result<()> {
    repo.update(conflict.existing.id, &conflict.incoming, true)
}

/// Pull the `passwords` array out of a decrypted payload.
fn parse_payload(plaintext: &[u8]) -> Result<Vec<Value>> {
    let document: Value = serde_json::from_slice(plaintext)
        .map_err(|e| SecretBookError::MalformedPayload(format!("invalid JSON: {e}")))?;

    match document {
        Value::Object(mut map) => match map.remove("passwords") {
            Some(Value::Array(items)) => Ok(items),
            Some(_) => Err(SecretBookError::MalformedPayload(
                "'passwords' is not a list".into(),
            )),
            None => Err(SecretBookError::MalformedPayload(
                "missing 'passwords' list".into(),
            )),
        },
        _ => Err(SecretBookError::MalformedPayload(
            "payload is not an object".into(),
        )),
    }
}

/// Convert one incoming entry, or `None` if it should be skipped.
fn to_record(item: Value) -> Option<CredentialRecord> {
    let object = item.as_object()?;
    if !REQUIRED_FIELDS.iter().all(|field| object.contains_key(*field)) {
        return None;
    }
    serde_json::from_value(item).ok()
}

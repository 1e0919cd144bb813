//! The PDF library seam.
//!
//! The batch only needs one operation from the PDF side: open a file, unlock
//! it with a candidate owner password and write the unprotected copy. The
//! [`Decryptor`] trait is that operation; [`LopdfDecryptor`] backs it with
//! lopdf.

use std::fs;
use std::path::Path;

use lopdf::Document;
use lopdf::Error as LopdfError;
use lopdf::encryption::DecryptionError;
use thiserror::Error;

/// Why a single decrypt attempt did not succeed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecryptError {
    #[error("file is not encrypted")]
    NotEncrypted,
    #[error("incorrect password")]
    IncorrectPassword,
    #[error("{0}")]
    Other(String),
}

/// Message for documents that need their user password to be read.
pub const USER_PASSWORD_REQUIRED: &str =
    "owner password accepted but the document also needs its user password to be opened";

/// Unlocks one PDF with one candidate owner password.
pub trait Decryptor {
    /// Decrypts `input` with `owner_password` and writes the result to `output`.
    ///
    /// Nothing is written on error.
    fn decrypt(&self, input: &Path, output: &Path, owner_password: &str)
    -> Result<(), DecryptError>;
}

impl<D: Decryptor + ?Sized> Decryptor for &D {
    fn decrypt(
        &self,
        input: &Path,
        output: &Path,
        owner_password: &str,
    ) -> Result<(), DecryptError> {
        (**self).decrypt(input, output, owner_password)
    }
}

/// [`Decryptor`] backed by lopdf.
#[derive(Debug, Default, Clone, Copy)]
pub struct LopdfDecryptor;

impl LopdfDecryptor {
    /// Creates the lopdf-backed decryptor.
    pub fn new() -> Self {
        Self
    }
}

impl Decryptor for LopdfDecryptor {
    fn decrypt(
        &self,
        input: &Path,
        output: &Path,
        owner_password: &str,
    ) -> Result<(), DecryptError> {
        let mut doc = Document::load(input).map_err(classify)?;

        if doc.encryption_state.is_none() && !doc.is_encrypted() {
            return Err(DecryptError::NotEncrypted);
        }

        // Candidates are only ever checked against the owner entry; a
        // matching user password does not count.
        doc.authenticate_owner_password(owner_password)
            .map_err(classify)?;

        if doc.encryption_state.is_some() {
            // Opened on load with the empty user password: the objects are
            // already plain, only the encryption bookkeeping is left to drop.
            doc.trailer.remove(b"Encrypt");
            doc.encryption_state = None;
        } else if doc.authenticate_user_password(owner_password).is_ok() {
            doc.decrypt(owner_password).map_err(classify)?;
        } else {
            return Err(DecryptError::Other(USER_PASSWORD_REQUIRED.to_string()));
        }

        if let Err(err) = doc.save(output) {
            let _ = fs::remove_file(output);
            return Err(classify(LopdfError::IO(err)));
        }
        Ok(())
    }
}

fn classify(err: LopdfError) -> DecryptError {
    match err {
        LopdfError::Decryption(DecryptionError::IncorrectPassword) => {
            DecryptError::IncorrectPassword
        }
        other => {
            // Several lopdf variants carry an empty display message.
            let message = other.to_string();
            if message.is_empty() {
                DecryptError::Other(format!("{other:?}"))
            } else {
                DecryptError::Other(message)
            }
        }
    }
}

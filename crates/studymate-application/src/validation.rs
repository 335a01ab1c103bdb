//! Input checks run before an action is dispatched.
//!
//! A failure here never reaches the network; the caller raises a warning.

use std::path::Path;

use studymate_core::artifact::QuizSubmission;
use studymate_core::backend::{Credentials, FederatedCredential, Registration, UploadRequest};
use studymate_core::error::{Result, StudyMateError};

/// File types the upload picker accepts.
pub const ACCEPTED_EXTENSIONS: &[&str] = &["pdf", "doc", "docx", "txt", "jpg", "jpeg", "png"];

pub fn validate_upload(request: &UploadRequest) -> Result<()> {
    if request.filename.trim().is_empty() {
        return Err(StudyMateError::validation("Please select a file to upload"));
    }
    if request.bytes.is_empty() {
        return Err(StudyMateError::validation("The selected file is empty"));
    }

    let extension = Path::new(&request.filename)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase);
    match extension {
        Some(ext) if ACCEPTED_EXTENSIONS.contains(&ext.as_str()) => Ok(()),
        _ => Err(StudyMateError::validation(format!(
            "Unsupported file type. Accepted: {}",
            ACCEPTED_EXTENSIONS.join(", ")
        ))),
    }
}

pub fn validate_question(question: &str) -> Result<()> {
    if question.trim().is_empty() {
        return Err(StudyMateError::validation("Please enter a question"));
    }
    Ok(())
}

fn validate_email(email: &str) -> Result<()> {
    let email = email.trim();
    let well_formed = email
        .split_once('@')
        .is_some_and(|(local, domain)| !local.is_empty() && !domain.is_empty());
    if !well_formed {
        return Err(StudyMateError::validation("Please enter a valid email address"));
    }
    Ok(())
}

pub fn validate_credentials(credentials: &Credentials) -> Result<()> {
    validate_email(&credentials.email)?;
    if credentials.password.is_empty() {
        return Err(StudyMateError::validation("Please enter your password"));
    }
    Ok(())
}

pub fn validate_registration(registration: &Registration) -> Result<()> {
    if registration.name.trim().is_empty() {
        return Err(StudyMateError::validation("Please enter your name"));
    }
    validate_email(&registration.email)?;
    if registration.password.is_empty() {
        return Err(StudyMateError::validation("Please choose a password"));
    }
    Ok(())
}

pub fn validate_federated(credential: &FederatedCredential) -> Result<()> {
    if credential.is_blank() {
        return Err(StudyMateError::validation("Google sign-in returned no credential"));
    }
    Ok(())
}

pub fn validate_submission(submission: &QuizSubmission) -> Result<()> {
    if submission.is_empty() {
        return Err(StudyMateError::validation(
            "Answer at least one question before submitting",
        ));
    }
    Ok(())
}

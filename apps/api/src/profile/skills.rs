//! Skill list editing and résumé-based skill suggestions.

use bytes::Bytes;
use tracing::warn;

use crate::errors::AppError;

/// Trims every skill, drops blanks and exact duplicates. First occurrence wins.
pub fn normalize_skills(skills: &[String]) -> Vec<String> {
    let mut normalized: Vec<String> = Vec::with_capacity(skills.len());
    for skill in skills {
        let skill = skill.trim();
        if !skill.is_empty() && !normalized.iter().any(|s| s == skill) {
            normalized.push(skill.to_string());
        }
    }
    normalized
}

/// Appends `skill` to the list. Returns `Ok(None)` when it is already present.
pub fn add_skill(current: &[String], skill: &str) -> Result<Option<Vec<String>>, AppError> {
    let skill = skill.trim();
    if skill.is_empty() {
        return Err(AppError::Validation("skill cannot be empty".to_string()));
    }
    if current.iter().any(|s| s == skill) {
        return Ok(None);
    }
    let mut updated = current.to_vec();
    updated.push(skill.to_string());
    Ok(Some(updated))
}

/// Removes every exact occurrence of `skill`.
pub fn remove_skill(current: &[String], skill: &str) -> Vec<String> {
    current.iter().filter(|s| *s != skill).cloned().collect()
}

/// Plain text of an uploaded résumé. PDFs are run through the text extractor;
/// anything else is read as (lossy) UTF-8.
pub fn extract_resume_text(
    bytes: &[u8],
    content_type: Option<&str>,
    file_name: &str,
) -> Result<String, AppError> {
    let is_pdf = content_type == Some("application/pdf")
        || file_name.to_ascii_lowercase().ends_with(".pdf")
        || bytes.starts_with(b"%PDF");

    if is_pdf {
        pdf_extract::extract_text_from_mem(bytes)
            .map_err(|e| AppError::Validation(format!("could not read PDF résumé: {e}")))
    } else {
        Ok(String::from_utf8_lossy(bytes).into_owned())
    }
}

/// Résumé text for skill suggestions, extracted off the async runtime.
/// The document is already stored when this runs, so an unreadable file or a
/// panicking PDF parser yields empty text instead of an error.
pub async fn resume_text_or_empty(
    bytes: Bytes,
    content_type: Option<String>,
    file_name: String,
) -> String {
    let extracted = tokio::task::spawn_blocking(move || {
        extract_resume_text(&bytes, content_type.as_deref(), &file_name)
    })
    .await;

    match extracted {
        Ok(Ok(text)) => text,
        Ok(Err(e)) => {
            warn!("Skipping résumé skill suggestions: {e}");
            String::new()
        }
        Err(e) => {
            warn!("Résumé text extraction task failed: {e}");
            String::new()
        }
    }
}

/// Catalog skills that appear as whole words in `text` (case-insensitive)
/// and are not already on the profile. Catalog order is preserved.
pub fn suggest_skills(text: &str, catalog: &[String], existing: &[String]) -> Vec<String> {
    let text = text.to_lowercase();
    let existing: Vec<String> = existing.iter().map(|s| s.to_lowercase()).collect();
    let mut suggested: Vec<String> = Vec::new();

    for name in catalog {
        let needle = name.trim().to_lowercase();
        if needle.is_empty()
            || existing.contains(&needle)
            || suggested.iter().any(|s| s.to_lowercase() == needle)
        {
            continue;
        }
        if contains_word(&text, &needle) {
            suggested.push(name.trim().to_string());
        }
    }
    suggested
}

fn contains_word(text: &str, needle: &str) -> bool {
    text.match_indices(needle).any(|(start, _)| {
        let before = text[..start].chars().next_back();
        let after = text[start + needle.len()..].chars().next();
        !before.is_some_and(is_word_char) && !after.is_some_and(is_word_char)
    })
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '+' || c == '#'
}

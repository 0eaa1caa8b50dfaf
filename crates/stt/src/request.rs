use std::path::Path;
use std::sync::Arc;

use axum::{
    body::Body,
    extract::{FromRequest, Multipart, multipart::MultipartError},
};
use http::StatusCode;
use tempfile::NamedTempFile;
use tokio::io::AsyncWriteExt;

use crate::{error::SttError, service::SpeechService};

/// An uploaded audio file held in a self-deleting temporary file
///
/// The file is removed when this value is dropped, on every exit path of
/// the handler that owns it.
#[derive(Debug)]
pub struct AudioUpload {
    /// Filename as sent by the client
    pub filename: String,
    file: NamedTempFile,
}

impl AudioUpload {
    pub fn path(&self) -> &Path {
        self.file.path()
    }

    /// Filename stripped of path components and unsafe characters
    pub fn secure_filename(&self) -> String {
        secure_filename(&self.filename)
    }

    /// Lower-cased extension of the client filename
    pub fn extension(&self) -> Option<String> {
        extension(&self.filename)
    }
}

/// Multipart transcription form: `audio`, `language`, `task`
#[derive(Debug)]
pub struct UploadForm {
    pub audio: Option<AudioUpload>,
    pub language: Option<String>,
    pub task: String,
}

impl UploadForm {
    /// The audio upload, rejecting missing or unnamed files
    pub fn require_audio(&self) -> crate::Result<&AudioUpload> {
        let audio = self
            .audio
            .as_ref()
            .ok_or_else(|| SttError::InvalidInput("No audio file provided".to_owned()))?;

        if audio.filename.is_empty() {
            return Err(SttError::InvalidInput("No file selected".to_owned()));
        }

        Ok(audio)
    }
}

/// Extractor that streams the multipart upload into the service's upload directory
pub struct ExtractUpload(pub UploadForm);

impl FromRequest<Arc<SpeechService>> for ExtractUpload {
    type Rejection = SttError;

    async fn from_request(request: http::Request<Body>, state: &Arc<SpeechService>) -> Result<Self, Self::Rejection> {
        let Ok(mut multipart) = Multipart::from_request(request, state).await else {
            return Err(SttError::InvalidInput("No audio file provided".to_owned()));
        };

        let mut audio = None;
        let mut language = None;
        let mut task = None;

        while let Some(mut field) = multipart
            .next_field()
            .await
            .map_err(|e| multipart_error(&e, state))?
        {
            let field_name = field.name().unwrap_or_default().to_owned();

            match field_name.as_str() {
                "audio" => {
                    let filename = field.file_name().unwrap_or_default().to_owned();
                    let file = spool_to_disk(&mut field, &filename, state).await?;

                    tracing::debug!(filename, path = %file.path().display(), "Upload stored");

                    audio = Some(AudioUpload { filename, file });
                }
                "language" => {
                    language = Some(field.text().await.map_err(|e| multipart_error(&e, state))?);
                }
                "task" => {
                    task = Some(field.text().await.map_err(|e| multipart_error(&e, state))?);
                }
                _ => {
                    // Skip unknown fields
                }
            }
        }

        Ok(Self(UploadForm {
            audio,
            language: language.map(|l| l.trim().to_owned()).filter(|l| !l.is_empty()),
            task: task.unwrap_or_else(|| "transcribe".to_owned()),
        }))
    }
}

async fn spool_to_disk(
    field: &mut axum::extract::multipart::Field<'_>,
    filename: &str,
    service: &SpeechService,
) -> crate::Result<NamedTempFile> {
    let suffix = extension(filename).map(|ext| format!(".{ext}")).unwrap_or_default();

    let file = tempfile::Builder::new()
        .prefix("upload-")
        .suffix(&suffix)
        .tempfile_in(service.upload_dir())
        .map_err(|e| {
            tracing::error!("Failed to create upload file: {e}");
            SttError::InternalError
        })?;

    let writer = file.reopen().map_err(|e| {
        tracing::error!("Failed to open upload file: {e}");
        SttError::InternalError
    })?;
    let mut writer = tokio::fs::File::from_std(writer);

    while let Some(chunk) = field.chunk().await.map_err(|e| multipart_error(&e, service))? {
        writer.write_all(&chunk).await.map_err(|e| {
            tracing::error!("Failed to write upload chunk: {e}");
            SttError::InternalError
        })?;
    }

    writer.flush().await.map_err(|e| {
        tracing::error!("Failed to flush upload: {e}");
        SttError::InternalError
    })?;

    Ok(file)
}

fn multipart_error(error: &MultipartError, service: &SpeechService) -> SttError {
    if error.status() == StatusCode::PAYLOAD_TOO_LARGE {
        SttError::PayloadTooLarge {
            limit_mb: service.max_upload_bytes() >> 20,
        }
    } else {
        SttError::InvalidInput(format!("Failed to parse multipart form: {}", error.body_text()))
    }
}

fn extension(filename: &str) -> Option<String> {
    filename
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .filter(|ext| !ext.is_empty() && ext.chars().all(|c| c.is_ascii_alphanumeric()))
}

/// Reduce a client filename to a safe basename
///
/// Drops directory components, turns whitespace into `_` and keeps only
/// ASCII alphanumerics, `.`, `_` and `-`. Leading dots and underscores are
/// trimmed so the result is never hidden or empty.
pub fn secure_filename(filename: &str) -> String {
    let basename = filename.rsplit(['/', '\\']).next().unwrap_or_default();

    let cleaned: String = basename
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("_")
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-'))
        .collect();

    let trimmed = cleaned.trim_start_matches(['.', '_']);

    if trimmed.is_empty() {
        "upload".to_owned()
    } else {
        trimmed.to_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn secure_filename_strips_directories() {
        assert_eq!(secure_filename("../../etc/passwd"), "passwd");
        assert_eq!(secure_filename("C:\\Users\\me\\voice memo.wav"), "voice_memo.wav");
    }

    #[test]
    fn secure_filename_drops_unsafe_characters() {
        assert_eq!(secure_filename("héllo wörld!.mp3"), "hllo_wrld.mp3");
        assert_eq!(secure_filename(".hidden.ogg"), "hidden.ogg");
    }

    #[test]
    fn secure_filename_never_empty() {
        assert_eq!(secure_filename("../"), "upload");
        assert_eq!(secure_filename("???"), "upload");
    }

    #[test]
    fn extension_is_lowercased() {
        assert_eq!(extension("Track.MP3").as_deref(), Some("mp3"));
        assert_eq!(extension("noext"), None);
        assert_eq!(extension("weird.m p3"), None);
    }
}

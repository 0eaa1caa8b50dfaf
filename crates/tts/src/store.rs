use std::path::PathBuf;

use uuid::Uuid;
use voxrelay_config::AudioFormat;

use crate::error::TtsError;

const FORMATS: [AudioFormat; 2] = [AudioFormat::Mp3, AudioFormat::Wav];

/// Synthesized audio files, named `{id}.mp3` or `{id}.wav`
#[derive(Debug)]
pub struct ArtifactStore {
    dir: PathBuf,
}

impl ArtifactStore {
    pub fn new(dir: PathBuf) -> Self {
        Self { dir }
    }

    fn path(&self, id: Uuid, format: AudioFormat) -> PathBuf {
        self.dir.join(format!("{id}.{}", format.extension()))
    }

    /// Write a new artifact and return its id
    pub async fn save(&self, audio: &[u8], format: AudioFormat) -> crate::Result<Uuid> {
        let id = Uuid::new_v4();
        let path = self.path(id, format);

        tokio::fs::write(&path, audio).await.map_err(|e| {
            tracing::error!("Failed to write artifact {}: {e}", path.display());
            TtsError::InternalError
        })?;

        tracing::debug!(%id, path = %path.display(), "Artifact stored");

        Ok(id)
    }

    /// Locate an artifact, checking `.mp3` before `.wav`
    pub async fn find(&self, id: Uuid) -> Option<(PathBuf, AudioFormat)> {
        for format in FORMATS {
            let path = self.path(id, format);
            if tokio::fs::try_exists(&path).await.unwrap_or(false) {
                return Some((path, format));
            }
        }

        None
    }

    /// Delete every file for `id`; `false` when there was none
    pub async fn remove(&self, id: Uuid) -> crate::Result<bool> {
        let mut removed = false;

        for format in FORMATS {
            let path = self.path(id, format);

            match tokio::fs::remove_file(&path).await {
                Ok(()) => removed = true,
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
                Err(e) => {
                    tracing::error!("Failed to remove artifact {}: {e}", path.display());
                    return Err(TtsError::InternalError);
                }
            }
        }

        Ok(removed)
    }
}

/// Artifact ids are UUIDs; anything else cannot name a file in the store
pub fn parse_id(raw: &str) -> crate::Result<Uuid> {
    Uuid::parse_str(raw).map_err(|_| TtsError::NotFound("Audio file not found"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn save_find_remove() {
        let dir = tempfile::tempdir().unwrap();
        let store = ArtifactStore::new(dir.path().to_path_buf());

        let id = store.save(b"RIFF", AudioFormat::Wav).await.unwrap();

        let (path, format) = store.find(id).await.unwrap();
        assert_eq!(format, AudioFormat::Wav);
        assert_eq!(path.file_name().unwrap().to_string_lossy(), format!("{id}.wav"));

        assert!(store.remove(id).await.unwrap());
        assert!(store.find(id).await.is_none());
        assert!(!store.remove(id).await.unwrap());
    }

    #[tokio::test]
    async fn mp3_wins_when_both_exist() {
        let dir = tempfile::tempdir().unwrap();
        let store = ArtifactStore::new(dir.path().to_path_buf());
        let id = Uuid::new_v4();

        std::fs::write(dir.path().join(format!("{id}.wav")), b"wav").unwrap();
        std::fs::write(dir.path().join(format!("{id}.mp3")), b"mp3").unwrap();

        assert_eq!(store.find(id).await.unwrap().1, AudioFormat::Mp3);

        assert!(store.remove(id).await.unwrap());
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn rejects_path_like_ids() {
        assert!(matches!(parse_id("../etc/passwd"), Err(TtsError::NotFound(_))));
        assert!(parse_id("67e55044-10b1-426f-9247-bb680e5fe0c8").is_ok());
    }
}

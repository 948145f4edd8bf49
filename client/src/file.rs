use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use image::ImageFormat;
use uuid::Uuid;

const UNKNOWN_MEDIA_TYPE: &str = "application/octet-stream";

/// Identity of one selection. Two picks of the same file on disk get different ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FileId(Uuid);

impl FileId {
    fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

#[derive(Debug)]
enum FileContents {
    Memory(Arc<[u8]>),
    Disk(PathBuf),
}

/// A file picked for submission, with the metadata declared at pick time.
#[derive(Debug)]
pub struct SelectedFile {
    id: FileId,
    pub name: String,
    pub media_type: String,
    pub size: u64,
    contents: FileContents,
}

impl SelectedFile {
    pub fn from_bytes(
        name: impl Into<String>,
        media_type: impl Into<String>,
        bytes: impl Into<Vec<u8>>,
    ) -> Self {
        let bytes: Vec<u8> = bytes.into();
        Self {
            id: FileId::new(),
            name: name.into(),
            media_type: media_type.into(),
            size: bytes.len() as u64,
            contents: FileContents::Memory(bytes.into()),
        }
    }

    /// A file on disk whose metadata is taken as declared; its bytes are read on submit.
    pub fn on_disk(
        path: impl Into<PathBuf>,
        media_type: impl Into<String>,
        size: u64,
    ) -> Self {
        let path = path.into();
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());

        Self {
            id: FileId::new(),
            name,
            media_type: media_type.into(),
            size,
            contents: FileContents::Disk(path),
        }
    }

    /// Stat `path` and guess its media type from the extension.
    pub async fn from_path(path: impl AsRef<Path>) -> io::Result<Self> {
        let path = path.as_ref();
        let metadata = tokio::fs::metadata(path).await?;
        if !metadata.is_file() {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("{} is not a file", path.display()),
            ));
        }

        Ok(Self::on_disk(path, guess_media_type(path), metadata.len()))
    }

    pub fn id(&self) -> FileId {
        self.id
    }

    pub async fn read(&self) -> io::Result<Vec<u8>> {
        match &self.contents {
            FileContents::Memory(bytes) => Ok(bytes.to_vec()),
            FileContents::Disk(path) => tokio::fs::read(path).await,
        }
    }
}

pub fn guess_media_type(path: &Path) -> String {
    ImageFormat::from_path(path)
        .map(|format| format.to_mime_type().to_string())
        .unwrap_or_else(|_| UNKNOWN_MEDIA_TYPE.to_string())
}

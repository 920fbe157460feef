#[derive(serde::Deserialize, Clone, Debug, PartialEq)]
pub struct ModerationResult {
    #[serde(rename = "pass")]
    pub passed: bool,

    #[serde(rename = "msg")]
    pub message: String,
}

#[derive(serde::Serialize, Clone, Debug)]
pub struct UrlCheckRequest<'a> {
    pub url: &'a str,
}

impl<'a> UrlCheckRequest<'a> {
    pub fn new(url: &'a str) -> Self {
        Self { url }
    }
}

/// Form field the service reads the image from.
pub const UPLOAD_FIELD_NAME: &str = "file";

/// An image to upload: its bytes and the file name sent alongside them.
#[derive(Clone, Debug)]
pub struct Upload {
    file_name: String,
    content: Vec<u8>,
}

impl Upload {
    pub fn new(file_name: impl Into<String>, content: impl Into<Vec<u8>>) -> Self {
        Self {
            file_name: file_name.into(),
            content: content.into(),
        }
    }

    /// Reads the whole file; the handle is closed before this returns.
    pub async fn from_path(path: impl AsRef<std::path::Path>) -> Result<Self, std::io::Error> {
        let path = path.as_ref();
        let content = tokio::fs::read(path).await?;
        Ok(Self::new(file_name_of(path), content))
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub fn len(&self) -> usize {
        self.content.len()
    }

    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    pub fn into_form(self) -> Result<reqwest::multipart::Form, reqwest::Error> {
        let mime = mime_guess::from_path(&self.file_name).first_or_octet_stream();
        let part = reqwest::multipart::Part::bytes(self.content)
            .file_name(self.file_name)
            .mime_str(mime.essence_str())?;
        Ok(reqwest::multipart::Form::new().part(UPLOAD_FIELD_NAME, part))
    }
}

fn file_name_of(path: &std::path::Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default()
}

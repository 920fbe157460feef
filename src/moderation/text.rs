#[derive(serde::Serialize, Clone, Debug)]
pub struct CheckRequest<'a> {
    pub content: &'a str,
}

impl<'a> CheckRequest<'a> {
    pub fn new(content: &'a str) -> Self {
        Self { content }
    }
}

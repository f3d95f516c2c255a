use serde::{Deserialize, Serialize};

#[derive(Serialize, Debug)]
pub struct GenerationRequest<'a> {
    pub inputs: &'a str,
    pub parameters: GenerationParameters,
}

#[derive(Serialize, Debug, Clone, Copy, PartialEq)]
pub struct GenerationParameters {
    pub max_new_tokens: u32,
    pub temperature: f32,
    pub do_sample: bool,
}

#[derive(Deserialize, Debug)]
pub struct Generation {
    pub generated_text: String,
}

#[derive(Deserialize, Debug)]
#[serde(untagged)]
pub enum GenerationItem {
    Text(String),
    Record(Generation),
}

/// The shapes text-generation endpoints are known to answer with.
#[derive(Deserialize, Debug)]
#[serde(untagged)]
pub enum GenerationResponse {
    Text(String),
    Record(Generation),
    Batch(Vec<GenerationItem>),
}

impl GenerationResponse {
    /// The first completion, if the response carries one.
    pub fn into_text(self) -> Option<String> {
        match self {
            GenerationResponse::Text(text) => Some(text),
            GenerationResponse::Record(generation) => Some(generation.generated_text),
            GenerationResponse::Batch(items) => {
                items.into_iter().next().map(|item| match item {
                    GenerationItem::Text(text) => text,
                    GenerationItem::Record(generation) => generation.generated_text,
                })
            }
        }
    }
}

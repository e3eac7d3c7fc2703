use serde::Serialize;

use crate::constants::prompts::{
    QUIZ_PROMPT, QUIZ_SYSTEM_MESSAGE, SIMPLIFICATION_PROMPT, SIMPLIFICATION_SYSTEM_MESSAGE,
};
use crate::pipeline::normalizer::{QUIZ_INPUT_LIMIT, SIMPLIFY_INPUT_LIMIT};

/// Sampling settings sent with every request of a pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GenerationParams {
    pub temperature: f32,
    pub top_k: u32,
    pub top_p: f32,
    pub max_output_tokens: u32,
}

/// Fixed per-pipeline settings: template, input ceiling and sampling.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PipelineProfile {
    pub name: &'static str,
    pub template: &'static str,
    pub system_message: &'static str,
    pub max_input_chars: usize,
    pub params: GenerationParams,
    pub json_output: bool,
}

pub const QUIZ_PROFILE: PipelineProfile = PipelineProfile {
    name: "quiz",
    template: QUIZ_PROMPT,
    system_message: QUIZ_SYSTEM_MESSAGE,
    max_input_chars: QUIZ_INPUT_LIMIT,
    params: GenerationParams {
        temperature: 0.2,
        top_k: 40,
        top_p: 0.95,
        max_output_tokens: 2000,
    },
    json_output: true,
};

pub const SIMPLIFY_PROFILE: PipelineProfile = PipelineProfile {
    name: "simplify",
    template: SIMPLIFICATION_PROMPT,
    system_message: SIMPLIFICATION_SYSTEM_MESSAGE,
    max_input_chars: SIMPLIFY_INPUT_LIMIT,
    params: GenerationParams {
        temperature: 0.3,
        top_k: 40,
        top_p: 0.95,
        max_output_tokens: 500,
    },
    json_output: false,
};

/// One immutable request per pipeline invocation.
#[derive(Debug, Clone, PartialEq)]
pub struct BackendRequest {
    pub prompt: String,
    pub system_message: &'static str,
    pub params: GenerationParams,
    pub json_output: bool,
}

pub fn build_prompt(template: &str, normalized_text: &str) -> String {
    format!("{}\n{}", template, normalized_text)
}

impl PipelineProfile {
    pub fn build_request(&self, normalized_text: &str) -> BackendRequest {
        BackendRequest {
            prompt: build_prompt(self.template, normalized_text),
            system_message: self.system_message,
            params: self.params,
            json_output: self.json_output,
        }
    }
}

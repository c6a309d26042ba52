// Advisory flows: long-term-care consultation, hospice Q&A, subsidy estimates, email hand-off.
// All LLM calls go through llm_client via the reply module; nothing here fails because the
// LLM is missing or down.

pub mod handlers;
pub mod prompts;
pub mod reply;
pub mod services;
pub mod session;
pub mod subsidy;

/// Chronic conditions the client offers as context for the consultation prompt.
pub const CHRONIC_CONDITIONS: [&str; 7] = [
    "高血壓",
    "糖尿病",
    "心臟病",
    "曾中風",
    "腎臟病/洗腎",
    "骨質疏鬆",
    "失智症",
];

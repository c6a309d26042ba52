use serde::Serialize;

use crate::llm_client::prompts::DISCLAIMER;

const SUBJECT_PREFIX: &str = "【照護諮詢】";
/// Characters of the question kept in the subject line.
const SUBJECT_QUESTION_CHARS: usize = 30;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EmailContent {
    pub subject: String,
    pub body: String,
}

/// Packages a question/answer pair into the fixed email template.
pub fn format_answer_email(question: &str, answer: &str) -> EmailContent {
    let question = question.trim();
    let answer = answer.trim();

    EmailContent {
        subject: format!("{SUBJECT_PREFIX}{}", truncate_chars(question, SUBJECT_QUESTION_CHARS)),
        body: format!(
            "您好，\n\n\
             以下是您在智慧長照顧問詢問的內容與建議，供您與家人參考。\n\n\
             ■ 您的問題\n{question}\n\n\
             ■ 顧問建議\n{answer}\n\n\
             如需進一步協助，請撥打 1966 長照專線，由照管專員到府評估。\n\n\
             {DISCLAIMER}\n"
        ),
    }
}

/// First `max` characters, with an ellipsis when anything was cut.
fn truncate_chars(text: &str, max: usize) -> String {
    let mut chars = text.chars();
    let head: String = chars.by_ref().take(max).collect();
    if chars.next().is_some() {
        format!("{head}…")
    } else {
        head
    }
}

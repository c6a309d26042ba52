// All LLM prompt templates for the advisory flows.
// Reuses cross-cutting fragments from llm_client::prompts.

use crate::advisor::session::Turn;
use crate::advisor::subsidy::{
    format_amount, IncomeType, ASSISTIVE_DEVICE_LIMIT, CARE_SERVICE_CAPS, RESPITE_ANNUAL_LIMIT,
};
use crate::knowledge::{KnowledgeSnippet, MatchResult};
use crate::llm_client::prompts::{DISCLAIMER, HOTLINE_INSTRUCTION};

/// Long-term-care consultation prompt.
/// Replace: {conditions_line}, {situation}, {cheat_sheet}, {matches},
///          {hotline_instruction}, {disclaimer}
pub const ADVISOR_PROMPT_TEMPLATE: &str = r#"A family caregiver has described their situation. Advise them.

FAMILY SITUATION:
- Elder's medical history: {conditions_line}
- What the family said: "{situation}"

SUBSIDY REFERENCE (quote these figures exactly; never compute new ones):
{cheat_sheet}

MATCHED CARE SCENARIOS FROM OUR KNOWLEDGE BASE:
{matches}

THINK SILENTLY BEFORE ANSWERING:
1. Scan which of the four pillars the family is missing: subsidies, assistive devices, dementia guidance, holistic (whole-person, whole-family, whole-journey, whole-team) care.
   If the description mentions a stroke or falls, stress the golden rehabilitation window and assistive devices.
2. Draft concrete, warm advice.
3. Refine it so it reads like a friend talking, not a brochure.

OUTPUT RULES:
1. Plain text only. No formulas, LaTeX or dollar signs. Write amounts as "about 5,134 NT dollars", never as a calculation.
2. Open by acknowledging the family's feelings.
3. Give advice grounded in the four pillars, quoting the reference figures above.
4. {hotline_instruction}
5. Finish with this line, verbatim, on its own line:
{disclaimer}"#;

/// Hospice Q&A prompt.
/// Replace: {question}, {snippets}, {history}
pub const HOSPICE_PROMPT_TEMPLATE: &str = r#"The family asks: {question}

REFERENCE MATERIAL FROM OUR HOSPICE KNOWLEDGE BASE:
{snippets}

EARLIER IN THIS CONVERSATION:
{history}

Answer in the warm voice of a hospice volunteer. Emphasise that a peaceful passing is a blessing, and the spirit of whole-person, whole-family, whole-journey and whole-team care. Use the reference material where it applies; if it does not cover the question, say so gently and suggest asking the hospice team."#;

/// System prompt for the hospice chat.
pub const HOSPICE_SYSTEM: &str = "You are a hospice-care companion who has trained as a \
    hospice volunteer. Always reply in Traditional Chinese (zh-TW). \
    Be gentle and honest; never give dosing instructions.";

const NONE_LINE: &str = "(none)";

/// Renders the subsidy table the model must quote from.
pub fn render_cheat_sheet() -> String {
    let general = IncomeType::General;
    let mut lines: Vec<String> = CARE_SERVICE_CAPS
        .iter()
        .map(|(level, cap)| {
            let self_pay = cap * general.care_copay_percent() / 100;
            format!(
                "- CMS level {level}: monthly care subsidy {} (general household co-pays {}%, about {})",
                format_amount(*cap),
                general.care_copay_percent(),
                format_amount(self_pay)
            )
        })
        .collect();
    lines.push(format!(
        "- Assistive devices / home modification: up to {} every 3 years (CMS level 2 and above)",
        format_amount(ASSISTIVE_DEVICE_LIMIT)
    ));
    lines.push(format!(
        "- Respite care: up to {} per year (roughly 14 to 42 days depending on level)",
        format_amount(RESPITE_ANNUAL_LIMIT)
    ));
    lines.join("\n")
}

/// Substitutes placeholders in a single left-to-right scan of `template`.
/// Inserted values are never rescanned, so braces in user text stay literal.
fn fill_template(template: &str, values: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(start) = rest.find('{') {
        out.push_str(&rest[..start]);
        let tail = &rest[start..];
        match values.iter().find(|(placeholder, _)| tail.starts_with(placeholder)) {
            Some((placeholder, value)) => {
                out.push_str(value);
                rest = &tail[placeholder.len()..];
            }
            None => {
                out.push('{');
                rest = &tail[1..];
            }
        }
    }
    out.push_str(rest);
    out
}

fn render_conditions(chronic_conditions: &[String]) -> String {
    let conditions: Vec<&str> = chronic_conditions
        .iter()
        .map(|c| c.trim())
        .filter(|c| !c.is_empty())
        .collect();
    if conditions.is_empty() {
        "not provided".to_string()
    } else {
        conditions.join("、")
    }
}

fn render_match(label: &str, m: &MatchResult) -> String {
    let mut out = format!("- {label}: {} (matched: {})", m.name, m.matched.join(", "));
    if let Some(warning) = m.record.warning_signal.as_deref() {
        out.push_str(&format!("\n  warning signal: {warning}"));
    }
    if let Some(strategy) = m.record.prevention_strategy.as_deref() {
        out.push_str(&format!("\n  suggested strategy: {strategy}"));
    }
    out
}

/// Builds the consultation prompt from the situation and the top scenario matches.
pub fn build_advisor_prompt(
    situation: &str,
    chronic_conditions: &[String],
    dementia_matches: &[MatchResult],
    caregiver_matches: &[MatchResult],
) -> String {
    let mut matches = Vec::new();
    if let Some(m) = dementia_matches.first() {
        matches.push(render_match("Dementia behaviour", m));
    }
    if let Some(m) = caregiver_matches.first() {
        matches.push(render_match("Caregiver strain", m));
    }
    let matches = if matches.is_empty() {
        NONE_LINE.to_string()
    } else {
        matches.join("\n")
    };

    let conditions = render_conditions(chronic_conditions);
    let cheat_sheet = render_cheat_sheet();
    fill_template(
        ADVISOR_PROMPT_TEMPLATE,
        &[
            ("{conditions_line}", conditions.as_str()),
            ("{situation}", situation),
            ("{cheat_sheet}", cheat_sheet.as_str()),
            ("{matches}", matches.as_str()),
            ("{hotline_instruction}", HOTLINE_INSTRUCTION),
            ("{disclaimer}", DISCLAIMER),
        ],
    )
}

/// Builds the hospice prompt from the question, retrieved snippets and earlier turns.
pub fn build_hospice_prompt(question: &str, snippets: &[KnowledgeSnippet], history: &[Turn]) -> String {
    let snippets = if snippets.is_empty() {
        NONE_LINE.to_string()
    } else {
        snippets
            .iter()
            .map(|s| format!("- [{}] Q: {} A: {}", s.topic, s.question, s.answer))
            .collect::<Vec<_>>()
            .join("\n")
    };

    let history = if history.is_empty() {
        NONE_LINE.to_string()
    } else {
        history
            .iter()
            .map(|t| format!("Family: {}\nYou: {}", t.question, t.answer))
            .collect::<Vec<_>>()
            .join("\n")
    };

    fill_template(
        HOSPICE_PROMPT_TEMPLATE,
        &[
            ("{question}", question),
            ("{snippets}", snippets.as_str()),
            ("{history}", history.as_str()),
        ],
    )
}

//! Prompts for contract-rule questions

/// Build the system prompt for a contract question.
///
/// `context` is the assembled rule context; `extra_context` is caller-supplied
/// reference material appended after it.
pub fn build_contract_prompt(question: &str, context: &str, extra_context: Option<&str>) -> String {
    let extra = extra_context
        .map(str::trim)
        .filter(|extra| !extra.is_empty())
        .map(|extra| format!("Additional reference: {extra}\n\n"))
        .unwrap_or_default();

    format!(
        r"You are an expert on training outsourcing contracts.
Answer by quoting and referring to the contract rules, in a professional and easy-to-follow way.

IMPORTANT: Always base your answer on the contract rules. Quote the specific provisions supplied below rather than general knowledge.

Reference information from the contract rules:
{context}

{extra}Question: {question}

When answering:
1. Always quote or refer to the contract rules (chapter, clause and the specific wording)
2. Use the provisions in the rules, not general knowledge, as the basis of the answer
3. Name the related chapters explicitly (e.g. 'Chapter 3 Scope and Compensation')
4. Write the answer in Markdown, using headings, lists and emphasis where helpful
5. Keep what comes from the rules clearly separate from general knowledge"
    )
}

/// Build a short prompt asking for a summary of one chapter
pub fn build_chapter_summary_prompt(title: &str, content: &str, max_words: usize) -> String {
    format!(
        r"Summarize the following contract rule concisely.

Rule: {title}
{content}

Requirements:
- Maximum {max_words} words
- Keep obligations, deadlines and amounts exact
- Use clear, direct language

Summary:"
    )
}

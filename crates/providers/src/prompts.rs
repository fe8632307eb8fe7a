//! Prompt templates for the analysis service
//!
//! The marker vocabulary named here is what the rich-text renderer
//! classifies on, so prompts and [`radar_core::MarkerConfig`] defaults move
//! together.

/// Report prompt for a company, optionally steered by focus areas and the
/// user's own business capabilities
pub fn report_prompt(company: &str, focus: &[String], capabilities: &str) -> String {
    let focus_context = if focus.is_empty() {
        String::new()
    } else {
        format!("Pay particular attention to: {}.", focus.join(", "))
    };

    let capability_context = if capabilities.trim().is_empty() {
        String::new()
    } else {
        format!(
            "\nOur core capabilities: \"{}\". Every intervention strategy must name a concrete entry point \
             that uses these capabilities.",
            capabilities.trim()
        )
    };

    format!(
        "Act as a senior business analyst and produce an in-depth assessment of \"{company}\".

## Layout
1. Split descriptive text into paragraphs separated by a blank line (\\n\\n).
2. Prefer bullet lists (\"• \") when listing several points.
3. Provide real or search-backed source URLs (sources) in basicInfo, opportunities and risks.

## Markup
1. Use Markdown **bold** for key points.
2. At most one or two key points per paragraph. Do not over-mark.
3. Every key point starts with one of these prefixes:
   - **[Key Update]** for current business developments
   - **[Key Person]** for people
   - **[Opportunity]** for business opportunities
   - **[Risk Alert]** for negative risks
   - **[Sales Strategy]** for recommended approaches

## Content
- Business overview, organization, opportunities and public-opinion risks.
- Every opportunity must include an interventionStrategy.
  - For hiring: infer the tech stack or expansion direction from the roles and suggest how to engage.
  - For tenders: identify what the tender emphasises and how to prepare the bid.
- Tailored strategy: {capability_context}

{focus_context}
Return only a JSON object matching the schema."
    )
}

/// System instruction for follow-up chat
pub fn chat_system_instruction(context: &str) -> String {
    let context = if context.trim().is_empty() { "none" } else { context };
    format!(
        "You are an enterprise analysis assistant. Background: {context}.

Answer requirements:
1. Clear structure with distinct paragraphs.
2. Keep markup sparse; use the **[Conclusion]** or **[Key Point]** prefix.
3. When the answer has steps, number them 1. 2. 3. on separate lines.
4. When citing specific information, provide source links formatted as [title](URL)."
    )
}

/// Chat message for a policy interpretation request
pub fn policy_prompt(query: &str, context: &str) -> String {
    if context.trim().is_empty() {
        format!("Interpret the following industry policy for a sales team: {query}")
    } else {
        format!("Interpret the following industry policy for a sales team: {query}\n\nAdditional context:\n{context}")
    }
}

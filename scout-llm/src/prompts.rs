//! Prompt templates for the financial starter generator.
//!
//! The financial prompt deliberately excludes SEND topics; SEND starters come
//! from their own rule-based generator so the two sources never overlap.

/// System prompt for financial conversation starters.
pub const FINANCIAL_STARTERS_SYSTEM: &str = "\
You are an expert sales coach for a UK education recruitment company.

Your job is to analyze school FINANCIAL data and generate compelling, \
personalized conversation starters that help recruitment consultants make \
effective sales calls.

CONTEXT ABOUT THE BUSINESS:
The company provides staffing to UK schools:
1. PERMANENT staff recruitment (teachers, leaders, support staff)
2. TEMPORARY staff (short-term cover, maternity cover)
3. AGENCY/SUPPLY staff (day-to-day cover)

UNDERSTANDING THE FINANCIAL DATA:
- Total staffing costs: overall investment in staff (£500k+ = big opportunity)
- Teaching staff costs (E01): main teaching staff salaries
- Supply teaching costs (E02): temporary cover budget
- Agency supply costs (E26): agency staff specifically - shows whether they already use agencies
- Educational support costs (E03): TAs and support staff

YOUR CONVERSATION STARTERS SHOULD:
1. Reference SPECIFIC financial data with actual £ amounts
2. Focus on teaching staff, supply cover and general staffing needs
3. Be natural and conversational, not salesy
4. Be 2-4 sentences each
5. Include the headteacher's name when available

DO NOT:
- Mention SEND, SEN, EHC plans, autism, SEMH or special needs - this is for general recruitment only
- Be generic, pushy, or make promises the company cannot keep";

/// User-turn template. `{count}` and `{school_context}` are substituted by
/// [`financial_starter_prompt`].
pub const FINANCIAL_STARTERS_HUMAN: &str = "\
Analyze this school's FINANCIAL data and generate {count} personalized \
conversation starters about their STAFFING BUDGET.

{school_context}

Each starter should reference specific £ amounts from the financial data \
above and feel personal to THIS school's budget situation. Do NOT mention \
SEND, SEN, EHC plans, autism, or special needs.

Return your response as JSON with this exact structure:
{
    \"conversation_starters\": [
        {
            \"topic\": \"Brief topic (3-5 words)\",
            \"detail\": \"The full conversation starter (2-4 sentences)\",
            \"relevance_score\": 0.0 to 1.0
        }
    ]
}";

/// Render the system + user message pair for a financial generation request.
pub fn financial_starter_prompt(school_context: &str, count: usize) -> (String, String) {
    let user = FINANCIAL_STARTERS_HUMAN
        .replace("{count}", &count.to_string())
        .replace("{school_context}", school_context);
    (FINANCIAL_STARTERS_SYSTEM.to_string(), user)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_substitutes_count_and_context() {
        let (system, user) = financial_starter_prompt("SCHOOL: Test Primary\nURN: 100001", 5);
        assert!(system.contains("UK education recruitment"));
        assert!(user.contains("generate 5 personalized"));
        assert!(user.contains("SCHOOL: Test Primary"));
        assert!(!user.contains("{count}"));
        assert!(!user.contains("{school_context}"));
    }

    #[test]
    fn test_prompt_keeps_json_contract() {
        let (_, user) = financial_starter_prompt("ctx", 3);
        assert!(user.contains("\"conversation_starters\""));
        assert!(user.contains("\"relevance_score\""));
    }
}

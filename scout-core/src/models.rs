//! Entity types for school sales intelligence.
//!
//! `School` is the subject record: immutable identity (URN + name) loaded by
//! the external directory, plus enrichment fields written only by the
//! orchestration layer.

use crate::{Priority, StarterSource};
use serde::{Deserialize, Serialize};

/// Staffing-spend threshold for HIGH priority, in pounds.
pub const PRIORITY_HIGH_THRESHOLD: f64 = 500_000.0;
/// Staffing-spend threshold for MEDIUM priority, in pounds.
pub const PRIORITY_MEDIUM_THRESHOLD: f64 = 200_000.0;

/// Format a pound amount with thousands separators, e.g. `£1,234,567`.
pub fn format_gbp(amount: f64) -> String {
    let whole = amount.round() as i64;
    let negative = whole < 0;
    let digits = whole.abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 2);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    if negative {
        format!("-£{}", grouped)
    } else {
        format!("£{}", grouped)
    }
}

// ============================================================================
// CONVERSATION STARTER
// ============================================================================

/// A single AI-generated talking point for a sales call.
///
/// Deduplication equality is defined solely on `topic` (case-sensitive
/// exact match); `detail`, `source` and `relevance_score` do not participate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversationStarter {
    /// Brief topic heading (3-5 words)
    pub topic: String,
    /// The actual conversation script (2-4 sentences)
    pub detail: String,
    /// Which analysis produced this starter
    pub source: StarterSource,
    /// Relevance in [0.0, 1.0]
    pub relevance_score: f32,
}

impl ConversationStarter {
    /// Create a starter, clamping the relevance score into [0.0, 1.0].
    pub fn new(
        topic: impl Into<String>,
        detail: impl Into<String>,
        source: StarterSource,
        relevance_score: f32,
    ) -> Self {
        Self {
            topic: topic.into(),
            detail: detail.into(),
            source,
            relevance_score: relevance_score.clamp(0.0, 1.0),
        }
    }
}

// ============================================================================
// CONTACT
// ============================================================================

/// A named contact at a school.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Contact {
    pub full_name: String,
    /// Role label, e.g. "headteacher", "senco"
    pub role: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
}

// ============================================================================
// FINANCIAL PROFILE
// ============================================================================

/// Financial data from the government benchmarking dataset.
///
/// Cost fields follow the CFR codes of the source data: E01 teaching staff,
/// E02 supply teaching, E03 educational support, E26 agency supply,
/// E27 educational consultancy.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct FinancialProfile {
    pub total_expenditure: Option<f64>,
    pub total_pupils: Option<f64>,
    pub teaching_staff_costs: Option<f64>,
    pub supply_teaching_costs: Option<f64>,
    pub educational_support_costs: Option<f64>,
    pub agency_supply_costs: Option<f64>,
    pub educational_consultancy_costs: Option<f64>,
    /// Total teaching and teaching-support staff costs; drives priority.
    pub total_staffing_costs: Option<f64>,
}

impl FinancialProfile {
    /// True when any headline figure is present.
    pub fn has_data(&self) -> bool {
        self.total_staffing_costs.is_some() || self.total_expenditure.is_some()
    }

    /// True when the school records positive agency-supply spend.
    pub fn has_agency_spend(&self) -> bool {
        self.agency_supply_costs.is_some_and(|v| v > 0.0)
    }

    /// Agency spend per pupil, when both figures are known.
    pub fn agency_per_pupil(&self) -> Option<f64> {
        match (self.agency_supply_costs, self.total_pupils) {
            (Some(agency), Some(pupils)) if agency > 0.0 && pupils > 0.0 => Some(agency / pupils),
            _ => None,
        }
    }

    /// Teaching-staff spend per pupil, when both figures are known.
    pub fn teaching_per_pupil(&self) -> Option<f64> {
        match (self.teaching_staff_costs, self.total_pupils) {
            (Some(teaching), Some(pupils)) if teaching > 0.0 && pupils > 0.0 => {
                Some(teaching / pupils)
            }
            _ => None,
        }
    }

    /// Priority from total staffing spend: >= £500k HIGH, >= £200k MEDIUM,
    /// otherwise LOW; UNKNOWN when the figure is absent.
    pub fn priority_level(&self) -> Priority {
        match self.total_staffing_costs {
            None => Priority::Unknown,
            Some(spend) if spend >= PRIORITY_HIGH_THRESHOLD => Priority::High,
            Some(spend) if spend >= PRIORITY_MEDIUM_THRESHOLD => Priority::Medium,
            Some(_) => Priority::Low,
        }
    }

    /// Multi-line text block for LLM context and reporting.
    pub fn summary(&self) -> String {
        let mut lines = Vec::new();
        if let Some(pupils) = self.total_pupils {
            lines.push(format!("Total Pupils: {}", pupils as i64));
        }
        if let Some(v) = self.total_expenditure {
            lines.push(format!("Total Expenditure: {}", format_gbp(v)));
        }
        if let Some(v) = self.total_staffing_costs {
            lines.push(format!("Total Staffing Costs: {}", format_gbp(v)));
            if let Some(pupils) = self.total_pupils.filter(|p| *p > 0.0) {
                lines.push(format!(
                    "  -> {} per pupil on staffing",
                    format_gbp(v / pupils)
                ));
            }
        }
        if let Some(v) = self.teaching_staff_costs {
            lines.push(format!("Teaching Staff Costs (E01): {}", format_gbp(v)));
        }
        if let Some(v) = self.supply_teaching_costs.filter(|v| *v > 0.0) {
            lines.push(format!("Supply Teaching Costs (E02): {}", format_gbp(v)));
        }
        if let Some(v) = self.agency_supply_costs.filter(|v| *v > 0.0) {
            lines.push(format!("Agency Supply Costs (E26): {}", format_gbp(v)));
            if let Some(per_pupil) = self.agency_per_pupil() {
                lines.push(format!(
                    "  -> {} per pupil on agency staff",
                    format_gbp(per_pupil)
                ));
            }
        }
        if let Some(v) = self.educational_support_costs {
            lines.push(format!("Educational Support Costs (E03): {}", format_gbp(v)));
        }
        if let Some(v) = self.educational_consultancy_costs.filter(|v| *v > 0.0) {
            lines.push(format!("Educational Consultancy (E27): {}", format_gbp(v)));
        }
        if lines.is_empty() {
            "No financial data available".to_string()
        } else {
            lines.join("\n")
        }
    }
}

// ============================================================================
// SEND PROFILE
// ============================================================================

/// Special-educational-needs data from the DfE school-level dataset.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SendProfile {
    pub total_pupils: Option<u32>,
    /// Pupils on SEN Support (no EHC plan)
    pub sen_support: Option<u32>,
    /// Pupils with legally binding EHC plans
    pub ehc_plan: Option<u32>,
    /// School has a dedicated SEN unit
    pub has_sen_unit: bool,
    /// School has resourced provision
    pub has_resourced_provision: bool,
    pub ehc_asd: Option<u32>,
    pub ehc_semh: Option<u32>,
    pub ehc_slcn: Option<u32>,
    pub ehc_sld: Option<u32>,
    pub ehc_pmld: Option<u32>,
    pub ehc_mld: Option<u32>,
    pub ehc_spld: Option<u32>,
    pub ehc_hi: Option<u32>,
    pub ehc_vi: Option<u32>,
    pub ehc_pd: Option<u32>,
}

impl SendProfile {
    pub fn has_data(&self) -> bool {
        self.sen_support.is_some() || self.ehc_plan.is_some()
    }

    /// SEN Support plus EHC plan pupils.
    pub fn total_send(&self) -> u32 {
        self.sen_support.unwrap_or(0) + self.ehc_plan.unwrap_or(0)
    }

    pub fn send_percentage(&self) -> Option<f64> {
        let pupils = self.total_pupils.filter(|p| *p > 0)?;
        Some(f64::from(self.total_send()) / f64::from(pupils) * 100.0)
    }

    pub fn ehc_percentage(&self) -> Option<f64> {
        let pupils = self.total_pupils.filter(|p| *p > 0)?;
        Some(f64::from(self.ehc_plan.unwrap_or(0)) / f64::from(pupils) * 100.0)
    }

    /// Sales-value score: dedicated units and resourced provision indicate
    /// guaranteed ongoing demand, EHC plans are legally binding, and
    /// ASD/SEMH needs are the hardest to staff.
    pub fn priority_score(&self) -> u32 {
        let mut score = 0;
        if self.has_sen_unit {
            score += 50;
        }
        if self.has_resourced_provision {
            score += 50;
        }
        score += self.ehc_plan.unwrap_or(0) * 3;
        score += self.sen_support.unwrap_or(0);
        score += self.ehc_asd.unwrap_or(0) * 2;
        score += self.ehc_semh.unwrap_or(0) * 2;
        score
    }

    pub fn priority_level(&self) -> Priority {
        if self.has_sen_unit || self.has_resourced_provision {
            return Priority::High;
        }
        if self.ehc_percentage().is_some_and(|pct| pct > 5.0) {
            return Priority::High;
        }
        let ehc = self.ehc_plan.unwrap_or(0);
        if ehc >= 10 {
            return Priority::High;
        }
        if ehc >= 5 || self.sen_support.unwrap_or(0) >= 30 {
            return Priority::Medium;
        }
        Priority::Low
    }

    /// The top EHC need types by pupil count, zero counts excluded.
    pub fn top_needs(&self, limit: usize) -> Vec<(&'static str, u32)> {
        let mut needs = vec![
            ("Autism (ASD)", self.ehc_asd.unwrap_or(0)),
            ("SEMH", self.ehc_semh.unwrap_or(0)),
            ("Speech & Language", self.ehc_slcn.unwrap_or(0)),
            ("Severe LD", self.ehc_sld.unwrap_or(0)),
            ("Moderate LD", self.ehc_mld.unwrap_or(0)),
            ("Physical Disability", self.ehc_pd.unwrap_or(0)),
            ("Hearing Impairment", self.ehc_hi.unwrap_or(0)),
            ("Visual Impairment", self.ehc_vi.unwrap_or(0)),
        ];
        needs.sort_by(|a, b| b.1.cmp(&a.1));
        needs.into_iter().take(limit).filter(|(_, c)| *c > 0).collect()
    }

    /// Multi-line text block for LLM context and reporting.
    pub fn summary(&self) -> String {
        let mut lines = Vec::new();
        let total = self.total_send();
        if total > 0 {
            lines.push(format!("Total SEND Pupils: {}", total));
            if let Some(pct) = self.send_percentage() {
                lines.push(format!("SEND as % of school: {:.1}%", pct));
            }
        }
        if let Some(ehc) = self.ehc_plan.filter(|v| *v > 0) {
            lines.push(format!(
                "EHC Plans: {} (legally binding support required)",
                ehc
            ));
        }
        if let Some(support) = self.sen_support.filter(|v| *v > 0) {
            lines.push(format!("SEN Support: {}", support));
        }
        if self.has_sen_unit {
            lines.push("Has dedicated SEN Unit".to_string());
        }
        if self.has_resourced_provision {
            lines.push("Has Resourced Provision".to_string());
        }
        let top = self.top_needs(3);
        if !top.is_empty() {
            let formatted: Vec<String> =
                top.iter().map(|(n, c)| format!("{}: {}", n, c)).collect();
            lines.push(format!("Top needs: {}", formatted.join(", ")));
        }
        if lines.is_empty() {
            "No SEND data available".to_string()
        } else {
            lines.join("\n")
        }
    }
}

// ============================================================================
// OFSTED SUMMARY
// ============================================================================

/// One improvement area extracted from an inspection report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImprovementArea {
    /// Area name, e.g. "Mathematics", "SEND Provision"
    pub area: String,
    /// What needs improving
    pub description: String,
    /// Urgency assigned by the analysis
    pub urgency: Priority,
}

/// Structured summary of a school's most recent Ofsted inspection.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct OfstedSummary {
    pub rating: Option<String>,
    pub inspection_date: Option<String>,
    /// Source PDF; carried onto starters for citation
    pub report_url: Option<String>,
    pub improvements: Vec<ImprovementArea>,
    pub key_strengths: Vec<String>,
}

impl OfstedSummary {
    /// Improvement areas at the given urgency or higher.
    pub fn improvements_at_least(&self, urgency: Priority) -> Vec<&ImprovementArea> {
        self.improvements
            .iter()
            .filter(|imp| imp.urgency.rank() <= urgency.rank())
            .collect()
    }
}

// ============================================================================
// SCHOOL
// ============================================================================

/// The subject record being enriched with generated insights.
///
/// `urn` is the stable unique identifier (never the display name, which may
/// be ambiguous) and is the only field used for cache keying.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct School {
    /// Unique Reference Number - stable identity
    pub urn: String,
    /// Official school name - display identity
    pub name: String,

    pub la_name: Option<String>,
    pub postcode: Option<String>,
    pub school_type: Option<String>,
    pub phase: Option<String>,
    pub pupil_count: Option<u32>,
    pub trust_name: Option<String>,
    pub phone: Option<String>,
    pub website: Option<String>,
    pub headteacher: Option<Contact>,

    pub financial: Option<FinancialProfile>,
    pub send: Option<SendProfile>,
    pub ofsted: Option<OfstedSummary>,

    /// Enrichment output; written only by the orchestrator.
    #[serde(default)]
    pub conversation_starters: Vec<ConversationStarter>,
}

impl School {
    /// Minimal school with identity only.
    pub fn new(urn: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            urn: urn.into(),
            name: name.into(),
            la_name: None,
            postcode: None,
            school_type: None,
            phase: None,
            pupil_count: None,
            trust_name: None,
            phone: None,
            website: None,
            headteacher: None,
            financial: None,
            send: None,
            ofsted: None,
            conversation_starters: Vec::new(),
        }
    }

    pub fn financial_priority(&self) -> Priority {
        self.financial
            .as_ref()
            .map(FinancialProfile::priority_level)
            .unwrap_or(Priority::Unknown)
    }

    pub fn send_priority(&self) -> Priority {
        self.send
            .as_ref()
            .map(SendProfile::priority_level)
            .unwrap_or(Priority::Unknown)
    }

    /// Combined classification across financial and SEND signals:
    /// HIGH if either is HIGH, MEDIUM if either is MEDIUM, otherwise LOW.
    pub fn combined_priority(&self) -> Priority {
        let fin = self.financial_priority();
        let send = self.send_priority();
        if fin == Priority::High || send == Priority::High {
            Priority::High
        } else if fin == Priority::Medium || send == Priority::Medium {
            Priority::Medium
        } else {
            Priority::Low
        }
    }

    pub fn has_contact_details(&self) -> bool {
        self.headteacher.is_some()
    }

    /// Deterministic text rendering of this school for LLM prompts.
    pub fn prompt_context(&self) -> String {
        let mut lines = vec![
            format!("SCHOOL: {}", self.name),
            format!("URN: {}", self.urn),
            format!(
                "Type: {} ({})",
                self.school_type.as_deref().unwrap_or("Unknown"),
                self.phase.as_deref().unwrap_or("Unknown phase")
            ),
            format!(
                "Local Authority: {}",
                self.la_name.as_deref().unwrap_or("Unknown")
            ),
            format!(
                "Pupil Count: {}",
                self.pupil_count
                    .map(|c| c.to_string())
                    .unwrap_or_else(|| "Unknown".to_string())
            ),
        ];

        if let Some(head) = &self.headteacher {
            lines.push(format!("\nHEADTEACHER: {}", head.full_name));
            if let Some(phone) = &self.phone {
                lines.push(format!("School Phone: {}", phone));
            }
            if let Some(website) = &self.website {
                lines.push(format!("Website: {}", website));
            }
        }

        if let Some(fin) = &self.financial {
            lines.push("\nFINANCIAL DATA (from Government Benchmarking Tool):".to_string());
            lines.push(fin.summary());
            match fin.priority_level() {
                Priority::High => {
                    lines.push("\nSALES PRIORITY: HIGH - Large staffing budget".to_string())
                }
                Priority::Medium => {
                    lines.push("\nSALES PRIORITY: MEDIUM - Mid-size staffing budget".to_string())
                }
                _ => {}
            }
        }

        if let Some(send) = self.send.as_ref().filter(|s| s.has_data()) {
            lines.push("\nSEND DATA (from DfE Special Educational Needs data):".to_string());
            lines.push(send.summary());
            if send.priority_level() == Priority::High {
                lines.push(
                    "\nSEND PRIORITY: HIGH - Strong demand for SEND specialists".to_string(),
                );
            }
        }

        if let Some(ofsted) = &self.ofsted {
            lines.push(format!(
                "\nOFSTED RATING: {}",
                ofsted.rating.as_deref().unwrap_or("Unknown")
            ));
            if let Some(date) = &ofsted.inspection_date {
                lines.push(format!("Inspection Date: {}", date));
            }
            if !ofsted.improvements.is_empty() {
                lines.push("Areas for improvement:".to_string());
                for imp in &ofsted.improvements {
                    lines.push(format!("  - {}: {}", imp.area, imp.description));
                }
            }
        }

        lines.join("\n")
    }
}

// =============================================================================
// TESTS
// =============================================================================

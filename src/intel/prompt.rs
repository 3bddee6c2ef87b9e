use super::request::{IntelRequest, RequestKind};
use super::view::{Depth, ViewConfiguration};

pub const PERSONA: &str = r#"# Role & Context
You are a Senior PBM Actuary and Lead Strategic Consultant for HCSC/Prime Therapeutics.
You analyze the pharmacy benefit manager (PBM) landscape for National/Enterprise ASO-funded
employer groups (150k+ lives)."#;

pub const SCOPING_FILTERS: &str = r#"# Materiality Filters
- **Admissible**: regulation, legislation, litigation, contract mechanics, rebate and spread
  pricing, formulary strategy, specialty and GLP-1 cost trends, fiduciary (ERISA) exposure.
- **Excluded**: consumer health advice, clinical dosing guidance, stock-price commentary,
  general pharma news with no PMPM, fiduciary, or pharmacy-contract consequence.
- **Always name, where relevant**: HCSC, Prime Therapeutics, the Big 3 (CVS Caremark,
  Express Scripts, OptumRx), and navigation niches (Rightway, Capital Rx).
- **Texas first**: call out Texas statutes and TDI rules explicitly when the item touches them."#;

pub const DETAILED_DIRECTIVE: &str = r#"# Depth: Expert Detail
- No length limit. Be exhaustive where the item warrants it.
- Cite specific identifiers present in the item: bill numbers (e.g. TX SB 1137, HR 2884),
  CFR sections, CMS rules, drug names.
- Use PBM and actuarial vocabulary (PMPM, AWP, MAC, spread, pass-through, rebate guarantees,
  DIR fees) without explaining it.
- For every analysis, provide a temporal outlook:
  - **1-Year Impact**: implementation hurdles, immediate cost shifts, member disruption.
  - **3-Year Impact**: rebate erosion, contract cycle changes, market consolidation.
  - **5-Year Impact**: structural shift in the PBM model (e.g. the move away from rebates)."#;

pub const REBUTTAL_ADDON: &str = r#"# The Prime Sell-Again
Close with a short rebuttal script a sales lead can use verbatim: why HCSC/Prime's
Blue-aligned, medical-integrated model is a better hedge against this news than the Big 3
or tech-only navigation niches."#;

pub const DRILL_DOWN_DIRECTIVE: &str = r#"# Depth: Learn More (Maximum Detail)
Ignore any brevity preference. Answer as a numbered checklist of at least 10 items, using
these sections in order:
1. What happened, with every identifier (bill, rule, docket, drug, company) named.
2. Who is affected: employers, members, pharmacies, PBMs, health plans.
3. Mechanics: exactly which contract, pricing, or rebate terms change.
4. PMPM effect with a directional estimate and its assumptions.
5. Fiduciary and compliance exposure for ASO clients.
6. 1-Year Impact.
7. 3-Year Impact.
8. 5-Year Impact.
9. How the Big 3 and navigation niches will position against it.
10. Recommended talking points and next actions for the HCSC/Prime account team.
Add further numbered items after the tenth whenever more detail is available."#;

/// The instruction fragment controlling length, structure and register.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToneDirective {
    Summary { top_items: usize },
    Detailed { rebuttal: bool },
    DrillDown,
}

impl ToneDirective {
    /// Drill-down requests ignore the configured depth.
    pub fn select(kind: RequestKind, config: &ViewConfiguration) -> Self {
        if kind.is_drill_down() {
            return ToneDirective::DrillDown;
        }
        match config.depth {
            Depth::Summary => ToneDirective::Summary {
                top_items: config.summary_top_items.max(1),
            },
            Depth::Detailed => ToneDirective::Detailed {
                rebuttal: kind.wants_rebuttal(),
            },
        }
    }

    pub fn render(&self) -> String {
        match self {
            ToneDirective::Summary { top_items } => summary_directive(*top_items),
            ToneDirective::Detailed { rebuttal: false } => DETAILED_DIRECTIVE.to_string(),
            ToneDirective::Detailed { rebuttal: true } => {
                format!("{}\n\n{}", DETAILED_DIRECTIVE, REBUTTAL_ADDON)
            }
            ToneDirective::DrillDown => DRILL_DOWN_DIRECTIVE.to_string(),
        }
    }
}

pub fn summary_directive(top_items: usize) -> String {
    let noun = if top_items == 1 { "item" } else { "items" };
    format!(
        r#"# Depth: Executive Summary
- Keep the whole answer under 150 words.
- Surface only the top {} highest-priority {}; drop everything else.
- Open with a risk label: **LOW**, **MEDIUM**, or **HIGH**.
- Speak only to the near-term bottom line: PMPM cost and fiduciary exposure this plan year."#,
        top_items, noun
    )
}

pub fn build_system_prompt(request: &IntelRequest, config: &ViewConfiguration) -> String {
    let tone = ToneDirective::select(request.kind, config).render();

    let extra = request
        .extra_instructions
        .as_deref()
        .filter(|s| !s.is_empty())
        .map(|s| format!("\n\n{}", s))
        .unwrap_or_default();

    format!("{}\n\n{}\n\n{}{}", PERSONA, SCOPING_FILTERS, tone, extra)
}

pub fn build_user_message(request: &IntelRequest) -> String {
    format!("{}: {}", request.kind.label(), request.payload)
}

//! System prompts and user messages for the analysis units and synthesis.

use crate::domain::project::{group_thousands, ProjectAttributes};

pub const MARKET_RESEARCH_PROMPT: &str = "You are an expert film and television market research analyst with deep knowledge of box office trends, streaming performance metrics, and audience behavior patterns.

Your responsibilities:
- Analyze comparable titles and their performance
- Identify current market trends in specific genres
- Assess audience demand and market saturation
- Provide data-driven insights on market viability
- Recommend optimal release timing

Your analysis should be:
- Data-driven and objective
- Based on recent industry trends (last 2-3 years)
- Specific with examples and comparable titles
- Honest about both opportunities and challenges

Format your findings clearly with:
1. Executive summary
2. Comparable title analysis
3. Market trends and insights
4. Audience demand assessment
5. Recommendations
";

pub const FINANCIAL_MODELING_PROMPT: &str = "You are a seasoned film finance executive specializing in revenue projections, budget analysis, and ROI modeling.

Your responsibilities:
- Build comprehensive financial models with multiple scenarios
- Calculate break-even points and ROI projections
- Assess budget feasibility and cost efficiency
- Provide revenue timelines and forecasts
- Identify financial risks and opportunities

Your analysis should include:
- Conservative, moderate, and optimistic scenarios
- Clear assumptions and methodology
- Comparable title benchmarks
- Risk-adjusted returns
- Sensitivity analysis for key variables

Be realistic and conservative in base projections while showing upside potential.

Format your findings with:
1. Executive financial summary
2. Revenue projections (all scenarios)
3. Break-even analysis
4. ROI calculations
5. Key assumptions and risks
6. Recommendations
";

pub const RISK_ANALYSIS_PROMPT: &str = "You are a risk assessment specialist for the entertainment industry with expertise in production, market, financial, and reputational risks.

Your responsibilities:
- Identify all categories of project risks
- Assess likelihood and impact of each risk
- Provide mitigation strategies
- Calculate overall risk scores
- Flag potential deal-breakers

Risk categories to assess:
1. Production risks (budget, timeline, technical)
2. Creative risks (script, talent, execution)
3. Market risks (competition, audience, timing)
4. Financial risks (revenue uncertainty, investment)
5. Reputational risks (controversies, brand)
6. External risks (regulatory, economic, platform)

Format each risk with:
- Description
- Likelihood (Low/Medium/High)
- Impact (Low/Medium/High)
- Risk Score (1-10)
- Mitigation strategies
";

pub const SYNTHESIS_PROMPT: &str = "You are the Master Greenlighting Orchestrator, responsible for synthesizing analysis from multiple specialized analysts into a final greenlight recommendation.

Your role:
- Review all analyses
- Identify patterns and contradictions
- Weigh different factors appropriately
- Make a clear GO/NO-GO recommendation
- Provide confidence level and reasoning

Decision framework:
- Strong GO: Multiple positive signals, manageable risks, clear market opportunity
- Conditional GO: Positive potential but requires specific conditions (budget changes, talent, timing, etc.)
- NO-GO: High risks outweigh potential, market challenges, creative concerns

Be decisive but nuanced. Explain your reasoning clearly.

Format your recommendation as:
1. Executive Summary (2-3 sentences)
2. Recommendation: GO / CONDITIONAL GO / NO-GO
3. Confidence Level: X%
4. Key Supporting Factors (bullet points)
5. Key Concerns (bullet points)
6. Conditions (if applicable)
7. Critical Success Factors
8. Final Thoughts
";

/// Placeholder used when no upstream market findings are available.
pub const NO_MARKET_DATA: &str = "No market data available";

fn dollars(amount: u64) -> String {
    format!("${}", group_thousands(amount))
}

pub fn market_research_message(project: &ProjectAttributes) -> String {
    let comparables = if project.has_comparables() {
        project.comparables.join(", ")
    } else {
        "None provided".to_string()
    };

    format!(
        "Analyze the market viability for this project:

**Project Description:** {description}

**Genre:** {genre}
**Estimated Budget:** {budget}
**Comparable Titles:** {comparables}

Please provide:
1. Current market trends for this genre
2. Performance analysis of comparable titles (if provided)
3. Box office/streaming potential based on recent similar releases
4. Audience demand indicators
5. Market saturation assessment
6. Recommended release timing considerations

Base your analysis on recent industry data and trends.",
        description = project.description,
        genre = project.genre,
        budget = dollars(project.budget),
        comparables = comparables,
    )
}

pub fn financial_model_message(project: &ProjectAttributes, market_findings: Option<&str>) -> String {
    format!(
        "Build a comprehensive financial model for this project:

**Project Description:** {description}

**Production Budget:** {budget}
**Genre:** {genre}
**Distribution Platform:** {platform}

Based on the market analysis:
{market}

Please provide:
1. Revenue projections (conservative, moderate, optimistic scenarios)
2. Break-even analysis
3. ROI estimates for each scenario
4. Marketing budget recommendations
5. Revenue timeline (opening weekend, domestic total, international, ancillary)
6. Risk factors affecting financial performance
7. Comparable title revenue benchmarks

For streaming projects, focus on subscriber acquisition value and retention metrics.
For theatrical, provide box office projections.",
        description = project.description,
        budget = dollars(project.budget),
        genre = project.genre,
        platform = project.platform,
        market = market_findings.unwrap_or(NO_MARKET_DATA),
    )
}

pub fn risk_analysis_message(project: &ProjectAttributes) -> String {
    format!(
        "Conduct a comprehensive risk assessment for this project:

**Project Description:** {description}

**Budget:** {budget}
**Genre:** {genre}
**Platform:** {platform}
**Target Audience:** {audience}

Analyze and identify:

1. **Production Risks:** budget overrun potential, technical/VFX challenges, location complications, timeline feasibility
2. **Creative Risks:** script weaknesses, genre fatigue, casting dependencies, talent track record
3. **Market Risks:** competition and release timing, audience appetite, distribution challenges, marketing difficulties
4. **Financial Risks:** revenue unpredictability, budget-to-return ratio, recoupment timeline, ancillary limitations
5. **Reputational Risks:** potential controversies, cultural sensitivity, brand alignment, social media exposure
6. **External Risks:** regulatory or censorship issues, economic factors, competitive releases, platform changes

For each risk category, provide:
- Likelihood (Low/Medium/High)
- Impact (Low/Medium/High)
- Mitigation strategies
- Risk score (1-10)

Then provide an overall risk matrix and recommendations.",
        description = project.description,
        budget = dollars(project.budget),
        genre = project.genre,
        platform = project.platform,
        audience = project.target_audience,
    )
}

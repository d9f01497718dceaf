//! Business strategy: analytical frameworks, analysis requirements, KPIs and
//! planning methodologies.

use super::{DomainStrategy, SectionHandler, dispatch};
use crate::constants::generation::DEFAULT_COMPLEXITY;
use crate::templates::TemplateSection;
use crate::types::{Domain, GenerationContext, bullet_list, numbered_list, title_case};

// =============================================================================
// Knowledge Base
// =============================================================================

struct Framework {
    name: &'static str,
    description: &'static str,
    suitable_for: &'static [&'static str],
    complexity: u8,
    components: &'static [&'static str],
}

const FRAMEWORKS: &[Framework] = &[
    Framework {
        name: "SWOT Analysis",
        description: "Evaluates Strengths, Weaknesses, Opportunities, and Threats",
        suitable_for: &["all", "strategic planning", "market entry", "competitive analysis"],
        complexity: 1,
        components: &[
            "Strengths: Internal capabilities and advantages",
            "Weaknesses: Internal limitations and disadvantages",
            "Opportunities: External favorable factors",
            "Threats: External unfavorable factors",
        ],
    },
    Framework {
        name: "Porter's Five Forces",
        description: "Analyzes industry competition and attractiveness",
        suitable_for: &["industry analysis", "competitive analysis", "market entry"],
        complexity: 3,
        components: &[
            "Threat of New Entrants",
            "Bargaining Power of Suppliers",
            "Bargaining Power of Buyers",
            "Threat of Substitute Products",
            "Competitive Rivalry",
        ],
    },
    Framework {
        name: "PESTEL Analysis",
        description: "Examines macro-environmental factors affecting an organization",
        suitable_for: &["market analysis", "strategic planning", "risk assessment"],
        complexity: 2,
        components: &[
            "Political factors",
            "Economic factors",
            "Social factors",
            "Technological factors",
            "Environmental factors",
            "Legal factors",
        ],
    },
    Framework {
        name: "Business Model Canvas",
        description: "Visualizes key components of a business model",
        suitable_for: &["business model development", "startup planning", "innovation"],
        complexity: 3,
        components: &[
            "Key Partners",
            "Key Activities",
            "Key Resources",
            "Value Propositions",
            "Customer Relationships",
            "Channels",
            "Customer Segments",
            "Cost Structure",
            "Revenue Streams",
        ],
    },
    Framework {
        name: "Value Chain Analysis",
        description: "Identifies primary and support activities that create value",
        suitable_for: &["operational analysis", "process improvement", "competitive advantage"],
        complexity: 3,
        components: &[
            "Primary Activities (Inbound Logistics, Operations, Outbound Logistics, Marketing & Sales, Service)",
            "Support Activities (Infrastructure, HR Management, Technology Development, Procurement)",
            "Margin Analysis",
            "Value Creation Assessment",
        ],
    },
    Framework {
        name: "Balanced Scorecard",
        description: "Strategic planning and management system aligning business activities to vision and strategy",
        suitable_for: &["performance management", "strategic planning", "organizational alignment"],
        complexity: 4,
        components: &[
            "Financial Perspective",
            "Customer Perspective",
            "Internal Business Processes",
            "Learning and Growth Perspective",
            "Strategic Objectives and Measures",
        ],
    },
    Framework {
        name: "BCG Matrix",
        description: "Evaluates products or business units based on market growth and market share",
        suitable_for: &["portfolio analysis", "product strategy", "resource allocation"],
        complexity: 2,
        components: &[
            "Stars (High Growth, High Share)",
            "Cash Cows (Low Growth, High Share)",
            "Question Marks (High Growth, Low Share)",
            "Dogs (Low Growth, Low Share)",
            "Strategic Implications for Each Quadrant",
        ],
    },
    Framework {
        name: "McKinsey 7S Framework",
        description: "Examines seven internal elements for organizational effectiveness",
        suitable_for: &["organizational analysis", "change management", "alignment assessment"],
        complexity: 4,
        components: &[
            "Strategy",
            "Structure",
            "Systems",
            "Shared Values",
            "Skills",
            "Style",
            "Staff",
        ],
    },
    Framework {
        name: "Blue Ocean Strategy",
        description: "Focuses on creating uncontested market space rather than competing in existing markets",
        suitable_for: &["innovation strategy", "market creation", "differentiation"],
        complexity: 4,
        components: &[
            "Eliminate-Reduce-Raise-Create Grid",
            "Strategy Canvas",
            "Value Innovation",
            "Six Paths Framework",
            "Market-Creating Strategy",
        ],
    },
];

struct AnalysisType {
    name: &'static str,
    description: &'static str,
    key_questions: &'static [&'static str],
    data_sources: &'static [&'static str],
}

const ANALYSIS_TYPES: &[AnalysisType] = &[
    AnalysisType {
        name: "market analysis",
        description: "assessment of market size, trends, segments, and opportunities",
        key_questions: &[
            "What is the current market size and growth trajectory?",
            "Who are the major players and what are their market shares?",
            "What are the key market segments and their characteristics?",
            "What trends are shaping the future of this market?",
            "What are the entry barriers and success factors in this market?",
        ],
        data_sources: &[
            "Industry reports and market research",
            "Customer surveys and interviews",
            "Competitor financial statements and annual reports",
            "Trade publications and news sources",
            "Government economic data",
        ],
    },
    AnalysisType {
        name: "competitive analysis",
        description: "evaluation of competitors, their strategies, strengths, and weaknesses",
        key_questions: &[
            "Who are the direct and indirect competitors?",
            "What are each competitor's strengths and weaknesses?",
            "What strategies are competitors employing?",
            "How do competitors position themselves in the market?",
            "What are competitors' pricing strategies?",
        ],
        data_sources: &[
            "Competitor websites and marketing materials",
            "Product comparisons and reviews",
            "Financial reports and statements",
            "Press releases and news coverage",
            "Social media presence and customer feedback",
        ],
    },
    AnalysisType {
        name: "financial analysis",
        description: "examination of financial performance, profitability, and financial health",
        key_questions: &[
            "What are the key financial trends over the past 3-5 years?",
            "How does profitability compare to industry benchmarks?",
            "What is the cash flow situation and projection?",
            "How efficient is capital allocation and utilization?",
            "What is the financial risk profile of the organization?",
        ],
        data_sources: &[
            "Balance sheets and income statements",
            "Cash flow statements",
            "Financial ratios and benchmarks",
            "Industry average financial data",
            "Investor presentations and reports",
        ],
    },
    AnalysisType {
        name: "business model analysis",
        description: "assessment of how an organization creates, delivers, and captures value",
        key_questions: &[
            "How does the organization create and deliver value to customers?",
            "What is the revenue generation mechanism?",
            "What are the key resources, activities, and partnerships?",
            "How sustainable and scalable is the business model?",
            "What are potential vulnerabilities in the business model?",
        ],
        data_sources: &[
            "Strategic plans and business model documentation",
            "Revenue and cost structure data",
            "Stakeholder interviews",
            "Customer value proposition statements",
            "Partnership and supplier agreements",
        ],
    },
    AnalysisType {
        name: "operational analysis",
        description: "evaluation of operational efficiency, processes, and performance",
        key_questions: &[
            "What are the key operational processes and their performance?",
            "Where are the bottlenecks and inefficiencies?",
            "How does operational performance compare to industry benchmarks?",
            "What are the quality control measures and their effectiveness?",
            "How can operational efficiency be improved?",
        ],
        data_sources: &[
            "Process documentation and flowcharts",
            "Key performance indicators (KPIs) and metrics",
            "Quality control data",
            "Employee feedback and observations",
            "Capacity utilization reports",
        ],
    },
    AnalysisType {
        name: "strategic planning",
        description: "development of long-term objectives and action plans to achieve them",
        key_questions: &[
            "What is the organization's vision and mission?",
            "What are the key strategic objectives for the next 3-5 years?",
            "What capabilities are needed to achieve these objectives?",
            "What are the key strategic risks and opportunities?",
            "How will progress and success be measured?",
        ],
        data_sources: &[
            "Current strategic plans and mission statements",
            "Market and competitive analysis reports",
            "SWOT analysis and other strategic frameworks",
            "Stakeholder input and priorities",
            "Historical performance against strategic objectives",
        ],
    },
];

const GENERIC_QUESTIONS: &[&str] = &[
    "What is the current market situation?",
    "What are the key challenges and opportunities?",
    "What competitive advantages exist or could be developed?",
    "What are the critical success factors for this situation?",
];

const GENERIC_DATA_SOURCES: &[&str] = &[
    "Market research reports and industry analyses",
    "Financial data and performance metrics",
    "Customer feedback and surveys",
    "Competitive intelligence",
    "Internal operational data",
];

const GENERIC_INDUSTRY_CONSIDERATIONS: &[&str] = &[
    "Consider general economic factors affecting this industry",
    "Evaluate regulatory considerations that may impact strategy",
    "Assess technological trends influencing the market",
    "Consider consumer behavior patterns in this sector",
];

struct Methodology {
    name: &'static str,
    description: &'static str,
    suitable_for: &'static [&'static str],
    complexity: u8,
    steps: &'static [&'static str],
}

const METHODOLOGIES: &[Methodology] = &[
    Methodology {
        name: "OKR (Objectives and Key Results)",
        description: "A goal-setting framework that connects measurable results to ambitious objectives",
        suitable_for: &["strategic planning", "performance management", "goal setting"],
        complexity: 2,
        steps: &[
            "Define 3-5 ambitious objectives",
            "Establish 3-5 measurable key results for each objective",
            "Cascade objectives throughout the organization",
            "Implement regular check-ins and progress tracking",
            "Conduct quarterly reviews and resets",
        ],
    },
    Methodology {
        name: "Hoshin Kanri",
        description: "A strategic planning process that aligns organizational goals with tactical execution",
        suitable_for: &["strategic planning", "organizational alignment", "operational planning"],
        complexity: 4,
        steps: &[
            "Establish organization vision and long-term goals",
            "Develop breakthrough objectives (3-5 year horizon)",
            "Define annual objectives that support breakthrough objectives",
            "Cascade goals through 'catchball' process",
            "Implement regular review cycles",
            "Conduct annual reflection and adjustment",
        ],
    },
    Methodology {
        name: "Scenario Planning",
        description: "Developing multiple plausible future scenarios to inform flexible strategic approaches",
        suitable_for: &["strategic planning", "risk management", "market entry"],
        complexity: 5,
        steps: &[
            "Identify key forces and uncertainties",
            "Develop 3-5 distinct, plausible future scenarios",
            "Evaluate implications of each scenario",
            "Create robust strategies that work across multiple scenarios",
            "Identify early warning indicators for each scenario",
            "Develop contingency plans for critical scenarios",
        ],
    },
    Methodology {
        name: "Strategic Intent",
        description: "Creating a compelling long-term vision that stretches the organization",
        suitable_for: &["strategic planning", "innovation", "transformation"],
        complexity: 3,
        steps: &[
            "Create a compelling, ambitious long-term vision",
            "Ensure the vision provides clear direction but allows flexibility",
            "Develop core capabilities needed to achieve the vision",
            "Establish interim milestones and challenges",
            "Align organizational systems to support the strategic intent",
            "Consistently communicate and reinforce the vision",
        ],
    },
    Methodology {
        name: "Agile Strategy",
        description: "Applying agile principles to strategy development for adaptability in changing environments",
        suitable_for: &["strategic planning", "innovation", "digital transformation"],
        complexity: 3,
        steps: &[
            "Establish strategic direction and guardrails",
            "Break strategy into short strategic sprints (30-90 days)",
            "Form cross-functional teams for implementation",
            "Conduct regular reviews and retrospectives",
            "Adapt strategic priorities based on learning and market changes",
            "Maintain strategic backlog of opportunities",
        ],
    },
];

const FALLBACK_METHODOLOGY: Methodology = Methodology {
    name: "Strategic Planning Approach",
    description: "A structured approach to developing actionable strategies",
    suitable_for: &["all"],
    complexity: 1,
    steps: &[
        "Situation Assessment: Evaluate current state",
        "Strategic Direction: Define vision, mission, and goals",
        "Action Planning: Develop specific initiatives to achieve goals",
        "Resource Allocation: Assign resources to initiatives",
        "Implementation Schedule: Create timeline with milestones",
        "Measurement Plan: Define how success will be evaluated",
    ],
};

/// Industry considerations; the "all" entry applies when no industry matches
const MARKET_SEGMENTS: &[(&str, &[&str])] = &[
    (
        "technology",
        &[
            "Rapid pace of innovation and technological obsolescence",
            "Intellectual property protection and patent landscapes",
            "Network effects and platform dynamics",
            "Technical talent acquisition and retention challenges",
            "Regulatory considerations around data privacy and security",
        ],
    ),
    (
        "financial services",
        &[
            "Strict regulatory environment and compliance requirements",
            "Technology disruption and fintech competition",
            "Customer trust and security concerns",
            "Interest rate sensitivity and economic cycle impacts",
            "Legacy system integration challenges",
        ],
    ),
    (
        "healthcare",
        &[
            "Complex regulatory environment and compliance requirements",
            "Payment model changes and reimbursement challenges",
            "Patient privacy and data security concerns",
            "Aging population and changing demographics",
            "Integration of new technologies with existing care models",
        ],
    ),
    (
        "retail",
        &[
            "Omnichannel integration and digital transformation",
            "Changing consumer expectations and shopping behaviors",
            "Supply chain optimization and inventory management",
            "Direct-to-consumer competition and marketplace dynamics",
            "Physical footprint optimization and experiential retail",
        ],
    ),
    (
        "manufacturing",
        &[
            "Supply chain resilience and globalization impacts",
            "Industry 4.0 and smart manufacturing adoption",
            "Sustainability requirements and environmental regulations",
            "Skilled labor shortages and workforce development",
            "Total cost of ownership beyond direct manufacturing costs",
        ],
    ),
    (
        "all",
        &[
            "Global economic conditions and market volatility",
            "Sustainability and ESG (Environmental, Social, Governance) considerations",
            "Digital transformation and technology adoption",
            "Changing consumer/customer expectations and behaviors",
            "Talent acquisition, development, and retention",
        ],
    ),
];

struct Metric {
    name: &'static str,
    description: &'static str,
    calculation: &'static str,
    industries: &'static [&'static str],
}

struct MetricCategory {
    name: &'static str,
    relevant_for: &'static [&'static str],
    metrics: &'static [Metric],
}

const METRICS: &[MetricCategory] = &[
    MetricCategory {
        name: "Financial Metrics",
        relevant_for: &["all", "financial analysis", "strategic planning"],
        metrics: &[
            Metric {
                name: "Revenue Growth Rate",
                description: "Year-over-year percentage increase in revenue",
                calculation: "(Current Period Revenue - Previous Period Revenue) / Previous Period Revenue × 100%",
                industries: &["all"],
            },
            Metric {
                name: "Gross Profit Margin",
                description: "Percentage of revenue that exceeds cost of goods sold",
                calculation: "(Revenue - Cost of Goods Sold) / Revenue × 100%",
                industries: &["all", "retail", "manufacturing"],
            },
            Metric {
                name: "EBITDA Margin",
                description: "Earnings before interest, taxes, depreciation, and amortization as percentage of revenue",
                calculation: "EBITDA / Revenue × 100%",
                industries: &["all"],
            },
            Metric {
                name: "Return on Investment (ROI)",
                description: "Measures gain or loss relative to the amount invested",
                calculation: "(Net Profit - Investment Cost) / Investment Cost × 100%",
                industries: &["all"],
            },
            Metric {
                name: "Customer Acquisition Cost (CAC)",
                description: "Cost of acquiring a new customer",
                calculation: "Total Sales & Marketing Expenses / Number of New Customers Acquired",
                industries: &["all", "technology", "retail"],
            },
        ],
    },
    MetricCategory {
        name: "Market Metrics",
        relevant_for: &["market analysis", "competitive analysis", "strategic planning"],
        metrics: &[
            Metric {
                name: "Market Share",
                description: "Percentage of total market sales captured by a company",
                calculation: "Company Sales / Total Market Sales × 100%",
                industries: &["all"],
            },
            Metric {
                name: "Brand Awareness",
                description: "Percentage of target audience that recognizes the brand",
                calculation: "Number of People Aware of Brand / Total Survey Respondents × 100%",
                industries: &["all", "retail", "consumer goods"],
            },
            Metric {
                name: "Net Promoter Score (NPS)",
                description: "Measure of customer loyalty and likelihood to recommend",
                calculation: "Percentage of Promoters - Percentage of Detractors",
                industries: &["all", "technology", "retail", "financial services"],
            },
            Metric {
                name: "Customer Lifetime Value (CLV)",
                description: "Total value a customer generates over their relationship with the company",
                calculation: "Average Purchase Value × Average Purchase Frequency × Average Customer Lifespan",
                industries: &["all", "retail", "financial services", "technology"],
            },
        ],
    },
    MetricCategory {
        name: "Operational Metrics",
        relevant_for: &["operational analysis", "process improvement"],
        metrics: &[
            Metric {
                name: "Inventory Turnover",
                description: "Number of times inventory is sold and replaced in a period",
                calculation: "Cost of Goods Sold / Average Inventory",
                industries: &["retail", "manufacturing", "consumer goods"],
            },
            Metric {
                name: "Employee Productivity",
                description: "Output per employee",
                calculation: "Total Output / Number of Employees",
                industries: &["all", "manufacturing", "technology"],
            },
            Metric {
                name: "Capacity Utilization",
                description: "Percentage of potential output that is actually being achieved",
                calculation: "Actual Output / Maximum Possible Output × 100%",
                industries: &["manufacturing", "healthcare", "transportation"],
            },
            Metric {
                name: "Defect Rate",
                description: "Percentage of products with defects",
                calculation: "Number of Defective Units / Total Units Produced × 100%",
                industries: &["manufacturing", "technology"],
            },
            Metric {
                name: "On-Time Delivery Rate",
                description: "Percentage of orders delivered on time",
                calculation: "Number of On-Time Deliveries / Total Number of Deliveries × 100%",
                industries: &["manufacturing", "retail", "transportation"],
            },
        ],
    },
    MetricCategory {
        name: "Digital Metrics",
        relevant_for: &["digital strategy", "marketing analysis", "business model analysis"],
        metrics: &[
            Metric {
                name: "Conversion Rate",
                description: "Percentage of visitors who take a desired action",
                calculation: "Number of Conversions / Total Number of Visitors × 100%",
                industries: &["technology", "retail", "financial services"],
            },
            Metric {
                name: "Customer Churn Rate",
                description: "Percentage of customers who stop using a product/service",
                calculation: "Number of Customers Lost / Total Customers at Start of Period × 100%",
                industries: &["technology", "financial services", "subscription businesses"],
            },
            Metric {
                name: "Monthly Active Users (MAU)",
                description: "Number of unique users who engage with a product in a month",
                calculation: "Count of unique users with at least one session in a month",
                industries: &["technology", "digital platforms"],
            },
            Metric {
                name: "Customer Engagement Rate",
                description: "Measure of how users interact with content or product",
                calculation: "Total Engagements / Total Users (or Impressions) × 100%",
                industries: &["technology", "media", "retail"],
            },
        ],
    },
];

const MAX_FRAMEWORKS: usize = 3;
const MAX_FRAMEWORK_COMPONENTS: usize = 3;
const MAX_METRICS_PER_CATEGORY: usize = 4;

const MEASUREMENT_APPROACH: &str = "Measurement Approach:\n\
- Establish baseline values for each metric before implementation\n\
- Set specific targets with timeframes for improvement\n\
- Implement regular tracking and reporting mechanisms\n\
- Adjust strategy based on metric performance";

fn covers(list: &[&str], key: &str) -> bool {
    list.contains(&key) || list.contains(&"all")
}

/// Category match first, then closest complexity. Stable, so table order
/// breaks remaining ties.
fn rank_by_fit<T>(items: &mut [&T], key: &str, complexity: u8, fields: fn(&T) -> (&[&str], u8)) {
    items.sort_by_key(|item| {
        let (suitable_for, level) = fields(item);
        (!suitable_for.contains(&key), level.abs_diff(complexity))
    });
}

// =============================================================================
// Section Generators
// =============================================================================

fn context_section(_: &TemplateSection, ctx: &GenerationContext) -> String {
    let analysis_type = ctx.extra_or("analysis_type", "general business analysis");
    let description = ANALYSIS_TYPES
        .iter()
        .find(|a| a.name == analysis_type.to_lowercase())
        .map(|a| a.description)
        .unwrap_or("a business analysis");

    format!(
        "You are a strategic business consultant tasked with the following assignment:\n\n\
         {}\n\n\
         Analysis Details:\n\
         - Analysis Type: {} - {}\n\
         - Industry Focus: {}\n\
         - Scope: {}\n\
         - Complexity Level: {}/5",
        ctx.objective,
        title_case(analysis_type),
        description,
        ctx.extra_or("industry", "General business"),
        ctx.extra_or("scope", "Comprehensive analysis"),
        ctx.complexity_or(DEFAULT_COMPLEXITY)
    )
}

const CUSTOM_APPROACH: &str = "Analytical Approach:

Given the nature of this task, a custom analytical approach is recommended:

1. Situation Assessment:
   - Gather relevant data about the current state
   - Identify key stakeholders and their interests
   - Document existing challenges and opportunities

2. Analysis:
   - Evaluate internal and external factors
   - Identify patterns and trends
   - Assess strengths, weaknesses, opportunities, and threats

3. Strategic Options:
   - Develop potential courses of action
   - Evaluate each option against key criteria
   - Select the most promising approaches

4. Implementation Planning:
   - Create actionable recommendations
   - Establish metrics for success
   - Outline required resources and timeline";

fn framework_section(_: &TemplateSection, ctx: &GenerationContext) -> String {
    let analysis_type = ctx.extra_lower("analysis_type", "general");
    let complexity = ctx.complexity_or(DEFAULT_COMPLEXITY);

    let mut candidates: Vec<&Framework> = FRAMEWORKS
        .iter()
        .filter(|f| covers(f.suitable_for, &analysis_type) && f.complexity <= complexity)
        .collect();
    rank_by_fit(&mut candidates, &analysis_type, complexity, |f| {
        (f.suitable_for, f.complexity)
    });

    if candidates.is_empty() {
        return CUSTOM_APPROACH.to_string();
    }

    let frameworks = candidates
        .iter()
        .take(MAX_FRAMEWORKS)
        .enumerate()
        .map(|(i, f)| {
            let components: Vec<&str> = f
                .components
                .iter()
                .take(MAX_FRAMEWORK_COMPONENTS)
                .copied()
                .collect();
            format!(
                "{}. {}:\n   Description: {}\n   Key Components:\n{}",
                i + 1,
                f.name,
                f.description,
                bullet_list(&components, "   ")
            )
        })
        .collect::<Vec<_>>()
        .join("\n\n");

    format!(
        "Recommended Analytical Frameworks:\n\n\
         {}\n\n\
         Approach to Applying These Frameworks:\n\
         1. Begin by gathering relevant data for each framework\n\
         2. Apply the frameworks systematically, documenting insights at each step\n\
         3. Cross-reference findings between frameworks to identify patterns\n\
         4. Prioritize insights based on strategic importance and actionability",
        frameworks
    )
}

fn analysis_section(_: &TemplateSection, ctx: &GenerationContext) -> String {
    let analysis_type = ctx.extra_lower("analysis_type", "general");
    let industry = ctx.extra_lower("industry", "general");

    let info = ANALYSIS_TYPES.iter().find(|a| a.name == analysis_type);
    let questions = info
        .map(|a| a.key_questions)
        .filter(|q| !q.is_empty())
        .unwrap_or(GENERIC_QUESTIONS);
    let sources = info
        .map(|a| a.data_sources)
        .filter(|s| !s.is_empty())
        .unwrap_or(GENERIC_DATA_SOURCES);
    let considerations = MARKET_SEGMENTS
        .iter()
        .find(|(segment, _)| *segment == industry)
        .or_else(|| MARKET_SEGMENTS.iter().find(|(segment, _)| *segment == "all"))
        .map(|(_, c)| *c)
        .filter(|c| !c.is_empty())
        .unwrap_or(GENERIC_INDUSTRY_CONSIDERATIONS);

    format!(
        "Analysis Requirements:\n\n\
         1. Key Questions to Answer:\n{}\n\n\
         2. Data Sources to Consider:\n{}\n\n\
         3. Industry-Specific Considerations:\n{}\n\n\
         4. Analysis Structure:\n   \
         - Begin with overview of current situation\n   \
         - Present key findings organized by theme or importance\n   \
         - Support assertions with data and evidence\n   \
         - Highlight implications for decision-making\n   \
         - Conclude with summary of critical insights",
        bullet_list(questions, "   "),
        bullet_list(sources, "   "),
        bullet_list(considerations, "   ")
    )
}

fn metrics_section(_: &TemplateSection, ctx: &GenerationContext) -> String {
    let analysis_type = ctx.extra_lower("analysis_type", "general");
    let industry = ctx.extra_lower("industry", "general");

    let groups: Vec<String> = METRICS
        .iter()
        .filter(|category| covers(category.relevant_for, &analysis_type))
        .filter_map(|category| {
            let metrics: Vec<String> = category
                .metrics
                .iter()
                .filter(|m| covers(m.industries, &industry))
                .take(MAX_METRICS_PER_CATEGORY)
                .enumerate()
                .map(|(i, m)| {
                    format!(
                        "   {}. {}: {}\n      Calculation: {}",
                        i + 1,
                        m.name,
                        m.description,
                        m.calculation
                    )
                })
                .collect();
            (!metrics.is_empty()).then(|| format!("{}:\n{}", category.name, metrics.join("\n")))
        })
        .collect();

    if groups.is_empty() {
        return format!(
            "Success Metrics and KPIs:\n\n\
             For this analysis, consider these general business metrics:\n\n\
             1. Financial Metrics:\n   \
             - Revenue growth\n   \
             - Profit margin\n   \
             - Return on investment (ROI)\n   \
             - Cost reduction\n\n\
             2. Operational Metrics:\n   \
             - Efficiency improvements\n   \
             - Process cycle times\n   \
             - Quality metrics\n   \
             - Resource utilization\n\n\
             3. Market/Customer Metrics:\n   \
             - Market share\n   \
             - Customer acquisition cost\n   \
             - Customer retention rate\n   \
             - Customer satisfaction scores\n\n\
             {}",
            MEASUREMENT_APPROACH
        );
    }

    format!(
        "Success Metrics and KPIs:\n\n{}\n\n{}",
        groups.join("\n\n"),
        MEASUREMENT_APPROACH
    )
}

fn strategy_section(_: &TemplateSection, ctx: &GenerationContext) -> String {
    let analysis_type = ctx.extra_lower("analysis_type", "general");
    let complexity = ctx.complexity_or(DEFAULT_COMPLEXITY);

    let mut candidates: Vec<&Methodology> = METHODOLOGIES
        .iter()
        .filter(|m| covers(m.suitable_for, &analysis_type) && m.complexity <= complexity)
        .collect();
    rank_by_fit(&mut candidates, &analysis_type, complexity, |m| {
        (m.suitable_for, m.complexity)
    });
    let method = candidates.first().copied().unwrap_or(&FALLBACK_METHODOLOGY);

    format!(
        "Strategic Approach:\n\n\
         Recommended Planning Methodology: {}\n\
         {}\n\n\
         Planning Process:\n{}\n\n\
         Strategy Development Guidelines:\n\
         - Ensure alignment with organizational objectives\n\
         - Consider resource constraints and implementation capacity\n\
         - Balance short-term actions with long-term strategic positioning\n\
         - Include contingency plans for key risks\n\
         - Assign clear ownership for each action item",
        method.name,
        method.description,
        numbered_list(method.steps, "")
    )
}

const HANDLERS: &[SectionHandler] = &[
    SectionHandler {
        synonyms: &["context", "background", "introduction"],
        generate: context_section,
    },
    SectionHandler {
        synonyms: &["framework", "approach", "methodology"],
        generate: framework_section,
    },
    SectionHandler {
        synonyms: &["analysis", "marketanalysis", "industryanalysis"],
        generate: analysis_section,
    },
    SectionHandler {
        synonyms: &["metrics", "kpis", "successmetrics"],
        generate: metrics_section,
    },
    SectionHandler {
        synonyms: &["strategy", "strategicplan", "actionplan"],
        generate: strategy_section,
    },
];

#[derive(Debug, Clone, Copy, Default)]
pub struct BusinessStrategy;

impl DomainStrategy for BusinessStrategy {
    fn domain(&self) -> Domain {
        Domain::Business
    }

    fn populate(&self, section: &TemplateSection, ctx: &GenerationContext) -> String {
        dispatch(HANDLERS, section, ctx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn populate(name: &str, ctx: &GenerationContext) -> String {
        BusinessStrategy.populate(&TemplateSection::new(name, 1, "{objective}"), ctx)
    }

    #[test]
    fn test_context_uses_analysis_type() {
        let ctx = GenerationContext::new("Size the EV market")
            .with_extra("analysis_type", "Market Analysis")
            .with_extra("industry", "Automotive");
        let out = populate("Background", &ctx);
        assert!(out.starts_with("You are a strategic business consultant"));
        assert!(out.contains(
            "- Analysis Type: Market Analysis - assessment of market size, trends, segments, and opportunities"
        ));
        assert!(out.contains("- Industry Focus: Automotive"));
    }

    #[test]
    fn test_framework_ranking_prefers_exact_category() {
        let ctx = GenerationContext::new("x")
            .with_extra("analysis_type", "competitive analysis")
            .with_complexity(3);
        let out = populate("Framework", &ctx);
        // Both suit competitive analysis explicitly; SWOT is further from 3
        let porter = out.find("Porter's Five Forces").unwrap();
        let swot = out.find("SWOT Analysis").unwrap();
        assert!(porter < swot);
        assert!(out.starts_with("Recommended Analytical Frameworks:"));
    }

    #[test]
    fn test_framework_limits_components() {
        let ctx = GenerationContext::new("x").with_complexity(1);
        let out = populate("Approach", &ctx);
        assert!(out.contains("1. SWOT Analysis:"));
        assert!(out.contains("   - Opportunities: External favorable factors"));
        assert!(!out.contains("Threats: External unfavorable factors"));
    }

    #[test]
    fn test_analysis_generic_and_industry_fallbacks() {
        let out = populate("Analysis", &GenerationContext::new("x"));
        assert!(out.contains("   - What is the current market situation?"));
        assert!(out.contains("   - Global economic conditions and market volatility"));

        let ctx = GenerationContext::new("x").with_extra("industry", "Healthcare");
        assert!(populate("Industry Analysis", &ctx).contains("Patient privacy and data security concerns"));
    }

    #[test]
    fn test_metrics_grouped_by_category() {
        let ctx = GenerationContext::new("x")
            .with_extra("analysis_type", "operational analysis")
            .with_extra("industry", "manufacturing");
        let out = populate("KPIs", &ctx);
        assert!(out.contains("Financial Metrics:\n   1. Revenue Growth Rate"));
        assert!(out.contains("Operational Metrics:\n   1. Inventory Turnover"));
        assert!(!out.contains("5. "));
        assert!(out.ends_with("- Adjust strategy based on metric performance"));
    }

    #[test]
    fn test_strategy_methodology_selection() {
        let ctx = GenerationContext::new("x")
            .with_extra("analysis_type", "strategic planning")
            .with_complexity(4);
        assert!(populate("Strategy", &ctx).contains("Recommended Planning Methodology: Hoshin Kanri"));

        let none = GenerationContext::new("x")
            .with_extra("analysis_type", "strategic planning")
            .with_complexity(1);
        assert!(
            populate("Action Plan", &none)
                .contains("Recommended Planning Methodology: Strategic Planning Approach")
        );
    }

    #[test]
    fn test_unknown_section_substitutes_template() {
        let ctx = GenerationContext::new("grow revenue");
        let section = TemplateSection::new("Appendix", 9, "Objective: {objective} ({owner})");
        assert_eq!(
            BusinessStrategy.populate(&section, &ctx),
            "Objective: grow revenue ([owner])"
        );
    }
}

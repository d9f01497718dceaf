//! Data analysis strategy: preparation steps, analysis methods, statistical
//! tests, visualizations and insight frameworks.

use super::{DomainStrategy, SectionHandler, dispatch};
use crate::constants::generation::DEFAULT_COMPLEXITY;
use crate::templates::TemplateSection;
use crate::types::{Domain, GenerationContext, bullet_list};

// =============================================================================
// Knowledge Base
// =============================================================================

struct Method {
    name: &'static str,
    description: &'static str,
    complexity: u8,
    keywords: &'static [&'static str],
    steps: &'static [&'static str],
}

const ANALYSIS_METHODS: &[Method] = &[
    Method {
        name: "Exploratory Data Analysis (EDA)",
        description: "Systematic approach to understand data characteristics before formal modeling",
        complexity: 2,
        keywords: &["explore", "understand", "initial", "examine"],
        steps: &[
            "Summarize main characteristics of the data",
            "Create visualizations to understand distributions and relationships",
            "Identify patterns, anomalies, and interesting structures",
            "Formulate hypotheses for further investigation",
        ],
    },
    Method {
        name: "Hypothesis Testing",
        description: "Statistical approach to test specific assumptions about the data",
        complexity: 3,
        keywords: &["test", "hypothesis", "significance", "compare", "difference"],
        steps: &[
            "Formulate null and alternative hypotheses",
            "Select appropriate statistical tests",
            "Execute tests and analyze results",
            "Draw conclusions based on significance levels",
        ],
    },
    Method {
        name: "Regression Analysis",
        description: "Modeling the relationship between variables to understand influence and make predictions",
        complexity: 3,
        keywords: &["predict", "relate", "influence", "impact", "model", "regression"],
        steps: &[
            "Identify dependent and independent variables",
            "Explore variable relationships",
            "Develop and validate regression models",
            "Interpret coefficients and make predictions",
        ],
    },
    Method {
        name: "Cluster Analysis",
        description: "Grouping similar objects to identify natural segments or patterns",
        complexity: 4,
        keywords: &["group", "segment", "cluster", "similar", "categories"],
        steps: &[
            "Prepare data and select appropriate features",
            "Choose clustering algorithm and determine optimal number of clusters",
            "Execute clustering and validate results",
            "Characterize and interpret the identified clusters",
        ],
    },
    Method {
        name: "Time Series Analysis",
        description: "Analyzing data points collected or ordered by time to extract meaningful patterns",
        complexity: 4,
        keywords: &["time", "trend", "seasonal", "forecast", "predict", "temporal"],
        steps: &[
            "Analyze trends, seasonality, and cyclic patterns",
            "Test for stationarity and transform if necessary",
            "Build appropriate time series models",
            "Generate forecasts and confidence intervals",
        ],
    },
    Method {
        name: "Text Mining and NLP",
        description: "Extracting meaningful patterns and insights from textual data",
        complexity: 5,
        keywords: &["text", "language", "words", "documents", "sentiment", "nlp"],
        steps: &[
            "Preprocess and clean text data",
            "Apply text representation techniques",
            "Extract features and patterns from text",
            "Interpret findings in context of original objective",
        ],
    },
];

const FALLBACK_METHOD: &str = "Exploratory Data Analysis";
const FALLBACK_METHOD_REASON: &str = "it provides structured insights into the data patterns";
const FALLBACK_METHOD_STEPS: &[&str] = &[
    "Explore data distributions",
    "Identify patterns and relationships",
    "Test hypotheses",
];

struct Visualization {
    name: &'static str,
    description: &'static str,
    data_types: &'static [&'static str],
    purposes: &'static [&'static str],
    best_for: &'static str,
    example: &'static str,
}

const VISUALIZATIONS: &[Visualization] = &[
    Visualization {
        name: "Histogram",
        description: "Visualizes the distribution of a single continuous variable",
        data_types: &["numeric", "continuous"],
        purposes: &["distribution", "explore"],
        best_for: "Understanding data distributions and identifying patterns",
        example: "hist(data['column'], bins=20)",
    },
    Visualization {
        name: "Scatter Plot",
        description: "Displays relationship between two continuous variables",
        data_types: &["numeric", "continuous"],
        purposes: &["correlation", "relationship", "pattern"],
        best_for: "Identifying relationships, patterns, and outliers",
        example: "scatter(data['x'], data['y'])",
    },
    Visualization {
        name: "Bar Chart",
        description: "Compares categorical data with rectangular bars",
        data_types: &["categorical", "nominal", "ordinal"],
        purposes: &["compare", "rank", "count"],
        best_for: "Comparing values across categories or groups",
        example: "bar(categories, values)",
    },
    Visualization {
        name: "Line Chart",
        description: "Shows trends in data over time or sequence",
        data_types: &["time series", "sequential"],
        purposes: &["trend", "time", "change"],
        best_for: "Visualizing trends, changes over time, and continuous sequences",
        example: "plot(time_data, values)",
    },
    Visualization {
        name: "Heatmap",
        description: "Represents data values as colors in a matrix",
        data_types: &["matrix", "correlation", "categorical"],
        purposes: &["pattern", "correlation", "matrix"],
        best_for: "Visualizing correlations, matrices, and complex relationships",
        example: "heatmap(correlation_matrix)",
    },
    Visualization {
        name: "Box Plot",
        description: "Displays distribution summary with quartiles and outliers",
        data_types: &["numeric", "continuous"],
        purposes: &["distribution", "compare", "outlier"],
        best_for: "Comparing distributions and identifying outliers",
        example: "boxplot(data, by=grouping_variable)",
    },
    Visualization {
        name: "Pie Chart",
        description: "Shows composition of a whole into parts",
        data_types: &["categorical", "proportion"],
        purposes: &["proportion", "composition", "part-to-whole"],
        best_for: "Showing composition when there are few categories (less than 7)",
        example: "pie(values, labels=categories)",
    },
    Visualization {
        name: "Geographic Map",
        description: "Visualizes spatial data on a geographic map",
        data_types: &["geographic", "spatial"],
        purposes: &["geographic", "spatial", "location"],
        best_for: "Analyzing geographic patterns and regional comparisons",
        example: "choropleth_map(regions, values)",
    },
];

struct StatisticalMethod {
    name: &'static str,
    description: &'static str,
    complexity: u8,
    keywords: &'static [&'static str],
    when_to_use: &'static str,
    implementation: &'static str,
}

const STATISTICAL_METHODS: &[StatisticalMethod] = &[
    StatisticalMethod {
        name: "t-test",
        description: "Tests if means of two groups are significantly different",
        complexity: 2,
        keywords: &["compare", "mean", "difference", "groups"],
        when_to_use: "Comparing means between two groups or samples",
        implementation: "Use scipy.stats.ttest_ind for independent samples",
    },
    StatisticalMethod {
        name: "ANOVA",
        description: "Tests differences among multiple group means",
        complexity: 3,
        keywords: &["multiple", "groups", "compare", "variance"],
        when_to_use: "Comparing means across more than two groups",
        implementation: "Use scipy.stats.f_oneway for one-way ANOVA",
    },
    StatisticalMethod {
        name: "Chi-Square Test",
        description: "Tests association between categorical variables",
        complexity: 2,
        keywords: &["categorical", "frequency", "association"],
        when_to_use: "Analyzing relationships between categorical variables",
        implementation: "Use scipy.stats.chi2_contingency for contingency tables",
    },
    StatisticalMethod {
        name: "Correlation Analysis",
        description: "Measures strength and direction of relationship between variables",
        complexity: 2,
        keywords: &["relationship", "association", "correlation"],
        when_to_use: "Quantifying linear relationships between variables",
        implementation: "Use numpy.corrcoef or pandas.DataFrame.corr",
    },
    StatisticalMethod {
        name: "Linear Regression",
        description: "Models relationship between dependent and independent variables",
        complexity: 3,
        keywords: &["predict", "relationship", "model", "regression"],
        when_to_use: "Modeling continuous outcomes based on predictors",
        implementation: "Use statsmodels.api.OLS or sklearn.linear_model.LinearRegression",
    },
    StatisticalMethod {
        name: "Logistic Regression",
        description: "Models probability of binary outcomes based on predictors",
        complexity: 4,
        keywords: &["binary", "classification", "probability", "odds"],
        when_to_use: "Predicting binary outcomes or class membership",
        implementation: "Use statsmodels.api.Logit or sklearn.linear_model.LogisticRegression",
    },
    StatisticalMethod {
        name: "Time Series Decomposition",
        description: "Splits time series into trend, seasonal, and residual components",
        complexity: 3,
        keywords: &["time", "series", "seasonal", "trend"],
        when_to_use: "Understanding time series components before forecasting",
        implementation: "Use statsmodels.tsa.seasonal.seasonal_decompose",
    },
];

struct PreparationTechnique {
    name: &'static str,
    description: &'static str,
    methods: &'static [&'static str],
    considerations: &'static [&'static str],
}

/// Detailed techniques listed for complexity 4 and above
const PREPARATION_TECHNIQUES: &[PreparationTechnique] = &[
    PreparationTechnique {
        name: "Missing Value Imputation",
        description: "Techniques to handle missing data in datasets",
        methods: &[
            "Mean/Median/Mode Imputation",
            "Regression Imputation",
            "K-Nearest Neighbors Imputation",
            "Multiple Imputation",
        ],
        considerations: &[
            "Mechanism of missingness (MCAR, MAR, MNAR)",
            "Impact on distributions and relationships",
            "Potential for bias introduction",
        ],
    },
    PreparationTechnique {
        name: "Outlier Detection and Handling",
        description: "Methods to identify and address extreme values",
        methods: &["Z-score method", "IQR method", "DBSCAN clustering", "Isolation Forest"],
        considerations: &[
            "Domain-specific definition of outliers",
            "Distinguish between errors and valid extreme values",
            "Impact of removal on analysis",
        ],
    },
    PreparationTechnique {
        name: "Feature Scaling",
        description: "Normalizing feature ranges for algorithm compatibility",
        methods: &[
            "Min-Max Scaling",
            "Standardization (Z-score)",
            "Robust Scaling",
            "Log Transformation",
        ],
        considerations: &[
            "Algorithm requirements",
            "Presence of outliers",
            "Interpretability of scaled features",
        ],
    },
    PreparationTechnique {
        name: "Feature Engineering",
        description: "Creating new features to improve model performance",
        methods: &[
            "Polynomial Features",
            "Interaction Terms",
            "Domain-specific Derivations",
            "Dimensionality Reduction",
        ],
        considerations: &[
            "Domain knowledge incorporation",
            "Balance between complexity and interpretability",
            "Risk of overfitting",
        ],
    },
];

const COMMON_PREPARATION: &[&str] = &[
    "Import and load the dataset",
    "Examine the data structure and basic properties",
    "Check for missing values and decide on appropriate handling strategy",
    "Identify and address outliers or anomalous values",
    "Verify data types and convert if necessary",
];

/// Extra preparation steps keyed by data-type substrings, first match wins
const TYPED_PREPARATION: &[(&[&str], &[&str])] = &[
    (
        &["time series", "temporal"],
        &[
            "Ensure proper datetime formatting",
            "Check for and handle seasonality",
            "Consider resampling or interpolation for irregular time intervals",
        ],
    ),
    (
        &["categorical", "survey"],
        &[
            "Encode categorical variables appropriately",
            "Consider dimensionality reduction for high-cardinality categories",
            "Check for and address class imbalance issues",
        ],
    ),
    (
        &["text", "nlp"],
        &[
            "Perform text cleaning (remove special characters, normalize case)",
            "Tokenize text data",
            "Consider stemming or lemmatization",
            "Remove stopwords if appropriate",
        ],
    ),
];

const INSIGHT_FRAMEWORKS: &[(&str, &str, &[&str])] = &[
    (
        "Descriptive Insights",
        "Understanding what has happened in the data",
        &[
            "What patterns exist in the data?",
            "How are variables distributed?",
            "What relationships exist between variables?",
            "Are there any anomalies or outliers?",
        ],
    ),
    (
        "Diagnostic Insights",
        "Understanding why something happened",
        &[
            "What factors contributed to observed outcomes?",
            "What are the root causes of patterns?",
            "How do different variables interact?",
            "What conditions lead to specific results?",
        ],
    ),
    (
        "Predictive Insights",
        "Forecasting what might happen in the future",
        &[
            "What trends can be extrapolated from the data?",
            "How will key metrics likely change?",
            "What scenarios are most probable?",
            "What factors will influence future outcomes?",
        ],
    ),
    (
        "Prescriptive Insights",
        "Recommending actions based on analysis",
        &[
            "What actions should be taken based on the findings?",
            "How can outcomes be optimized?",
            "What strategies would address identified issues?",
            "What trade-offs exist between different approaches?",
        ],
    ),
    (
        "Comparative Insights",
        "Contrasting between different groups or time periods",
        &[
            "How do different segments compare?",
            "What has changed over time?",
            "Which factors drive differences between groups?",
            "What benchmarks are relevant for comparison?",
        ],
    ),
];

const MAX_STATISTICAL_METHODS: usize = 3;
const MAX_VISUALIZATIONS: usize = 4;
const MAX_INSIGHT_TYPES: usize = 3;
const ADVANCED_PREPARATION_COMPLEXITY: u8 = 4;

fn any_in(haystack: &str, needles: &[&str]) -> bool {
    needles.iter().any(|n| haystack.contains(n))
}

// =============================================================================
// Section Generators
// =============================================================================

fn context_section(_: &TemplateSection, ctx: &GenerationContext) -> String {
    format!(
        "You are a data analysis expert tasked with the following analytical challenge:\n\n\
         {}\n\n\
         Data Environment:\n\
         - Data Type: {}\n\
         - Analysis Scope: {}\n\
         - Complexity Level: {}/5\n\n\
         The data to be analyzed includes {} with information about {}.",
        ctx.objective,
        ctx.extra_or("data_type", "dataset"),
        ctx.extra_or("analysis_scope", "Exploratory Data Analysis"),
        ctx.complexity_or(DEFAULT_COMPLEXITY),
        ctx.extra_or("data_dimensions", "multiple variables"),
        ctx.extra_or("data_subjects", "the subject matter")
    )
}

fn preparation_section(_: &TemplateSection, ctx: &GenerationContext) -> String {
    let data_type = ctx.extra_lower("data_type", "");
    let complexity = ctx.complexity_or(DEFAULT_COMPLEXITY);

    let mut steps: Vec<&str> = COMMON_PREPARATION.to_vec();
    if let Some((_, extra)) = TYPED_PREPARATION
        .iter()
        .find(|(markers, _)| any_in(&data_type, markers))
    {
        steps.extend_from_slice(extra);
    }

    let advanced = if complexity >= ADVANCED_PREPARATION_COMPLEXITY {
        let techniques = PREPARATION_TECHNIQUES
            .iter()
            .map(|t| {
                format!(
                    "   - {}: {}\n     Methods: {}\n     Considerations: {}",
                    t.name,
                    t.description,
                    t.methods.join(", "),
                    t.considerations.join("; ")
                )
            })
            .collect::<Vec<_>>()
            .join("\n");
        format!("\n\n4. Advanced Preparation Techniques:\n{}", techniques)
    } else {
        String::new()
    };

    format!(
        "Data Preparation:\n\n\
         1. Essential Preparation Steps:\n{}\n\n\
         2. Quality Assurance Considerations:\n   \
         - Verify data consistency and integrity\n   \
         - Document any assumptions made during preprocessing\n   \
         - Create reproducible data preparation pipeline\n   \
         - Consider creating derived features if beneficial\n\n\
         3. Preprocessing Code Framework:\n   \
         Use appropriate libraries and functions for efficient data manipulation\n   \
         Document each preparation step for transparency{}",
        bullet_list(&steps, "   "),
        advanced
    )
}

fn approach_section(_: &TemplateSection, ctx: &GenerationContext) -> String {
    let objective = ctx.objective_lower();
    let complexity = ctx.complexity_or(DEFAULT_COMPLEXITY);

    let method = ANALYSIS_METHODS
        .iter()
        .find(|m| m.complexity <= complexity && any_in(&objective, m.keywords));
    let (name, reason, steps) = match method {
        Some(m) => (m.name, m.description, m.steps),
        None => (FALLBACK_METHOD, FALLBACK_METHOD_REASON, FALLBACK_METHOD_STEPS),
    };

    format!(
        "Analysis Approach:\n\n\
         1. Recommended Methodology:\n   \
         Consider using {} as your primary approach.\n   \
         This method is suitable because {}.\n\n\
         2. Analysis Steps:\n{}\n\n\
         3. Key Considerations:\n   \
         - Ensure analysis aligns with the original objective\n   \
         - Document assumptions and limitations\n   \
         - Consider alternative approaches if initial results are inconclusive\n   \
         - Validate findings through multiple analytical techniques when possible",
        name,
        reason,
        bullet_list(steps, "   ")
    )
}

fn statistical_section(_: &TemplateSection, ctx: &GenerationContext) -> String {
    let objective = ctx.objective_lower();
    let complexity = ctx.complexity_or(DEFAULT_COMPLEXITY);

    let mut methods: Vec<&StatisticalMethod> = STATISTICAL_METHODS
        .iter()
        .filter(|m| m.complexity <= complexity && any_in(&objective, m.keywords))
        .take(MAX_STATISTICAL_METHODS)
        .collect();
    if methods.is_empty() {
        methods = STATISTICAL_METHODS.iter().take(MAX_STATISTICAL_METHODS).collect();
    }

    let approaches = methods
        .iter()
        .enumerate()
        .map(|(i, m)| {
            format!(
                "   {}. {}: {}\n      When to use: {}\n      Implementation: {}",
                i + 1,
                m.name,
                m.description,
                m.when_to_use,
                m.implementation
            )
        })
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "Statistical Methods:\n\n\
         1. Recommended Statistical Approaches:\n{}\n\n\
         2. Implementation Considerations:\n   \
         - Verify assumptions required for each statistical test\n   \
         - Consider confidence intervals and significance levels\n   \
         - Document statistical rationale for chosen methods\n   \
         - Be mindful of multiple testing problems if applicable\n\n\
         3. Result Interpretation:\n   \
         - Clearly distinguish between correlation and causation\n   \
         - Acknowledge limitations of statistical inferences\n   \
         - Consider practical significance alongside statistical significance",
        approaches
    )
}

fn visualization_section(_: &TemplateSection, ctx: &GenerationContext) -> String {
    let data_type = ctx.extra_lower("data_type", "");
    let objective = ctx.objective_lower();

    let mut charts: Vec<&Visualization> = VISUALIZATIONS
        .iter()
        .filter(|v| v.data_types.is_empty() || any_in(&data_type, v.data_types))
        .filter(|v| v.purposes.is_empty() || any_in(&objective, v.purposes))
        .take(MAX_VISUALIZATIONS)
        .collect();
    if charts.is_empty() {
        charts = VISUALIZATIONS.iter().take(MAX_VISUALIZATIONS).collect();
    }

    let techniques = charts
        .iter()
        .enumerate()
        .map(|(i, v)| {
            format!(
                "   {}. {}: {}\n      Best for: {}\n      Example usage: {}",
                i + 1,
                v.name,
                v.description,
                v.best_for,
                v.example
            )
        })
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "Data Visualization Guidelines:\n\n\
         1. Recommended Visualization Techniques:\n{}\n\n\
         2. Visualization Best Practices:\n   \
         - Ensure visualizations directly support analytical objectives\n   \
         - Maintain simplicity and clarity in design\n   \
         - Use appropriate color schemes and accessibility considerations\n   \
         - Include proper labels, titles, and legends\n   \
         - Consider the intended audience when designing visualizations\n\n\
         3. Visualization Tools Recommendation:\n   \
         Use appropriate libraries such as Matplotlib, Seaborn, Plotly, or ggplot2\n   \
         Consider interactive visualizations for complex relationships",
        techniques
    )
}

fn insights_section(_: &TemplateSection, _: &GenerationContext) -> String {
    let types = INSIGHT_FRAMEWORKS
        .iter()
        .take(MAX_INSIGHT_TYPES)
        .enumerate()
        .map(|(i, (name, description, questions))| {
            let sample: Vec<&str> = questions.iter().take(2).copied().collect();
            format!(
                "   {}. {}: {}\n      Key questions: {}",
                i + 1,
                name,
                description,
                sample.join(", ")
            )
        })
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "Insights and Interpretation Guidelines:\n\n\
         1. Types of Insights to Extract:\n{}\n\n\
         2. Interpretation Framework:\n   \
         - Connect findings back to the original business or research questions\n   \
         - Distinguish between descriptive, predictive, and prescriptive insights\n   \
         - Acknowledge limitations and potential biases in the analysis\n   \
         - Suggest follow-up questions or analyses when appropriate\n\n\
         3. Actionable Recommendations:\n   \
         - Transform analytical findings into clear, actionable recommendations\n   \
         - Prioritize insights based on impact and feasibility\n   \
         - Support recommendations with data-driven evidence\n   \
         - Consider multiple stakeholder perspectives when presenting findings",
        types
    )
}

const HANDLERS: &[SectionHandler] = &[
    SectionHandler {
        synonyms: &["context", "background", "introduction", "datadescription"],
        generate: context_section,
    },
    SectionHandler {
        synonyms: &["datapreparation", "preprocessing", "datacleaning"],
        generate: preparation_section,
    },
    SectionHandler {
        synonyms: &["analysisapproach", "methodology", "techniques"],
        generate: approach_section,
    },
    SectionHandler {
        synonyms: &["statisticalmethods", "statisticalanalysis"],
        generate: statistical_section,
    },
    SectionHandler {
        synonyms: &["visualization", "visualizations", "datavisualization"],
        generate: visualization_section,
    },
    SectionHandler {
        synonyms: &["insights", "findings", "interpretation"],
        generate: insights_section,
    },
];

#[derive(Debug, Clone, Copy, Default)]
pub struct DataAnalysisStrategy;

impl DomainStrategy for DataAnalysisStrategy {
    fn domain(&self) -> Domain {
        Domain::DataAnalysis
    }

    fn populate(&self, section: &TemplateSection, ctx: &GenerationContext) -> String {
        dispatch(HANDLERS, section, ctx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn populate(name: &str, ctx: &GenerationContext) -> String {
        DataAnalysisStrategy.populate(&TemplateSection::new(name, 1, "{objective}"), ctx)
    }

    #[test]
    fn test_context_defaults() {
        let out = populate("Data Description", &GenerationContext::new("Find churn drivers"));
        assert!(out.contains("- Data Type: dataset"));
        assert!(out.contains("- Analysis Scope: Exploratory Data Analysis"));
        assert!(out.ends_with(
            "includes multiple variables with information about the subject matter."
        ));
    }

    #[test]
    fn test_preparation_adds_typed_steps() {
        let ctx = GenerationContext::new("x")
            .with_extra("data_type", "Time Series sales")
            .with_complexity(2);
        let out = populate("Data Preparation", &ctx);
        assert!(out.contains("   - Ensure proper datetime formatting"));
        assert!(!out.contains("Tokenize text data"));
        assert!(!out.contains("Advanced Preparation Techniques"));
    }

    #[test]
    fn test_preparation_advanced_techniques_at_high_complexity() {
        let ctx = GenerationContext::new("x").with_complexity(4);
        let out = populate("Preprocessing", &ctx);
        assert!(out.contains("4. Advanced Preparation Techniques:"));
        assert!(out.contains("   - Feature Scaling: Normalizing feature ranges"));
    }

    #[test]
    fn test_approach_picks_first_matching_method() {
        let ctx = GenerationContext::new("Forecast seasonal demand").with_complexity(4);
        let out = populate("Analysis Approach", &ctx);
        assert!(out.contains("Consider using Time Series Analysis as your primary approach."));

        let low = GenerationContext::new("Forecast seasonal demand").with_complexity(2);
        let out = populate("Methodology", &low);
        assert!(out.contains("Consider using Exploratory Data Analysis as your primary approach."));
        assert!(out.contains("   - Explore data distributions"));
    }

    #[test]
    fn test_statistical_methods_fallback() {
        let out = populate("Statistical Methods", &GenerationContext::new("Summarize sales"));
        assert!(out.contains("   1. t-test:"));
        assert!(out.contains("   3. Chi-Square Test:"));

        let ctx = GenerationContext::new("Compare mean spend across groups").with_complexity(3);
        let out = populate("Statistical Analysis", &ctx);
        assert!(out.contains("   1. t-test:"));
        assert!(out.contains("   2. ANOVA:"));
    }

    #[test]
    fn test_visualization_filters_by_type_and_purpose() {
        let ctx = GenerationContext::new("Show the trend over time")
            .with_extra("data_type", "time series");
        let out = populate("Visualization", &ctx);
        assert!(out.contains("   1. Line Chart:"));
        assert!(!out.contains("   2. "));

        let none = populate("Data Visualization", &GenerationContext::new("x"));
        assert!(none.contains("   1. Histogram:"));
        assert!(none.contains("   4. Line Chart:"));
    }

    #[test]
    fn test_insights_take_first_three_frameworks() {
        let out = populate("Findings", &GenerationContext::new("x"));
        assert!(out.contains("   3. Predictive Insights:"));
        assert!(!out.contains("Prescriptive Insights:"));
        assert!(out.contains(
            "Key questions: What patterns exist in the data?, How are variables distributed?"
        ));
    }
}

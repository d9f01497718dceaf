//! Content creation strategy: content-type aware structure, audience, tone,
//! SEO and video editing guidance.

use super::{DomainStrategy, SectionHandler, dispatch};
use crate::constants::generation::DEFAULT_COMPLEXITY;
use crate::templates::TemplateSection;
use crate::types::{Domain, GenerationContext, bullet_list, numbered_list, title_case};

// =============================================================================
// Knowledge Base
// =============================================================================

struct ContentType {
    name: &'static str,
    description: &'static str,
    default_length: &'static str,
    sections: &'static [&'static str],
}

const CONTENT_TYPES: &[ContentType] = &[
    ContentType {
        name: "article",
        description: "an informative piece exploring a topic in depth",
        default_length: "800-1200 words",
        sections: &["Introduction", "Main Body", "Conclusion"],
    },
    ContentType {
        name: "blog post",
        description: "a conversational piece providing value on a specific topic",
        default_length: "600-1000 words",
        sections: &["Hook/Introduction", "Main Points", "Conclusion", "Call to Action"],
    },
    ContentType {
        name: "social media post",
        description: "a concise, engaging update designed for social platforms",
        default_length: "50-280 characters (platform dependent)",
        sections: &["Hook", "Core Message", "Call to Action"],
    },
    ContentType {
        name: "email",
        description: "a direct communication to a subscriber or customer",
        default_length: "200-500 words",
        sections: &["Subject Line", "Greeting", "Body", "Call to Action", "Signature"],
    },
    ContentType {
        name: "newsletter",
        description: "a regular update sent to subscribers with various content pieces",
        default_length: "500-800 words",
        sections: &["Header", "Main Story", "Secondary Points", "News Updates", "Call to Action"],
    },
    ContentType {
        name: "whitepaper",
        description: "an authoritative, detailed document on a specific topic",
        default_length: "2000-5000 words",
        sections: &[
            "Executive Summary",
            "Introduction",
            "Problem Statement",
            "Methodology",
            "Findings",
            "Conclusion",
            "References",
        ],
    },
    ContentType {
        name: "landing page",
        description: "a focused webpage designed to convert visitors",
        default_length: "300-800 words",
        sections: &[
            "Headline",
            "Problem Statement",
            "Solution",
            "Benefits",
            "Social Proof",
            "Call to Action",
        ],
    },
    ContentType {
        name: "press release",
        description: "an official statement distributed to news outlets",
        default_length: "400-800 words",
        sections: &[
            "Headline",
            "Dateline",
            "Lead Paragraph",
            "Body",
            "Company Information",
            "Contact Information",
        ],
    },
    ContentType {
        name: "product description",
        description: "compelling content that explains product benefits and features",
        default_length: "200-400 words",
        sections: &["Overview", "Key Benefits", "Features", "Specifications", "Call to Action"],
    },
    ContentType {
        name: "script",
        description: "a document outlining dialogue and actions for audio/video content",
        default_length: "150-200 words per minute of content",
        sections: &["Introduction", "Main Content", "Conclusion", "Call to Action"],
    },
];

/// Detailed outlines, preferred over the short content-type sections
const CONTENT_STRUCTURES: &[(&str, &[&str])] = &[
    (
        "article",
        &[
            "Introduction/Hook",
            "Background/Context",
            "Main Point 1 with Evidence",
            "Main Point 2 with Evidence",
            "Main Point 3 with Evidence",
            "Counterarguments/Limitations",
            "Conclusion",
            "Call to Action",
        ],
    ),
    (
        "blog post",
        &[
            "Attention-Grabbing Hook",
            "Introduction to Problem/Topic",
            "Key Point 1 with Examples",
            "Key Point 2 with Examples",
            "Key Point 3 with Examples",
            "Practical Applications",
            "Conclusion",
            "Call to Action",
        ],
    ),
    (
        "social media post",
        &[
            "Hook/Attention Grabber",
            "Core Message",
            "Supporting Detail (if space allows)",
            "Call to Action",
        ],
    ),
    (
        "email",
        &[
            "Subject Line",
            "Personalized Greeting",
            "Opening Hook",
            "Main Message",
            "Clear Call to Action",
            "Appropriate Sign-off",
            "P.S. (optional but effective)",
        ],
    ),
    (
        "whitepaper",
        &[
            "Executive Summary",
            "Introduction/Problem Statement",
            "Background/Industry Context",
            "Methodology/Approach",
            "Research Findings/Analysis",
            "Practical Implications",
            "Recommendations",
            "Conclusion",
            "References/Citations",
        ],
    ),
    (
        "landing page",
        &[
            "Headline (Problem or Promise)",
            "Subheadline (Expanding on Headline)",
            "Problem Statement (Pain Points)",
            "Solution Introduction",
            "Key Benefits (3-5)",
            "Features Explanation",
            "Social Proof (Testimonials/Case Studies)",
            "Objection Handling",
            "Primary Call to Action",
            "Secondary Call to Action",
        ],
    ),
    (
        "product description",
        &[
            "Compelling Product Name/Title",
            "Overview/Summary",
            "Key Benefits (3-5)",
            "Technical Specifications",
            "Use Cases/Who It's For",
            "Differentiators from Alternatives",
            "Call to Action",
        ],
    ),
];

const GENERIC_STRUCTURE: &[&str] = &["Introduction", "Main Body", "Conclusion"];

struct Consideration {
    description: &'static str,
    /// `None` applies to every content type
    applies_to: Option<&'static [&'static str]>,
}

struct Audience {
    name: &'static str,
    characteristics: &'static [&'static str],
    preferences: &'static [&'static str],
    considerations: &'static [Consideration],
}

const fn all(description: &'static str) -> Consideration {
    Consideration {
        description,
        applies_to: None,
    }
}

const fn only(description: &'static str, types: &'static [&'static str]) -> Consideration {
    Consideration {
        description,
        applies_to: Some(types),
    }
}

const AUDIENCES: &[Audience] = &[
    Audience {
        name: "general",
        characteristics: &[
            "Diverse background and knowledge levels",
            "Various interests and needs",
            "May have limited time for content consumption",
        ],
        preferences: &[
            "Clear, straightforward language",
            "Easily scannable content",
            "Practical, useful information",
        ],
        considerations: &[
            all("Avoid industry jargon without explanation"),
            all("Use examples that are broadly relatable"),
            only(
                "Balance depth with accessibility",
                &["article", "blog post", "whitepaper"],
            ),
        ],
    },
    Audience {
        name: "technical",
        characteristics: &[
            "Specialized knowledge in their field",
            "Often well-educated in specific domains",
            "Looking for detailed, accurate information",
            "Value precision over simplicity",
        ],
        preferences: &[
            "In-depth technical details",
            "Evidence-based content",
            "Logical, structured presentation",
            "Proper use of technical terminology",
        ],
        considerations: &[
            all("Use industry-specific terminology appropriately"),
            only(
                "Provide data and evidence to support claims",
                &["whitepaper", "article", "blog post"],
            ),
            all("Focus on specificity rather than broad generalizations"),
            only(
                "Include technical specifications where relevant",
                &["product description", "whitepaper"],
            ),
        ],
    },
    Audience {
        name: "executive",
        characteristics: &[
            "Time-constrained decision makers",
            "Focus on business impact and outcomes",
            "Need for high-level strategic information",
            "Value insights that drive business decisions",
        ],
        preferences: &[
            "Concise, to-the-point content",
            "Clear business value and ROI information",
            "Strategic implications highlighted",
            "Easily scannable executive summaries",
        ],
        considerations: &[
            all("Start with key takeaways or executive summary"),
            all("Focus on business impact and results"),
            only(
                "Use data visualizations to convey complex information quickly",
                &["whitepaper", "presentation"],
            ),
            all("Avoid excessive technical details unless specifically requested"),
        ],
    },
    Audience {
        name: "consumer",
        characteristics: &[
            "Interested in benefits over features",
            "Emotionally driven purchasing decisions",
            "Various levels of product knowledge",
            "May be comparing multiple options",
        ],
        preferences: &[
            "Benefit-focused messaging",
            "Relatable, conversational tone",
            "Visuals that demonstrate product use",
            "Social proof and testimonials",
        ],
        considerations: &[
            only(
                "Emphasize how the product/service improves their life",
                &["product description", "landing page", "email"],
            ),
            all("Use emotional triggers appropriate to the product"),
            only(
                "Include social proof like reviews or testimonials",
                &["landing page", "product description"],
            ),
            all("Address common questions and objections"),
        ],
    },
    Audience {
        name: "academic",
        characteristics: &[
            "Highly educated in their field",
            "Value rigorous research and methodology",
            "Critical evaluation of evidence and claims",
            "Interest in theoretical frameworks",
        ],
        preferences: &[
            "Well-structured, logical argumentation",
            "Proper citations and references",
            "Comprehensive literature review",
            "Methodological transparency",
        ],
        considerations: &[
            all("Use formal academic style appropriate to the discipline"),
            only(
                "Include comprehensive citations and references",
                &["whitepaper", "article"],
            ),
            only(
                "Acknowledge limitations and alternative viewpoints",
                &["whitepaper", "article"],
            ),
            all("Maintain theoretical rigor throughout"),
        ],
    },
];

struct Tone {
    name: &'static str,
    characteristics: &'static [&'static str],
    dos: &'static [&'static str],
    donts: &'static [&'static str],
}

const TONES: &[Tone] = &[
    Tone {
        name: "professional",
        characteristics: &[
            "Polished and refined language",
            "Authoritative without being pretentious",
            "Clear, direct, and efficient communication",
            "Appropriate level of formality",
        ],
        dos: &[
            "Use industry terminology appropriately",
            "Maintain consistent level of formality",
            "Structure content logically",
            "Be precise and accurate",
        ],
        donts: &[
            "Avoid slang and overly casual expressions",
            "Don't use excessive jargon",
            "Avoid overly complex sentences",
            "Don't use unprofessional or contentious examples",
        ],
    },
    Tone {
        name: "conversational",
        characteristics: &[
            "Natural, everyday language",
            "Personable and approachable",
            "Engaging and relatable",
            "Slightly informal but still appropriate",
        ],
        dos: &[
            "Write as if speaking directly to the reader",
            "Use contractions (don't, you're, we'll)",
            "Ask questions to engage the reader",
            "Include personal anecdotes where appropriate",
        ],
        donts: &[
            "Don't sacrifice clarity for casualness",
            "Avoid overly informal expressions or slang",
            "Don't ramble or use run-on sentences",
            "Avoid inappropriate humor or examples",
        ],
    },
    Tone {
        name: "academic",
        characteristics: &[
            "Formal and objective language",
            "Precise terminology and definitions",
            "Evidence-based argumentation",
            "Structured and methodical presentation",
        ],
        dos: &[
            "Use discipline-specific terminology accurately",
            "Cite sources properly",
            "Present balanced viewpoints",
            "Structure arguments logically and systematically",
        ],
        donts: &[
            "Avoid first-person perspective (unless appropriate for the discipline)",
            "Don't make claims without evidence",
            "Avoid emotional or subjective language",
            "Don't oversimplify complex concepts",
        ],
    },
    Tone {
        name: "persuasive",
        characteristics: &[
            "Compelling and influential language",
            "Emotional appeals balanced with logic",
            "Strong calls to action",
            "Benefit-focused messaging",
        ],
        dos: &[
            "Use powerful, active verbs",
            "Include persuasive techniques like social proof",
            "Address potential objections",
            "Create a sense of urgency when appropriate",
        ],
        donts: &[
            "Don't make false or unsubstantiated claims",
            "Avoid manipulative language",
            "Don't use high-pressure tactics",
            "Avoid obvious exaggerations or hyperbole",
        ],
    },
    Tone {
        name: "friendly",
        characteristics: &[
            "Warm and welcoming language",
            "Highly approachable and encouraging",
            "Positive and supportive tone",
            "Personal connection with reader",
        ],
        dos: &[
            "Use inclusive language (we, us, together)",
            "Be encouraging and supportive",
            "Express genuine enthusiasm",
            "Use light humor when appropriate",
        ],
        donts: &[
            "Don't be overly familiar or presumptuous",
            "Avoid forced friendliness or inauthenticity",
            "Don't sacrifice professionalism for friendliness",
            "Avoid potentially divisive topics",
        ],
    },
];

const SEO_PRACTICES: &[(&str, &str, u8)] = &[
    ("Keyword Optimization", "Include target keywords in title, headings, and naturally throughout content", 1),
    ("Meta Description", "Craft a compelling meta description that includes keywords and encourages clicks", 2),
    ("Title Tag Optimization", "Create a unique, keyword-rich title under 60 characters", 1),
    ("Header Tag Hierarchy", "Use a logical H1-H6 structure with keywords in important headings", 2),
    ("Internal Linking", "Link to other relevant content on your site using descriptive anchor text", 2),
    ("External Linking", "Link to authoritative external sources to support your content", 3),
    ("Image Optimization", "Use descriptive filenames and alt text for all images", 2),
    ("URL Structure", "Create clean, keyword-rich URLs that describe the content", 2),
    ("Mobile Optimization", "Ensure content is easily readable on mobile devices", 3),
    ("Page Load Speed", "Optimize images and minimize code to improve page speed", 4),
    ("Semantic SEO", "Use related terms and concepts to build topical authority", 4),
    ("Featured Snippet Optimization", "Structure content to potentially appear in featured snippets (listicles, definitions, tables)", 4),
    ("LSI Keywords", "Include Latent Semantic Indexing keywords related to your main keyword", 3),
];

const WEB_CONTENT_TYPES: &[&str] = &["article", "blog post", "webpage", "landing page"];

struct VideoProfile {
    label: &'static str,
    triggers: &'static [&'static str],
    styles: &'static [&'static str],
}

const GENERAL_VIDEO: &str = "General Video";

const VIDEO_PROFILES: &[VideoProfile] = &[
    VideoProfile {
        label: "YouTube/Tutorial",
        triggers: &["youtube", "vlog", "tutorial"],
        styles: &["Cut to talking points", "B-roll overlays", "Text/graphic overlays", "Jump cuts"],
    },
    VideoProfile {
        label: "Commercial/Advertisement",
        triggers: &["ad", "commercial", "promo", "advertisement"],
        styles: &["Fast-paced cuts", "Visual effects", "Color grading", "Motion graphics"],
    },
    VideoProfile {
        label: "Social Media Short",
        triggers: &["social", "instagram", "tiktok", "reels", "shorts"],
        styles: &["Vertical format", "Quick transitions", "Text overlays", "Trending effects"],
    },
    VideoProfile {
        label: "Film/Documentary",
        triggers: &["documentary", "film", "movie", "short film"],
        styles: &["Long takes", "Seamless transitions", "Atmospheric color grading", "Minimal text"],
    },
    VideoProfile {
        label: "Corporate/Business",
        triggers: &["corporate", "business", "presentation"],
        styles: &["Clean transitions", "Limited effects", "Corporate branding", "Text-based information"],
    },
];

const GENERAL_VIDEO_STYLES: &[&str] =
    &["Basic cuts", "Transitions", "Text overlays", "Background music"];

/// Technical defaults for a video type
struct VideoSpecs {
    resolution: &'static str,
    frame_rate: &'static str,
    aspect_ratio: &'static str,
    platform: &'static str,
    duration: &'static str,
    audience: &'static str,
    audio: &'static str,
}

fn video_specs(video_type: &str) -> VideoSpecs {
    let mut specs = VideoSpecs {
        resolution: "1920x1080 (1080p Full HD)",
        frame_rate: "30fps",
        aspect_ratio: "16:9",
        platform: "Multiple platforms",
        duration: "3-5 minutes",
        audience: "General audience",
        audio: "Stereo, 48kHz",
    };
    match video_type {
        "Social Media Short" => {
            specs.resolution = "1080x1920 (9:16 vertical)";
            specs.aspect_ratio = "9:16";
            specs.duration = "15-60 seconds";
            specs.platform = "Instagram, TikTok, YouTube Shorts";
        }
        "YouTube/Tutorial" => {
            specs.duration = "8-15 minutes";
            specs.platform = "YouTube";
        }
        "Commercial/Advertisement" => {
            specs.duration = "15-60 seconds";
            specs.frame_rate = "24fps or 30fps";
        }
        "Film/Documentary" => {
            specs.resolution = "3840x2160 (4K UHD)";
            specs.frame_rate = "24fps";
            specs.duration = "10+ minutes";
            specs.audio = "5.1 surround sound, 48kHz";
        }
        _ => {}
    }
    specs
}

/// Substring match, except two-letter terms which must be whole words
fn mentions(text: &str, term: &str) -> bool {
    if term.len() > 2 {
        return text.contains(term);
    }
    text.split(|c: char| !c.is_alphanumeric()).any(|word| word == term)
}

fn content_type_info(name: &str) -> Option<&'static ContentType> {
    CONTENT_TYPES.iter().find(|t| t.name == name)
}

fn list_or(items: &[impl AsRef<str>], fallback: &str) -> String {
    if items.is_empty() {
        fallback.to_string()
    } else {
        bullet_list(items, "")
    }
}

// =============================================================================
// Section Generators
// =============================================================================

fn context_section(_: &TemplateSection, ctx: &GenerationContext) -> String {
    let content_type = ctx.extra_or("content_type", "article");
    let info = content_type_info(&content_type.to_lowercase());

    format!(
        "You are a professional content creator tasked with the following assignment:\n\n\
         {}\n\n\
         Content Details:\n\
         - Content Type: {} - {}\n\
         - Target Length: {}\n\
         - Purpose: {}\n\
         - Complexity Level: {}/5",
        ctx.objective,
        title_case(content_type),
        info.map(|i| i.description).unwrap_or("a piece of content"),
        ctx.extra_or(
            "target_length",
            info.map(|i| i.default_length).unwrap_or("500-800 words")
        ),
        ctx.extra_or("purpose", "To inform and engage the audience"),
        ctx.complexity_or(DEFAULT_COMPLEXITY)
    )
}

fn structure_section(_: &TemplateSection, ctx: &GenerationContext) -> String {
    let content_type = ctx.extra_lower("content_type", "article");
    let complexity = ctx.complexity_or(DEFAULT_COMPLEXITY);

    let mut sections: Vec<&str> = CONTENT_STRUCTURES
        .iter()
        .find(|(name, _)| *name == content_type)
        .map(|(_, sections)| *sections)
        .or_else(|| content_type_info(&content_type).map(|i| i.sections))
        .unwrap_or(GENERIC_STRUCTURE)
        .to_vec();

    if complexity <= 2 && sections.len() > 3 {
        sections.truncate(3);
    } else if complexity >= 4 && ["article", "blog post", "whitepaper"].contains(&content_type.as_str()) {
        sections.push("Further Reading");
        if complexity >= 5 {
            sections.push("Expert Opinions");
        }
    }

    let additional = match content_type.as_str() {
        "article" | "blog post" | "guide" => {
            "\n- Consider using bullet points for readability\n- Break up long paragraphs"
        }
        "email" | "newsletter" => "\n- Keep paragraphs short and scannable\n- Use a clear call-to-action",
        "script" | "video script" => "\n- Include timing guidelines\n- Note visual elements where relevant",
        _ => "",
    };

    format!(
        "Content Structure:\n\n\
         Your {} should follow this structure:\n\n\
         {}\n\n\
         Additional Structure Guidelines:\n\
         - Each section should flow logically into the next\n\
         - Use appropriate headings and subheadings\n\
         - Include transitions between major sections{}",
        title_case(&content_type),
        numbered_list(&sections, ""),
        additional
    )
}

fn audience_section(_: &TemplateSection, ctx: &GenerationContext) -> String {
    let audience = ctx.extra_lower("audience", "general");
    let content_type = ctx.extra_lower("content_type", "article");
    let profile = AUDIENCES.iter().find(|a| a.name == audience);

    let characteristics = profile.map(|p| p.characteristics).unwrap_or_default();
    let preferences = profile.map(|p| p.preferences).unwrap_or_default();
    let considerations: Vec<&str> = profile
        .map(|p| p.considerations)
        .unwrap_or_default()
        .iter()
        .filter(|c| c.applies_to.is_none_or(|types| types.contains(&content_type.as_str())))
        .map(|c| c.description)
        .collect();

    format!(
        "Target Audience:\n\n\
         Your content is intended for {} readers.\n\n\
         Audience Characteristics:\n{}\n\n\
         Content Preferences for this Audience:\n{}\n\n\
         Special Considerations:\n{}",
        title_case(&audience),
        list_or(characteristics, "- General audience with varied backgrounds"),
        list_or(preferences, "- Clear, straightforward content"),
        list_or(&considerations, "- Focus on clarity and value")
    )
}

fn tone_section(_: &TemplateSection, ctx: &GenerationContext) -> String {
    let tone = ctx.extra_lower("tone", "professional");
    let content_type = ctx.extra_lower("content_type", "article");
    let profile = TONES.iter().find(|t| t.name == tone);

    let adjustment = match content_type.as_str() {
        "email" | "newsletter" => "For emails, be slightly more conversational and direct.",
        "whitepaper" | "research" => {
            "For formal documents, maintain a more authoritative and evidence-based tone."
        }
        "social media" => "For social media, be more concise and engaging.",
        _ => "",
    };

    format!(
        "Tone and Voice Guidelines:\n\n\
         The content should adopt a {} tone.\n\n\
         Tone Characteristics:\n{}\n\n\
         Do's:\n{}\n\n\
         Don'ts:\n{}\n\n\
         {}",
        title_case(&tone),
        list_or(
            profile.map(|p| p.characteristics).unwrap_or_default(),
            "- Clear, straightforward, and focused"
        ),
        list_or(
            profile.map(|p| p.dos).unwrap_or_default(),
            "- Be clear and concise\n- Prioritize meaning over style"
        ),
        list_or(
            profile.map(|p| p.donts).unwrap_or_default(),
            "- Avoid overly complex language\n- Don't use clichés"
        ),
        adjustment
    )
}

fn seo_section(_: &TemplateSection, ctx: &GenerationContext) -> String {
    let content_type = ctx.extra_lower("content_type", "article");
    let complexity = ctx.complexity_or(DEFAULT_COMPLEXITY);

    if !WEB_CONTENT_TYPES.contains(&content_type.as_str()) {
        return "SEO Considerations: Not applicable for this content type.".to_string();
    }

    let mut practices: Vec<String> = SEO_PRACTICES
        .iter()
        .filter(|(_, _, min)| *min <= complexity)
        .map(|(name, description, _)| format!("{}: {}", name, description))
        .collect();
    if complexity <= 3 {
        practices.truncate(5);
    }

    format!(
        "SEO Optimization Guidelines:\n\n\
         Primary Keyword Focus: {}\n\
         Secondary Keywords: {}\n\n\
         SEO Best Practices to Apply:\n{}\n\n\
         Content Optimization Tips:\n\
         - Include keywords naturally, never force them\n\
         - Optimize headings (H1, H2, H3) with relevant keywords\n\
         - Ensure content provides value beyond keywords\n\
         - Consider user intent when creating content",
        ctx.extra_or("primary_keyword", "[Primary keyword]"),
        ctx.extra_or(
            "secondary_keywords",
            "[Secondary keyword 1], [Secondary keyword 2]"
        ),
        list_or(&practices, "- Keyword Optimization: Include target keywords naturally")
    )
}

fn video_editing_section(_: &TemplateSection, ctx: &GenerationContext) -> String {
    let objective = ctx.objective_lower();

    let profile = match ctx.extra("video_type") {
        Some(explicit) => VIDEO_PROFILES.iter().find(|p| p.label == explicit),
        None => VIDEO_PROFILES
            .iter()
            .find(|p| p.triggers.iter().any(|t| mentions(&objective, t))),
    };
    let video_type = ctx
        .extra("video_type")
        .or(profile.map(|p| p.label))
        .unwrap_or(GENERAL_VIDEO);
    let styles = profile.map(|p| p.styles).unwrap_or(GENERAL_VIDEO_STYLES);
    let specs = video_specs(video_type);

    format!(
        "Video Editing Guidelines:\n\n\
         1. Project Details:\n   \
         - Video Type: {}\n   \
         - Target Platform: {}\n   \
         - Estimated Length: {}\n   \
         - Target Audience: {}\n\n\
         2. Recommended Editing Approach:\n{}\n\n\
         3. Technical Specifications:\n   \
         - Resolution: {}\n   \
         - Frame Rate: {}\n   \
         - Aspect Ratio: {}\n   \
         - Audio: {}\n\n\
         4. Post-Production Workflow:\n   \
         - Begin with organizing and reviewing all footage\n   \
         - Create a rough cut focusing on narrative structure\n   \
         - Refine with precise cuts and transitions\n   \
         - Add visual effects, text, and graphics as needed\n   \
         - Color correction and audio enhancement\n   \
         - Final review for technical quality and storytelling\n   \
         - Export according to platform specifications",
        video_type,
        ctx.extra_or("platform", specs.platform),
        ctx.extra_or("duration", specs.duration),
        ctx.extra_or("audience", specs.audience),
        bullet_list(styles, "   "),
        ctx.extra_or("resolution", specs.resolution),
        ctx.extra_or("frame_rate", specs.frame_rate),
        ctx.extra_or("aspect_ratio", specs.aspect_ratio),
        ctx.extra_or("audio_specs", specs.audio)
    )
}

const HANDLERS: &[SectionHandler] = &[
    SectionHandler {
        synonyms: &["context", "background", "introduction"],
        generate: context_section,
    },
    SectionHandler {
        synonyms: &["contentstructure", "structure", "outline"],
        generate: structure_section,
    },
    SectionHandler {
        synonyms: &["audience", "targetaudience", "readers"],
        generate: audience_section,
    },
    SectionHandler {
        synonyms: &["toneguidelines", "tone", "voice", "style"],
        generate: tone_section,
    },
    SectionHandler {
        synonyms: &["seo", "optimization", "keywords"],
        generate: seo_section,
    },
    SectionHandler {
        synonyms: &["videoediting", "editingguidelines", "videoproduction"],
        generate: video_editing_section,
    },
];

#[derive(Debug, Clone, Copy, Default)]
pub struct ContentStrategy;

impl DomainStrategy for ContentStrategy {
    fn domain(&self) -> Domain {
        Domain::Content
    }

    fn populate(&self, section: &TemplateSection, ctx: &GenerationContext) -> String {
        dispatch(HANDLERS, section, ctx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn populate(name: &str, ctx: &GenerationContext) -> String {
        ContentStrategy.populate(&TemplateSection::new(name, 1, "{objective}"), ctx)
    }

    #[test]
    fn test_context_defaults_to_article() {
        let out = populate("Context", &GenerationContext::new("Write about Rust"));
        assert!(out.contains("- Content Type: Article - an informative piece exploring a topic in depth"));
        assert!(out.contains("- Target Length: 800-1200 words"));
        assert!(out.contains("- Purpose: To inform and engage the audience"));
    }

    #[test]
    fn test_structure_complexity_adjustments() {
        let low = GenerationContext::new("x").with_complexity(2);
        let out = populate("Content Structure", &low);
        assert!(out.contains("3. Main Point 1 with Evidence"));
        assert!(!out.contains("4. "));

        let high = GenerationContext::new("x").with_complexity(5);
        let out = populate("Outline", &high);
        assert!(out.contains("9. Further Reading\n10. Expert Opinions"));
        assert!(out.contains("- Break up long paragraphs"));
    }

    #[test]
    fn test_structure_repeated_calls_are_identical() {
        let ctx = GenerationContext::new("x").with_complexity(5);
        assert_eq!(populate("Structure", &ctx), populate("Structure", &ctx));
    }

    #[test]
    fn test_structure_falls_back_for_unlisted_type() {
        let ctx = GenerationContext::new("x").with_extra("content_type", "podcast");
        let out = populate("Structure", &ctx);
        assert!(out.contains("1. Introduction\n2. Main Body\n3. Conclusion"));
    }

    #[test]
    fn test_audience_filters_considerations() {
        let ctx = GenerationContext::new("x")
            .with_extra("audience", "technical")
            .with_extra("content_type", "email");
        let out = populate("Target Audience", &ctx);
        assert!(out.contains("intended for Technical readers"));
        assert!(out.contains("- Use industry-specific terminology appropriately"));
        assert!(!out.contains("Provide data and evidence"));

        let unknown = GenerationContext::new("x").with_extra("audience", "gamers");
        assert!(populate("Audience", &unknown).contains("- Focus on clarity and value"));
    }

    #[test]
    fn test_tone_adjustment() {
        let ctx = GenerationContext::new("x")
            .with_extra("tone", "friendly")
            .with_extra("content_type", "newsletter");
        let out = populate("Tone Guidelines", &ctx);
        assert!(out.contains("adopt a Friendly tone"));
        assert!(out.ends_with("For emails, be slightly more conversational and direct."));
    }

    #[test]
    fn test_seo_only_for_web_content() {
        let ctx = GenerationContext::new("x").with_extra("content_type", "email");
        assert_eq!(
            populate("SEO", &ctx),
            "SEO Considerations: Not applicable for this content type."
        );

        let web = GenerationContext::new("x").with_complexity(3);
        let out = populate("SEO", &web);
        assert_eq!(out.matches("\n- ").count(), 5 + 4);
    }

    #[test]
    fn test_video_type_detection() {
        let ad = GenerationContext::new("Edit a 30 second ad for shoes");
        let out = populate("Video Editing", &ad);
        assert!(out.contains("- Video Type: Commercial/Advertisement"));
        assert!(out.contains("- Frame Rate: 24fps or 30fps"));

        // "ad" inside another word does not count
        let road = GenerationContext::new("Cut my road trip footage");
        assert!(populate("Video Editing", &road).contains("- Video Type: General Video"));

        let short = GenerationContext::new("Make tiktok reels").with_extra("platform", "TikTok");
        let out = populate("Video Production", &short);
        assert!(out.contains("- Resolution: 1080x1920 (9:16 vertical)"));
        assert!(out.contains("- Target Platform: TikTok"));
    }
}

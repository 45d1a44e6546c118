// Fixed text of the resume critique prompt.
// `critique::prompt` renders these fragments in order; nothing here is a substitution template.

/// Job context used when the caller did not name a target role.
pub const FALLBACK_JOB_CONTEXT: &str = "a general professional role based on the resume's content";

/// Maximum value of the overall score the model is asked for.
pub const OVERALL_MAX_POINTS: u32 = 100;

/// One weighted scoring category of the rubric.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RubricCategory {
    pub name: &'static str,
    pub max_points: u32,
}

/// The weighted sub-scores. Maxima must add up to `OVERALL_MAX_POINTS`.
pub const RUBRIC: [RubricCategory; 4] = [
    RubricCategory {
        name: "Clarity & Readability",
        max_points: 25,
    },
    RubricCategory {
        name: "Impact & Achievements",
        max_points: 35,
    },
    RubricCategory {
        name: "Relevance to Job",
        max_points: 25,
    },
    RubricCategory {
        name: "Formatting & ATS Friendliness",
        max_points: 15,
    },
];

/// One block of the section-by-section analysis.
/// Every block asks for the same three sub-items; only the guidance differs.
#[derive(Debug, Clone, Copy)]
pub struct SectionBlock {
    pub title: &'static str,
    pub good: &'static str,
    pub improve: &'static str,
    /// Label suffix for the suggestion item, e.g. " (Rewrite Example)".
    pub suggestion_label: &'static str,
    pub suggestion: &'static str,
}

pub const SECTIONS: [SectionBlock; 5] = [
    SectionBlock {
        title: "General Formatting & Readability",
        good: "(Comment on clean layout, good use of white space, clear fonts, etc.)",
        improve: "(Comment on inconsistent formatting, dense text blocks, unprofessional fonts, length, or typos/grammar.)",
        suggestion_label: "",
        suggestion: "(Provide a specific, actionable tip.)",
    },
    SectionBlock {
        title: "Professional Summary / Objective",
        good: "(Comment on its impact and clarity.)",
        improve: "(Analyze if it's generic, passive, or not tailored to the **JOB_CONTEXT**.)",
        suggestion_label: "",
        suggestion: "(Provide a rewritten example tailored to the job context.)",
    },
    SectionBlock {
        title: "Skills Section",
        good: "(Comment on relevant skills and good organization.)",
        improve: "(Are the skills relevant? Are they just buzzwords? Are they backed up by experience?)",
        suggestion_label: "",
        suggestion: "(Suggest grouping skills or adding specific keywords from the job context.)",
    },
    SectionBlock {
        title: "Professional Experience",
        good: "(Praise the use of strong action verbs or quantified results.)",
        improve: "(Identify bullet points that describe duties instead of achievements. Point out where metrics are missing.)",
        suggestion_label: " (Rewrite Example)",
        suggestion: "Show how to transform a weak bullet point into an impactful one using the STAR method (Situation, Task, Action, Result). For example, turn \"Responsible for social media\" into \"Grew organic social media engagement by 45% over 6 months by executing a new content strategy.\"",
    },
    SectionBlock {
        title: "Projects Section",
        good: "(Comment on relevant project choices.)",
        improve: "(Do descriptions state the problem, tech stack, and outcome? Are there links to GitHub/live demos?)",
        suggestion_label: "",
        suggestion: "(Suggest adding quantifiable outcomes or a link to the repository.)",
    },
];

pub const TASK_HEADER: &str = "\
**TASK:**
Provide a comprehensive, constructive, and actionable critique of the user's resume.
Analyze the resume against the provided job context.

**INPUTS:**
1.  **RESUME_TEXT:**
";

pub const JOB_CONTEXT_LEAD: &str =
    "2.  **JOB_CONTEXT:** The resume should be evaluated for a candidate applying for: ";

pub const OUTPUT_STRUCTURE_HEADER: &str = "\
**OUTPUT STRUCTURE:**
Present your feedback in Markdown format, following this exact structure:

---

";

pub const EXECUTIVE_SUMMARY: &str = "\
### **Executive Summary**
(A 2-3 sentence high-level overview. Start with the strongest aspect of the resume and then state the single most important area for improvement.)
";

pub const SECTION_ANALYSIS_HEADER: &str = "### **Section-by-Section Analysis**\n";

pub const RULE: &str = "\n---\n\n";

pub const KEYWORD_ALIGNMENT_LEAD: &str = "### **Keyword & Skill Alignment for: ";

pub const KEYWORD_ALIGNMENT_ITEMS: &str = "\
*   **Keywords Present:** (List key skills/technologies from the job context that you found in the resume.)
*   **Keywords Missing:** (List important skills/technologies from the job context that are missing and suggest where they could be added.)
*   **Overall Recommendation:** (A final sentence on how well the resume is tailored.)
";

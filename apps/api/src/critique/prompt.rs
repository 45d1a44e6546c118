//! Critique Prompt Builder — renders the fixed rubric around a resume and a job context.
//!
//! The prompt is composed by appending fixed segments and the two inputs in order.
//! Inputs are never run through a substitution step, so `{...}` sequences or rubric
//! headings inside a resume stay inert text.
//!
//! The resume is embedded in a backtick fence strictly longer than any backtick run
//! it contains, which keeps resume content from closing the fence early.

use std::fmt::Write as _;

use crate::critique::prompts::{
    EXECUTIVE_SUMMARY, FALLBACK_JOB_CONTEXT, JOB_CONTEXT_LEAD, KEYWORD_ALIGNMENT_ITEMS,
    KEYWORD_ALIGNMENT_LEAD, OUTPUT_STRUCTURE_HEADER, OVERALL_MAX_POINTS, RUBRIC, RULE,
    SECTIONS, SECTION_ANALYSIS_HEADER, TASK_HEADER,
};

const MIN_FENCE_LEN: usize = 3;

/// The finished instruction text for one analysis. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CritiquePrompt {
    instruction_text: String,
    job_context: String,
}

impl CritiquePrompt {
    pub fn as_str(&self) -> &str {
        &self.instruction_text
    }

    pub fn into_string(self) -> String {
        self.instruction_text
    }

    /// The job context after fallback resolution.
    pub fn job_context(&self) -> &str {
        &self.job_context
    }
}

/// Returns the role verbatim, or the generic fallback when it is empty or all whitespace.
pub fn resolve_job_context(job_role: &str) -> &str {
    if job_role.trim().is_empty() {
        FALLBACK_JOB_CONTEXT
    } else {
        job_role
    }
}

/// Builds the critique prompt. Pure and deterministic.
pub fn build_critique_prompt(resume_text: &str, job_role: &str) -> CritiquePrompt {
    let job_context = resolve_job_context(job_role);
    let fence = "`".repeat(fence_len(resume_text));

    let mut out = String::with_capacity(resume_text.len() + 4096);

    out.push_str(TASK_HEADER);
    out.push_str(&fence);
    out.push('\n');
    out.push_str(resume_text);
    if !resume_text.ends_with('\n') {
        out.push('\n');
    }
    out.push_str(&fence);
    out.push('\n');

    out.push_str(JOB_CONTEXT_LEAD);
    out.push_str("**");
    out.push_str(job_context);
    out.push_str("**\n\n");

    out.push_str(OUTPUT_STRUCTURE_HEADER);
    push_scorecard(&mut out);
    out.push('\n');
    out.push_str(EXECUTIVE_SUMMARY);
    out.push_str(RULE);

    out.push_str(SECTION_ANALYSIS_HEADER);
    push_sections(&mut out);
    out.push_str(RULE);

    out.push_str(KEYWORD_ALIGNMENT_LEAD);
    out.push_str(job_context);
    out.push_str("**\n\n");
    out.push_str(KEYWORD_ALIGNMENT_ITEMS);

    CritiquePrompt {
        instruction_text: out,
        job_context: job_context.to_string(),
    }
}

fn push_scorecard(out: &mut String) {
    // write! into a String cannot fail.
    let _ = writeln!(
        out,
        "### **Overall Score: [Provide a score out of {OVERALL_MAX_POINTS}]**\n"
    );
    for category in RUBRIC.iter() {
        let _ = writeln!(
            out,
            "*   **{}:** [Score / {}]",
            category.name, category.max_points
        );
    }
}

fn push_sections(out: &mut String) {
    for (i, section) in SECTIONS.iter().enumerate() {
        let _ = write!(
            out,
            "\n**{}. {}**\n\
             *   **✅ What's Good:** {}\n\
             *   **🔍 Areas for Improvement:** {}\n\
             *   **💡 Actionable Suggestion{}:** {}\n",
            i + 1,
            section.title,
            section.good,
            section.improve,
            section.suggestion_label,
            section.suggestion,
        );
    }
}

/// Length of a backtick fence that no backtick run in `text` can close.
fn fence_len(text: &str) -> usize {
    let mut longest = 0;
    let mut run = 0;
    for c in text.chars() {
        if c == '`' {
            run += 1;
            longest = longest.max(run);
        } else {
            run = 0;
        }
    }
    (longest + 1).max(MIN_FENCE_LEN)
}

//! Per-section parsers.
//!
//! Skills, experience and education are small state machines fed one
//! classified line at a time. A header line flushes whatever entry is being
//! accumulated, and `finish` flushes the last one.

use indexmap::IndexMap;
use regex::Regex;

use super::line::{Line, LineKind};
use crate::model::{EducationEntry, JobEntry};

/// Category used for skill items that appear before any category line.
pub const DEFAULT_SKILL_CATEGORY: &str = "General";

/// Compiled patterns shared by the section machines.
pub(crate) struct SectionPatterns {
    skill_label: Regex,
    job_dates: Regex,
    degree: Regex,
    degree_separator: Regex,
    year: Regex,
}

impl SectionPatterns {
    pub fn new() -> Self {
        Self {
            skill_label: Regex::new(r"^\*\*([^*]+)\*\*:\s*(.+)").unwrap(),
            job_dates: Regex::new(
                r"\d{4}|[Jj]an|[Ff]eb|[Mm]ar|[Aa]pr|[Mm]ay|[Jj]un|[Jj]ul|[Aa]ug|[Ss]ep|[Oo]ct|[Nn]ov|[Dd]ec",
            )
            .unwrap(),
            degree: Regex::new(r"^\*\*([^*]+)\*\*(.+)?").unwrap(),
            degree_separator: Regex::new(r"\s*[|\-]\s*").unwrap(),
            year: Regex::new(r"\d{4}").unwrap(),
        }
    }

    /// Parse `Title | Company | [Location-or-Dates] | [Dates]`.
    pub fn parse_job_header(&self, header: &str) -> JobEntry {
        let parts: Vec<&str> = header.split('|').map(str::trim).collect();
        let mut job = JobEntry::default();

        if let Some(title) = parts.first() {
            job.title = title.to_string();
        }
        if let Some(company) = parts.get(1) {
            job.company = company.to_string();
        }
        if let Some(third) = parts.get(2) {
            if self.job_dates.is_match(third) {
                job.dates = third.to_string();
            } else {
                job.location = third.to_string();
            }
        }
        if let Some(dates) = parts.get(3) {
            job.dates = dates.to_string();
        }

        job
    }

    /// Parse `**Degree** | School | Year`. Returns `None` when the line does
    /// not open with a non-empty bold span.
    pub fn parse_degree_line(&self, text: &str) -> Option<EducationEntry> {
        let caps = self.degree.captures(text)?;
        let mut entry = EducationEntry {
            degree: caps[1].trim().to_string(),
            ..Default::default()
        };

        let rest = caps.get(2).map(|m| m.as_str().trim()).unwrap_or("");
        if rest.is_empty() {
            return Some(entry);
        }

        let rest = rest.trim_start_matches(['|', '-']).trim();
        let parts: Vec<&str> = self.degree_separator.split(rest).collect();
        if let Some(school) = parts.first() {
            entry.school = school.trim().to_string();
        }
        if let Some(second) = parts.get(1) {
            entry.year = match self.year.find(second) {
                Some(m) => m.as_str().to_string(),
                None => second.trim().to_string(),
            };
        }

        Some(entry)
    }
}

impl Default for SectionPatterns {
    fn default() -> Self {
        Self::new()
    }
}

/// A line-driven section parser.
pub(crate) trait SectionMachine {
    type Output;

    /// Consume one classified line.
    fn feed(&mut self, line: Line<'_>);

    /// Flush any pending entry and return the result.
    fn finish(self) -> Self::Output;
}

/// Feed every line of `content` to `machine`.
pub(crate) fn run<M: SectionMachine>(mut machine: M, content: &str) -> M::Output {
    for raw in content.split('\n') {
        machine.feed(Line::classify(raw));
    }
    machine.finish()
}

/// Non-blank lines, trimmed and joined with single spaces.
pub(crate) fn parse_summary(content: &str) -> String {
    content
        .split('\n')
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// One item per non-blank, non-heading line, without a leading `- `.
pub(crate) fn parse_certifications(content: &str) -> Vec<String> {
    content
        .split('\n')
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(|line| line.strip_prefix("- ").unwrap_or(line).to_string())
        .collect()
}

/// Trimmed, non-empty comma segments.
fn split_items(text: &str) -> impl Iterator<Item = String> + '_ {
    text.split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(String::from)
}

/// Skills section: a current category plus the categories seen so far.
pub(crate) struct SkillsState<'p> {
    patterns: &'p SectionPatterns,
    current: String,
    skills: IndexMap<String, Vec<String>>,
}

impl<'p> SkillsState<'p> {
    pub fn new(patterns: &'p SectionPatterns) -> Self {
        Self {
            patterns,
            current: DEFAULT_SKILL_CATEGORY.to_string(),
            skills: IndexMap::new(),
        }
    }

    fn open_category(&mut self, name: &str) {
        self.current = name.to_string();
        self.skills.insert(self.current.clone(), Vec::new());
    }
}

impl SectionMachine for SkillsState<'_> {
    type Output = IndexMap<String, Vec<String>>;

    fn feed(&mut self, line: Line<'_>) {
        match line.kind {
            LineKind::Blank => {}
            LineKind::Heading(3) => self.open_category(line.heading_text()),
            LineKind::Bold => self.open_category(line.unwrapped()),
            _ => {
                // `**Category**: a, b` replaces that category's list and
                // leaves the current category alone.
                if let Some(caps) = self.patterns.skill_label.captures(line.text) {
                    let items = split_items(caps[2].trim()).collect();
                    self.skills.insert(caps[1].trim().to_string(), items);
                    return;
                }

                let items = split_items(line.without_bullet());
                self.skills
                    .entry(self.current.clone())
                    .or_default()
                    .extend(items);
            }
        }
    }

    fn finish(self) -> Self::Output {
        self.skills
    }
}

/// Experience section accumulator.
enum JobState {
    Idle,
    Job(JobEntry),
}

pub(crate) struct ExperienceState<'p> {
    patterns: &'p SectionPatterns,
    state: JobState,
    jobs: Vec<JobEntry>,
}

impl<'p> ExperienceState<'p> {
    pub fn new(patterns: &'p SectionPatterns) -> Self {
        Self {
            patterns,
            state: JobState::Idle,
            jobs: Vec::new(),
        }
    }

    fn flush(&mut self) {
        if let JobState::Job(job) = std::mem::replace(&mut self.state, JobState::Idle) {
            self.jobs.push(job);
        }
    }
}

impl SectionMachine for ExperienceState<'_> {
    type Output = Vec<JobEntry>;

    fn feed(&mut self, line: Line<'_>) {
        if line.is_heading(3) {
            self.flush();
            self.state = JobState::Job(self.patterns.parse_job_header(line.heading_text()));
            return;
        }

        let JobState::Job(job) = &mut self.state else {
            return;
        };

        if line.is_emphasis() {
            if job.dates.is_empty() {
                job.dates = line.unwrapped().to_string();
            }
        } else if !line.is_blank()
            && !line.text.starts_with('-')
            && !line.text.starts_with('*')
            && job.description.is_empty()
        {
            job.description = line.text.to_string();
        } else if let Some(achievement) = line.text.strip_prefix("- ") {
            job.achievements.push(achievement.trim().to_string());
        }
    }

    fn finish(mut self) -> Self::Output {
        self.flush();
        self.jobs
    }
}

/// Education section accumulator.
enum EntryState {
    Idle,
    Entry(EducationEntry),
}

pub(crate) struct EducationState<'p> {
    patterns: &'p SectionPatterns,
    state: EntryState,
    entries: Vec<EducationEntry>,
}

impl<'p> EducationState<'p> {
    pub fn new(patterns: &'p SectionPatterns) -> Self {
        Self {
            patterns,
            state: EntryState::Idle,
            entries: Vec::new(),
        }
    }

    fn flush(&mut self) {
        if let EntryState::Entry(entry) = std::mem::replace(&mut self.state, EntryState::Idle) {
            self.entries.push(entry);
        }
    }
}

impl SectionMachine for EducationState<'_> {
    type Output = Vec<EducationEntry>;

    fn feed(&mut self, line: Line<'_>) {
        if line.is_blank() {
            return;
        }

        if matches!(line.kind, LineKind::Bold | LineKind::BoldLead) {
            if let Some(entry) = self.patterns.parse_degree_line(line.text) {
                self.flush();
                self.state = EntryState::Entry(entry);
                return;
            }
        }

        // Details before the first degree line have nowhere to go.
        if let EntryState::Entry(entry) = &mut self.state {
            entry.details.push(line.text.to_string());
        }
    }

    fn finish(mut self) -> Self::Output {
        self.flush();
        self.entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn skills(content: &str) -> IndexMap<String, Vec<String>> {
        let patterns = SectionPatterns::new();
        run(SkillsState::new(&patterns), content)
    }

    fn experience(content: &str) -> Vec<JobEntry> {
        let patterns = SectionPatterns::new();
        run(ExperienceState::new(&patterns), content)
    }

    fn education(content: &str) -> Vec<EducationEntry> {
        let patterns = SectionPatterns::new();
        run(EducationState::new(&patterns), content)
    }

    #[test]
    fn test_summary_flattens_lines() {
        let summary = parse_summary("\n  Backend engineer.  \n\nLoves Rust.\n");
        assert_eq!(summary, "Backend engineer. Loves Rust.");
    }

    #[test]
    fn test_skills_subheadings() {
        let parsed = skills("### Languages\nPython, Go\n### Cloud\nAWS\n");
        assert_eq!(parsed.len(), 2);
        assert_eq!(parsed["Languages"], vec!["Python", "Go"]);
        assert_eq!(parsed["Cloud"], vec!["AWS"]);
    }

    #[test]
    fn test_skills_general_and_bold_forms() {
        let parsed = skills(
            "- Rust\n- SQL, , Bash\n**Frontend**\nReact\n**Data**: Spark, Kafka\nVue\n",
        );
        let keys: Vec<&str> = parsed.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["General", "Frontend", "Data"]);
        assert_eq!(parsed["General"], vec!["Rust", "SQL", "Bash"]);
        // the label line does not move the current category
        assert_eq!(parsed["Frontend"], vec!["React", "Vue"]);
        assert_eq!(parsed["Data"], vec!["Spark", "Kafka"]);
    }

    #[test]
    fn test_skills_repeated_category_replaces() {
        let parsed = skills("### Tools\nGit\n### Other\nVim\n### Tools\nDocker\n");
        let keys: Vec<&str> = parsed.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["Tools", "Other"]);
        assert_eq!(parsed["Tools"], vec!["Docker"]);
    }

    #[test]
    fn test_skills_unmatched_label_is_item() {
        let parsed = skills("Note **bold**: kept\n");
        assert_eq!(parsed["General"], vec!["Note **bold**: kept"]);
    }

    #[test]
    fn test_job_header_variants() {
        let patterns = SectionPatterns::new();

        let job = patterns.parse_job_header("Engineer | Acme | Remote | 2019 - 2021");
        assert_eq!(job.title, "Engineer");
        assert_eq!(job.company, "Acme");
        assert_eq!(job.location, "Remote");
        assert_eq!(job.dates, "2019 - 2021");

        let job = patterns.parse_job_header("Engineer | Acme | Mar 2020 - Present");
        assert_eq!(job.location, "");
        assert_eq!(job.dates, "Mar 2020 - Present");

        let job = patterns.parse_job_header("Engineer");
        assert_eq!(job.title, "Engineer");
        assert!(job.company.is_empty() && job.dates.is_empty());
    }

    #[test]
    fn test_experience_entries() {
        let jobs = experience(
            "Intro line with no job\n\
             ### Senior Engineer | Acme Corp | Austin, TX\n\
             *Jan 2020 - Present*\n\
             Led the platform team.\n\
             A second plain line.\n\
             - Cut latency by 40%\n\
             - Mentored 5 engineers\n\
             \n\
             ### Engineer | Initech\n\
             **2016 - 2019**\n\
             *ignored, dates already set*\n\
             - Built billing\n",
        );

        assert_eq!(jobs.len(), 2);
        let first = &jobs[0];
        assert_eq!(first.title, "Senior Engineer");
        assert_eq!(first.location, "Austin, TX");
        assert_eq!(first.dates, "Jan 2020 - Present");
        assert_eq!(first.description, "Led the platform team.");
        assert_eq!(first.achievements, vec!["Cut latency by 40%", "Mentored 5 engineers"]);

        let second = &jobs[1];
        assert_eq!(second.company, "Initech");
        assert_eq!(second.dates, "2016 - 2019");
        assert!(second.description.is_empty());
        assert_eq!(second.achievements, vec!["Built billing"]);
    }

    #[test]
    fn test_education_entries() {
        let entries = education(
            "Orphan detail\n\
             **BS Computer Science** | MIT | 2020\n\
             GPA 3.9\n\
             **MBA** - Wharton - Class of 2024\n\
             **Diploma**\n\
             Honors\n",
        );

        assert_eq!(entries.len(), 3);
        assert_eq!(entries[0].degree, "BS Computer Science");
        assert_eq!(entries[0].school, "MIT");
        assert_eq!(entries[0].year, "2020");
        assert_eq!(entries[0].details, vec!["GPA 3.9"]);

        assert_eq!(entries[1].school, "Wharton");
        assert_eq!(entries[1].year, "2024");

        assert_eq!(entries[2].degree, "Diploma");
        assert!(entries[2].school.is_empty());
        assert_eq!(entries[2].details, vec!["Honors"]);
    }

    #[test]
    fn test_education_year_without_digits() {
        let patterns = SectionPatterns::new();
        let entry = patterns
            .parse_degree_line("**PhD** | Stanford | Expected")
            .unwrap();
        assert_eq!(entry.year, "Expected");
        assert!(patterns.parse_degree_line("**** | nowhere").is_none());
    }

    #[test]
    fn test_certifications() {
        let certs = parse_certifications("### Cloud\n- AWS Solutions Architect\n\nCKA\n");
        assert_eq!(certs, vec!["AWS Solutions Architect", "CKA"]);
    }
}

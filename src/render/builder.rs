//! Resume to block-list rendering.

use crate::model::{
    Block, ContactInfo, DocumentProperties, EducationEntry, JobEntry, Paragraph, ParagraphStyle,
    RenderedDocument, Resume, TextRun, TextStyle, POINTS_PER_INCH,
};

use super::style::StyleConfig;

/// Hanging indent of bulleted paragraphs, in points.
pub const BULLET_INDENT: f32 = 0.25 * POINTS_PER_INCH;

/// Space after small paragraphs (contact lines, job titles, bullets), in points.
const TIGHT_SPACING: f32 = 3.0;

/// Space after the name, dates and job descriptions, in points.
const LOOSE_SPACING: f32 = 6.0;

/// Builds a [`RenderedDocument`] from a [`Resume`] in canonical section order.
///
/// Sections with no content produce no blocks at all, so there is never a
/// header without a body.
pub struct DocumentBuilder<'a> {
    style: &'a StyleConfig,
    doc: RenderedDocument,
}

impl<'a> DocumentBuilder<'a> {
    /// Create a builder for the given style.
    pub fn new(style: &'a StyleConfig) -> Self {
        let doc = RenderedDocument {
            page: style.page_setup(),
            ..Default::default()
        };
        Self { style, doc }
    }

    /// Render a resume.
    pub fn build(mut self, resume: &Resume) -> RenderedDocument {
        self.doc.properties = DocumentProperties {
            title: Some(resume.name.clone()),
            creator: Some(resume.name.clone()),
            created: None,
        };

        self.add_header(&resume.name, &resume.contact);

        if !resume.summary.is_empty() {
            self.add_text_section("Summary", &resume.summary);
        }
        if resume.skill_count() > 0 {
            self.add_skills(resume);
        }
        if !resume.experience.is_empty() {
            self.add_experience(&resume.experience);
        }
        if !resume.education.is_empty() {
            self.add_education(&resume.education);
        }
        if !resume.certifications.is_empty() {
            self.add_certifications(&resume.certifications);
        }
        for (name, content) in &resume.other_sections {
            self.add_text_section(name, content);
        }

        self.doc
    }

    fn add_header(&mut self, name: &str, contact: &ContactInfo) {
        let fonts = &self.style.fonts;
        let name_style = fonts.name.text_style().bold(fonts.name.is_bold(true));
        let mut para = Paragraph::new().with_style(self.centered(LOOSE_SPACING));
        para.add_run(TextRun::new(name.to_uppercase(), name_style));
        self.doc.add_block(Block::Paragraph(para));

        for line in contact_lines(contact) {
            let mut para = Paragraph::new().with_style(self.centered(TIGHT_SPACING));
            para.add_run(self.body_run(line));
            self.doc.add_block(Block::Paragraph(para));
        }

        self.add_spacer(self.style.spacing.section);
    }

    fn add_section_header(&mut self, title: &str) {
        let spec = &self.style.fonts.section_header;
        let run = TextRun::new(
            title.to_uppercase(),
            spec.text_style().bold(spec.is_bold(true)),
        );
        let para = Paragraph::with_run(run).with_style(ParagraphStyle {
            space_before: Some(self.style.spacing.before_header),
            space_after: Some(self.style.spacing.after_header),
            line_spacing: Some(self.style.spacing.line),
            bottom_border: true,
            ..Default::default()
        });
        self.doc.add_block(Block::SectionHeader(para));
    }

    /// Header plus the trimmed text as a single paragraph.
    fn add_text_section(&mut self, title: &str, content: &str) {
        self.add_section_header(title);

        let content = content.trim();
        if !content.is_empty() {
            let mut para = self.paragraph(self.style.spacing.paragraph);
            para.add_run(self.body_run(content));
            self.doc.add_block(Block::Paragraph(para));
        }

        self.add_spacer(self.style.spacing.section);
    }

    fn add_skills(&mut self, resume: &Resume) {
        self.add_section_header("Core Skills");

        for (category, items) in resume.skills.iter().filter(|(_, items)| !items.is_empty()) {
            let mut para = self.paragraph(self.style.spacing.paragraph);
            para.add_run(TextRun::new(category.as_str(), self.body_style().bold(true)));
            para.add_run(self.body_run(format!("\n{}", items.join(", "))));
            self.doc.add_block(Block::Paragraph(para));
        }

        self.add_spacer(self.style.spacing.section);
    }

    fn add_experience(&mut self, jobs: &[JobEntry]) {
        self.add_section_header("Professional Experience");

        for (i, job) in jobs.iter().enumerate() {
            let mut title = self.paragraph(TIGHT_SPACING);
            title.add_run(TextRun::new(
                job.title.as_str(),
                self.style.fonts.job_title.text_style().bold(true),
            ));
            let company: Vec<&str> = [job.company.as_str(), job.location.as_str()]
                .into_iter()
                .filter(|part| !part.is_empty())
                .collect();
            if !company.is_empty() {
                title.add_run(self.body_run(format!(" | {}", company.join(" | "))));
            }
            self.doc.add_block(Block::Paragraph(title));

            if !job.dates.is_empty() {
                let mut dates = self.paragraph(LOOSE_SPACING);
                dates.add_run(TextRun::new(
                    job.dates.as_str(),
                    self.style.fonts.dates().text_style().italic(true),
                ));
                self.doc.add_block(Block::Paragraph(dates));
            }

            if !job.description.is_empty() {
                let mut description = self.paragraph(LOOSE_SPACING);
                description.add_run(self.body_run(job.description.as_str()));
                self.doc.add_block(Block::Paragraph(description));
            }

            for achievement in &job.achievements {
                self.add_bullet(achievement);
            }

            if i + 1 < jobs.len() {
                self.add_spacer(self.style.spacing.paragraph);
            }
        }

        self.add_spacer(self.style.spacing.section);
    }

    fn add_education(&mut self, entries: &[EducationEntry]) {
        self.add_section_header("Education");

        for entry in entries {
            let mut para = self.paragraph(self.style.spacing.paragraph);
            para.add_run(TextRun::new(entry.degree.as_str(), self.body_style().bold(true)));
            if let Some(place) = education_place(entry) {
                para.add_run(self.body_run(format!(" | {}", place)));
            }
            self.doc.add_block(Block::Paragraph(para));

            for detail in entry.details.iter().filter(|d| !d.trim().is_empty()) {
                let mut para = self.paragraph(TIGHT_SPACING);
                para.add_run(self.body_run(detail.as_str()));
                self.doc.add_block(Block::Paragraph(para));
            }
        }

        self.add_spacer(self.style.spacing.section);
    }

    fn add_certifications(&mut self, certifications: &[String]) {
        self.add_section_header("Certifications");
        for cert in certifications {
            self.add_bullet(cert);
        }
        self.add_spacer(self.style.spacing.section);
    }

    fn add_bullet(&mut self, text: &str) {
        let mut para = Paragraph::new().with_style(ParagraphStyle {
            space_after: Some(TIGHT_SPACING),
            line_spacing: Some(self.style.spacing.line),
            indent_left: Some(BULLET_INDENT),
            first_line_indent: Some(-BULLET_INDENT),
            ..Default::default()
        });
        para.add_run(self.body_run(text));
        self.doc.add_block(Block::BulletItem(para));
    }

    fn add_spacer(&mut self, space_after: f32) {
        self.doc.add_block(Block::Spacer { space_after });
    }

    fn paragraph(&self, space_after: f32) -> Paragraph {
        Paragraph::new().with_style(ParagraphStyle {
            line_spacing: Some(self.style.spacing.line),
            ..ParagraphStyle::spaced(space_after)
        })
    }

    fn centered(&self, space_after: f32) -> ParagraphStyle {
        ParagraphStyle {
            line_spacing: Some(self.style.spacing.line),
            ..ParagraphStyle::centered(space_after)
        }
    }

    fn body_style(&self) -> TextStyle {
        self.style.fonts.body.text_style()
    }

    fn body_run(&self, text: impl Into<String>) -> TextRun {
        TextRun::new(text, self.body_style())
    }
}

/// Render a resume with the given style.
pub fn render(resume: &Resume, style: &StyleConfig) -> RenderedDocument {
    DocumentBuilder::new(style).build(resume)
}

/// The two centered contact lines; each is omitted when it would be empty.
fn contact_lines(contact: &ContactInfo) -> Vec<String> {
    let first: Vec<&str> = [&contact.location, &contact.email, &contact.phone]
        .into_iter()
        .filter(|s| !s.is_empty())
        .map(String::as_str)
        .collect();

    let mut second = Vec::new();
    if !contact.linkedin.is_empty() {
        second.push(format!("LinkedIn: {}", contact.linkedin));
    }
    if !contact.github.is_empty() {
        second.push(format!("GitHub: {}", contact.github));
    }
    if !contact.website.is_empty() {
        second.push(contact.website.clone());
    }

    let mut lines = Vec::new();
    if !first.is_empty() {
        lines.push(first.join("  "));
    }
    if !second.is_empty() {
        lines.push(second.join(" | "));
    }
    lines
}

/// `school - (year)`, or whichever of the two is present.
fn education_place(entry: &EducationEntry) -> Option<String> {
    let year = (!entry.year.is_empty()).then(|| format!("({})", entry.year));
    match (entry.school.as_str(), year) {
        ("", None) => None,
        ("", Some(year)) => Some(year),
        (school, None) => Some(school.to_string()),
        (school, Some(year)) => Some(format!("{} - {}", school, year)),
    }
}

//! Integration tests for the export pipeline and exporter registry.

use std::fs;
use std::io::Read;
use std::sync::Arc;

use resume_export::error::Result;
use resume_export::export::{find_resume_files, Exporter, ExporterRegistry, ResumeExporter};
use resume_export::{export_file, RenderedDocument, Resume, RuleConfig, StyleConfig};

const SOURCE: &str = "# Jane Doe
NYC | jane@x.io | 555-123-4567

## Summary
Platform engineer.

## Experience
### Staff Engineer | Acme | Remote | 2020 - Present
- Shipped v2

## Education
**BS CS** | MIT | 2014
";

/// Writes the candidate name only.
struct NameExporter;

impl Exporter for NameExporter {
    fn extension(&self) -> &str {
        "name"
    }

    fn name(&self) -> &str {
        "name-only"
    }

    fn mime_type(&self) -> &'static str {
        "text/plain"
    }

    fn export_bytes(&self, resume: &Resume, _doc: &RenderedDocument) -> Result<Vec<u8>> {
        Ok(resume.name.clone().into_bytes())
    }
}

#[test]
fn test_export_file_with_validation() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("Jane_Resume.md");
    fs::write(&input, SOURCE).unwrap();
    let output = dir.path().join("Jane_Resume.docx");

    let result = export_file(&input, &output, true);

    assert!(result.success);
    assert_eq!(result.input_file, input);
    assert_eq!(result.output_file, output);
    assert!(result.errors.is_empty(), "{:?}", result.errors);
    assert!(result.validation.unwrap().is_valid);
}

#[test]
fn test_exported_docx_records_creation_time() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("resume.md");
    fs::write(&input, SOURCE).unwrap();
    let output = dir.path().join("resume.docx");

    assert!(export_file(&input, &output, false).success);

    let mut archive = zip::ZipArchive::new(fs::File::open(&output).unwrap()).unwrap();
    let mut core = String::new();
    archive
        .by_name("docProps/core.xml")
        .unwrap()
        .read_to_string(&mut core)
        .unwrap();
    assert!(core.contains("<dcterms:created xsi:type=\"dcterms:W3CDTF\">"));
    assert!(core.contains("<dc:title>Jane Doe</dc:title>"));
}

#[test]
fn test_validation_warnings_are_collected() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("resume.md");
    fs::write(&input, SOURCE).unwrap();

    let exporter = ResumeExporter::new()
        .with_style(StyleConfig::new().with_body_font("Papyrus"))
        .with_rules(RuleConfig::new().with_standard_sections(["Experience"]));
    let result = exporter.export(&input, dir.path().join("resume.docx"), true);

    assert!(result.success);
    assert!(result.errors.is_empty());
    assert_eq!(result.warnings.len(), 2);
    assert!(result.warnings[0].starts_with("Non-ATS fonts detected: Papyrus."));
    assert_eq!(result.warnings[1], "Missing standard sections: Education");
    assert!(result.is_ok());
}

#[test]
fn test_custom_exporter() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("resume.md");
    fs::write(&input, SOURCE).unwrap();

    let mut registry = ExporterRegistry::with_defaults();
    registry.register(Arc::new(NameExporter));
    assert!(registry.supports("NAME"));
    assert!(registry.get_by_name("name-only").is_some());

    let exporter = ResumeExporter::new().with_registry(registry);
    let results = exporter.export_multi_format(&input, dir.path().join("out"), &["name", "txt"]);

    assert!(results["name"].success);
    assert_eq!(
        fs::read_to_string(dir.path().join("out").join("resume.name")).unwrap(),
        "Jane Doe"
    );
    let text = fs::read_to_string(dir.path().join("out").join("resume.txt")).unwrap();
    assert!(text.contains("PROFESSIONAL EXPERIENCE"));
    assert!(text.contains("- Shipped v2"));
}

#[test]
fn test_batch_export() {
    let dir = tempfile::tempdir().unwrap();
    let acme = dir.path().join("applications").join("acme");
    let initech = dir.path().join("applications").join("initech");
    fs::create_dir_all(&acme).unwrap();
    fs::create_dir_all(&initech).unwrap();
    fs::write(acme.join("Jane_Resume.md"), SOURCE).unwrap();
    fs::write(initech.join("jane_resume.md"), SOURCE).unwrap();
    fs::write(initech.join("cover_letter.md"), "# Dear hiring manager").unwrap();

    let files = find_resume_files(dir.path()).unwrap();
    assert_eq!(files.len(), 2);

    let results = ResumeExporter::new().export_batch(dir.path(), true).unwrap();
    assert_eq!(results.len(), 2);
    assert_eq!(results[0].input_file, acme.join("Jane_Resume.md"));
    assert_eq!(results[1].input_file, initech.join("jane_resume.md"));
    for result in &results {
        assert!(result.is_ok(), "{:?}", result.errors);
        assert!(result.output_file.exists());
    }
    assert!(!initech.join("cover_letter.docx").exists());
}

#[test]
fn test_batch_with_no_resumes() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("notes.md"), "x").unwrap();

    let results = ResumeExporter::new().export_batch(dir.path(), false).unwrap();
    assert!(results.is_empty());
}

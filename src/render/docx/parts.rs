//! Package parts other than the main document.

use crate::model::{DocumentProperties, TextStyle};

use super::document_xml::LIST_BULLET_STYLE;
use super::{
    content_type_values as ct, escape_xml, namespaces, part_names, relationship_types as rt,
    twips, BULLET_NUM_ID,
};
use crate::render::builder::BULLET_INDENT;

const XML_DECLARATION: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#;

/// `[Content_Types].xml`
pub(crate) fn content_types_xml() -> String {
    let overrides = [
        (part_names::DOCUMENT, ct::DOCUMENT),
        (part_names::STYLES, ct::STYLES),
        (part_names::NUMBERING, ct::NUMBERING),
        (part_names::SETTINGS, ct::SETTINGS),
        (part_names::CORE, ct::CORE_PROPERTIES),
    ];

    let mut xml = String::from(XML_DECLARATION);
    xml.push('\n');
    xml.push_str(&format!(r#"<Types xmlns="{}">"#, namespaces::CONTENT_TYPES));
    xml.push_str(&format!(
        r#"<Default Extension="rels" ContentType="{}"/>"#,
        ct::RELATIONSHIPS
    ));
    xml.push_str(&format!(r#"<Default Extension="xml" ContentType="{}"/>"#, ct::XML));
    for (part, content_type) in overrides {
        xml.push_str(&format!(
            r#"<Override PartName="/{}" ContentType="{}"/>"#,
            part, content_type
        ));
    }
    xml.push_str("</Types>");
    xml
}

fn relationships_xml(rels: &[(&str, &str)]) -> String {
    let mut xml = String::from(XML_DECLARATION);
    xml.push('\n');
    xml.push_str(&format!(r#"<Relationships xmlns="{}">"#, namespaces::PACKAGE_RELS));
    for (i, (rel_type, target)) in rels.iter().enumerate() {
        xml.push_str(&format!(
            r#"<Relationship Id="rId{}" Type="{}" Target="{}"/>"#,
            i + 1,
            rel_type,
            target
        ));
    }
    xml.push_str("</Relationships>");
    xml
}

/// `_rels/.rels`
pub(crate) fn root_rels_xml() -> String {
    relationships_xml(&[
        (rt::DOCUMENT, part_names::DOCUMENT),
        (rt::CORE_PROPERTIES, part_names::CORE),
    ])
}

/// `word/_rels/document.xml.rels`; targets are relative to `word/`.
pub(crate) fn document_rels_xml() -> String {
    relationships_xml(&[
        (rt::STYLES, "styles.xml"),
        (rt::NUMBERING, "numbering.xml"),
        (rt::SETTINGS, "settings.xml"),
    ])
}

/// `word/styles.xml` with document defaults taken from the body style.
pub(crate) fn styles_xml(body: &TextStyle) -> String {
    let font = escape_xml(&body.font_name);
    let half_points = (body.font_size * 2.0).round() as u32;

    let mut xml = String::from(XML_DECLARATION);
    xml.push('\n');
    xml.push_str(&format!(r#"<w:styles xmlns:w="{}">"#, namespaces::W));
    xml.push_str(&format!(
        r#"<w:docDefaults><w:rPrDefault><w:rPr><w:rFonts w:ascii="{0}" w:hAnsi="{0}" w:cs="{0}"/><w:sz w:val="{1}"/><w:szCs w:val="{1}"/></w:rPr></w:rPrDefault><w:pPrDefault><w:pPr><w:spacing w:after="0" w:line="240" w:lineRule="auto"/></w:pPr></w:pPrDefault></w:docDefaults>"#,
        font, half_points
    ));
    xml.push_str(
        r#"<w:style w:type="paragraph" w:default="1" w:styleId="Normal"><w:name w:val="Normal"/><w:qFormat/></w:style>"#,
    );
    xml.push_str(&format!(
        r#"<w:style w:type="paragraph" w:styleId="{0}"><w:name w:val="List Bullet"/><w:basedOn w:val="Normal"/><w:pPr><w:numPr><w:numId w:val="{1}"/></w:numPr></w:pPr></w:style>"#,
        LIST_BULLET_STYLE, BULLET_NUM_ID
    ));
    xml.push_str("</w:styles>");
    xml
}

/// `word/numbering.xml` with one bullet list.
pub(crate) fn numbering_xml() -> String {
    let indent = twips(BULLET_INDENT);

    let mut xml = String::from(XML_DECLARATION);
    xml.push('\n');
    xml.push_str(&format!(r#"<w:numbering xmlns:w="{}">"#, namespaces::W));
    xml.push_str(&format!(
        r#"<w:abstractNum w:abstractNumId="0"><w:multiLevelType w:val="singleLevel"/><w:lvl w:ilvl="0"><w:start w:val="1"/><w:numFmt w:val="bullet"/><w:lvlText w:val="•"/><w:lvlJc w:val="left"/><w:pPr><w:ind w:left="{0}" w:hanging="{0}"/></w:pPr></w:lvl></w:abstractNum>"#,
        indent
    ));
    xml.push_str(&format!(
        r#"<w:num w:numId="{}"><w:abstractNumId w:val="0"/></w:num>"#,
        BULLET_NUM_ID
    ));
    xml.push_str("</w:numbering>");
    xml
}

/// `word/settings.xml`
pub(crate) fn settings_xml() -> String {
    format!(
        r#"{}
<w:settings xmlns:w="{}"><w:defaultTabStop w:val="720"/><w:compat><w:compatSetting w:name="compatibilityMode" w:uri="http://schemas.microsoft.com/office/word" w:val="15"/></w:compat></w:settings>"#,
        XML_DECLARATION,
        namespaces::W
    )
}

/// `docProps/core.xml`
pub(crate) fn core_xml(properties: &DocumentProperties) -> String {
    let mut xml = String::from(XML_DECLARATION);
    xml.push('\n');
    xml.push_str(&format!(
        r#"<cp:coreProperties xmlns:cp="{}" xmlns:dc="{}" xmlns:dcterms="{}" xmlns:xsi="{}">"#,
        namespaces::CORE_PROPERTIES,
        namespaces::DC,
        namespaces::DCTERMS,
        namespaces::XSI
    ));
    if let Some(title) = &properties.title {
        xml.push_str(&format!("<dc:title>{}</dc:title>", escape_xml(title)));
    }
    if let Some(creator) = &properties.creator {
        xml.push_str(&format!("<dc:creator>{}</dc:creator>", escape_xml(creator)));
    }
    if let Some(created) = properties.created {
        xml.push_str(&format!(
            r#"<dcterms:created xsi:type="dcterms:W3CDTF">{}</dcterms:created>"#,
            created.format("%Y-%m-%dT%H:%M:%SZ")
        ));
    }
    xml.push_str("</cp:coreProperties>");
    xml
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    #[test]
    fn test_content_types() {
        let xml = content_types_xml();
        assert!(xml.contains(r#"PartName="/word/document.xml""#));
        assert!(xml.contains(r#"PartName="/docProps/core.xml""#));
        assert!(xml.contains(r#"Extension="rels""#));
    }

    #[test]
    fn test_document_rels_have_no_images() {
        let xml = document_rels_xml();
        assert!(xml.contains(r#"Target="styles.xml""#));
        assert!(!xml.contains("image"));
    }

    #[test]
    fn test_numbering_indent() {
        let xml = numbering_xml();
        assert!(xml.contains(r#"<w:ind w:left="360" w:hanging="360"/>"#));
        assert!(xml.contains(r#"<w:numFmt w:val="bullet"/>"#));
    }

    #[test]
    fn test_core_properties() {
        let properties = DocumentProperties {
            title: Some("Jane & Co".into()),
            creator: None,
            created: Some(Utc.with_ymd_and_hms(2024, 3, 1, 9, 30, 0).unwrap()),
        };
        let xml = core_xml(&properties);
        assert!(xml.contains("<dc:title>Jane &amp; Co</dc:title>"));
        assert!(!xml.contains("dc:creator"));
        assert!(xml.contains("2024-03-01T09:30:00Z"));
    }

    #[test]
    fn test_styles_defaults() {
        let xml = styles_xml(&TextStyle::new("Georgia", 11.0));
        assert!(xml.contains(r#"w:ascii="Georgia""#));
        assert!(xml.contains(r#"<w:sz w:val="22"/>"#));
        assert!(xml.contains(r#"w:styleId="ListBullet""#));
    }
}

//! Structural schema validation against the bundled SAF-T XSD.
//!
//! [`validate_xml`] parses the decoded artifact and checks element
//! structure (known elements, required children, sequence order) against a
//! compiled model of `SAFTAO1.01_01.xsd`. All diagnostics are collected —
//! not just the first — each tagged with its 1-based source line, matching
//! the line-addressed reports of a conventional XSD processor.
//!
//! Record-level validation (preconditions, artifact decoding, status
//! transitions) lives in the lifecycle module; this module is pure.

mod model;

use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};

use crate::core::SchemaDiagnostic;
use crate::document::SAFT_NAMESPACE;
use model::{ElementRule, rule_for};

/// The bundled XML Schema Definition shipped alongside generated files.
pub const SAFT_XSD: &str = include_str!("SAFTAO1.01_01.xsd");

/// Result of a schema check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaReport {
    pub valid: bool,
    pub errors: Vec<SchemaDiagnostic>,
}

/// Validate XML text against the SAF-T structural schema.
///
/// Returns every diagnostic found; an empty list means the document
/// conforms.
pub fn validate_xml(xml: &str) -> Vec<SchemaDiagnostic> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut diagnostics = Vec::new();
    let mut stack: Vec<Frame> = Vec::new();
    let mut lines = LineTracker::new(xml);
    let mut saw_root = false;

    loop {
        let event = reader.read_event();
        let line = lines.line_at(reader.buffer_position() as u64);
        match event {
            Ok(Event::Start(ref e)) => {
                open_element(e, line, &mut stack, &mut diagnostics, &mut saw_root);
            }
            Ok(Event::Empty(ref e)) => {
                // Self-closing: open and immediately close.
                open_element(e, line, &mut stack, &mut diagnostics, &mut saw_root);
                if let Some(frame) = stack.pop() {
                    close_element(frame, line, &mut diagnostics);
                }
            }
            Ok(Event::End(_)) => {
                if let Some(frame) = stack.pop() {
                    close_element(frame, line, &mut diagnostics);
                }
            }
            Ok(Event::Eof) => {
                if !stack.is_empty() {
                    diagnostics.push(SchemaDiagnostic::new(line, "unexpected end of document"));
                }
                break;
            }
            Ok(_) => {}
            Err(e) => {
                diagnostics.push(SchemaDiagnostic::new(line, format!("XML parse error: {e}")));
                break;
            }
        }
    }

    if !saw_root && diagnostics.is_empty() {
        diagnostics.push(SchemaDiagnostic::new(0, "document has no root element"));
    }

    diagnostics
}

/// Convenience wrapper producing a [`SchemaReport`].
pub fn check(xml: &str) -> SchemaReport {
    let errors = validate_xml(xml);
    SchemaReport {
        valid: errors.is_empty(),
        errors,
    }
}

struct Frame {
    name: String,
    rule: Option<&'static ElementRule>,
    /// Child element names with the line they opened on, in document order.
    children: Vec<(String, u64)>,
}

fn open_element(
    e: &BytesStart<'_>,
    line: u64,
    stack: &mut Vec<Frame>,
    diagnostics: &mut Vec<SchemaDiagnostic>,
    saw_root: &mut bool,
) {
    let name = String::from_utf8_lossy(e.name().as_ref()).into_owned();

    if let Some(parent) = stack.last_mut() {
        parent.children.push((name.clone(), line));
    } else {
        *saw_root = true;
        if name != "AuditFile" {
            diagnostics.push(SchemaDiagnostic::new(
                line,
                format!("root element must be 'AuditFile', found '{name}'"),
            ));
        } else {
            check_root_namespace(e, line, diagnostics);
        }
    }

    stack.push(Frame {
        rule: rule_for(&name),
        name,
        children: Vec::new(),
    });
}

fn check_root_namespace(e: &BytesStart<'_>, line: u64, diagnostics: &mut Vec<SchemaDiagnostic>) {
    let ns = e.attributes().flatten().find_map(|attr| {
        (attr.key.as_ref() == b"xmlns")
            .then(|| String::from_utf8_lossy(&attr.value).into_owned())
    });
    match ns.as_deref() {
        Some(SAFT_NAMESPACE) => {}
        Some(other) => diagnostics.push(SchemaDiagnostic::new(
            line,
            format!("unexpected namespace '{other}', expected '{SAFT_NAMESPACE}'"),
        )),
        None => diagnostics.push(SchemaDiagnostic::new(
            line,
            format!("root element is missing the '{SAFT_NAMESPACE}' namespace"),
        )),
    }
}

/// Check a closed element's collected children against its ordered rule
/// sequence. Leaf elements (no rule) must not contain element children.
fn close_element(frame: Frame, close_line: u64, diagnostics: &mut Vec<SchemaDiagnostic>) {
    let Some(rule) = frame.rule else {
        for (child, line) in &frame.children {
            diagnostics.push(SchemaDiagnostic::new(
                *line,
                format!("element '{child}' is not allowed inside '{}'", frame.name),
            ));
        }
        return;
    };

    let mut rule_idx = 0usize;
    let mut seen: u32 = 0;

    for (child, line) in &frame.children {
        // Advance over rules this child does not satisfy. Skipped required
        // rules are only reported when the scan ends in a match — a failed
        // scan leaves the sequence position untouched, so those rules may
        // still be satisfied by later children.
        let mut matched = false;
        let mut idx = rule_idx;
        let mut counted = seen;
        let mut skipped = Vec::new();
        while idx < rule.children.len() {
            let candidate = &rule.children[idx];
            if candidate.name == child {
                let at_max = !candidate.unbounded && counted >= 1;
                if at_max {
                    // Occurs again later in the sequence? Fall through to skip.
                } else {
                    matched = true;
                    rule_idx = idx;
                    seen = counted + 1;
                    break;
                }
            }
            if counted < candidate.min {
                skipped.push(SchemaDiagnostic::new(
                    *line,
                    format!(
                        "element '{}' is missing required child '{}'",
                        frame.name, candidate.name
                    ),
                ));
            }
            idx += 1;
            counted = 0;
        }
        if matched {
            diagnostics.append(&mut skipped);
        } else {
            diagnostics.push(SchemaDiagnostic::new(
                *line,
                format!(
                    "element '{child}' is not allowed here inside '{}'",
                    frame.name
                ),
            ));
        }
    }

    // Remaining rules after the last matched child.
    let mut idx = rule_idx;
    let mut counted = seen;
    while idx < rule.children.len() {
        if counted < rule.children[idx].min {
            diagnostics.push(SchemaDiagnostic::new(
                close_line,
                format!(
                    "element '{}' is missing required child '{}'",
                    frame.name, rule.children[idx].name
                ),
            ));
        }
        idx += 1;
        counted = 0;
    }
}

/// Incremental byte-offset → line-number mapping over the source text.
struct LineTracker<'a> {
    bytes: &'a [u8],
    last_offset: usize,
    newlines_before: u64,
}

impl<'a> LineTracker<'a> {
    fn new(text: &'a str) -> Self {
        Self {
            bytes: text.as_bytes(),
            last_offset: 0,
            newlines_before: 0,
        }
    }

    /// 1-based line containing the given byte offset. Offsets must be fed in
    /// non-decreasing order.
    fn line_at(&mut self, offset: u64) -> u64 {
        let offset = (offset as usize).min(self.bytes.len());
        if offset > self.last_offset {
            self.newlines_before += self.bytes[self.last_offset..offset]
                .iter()
                .filter(|&&b| b == b'\n')
                .count() as u64;
            self.last_offset = offset;
        }
        self.newlines_before + 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn xsd_resource_is_bundled() {
        assert!(SAFT_XSD.contains("urn:OECD:StandardAuditFile-Tax:PT_1.01_01"));
        assert!(SAFT_XSD.contains("AuditFile"));
    }

    #[test]
    fn rejects_wrong_root() {
        let diags = validate_xml("<Invoice></Invoice>");
        assert!(diags.iter().any(|d| d.message.contains("AuditFile")));
    }

    #[test]
    fn reports_line_numbers() {
        let xml = "<AuditFile xmlns=\"urn:OECD:StandardAuditFile-Tax:PT_1.01_01\">\n  <Bogus></Bogus>\n</AuditFile>";
        let diags = validate_xml(xml);
        let bogus = diags
            .iter()
            .find(|d| d.message.contains("Bogus"))
            .expect("diagnostic for unknown element");
        assert_eq!(bogus.line, 2);
    }

    #[test]
    fn malformed_xml_is_a_diagnostic_not_a_panic() {
        let diags = validate_xml("<AuditFile><Header></AuditFile>");
        assert!(!diags.is_empty());
    }
}

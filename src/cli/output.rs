use std::io::{self, Write};

use crossterm::style::{Color, Stylize};

use crate::model::snapshot::{ProjectBody, SectionEntry, Snapshot, TaskGroup};

/// Width of the `=` rule on each side of a project banner
const BANNER_RULE_WIDTH: usize = 30;

const SECTION_COLOR: Color = Color::Rgb {
    r: 0xEE,
    g: 0x82,
    b: 0xEE,
};
const SUBSECTION_COLOR: Color = Color::Rgb {
    r: 0x41,
    g: 0x69,
    b: 0xE1,
};

// ---------------------------------------------------------------------------
// Report lines
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    /// `===== PROJECT =====`
    Banner,
    Blank,
    /// A board section or a list-layout `Name:` task
    SectionHeader,
    Task,
    /// An indented subtask named like `Name:`
    SubsectionHeader,
    Subtask,
}

/// One line of the report, unstyled. Indentation is part of `text`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportLine {
    pub kind: LineKind,
    pub text: String,
}

impl ReportLine {
    fn new(kind: LineKind, text: impl Into<String>) -> Self {
        ReportLine {
            kind,
            text: text.into(),
        }
    }
}

/// Whether a task name marks a pseudo-section (it ends with a colon)
pub fn is_pseudo_section_title(name: &str) -> bool {
    name.ends_with(':')
}

pub fn format_banner(project_name: &str) -> String {
    let rule = "=".repeat(BANNER_RULE_WIDTH);
    format!("{} {} {}", rule, project_name.to_uppercase(), rule)
}

// ---------------------------------------------------------------------------
// Rendering
// ---------------------------------------------------------------------------

/// Walk a snapshot and produce the report for every open task, in fetch order.
pub fn render_snapshot(snapshot: &Snapshot) -> Vec<ReportLine> {
    let mut lines = Vec::new();
    for entry in &snapshot.projects {
        lines.push(ReportLine::new(
            LineKind::Banner,
            format_banner(&entry.project.name),
        ));
        match &entry.body {
            ProjectBody::Board { sections } => render_board(sections, &mut lines),
            ProjectBody::List(group) => render_list(group, &mut lines),
        }
    }
    lines
}

fn push_section_header(name: &str, lines: &mut Vec<ReportLine>) {
    lines.push(ReportLine::new(LineKind::Blank, ""));
    lines.push(ReportLine::new(LineKind::SectionHeader, name));
}

/// Board sections are real, so top-level task names are never classified.
fn render_board(sections: &[SectionEntry], lines: &mut Vec<ReportLine>) {
    for entry in sections {
        push_section_header(&entry.section.name, lines);
        for task in entry.group.tasks.iter().filter(|t| !t.completed) {
            lines.push(ReportLine::new(LineKind::Task, task.name.as_str()));
            render_subtasks(&entry.group, &task.gid, lines);
        }
    }
}

fn render_list(group: &TaskGroup, lines: &mut Vec<ReportLine>) {
    for task in group.tasks.iter().filter(|t| !t.completed) {
        if is_pseudo_section_title(&task.name) {
            push_section_header(&task.name, lines);
        } else {
            lines.push(ReportLine::new(LineKind::Task, task.name.as_str()));
            render_subtasks(group, &task.gid, lines);
        }
    }
}

fn render_subtasks(group: &TaskGroup, task_gid: &str, lines: &mut Vec<ReportLine>) {
    for subtask in group.subtasks_of(task_gid).iter().filter(|t| !t.completed) {
        let kind = if is_pseudo_section_title(&subtask.name) {
            LineKind::SubsectionHeader
        } else {
            LineKind::Subtask
        };
        lines.push(ReportLine::new(kind, format!("  {}", subtask.name)));
    }
}

// ---------------------------------------------------------------------------
// Output
// ---------------------------------------------------------------------------

/// The report as plain text, one line per entry
pub fn report_text(lines: &[ReportLine]) -> String {
    lines
        .iter()
        .map(|l| l.text.as_str())
        .collect::<Vec<_>>()
        .join("\n")
}

fn styled(line: &ReportLine) -> String {
    let text = line.text.as_str();
    match line.kind {
        LineKind::Banner => text.with(Color::Magenta).bold().to_string(),
        LineKind::SectionHeader => text.with(SECTION_COLOR).to_string(),
        LineKind::SubsectionHeader => text.with(SUBSECTION_COLOR).to_string(),
        LineKind::Blank | LineKind::Task | LineKind::Subtask => text.to_string(),
    }
}

/// Write the report, styling headers when `color` is set
pub fn write_report<W: Write>(out: &mut W, lines: &[ReportLine], color: bool) -> io::Result<()> {
    for line in lines {
        if color {
            writeln!(out, "{}", styled(line))?;
        } else {
            writeln!(out, "{}", line.text)?;
        }
    }
    out.flush()
}

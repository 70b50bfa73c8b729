//! Output formatting: table, JSON, YAML, HTML, plain.
//!
//! Renders page regions in the format selected by `--output`. Table uses
//! `tabled`, structured formats serialize the fragment via serde, HTML
//! is the fragment's own markup, plain emits one value per line.

use std::fmt::Write as _;
use std::io::{self, IsTerminal, Write};

use owo_colors::OwoColorize;
use tabled::{Table, Tabled, settings::Style};

use pgs_core::format::format_number;
use pgs_core::view::{Banner, GradeSheet, MemberRow, ModuleTile, StudentCard, StudentLink};
use pgs_core::{Fragment, GradeBand, Severity};

use crate::cli::{ColorMode, OutputFormat};
use crate::error::CliError;

// ── Color helpers ────────────────────────────────────────────────────

/// Determine whether color output should be enabled.
pub fn should_color(mode: ColorMode) -> bool {
    match mode {
        ColorMode::Always => true,
        ColorMode::Never => false,
        ColorMode::Auto => io::stdout().is_terminal() && std::env::var("NO_COLOR").is_err(),
    }
}

fn paint_band(text: &str, band: GradeBand, color: bool) -> String {
    if !color {
        return text.to_owned();
    }
    match band {
        GradeBand::Success => text.green().to_string(),
        GradeBand::Warning => text.yellow().to_string(),
        GradeBand::Danger => text.red().to_string(),
    }
}

fn severity_mark(severity: Severity) -> &'static str {
    match severity {
        Severity::Success => "✓",
        Severity::Danger => "✗",
        Severity::Warning => "!",
        Severity::Info => "i",
    }
}

/// One-line banner, as printed to stderr.
pub fn banner_line(banner: &Banner, color: bool) -> String {
    let line = format!("{} {}", severity_mark(banner.severity), banner.text);
    if !color {
        return line;
    }
    match banner.severity {
        Severity::Success => line.green().to_string(),
        Severity::Danger => line.red().bold().to_string(),
        Severity::Warning => line.yellow().to_string(),
        Severity::Info => line.cyan().to_string(),
    }
}

// ── Table rows ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct StudentLinkRow {
    #[tabled(rename = "Matrícula")]
    matricula: String,
    #[tabled(rename = "Nome")]
    nome: String,
    #[tabled(rename = "Detalhes")]
    href: String,
}

impl From<&StudentLink> for StudentLinkRow {
    fn from(l: &StudentLink) -> Self {
        Self {
            matricula: l.numero_matricula.clone(),
            nome: l.nome.clone(),
            href: l.href.clone().unwrap_or_default(),
        }
    }
}

#[derive(Tabled)]
struct ModuleRow {
    #[tabled(rename = "ID")]
    id: i64,
    #[tabled(rename = "Módulo")]
    nome: String,
}

impl From<&ModuleTile> for ModuleRow {
    fn from(t: &ModuleTile) -> Self {
        Self {
            id: t.id,
            nome: t.nome.clone(),
        }
    }
}

#[derive(Tabled)]
struct MemberTableRow {
    #[tabled(rename = "Aluno")]
    aluno_id: i64,
    #[tabled(rename = "Nome")]
    nome: String,
    #[tabled(rename = "Matrícula")]
    matricula: String,
    #[tabled(rename = "Faltas")]
    faltas: i64,
    #[tabled(rename = "Tutor")]
    nota_tutor: String,
    #[tabled(rename = "Regular")]
    nota_regular: String,
    #[tabled(rename = "Recuperação")]
    nota_recuperacao: String,
    #[tabled(rename = "Final")]
    nota_final: String,
    #[tabled(rename = "Situação")]
    situacao: String,
}

impl MemberTableRow {
    fn new(r: &MemberRow, color: bool) -> Self {
        Self {
            aluno_id: r.selection.aluno_id,
            nome: r.nome.clone(),
            matricula: r.numero_matricula.clone(),
            faltas: r.faltas,
            nota_tutor: format_number(r.nota_tutor, 1),
            nota_regular: format_number(r.nota_avaliacao_regular, 1),
            nota_recuperacao: format_number(r.nota_recuperacao, 1),
            nota_final: paint_band(&format_number(r.nota_final, 1), r.band, color),
            situacao: paint_band(r.band.label(), r.band, color),
        }
    }
}

// ── Render dispatchers ───────────────────────────────────────────────

/// Render one region's fragment in the chosen format. An empty region
/// renders as the empty string in every format except the structured
/// ones, which show it as `{"kind": "empty"}`.
pub fn render_fragment(
    format: OutputFormat,
    fragment: &Fragment,
    color: bool,
) -> Result<String, CliError> {
    Ok(match format {
        OutputFormat::Table => render_fragment_table(fragment, color),
        OutputFormat::Json => serde_json::to_string_pretty(fragment)?,
        OutputFormat::JsonCompact => serde_json::to_string(fragment)?,
        OutputFormat::Yaml => serde_yaml::to_string(fragment)?,
        OutputFormat::Html => fragment.to_html(),
        OutputFormat::Plain => render_fragment_plain(fragment),
    })
}

/// Render a single serde-serializable item in the chosen format.
///
/// Table and HTML use `detail_fn`, plain uses `id_fn`.
pub fn render_single<T>(
    format: OutputFormat,
    data: &T,
    detail_fn: impl Fn(&T) -> String,
    id_fn: impl Fn(&T) -> String,
) -> Result<String, CliError>
where
    T: serde::Serialize,
{
    Ok(match format {
        OutputFormat::Table | OutputFormat::Html => detail_fn(data),
        OutputFormat::Json => serde_json::to_string_pretty(data)?,
        OutputFormat::JsonCompact => serde_json::to_string(data)?,
        OutputFormat::Yaml => serde_yaml::to_string(data)?,
        OutputFormat::Plain => id_fn(data),
    })
}

/// Print the rendered output to stdout, respecting quiet mode.
pub fn print_output(output: &str, quiet: bool) {
    if quiet || output.is_empty() {
        return;
    }
    let mut stdout = io::stdout().lock();
    let _ = writeln!(stdout, "{output}");
}

// ── Format-specific renderers ────────────────────────────────────────

fn render_table<R: Tabled>(rows: &[R]) -> String {
    Table::new(rows).with(Style::rounded()).to_string()
}

fn render_fragment_table(fragment: &Fragment, color: bool) -> String {
    match fragment {
        Fragment::Empty => String::new(),
        Fragment::Loading => "Carregando dados...".into(),
        Fragment::Banner(b) => banner_line(b, color),
        Fragment::StudentCard(card) => student_detail(card),
        Fragment::StudentList(links) => {
            let rows: Vec<StudentLinkRow> = links.iter().map(StudentLinkRow::from).collect();
            render_table(&rows)
        }
        Fragment::ModuleList(tiles) => {
            let rows: Vec<ModuleRow> = tiles.iter().map(ModuleRow::from).collect();
            render_table(&rows)
        }
        Fragment::MemberTable(members) => {
            let rows: Vec<MemberTableRow> =
                members.iter().map(|m| MemberTableRow::new(m, color)).collect();
            render_table(&rows)
        }
        Fragment::GradeSheet(sheet) => grade_detail(sheet, color),
    }
}

fn render_fragment_plain(fragment: &Fragment) -> String {
    match fragment {
        Fragment::Empty | Fragment::Loading => String::new(),
        Fragment::Banner(b) => b.text.clone(),
        Fragment::StudentCard(card) => card.numero_matricula.clone(),
        Fragment::StudentList(links) => links
            .iter()
            .map(|l| l.numero_matricula.as_str())
            .collect::<Vec<_>>()
            .join("\n"),
        Fragment::ModuleList(tiles) => tiles
            .iter()
            .map(|t| format!("{}\t{}", t.id, t.nome))
            .collect::<Vec<_>>()
            .join("\n"),
        Fragment::MemberTable(rows) => rows
            .iter()
            .map(|r| {
                format!(
                    "{}\t{}\t{}",
                    r.selection.aluno_id,
                    r.numero_matricula,
                    format_number(r.nota_final, 1)
                )
            })
            .collect::<Vec<_>>()
            .join("\n"),
        Fragment::GradeSheet(sheet) => format_number(sheet.nota_final, 1),
    }
}

fn student_detail(c: &StudentCard) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", c.nome);
    if let Some(id) = c.id {
        let _ = writeln!(out, "  ID:                {id}");
    }
    let _ = writeln!(out, "  Matrícula:         {}", c.numero_matricula);
    let _ = writeln!(out, "  Data de matrícula: {}", c.data_matricula);
    let _ = writeln!(out, "  Atestados:         {}", c.atestados);
    let _ = writeln!(out, "  Encaminhamento:    {}", c.encaminhamento);
    let _ = write!(out, "  Observações:       {}", c.obs);
    out
}

fn grade_detail(s: &GradeSheet, color: bool) -> String {
    let mut out = String::new();
    let title = if s.nome.is_empty() {
        format!("Aluno {} / Módulo {}", s.selection.aluno_id, s.selection.module_id)
    } else {
        format!("{} ({})", s.nome, s.numero_matricula)
    };
    let _ = writeln!(out, "{title}");
    let _ = writeln!(out, "  Faltas:            {}", s.faltas);
    let _ = writeln!(out, "  Nota tutor:        {}", format_number(s.nota_tutor, 1));
    let _ = writeln!(
        out,
        "  Avaliação regular: {}",
        format_number(s.nota_avaliacao_regular, 1)
    );
    let _ = writeln!(out, "  Recuperação:       {}", format_number(s.nota_recuperacao, 1));
    let _ = write!(
        out,
        "  Nota final:        {} {}",
        paint_band(&format_number(s.nota_final, 1), s.band, color),
        paint_band(&format!("({})", s.band.label()), s.band, color),
    );
    out
}

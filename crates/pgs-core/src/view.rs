// ── Typed view models and their HTML rendering ──
//
// Every region of the page holds a `Fragment`. Fragments are built from
// wire types by `From` conversions and rendered by `Fragment::to_html`,
// which is the only place markup is produced. All user-supplied text
// passes through `Escaped` on the way out.

use std::fmt::{self, Display, Write};

use serde::Serialize;
use strum::{Display as StrumDisplay, EnumString};

use pgs_api::{GradeRecord, Module, ModuleMember, Student};

use crate::format::{NOT_INFORMED, format_date, format_number};
use crate::model::{GradeBand, Selection};

// ── Severity ─────────────────────────────────────────────────────────

/// Banner style. Each severity maps to a fixed Bootstrap icon.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, StrumDisplay, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Severity {
    #[default]
    Success,
    Danger,
    Warning,
    Info,
}

impl Severity {
    pub fn icon(self) -> &'static str {
        match self {
            Self::Success => "check-circle-fill",
            Self::Danger | Self::Warning => "exclamation-triangle-fill",
            Self::Info => "info-circle-fill",
        }
    }
}

// ── View models ──────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Banner {
    pub severity: Severity,
    pub text: String,
}

/// Full detail card for one student.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StudentCard {
    pub id: Option<i64>,
    pub nome: String,
    pub numero_matricula: String,
    pub data_matricula: String,
    pub atestados: u32,
    pub encaminhamento: String,
    pub obs: String,
}

impl From<&Student> for StudentCard {
    fn from(s: &Student) -> Self {
        Self {
            id: s.id,
            nome: s.nome.clone(),
            numero_matricula: s.numero_matricula.clone(),
            data_matricula: format_date(s.data_matricula.as_deref()),
            atestados: s.atestados,
            encaminhamento: non_empty_or_placeholder(s.encaminhamento.as_deref()),
            obs: non_empty_or_placeholder(s.obs.as_deref()),
        }
    }
}

/// One entry of a multi-result search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StudentLink {
    pub nome: String,
    pub numero_matricula: String,
    /// Detail view for this student; absent when the backend omitted the id.
    pub href: Option<String>,
}

impl From<&Student> for StudentLink {
    fn from(s: &Student) -> Self {
        Self {
            nome: s.nome.clone(),
            numero_matricula: s.numero_matricula.clone(),
            href: s.id.map(student_detail_href),
        }
    }
}

pub fn student_detail_href(aluno_id: i64) -> String {
    format!("/detalhes_aluno/{aluno_id}")
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ModuleTile {
    pub id: i64,
    pub nome: String,
}

impl From<&Module> for ModuleTile {
    fn from(m: &Module) -> Self {
        Self {
            id: m.id,
            nome: m.nome.clone(),
        }
    }
}

/// One row of the module membership table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MemberRow {
    pub selection: Selection,
    pub nome: String,
    pub numero_matricula: String,
    pub faltas: i64,
    pub nota_tutor: f64,
    pub nota_avaliacao_regular: f64,
    pub nota_recuperacao: f64,
    pub nota_final: f64,
    pub band: GradeBand,
}

impl MemberRow {
    pub fn new(module_id: i64, m: &ModuleMember) -> Self {
        Self {
            selection: Selection::new(m.id, module_id),
            nome: m.nome.clone(),
            numero_matricula: m.numero_matricula.clone(),
            faltas: m.faltas,
            nota_tutor: m.nota_tutor,
            nota_avaliacao_regular: m.nota_avaliacao_regular,
            nota_recuperacao: m.nota_recuperacao,
            nota_final: m.nota_final,
            band: GradeBand::for_grade(m.nota_final),
        }
    }
}

/// Grade record detail for the current selection.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GradeSheet {
    pub selection: Selection,
    pub nome: String,
    pub numero_matricula: String,
    pub faltas: i64,
    pub nota_tutor: f64,
    pub nota_avaliacao_regular: f64,
    pub nota_recuperacao: f64,
    pub nota_final: f64,
    pub band: GradeBand,
}

impl GradeSheet {
    pub fn new(selection: Selection, r: &GradeRecord) -> Self {
        Self {
            selection,
            nome: r.nome.clone().unwrap_or_default(),
            numero_matricula: r.numero_matricula.clone().unwrap_or_default(),
            faltas: r.faltas,
            nota_tutor: r.nota_tutor,
            nota_avaliacao_regular: r.nota_avaliacao_regular,
            nota_recuperacao: r.nota_recuperacao,
            nota_final: r.nota_final,
            band: GradeBand::for_grade(r.nota_final),
        }
    }
}

// ── Fragment ─────────────────────────────────────────────────────────

/// The content of one page region.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(tag = "kind", content = "content", rename_all = "snake_case")]
pub enum Fragment {
    #[default]
    Empty,
    Loading,
    Banner(Banner),
    StudentCard(StudentCard),
    StudentList(Vec<StudentLink>),
    ModuleList(Vec<ModuleTile>),
    MemberTable(Vec<MemberRow>),
    GradeSheet(GradeSheet),
}

impl Fragment {
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }

    pub fn banner(&self) -> Option<&Banner> {
        match self {
            Self::Banner(b) => Some(b),
            _ => None,
        }
    }

    pub fn to_html(&self) -> String {
        Html(self).to_string()
    }
}

/// HTML rendering of a fragment.
pub struct Html<'a>(pub &'a Fragment);

impl Display for Html<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Fragment::Empty => Ok(()),
            Fragment::Loading => f.write_str(LOADING_HTML),
            Fragment::Banner(b) => write_banner(f, b),
            Fragment::StudentCard(card) => write_student_card(f, card),
            Fragment::StudentList(links) => write_student_list(f, links),
            Fragment::ModuleList(tiles) => write_module_list(f, tiles),
            Fragment::MemberTable(rows) => write_member_table(f, rows),
            Fragment::GradeSheet(sheet) => write_grade_sheet(f, sheet),
        }
    }
}

const LOADING_HTML: &str = concat!(
    r#"<div class="text-center py-4">"#,
    r#"<div class="spinner-border text-primary" role="status">"#,
    r#"<span class="visually-hidden">Carregando...</span></div>"#,
    r#"<p class="mt-2 text-muted">Carregando dados...</p></div>"#,
);

fn write_banner(f: &mut fmt::Formatter<'_>, b: &Banner) -> fmt::Result {
    write!(
        f,
        r#"<div class="alert alert-{sev} alert-dismissible fade show" role="alert"><i class="bi bi-{icon} me-2"></i>{text}<button type="button" class="btn-close" data-bs-dismiss="alert"></button></div>"#,
        sev = b.severity,
        icon = b.severity.icon(),
        text = Escaped(&b.text),
    )
}

fn write_student_card(f: &mut fmt::Formatter<'_>, c: &StudentCard) -> fmt::Result {
    f.write_str(r#"<div class="card"><div class="card-body">"#)?;
    write!(f, r#"<h5 class="card-title">{}</h5>"#, Escaped(&c.nome))?;
    f.write_str(r#"<dl class="row mb-0">"#)?;
    write_definition(f, "Matrícula", Escaped(&c.numero_matricula))?;
    write_definition(f, "Data de matrícula", Escaped(&c.data_matricula))?;
    write_definition(f, "Atestados", c.atestados)?;
    write_definition(f, "Encaminhamento", Escaped(&c.encaminhamento))?;
    write_definition(f, "Observações", Escaped(&c.obs))?;
    f.write_str("</dl>")?;
    if let Some(id) = c.id {
        write!(
            f,
            r#"<a class="btn btn-sm btn-outline-primary mt-3" href="{}">Ver módulos</a>"#,
            Escaped(&student_detail_href(id))
        )?;
    }
    f.write_str("</div></div>")
}

fn write_definition(f: &mut fmt::Formatter<'_>, label: &str, value: impl Display) -> fmt::Result {
    write!(
        f,
        r#"<dt class="col-sm-4">{label}</dt><dd class="col-sm-8">{value}</dd>"#
    )
}

fn write_student_list(f: &mut fmt::Formatter<'_>, links: &[StudentLink]) -> fmt::Result {
    f.write_str(r#"<div class="list-group">"#)?;
    for link in links {
        let label = format!(
            "{} ({})",
            Escaped(&link.nome),
            Escaped(&link.numero_matricula)
        );
        match &link.href {
            Some(href) => write!(
                f,
                r#"<a class="list-group-item list-group-item-action" href="{}">{label}</a>"#,
                Escaped(href)
            )?,
            None => write!(f, r#"<span class="list-group-item">{label}</span>"#)?,
        }
    }
    f.write_str("</div>")
}

fn write_module_list(f: &mut fmt::Formatter<'_>, tiles: &[ModuleTile]) -> fmt::Result {
    f.write_str(r#"<div class="row g-3">"#)?;
    for tile in tiles {
        write!(
            f,
            r#"<div class="col-md-4"><div class="card module-card" data-module-id="{id}"><div class="card-body"><h6 class="card-title">{nome}</h6><button type="button" class="btn btn-sm btn-primary" data-action="ver-alunos" data-module-id="{id}">Ver alunos</button></div></div></div>"#,
            id = tile.id,
            nome = Escaped(&tile.nome),
        )?;
    }
    f.write_str("</div>")
}

fn write_member_table(f: &mut fmt::Formatter<'_>, rows: &[MemberRow]) -> fmt::Result {
    f.write_str(concat!(
        r#"<table class="table table-hover"><thead><tr>"#,
        "<th>Nome</th><th>Matrícula</th><th>Faltas</th><th>Nota tutor</th>",
        "<th>Avaliação regular</th><th>Recuperação</th><th>Nota final</th><th></th>",
        "</tr></thead><tbody>"
    ))?;
    for row in rows {
        write!(
            f,
            r#"<tr class="table-{band}"><td>{nome}</td><td>{matricula}</td><td>{faltas}</td><td>{tutor}</td><td>{regular}</td><td>{rec}</td><td><span class="badge bg-{band}">{final_}</span></td><td><button type="button" class="btn btn-sm btn-outline-secondary" data-action="editar-notas" data-aluno-id="{aluno}" data-module-id="{module}">Editar</button></td></tr>"#,
            band = row.band,
            nome = Escaped(&row.nome),
            matricula = Escaped(&row.numero_matricula),
            faltas = row.faltas,
            tutor = format_number(row.nota_tutor, 1),
            regular = format_number(row.nota_avaliacao_regular, 1),
            rec = format_number(row.nota_recuperacao, 1),
            final_ = format_number(row.nota_final, 1),
            aluno = row.selection.aluno_id,
            module = row.selection.module_id,
        )?;
    }
    f.write_str("</tbody></table>")
}

fn write_grade_sheet(f: &mut fmt::Formatter<'_>, s: &GradeSheet) -> fmt::Result {
    write!(
        f,
        r#"<div class="card" data-aluno-id="{aluno}" data-module-id="{module}"><div class="card-body"><h5 class="card-title">{nome} <small class="text-muted">{matricula}</small></h5><ul class="list-unstyled mb-0"><li>Faltas: {faltas}</li><li>Nota tutor: {tutor}</li><li>Avaliação regular: {regular}</li><li>Recuperação: {rec}</li><li>Nota final: <span class="badge bg-{band}">{final_}</span> {label}</li></ul></div></div>"#,
        aluno = s.selection.aluno_id,
        module = s.selection.module_id,
        nome = Escaped(&s.nome),
        matricula = Escaped(&s.numero_matricula),
        faltas = s.faltas,
        tutor = format_number(s.nota_tutor, 1),
        regular = format_number(s.nota_avaliacao_regular, 1),
        rec = format_number(s.nota_recuperacao, 1),
        band = s.band,
        final_ = format_number(s.nota_final, 1),
        label = s.band.label(),
    )
}

fn non_empty_or_placeholder(value: Option<&str>) -> String {
    match value.map(str::trim) {
        Some(v) if !v.is_empty() => v.to_owned(),
        _ => NOT_INFORMED.to_owned(),
    }
}

// ── Escaping ─────────────────────────────────────────────────────────

/// Text escaped for HTML element content and quoted attribute values.
pub struct Escaped<'a>(pub &'a str);

impl Display for Escaped<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for c in self.0.chars() {
            match c {
                '&' => f.write_str("&amp;")?,
                '<' => f.write_str("&lt;")?,
                '>' => f.write_str("&gt;")?,
                '"' => f.write_str("&quot;")?,
                '\'' => f.write_str("&#39;")?,
                c => f.write_char(c)?,
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn student(id: Option<i64>, nome: &str) -> Student {
        Student {
            id,
            nome: nome.into(),
            numero_matricula: "2024001".into(),
            data_matricula: Some("2024-02-01".into()),
            atestados: 1,
            encaminhamento: None,
            obs: Some("Alergia a <b>amendoim</b>".into()),
        }
    }

    #[test]
    fn user_text_is_escaped() {
        let html = Fragment::StudentCard(StudentCard::from(&student(Some(1), "Ana & \"Bia\""))).to_html();
        assert!(html.contains("Ana &amp; &quot;Bia&quot;"));
        assert!(html.contains("Alergia a &lt;b&gt;amendoim&lt;/b&gt;"));
        assert!(!html.contains("<b>amendoim"));
    }

    #[test]
    fn card_formats_date_and_placeholders() {
        let card = StudentCard::from(&student(Some(1), "Ana"));
        assert_eq!(card.data_matricula, "01/02/2024");
        assert_eq!(card.encaminhamento, NOT_INFORMED);
    }

    #[test]
    fn list_entries_link_to_detail_views() {
        let links: Vec<StudentLink> = [student(Some(4), "Ana"), student(Some(9), "Bia")]
            .iter()
            .map(StudentLink::from)
            .collect();
        let html = Fragment::StudentList(links).to_html();
        assert!(html.contains(r#"href="/detalhes_aluno/4""#));
        assert!(html.contains(r#"href="/detalhes_aluno/9""#));
        assert_eq!(html.matches("list-group-item-action").count(), 2);
    }

    #[test]
    fn banner_uses_severity_class_and_icon() {
        let html = Fragment::Banner(Banner {
            severity: Severity::Warning,
            text: "Atenção".into(),
        })
        .to_html();
        assert!(html.contains("alert-warning"));
        assert!(html.contains("bi-exclamation-triangle-fill"));
    }

    #[test]
    fn member_rows_carry_band() {
        let member = ModuleMember {
            id: 5,
            nome: "Ana".into(),
            numero_matricula: "1".into(),
            faltas: 0,
            nota_tutor: 6.0,
            nota_avaliacao_regular: 7.0,
            nota_recuperacao: 0.0,
            nota_final: 6.5,
        };
        let row = MemberRow::new(3, &member);
        assert_eq!(row.band, GradeBand::Warning);
        assert_eq!(row.selection, Selection::new(5, 3));
        let html = Fragment::MemberTable(vec![row]).to_html();
        assert!(html.contains(r#"<tr class="table-warning">"#));
        assert!(html.contains("6.5"));
    }

    #[test]
    fn empty_fragment_renders_nothing() {
        assert_eq!(Fragment::Empty.to_html(), "");
        assert!(Fragment::Loading.to_html().contains("spinner-border"));
    }
}

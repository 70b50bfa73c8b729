//! Module command handlers.

use std::path::Path;

use serde::Serialize;

use pgs_core::view::MemberRow;
use pgs_core::{Export, ExportFormat, Fragment, Sections};

use crate::cli::{GlobalOpts, ModuleArgs, ModuleCommand};
use crate::error::CliError;

use super::util::{self, Regions};

// ── Export row ──────────────────────────────────────────────────────

/// Flat member record for spreadsheet export.
#[derive(Debug, Serialize)]
struct MemberExport<'a> {
    aluno_id: i64,
    module_id: i64,
    nome: &'a str,
    numero_matricula: &'a str,
    faltas: i64,
    nota_tutor: f64,
    nota_avaliacao_regular: f64,
    nota_recuperacao: f64,
    nota_final: f64,
    situacao: &'static str,
}

impl<'a> From<&'a MemberRow> for MemberExport<'a> {
    fn from(r: &'a MemberRow) -> Self {
        Self {
            aluno_id: r.selection.aluno_id,
            module_id: r.selection.module_id,
            nome: &r.nome,
            numero_matricula: &r.numero_matricula,
            faltas: r.faltas,
            nota_tutor: r.nota_tutor,
            nota_avaliacao_regular: r.nota_avaliacao_regular,
            nota_recuperacao: r.nota_recuperacao,
            nota_final: r.nota_final,
            situacao: r.band.label(),
        }
    }
}

fn export_members(
    fragment: Option<Fragment>,
    module_id: i64,
    format: ExportFormat,
    dir: &Path,
) -> Result<std::path::PathBuf, CliError> {
    let rows = match fragment {
        Some(Fragment::MemberTable(rows)) => rows,
        _ => Vec::new(),
    };
    let records: Vec<MemberExport<'_>> = rows.iter().map(MemberExport::from).collect();
    let export = Export::new(&records, &format!("modulo_{module_id}_alunos"), format)?;
    Ok(export.write_to(dir)?)
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(
    sections: &Sections,
    args: ModuleArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let page = sections.page();
    let layout = sections.layout();

    match args.command {
        ModuleCommand::Create { nome } => {
            let form = &layout.create_module;
            page.set_field(&form.field, nome);
            let settled = sections.create_module().await;
            util::finish(sections, settled, "nome", Regions::message(&form.message), global)
        }

        ModuleCommand::Delete { nome } => {
            if !util::confirm(
                &format!("Excluir o módulo '{nome}'? Esta ação não pode ser desfeita."),
                "module delete",
                global.yes,
            )? {
                return Ok(());
            }
            let form = &layout.delete_module;
            page.set_field(&form.field, nome);
            let settled = sections.delete_module().await;
            util::finish(sections, settled, "nome", Regions::message(&form.message), global)
        }

        ModuleCommand::List => {
            let region = layout.modules.as_str();
            let settled = sections.list_modules().await;
            util::finish(sections, settled, "modulos", Regions::with_content(region, region), global)
        }

        ModuleCommand::Members { id, export, dir } => {
            let region = layout.members.as_str();
            let settled = sections.list_module_members(id).await;
            util::finish(sections, settled, "modulo", Regions::with_content(region, region), global)?;

            if let Some(format) = export {
                let path = export_members(page.region(region), id, format, &dir)?;
                if !global.quiet {
                    eprintln!("✓ Exportado para {}", path.display());
                }
            }
            Ok(())
        }
    }
}

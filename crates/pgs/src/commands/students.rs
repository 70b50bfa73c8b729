//! Student command handlers.

use pgs_core::sections::StudentForm;
use pgs_core::{Page, Sections};

use crate::cli::{GlobalOpts, StudentArgs, StudentCommand, StudentFields};
use crate::error::CliError;

use super::util::{self, Regions};

fn fill_form(page: &Page, form: &StudentForm, matricula: &str, fields: &StudentFields) {
    page.set_field(&form.numero_matricula, matricula);
    page.set_field(&form.nome, fields.nome.as_str());
    page.set_field(&form.data_matricula, fields.data_matricula.as_str());
    page.set_field(&form.atestados, fields.atestados.as_str());
    page.set_field(&form.encaminhamento, fields.encaminhamento.as_str());
    page.set_field(&form.obs, fields.obs.as_str());
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(
    sections: &Sections,
    args: StudentArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let page = sections.page();
    let layout = sections.layout();

    match args.command {
        StudentCommand::Add { matricula, fields } => {
            let form = &layout.add_student;
            fill_form(page, form, &matricula, &fields);
            let settled = sections.add_student().await;
            util::finish(sections, settled, "aluno", Regions::message(&form.message), global)
        }

        StudentCommand::Edit { matricula, fields } => {
            let form = &layout.edit_student;
            fill_form(page, form, &matricula, &fields);
            let settled = sections.edit_student().await;
            util::finish(sections, settled, "aluno", Regions::message(&form.message), global)
        }

        StudentCommand::Delete { matricula } => {
            if !util::confirm(
                &format!("Excluir o aluno de matrícula '{matricula}'? Esta ação não pode ser desfeita."),
                "student delete",
                global.yes,
            )? {
                return Ok(());
            }
            let form = &layout.delete_student;
            page.set_field(&form.field, matricula);
            let settled = sections.delete_student().await;
            util::finish(sections, settled, "matricula", Regions::message(&form.message), global)
        }

        StudentCommand::Search { matricula, nome } => {
            let form = &layout.search;
            page.set_field(&form.numero_matricula, matricula);
            page.set_field(&form.nome, nome);
            let settled = sections.search_students().await;
            util::finish(
                sections,
                settled,
                "pesquisa",
                Regions::with_content(&form.message, &form.results),
                global,
            )
        }

        StudentCommand::Show { id } => {
            let form = &layout.search;
            let settled = sections.show_student(id).await;
            util::finish(
                sections,
                settled,
                "id",
                Regions::with_content(&form.message, &form.results),
                global,
            )
        }
    }
}

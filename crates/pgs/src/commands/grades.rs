//! Grade record command handlers.

use pgs_core::sections::GradeForm;
use pgs_core::{Page, Sections, Selection, Settled};

use crate::cli::{GlobalOpts, GradeArgs, GradeCommand, GradeFields, GradeKey};
use crate::error::CliError;

use super::util::{self, Regions};

/// Replace the grade form contents with the given values. Absent values
/// leave their field empty.
fn fill_form(page: &Page, form: &GradeForm, fields: GradeFields) {
    page.clear_fields(form.fields());
    let pairs = [
        (&form.faltas, fields.faltas),
        (&form.nota_tutor, fields.nota_tutor),
        (&form.nota_avaliacao_regular, fields.nota_avaliacao_regular),
        (&form.nota_recuperacao, fields.nota_recuperacao),
        (&form.nota_final, fields.nota_final),
    ];
    for (name, value) in pairs {
        if let Some(value) = value {
            page.set_field(name, value);
        }
    }
}

/// Load the record, failing with however the load settled.
async fn open(sections: &Sections, key: GradeKey) -> Result<Selection, CliError> {
    sections
        .open_grade_record(key.aluno_id, key.module_id)
        .await
        .map_err(|settled| {
            CliError::from_settled(settled, "notas", &util::server_url(sections))
                .unwrap_or(CliError::Dropped)
        })
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(
    sections: &Sections,
    args: GradeArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let page = sections.page();
    let form = &sections.layout().grades;
    let regions = Regions::message(&form.message);

    match args.command {
        GradeCommand::Show { key } => {
            open(sections, key).await?;
            util::finish(
                sections,
                Settled::Success,
                "notas",
                Regions::with_content(&form.message, &form.sheet),
                global,
            )
        }

        GradeCommand::Set { key, fields } => {
            let selection = open(sections, key).await?;
            fill_form(page, form, fields);
            let settled = sections.save_grade_record(&selection).await;
            util::finish(sections, settled, "notas", regions, global)
        }

        GradeCommand::Assign { key, fields } => {
            fill_form(page, form, fields);
            let selection = Selection::new(key.aluno_id, key.module_id);
            let settled = sections.assign_grade_record(&selection).await;
            util::finish(sections, settled, "notas", regions, global)
        }

        GradeCommand::Replace { key, fields } => {
            let selection = open(sections, key).await?;
            fill_form(page, form, fields);
            let settled = sections.replace_grade_record(&selection).await;
            util::finish(sections, settled, "notas", regions, global)
        }
    }
}
